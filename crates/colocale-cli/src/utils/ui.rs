// CLI output formatting with consistent styling using indicatif and colored.
// Summaries go to stdout through println!; library logs go to stderr through tracing.

use colocale::ExtractReport;
use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use path_slash::PathExt as _;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "COLOCALE_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden spinners).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        format!("{:.2?}", duration)
    }
}

fn display(path: &Path) -> String {
    path.to_slash_lossy().into_owned()
}

/// Installs the stderr log subscriber. The filter comes from `COLOCALE_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!is_e2e());

    let result = if is_e2e() {
        builder.without_time().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        eprintln!("{} {}", "Logging disabled:".yellow(), err);
    }
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_extract_header() {
    println!("{}", "colocale extract".dimmed());
}

pub fn print_load_header() {
    println!("{}", "colocale load".dimmed());
}

pub fn print_check_header() {
    println!("{}", "colocale check".dimmed());
}

pub fn print_written(path: &Path, dry_run: bool) {
    let verb = if dry_run { "Would write:" } else { "Wrote:" };
    println!("{} {}", verb.green(), display(path));
}

pub fn print_skipped(dir: &Path) {
    println!(
        "{} {}",
        "Skipped (no translations file):".yellow(),
        display(dir)
    );
}

pub fn print_extract_summary(report: &ExtractReport, duration: Duration, dry_run: bool) {
    let label = if dry_run { "Dry run:" } else { "Done:" };
    println!(
        "{} {} written, {} unchanged, {} skipped in {}",
        label.green(),
        report.written.len().to_string().cyan(),
        report.unchanged.len(),
        report.skipped.len(),
        format_duration(duration).green()
    );
}

pub fn print_catalog_written(messages_dir: &Path, locale_count: usize) {
    println!(
        "{} {} locale file(s) in {}",
        "Wrote".dimmed(),
        locale_count.to_string().cyan(),
        display(messages_dir)
    );
}

pub fn print_load_summary(fragment_count: usize, locale_count: usize, duration: Duration) {
    println!(
        "{} {} translations file(s) for {} locale(s) in {}",
        "Merged".dimmed(),
        fragment_count.to_string().cyan(),
        locale_count.to_string().cyan(),
        format_duration(duration).green()
    );
}

pub fn print_check_success(fragment_count: usize, locale_count: usize) {
    println!(
        "{} {} translations file(s), {} locale(s)",
        "No issues found:".green(),
        fragment_count,
        locale_count
    );
}

pub fn print_diff_header(path: &Path) {
    println!("{} {}", "---".dimmed(), display(path).white().bold());
}

pub fn print_diff(old: &str, new: &str) {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{} {}", sign, change);
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
