//! Splits the per-locale catalog into the translations files of the component tree.

use crate::core::{CliError, GlobalArgs, Project};
use crate::utils::ui;
use clap::Parser;
use colocale::{ExtractOptions, TranslationsFormat, extract_translations};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the extract command.
#[derive(Debug, Default, Parser)]
pub struct ExtractArgs {
    /// Directory of the per-locale catalog files.
    #[arg(long)]
    pub messages_dir: Option<PathBuf>,

    /// Root of the component tree.
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Base name of translations files, without extension.
    #[arg(long)]
    pub file_name: Option<String>,

    /// Create translations files that do not exist yet.
    #[arg(long)]
    pub new_files: bool,

    /// Format of newly created translations files.
    #[arg(long, value_enum)]
    pub format: Option<TranslationsFormat>,

    /// Locale to extract, in order. Repeat for several locales.
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Only print the summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Show what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl ExtractArgs {
    fn apply(&self, project: &mut Project) {
        let config = &mut project.config;
        if let Some(dir) = &self.messages_dir {
            config.messages_dir = dir.clone();
        }
        if let Some(dir) = &self.source_dir {
            config.source_dir = dir.clone();
        }
        if let Some(name) = &self.file_name {
            config.translations_file_name = name.clone();
        }
        if self.new_files {
            config.create_new_files = true;
        }
        if let Some(format) = self.format {
            config.new_file_format = format;
        }
        if !self.locales.is_empty() {
            config.locales = self.locales.clone();
        }
        if self.quiet {
            config.log_output = false;
        }
    }
}

/// Run the extract command.
pub fn run_extract(global: &GlobalArgs, args: ExtractArgs) -> Result<(), CliError> {
    let mut project = Project::resolve(global)?;
    args.apply(&mut project);
    project.validate()?;

    ui::print_extract_header();

    let mut options = ExtractOptions::from_config(&project.config, &project.root);
    options.dry_run = args.dry_run;

    let start = Instant::now();
    let pb = ui::create_spinner("Extracting translations...");
    let result = extract_translations(&options);
    pb.finish_and_clear();
    let report = result?;

    if !args.quiet {
        for path in &report.written {
            ui::print_written(path, args.dry_run);
        }
        for dir in &report.skipped {
            ui::print_skipped(dir);
        }
    }

    if args.dry_run {
        for diff in &report.diffs {
            ui::print_diff_header(&diff.path);
            ui::print_diff(&diff.before, &diff.after);
        }
    }

    ui::print_extract_summary(&report, start.elapsed(), args.dry_run);
    Ok(())
}
