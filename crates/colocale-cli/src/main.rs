use clap::{Parser, Subcommand};
use colocale_cli::commands::{CheckArgs, ExtractArgs, LoadArgs, run_check, run_extract, run_load};
use colocale_cli::core::GlobalArgs;
use colocale_cli::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "colocale")]
#[command(about = "Keep per-component translations files in sync with per-locale catalogs")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split messages/<locale>.json into the translations files of each component
    Extract(ExtractArgs),

    /// Merge every translations file into messages/<locale>.json
    Load(LoadArgs),

    /// Validate translations files without writing anything
    Check(CheckArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(!ui::is_e2e())
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    ui::set_e2e_mode(cli.global.e2e);
    ui::init_logging();

    let result = match cli.command {
        Commands::Extract(args) => run_extract(&cli.global, args),
        Commands::Load(args) => run_load(&cli.global, args),
        Commands::Check(args) => run_check(&cli.global, args),
    };

    result.map_err(miette::Report::new)
}
