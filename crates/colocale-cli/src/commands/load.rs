//! Merges every translations file of the component tree into the per-locale catalog.

use crate::commands::SourceArgs;
use crate::core::{CliError, GlobalArgs, Project};
use crate::utils::ui;
use clap::Parser;
use colocale::render::render_json;
use colocale::{LoadOptions, ScriptLoader, collect_catalog, current_locale_tree, write_catalog};
use std::time::Instant;

/// Arguments for the load command.
#[derive(Debug, Default, Parser)]
pub struct LoadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Locale whose merged messages are printed with `--print`.
    #[arg(long)]
    pub current_locale: Option<String>,

    /// Require every locale of a translations file to have the same keys.
    #[arg(long)]
    pub deep: bool,

    /// Do not write the merged catalog to the messages directory.
    #[arg(long)]
    pub no_emit: bool,

    /// Print the merged messages of the current locale as JSON.
    #[arg(long)]
    pub print: bool,
}

/// Run the load command.
pub fn run_load(global: &GlobalArgs, args: LoadArgs) -> Result<(), CliError> {
    let mut project = Project::resolve(global)?;
    args.source.apply(&mut project.config);
    if let Some(locale) = &args.current_locale {
        project.config.current_locale = Some(locale.clone());
    }
    if args.deep {
        project.config.deep_comparison = true;
    }
    if args.no_emit {
        project.config.emit_catalog = false;
    }
    project.validate()?;

    ui::print_load_header();

    let options = LoadOptions::from_config(&project.config, &project.root);
    let script_loader = args.source.script_loader();

    let start = Instant::now();
    let pb = ui::create_spinner("Loading translations...");
    let result = collect_catalog(
        &options,
        script_loader.as_ref().map(|loader| loader as &dyn ScriptLoader),
    );
    pb.finish_and_clear();
    let collected = result?;

    if options.emit_catalog {
        let written = write_catalog(&options.messages_dir, &collected.catalog)?;
        ui::print_catalog_written(&options.messages_dir, written.len());
    }

    ui::print_load_summary(
        collected.fragments.len(),
        collected.catalog.len(),
        start.elapsed(),
    );

    if args.print {
        let tree = current_locale_tree(collected.catalog, options.current_locale.as_deref());
        print!("{}", render_json(&tree)?);
    }
    Ok(())
}
