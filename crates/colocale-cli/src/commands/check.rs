//! Validates the translations files of the component tree without writing anything.

use crate::commands::SourceArgs;
use crate::core::{CliError, GlobalArgs, Project};
use crate::utils::ui;
use clap::Parser;
use colocale::{LoadOptions, ScriptLoader, collect_catalog};

/// Arguments for the check command.
#[derive(Debug, Default, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the check command.
///
/// Always compares locale shapes and never writes the catalog.
pub fn run_check(global: &GlobalArgs, args: CheckArgs) -> Result<(), CliError> {
    let mut project = Project::resolve(global)?;
    args.source.apply(&mut project.config);
    project.config.deep_comparison = true;
    project.config.emit_catalog = false;
    project.validate()?;

    ui::print_check_header();

    let options = LoadOptions::from_config(&project.config, &project.root);
    let script_loader = args.source.script_loader();

    let pb = ui::create_spinner("Checking translations...");
    let result = collect_catalog(
        &options,
        script_loader.as_ref().map(|loader| loader as &dyn ScriptLoader),
    );
    pb.finish_and_clear();
    let collected = result?;

    ui::print_check_success(collected.fragments.len(), collected.catalog.len());
    Ok(())
}
