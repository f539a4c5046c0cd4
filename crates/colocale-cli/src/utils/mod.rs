//! Utility functions shared across CLI commands.

mod script_loader;
pub mod ui;

pub use script_loader::CommandScriptLoader;
