use crate::utils::CommandScriptLoader;
use clap::Args;
use colocale_toml::ColocaleConfig;
use std::path::PathBuf;

/// Inputs shared by the commands that read the component tree.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Root of the component tree.
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Directory of the per-locale catalog files.
    #[arg(long)]
    pub messages_dir: Option<PathBuf>,

    /// Base name of translations files, without extension.
    #[arg(long)]
    pub file_name: Option<String>,

    /// Locale to load, in order. Repeat for several locales.
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Command printing a `.ts`/`.js` translations file as JSON, e.g. `node eval.mjs`.
    #[arg(long, value_name = "COMMAND")]
    pub script_loader: Option<String>,
}

impl SourceArgs {
    pub fn apply(&self, config: &mut ColocaleConfig) {
        if let Some(dir) = &self.source_dir {
            config.source_dir = dir.clone();
        }
        if let Some(dir) = &self.messages_dir {
            config.messages_dir = dir.clone();
        }
        if let Some(name) = &self.file_name {
            config.translations_file_name = name.clone();
        }
        if !self.locales.is_empty() {
            config.locales = self.locales.clone();
        }
    }

    pub fn script_loader(&self) -> Option<CommandScriptLoader> {
        self.script_loader.as_deref().map(CommandScriptLoader::new)
    }
}
