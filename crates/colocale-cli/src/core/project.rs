use crate::core::CliError;
use clap::Args;
use colocale_toml::{CONFIG_FILE_NAME, ColocaleConfig};
use std::path::PathBuf;

/// Arguments shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Project root (defaults to the current directory).
    #[arg(short = 'C', long, global = true)]
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to `<path>/colocale.toml` when it exists).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Deterministic output for end-to-end tests (no colors, no spinners).
    #[arg(long, global = true, hide = true)]
    pub e2e: bool,
}

/// The project a command operates on: its root and its resolved configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ColocaleConfig,
}

impl Project {
    /// Reads the configuration file and applies `COLOCALE_*` overrides.
    ///
    /// Command line overrides are applied by the caller, which then calls
    /// [`Project::validate`].
    pub fn resolve(args: &GlobalArgs) -> Result<Self, CliError> {
        let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

        let (config, config_path) = match &args.config {
            Some(path) => (ColocaleConfig::read_from_path(path), path.clone()),
            None => (ColocaleConfig::discover(&root), root.join(CONFIG_FILE_NAME)),
        };
        let config = config
            .and_then(ColocaleConfig::with_env_overrides)
            .map_err(|err| CliError::from_config(err, Some(&config_path)))?;

        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(Self { root, config })
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.config
            .validate()
            .map_err(|err| CliError::from_config(err, None))
    }

    pub fn source_dir(&self) -> PathBuf {
        self.config.source_dir_from_base(&self.root)
    }

    pub fn messages_dir(&self) -> PathBuf {
        self.config.messages_dir_from_base(&self.root)
    }
}
