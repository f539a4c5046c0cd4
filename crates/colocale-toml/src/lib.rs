#![doc = include_str!("../README.md")]

pub mod build;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

use fs_err as fs;

/// Name of the configuration file looked up in a project root.
pub const CONFIG_FILE_NAME: &str = "colocale.toml";

/// Directory names the source walk never descends into unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".vscode",
    ".scripts",
    "public",
    ".git",
    "target",
    "dist",
    "build",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("colocale.toml configuration file not found at {0}")]
    NotFound(PathBuf),
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// An environment override could not be interpreted.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    /// A configured locale is not a valid language identifier.
    #[error("Invalid locale identifier '{name}'")]
    InvalidLocale {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// The same locale is listed twice.
    #[error("Locale '{0}' is listed more than once")]
    DuplicateLocale(String),
    /// The current locale is not one of the configured locales.
    #[error("Current locale '{current}' is not one of the configured locales ({available})")]
    UnknownCurrentLocale { current: String, available: String },
    /// The translations base file name is empty or contains a path separator.
    #[error("Invalid translations file name '{0}'")]
    InvalidFileName(String),
    /// Build-script helpers ran outside of Cargo.
    #[error("CARGO_MANIFEST_DIR is not set; call this from a Cargo build script")]
    MissingManifestDir,
}

/// On-disk format of a per-component translations file.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TranslationsFormat {
    /// TypeScript module exporting one constant per locale.
    #[default]
    Ts,
    /// Plain JSON object keyed by locale.
    Json,
    /// JavaScript module exporting a single locales object.
    Js,
}

impl TranslationsFormat {
    /// The file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TranslationsFormat::Ts => "ts",
            TranslationsFormat::Json => "json",
            TranslationsFormat::Js => "js",
        }
    }

    /// Whether reading this format requires an injected script loader.
    pub fn is_script(&self) -> bool {
        matches!(self, TranslationsFormat::Ts | TranslationsFormat::Js)
    }

    /// The file name for a given base name, e.g. `translations.ts`.
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}.{}", base_name, self.extension())
    }
}

/// The configuration for `colocale`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColocaleConfig {
    /// Root of the source tree holding per-component translations files.
    pub source_dir: PathBuf,
    /// Directory holding one `<locale>.json` per locale.
    pub messages_dir: PathBuf,
    /// Base name of the per-component translations files (without extension).
    pub translations_file_name: String,
    /// Whether progress is logged.
    pub log_output: bool,
    /// Whether extraction creates missing per-component files instead of skipping them.
    pub create_new_files: bool,
    /// Format used when extraction creates a new per-component file.
    pub new_file_format: TranslationsFormat,
    /// Locale whose messages `load` returns. Defaults to the first configured locale.
    pub current_locale: Option<String>,
    /// Ordered list of active locales. Empty means "discover from the messages directory".
    pub locales: Vec<String>,
    /// Whether every locale of a fragment must have the same key shape as the previous one.
    pub deep_comparison: bool,
    /// Whether `load` writes the merged catalog back to the messages directory.
    pub emit_catalog: bool,
    /// Directory names skipped while walking the source tree.
    pub exclude_dirs: Vec<String>,
}

impl Default for ColocaleConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            messages_dir: PathBuf::from("messages"),
            translations_file_name: "translations".to_string(),
            log_output: true,
            create_new_files: false,
            new_file_format: TranslationsFormat::default(),
            current_locale: None,
            locales: Vec::new(),
            deep_comparison: false,
            emit_catalog: true,
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ColocaleConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;

        let config: ColocaleConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `colocale.toml` from `dir` when present, otherwise returns the defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::read_from_path(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies `COLOCALE_*` environment variables on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = env_var("COLOCALE_SOURCE_DIR") {
            self.source_dir = PathBuf::from(value);
        }
        if let Some(value) = env_var("COLOCALE_MESSAGES_DIR") {
            self.messages_dir = PathBuf::from(value);
        }
        if let Some(value) = env_var("COLOCALE_TRANSLATIONS_FILE_NAME") {
            self.translations_file_name = value;
        }
        if let Some(value) = env_bool("COLOCALE_LOG_OUTPUT")? {
            self.log_output = value;
        }
        if let Some(value) = env_bool("COLOCALE_CREATE_NEW_FILES")? {
            self.create_new_files = value;
        }
        if let Some(value) = env_var("COLOCALE_NEW_FILE_FORMAT") {
            self.new_file_format = value.parse().map_err(|_| ConfigError::InvalidEnvValue {
                name: "COLOCALE_NEW_FILE_FORMAT",
                value: value.clone(),
                reason: "expected one of ts, json, js".to_string(),
            })?;
        }
        if let Some(value) = env_var("COLOCALE_CURRENT_LOCALE") {
            self.current_locale = Some(value);
        }
        if let Some(value) = env_var("COLOCALE_LOCALES") {
            self.locales = split_list(&value);
        }
        if let Some(value) = env_bool("COLOCALE_DEEP_COMPARISON")? {
            self.deep_comparison = value;
        }
        if let Some(value) = env_bool("COLOCALE_EMIT_CATALOG")? {
            self.emit_catalog = value;
        }
        Ok(self)
    }

    /// Checks locale identifiers, duplicates, the current locale and the file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for locale in &self.locales {
            locale
                .parse::<LanguageIdentifier>()
                .map_err(|source| ConfigError::InvalidLocale {
                    name: locale.clone(),
                    source,
                })?;
            if !seen.insert(locale.as_str()) {
                return Err(ConfigError::DuplicateLocale(locale.clone()));
            }
        }

        if let Some(current) = &self.current_locale
            && !self.locales.is_empty()
            && !self.locales.contains(current)
        {
            return Err(ConfigError::UnknownCurrentLocale {
                current: current.clone(),
                available: self.locales.join(", "),
            });
        }

        let name = &self.translations_file_name;
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::InvalidFileName(name.clone()));
        }

        Ok(())
    }

    /// The locale `load` returns: the configured current locale, else the first locale.
    pub fn resolve_current_locale(&self) -> Option<&str> {
        self.current_locale
            .as_deref()
            .or_else(|| self.locales.first().map(String::as_str))
    }

    /// Returns the source directory resolved against `base`.
    pub fn source_dir_from_base(&self, base: &Path) -> PathBuf {
        base.join(&self.source_dir)
    }

    /// Returns the messages directory resolved against `base`.
    pub fn messages_dir_from_base(&self, base: &Path) -> PathBuf {
        base.join(&self.messages_dir)
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    let Some(value) = env_var(name) else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidEnvValue {
            name,
            value,
            reason: "expected a boolean (true/false, 1/0, yes/no, on/off)".to_string(),
        }),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
