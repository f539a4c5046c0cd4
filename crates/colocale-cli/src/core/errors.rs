//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use colocale::ColocaleError;
use colocale_toml::ConfigError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use path_slash::PathExt as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error when an explicitly requested configuration file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", .expected_path.display())]
#[diagnostic(
    code(colocale::config::not_found),
    help(
        "Create a colocale.toml file in your project root, for example:\n\n  \
          source_dir = \"src\"\n  \
          messages_dir = \"messages\"\n  \
          locales = [\"en\", \"fr\"]\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when parsing the colocale.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse colocale.toml configuration")]
#[diagnostic(code(colocale::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when the configuration (file, environment or flags) is inconsistent.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(
    code(colocale::config::invalid),
    help("Locales must be valid BCP 47 tags (e.g. 'en', 'en-US', 'zh-Hant') listed once each")
)]
pub struct InvalidConfigError {
    pub message: String,
}

/// A translations file lacks one of the configured locales.
#[derive(Debug, Diagnostic, Error)]
#[error("there are no translations for the locale \"{locale}\" in {file}")]
#[diagnostic(
    code(colocale::load::missing_locale),
    help("Add a \"{locale}\" object to {file}, or remove \"{locale}\" from `locales`")
)]
pub struct MissingLocaleError {
    pub locale: String,
    pub file: String,
}

/// Two locales of one translations file have different keys.
#[derive(Debug, Diagnostic, Error)]
#[error("translations of \"{locale}\" are different from translations of \"{previous}\" in {file}")]
#[diagnostic(code(colocale::load::shape_mismatch))]
pub struct ShapeMismatchError {
    pub locale: String,
    pub previous: String,
    pub file: String,

    /// One `- key` / `+ key` / `~ key` line per difference.
    #[help]
    pub differences: String,
}

/// A translations file or locale file is not valid JSON.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse {file}")]
#[diagnostic(code(colocale::parse_error))]
pub struct FileParseError {
    pub file: String,

    #[help]
    pub help: String,
}

/// The injected script loader could not evaluate a `.ts`/`.js` file.
#[derive(Debug, Diagnostic, Error)]
#[error("script loader failed for {file}")]
#[diagnostic(code(colocale::load::script_loader))]
pub struct ScriptLoaderError {
    pub file: String,

    #[help]
    pub help: String,
}

/// The per-locale message files disagree on which groups exist.
#[derive(Debug, Diagnostic, Error)]
#[error("messages of \"{locale}\" do not match \"{template}\" at \"{key_path}\"")]
#[diagnostic(
    code(colocale::extract::catalog_shape),
    help("Every messages/<locale>.json must contain the same groups and keys as the first locale")
)]
pub struct CatalogShapeError {
    pub locale: String,
    pub template: String,
    pub key_path: String,
}

/// A message group key cannot be used as a component directory name.
#[derive(Debug, Diagnostic, Error)]
#[error("\"{key_path}\" in the messages of \"{locale}\" cannot be a component directory: {reason}")]
#[diagnostic(
    code(colocale::extract::invalid_key_path),
    help("Rename the group so each key is a plain directory name that `exclude_dirs` does not list")
)]
pub struct InvalidKeyPathError {
    pub locale: String,
    pub key_path: String,
    pub reason: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] InvalidConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingLocale(#[from] MissingLocaleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] FileParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ScriptLoader(#[from] ScriptLoaderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogShape(#[from] CatalogShapeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidKeyPath(#[from] InvalidKeyPathError),

    #[error(transparent)]
    #[diagnostic(code(colocale::core))]
    Core(ColocaleError),

    #[error("IO error: {0}")]
    #[diagnostic(code(colocale::io))]
    Io(#[from] std::io::Error),
}

fn slash(path: &Path) -> String {
    path.to_slash_lossy().into_owned()
}

impl From<ColocaleError> for CliError {
    fn from(err: ColocaleError) -> Self {
        match err {
            ColocaleError::MissingLocale { locale, file } => MissingLocaleError {
                locale,
                file: slash(&file),
            }
            .into(),
            ColocaleError::ShapeMismatch {
                locale,
                previous,
                file,
                differences,
            } => ShapeMismatchError {
                locale,
                previous,
                file: slash(&file),
                differences: differences
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
            .into(),
            ColocaleError::Parse { file, source } => FileParseError {
                file: slash(&file),
                help: source.to_string(),
            }
            .into(),
            ColocaleError::ScriptLoader { file, source } => ScriptLoaderError {
                file: slash(&file),
                help: source.to_string(),
            }
            .into(),
            ColocaleError::CatalogShape {
                locale,
                template,
                key_path,
            } => CatalogShapeError {
                locale,
                template,
                key_path: key_path.join("."),
            }
            .into(),
            ColocaleError::InvalidKeyPath {
                locale,
                key_path,
                reason,
            } => InvalidKeyPathError {
                locale,
                key_path: key_path.join("/"),
                reason: reason.to_string(),
            }
            .into(),
            other => CliError::Core(other),
        }
    }
}

impl CliError {
    /// Converts a configuration error, attaching the file content to parse errors.
    pub fn from_config(err: ConfigError, config_path: Option<&Path>) -> Self {
        match err {
            ConfigError::NotFound(expected_path) => ConfigNotFoundError { expected_path }.into(),
            ConfigError::ParseError(source) => {
                let content = config_path
                    .and_then(|path| fs_err::read_to_string(path).ok())
                    .unwrap_or_default();
                let name = config_path
                    .map(slash)
                    .unwrap_or_else(|| colocale_toml::CONFIG_FILE_NAME.to_string());
                ConfigParseError {
                    span: source.span().map(SourceSpan::from),
                    src: NamedSource::new(name, content),
                    help: source.message().to_string(),
                }
                .into()
            },
            ConfigError::ReadError(source) => CliError::Io(source),
            other => InvalidConfigError {
                message: other.to_string(),
            }
            .into(),
        }
    }
}
