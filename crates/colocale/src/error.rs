use crate::shape::ShapeDifference;
use path_slash::PathExt as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type returned by an injected script loader.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ColocaleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error walking directory '{}': {source}", slash(.root))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Error parsing file {}: {source}", slash(.file))]
    Parse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Script loader failed for {}: {source}", slash(.file))]
    ScriptLoader {
        file: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("There are no translations for the locale \"{locale}\" in {}", slash(.file))]
    MissingLocale { locale: String, file: PathBuf },

    #[error(
        "Translations of \"{locale}\" are different from translations of \"{previous}\" in {}",
        slash(.file)
    )]
    ShapeMismatch {
        locale: String,
        previous: String,
        file: PathBuf,
        differences: Vec<ShapeDifference>,
    },

    #[error(
        "Cannot place translations of {} at \"{}\" for locale \"{locale}\": a message already uses that key",
        slash(.file),
        .key_path.join(".")
    )]
    PathConflict {
        locale: String,
        key_path: Vec<String>,
        file: PathBuf,
    },

    #[error(
        "Messages of \"{locale}\" do not match the shape of \"{template}\" at \"{}\"",
        .key_path.join(".")
    )]
    CatalogShape {
        locale: String,
        template: String,
        key_path: Vec<String>,
    },

    #[error(
        "Key path \"{}\" of \"{locale}\" cannot be used as a component directory: {reason}",
        .key_path.join(".")
    )]
    InvalidKeyPath {
        locale: String,
        key_path: Vec<String>,
        reason: &'static str,
    },

    #[error("Failed to serialize messages: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Renders a path with forward slashes for messages that should read the same on every platform.
pub(crate) fn slash(path: &Path) -> String {
    path.to_slash_lossy().into_owned()
}
