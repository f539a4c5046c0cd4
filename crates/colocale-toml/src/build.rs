use crate::{CONFIG_FILE_NAME, ColocaleConfig, ConfigError};
use std::env;
use std::path::{Path, PathBuf};

/// Returns the paths a build script should watch for a project rooted at `manifest_dir`:
/// the config file, the messages directory and the source directory.
pub fn tracked_paths(manifest_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let config = ColocaleConfig::discover(manifest_dir)?.with_env_overrides()?;

    Ok(vec![
        manifest_dir.join(CONFIG_FILE_NAME),
        config.messages_dir_from_base(manifest_dir),
        config.source_dir_from_base(manifest_dir),
    ])
}

/// Emits Cargo rebuild hints for `colocale.toml`, the messages directory and the source tree.
///
/// Call this from your crate's `build.rs` so edits to translations files re-run the build.
pub fn track_inputs() -> Result<(), ConfigError> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .map_err(|_| ConfigError::MissingManifestDir)?;

    for var in ENV_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    for path in tracked_paths(&manifest_dir)? {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    Ok(())
}

const ENV_VARS: &[&str] = &[
    "COLOCALE_SOURCE_DIR",
    "COLOCALE_MESSAGES_DIR",
    "COLOCALE_TRANSLATIONS_FILE_NAME",
    "COLOCALE_CURRENT_LOCALE",
    "COLOCALE_LOCALES",
    "COLOCALE_DEEP_COMPARISON",
    "COLOCALE_EMIT_CATALOG",
];
