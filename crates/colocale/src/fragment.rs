//! Loading of per-component translations files.

use crate::error::{BoxError, ColocaleError};
use crate::model::{Fragment, FragmentMessages};
use colocale_toml::TranslationsFormat;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator as _;

use fs_err as fs;

/// Capability that turns a script-format translations file into per-locale messages.
///
/// The core never executes `.ts`/`.js` modules itself. Callers inject whatever can
/// evaluate them (a bundler, a JS runtime, a pre-compiled cache, ...).
pub trait ScriptLoader {
    fn load(&self, path: &Path) -> Result<FragmentMessages, BoxError>;
}

impl<F> ScriptLoader for F
where
    F: Fn(&Path) -> Result<FragmentMessages, BoxError>,
{
    fn load(&self, path: &Path) -> Result<FragmentMessages, BoxError> {
        self(path)
    }
}

/// Returns the format of `path` when its file name is exactly `<base_name>.<ext>`.
pub fn detect_format(path: &Path, base_name: &str) -> Option<TranslationsFormat> {
    let file_name = path.file_name()?.to_str()?;
    TranslationsFormat::iter().find(|format| file_name == format.file_name(base_name))
}

/// Reads translations files found under a source root.
pub struct FragmentLoader<'a> {
    root: PathBuf,
    base_name: &'a str,
    script_loader: Option<&'a dyn ScriptLoader>,
}

impl<'a> FragmentLoader<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        base_name: &'a str,
        script_loader: Option<&'a dyn ScriptLoader>,
    ) -> Self {
        Self {
            root: root.into(),
            base_name,
            script_loader,
        }
    }

    /// Loads the file at `relative_path` (relative to the root).
    ///
    /// Returns `Ok(None)` for files that are not translations files, and for script
    /// files when no script loader was injected.
    pub fn load(&self, relative_path: &Path) -> Result<Option<Fragment>, ColocaleError> {
        let Some(format) = detect_format(relative_path, self.base_name) else {
            return Ok(None);
        };

        let absolute = self.root.join(relative_path);
        let messages = if format.is_script() {
            let Some(loader) = self.script_loader else {
                tracing::debug!(
                    "Skipping {} (no script loader for .{} files)",
                    relative_path.display(),
                    format.extension()
                );
                return Ok(None);
            };
            loader.load(&absolute).map_err(|source| {
                tracing::error!("Error parsing file {}: {}", relative_path.display(), source);
                ColocaleError::ScriptLoader {
                    file: relative_path.to_path_buf(),
                    source,
                }
            })?
        } else {
            let content = fs::read_to_string(&absolute)?;
            serde_json::from_str(&content).map_err(|source| {
                tracing::error!("Error parsing file {}: {}", relative_path.display(), source);
                ColocaleError::Parse {
                    file: relative_path.to_path_buf(),
                    source,
                }
            })?
        };

        tracing::trace!("Loaded {} ({})", relative_path.display(), format);
        Ok(Some(Fragment {
            path: relative_path.to_path_buf(),
            messages,
        }))
    }
}
