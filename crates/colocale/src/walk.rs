use crate::error::ColocaleError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Lists every file under `root`, relative to it, in a stable (file name sorted) order.
///
/// Directories whose name is in `excluded` are never entered, at any depth. The root
/// itself is always walked. Symbolic links are followed and listed under their own
/// path. Any filesystem error (including a link loop) aborts the walk.
pub fn walk_files(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>, ColocaleError> {
    tracing::debug!("Walking source tree: {}", root.display());

    let is_excluded = |entry: &DirEntry| {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| excluded.iter().any(|ex| ex == name))
    };

    let files = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry))
        .filter_map(|entry_result| match entry_result {
            Ok(entry) if entry.file_type().is_file() => {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                Some(Ok(relative))
            },
            Ok(_) => None,
            Err(source) => Some(Err(ColocaleError::Walk {
                root: root.to_path_buf(),
                source,
            })),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!("Found {} files under {}", files.len(), root.display());
    Ok(files)
}
