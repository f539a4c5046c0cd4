//! Splits a catalog into per-component translations files (the extract direction).

use crate::error::{ColocaleError, slash};
use crate::model::{
    Catalog, DEFAULT_SECTION, FragmentMessages, KeyPath, MessageTree, MessageTreeExt as _,
};
use crate::render::render;
use colocale_toml::TranslationsFormat;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use strum::IntoEnumIterator as _;

use fs_err as fs;

/// The string messages of one catalog group, for every locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafGroup {
    pub key_path: KeyPath,
    pub per_locale: FragmentMessages,
}

/// Collects every group of the catalog that owns string messages, depth first.
///
/// The first locale is the template. Every other locale must hold a group at the same
/// key path with the same keys, and each key must be a string or a group on both sides.
/// String messages directly at the root of a locale have no component to live in and
/// are skipped with a warning.
///
/// Group keys become directory names, so each one must be a single plain path
/// component that is not in `excluded_dirs` (the loader never walks those).
pub fn leaf_groups(
    catalog: &Catalog,
    excluded_dirs: &[String],
) -> Result<Vec<LeafGroup>, ColocaleError> {
    let mut locales = catalog.iter();
    let Some((template_locale, template)) = locales.next() else {
        return Ok(Vec::new());
    };
    let others: Vec<(&str, &MessageTree)> = locales.collect();

    let mut walk = GroupWalk {
        template_locale,
        others: &others,
        excluded_dirs,
        key_path: Vec::new(),
        groups: Vec::new(),
    };
    walk.collect(template)?;
    Ok(walk.groups)
}

struct GroupWalk<'a> {
    template_locale: &'a str,
    others: &'a [(&'a str, &'a MessageTree)],
    excluded_dirs: &'a [String],
    key_path: KeyPath,
    groups: Vec<LeafGroup>,
}

impl GroupWalk<'_> {
    fn collect(&mut self, template: &MessageTree) -> Result<(), ColocaleError> {
        let mut per_locale = FragmentMessages::new();
        per_locale.insert(self.template_locale.to_string(), template.texts());

        for (locale, tree) in self.others {
            let group = tree
                .group_at(&self.key_path)
                .filter(|group| same_keys(template, group))
                .ok_or_else(|| ColocaleError::CatalogShape {
                    locale: locale.to_string(),
                    template: self.template_locale.to_string(),
                    key_path: self.key_path.clone(),
                })?;
            per_locale.insert(locale.to_string(), group.texts());
        }

        let owns_texts = template.is_empty() || template.values().any(|node| node.is_text());
        if self.key_path.is_empty() {
            if template.values().any(|node| node.is_text()) {
                tracing::warn!(
                    "Skipping top-level messages of \"{}\": they do not belong to any component",
                    self.template_locale
                );
            }
        } else if owns_texts {
            self.groups.push(LeafGroup {
                key_path: self.key_path.clone(),
                per_locale,
            });
        }

        for (key, node) in template {
            if let Some(child) = node.as_group() {
                self.key_path.push(key.clone());
                if let Some(reason) = directory_problem(key, self.excluded_dirs) {
                    return Err(ColocaleError::InvalidKeyPath {
                        locale: self.template_locale.to_string(),
                        key_path: self.key_path.clone(),
                        reason,
                    });
                }
                self.collect(child)?;
                self.key_path.pop();
            }
        }
        Ok(())
    }
}

/// Why `key` cannot name a directory under the source root, if it cannot.
fn directory_problem(key: &str, excluded_dirs: &[String]) -> Option<&'static str> {
    if key.is_empty() {
        return Some("empty key");
    }
    if key.contains(['/', '\\']) {
        return Some("contains a path separator");
    }
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name.to_str() == Some(key) => {},
        _ => return Some("not a plain directory name"),
    }
    if excluded_dirs.iter().any(|excluded| excluded == key) {
        return Some("the directory is excluded from the source walk");
    }
    None
}

fn same_keys(template: &MessageTree, other: &MessageTree) -> bool {
    let kinds = |tree: &MessageTree| -> BTreeMap<String, bool> {
        tree.iter()
            .map(|(key, node)| (key.clone(), node.is_text()))
            .collect()
    };
    kinds(template) == kinds(other)
}

/// `source_root/k1/k2/.../<base_name>.<ext>`.
pub fn target_path(
    source_root: &Path,
    key_path: &[String],
    base_name: &str,
    format: TranslationsFormat,
) -> PathBuf {
    let mut path = source_root.to_path_buf();
    path.extend(key_path);
    path.push(format.file_name(base_name));
    path
}

/// Directories a leaf group may live in, most preferred first.
///
/// Files at the source root load under the `common` section, so that section also
/// looks for them there before `common/`.
fn candidate_dirs(source_root: &Path, key_path: &[String]) -> Vec<PathBuf> {
    let mut nested = source_root.to_path_buf();
    nested.extend(key_path);

    if key_path.len() == 1 && key_path[0] == DEFAULT_SECTION {
        vec![source_root.to_path_buf(), nested]
    } else {
        vec![nested]
    }
}

/// How to treat a leaf group with no translations file yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Only rewrite translations files that already exist.
    #[default]
    Update,
    /// Also create missing translations files (and their directories).
    Create,
}

/// Before and after content of a file the extraction changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub before: String,
    pub after: String,
}

/// What an extraction did (or would do, in a dry run).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Files written (or that would be written).
    pub written: Vec<PathBuf>,
    /// Files whose content already matched.
    pub unchanged: Vec<PathBuf>,
    /// Directories that had no translations file to update.
    pub skipped: Vec<PathBuf>,
    pub diffs: Vec<FileDiff>,
}

impl ExtractReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.unchanged.is_empty() && self.skipped.is_empty()
    }
}

/// Writes leaf groups into translations files under a source root.
#[derive(Clone, Debug)]
pub struct SplitWriter<'a> {
    pub source_root: &'a Path,
    pub base_name: &'a str,
    pub mode: WriteMode,
    pub new_file_format: TranslationsFormat,
    pub dry_run: bool,
    pub log_output: bool,
}

impl SplitWriter<'_> {
    /// Writes `group` into every existing translations file of its directory, or into
    /// a new file when none exists and the mode allows it.
    pub fn write(
        &self,
        group: &LeafGroup,
        report: &mut ExtractReport,
    ) -> Result<(), ColocaleError> {
        let dirs = candidate_dirs(self.source_root, &group.key_path);
        let existing = dirs.iter().find_map(|dir| {
            let found: Vec<(PathBuf, TranslationsFormat)> = TranslationsFormat::iter()
                .map(|format| (dir.join(format.file_name(self.base_name)), format))
                .filter(|(path, _)| path.is_file())
                .collect();
            (!found.is_empty()).then_some(found)
        });

        let targets = match (existing, self.mode) {
            (Some(found), _) => found,
            (None, WriteMode::Create) => {
                let format = self.new_file_format;
                vec![(dirs[0].join(format.file_name(self.base_name)), format)]
            },
            (None, WriteMode::Update) => {
                let dir = &dirs[0];
                tracing::warn!(
                    "File {base}.ts, {base}.json or {base}.js does not exist for {} in {}",
                    group.key_path.join("."),
                    slash(dir),
                    base = self.base_name,
                );
                report.skipped.push(dir.clone());
                return Ok(());
            },
        };

        for (path, format) in targets {
            self.write_file(&path, format, group, report)?;
        }
        Ok(())
    }

    fn write_file(
        &self,
        path: &Path,
        format: TranslationsFormat,
        group: &LeafGroup,
        report: &mut ExtractReport,
    ) -> Result<(), ColocaleError> {
        let content = render(format, &group.per_locale)?;
        let before = if path.is_file() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };

        if before == content {
            tracing::debug!("Translations unchanged: {}", slash(path));
            report.unchanged.push(path.to_path_buf());
            return Ok(());
        }

        if !self.dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &content)?;
            if self.log_output {
                tracing::info!(
                    "Updated translations for {} in {}",
                    group.key_path.join("."),
                    slash(path)
                );
            }
        }

        report.written.push(path.to_path_buf());
        report.diffs.push(FileDiff {
            path: path.to_path_buf(),
            before,
            after: content,
        });
        Ok(())
    }
}
