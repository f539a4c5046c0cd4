//! Merges loaded fragments into one catalog (the load direction).

use crate::error::ColocaleError;
use crate::model::{Catalog, DEFAULT_SECTION, Fragment, KeyPath, MessageNode, MessageTree};
use crate::shape::{shape_diff, trees_match};
use std::path::{Component, Path};

/// Derives the key path of a translations file from its root-relative location.
///
/// `home/hero/translations.json` maps to `["home", "hero"]`; a file directly under the
/// root maps to `["common"]`.
pub fn key_path_for(relative_path: &Path) -> KeyPath {
    let parents: KeyPath = relative_path
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parents.is_empty() {
        vec![DEFAULT_SECTION.to_string()]
    } else {
        parents
    }
}

/// Accumulates fragments into a [`Catalog`], validating each one on the way in.
#[derive(Debug)]
pub struct Assembler<'a> {
    locales: &'a [String],
    deep_comparison: bool,
    catalog: Catalog,
    fragments: usize,
}

impl<'a> Assembler<'a> {
    pub fn new(locales: &'a [String], deep_comparison: bool) -> Self {
        let mut catalog = Catalog::new();
        for locale in locales {
            catalog.insert(locale.clone(), MessageTree::new());
        }

        Self {
            locales,
            deep_comparison,
            catalog,
            fragments: 0,
        }
    }

    /// Validates `fragment` and overlays each locale's messages at the fragment's key path.
    ///
    /// Existing sibling keys are kept; keys present in the fragment replace keys of the
    /// same name already at that path.
    pub fn add(&mut self, fragment: Fragment) -> Result<(), ColocaleError> {
        let Fragment { path, mut messages } = fragment;
        let key_path = key_path_for(&path);

        for (index, locale) in self.locales.iter().enumerate() {
            let Some(current) = messages.get(locale) else {
                return Err(ColocaleError::MissingLocale {
                    locale: locale.clone(),
                    file: path,
                });
            };

            if self.deep_comparison && index > 0 {
                let previous = &self.locales[index - 1];
                let previous_tree = messages.get(previous).ok_or_else(|| {
                    ColocaleError::MissingLocale {
                        locale: previous.clone(),
                        file: path.clone(),
                    }
                })?;

                if !trees_match(previous_tree, current) {
                    return Err(ColocaleError::ShapeMismatch {
                        locale: locale.clone(),
                        previous: previous.clone(),
                        differences: shape_diff(previous_tree, current),
                        file: path,
                    });
                }
            }
        }

        for locale in self.locales {
            let Some(subtree) = messages.shift_remove(locale) else {
                continue;
            };
            let target = descend_or_create(self.catalog.entry(locale), &key_path).ok_or_else(
                || ColocaleError::PathConflict {
                    locale: locale.clone(),
                    key_path: key_path.clone(),
                    file: path.clone(),
                },
            )?;
            target.extend(subtree);
        }

        self.fragments += 1;
        Ok(())
    }

    /// Number of fragments merged so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn finish(self) -> Catalog {
        self.catalog
    }
}

/// Walks `path` from `tree`, creating empty groups for missing segments.
///
/// Returns `None` when a segment already holds a string.
fn descend_or_create<'t>(
    tree: &'t mut MessageTree,
    path: &[String],
) -> Option<&'t mut MessageTree> {
    let mut current = tree;
    for key in path {
        let node = current
            .entry(key.clone())
            .or_insert_with(|| MessageNode::Group(MessageTree::new()));
        current = match node {
            MessageNode::Group(group) => group,
            MessageNode::Text(_) => return None,
        };
    }
    Some(current)
}
