use crate::assemble::Assembler;
use crate::error::{ColocaleError, slash};
use crate::extract::discover_locales;
use crate::fragment::{FragmentLoader, ScriptLoader};
use crate::model::{Catalog, MessageTree};
use crate::render::render_json;
use crate::walk::walk_files;
use colocale_toml::ColocaleConfig;
use std::path::{Path, PathBuf};

use fs_err as fs;

/// Inputs of [`load_translations`] and [`collect_catalog`].
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Root of the component tree to scan.
    pub source_dir: PathBuf,
    /// Where the merged `<locale>.json` files are written.
    pub messages_dir: PathBuf,
    /// Base name of translations files, without extension.
    pub file_name: String,
    /// Active locales, in order. Empty discovers them from `messages_dir`.
    pub locales: Vec<String>,
    /// Locale returned by [`load_translations`]. Defaults to the first locale.
    pub current_locale: Option<String>,
    pub deep_comparison: bool,
    pub emit_catalog: bool,
    pub exclude_dirs: Vec<String>,
    pub log_output: bool,
}

impl LoadOptions {
    /// Options taken from `config`, with relative directories resolved against `base`.
    pub fn from_config(config: &ColocaleConfig, base: &Path) -> Self {
        Self {
            source_dir: config.source_dir_from_base(base),
            messages_dir: config.messages_dir_from_base(base),
            file_name: config.translations_file_name.clone(),
            locales: config.locales.clone(),
            current_locale: config.resolve_current_locale().map(str::to_string),
            deep_comparison: config.deep_comparison,
            emit_catalog: config.emit_catalog,
            exclude_dirs: config.exclude_dirs.clone(),
            log_output: config.log_output,
        }
    }

    /// The configured locales, or the ones found in the messages directory.
    pub fn resolve_locales(&self) -> Result<Vec<String>, ColocaleError> {
        if !self.locales.is_empty() {
            return Ok(self.locales.clone());
        }
        if self.messages_dir.is_dir() {
            discover_locales(&self.messages_dir)
        } else {
            Ok(Vec::new())
        }
    }
}

/// A merged catalog and the translations files it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectedCatalog {
    pub catalog: Catalog,
    /// Root-relative paths of the merged files, in walk order.
    pub fragments: Vec<PathBuf>,
}

/// Walks the source tree and merges every translations file into one catalog.
pub fn collect_catalog(
    options: &LoadOptions,
    script_loader: Option<&dyn ScriptLoader>,
) -> Result<CollectedCatalog, ColocaleError> {
    let locales = options.resolve_locales()?;
    if locales.is_empty() {
        tracing::warn!(
            "No locales configured and none found in {}",
            slash(&options.messages_dir)
        );
    }

    let loader = FragmentLoader::new(&options.source_dir, &options.file_name, script_loader);
    let mut assembler = Assembler::new(&locales, options.deep_comparison);
    let mut fragments = Vec::new();

    for relative_path in walk_files(&options.source_dir, &options.exclude_dirs)? {
        if let Some(fragment) = loader.load(&relative_path)? {
            assembler.add(fragment)?;
            fragments.push(relative_path);
        }
    }

    if options.log_output {
        tracing::info!(
            "Merged {} translations files for {} locales",
            assembler.fragment_count(),
            locales.len()
        );
    }

    Ok(CollectedCatalog {
        catalog: assembler.finish(),
        fragments,
    })
}

/// Writes one pretty-printed `<locale>.json` per locale into `dir`.
///
/// Files whose content already matches are left alone. Returns every catalog file path.
pub fn write_catalog(dir: &Path, catalog: &Catalog) -> Result<Vec<PathBuf>, ColocaleError> {
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(catalog.len());
    for (locale, tree) in catalog.iter() {
        let path = dir.join(format!("{locale}.json"));
        let content = render_json(tree)?;

        let unchanged = path.is_file() && fs::read_to_string(&path)? == content;
        if unchanged {
            tracing::debug!("Catalog unchanged: {}", slash(&path));
        } else {
            fs::write(&path, &content)?;
            tracing::debug!("Wrote catalog: {}", slash(&path));
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Collects every translations file under the source tree and returns the messages of
/// the current locale, optionally writing the full catalog to the messages directory.
pub fn load_translations(
    options: &LoadOptions,
    script_loader: Option<&dyn ScriptLoader>,
) -> Result<MessageTree, ColocaleError> {
    let CollectedCatalog { catalog, .. } = collect_catalog(options, script_loader)?;

    if options.emit_catalog {
        let written = write_catalog(&options.messages_dir, &catalog)?;
        if options.log_output {
            tracing::info!(
                "Wrote {} locale files to {}",
                written.len(),
                slash(&options.messages_dir)
            );
        }
    }

    Ok(current_locale_tree(catalog, options.current_locale.as_deref()))
}

/// The tree of `current_locale` (or of the first locale), empty when the catalog has none.
pub fn current_locale_tree(catalog: Catalog, current_locale: Option<&str>) -> MessageTree {
    let current = current_locale
        .map(str::to_string)
        .or_else(|| catalog.locales().next().map(str::to_string));

    current
        .and_then(|locale| catalog.into_locale(&locale))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageNode;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn options(temp: &TempDir) -> LoadOptions {
        let config = ColocaleConfig {
            locales: vec!["en".to_string(), "fr".to_string()],
            ..ColocaleConfig::default()
        };
        LoadOptions::from_config(&config, temp.path())
    }

    #[test]
    fn test_load_returns_first_locale_by_default() {
        let temp = TempDir::new().unwrap();
        temp.child("src/home/translations.json")
            .write_str(r#"{"en": {"title": "Hi"}, "fr": {"title": "Salut"}}"#)
            .unwrap();

        let tree = load_translations(&options(&temp), None).unwrap();
        let home = tree["home"].as_group().unwrap();
        assert_eq!(home["title"], MessageNode::from("Hi"));
    }

    #[test]
    fn test_load_returns_current_locale() {
        let temp = TempDir::new().unwrap();
        temp.child("src/home/translations.json")
            .write_str(r#"{"en": {"title": "Hi"}, "fr": {"title": "Salut"}}"#)
            .unwrap();

        let options = LoadOptions {
            current_locale: Some("fr".to_string()),
            ..options(&temp)
        };
        let tree = load_translations(&options, None).unwrap();
        assert_eq!(
            tree["home"].as_group().unwrap()["title"],
            MessageNode::from("Salut")
        );
    }

    #[test]
    fn test_load_emits_catalog_files() {
        let temp = TempDir::new().unwrap();
        temp.child("src/home/translations.json")
            .write_str(r#"{"en": {"title": "Hi"}, "fr": {"title": "Salut"}}"#)
            .unwrap();

        load_translations(&options(&temp), None).unwrap();

        temp.child("messages/en.json")
            .assert("{\n  \"home\": {\n    \"title\": \"Hi\"\n  }\n}\n");
        temp.child("messages/fr.json")
            .assert(predicates::str::contains("Salut"));
    }

    #[test]
    fn test_load_without_emit_writes_nothing() {
        let temp = TempDir::new().unwrap();
        temp.child("src/translations.json")
            .write_str(r#"{"en": {"ok": "OK"}, "fr": {"ok": "OK"}}"#)
            .unwrap();

        let options = LoadOptions {
            emit_catalog: false,
            ..options(&temp)
        };
        let tree = load_translations(&options, None).unwrap();

        assert!(tree.contains_key("common"));
        temp.child("messages").assert(predicates::path::missing());
    }

    #[test]
    fn test_load_empty_tree_when_nothing_contributes() {
        let temp = TempDir::new().unwrap();
        temp.child("src").create_dir_all().unwrap();

        let options = LoadOptions {
            emit_catalog: false,
            ..options(&temp)
        };
        assert!(load_translations(&options, None).unwrap().is_empty());
    }

    #[test]
    fn test_collect_catalog_lists_fragments_in_walk_order() {
        let temp = TempDir::new().unwrap();
        let json = r#"{"en": {"a": "1"}, "fr": {"a": "2"}}"#;
        temp.child("src/b/translations.json").write_str(json).unwrap();
        temp.child("src/a/translations.json").write_str(json).unwrap();
        temp.child("src/node_modules/x/translations.json")
            .write_str("{}")
            .unwrap();

        let collected = collect_catalog(&options(&temp), None).unwrap();
        assert_eq!(
            collected.fragments,
            vec![
                PathBuf::from("a/translations.json"),
                PathBuf::from("b/translations.json")
            ]
        );
    }

    #[test]
    fn test_locales_discovered_from_messages_dir() {
        let temp = TempDir::new().unwrap();
        temp.child("messages/fr.json").write_str("{}").unwrap();
        temp.child("messages/en.json").write_str("{}").unwrap();

        let options = LoadOptions::from_config(&ColocaleConfig::default(), temp.path());
        assert_eq!(options.resolve_locales().unwrap(), vec!["en", "fr"]);
    }

    #[test]
    fn test_write_catalog_leaves_unchanged_files() {
        let temp = TempDir::new().unwrap();
        let catalog: Catalog = [("en".to_string(), MessageTree::new())].into_iter().collect();

        let paths = write_catalog(temp.path(), &catalog).unwrap();
        assert_eq!(paths, vec![temp.path().join("en.json")]);
        temp.child("en.json").assert("{}\n");

        let again = write_catalog(temp.path(), &catalog).unwrap();
        assert_eq!(paths, again);
    }
}
