use crate::error::{ColocaleError, slash};
use crate::model::{Catalog, MessageTree};
use crate::split::{ExtractReport, SplitWriter, WriteMode, leaf_groups};
use colocale_toml::{ColocaleConfig, TranslationsFormat};
use std::path::{Path, PathBuf};

use fs_err as fs;

/// Inputs of [`extract_translations`].
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Directory holding one `<locale>.json` per locale.
    pub messages_dir: PathBuf,
    /// Root of the component tree receiving the translations files.
    pub source_dir: PathBuf,
    /// Base name of translations files, without extension.
    pub file_name: String,
    /// Locales to read, in order. Empty discovers every `*.json` in `messages_dir`.
    pub locales: Vec<String>,
    pub mode: WriteMode,
    pub new_file_format: TranslationsFormat,
    /// Directory names the loader skips. Groups with these names cannot be extracted.
    pub exclude_dirs: Vec<String>,
    pub log_output: bool,
    pub dry_run: bool,
}

impl ExtractOptions {
    /// Options taken from `config`, with relative directories resolved against `base`.
    pub fn from_config(config: &ColocaleConfig, base: &Path) -> Self {
        Self {
            messages_dir: config.messages_dir_from_base(base),
            source_dir: config.source_dir_from_base(base),
            file_name: config.translations_file_name.clone(),
            locales: config.locales.clone(),
            mode: if config.create_new_files {
                WriteMode::Create
            } else {
                WriteMode::Update
            },
            new_file_format: config.new_file_format,
            exclude_dirs: config.exclude_dirs.clone(),
            log_output: config.log_output,
            dry_run: false,
        }
    }
}

/// Reads the per-locale message files of `messages_dir` into a catalog.
///
/// With configured `locales`, reads `<locale>.json` for each of them in that order.
/// Otherwise every `*.json` file is a locale, sorted by name.
pub fn read_catalog(messages_dir: &Path, locales: &[String]) -> Result<Catalog, ColocaleError> {
    let locales = if locales.is_empty() {
        discover_locales(messages_dir)?
    } else {
        locales.to_vec()
    };

    let mut catalog = Catalog::new();
    for locale in locales {
        let file = locale_file(messages_dir, &locale);
        let content = fs::read_to_string(&file)?;
        let tree: MessageTree = serde_json::from_str(&content).map_err(|source| {
            tracing::error!("Error parsing file {}: {}", slash(&file), source);
            ColocaleError::Parse {
                file: file.clone(),
                source,
            }
        })?;
        catalog.insert(locale, tree);
    }
    Ok(catalog)
}

fn locale_file(messages_dir: &Path, locale: &str) -> PathBuf {
    messages_dir.join(format!("{locale}.json"))
}

pub(crate) fn discover_locales(messages_dir: &Path) -> Result<Vec<String>, ColocaleError> {
    let mut locales = Vec::new();
    for entry in fs::read_dir(messages_dir)? {
        let path = entry?.path();
        if path.is_file()
            && path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}

/// Splits the per-locale message files into per-component translations files.
///
/// Nothing is written when the catalog cannot be split: every group is validated first.
pub fn extract_translations(options: &ExtractOptions) -> Result<ExtractReport, ColocaleError> {
    let none_configured_exist = !options.locales.is_empty()
        && options
            .locales
            .iter()
            .all(|locale| !locale_file(&options.messages_dir, locale).is_file());

    let catalog = if none_configured_exist {
        Catalog::new()
    } else {
        read_catalog(&options.messages_dir, &options.locales)?
    };
    if catalog.is_empty() {
        tracing::warn!("No locale files found in the messages directory");
        return Ok(ExtractReport::default());
    }

    let writer = SplitWriter {
        source_root: &options.source_dir,
        base_name: &options.file_name,
        mode: options.mode,
        new_file_format: options.new_file_format,
        dry_run: options.dry_run,
        log_output: options.log_output,
    };

    let mut report = ExtractReport::default();
    for group in leaf_groups(&catalog, &options.exclude_dirs)? {
        writer.write(&group, &mut report)?;
    }

    if options.log_output {
        tracing::info!(
            "Translations processed successfully ({} written, {} unchanged, {} skipped)",
            report.written.len(),
            report.unchanged.len(),
            report.skipped.len()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn test_read_catalog_discovers_sorted_locales() {
        let temp = TempDir::new().unwrap();
        temp.child("fr.json").write_str(r#"{"a": "b"}"#).unwrap();
        temp.child("de.json").write_str(r#"{"a": "c"}"#).unwrap();
        temp.child("notes.txt").write_str("ignored").unwrap();

        let catalog = read_catalog(temp.path(), &[]).unwrap();
        assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["de", "fr"]);
    }

    #[test]
    fn test_read_catalog_uses_configured_order() {
        let temp = TempDir::new().unwrap();
        temp.child("fr.json").write_str("{}").unwrap();
        temp.child("en.json").write_str("{}").unwrap();
        temp.child("de.json").write_str("{}").unwrap();

        let locales = vec!["fr".to_string(), "en".to_string()];
        let catalog = read_catalog(temp.path(), &locales).unwrap();
        assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["fr", "en"]);
    }

    #[test]
    fn test_read_catalog_parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        temp.child("en.json").write_str("{").unwrap();

        let result = read_catalog(temp.path(), &[]);
        assert!(matches!(
            result,
            Err(ColocaleError::Parse { file, .. }) if file.ends_with("en.json")
        ));
    }

    #[test]
    fn test_read_catalog_missing_configured_locale_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = read_catalog(temp.path(), &["en".to_string()]);
        assert!(matches!(result, Err(ColocaleError::Io(_))));
    }

    #[test]
    fn test_extract_without_locale_files_is_empty_report() {
        let temp = TempDir::new().unwrap();
        temp.child("messages").create_dir_all().unwrap();

        let options = ExtractOptions::from_config(&ColocaleConfig::default(), temp.path());
        let report = extract_translations(&options).unwrap();

        assert!(report.is_empty());
    }

    #[test]
    fn test_extract_without_configured_locale_files_is_empty_report() {
        let temp = TempDir::new().unwrap();
        temp.child("messages").create_dir_all().unwrap();

        let config = ColocaleConfig {
            locales: vec!["en".to_string(), "fr".to_string()],
            ..ColocaleConfig::default()
        };
        let options = ExtractOptions::from_config(&config, temp.path());
        let report = extract_translations(&options).unwrap();

        assert!(report.is_empty());
    }

    #[test]
    fn test_extract_with_some_configured_locale_files_missing_is_io_error() {
        let temp = TempDir::new().unwrap();
        temp.child("messages/en.json").write_str("{}").unwrap();

        let config = ColocaleConfig {
            locales: vec!["en".to_string(), "fr".to_string()],
            ..ColocaleConfig::default()
        };
        let options = ExtractOptions::from_config(&config, temp.path());

        assert!(matches!(
            extract_translations(&options),
            Err(ColocaleError::Io(_))
        ));
    }

    #[test]
    fn test_from_config_resolves_directories() {
        let config = ColocaleConfig {
            create_new_files: true,
            ..ColocaleConfig::default()
        };
        let options = ExtractOptions::from_config(&config, Path::new("/app"));

        assert_eq!(options.messages_dir, PathBuf::from("/app/messages"));
        assert_eq!(options.source_dir, PathBuf::from("/app/src"));
        assert_eq!(options.mode, WriteMode::Create);
        assert_eq!(options.file_name, "translations");
        assert!(options.exclude_dirs.iter().any(|dir| dir == "node_modules"));
    }
}
