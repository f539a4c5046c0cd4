#![allow(dead_code)] // Functions used by different test binaries appear unused per-binary

//! Shared test utilities for colocale integration tests.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use colocale::{Catalog, ExtractOptions, LoadOptions, MessageTree, TranslationsFormat, WriteMode};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// The two locales most tests run with.
pub fn en_fr() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

/// Parse a message tree from JSON.
pub fn tree(json: &str) -> MessageTree {
    serde_json::from_str(json).unwrap()
}

/// Build a catalog from `(locale, json)` pairs, in order.
pub fn catalog(locales: &[(&str, &str)]) -> Catalog {
    locales
        .iter()
        .map(|(locale, json)| (locale.to_string(), tree(json)))
        .collect()
}

/// Write `messages/<locale>.json` for every locale of `catalog`.
pub fn write_messages(root: &TempDir, catalog: &Catalog) {
    for (locale, tree) in catalog.iter() {
        root.child(format!("messages/{locale}.json"))
            .write_str(&serde_json::to_string_pretty(tree).unwrap())
            .unwrap();
    }
}

/// Extraction options rooted at `root` (`messages/` and `src/`).
pub fn extract_options(root: &Path, mode: WriteMode) -> ExtractOptions {
    ExtractOptions {
        messages_dir: root.join("messages"),
        source_dir: root.join("src"),
        file_name: "translations".to_string(),
        locales: en_fr(),
        mode,
        new_file_format: TranslationsFormat::Ts,
        exclude_dirs: vec!["node_modules".to_string()],
        log_output: false,
        dry_run: false,
    }
}

/// Load options rooted at `root`, writing the catalog to `out/`.
pub fn load_options(root: &Path) -> LoadOptions {
    LoadOptions {
        source_dir: root.join("src"),
        messages_dir: root.join("out"),
        file_name: "translations".to_string(),
        locales: en_fr(),
        current_locale: None,
        deep_comparison: true,
        emit_catalog: true,
        exclude_dirs: vec!["node_modules".to_string()],
        log_output: false,
    }
}

/// Script loader standing in for a JS runtime: reads the file as JSON.
pub fn json_script_loader(
    path: &Path,
) -> Result<colocale::FragmentMessages, colocale::BoxError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Log output captured from `tracing` while a closure runs.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    /// Runs `f` with a subscriber that records WARN and ERROR events.
    pub fn warnings<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs)
    }

    pub fn lines_with(&self, level: &str) -> usize {
        let content = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        content.lines().filter(|line| line.contains(level)).count()
    }
}
