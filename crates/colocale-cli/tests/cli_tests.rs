use assert_fs::TempDir;
use assert_fs::prelude::*;
use insta::assert_snapshot;
use predicates::prelude::*;

const EN: &str = r#"{"home": {"title": "Home", "hero": {"cta": "Start"}}}"#;
const FR: &str = r#"{"home": {"title": "Accueil", "hero": {"cta": "Commencer"}}}"#;

fn colocale(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("colocale");
    cmd.current_dir(temp.path())
        .env_remove("COLOCALE_LOCALES")
        .env_remove("COLOCALE_SOURCE_DIR")
        .env_remove("COLOCALE_MESSAGES_DIR")
        .env("COLOCALE_LOG", "warn")
        .arg("--e2e");
    cmd
}

fn project_with_messages() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("colocale.toml")
        .write_str("locales = [\"en\", \"fr\"]\n")
        .unwrap();
    temp.child("messages/en.json").write_str(EN).unwrap();
    temp.child("messages/fr.json").write_str(FR).unwrap();
    temp
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    colocale(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_extract_creates_new_files() {
    let temp = project_with_messages();

    colocale(&temp)
        .args(["extract", "--new-files", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/home/translations.json"))
        .stdout(predicate::str::contains("src/home/hero/translations.json"))
        .stdout(predicate::str::contains("2 written, 0 unchanged, 0 skipped"));

    let hero = temp.child("src/home/hero/translations.json");
    hero.assert(predicate::str::contains("\"cta\": \"Commencer\""));
}

#[test]
fn test_extract_without_files_skips_in_update_mode() {
    let temp = project_with_messages();

    colocale(&temp)
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped (no translations file):"))
        .stdout(predicate::str::contains("0 written, 0 unchanged, 2 skipped"));

    temp.child("src").assert(predicate::path::missing());
}

#[test]
fn test_extract_dry_run_prints_diff_and_writes_nothing() {
    let temp = project_with_messages();
    let home = temp.child("src/home/translations.json");
    home.write_str("{}\n").unwrap();

    colocale(&temp)
        .args(["extract", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write:"))
        .stdout(predicate::str::contains("+     \"title\": \"Home\""))
        .stdout(predicate::str::contains("Dry run:"));

    home.assert("{}\n");
}

#[test]
fn test_extract_then_load_restores_catalog() {
    let temp = project_with_messages();

    colocale(&temp)
        .args(["extract", "--new-files", "--format", "json"])
        .assert()
        .success();

    temp.child("messages/en.json").write_str("{}").unwrap();
    temp.child("messages/fr.json").write_str("{}").unwrap();

    colocale(&temp)
        .args(["load", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merged 2 translations file(s) for 2 locale(s)",
        ))
        .stdout(predicate::str::contains("\"title\": \"Home\""));

    let en: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join("messages/en.json")).unwrap(),
    )
    .unwrap();
    let expected: serde_json::Value = serde_json::from_str(EN).unwrap();
    assert_eq!(en, expected);
}

#[test]
fn test_load_print_current_locale() {
    let temp = project_with_messages();
    colocale(&temp)
        .args(["extract", "--new-files", "--format", "json"])
        .assert()
        .success();

    colocale(&temp)
        .args(["load", "--no-emit", "--print", "--current-locale", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cta\": \"Commencer\""))
        .stdout(predicate::str::contains("Wrote").not());
}

#[test]
fn test_load_missing_locale_fails() {
    let temp = project_with_messages();
    temp.child("src/home/translations.json")
        .write_str(r#"{"en": {"title": "Home"}}"#)
        .unwrap();

    colocale(&temp)
        .arg("load")
        .assert()
        .failure()
        .stderr(predicate::str::contains("colocale::load::missing_locale"))
        .stderr(predicate::str::contains("\"fr\""));
}

#[test]
fn test_check_reports_shape_mismatch() {
    let temp = project_with_messages();
    temp.child("src/home/translations.json")
        .write_str(r#"{"en": {"title": "Home"}, "fr": {"titre": "Accueil"}}"#)
        .unwrap();

    colocale(&temp)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("colocale::load::shape_mismatch"))
        .stderr(predicate::str::contains("- title"))
        .stderr(predicate::str::contains("+ titre"));

    temp.child("messages/en.json").assert(EN);
}

#[test]
fn test_check_success() {
    let temp = project_with_messages();
    temp.child("src/home/translations.json")
        .write_str(r#"{"en": {"title": "Home"}, "fr": {"title": "Accueil"}}"#)
        .unwrap();

    let assert = colocale(&temp).arg("check").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert_snapshot!(stdout, @r"
    colocale check
    No issues found: 1 translations file(s), 2 locale(s)
    ");
}

#[test]
fn test_invalid_locale_in_flags_is_rejected() {
    let temp = project_with_messages();

    colocale(&temp)
        .args(["check", "--locale", "not a locale"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("colocale::config::invalid"));
}

#[test]
fn test_config_parse_error_is_reported() {
    let temp = TempDir::new().unwrap();
    temp.child("colocale.toml").write_str("locales = ").unwrap();

    colocale(&temp)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("colocale::config::parse_error"));
}

#[cfg(unix)]
#[test]
fn test_load_ts_files_through_script_loader() {
    let temp = project_with_messages();
    // `cat` stands in for a real evaluator: the file body is already JSON.
    temp.child("src/home/translations.ts")
        .write_str(r#"{"en": {"title": "Home"}, "fr": {"title": "Accueil"}}"#)
        .unwrap();

    colocale(&temp)
        .args(["load", "--no-emit", "--print", "--script-loader", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Home\""));
}

#[test]
fn test_extract_rejects_group_named_like_excluded_dir() {
    let temp = project_with_messages();
    temp.child("messages/en.json")
        .write_str(r#"{"public": {"title": "Home"}}"#)
        .unwrap();
    temp.child("messages/fr.json")
        .write_str(r#"{"public": {"title": "Accueil"}}"#)
        .unwrap();

    colocale(&temp)
        .args(["extract", "--new-files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("colocale::extract::invalid_key_path"));

    temp.child("src").assert(predicate::path::missing());
}
