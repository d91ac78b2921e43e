use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

const CATALOG: &str = r#"{
  "sourceLanguage" : "de",
  "strings" : {
    "Abbrechen" : {
      "comment" : "Cancel button",
      "localizations" : {
        "en" : {
          "stringUnit" : {
            "state" : "translated",
            "value" : "Cancel"
          }
        }
      }
    },
    "Speichern" : {
      "localizations" : {
        "en" : {
          "stringUnit" : {
            "state" : "needs_review",
            "value" : "Old"
          }
        }
      }
    }
  },
  "version" : "1.0"
}"#;

fn setup_config(test: &CliTest, extra: &str) -> Result<()> {
    test.write_file(
        ".xcmergerc.json",
        &format!(
            r#"{{
            "catalog": "App/Localizable.xcstrings",
            "translations": "i18n/translations.json"{}
        }}"#,
            extra
        ),
    )
}

#[test]
fn test_merge_updates_and_creates_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file(
        "i18n/translations.json",
        r#"{
            "Speichern": {"en": "Save", "fr": "Enregistrer"},
            "Deine Reise beginnt hier": {"en": "Your journey starts here"}
        }"#,
    )?;

    insta::with_settings!({filters => vec![(test.root_filter().as_str(), "[ROOT]")]}, {
        assert_cmd_snapshot!(test.merge_command(), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Wrote 1 key updated, 1 new key, 3 localizations across 2 languages
          --> [ROOT]/App/Localizable.xcstrings

        ----- stderr -----
        "#);
    });

    let catalog = test.read_json("App/Localizable.xcstrings")?;
    assert_eq!(
        catalog["strings"]["Speichern"]["localizations"],
        json!({
            "en": {"stringUnit": {"state": "translated", "value": "Save"}},
            "fr": {"stringUnit": {"state": "translated", "value": "Enregistrer"}}
        })
    );
    assert_eq!(
        catalog["strings"]["Deine Reise beginnt hier"],
        json!({
            "extractionState": "manual",
            "localizations": {
                "en": {"stringUnit": {"state": "translated", "value": "Your journey starts here"}}
            }
        })
    );
    // Untouched entries and top-level fields survive.
    assert_eq!(catalog["strings"]["Abbrechen"]["comment"], "Cancel button");
    assert_eq!(catalog["sourceLanguage"], "de");
    assert_eq!(catalog["version"], "1.0");

    Ok(())
}

#[test]
fn test_merge_exact_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Localizable.xcstrings",
        r#"{"strings": {"Save": {"localizations": {}}}}"#,
    )?;
    test.write_file(
        "translations.json",
        r#"{"Save": {"en": "Save", "de": "Speichern"}}"#,
    )?;

    assert_cmd_snapshot!(
        test.merge_command()
            .args(["--catalog", "Localizable.xcstrings"])
            .args(["--table", "translations.json"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 1 key updated, 0 new keys, 2 localizations across 2 languages
      --> Localizable.xcstrings

    ----- stderr -----
    "#);
    assert_eq!(
        test.read_json("Localizable.xcstrings")?,
        json!({"strings": {"Save": {"localizations": {
            "en": {"stringUnit": {"state": "translated", "value": "Save"}},
            "de": {"stringUnit": {"state": "translated", "value": "Speichern"}}
        }}}})
    );

    Ok(())
}

#[test]
fn test_merge_twice_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file(
        "i18n/translations.json",
        r#"{"Speichern": {"en": "Save"}, "Neu": {"ja": "新しい"}}"#,
    )?;

    test.merge_command().output()?;
    let first = test.read_file("App/Localizable.xcstrings")?;

    insta::with_settings!({filters => vec![(test.root_filter().as_str(), "[ROOT]")]}, {
        assert_cmd_snapshot!(test.merge_command(), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ [ROOT]/App/Localizable.xcstrings is already up to date (2 keys checked)

        ----- stderr -----
        "#);
    });
    let second = test.read_file("App/Localizable.xcstrings")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_merge_warn_policy_skips_unknown_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, r#", "onMissingKey": "warn""#)?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file(
        "i18n/translations.json",
        r#"{"Fehlt": {"en": "Missing"}, "Speichern": {"en": "Save"}}"#,
    )?;

    insta::with_settings!({filters => vec![(test.root_filter().as_str(), "[ROOT]")]}, {
        assert_cmd_snapshot!(test.merge_command(), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        warning: "Fehlt" not found in catalog, skipped  missing-key
          --> [ROOT]/App/Localizable.xcstrings
        ✓ Wrote 1 key updated, 0 new keys, 1 localization across 1 language
          --> [ROOT]/App/Localizable.xcstrings

        ✘ 1 key not in catalog (policy: warn)

        ----- stderr -----
        "#);
    });

    let catalog = test.read_json("App/Localizable.xcstrings")?;
    assert!(catalog["strings"].get("Fehlt").is_none());
    assert_eq!(
        catalog["strings"]["Speichern"]["localizations"]["en"]["stringUnit"]["value"],
        "Save"
    );

    Ok(())
}

#[test]
fn test_merge_cli_overrides_policy() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, r#", "onMissingKey": "warn""#)?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file("i18n/translations.json", r#"{"Neu": {"en": "New"}}"#)?;

    let output = test
        .merge_command()
        .args(["--on-missing", "insert"])
        .output()?;

    assert!(output.status.success());
    let catalog = test.read_json("App/Localizable.xcstrings")?;
    assert_eq!(catalog["strings"]["Neu"]["extractionState"], "manual");

    Ok(())
}

#[test]
fn test_merge_by_language_layout_with_key_filter() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, r#", "layout": "byLanguage", "keys": ["Speichern"]"#)?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file(
        "i18n/translations.json",
        r#"{
            "ru": {"Speichern": "Сохранить", "Abbrechen": "Отмена"},
            "zh-Hans": {"Speichern": "保存"}
        }"#,
    )?;

    let output = test.merge_command().output()?;
    assert!(output.status.success());

    let catalog = test.read_json("App/Localizable.xcstrings")?;
    let speichern = &catalog["strings"]["Speichern"]["localizations"];
    assert_eq!(speichern["ru"]["stringUnit"]["value"], "Сохранить");
    assert_eq!(speichern["zh-Hans"]["stringUnit"]["value"], "保存");
    // Filtered out by the key list.
    assert!(catalog["strings"]["Abbrechen"]["localizations"].get("ru").is_none());

    Ok(())
}

#[test]
fn test_merge_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file("i18n/translations.json", r#"{"Speichern": {"en": "Save"}}"#)?;

    insta::with_settings!({filters => vec![(test.root_filter().as_str(), "[ROOT]")]}, {
        assert_cmd_snapshot!(test.merge_command().arg("--dry-run"), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        Would write 1 key updated, 0 new keys, 1 localization across 1 language in [ROOT]/App/Localizable.xcstrings
        Run without --dry-run to update the catalog.

        ----- stderr -----
        "#);
    });
    assert_eq!(test.read_file("App/Localizable.xcstrings")?, CATALOG);

    Ok(())
}

#[test]
fn test_merge_dry_run_without_changes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Localizable.xcstrings",
        r#"{"strings": {"Save": {"localizations": {
            "en": {"stringUnit": {"state": "translated", "value": "Save"}}
        }}}}"#,
    )?;
    test.write_file("translations.json", r#"{"Save": {"en": "Save"}}"#)?;

    assert_cmd_snapshot!(test.merge_command().arg("--dry-run"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ ./Localizable.xcstrings is already up to date (1 key checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_merge_drops_extra_fields_on_same_value() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Localizable.xcstrings",
        r#"{"strings": {"K": {"localizations": {
            "en": {"stringUnit": {"state": "translated", "value": "New"}, "substitutions": {"n": {}}}
        }}}}"#,
    )?;
    test.write_file("translations.json", r#"{"K": {"en": "New"}}"#)?;

    assert_cmd_snapshot!(test.merge_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 1 key updated, 0 new keys, 1 localization across 1 language
      --> ./Localizable.xcstrings

    ----- stderr -----
    "#);

    let catalog = test.read_json("Localizable.xcstrings")?;
    assert_eq!(
        catalog["strings"]["K"]["localizations"]["en"],
        json!({"stringUnit": {"state": "translated", "value": "New"}})
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_merge_keeps_catalog_permissions() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file("i18n/translations.json", r#"{"Speichern": {"en": "Save"}}"#)?;
    let catalog_path = test.root().join("App/Localizable.xcstrings");
    std::fs::set_permissions(&catalog_path, std::fs::Permissions::from_mode(0o644))?;

    let output = test.merge_command().output()?;
    assert!(output.status.success());

    let mode = std::fs::metadata(&catalog_path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o644);

    Ok(())
}

#[test]
fn test_merge_malformed_catalog_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", r#"{"strings": ["#)?;
    test.write_file("i18n/translations.json", r#"{"Speichern": {"en": "Save"}}"#)?;

    let output = test.merge_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse string catalog"));
    assert_eq!(test.read_file("App/Localizable.xcstrings")?, r#"{"strings": ["#);

    Ok(())
}

#[test]
fn test_merge_malformed_table_leaves_catalog() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("App/Localizable.xcstrings", CATALOG)?;
    test.write_file("i18n/translations.json", r#"{"Speichern": {"en": 42}}"#)?;

    let output = test.merge_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be a string"));
    assert_eq!(test.read_file("App/Localizable.xcstrings")?, CATALOG);

    Ok(())
}

#[test]
fn test_merge_missing_catalog_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test, "")?;
    test.write_file("i18n/translations.json", r#"{"Speichern": {"en": "Save"}}"#)?;

    let output = test.merge_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read file"));

    Ok(())
}

#[test]
fn test_merge_verbose_without_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Localizable.xcstrings", r#"{"strings": {}}"#)?;
    test.write_file("translations.json", r#"{"Neu": {"en": "New"}}"#)?;

    assert_cmd_snapshot!(test.merge_command().arg("-v"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
      table ./translations.json
      created "Neu" (1 localization)
    ✓ Wrote 0 keys updated, 1 new key, 1 localization across 1 language
      --> ./Localizable.xcstrings

    ----- stderr -----
    Note: No .xcmergerc.json found, using default configuration
    "#);

    Ok(())
}
