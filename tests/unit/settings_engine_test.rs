//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, stored credentials and reset.

use serde_json::json;
use simplepin::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use simplepin::types::account::AccountCredentials;
use simplepin::types::reader::FontFamily;
use simplepin::types::settings::AppSettings;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// Without a config file the engine starts from defaults: reader mode on and
/// the public API endpoint.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, AppSettings::default());
    assert!(settings.reader.reader_mode_default);
    assert_eq!(settings.network.api_base_url, "https://api.pinboard.in/v1");
    assert!(settings.account.is_none());
}

/// `set_value` persists immediately; a fresh engine on the same file sees it.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("reader.reader_mode_default", json!(false))
            .unwrap();
        engine
            .set_value("reader.display.font_family", json!("Monospace"))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert!(!loaded.reader.reader_mode_default);
    assert_eq!(loaded.reader.display.font_family, FontFamily::Monospace);
}

#[test]
fn test_account_can_be_stored_and_cleared() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let creds = AccountCredentials {
        user_name: "maciej".to_string(),
        api_token: "maciej:ABCDEFGHIJ0123456789".to_string(),
    };
    engine
        .set_value("account", serde_json::to_value(&creds).unwrap())
        .unwrap();
    assert_eq!(engine.get_settings().account.as_ref(), Some(&creds));

    engine.set_value("account", serde_json::Value::Null).unwrap();
    assert!(engine.get_settings().account.is_none());
}

#[test]
fn test_empty_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    assert!(engine.set_value("", json!(true)).is_err());
}

/// Reset writes defaults back to disk.
#[test]
fn test_reset_restores_defaults_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("network.api_base_url", json!("http://localhost:9999/v1"))
        .unwrap();

    engine.reset().unwrap();

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), AppSettings::default());
}

/// Files written by older versions may lack whole sections.
#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"reader":{"reader_mode_default":false}}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert!(!settings.reader.reader_mode_default);
    assert_eq!(settings.reader.display, Default::default());
    assert_eq!(settings.network, Default::default());
}
