//! Tests for the JSON-RPC method dispatch in `rpc_handler`.

use std::time::Duration;

use serde_json::{json, Value};
use simplepin::app::App;
use simplepin::rpc_handler::handle_method;
use tempfile::TempDir;
use tokio::sync::mpsc;

fn create_app() -> (App, mpsc::UnboundedReceiver<Value>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(Some(path), tx).unwrap();
    (app, rx, dir)
}

async fn next_view_event(events: &mut mpsc::UnboundedReceiver<Value>) -> Value {
    tokio::time::timeout(Duration::from_secs(30), events.recv())
        .await
        .expect("timed out waiting for a view event")
        .expect("event channel closed")
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_get_returns_defaults() {
    let (mut app, _events, _dir) = create_app();

    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();

    assert_eq!(settings["reader"]["reader_mode_default"], json!(true));
    assert_eq!(settings["reader"]["display"]["font_size"], json!(18));
    assert_eq!(settings["network"]["api_base_url"], json!("https://api.pinboard.in/v1"));
    assert_eq!(settings["account"], Value::Null);
}

#[tokio::test]
async fn test_settings_set_and_reset() {
    let (mut app, _events, _dir) = create_app();

    handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "reader.display.font_size", "value": 22}),
    )
    .await
    .unwrap();
    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["reader"]["display"]["font_size"], json!(22));

    handle_method(&mut app, "settings.reset", &json!({})).await.unwrap();
    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["reader"]["display"]["font_size"], json!(18));
}

#[tokio::test]
async fn test_settings_set_rejects_unknown_key_and_bad_value() {
    let (mut app, _events, _dir) = create_app();

    let err = handle_method(&mut app, "settings.set", &json!({"key": "reader.nope", "value": 1}))
        .await
        .unwrap_err();
    assert!(err.contains("not found"));

    let err = handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "reader.reader_mode_default", "value": "yes"}),
    )
    .await
    .unwrap_err();
    assert!(err.contains("Invalid value"));

    assert!(handle_method(&mut app, "settings.set", &json!({"key": "reader"})).await.is_err());
}

#[tokio::test]
async fn test_settings_set_api_base_rebuilds_auth_service() {
    let (mut app, _events, _dir) = create_app();

    handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "network.api_base_url", "value": "http://localhost:9/v1/"}),
    )
    .await
    .unwrap();

    assert_eq!(app.auth_service.api_base_url(), "http://localhost:9/v1");
}

// ─── Reader preference ───

#[tokio::test]
async fn test_reader_default_roundtrip() {
    let (mut app, _events, _dir) = create_app();

    let value = handle_method(&mut app, "reader.get_default", &json!({})).await.unwrap();
    assert_eq!(value, json!({"enabled": true}));

    handle_method(&mut app, "reader.set_default", &json!({"enabled": false})).await.unwrap();

    let value = handle_method(&mut app, "reader.get_default", &json!({})).await.unwrap();
    assert_eq!(value, json!({"enabled": false}));
    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["reader"]["reader_mode_default"], json!(false));
}

#[tokio::test]
async fn test_reader_set_default_requires_bool() {
    let (mut app, _events, _dir) = create_app();
    let err = handle_method(&mut app, "reader.set_default", &json!({"enabled": "no"}))
        .await
        .unwrap_err();
    assert_eq!(err, "missing enabled");
}

// ─── Login ───

#[tokio::test]
async fn test_login_detect_token() {
    let (mut app, _events, _dir) = create_app();

    let found = handle_method(
        &mut app,
        "login.detect_token",
        &json!({"clipboard": " maciej:ABCDEFGHIJ0123456789 "}),
    )
    .await
    .unwrap();
    assert_eq!(found, json!({"token": "maciej:ABCDEFGHIJ0123456789"}));

    let missing = handle_method(&mut app, "login.detect_token", &json!({"clipboard": "hello"}))
        .await
        .unwrap();
    assert_eq!(missing, json!({"token": null}));
}

#[tokio::test]
async fn test_login_form_describes_mode() {
    let (mut app, _events, _dir) = create_app();

    let model = handle_method(&mut app, "login.form", &json!({"mode": "api_token"}))
        .await
        .unwrap();
    assert_eq!(model["username_visible"], json!(false));
    assert_eq!(model["secret_placeholder"], json!("Username:Token"));
    assert_eq!(model["help_title"], json!("Show API Token"));
    assert_eq!(model["help_url"], json!("https://m.pinboard.in/settings/password"));
    assert_eq!(model["submit_enabled"], json!(false));

    let model = handle_method(&mut app, "login.form", &json!({})).await.unwrap();
    assert_eq!(model["mode"], json!("password"));
    assert_eq!(model["help_url"], json!("https://m.pinboard.in/password_reset/"));
}

#[tokio::test]
async fn test_login_submit_validates_before_network() {
    let (mut app, _events, _dir) = create_app();

    let err = handle_method(
        &mut app,
        "login.submit",
        &json!({"mode": "api_token", "secret": "  "}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, "Please Enter Your API Token");

    let err = handle_method(
        &mut app,
        "login.submit",
        &json!({"mode": "password", "username": "maciej"}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, "Please Enter Your Username and Password");

    let err = handle_method(&mut app, "login.submit", &json!({"mode": "sso", "secret": "x"}))
        .await
        .unwrap_err();
    assert!(err.starts_with("invalid mode"));
}

#[tokio::test]
async fn test_account_get_and_logout() {
    let (mut app, _events, _dir) = create_app();

    let account = handle_method(&mut app, "account.get", &json!({})).await.unwrap();
    assert_eq!(account, json!({"logged_in": false, "user_name": null}));

    handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "account", "value": {"user_name": "maciej", "api_token": "maciej:ABCDEFGHIJ0123456789"}}),
    )
    .await
    .unwrap();
    let account = handle_method(&mut app, "account.get", &json!({})).await.unwrap();
    assert_eq!(account, json!({"logged_in": true, "user_name": "maciej"}));

    handle_method(&mut app, "account.logout", &json!({})).await.unwrap();
    let account = handle_method(&mut app, "account.get", &json!({})).await.unwrap();
    assert_eq!(account["logged_in"], json!(false));
}

#[tokio::test]
async fn test_login_methods_share_default_mode() {
    let (mut app, _events, _dir) = create_app();

    let model = handle_method(&mut app, "login.form", &json!({})).await.unwrap();
    assert_eq!(model["mode"], json!("password"));

    // Without a mode, submit validates as the form describes: password mode.
    let err = handle_method(&mut app, "login.submit", &json!({"secret": "maciej:ABCDEFGHIJ0123456789"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Please Enter Your Username and Password");
}

// ─── Browser views ───

#[tokio::test]
async fn test_browser_open_rejects_bad_urls() {
    let (mut app, _events, _dir) = create_app();

    assert_eq!(
        handle_method(&mut app, "browser.open", &json!({"url": ""})).await.unwrap_err(),
        "Page URL is empty"
    );
    assert!(handle_method(&mut app, "browser.open", &json!({"url": "not a url"}))
        .await
        .unwrap_err()
        .starts_with("Invalid page URL"));
    assert_eq!(
        handle_method(&mut app, "browser.open", &json!({"url": "javascript:alert(1)"}))
            .await
            .unwrap_err(),
        "Unsupported page URL scheme: javascript"
    );
    assert_eq!(
        handle_method(&mut app, "browser.open", &json!({})).await.unwrap_err(),
        "missing url"
    );
    assert_eq!(app.view_count(), 0);
}

#[tokio::test]
async fn test_browser_open_emits_view_events_and_closes() {
    let (mut app, mut events, _dir) = create_app();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/article", port);

    let opened = handle_method(&mut app, "browser.open", &json!({"url": url.clone(), "title": "A"}))
        .await
        .unwrap();
    let view_id = opened["view_id"].as_str().unwrap().to_string();
    assert_eq!(app.view_count(), 1);

    let first = next_view_event(&mut events).await;
    assert_eq!(first["event"], json!("view"));
    assert_eq!(first["view_id"], json!(view_id));
    assert_eq!(first["state"]["reader_mode_enabled"], json!(true));
    assert_eq!(first["effects"], json!([{"type": "render", "source": {"kind": "blank"}}]));

    // Nothing listens on the port, so the reader document is unavailable.
    let mut event = first;
    while event["state"]["clean_html"]["status"] == json!("pending") {
        event = next_view_event(&mut events).await;
    }
    assert_eq!(event["state"]["clean_html"], json!({"status": "unavailable"}));

    let toggled =
        handle_method(&mut app, "browser.toggle_reader_mode", &json!({"view_id": view_id}))
            .await
            .unwrap();
    assert_eq!(toggled, json!({"ok": true}));
    let mut event = next_view_event(&mut events).await;
    while event["effects"] == json!([]) {
        event = next_view_event(&mut events).await;
    }
    assert_eq!(event["effects"][0]["source"], json!({"kind": "uri", "uri": url}));

    let closed = handle_method(&mut app, "browser.close", &json!({"view_id": view_id}))
        .await
        .unwrap();
    assert_eq!(closed, json!({"ok": true}));
    assert_eq!(app.view_count(), 0);

    let err = handle_method(&mut app, "browser.share", &json!({"view_id": view_id}))
        .await
        .unwrap_err();
    assert!(err.starts_with("unknown view"));
    let closed = handle_method(&mut app, "browser.close", &json!({"view_id": view_id}))
        .await
        .unwrap();
    assert_eq!(closed, json!({"ok": false}));
}

#[tokio::test]
async fn test_navigation_state_requires_flags() {
    let (mut app, _events, _dir) = create_app();
    let opened = handle_method(&mut app, "browser.open", &json!({"url": "http://127.0.0.1:9/"}))
        .await
        .unwrap();

    let err = handle_method(
        &mut app,
        "browser.navigation_state",
        &json!({"view_id": opened["view_id"], "can_go_back": true}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, "missing can_go_forward");

    app.shutdown();
    assert_eq!(app.view_count(), 0);
}

#[tokio::test]
async fn test_unknown_method() {
    let (mut app, _events, _dir) = create_app();
    let err = handle_method(&mut app, "bookmarks.list", &json!({})).await.unwrap_err();
    assert_eq!(err, "unknown method: bookmarks.list");
}
