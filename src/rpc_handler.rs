//! RPC method handler for the Simplepin JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches calls to the browser views, settings, reader
//! preference and login flow held by [`App`].

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::browser_session::BrowserViewHandle;
use crate::managers::login_form::{self, detect_api_token, LoginEffect, LoginForm, LoginFormTrait};
use crate::services::settings_engine::{PreferenceStore, SettingsEngineTrait};
use crate::types::account::LoginMode;
use crate::types::browser::{NavigationState, PageRequest};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn bool_param(params: &Value, name: &str) -> Result<bool, String> {
    params
        .get(name)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| format!("missing {}", name))
}

/// Login mode from `params`, the form's default mode when absent.
fn mode_param(params: &Value) -> Result<LoginMode, String> {
    match params.get("mode") {
        Some(m) => serde_json::from_value(m.clone()).map_err(|e| format!("invalid mode: {}", e)),
        None => Ok(LoginMode::default()),
    }
}

fn view<'a>(app: &'a App, params: &Value) -> Result<&'a BrowserViewHandle, String> {
    let id = str_param(params, "view_id")?;
    app.view(id).ok_or_else(|| format!("unknown view: {}", id))
}

fn queued(sent: bool) -> Result<Value, String> {
    if sent {
        Ok(json!({"ok": true}))
    } else {
        Err("view is closed".to_string())
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Browser views ───
        "browser.open" => {
            let url = str_param(params, "url")?;
            let title = params.get("title").and_then(|v| v.as_str());
            let request = PageRequest::new(url, title).map_err(|e| e.to_string())?;
            let view_id = app.open_view(request);
            Ok(json!({"view_id": view_id}))
        }
        "browser.toggle_reader_mode" => queued(view(app, params)?.toggle_reader_mode()),
        "browser.navigation_state" => {
            let state = NavigationState {
                can_go_back: bool_param(params, "can_go_back")?,
                can_go_forward: bool_param(params, "can_go_forward")?,
            };
            queued(view(app, params)?.navigation_state_changed(state))
        }
        "browser.go_back" => queued(view(app, params)?.go_back()),
        "browser.go_forward" => queued(view(app, params)?.go_forward()),
        "browser.share" => queued(view(app, params)?.share()),
        "browser.close" => {
            let id = str_param(params, "view_id")?;
            Ok(json!({"ok": app.close_view(id)}))
        }

        // ─── Settings ───
        "settings.get" => {
            serde_json::to_value(app.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            app.reload_services();
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
            app.reload_services();
            Ok(json!({"ok": true}))
        }

        // ─── Reader preference ───
        "reader.get_default" => {
            let enabled = app.preferences.reader_mode_default().await;
            Ok(json!({"enabled": enabled}))
        }
        "reader.set_default" => {
            let enabled = bool_param(params, "enabled")?;
            app.preferences
                .set_reader_mode_default(enabled)
                .await
                .map_err(|e| e.to_string())?;
            app.settings_engine.load().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Login ───
        "login.submit" => {
            let mut form = LoginForm::new(mode_param(params)?);
            if let Some(username) = params.get("username").and_then(|v| v.as_str()) {
                form.set_username(username);
            }
            form.set_secret(params.get("secret").and_then(|v| v.as_str()).unwrap_or(""));

            let effects = login_form::submit(&mut form, &app.auth_service)
                .await
                .map_err(|e| e.to_string())?;

            let mut user_name = None;
            for effect in effects {
                if let LoginEffect::Persist { credentials } = effect {
                    user_name = Some(credentials.user_name.clone());
                    let value = serde_json::to_value(&credentials).map_err(|e| e.to_string())?;
                    app.settings_engine
                        .set_value("account", value)
                        .map_err(|e| e.to_string())?;
                }
            }
            Ok(json!({"ok": true, "user_name": user_name}))
        }
        "login.detect_token" => {
            let clipboard = str_param(params, "clipboard")?;
            Ok(json!({"token": detect_api_token(clipboard)}))
        }
        "login.form" => {
            let form = LoginForm::new(mode_param(params)?);
            let mut model = serde_json::to_value(form.view_model()).map_err(|e| e.to_string())?;
            model["help_url"] = json!(form.help_url());
            Ok(model)
        }
        "account.get" => {
            let account = app.settings_engine.get_settings().account.as_ref();
            Ok(json!({
                "logged_in": account.is_some(),
                "user_name": account.map(|a| a.user_name.clone()),
            }))
        }
        "account.logout" => {
            app.settings_engine
                .set_value("account", Value::Null)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
