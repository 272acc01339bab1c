//! Simplepin RPC Server: JSON-RPC over stdin/stdout for the host UI.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"browser.open", "params":{"url":"...","title":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Browser views push {"event":"view","view_id":"...","state":{...},"effects":[...]}.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use log::{error, info};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use simplepin::app::App;
use simplepin::platform;
use simplepin::rpc_handler::handle_method;

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(value: &Value) {
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{}", value).and_then(|_| stdout.flush()).is_err() {
        error!("stdout closed");
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_dir = std::env::var("SIMPLEPIN_CONFIG_DIR").ok().map(PathBuf::from);
    let config_path = platform::settings_file(config_dir).to_string_lossy().to_string();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<Value>();
    let mut app = match App::new(Some(config_path.clone()), events_tx) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to load settings from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };
    info!("settings loaded from {}", config_path);

    emit(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(event) = events_rx.recv() => emit(&event),
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) | Err(_) => break,
                };
                if line.trim().is_empty() { continue; }

                let req: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        emit(&json!({"id":null,"error":format!("parse error: {}",e)}));
                        continue;
                    }
                };

                let id = req.get("id").cloned().unwrap_or(Value::Null);

                if !rate_limiter.check() {
                    emit(&json!({"id": id, "error": "rate limit exceeded"}));
                    continue;
                }

                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                let response = match handle_method(&mut app, method, &params).await {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                };
                emit(&response);
            }
        }
    }

    app.shutdown();
    info!("stdin closed, shutting down");
}
