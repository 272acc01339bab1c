// Simplepin platform paths
// Resolves the per-user configuration directory that holds `settings.json`.
//
// Uses `cfg(target_os)` to pick the convention of the host platform; any other
// target (mobile hosts embed the core) falls back to a dot-directory in $HOME.

use std::env;
use std::path::PathBuf;

#[allow(dead_code)]
const APP_DIR: &str = "simplepin";
#[allow(dead_code)]
const APP_DIR_TITLE: &str = "Simplepin";

#[allow(dead_code)]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/simplepin` or `~/.config/simplepin`
/// - **macOS**: `~/Library/Application Support/Simplepin`
/// - **Windows**: `%APPDATA%/Simplepin`
/// - **other**: `~/.simplepin`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home_dir().join(".config").join(APP_DIR),
        }
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_TITLE)
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR_TITLE)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(format!(".{}", APP_DIR))
    }
}

/// Path of the settings file inside `dir`, or inside the platform config dir.
pub fn settings_file(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(get_config_dir).join("settings.json")
}
