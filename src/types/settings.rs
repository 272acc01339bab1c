use serde::{Deserialize, Serialize};

use super::account::AccountCredentials;
use super::reader::ReaderSettings;

/// Top-level client settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub reader: ReaderPreferences,
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub account: Option<AccountCredentials>,
}

/// Reader mode preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderPreferences {
    /// Whether new browser views open in reader mode.
    #[serde(default = "default_true")]
    pub reader_mode_default: bool,
    #[serde(default)]
    pub display: ReaderSettings,
}

fn default_true() -> bool {
    true
}

impl Default for ReaderPreferences {
    fn default() -> Self {
        Self {
            reader_mode_default: true,
            display: ReaderSettings::default(),
        }
    }
}

/// Remote service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSettings {
    pub api_base_url: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.pinboard.in/v1".to_string(),
        }
    }
}
