// Simplepin Settings Engine
// Manages user settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.
// Also provides the reader-mode Preference Store used by browser sessions.

use std::fs;
use std::future::Future;
use std::path::Path;

use log::warn;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

const READER_MODE_KEY: &str = "reader.reader_mode_default";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &AppSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::settings_file(None).to_string_lossy().to_string(),
        };

        Self {
            config_path,
            settings: AppSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<AppSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = AppSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: AppSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file, creating parent
    /// directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Updates an individual setting by dot-notation key path, then saves.
    ///
    /// The new value is validated by deserializing the whole tree back into
    /// `AppSettings`.
    ///
    /// # Examples
    /// - `"reader.reader_mode_default"` → updates `settings.reader.reader_mode_default`
    /// - `"reader.display.font_size"` → updates `settings.reader.display.font_size`
    /// - `"account"` → replaces the stored credentials (or `null` to clear them)
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let parts: Vec<&str> = key.split('.').collect();

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        {
            let (last, parents) = match parts.split_last() {
                Some(split) => split,
                None => return Err(SettingsError::InvalidKey("Key cannot be empty".to_string())),
            };

            let mut current = &mut json_value;
            for part in parents {
                current = current.get_mut(*part).ok_or_else(|| {
                    SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
                })?;
            }

            match current {
                serde_json::Value::Object(map) => {
                    if !map.contains_key(*last) {
                        return Err(SettingsError::InvalidKey(format!(
                            "Key '{}' not found in settings",
                            key
                        )));
                    }
                    map.insert(last.to_string(), value);
                }
                _ => {
                    return Err(SettingsError::InvalidKey(format!(
                        "Cannot navigate to key '{}': intermediate value is not an object",
                        key
                    )));
                }
            }
        }

        let new_settings: AppSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.settings = new_settings;
        self.save()?;

        Ok(())
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()?;
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

/// Persisted reader-mode default consulted by every new browser view.
pub trait PreferenceStore: Send + Sync {
    /// Resolves to the stored default. Read failures resolve to `true`.
    fn reader_mode_default(&self) -> impl Future<Output = bool> + Send;

    fn set_reader_mode_default(
        &self,
        enabled: bool,
    ) -> impl Future<Output = Result<(), SettingsError>> + Send;
}

/// Preference store reading and writing the settings file directly.
///
/// Each call goes through a fresh `SettingsEngine` on the blocking pool so
/// concurrent views never share an in-memory copy of the settings.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    config_path: String,
}

impl FilePreferenceStore {
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn reader_mode_default(&self) -> bool {
        let path = self.config_path.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            let mut engine = SettingsEngine::new(Some(path));
            engine.load()
        })
        .await;

        match loaded {
            Ok(Ok(settings)) => settings.reader.reader_mode_default,
            Ok(Err(e)) => {
                warn!("reader mode preference unreadable, defaulting to on: {}", e);
                true
            }
            Err(e) => {
                warn!("reader mode preference lookup aborted: {}", e);
                true
            }
        }
    }

    async fn set_reader_mode_default(&self, enabled: bool) -> Result<(), SettingsError> {
        let path = self.config_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut engine = SettingsEngine::new(Some(path));
            engine.load()?;
            engine.set_value(READER_MODE_KEY, serde_json::Value::Bool(enabled))
        })
        .await
        .map_err(|e| SettingsError::IoError(format!("Preference write aborted: {}", e)))?
    }
}
