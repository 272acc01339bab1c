//! App Core for Simplepin.
//!
//! Holds settings, the shared reader pipeline and the mounted browser views.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::managers::browser_session::{BrowserSession, BrowserViewHandle};
use crate::services::article_extractor::ReadabilityExtractor;
use crate::services::auth_service::AuthService;
use crate::services::content_fetcher::HttpContentFetcher;
use crate::services::reader_mode::ReaderMode;
use crate::services::reader_pipeline::ReaderPipeline;
use crate::services::settings_engine::{FilePreferenceStore, SettingsEngine, SettingsEngineTrait};
use crate::types::browser::PageRequest;
use crate::types::errors::SettingsError;

pub type HttpReaderPipeline = ReaderPipeline<HttpContentFetcher, ReadabilityExtractor>;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub preferences: Arc<FilePreferenceStore>,
    pub pipeline: Arc<HttpReaderPipeline>,
    pub auth_service: AuthService,
    views: HashMap<String, BrowserViewHandle>,
    events: mpsc::UnboundedSender<Value>,
}

impl App {
    /// Creates the app, loading settings from `config_path` (or the platform
    /// default). View updates are forwarded to `events` as JSON objects.
    pub fn new(
        config_path: Option<String>,
        events: mpsc::UnboundedSender<Value>,
    ) -> Result<Self, SettingsError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;

        let preferences = Arc::new(FilePreferenceStore::new(settings_engine.get_config_path()));
        let (pipeline, auth_service) = Self::build_services(&settings_engine);

        Ok(Self {
            settings_engine,
            preferences,
            pipeline,
            auth_service,
            views: HashMap::new(),
            events,
        })
    }

    fn build_services(engine: &SettingsEngine) -> (Arc<HttpReaderPipeline>, AuthService) {
        let settings = engine.get_settings();
        let pipeline = Arc::new(ReaderPipeline::new(
            HttpContentFetcher::new(),
            ReadabilityExtractor::new(),
            ReaderMode::with_settings(settings.reader.display.clone()),
        ));
        let auth_service = AuthService::new(&settings.network.api_base_url);
        (pipeline, auth_service)
    }

    /// Rebuilds the pipeline and auth service after a settings change.
    /// Views already mounted keep the pipeline they started with.
    pub fn reload_services(&mut self) {
        let (pipeline, auth_service) = Self::build_services(&self.settings_engine);
        self.pipeline = pipeline;
        self.auth_service = auth_service;
    }

    /// Mounts a browser view and starts it on the current runtime.
    pub fn open_view(&mut self, request: PageRequest) -> String {
        let (session, handle) =
            BrowserSession::mount(request, self.pipeline.clone(), self.preferences.clone());
        let view_id = handle.id().to_string();

        let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
        tokio::spawn(session.run(updates_tx));

        let events = self.events.clone();
        let forward_id = view_id.clone();
        tokio::spawn(async move {
            while let Some(update) = updates_rx.recv().await {
                let event = json!({
                    "event": "view",
                    "view_id": forward_id,
                    "state": update.state,
                    "effects": update.effects,
                });
                if events.send(event).is_err() {
                    break;
                }
            }
        });

        debug!("opened browser view {}", view_id);
        self.views.insert(view_id.clone(), handle);
        view_id
    }

    pub fn view(&self, view_id: &str) -> Option<&BrowserViewHandle> {
        self.views.get(view_id)
    }

    /// Unmounts a view. Returns false if it was not open.
    pub fn close_view(&mut self, view_id: &str) -> bool {
        self.views.remove(view_id).is_some()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Unmounts every view.
    pub fn shutdown(&mut self) {
        self.views.clear();
    }
}
