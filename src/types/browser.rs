use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::RequestError;
use super::reader::CleanHtml;

/// Page handed to the browser view by the navigation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageRequest {
    pub url: String,
    pub title: Option<String>,
}

impl PageRequest {
    /// Builds a request, rejecting empty, relative and non-web URLs.
    pub fn new(url: &str, title: Option<&str>) -> Result<Self, RequestError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(RequestError::EmptyUrl);
        }
        let parsed = Url::parse(trimmed)
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RequestError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self {
            url: trimmed.to_string(),
            title: title.map(str::to_string),
        })
    }

    /// The caller-supplied title, ignoring empty strings.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Observable state of one browser view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub clean_html: CleanHtml,
    pub reader_mode_enabled: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            can_go_back: false,
            can_go_forward: false,
            clean_html: CleanHtml::Pending,
            reader_mode_enabled: true,
        }
    }
}

/// History availability reported by the raw render surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// What the render surface should display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSource {
    /// Static reader document, resolved against `base_url`.
    Html { html: String, base_url: String },
    /// Live page loaded directly from the network.
    Uri { uri: String },
    /// Reader mode with nothing to show yet (loading or unavailable).
    Blank,
}

/// Enabled/active flags for the browser toolbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToolbarState {
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub reader_mode_active: bool,
    /// False once extraction has failed; the host hides reader-mode UI.
    pub reader_mode_available: bool,
}

/// Payload for the platform share sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareRequest {
    pub url: String,
    pub title: Option<String>,
}

/// Inputs to the browser view state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowserEvent {
    PreferenceLoaded { enabled: bool },
    ContentLoaded { clean_html: CleanHtml },
    NavigationStateChanged { state: NavigationState },
    ToggleReaderMode,
    GoBack,
    GoForward,
    Share,
}

/// Outputs of the browser view state machine, applied by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowserEffect {
    Render { source: RenderSource },
    SurfaceGoBack,
    SurfaceGoForward,
    Share { request: ShareRequest },
}

/// Snapshot emitted by a browser session after each handled event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewUpdate {
    pub state: ViewState,
    pub effects: Vec<BrowserEffect>,
}
