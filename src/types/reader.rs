use serde::{Deserialize, Serialize};

/// Article returned by an extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    /// Cleaned HTML content.
    pub content: String,
    pub byline: Option<String>,
    pub site_name: Option<String>,
    pub excerpt: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            byline: None,
            site_name: None,
            excerpt: None,
        }
    }
}

/// Outcome of the reader pipeline as seen by the view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", content = "html", rename_all = "snake_case")]
pub enum CleanHtml {
    /// Extraction has not finished yet.
    #[default]
    Pending,
    /// Fetch or extraction failed; only raw browsing is possible.
    Unavailable,
    /// Ready-to-render reader document.
    Ready(String),
}

impl CleanHtml {
    pub fn is_pending(&self) -> bool {
        matches!(self, CleanHtml::Pending)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CleanHtml::Unavailable)
    }

    pub fn document(&self) -> Option<&str> {
        match self {
            CleanHtml::Ready(html) => Some(html),
            _ => None,
        }
    }
}

/// User-configurable reader mode display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderSettings {
    pub font_size: u32,
    pub font_family: FontFamily,
    pub background_color: String,
    pub text_color: String,
    pub line_height: f32,
    pub max_width: u32,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 18,
            font_family: FontFamily::Serif,
            background_color: "#ffffff".to_string(),
            text_color: "#333333".to_string(),
            line_height: 1.6,
            max_width: 680,
        }
    }
}

/// Font family options for reader mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}
