//! Article extraction for Simplepin reader mode.
//!
//! The extraction algorithm itself is the Readability port provided by
//! `dom_smoothie`; this module only adapts its output to [`Article`].

use dom_smoothie::{Config, Readability};
use log::{debug, info};

use crate::services::reader_mode::ReaderMode;
use crate::types::reader::Article;

/// Turns raw page HTML into an article, or `None` when the page has no
/// readable content.
pub trait ArticleExtractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &str) -> Option<Article>;
}

/// Readability's default character threshold for an article body.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 500;

/// Readability-based extractor.
#[derive(Debug, Clone)]
pub struct ReadabilityExtractor {
    max_elements_to_parse: usize,
    min_text_length: usize,
}

impl ReadabilityExtractor {
    pub fn new() -> Self {
        Self {
            max_elements_to_parse: 9000,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Caps the number of DOM elements considered; 0 disables the cap.
    pub fn with_max_elements(mut self, max_elements_to_parse: usize) -> Self {
        self.max_elements_to_parse = max_elements_to_parse;
        self
    }

    /// Minimum number of text characters an article body must carry.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }
}

impl Default for ReadabilityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible characters in `html`, with runs of whitespace counted once.
fn text_length(html: &str) -> usize {
    let text = ReaderMode::strip_tags(html);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() + words.len() - 1
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ArticleExtractor for ReadabilityExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Option<Article> {
        if html.trim().is_empty() {
            return None;
        }

        let cfg = Config {
            max_elements_to_parse: self.max_elements_to_parse,
            ..Default::default()
        };

        let mut readability = match Readability::new(html, Some(base_url), Some(cfg)) {
            Ok(r) => r,
            Err(e) => {
                debug!("readability could not start on {}: {}", base_url, e);
                return None;
            }
        };

        let parsed = match readability.parse() {
            Ok(a) => a,
            Err(e) => {
                info!("no article found at {}: {}", base_url, e);
                return None;
            }
        };

        let content = parsed.content.to_string();
        let text_length = text_length(&content);
        if text_length == 0 || text_length < self.min_text_length {
            info!(
                "article at {} too short for reader mode ({} chars)",
                base_url, text_length
            );
            return None;
        }

        Some(Article {
            title: parsed.title.to_string(),
            content,
            byline: non_empty(parsed.byline.clone()),
            site_name: non_empty(parsed.site_name.clone()),
            excerpt: non_empty(parsed.excerpt.clone()),
        })
    }
}
