//! Reader Mode for Simplepin.
//!
//! Wraps extracted article content into a minimal, self-contained HTML
//! document for distraction-free reading.

use crate::types::reader::{FontFamily, ReaderSettings};

/// Trait defining the render template operations.
pub trait ReaderModeTrait {
    /// Builds the reader document. Same inputs always give the same output.
    fn build_document(&self, title: &str, content: &str) -> String;
    fn update_settings(&mut self, settings: ReaderSettings);
    fn get_settings(&self) -> &ReaderSettings;
}

/// Render template builder for reader documents.
#[derive(Debug, Clone, Default)]
pub struct ReaderMode {
    settings: ReaderSettings,
}

impl ReaderMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ReaderSettings) -> Self {
        Self { settings }
    }

    /// Estimates reading time based on word count (~200 words/min).
    pub fn estimate_read_time(text: &str) -> u32 {
        let word_count = text.split_whitespace().count();
        ((word_count as f64) / 200.0).ceil().max(1.0) as u32
    }

    /// Strips HTML tags to get plain text.
    pub fn strip_tags(html: &str) -> String {
        let mut result = String::with_capacity(html.len());
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => {
                    in_tag = false;
                    result.push(' ');
                }
                _ if !in_tag => result.push(ch),
                _ => {}
            }
        }
        result
    }

    /// Escapes text for use inside element content.
    fn escape_text(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    fn font_stack(family: &FontFamily) -> &'static str {
        match family {
            FontFamily::Serif => "Georgia, 'Times New Roman', serif",
            FontFamily::SansSerif => "-apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif",
            FontFamily::Monospace => "'SF Mono', Menlo, monospace",
        }
    }
}

impl ReaderModeTrait for ReaderMode {
    fn build_document(&self, title: &str, content: &str) -> String {
        let settings = &self.settings;
        let read_time = Self::estimate_read_time(&Self::strip_tags(content));
        let title = Self::escape_text(title);

        format!(
            r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title><style>
body {{ font-family: {font}; font-size: {size}px; line-height: {line}; background: {bg}; color: {fg}; max-width: {width}px; margin: 0 auto; padding: 1.5em; word-wrap: break-word; }}
h1 {{ font-size: 1.6em; line-height: 1.25; margin-bottom: 0.3em; }}
.meta {{ color: #8e8e93; font-size: 0.8em; margin-bottom: 2em; }}
img, video, figure {{ max-width: 100%; height: auto; }}
pre {{ overflow-x: auto; }}
a {{ color: #0a7aff; }}
</style></head><body>
<h1>{title}</h1>
<div class="meta">{read_time} min read</div>
<div class="content">{content}</div>
</body></html>"#,
            title = title,
            font = Self::font_stack(&settings.font_family),
            size = settings.font_size,
            line = settings.line_height,
            bg = settings.background_color,
            fg = settings.text_color,
            width = settings.max_width,
            read_time = read_time,
            content = content,
        )
    }

    fn update_settings(&mut self, settings: ReaderSettings) {
        self.settings = settings;
    }

    fn get_settings(&self) -> &ReaderSettings {
        &self.settings
    }
}
