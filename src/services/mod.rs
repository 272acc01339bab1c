// Simplepin services
// Services provide the stateless building blocks: fetching, extraction, templating,
// settings persistence and remote credential verification.

pub mod article_extractor;
pub mod auth_service;
pub mod content_fetcher;
pub mod reader_mode;
pub mod reader_pipeline;
pub mod settings_engine;
