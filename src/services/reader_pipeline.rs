//! Reader pipeline: fetch → extract → render template.

use std::sync::Arc;

use log::{info, warn};

use crate::services::article_extractor::ArticleExtractor;
use crate::services::content_fetcher::ContentFetcher;
use crate::services::reader_mode::{ReaderMode, ReaderModeTrait};
use crate::types::browser::PageRequest;
use crate::types::reader::CleanHtml;

/// Composes a fetcher, an extractor and the reader template.
///
/// Extraction is CPU-bound and runs on the blocking pool.
pub struct ReaderPipeline<F, E> {
    fetcher: F,
    extractor: Arc<E>,
    template: ReaderMode,
}

impl<F, E> ReaderPipeline<F, E>
where
    F: ContentFetcher,
    E: ArticleExtractor + 'static,
{
    pub fn new(fetcher: F, extractor: E, template: ReaderMode) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
            template,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Runs the pipeline once for `request`.
    ///
    /// Network failures and extraction failures both yield
    /// [`CleanHtml::Unavailable`]; this never returns `Pending`.
    pub async fn load(&self, request: &PageRequest) -> CleanHtml {
        let html = match self.fetcher.fetch(&request.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("failed to fetch {}: {}", request.url, e);
                return CleanHtml::Unavailable;
            }
        };

        let extractor = Arc::clone(&self.extractor);
        let base_url = request.url.clone();
        let extracted =
            tokio::task::spawn_blocking(move || extractor.extract(&html, &base_url)).await;

        let extracted = match extracted {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!("extraction for {} aborted: {}", request.url, e);
                return CleanHtml::Unavailable;
            }
        };

        match extracted {
            Some(article) => {
                let title = request.display_title().unwrap_or(&article.title);
                info!("reader document ready for {}", request.url);
                CleanHtml::Ready(self.template.build_document(title, &article.content))
            }
            None => {
                info!("reader mode unavailable for {}", request.url);
                CleanHtml::Unavailable
            }
        }
    }
}
