//! Browser session: drives one [`BrowserView`] for the lifetime of a view.
//!
//! At mount the reader pipeline and the preference lookup start together.
//! Their results and the host's UI events are multiplexed in a single task,
//! so every state mutation happens strictly after the result that caused it.
//! Dropping the [`BrowserViewHandle`] (or the update receiver) unmounts the
//! view; in-flight work is dropped and can no longer touch the state.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::managers::browser_view::{BrowserView, BrowserViewTrait};
use crate::services::article_extractor::ArticleExtractor;
use crate::services::content_fetcher::ContentFetcher;
use crate::services::reader_pipeline::ReaderPipeline;
use crate::services::settings_engine::PreferenceStore;
use crate::types::browser::{
    BrowserEffect, BrowserEvent, NavigationState, PageRequest, ViewUpdate,
};
use crate::types::reader::CleanHtml;

/// Sending side of a mounted view, held by the host UI.
#[derive(Debug, Clone)]
pub struct BrowserViewHandle {
    id: String,
    events: mpsc::UnboundedSender<BrowserEvent>,
}

impl BrowserViewHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Queues `event` for the view. Returns false once the view is gone.
    pub fn send(&self, event: BrowserEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn toggle_reader_mode(&self) -> bool {
        self.send(BrowserEvent::ToggleReaderMode)
    }

    pub fn navigation_state_changed(&self, state: NavigationState) -> bool {
        self.send(BrowserEvent::NavigationStateChanged { state })
    }

    pub fn go_back(&self) -> bool {
        self.send(BrowserEvent::GoBack)
    }

    pub fn go_forward(&self) -> bool {
        self.send(BrowserEvent::GoForward)
    }

    pub fn share(&self) -> bool {
        self.send(BrowserEvent::Share)
    }

    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }
}

/// A view waiting to be run, plus the collaborators it needs.
pub struct BrowserSession<F, E, P> {
    id: String,
    view: BrowserView,
    pipeline: Arc<ReaderPipeline<F, E>>,
    preferences: Arc<P>,
    events: mpsc::UnboundedReceiver<BrowserEvent>,
}

impl<F, E, P> BrowserSession<F, E, P>
where
    F: ContentFetcher,
    E: ArticleExtractor + 'static,
    P: PreferenceStore,
{
    /// Mounts a view for `request` and returns the session with its handle.
    pub fn mount(
        request: PageRequest,
        pipeline: Arc<ReaderPipeline<F, E>>,
        preferences: Arc<P>,
    ) -> (Self, BrowserViewHandle) {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            id: id.clone(),
            view: BrowserView::new(request),
            pipeline,
            preferences,
            events: rx,
        };
        (session, BrowserViewHandle { id, events: tx })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs the view until it is unmounted and returns the final controller.
    ///
    /// The first update carries the initial render; each later update
    /// follows one handled event.
    pub async fn run(self, updates: mpsc::UnboundedSender<ViewUpdate>) -> BrowserView {
        let BrowserSession {
            id,
            mut view,
            pipeline,
            preferences,
            mut events,
        } = self;

        let fetch = view.begin_fetch();
        let mut content_done = fetch.is_none();
        let content = async {
            match &fetch {
                Some(request) => pipeline.load(request).await,
                None => CleanHtml::Pending,
            }
        };
        tokio::pin!(content);

        let mut preference_done = false;
        let preference = preferences.reader_mode_default();
        tokio::pin!(preference);

        let initial = ViewUpdate {
            state: view.state().clone(),
            effects: vec![BrowserEffect::Render {
                source: view.render_source(),
            }],
        };
        if updates.send(initial).is_err() {
            view.unmount();
            return view;
        }

        loop {
            let effects = tokio::select! {
                clean_html = &mut content, if !content_done => {
                    content_done = true;
                    view.handle(BrowserEvent::ContentLoaded { clean_html })
                }
                enabled = &mut preference, if !preference_done => {
                    preference_done = true;
                    view.handle(BrowserEvent::PreferenceLoaded { enabled })
                }
                event = events.recv() => match event {
                    Some(event) => view.handle(event),
                    None => break,
                },
            };

            let update = ViewUpdate {
                state: view.state().clone(),
                effects,
            };
            if updates.send(update).is_err() {
                break;
            }
        }

        debug!("browser view {} unmounted", id);
        view.unmount();
        view
    }
}
