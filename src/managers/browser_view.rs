//! Browser view state machine.
//!
//! Owns one [`ViewState`] for the lifetime of a view. All mutation goes
//! through [`BrowserViewTrait::handle`], which returns the effects the host
//! must apply to its render surface or share sheet.

use log::debug;

use crate::types::browser::{
    BrowserEffect, BrowserEvent, NavigationState, PageRequest, RenderSource, ShareRequest,
    ToolbarState, ViewState,
};
use crate::types::reader::CleanHtml;

/// Trait defining the browser view controller interface.
pub trait BrowserViewTrait {
    /// Hands out the URL to fetch the first time it is called, `None` after.
    fn begin_fetch(&mut self) -> Option<PageRequest>;
    fn handle(&mut self, event: BrowserEvent) -> Vec<BrowserEffect>;
    fn state(&self) -> &ViewState;
    fn request(&self) -> &PageRequest;
    fn render_source(&self) -> RenderSource;
    fn toolbar(&self) -> ToolbarState;
    fn share_request(&self) -> ShareRequest;
    fn unmount(&mut self);
    fn is_mounted(&self) -> bool;
}

/// Controller for one in-app browser view.
#[derive(Debug)]
pub struct BrowserView {
    request: PageRequest,
    state: ViewState,
    fetch_started: bool,
    user_toggled: bool,
    mounted: bool,
}

impl BrowserView {
    /// Mounts a view for `request`. Reader mode starts on until the stored
    /// preference arrives.
    pub fn new(request: PageRequest) -> Self {
        Self {
            request,
            state: ViewState::default(),
            fetch_started: false,
            user_toggled: false,
            mounted: true,
        }
    }

    fn render(&self) -> BrowserEffect {
        BrowserEffect::Render {
            source: self.render_source(),
        }
    }

    fn set_reader_mode(&mut self, enabled: bool) {
        self.state.reader_mode_enabled = enabled;
        // A freshly shown surface has no history until it reports one.
        self.state.can_go_back = false;
        self.state.can_go_forward = false;
    }

    fn on_preference_loaded(&mut self, enabled: bool) -> Vec<BrowserEffect> {
        if self.user_toggled {
            debug!("discarding late reader mode preference for {}", self.request.url);
            return Vec::new();
        }
        if self.state.reader_mode_enabled == enabled {
            return Vec::new();
        }
        self.set_reader_mode(enabled);
        vec![self.render()]
    }

    fn on_content_loaded(&mut self, clean_html: CleanHtml) -> Vec<BrowserEffect> {
        if clean_html.is_pending() {
            return Vec::new();
        }
        debug!(
            "reader content for {} settled ({})",
            self.request.url,
            if clean_html.is_unavailable() { "unavailable" } else { "ready" }
        );
        self.state.clean_html = clean_html;
        if self.state.reader_mode_enabled {
            vec![self.render()]
        } else {
            Vec::new()
        }
    }

    fn on_navigation_state(&mut self, nav: NavigationState) -> Vec<BrowserEffect> {
        let raw = !self.state.reader_mode_enabled;
        self.state.can_go_back = raw && nav.can_go_back;
        self.state.can_go_forward = raw && nav.can_go_forward;
        Vec::new()
    }

    fn on_toggle(&mut self) -> Vec<BrowserEffect> {
        self.user_toggled = true;
        let enabled = !self.state.reader_mode_enabled;
        self.set_reader_mode(enabled);
        vec![self.render()]
    }
}

impl BrowserViewTrait for BrowserView {
    fn begin_fetch(&mut self) -> Option<PageRequest> {
        if self.fetch_started || !self.mounted {
            return None;
        }
        self.fetch_started = true;
        Some(self.request.clone())
    }

    fn handle(&mut self, event: BrowserEvent) -> Vec<BrowserEffect> {
        if !self.mounted {
            return Vec::new();
        }
        match event {
            BrowserEvent::PreferenceLoaded { enabled } => self.on_preference_loaded(enabled),
            BrowserEvent::ContentLoaded { clean_html } => self.on_content_loaded(clean_html),
            BrowserEvent::NavigationStateChanged { state } => self.on_navigation_state(state),
            BrowserEvent::ToggleReaderMode => self.on_toggle(),
            BrowserEvent::GoBack if self.state.can_go_back => vec![BrowserEffect::SurfaceGoBack],
            BrowserEvent::GoForward if self.state.can_go_forward => {
                vec![BrowserEffect::SurfaceGoForward]
            }
            BrowserEvent::GoBack | BrowserEvent::GoForward => Vec::new(),
            BrowserEvent::Share => vec![BrowserEffect::Share {
                request: self.share_request(),
            }],
        }
    }

    fn state(&self) -> &ViewState {
        &self.state
    }

    fn request(&self) -> &PageRequest {
        &self.request
    }

    fn render_source(&self) -> RenderSource {
        if !self.state.reader_mode_enabled {
            return RenderSource::Uri {
                uri: self.request.url.clone(),
            };
        }
        match &self.state.clean_html {
            CleanHtml::Ready(html) => RenderSource::Html {
                html: html.clone(),
                base_url: self.request.url.clone(),
            },
            CleanHtml::Pending | CleanHtml::Unavailable => RenderSource::Blank,
        }
    }

    fn toolbar(&self) -> ToolbarState {
        ToolbarState {
            back_enabled: self.state.can_go_back,
            forward_enabled: self.state.can_go_forward,
            reader_mode_active: self.state.reader_mode_enabled,
            reader_mode_available: !self.state.clean_html.is_unavailable(),
        }
    }

    fn share_request(&self) -> ShareRequest {
        ShareRequest {
            url: self.request.url.clone(),
            title: self.request.title.clone(),
        }
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
