//! Centralized application state for the portfolio presenter.
//!
//! Composes focused state components, each managing one aspect of the
//! application, so that panels can borrow them independently.

use std::time::Instant;

use folio::{
    default_registry, InputArbiter, NavigationController, NoticeBoard, Portfolio, RegistryError,
    ScrollRecorder, SectionKind, SiteConfig,
};

use crate::state::{ChatState, ContactState, LayoutState, Preferences, ShowcaseState, ThemeState, TouchState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Navigation Core =====
    /// Active section, transition lock, and completion gate
    pub navigation: NavigationController<SectionKind>,

    /// Latest scroll geometry of each drawn section
    pub scroll: ScrollRecorder,

    /// Raw input to intent classification (keeps swipe state between frames)
    pub arbiter: InputArbiter,

    /// Finger currently driving a swipe
    pub touch: TouchState,

    // ===== Boundary Components =====
    pub chat: ChatState,

    pub contact: ContactState,

    pub notices: NoticeBoard,

    /// Project filters and selections, active skill tab
    pub showcase: ShowcaseState,

    // ===== Presentation =====
    pub theme: ThemeState,

    pub layout: LayoutState,

    pub preferences: Preferences,

    // ===== Top-Level State =====
    pub portfolio: Portfolio,

    pub config: SiteConfig,
}

impl AppState {
    /// Builds the state for the default five-section portfolio.
    ///
    /// A persisted reduced-motion preference overrides the config file.
    pub fn new(
        mut config: SiteConfig,
        portfolio: Portfolio,
        theme_name: String,
        preferences: Preferences,
    ) -> Result<Self, RegistryError> {
        config.navigation.reduced_motion |= preferences.reduced_motion;

        let nav = &config.navigation;
        let navigation = NavigationController::new(nav, default_registry()?);
        let arbiter = InputArbiter::new(nav.touch_threshold_px, nav.wheel_threshold_px, nav.completion_tolerance_px);
        let chat = ChatState::new(&config.chat, portfolio.chat_context());

        Ok(Self {
            navigation,
            scroll: ScrollRecorder::new(),
            arbiter,
            touch: TouchState::new(),
            chat,
            contact: ContactState::new(),
            notices: NoticeBoard::default(),
            showcase: ShowcaseState::new(),
            theme: ThemeState::with_theme(theme_name),
            layout: LayoutState::new(),
            preferences,
            portfolio,
            config,
        })
    }

    // ===== High-Level Coordination Methods =====

    /// Whether anything on screen is waiting on a timer.
    ///
    /// The frame loop uses this to decide whether to schedule a repaint
    /// while the user is idle.
    pub fn has_pending_timers(&self, now: Instant) -> bool {
        self.navigation.state().is_transitioning()
            || self.navigation.hint_visible(now)
            || self.chat.session().is_typing()
            || self
                .chat
                .session()
                .messages()
                .iter()
                .any(|m| !m.read)
            || !self.notices.is_empty()
    }

    /// Applies the reduced-motion preference to the navigation timing.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.preferences.reduced_motion = enabled;
        self.config.navigation.reduced_motion = enabled;
        self.navigation.reconfigure(&self.config.navigation);
    }
}
