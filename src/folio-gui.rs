//! Folio portfolio presenter
//!
//! A fullscreen, section-by-section portfolio built with egui. The presenter
//! features:
//! - One section on screen at a time, moved between with arrow keys, wheel,
//!   swipe, header buttons, or the indicator dots
//! - A forward gate that asks the visitor to read a section to its end first
//! - A chat window answered by a text-generation backend with key rotation
//! - A contact form relayed through EmailJS
//! - Multiple themes with persistent preferences

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `state/` - Focused state components (theme, chat, contact, layout)
//! - `ui/` - Panel rendering, sections, and input translation
//! - `io/` - Background dispatch of chat and mail requests
//! - `presentation/` - Colour lookups separated from state logic

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use eframe::egui;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use folio::{EmailJsRelay, GeminiBackend, GenerativeBackend, MailRelay, Portfolio, SiteConfig};

mod app;
mod io;
mod presentation;
mod state;
mod ui;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use io::RequestDispatcher;
use ui::input::section_input_handler::{self, SectionCommand};
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Repaint cadence while only timers (hint, typing, receipts) are pending.
const TIMER_REPAINT: Duration = Duration::from_millis(100);

/// Main application entry point: loads config and content, then launches the GUI.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    // Optional config path as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = SiteConfig::discover(config_path.as_deref()).context("failed to load site config")?;
    let portfolio = Portfolio::load_or_bundled(config.content_path.as_deref())
        .context("failed to load portfolio content")?;
    info!(name = %portfolio.profile.name, "starting portfolio presenter");

    let dispatcher = build_dispatcher(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(format!("{} - Portfolio", portfolio.profile.name)),
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        options,
        Box::new(move |cc| {
            let app = FolioApp::new(cc, config, portfolio, dispatcher)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {}", e))
}

/// Creates the chat backend and mail relay. Either may be missing; the
/// matching widget then reports itself as unavailable when used.
fn build_dispatcher(config: &SiteConfig) -> RequestDispatcher {
    let backend: Option<Arc<dyn GenerativeBackend>> = match GeminiBackend::new(&config.chat) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            warn!("chat backend unavailable: {}", e);
            None
        }
    };

    let relay: Option<Arc<dyn MailRelay>> = match EmailJsRelay::new(&config.contact) {
        Ok(relay) => Some(Arc::new(relay)),
        Err(e) => {
            info!("contact relay disabled: {}", e);
            None
        }
    };

    RequestDispatcher::new(backend, relay)
}

/// The portfolio presenter application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles navigation, chat, and contact workflows
/// - `ThemeCoordinator` and `SettingsCoordinator` handle persistence
/// - `PanelManager` handles panel layout and rendering
struct FolioApp {
    /// Centralized application state
    state: AppState,
    /// Background chat and mail requests
    dispatcher: RequestDispatcher,
}

impl FolioApp {
    /// Creates the presenter with theme and preferences loaded from persistent storage.
    fn new(
        cc: &eframe::CreationContext,
        config: SiteConfig,
        portfolio: Portfolio,
        dispatcher: RequestDispatcher,
    ) -> Result<Self, folio::RegistryError> {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let preferences = SettingsCoordinator::load_preferences(cc.storage);

        Ok(Self {
            state: AppState::new(config, portfolio, theme_name, preferences)?,
            dispatcher,
        })
    }

    fn handle_section_command(&mut self, command: SectionCommand, now: Instant) {
        match command {
            SectionCommand::Intent(intent) => ApplicationCoordinator::handle_intent(&mut self.state, intent, now),
            SectionCommand::First => ApplicationCoordinator::go_to_first(&mut self.state, now),
            SectionCommand::Furthest => ApplicationCoordinator::go_to_furthest(&mut self.state, now),
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context, now: Instant) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::PreviousRequested => {
                ApplicationCoordinator::handle_intent(state, folio::InputIntent::Retreat, now);
            }
            PanelInteraction::NextRequested => {
                ApplicationCoordinator::handle_intent(state, folio::InputIntent::Advance, now);
            }
            PanelInteraction::SectionRequested(index) => {
                ApplicationCoordinator::handle_indicator_click(state, index, now);
            }
            PanelInteraction::ChatToggled => state.chat.toggle_open(),
            PanelInteraction::ChatClosed => state.chat.set_open(false),
            PanelInteraction::ChatSendRequested => {
                ApplicationCoordinator::send_chat(state, &mut self.dispatcher, ctx, now);
            }
            PanelInteraction::ChatRetryRequested => {
                ApplicationCoordinator::retry_chat(state, &mut self.dispatcher, ctx, now);
            }
            PanelInteraction::ContactSubmitRequested => {
                ApplicationCoordinator::submit_contact(state, &mut self.dispatcher, ctx, now);
            }
            PanelInteraction::ReducedMotionChanged(enabled) => state.set_reduced_motion(enabled),
            PanelInteraction::HintDismissed => state.navigation.dismiss_hint(),
            PanelInteraction::NoticeDismissed(index) => state.notices.dismiss(index),
        }
    }
}

impl eframe::App for FolioApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_preferences(storage, &self.state.preferences);
    }

    /// Main update loop:
    /// 1. Apply finished background requests and advance timers
    /// 2. Apply theme
    /// 3. Turn raw input into navigation
    /// 4. Render all panels via PanelManager and handle their interaction
    /// 5. Refresh the completion gate from what was just drawn
    /// 6. Schedule the next repaint
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        ApplicationCoordinator::check_request_completion(&mut self.state, &mut self.dispatcher, now);
        ApplicationCoordinator::tick(&mut self.state, now);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        for command in section_input_handler::collect_commands(ctx, &mut self.state) {
            self.handle_section_command(command, now);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.dispatcher, now) {
            self.handle_panel_interaction(interaction, ctx, now);
        }

        ApplicationCoordinator::refresh_completion(&mut self.state);

        if self.state.navigation.state().is_transitioning() {
            ctx.request_repaint();
        } else if self.state.has_pending_timers(now) {
            ctx.request_repaint_after(TIMER_REPAINT);
        }
    }
}
