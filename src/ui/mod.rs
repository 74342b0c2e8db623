//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the portfolio presenter:
//! - Header panel (previous/next, chat toggle, preferences)
//! - Indicator panel (section dots, progress strip)
//! - Sections (home, education, skills, projects, contact)
//! - Chat window
//! - Project detail window
//! - Overlays (scroll hint, notices)
//! - Status bar (navigation and request status)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (keyboard, wheel, touch)

pub mod header;
pub mod indicator_panel;
pub mod sections;
pub mod chat_panel;
pub mod project_window;
pub mod overlay;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
