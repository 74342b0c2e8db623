//! State management modules for the portfolio presenter.
//!
//! This module contains state-only logic (no UI concerns):
//! - Theme state (theme manager, current theme)
//! - Chat state (session, draft, window visibility)
//! - Contact state (form fields, submission flag)
//! - Layout state (section geometry, floating windows, persisted preferences)
//! - Touch state (which finger owns the current swipe)
//! - Showcase state (project filters and selections, skill tabs)
//!
//! Navigation state lives in the library's `NavigationController`.

mod theme_state;
mod chat_state;
mod contact_state;
mod layout_state;
mod touch_state;
mod showcase_state;

pub use theme_state::ThemeState;
pub use chat_state::ChatState;
pub use contact_state::ContactState;
pub use layout_state::{LayoutState, Preferences};
pub use touch_state::TouchState;
pub use showcase_state::ShowcaseState;
