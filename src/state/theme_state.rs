//! Theme and styling state management.
//!
//! This module encapsulates all state related to visual theming,
//! including the theme manager and currently selected theme.

use folio::theme::DEFAULT_THEME;
use folio::{Theme, ThemeColors, ThemeManager};

/// State related to visual theme and styling.
///
/// Responsibilities:
/// - Owning the built-in palettes
/// - Tracking current theme selection
/// - Resolving stale names to the default palette
pub struct ThemeState {
    theme_manager: ThemeManager,
    current_theme_name: String,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeState {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME.to_string())
    }

    /// Unknown names (an old preference, a typo in storage) fall back to
    /// the default theme.
    pub fn with_theme(theme_name: String) -> Self {
        let theme_manager = ThemeManager::new();
        let current_theme_name = if theme_manager.get_theme(&theme_name).is_some() {
            theme_name
        } else {
            DEFAULT_THEME.to_string()
        };
        Self {
            theme_manager,
            current_theme_name,
        }
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    pub fn current_theme(&self) -> &Theme {
        self.theme_manager.theme_or_default(&self.current_theme_name)
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.current_theme().colors
    }

    // ===== Theme Mutations =====

    /// Switches theme. Returns false and keeps the current one if the name
    /// is unknown.
    pub fn set_theme(&mut self, theme_name: String) -> bool {
        if self.theme_manager.get_theme(&theme_name).is_none() {
            return false;
        }
        self.current_theme_name = theme_name;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_theme_name_falls_back() {
        let state = ThemeState::with_theme("Solarized".to_string());
        assert_eq!(state.current_theme_name(), DEFAULT_THEME);
    }

    #[test]
    fn test_set_theme_rejects_unknown() {
        let mut state = ThemeState::new();
        assert!(state.set_theme("Light".to_string()));
        assert!(!state.set_theme("Nope".to_string()));
        assert_eq!(state.current_theme_name(), "Light");
        assert!(!state.current_theme().dark);
    }
}
