//! Colour themes for the portfolio presenter.
//!
//! Three built-in palettes (Light, Dark, Midnight) share one shape so section
//! panels can ask for an accent or muted colour without caring which is active.
//!
//! # Examples
//!
//! ```
//! use folio::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let dark = manager.get_theme("Dark").unwrap();
//! println!("Dark accent: {:?}", dark.colors.accent);
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Name of the theme used when nothing else is selected.
pub const DEFAULT_THEME: &str = "Dark";

/// Palette covering every colour the presenter draws with
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Surfaces
    pub background: Color32,
    pub panel_background: Color32,
    pub card_background: Color32,

    // Text
    pub text: Color32,
    pub text_muted: Color32,
    pub text_strong: Color32,

    // Accents (gradient pair used by the hint and active indicator)
    pub accent: Color32,
    pub accent_secondary: Color32,
    pub border: Color32,

    // Status
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,

    // Indicator dots
    pub indicator_idle: Color32,
    pub indicator_locked: Color32,
}

/// A named palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub colors: ThemeColors,
}

/// Lookup for the built-in themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    fallback: Theme,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut themes = HashMap::new();

        for theme in [light_theme(), dark_theme(), midnight_theme()] {
            themes.insert(theme.name.clone(), theme);
        }

        Self {
            themes,
            fallback: dark_theme(),
        }
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Falls back to the default theme for unknown names (e.g. a stale
    /// persisted preference).
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    /// Sorted theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Writes a theme's palette into egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.card_background;
        visuals.extreme_bg_color = colors.background;
        visuals.faint_bg_color = colors.card_background;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = with_alpha(colors.accent, 120);
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.card_background;
        visuals.widgets.hovered.bg_fill = adjust_brightness(colors.card_background, 1.2);
        visuals.widgets.active.bg_fill = colors.accent;

        visuals.hyperlink_color = colors.accent_secondary;
        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        dark: false,
        colors: ThemeColors {
            background: hex_to_color32("#fafafa"),
            panel_background: hex_to_color32("#ffffff"),
            card_background: hex_to_color32("#f1f1f4"),

            text: hex_to_color32("#18181b"),
            text_muted: hex_to_color32("#71717a"),
            text_strong: hex_to_color32("#09090b"),

            accent: hex_to_color32("#7c3aed"),
            accent_secondary: hex_to_color32("#db2777"),
            border: hex_to_color32("#e4e4e7"),

            success: hex_to_color32("#16a34a"),
            error: hex_to_color32("#dc2626"),
            warning: hex_to_color32("#d97706"),

            indicator_idle: hex_to_color32("#a1a1aa"),
            indicator_locked: hex_to_color32("#e4e4e7"),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        dark: true,
        colors: ThemeColors {
            background: hex_to_color32("#09090b"),
            panel_background: hex_to_color32("#111113"),
            card_background: hex_to_color32("#1c1c21"),

            text: hex_to_color32("#f4f4f5"),
            text_muted: hex_to_color32("#a1a1aa"),
            text_strong: hex_to_color32("#ffffff"),

            accent: hex_to_color32("#a78bfa"),
            accent_secondary: hex_to_color32("#f472b6"),
            border: hex_to_color32("#27272a"),

            success: hex_to_color32("#4ade80"),
            error: hex_to_color32("#f87171"),
            warning: hex_to_color32("#fbbf24"),

            indicator_idle: hex_to_color32("#52525b"),
            indicator_locked: hex_to_color32("#27272a"),
        },
    }
}

fn midnight_theme() -> Theme {
    Theme {
        name: "Midnight".to_string(),
        dark: true,
        colors: ThemeColors {
            background: hex_to_color32("#0b1020"),
            panel_background: hex_to_color32("#0f172a"),
            card_background: hex_to_color32("#1e293b"),

            text: hex_to_color32("#e2e8f0"),
            text_muted: hex_to_color32("#94a3b8"),
            text_strong: hex_to_color32("#f8fafc"),

            accent: hex_to_color32("#38bdf8"),
            accent_secondary: hex_to_color32("#818cf8"),
            border: hex_to_color32("#334155"),

            success: hex_to_color32("#34d399"),
            error: hex_to_color32("#fb7185"),
            warning: hex_to_color32("#facc15"),

            indicator_idle: hex_to_color32("#475569"),
            indicator_locked: hex_to_color32("#1e293b"),
        },
    }
}

/// Converts `#rrggbb` to a colour; anything else is black
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}

/// Scales RGB by `factor` (1.0 = unchanged)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Linear blend from `a` (t = 0) to `b` (t = 1), used for gradient strips
pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let manager = ThemeManager::new();
        assert_eq!(manager.list_themes(), vec!["Dark", "Light", "Midnight"]);
        assert!(!manager.get_theme("Light").unwrap().dark);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let manager = ThemeManager::new();
        assert_eq!(manager.theme_or_default("Dracula").name, DEFAULT_THEME);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_color32("#ff8000"), Color32::from_rgb(255, 128, 0));
        assert_eq!(hex_to_color32("nope"), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }
}
