//! Colour lookups for indicator dots, notices, project cards, and skill bars.
//!
//! Keeps palette decisions out of the panels so each panel only asks for a
//! colour by meaning.

use egui::Color32;
use folio::ProjectKind;
use folio::{lerp_color, with_alpha, IndicatorEntry, NoticeKind, ThemeColors};

/// Fill colour of one indicator dot.
pub fn indicator_color(entry: &IndicatorEntry, colors: &ThemeColors) -> Color32 {
    if entry.is_active {
        colors.accent
    } else if entry.is_reachable {
        colors.indicator_idle
    } else {
        colors.indicator_locked
    }
}

pub fn notice_color(kind: NoticeKind, colors: &ThemeColors) -> Color32 {
    match kind {
        NoticeKind::Info => colors.accent,
        NoticeKind::Success => colors.success,
        NoticeKind::Error => colors.error,
    }
}

/// Badge colour for a project category.
pub fn project_kind_color(kind: ProjectKind, colors: &ThemeColors) -> Color32 {
    match kind {
        ProjectKind::Web => colors.accent,
        ProjectKind::Mobile => colors.accent_secondary,
        ProjectKind::Desktop => colors.success,
        ProjectKind::Systems => colors.warning,
    }
}

/// Skill bars shade from the secondary accent (low) to the accent (high).
pub fn skill_level_color(level: u8, colors: &ThemeColors) -> Color32 {
    lerp_color(colors.accent_secondary, colors.accent, f32::from(level.min(100)) / 100.0)
}

/// Gradient stop for the progress strip at fraction `t` of its width.
pub fn progress_gradient(t: f32, colors: &ThemeColors) -> Color32 {
    lerp_color(colors.accent, colors.accent_secondary, t)
}

/// Translucent backdrop for toasts so the section stays visible beneath.
pub fn toast_background(colors: &ThemeColors) -> Color32 {
    with_alpha(colors.card_background, 235)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::ThemeManager;

    fn colors() -> ThemeColors {
        ThemeManager::new().theme_or_default("Dark").colors.clone()
    }

    #[test]
    fn test_indicator_states() {
        let colors = colors();
        let mut entry = IndicatorEntry {
            index: 2,
            title: "Skills".to_string(),
            is_active: false,
            is_reachable: false,
        };
        assert_eq!(indicator_color(&entry, &colors), colors.indicator_locked);
        entry.is_reachable = true;
        assert_eq!(indicator_color(&entry, &colors), colors.indicator_idle);
        entry.is_active = true;
        assert_eq!(indicator_color(&entry, &colors), colors.accent);
    }

    #[test]
    fn test_skill_level_endpoints() {
        let colors = colors();
        assert_eq!(skill_level_color(0, &colors), colors.accent_secondary);
        assert_eq!(skill_level_color(100, &colors), colors.accent);
        assert_eq!(skill_level_color(250, &colors), colors.accent);
    }
}
