//! UI layout state and user preferences.
//!
//! `Preferences` survive restarts through eframe storage; the rest is
//! recomputed every frame.

use serde::{Deserialize, Serialize};

/// Persisted UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Shorten section transitions to a near-instant cut
    pub reduced_motion: bool,
    pub show_status_bar: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_status_bar: true,
        }
    }
}

/// State related to panel geometry.
///
/// Responsibilities:
/// - Remembering where the active section was drawn, so wheel input over
///   other windows is not mistaken for section navigation
/// - Remembering where floating windows and overlays were drawn, since they
///   sit on top of the section
/// - Holding indicator sizing
#[derive(Debug, Clone)]
pub struct LayoutState {
    section_rect: Option<egui::Rect>,
    floating: Vec<egui::Rect>,
    indicator_width: f32,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            section_rect: None,
            floating: Vec::new(),
            indicator_width: 56.0,
        }
    }

    pub fn section_rect(&self) -> Option<egui::Rect> {
        self.section_rect
    }

    pub fn set_section_rect(&mut self, rect: egui::Rect) {
        self.section_rect = Some(rect);
    }

    /// Forgets last frame's floating rects. Called before panels are drawn.
    pub fn clear_floating(&mut self) {
        self.floating.clear();
    }

    pub fn add_floating(&mut self, rect: egui::Rect) {
        self.floating.push(rect);
    }

    pub fn floating_rects(&self) -> &[egui::Rect] {
        &self.floating
    }

    /// Whether `pos` lies over the last drawn section and not over a window
    /// floating above it.
    pub fn is_over_section(&self, pos: Option<egui::Pos2>) -> bool {
        match (self.section_rect, pos) {
            (Some(rect), Some(pos)) => rect.contains(pos) && !self.floating.iter().any(|f| f.contains(pos)),
            _ => false,
        }
    }

    pub fn indicator_width(&self) -> f32 {
        self.indicator_width
    }
}
