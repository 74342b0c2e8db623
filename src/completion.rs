//! Viewport completion tracking.
//!
//! Answers one question for the active section: has its scrollable region been
//! read to the bottom? The measurement itself is injected through
//! [`ScrollProbe`] so the rule can be exercised without a display tree.

use std::collections::HashMap;

/// Scroll geometry of a section's scrollable region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub scroll_top: f32,
    /// Full height of the scrollable content
    pub scroll_height: f32,
    /// Visible height of the region
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// `scroll_top + client_height >= scroll_height - tolerance`
    pub fn is_at_bottom(&self, tolerance: f32) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - tolerance
    }

    pub fn is_at_top(&self, tolerance: f32) -> bool {
        self.scroll_top <= tolerance
    }

    /// Whether the content is taller than the region showing it.
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }
}

/// What a probe found when asked about a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRegion {
    /// The section has no scrollable region
    Absent,
    /// The region exists but has not been measured, or was replaced since
    Unmeasured,
    /// Current geometry of the region
    Measured(ScrollMetrics),
}

/// Capability to measure the scrollable region of a rendered section.
pub trait ScrollProbe {
    fn measure_scroll(&self, section: usize) -> ScrollRegion;
}

impl<F> ScrollProbe for F
where
    F: Fn(usize) -> ScrollRegion,
{
    fn measure_scroll(&self, section: usize) -> ScrollRegion {
        self(section)
    }
}

/// Stateless completion query with a fixed pixel tolerance.
#[derive(Debug, Clone, Copy)]
pub struct CompletionTracker {
    tolerance_px: f32,
}

impl CompletionTracker {
    pub fn new(tolerance_px: f32) -> Self {
        Self { tolerance_px }
    }

    pub fn tolerance_px(&self) -> f32 {
        self.tolerance_px
    }

    /// Returns true when the section has been read to its end.
    ///
    /// Sections without a scrollable region are always complete, and a region
    /// that cannot be measured right now fails open so the user is never trapped.
    pub fn is_complete(&self, probe: &dyn ScrollProbe, section: usize) -> bool {
        match probe.measure_scroll(section) {
            ScrollRegion::Absent | ScrollRegion::Unmeasured => true,
            ScrollRegion::Measured(metrics) => metrics.is_at_bottom(self.tolerance_px),
        }
    }
}

/// Probe backed by the most recent measurements a renderer reported.
///
/// The GUI records each section's scroll area after drawing it; sections it
/// has never heard of read as [`ScrollRegion::Unmeasured`].
#[derive(Debug, Default, Clone)]
pub struct ScrollRecorder {
    regions: HashMap<usize, ScrollRegion>,
}

impl ScrollRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, section: usize, metrics: ScrollMetrics) {
        self.regions.insert(section, ScrollRegion::Measured(metrics));
    }

    /// Marks a section as having no scrollable region at all.
    pub fn record_static(&mut self, section: usize) {
        self.regions.insert(section, ScrollRegion::Absent);
    }

    /// Forgets the section's measurement, e.g. after it was rebuilt.
    pub fn invalidate(&mut self, section: usize) {
        self.regions.remove(&section);
    }

    pub fn get(&self, section: usize) -> Option<ScrollMetrics> {
        match self.regions.get(&section) {
            Some(ScrollRegion::Measured(metrics)) => Some(*metrics),
            _ => None,
        }
    }
}

impl ScrollProbe for ScrollRecorder {
    fn measure_scroll(&self, section: usize) -> ScrollRegion {
        self.regions
            .get(&section)
            .copied()
            .unwrap_or(ScrollRegion::Unmeasured)
    }
}
