//! Input arbitration: raw keyboard, wheel and touch input to navigation intents.
//!
//! The arbiter is a pure classifier. It knows nothing about the transition
//! lock; dropping intents while a transition runs is the controller's job.

use crate::completion::ScrollMetrics;

/// A normalized navigation request produced from one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    Advance,
    Retreat,
    None,
}

impl InputIntent {
    pub fn is_none(&self) -> bool {
        matches!(self, InputIntent::None)
    }
}

/// Keys the arbiter understands. Anything else is [`NavKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl From<egui::Key> for NavKey {
    fn from(key: egui::Key) -> Self {
        match key {
            egui::Key::ArrowUp => NavKey::ArrowUp,
            egui::Key::ArrowDown => NavKey::ArrowDown,
            egui::Key::ArrowLeft => NavKey::ArrowLeft,
            egui::Key::ArrowRight => NavKey::ArrowRight,
            _ => NavKey::Other,
        }
    }
}

/// Raw input, already reduced to what classification needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(NavKey),
    /// Vertical wheel movement. Positive `delta_y` scrolls content down
    /// (towards the end of the section). `region` is the geometry of the
    /// scrollable content under the pointer, if there is any.
    Wheel {
        delta_y: f32,
        region: Option<ScrollMetrics>,
    },
    TouchStart { y: f32 },
    TouchMove { y: f32 },
    TouchEnd,
    TouchCancel,
}

/// Tracks a single vertical swipe from start to end.
///
/// State never carries over between gestures: every end or cancel resets it.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    start_y: Option<f32>,
    last_y: Option<f32>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, y: f32) {
        self.start_y = Some(y);
        self.last_y = Some(y);
    }

    pub fn moved(&mut self, y: f32) {
        if self.start_y.is_some() {
            self.last_y = Some(y);
        }
    }

    /// Finishes the gesture and returns the upward distance travelled
    /// (`start - end`), or `None` if no gesture was in progress.
    pub fn finish(&mut self) -> Option<f32> {
        let delta = match (self.start_y, self.last_y) {
            (Some(start), Some(end)) => Some(start - end),
            _ => None,
        };
        self.cancel();
        delta
    }

    pub fn cancel(&mut self) {
        self.start_y = None;
        self.last_y = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_y.is_some()
    }
}

/// Classifies input events into [`InputIntent`]s.
#[derive(Debug, Clone)]
pub struct InputArbiter {
    touch: TouchTracker,
    touch_threshold_px: f32,
    wheel_threshold_px: f32,
    boundary_tolerance_px: f32,
}

impl InputArbiter {
    pub fn new(touch_threshold_px: f32, wheel_threshold_px: f32, boundary_tolerance_px: f32) -> Self {
        Self {
            touch: TouchTracker::new(),
            touch_threshold_px,
            wheel_threshold_px,
            boundary_tolerance_px,
        }
    }

    pub fn classify(&mut self, event: &InputEvent) -> InputIntent {
        match *event {
            InputEvent::Key(key) => classify_key(key),
            InputEvent::Wheel { delta_y, region } => self.classify_wheel(delta_y, region),
            InputEvent::TouchStart { y } => {
                self.touch.start(y);
                InputIntent::None
            }
            InputEvent::TouchMove { y } => {
                self.touch.moved(y);
                InputIntent::None
            }
            InputEvent::TouchEnd => match self.touch.finish() {
                Some(delta) => classify_swipe(delta, self.touch_threshold_px),
                None => InputIntent::None,
            },
            InputEvent::TouchCancel => {
                self.touch.cancel();
                InputIntent::None
            }
        }
    }

    /// Wheel input scrolls the section first; it only navigates once the
    /// content already sits at the boundary in the direction of travel.
    fn classify_wheel(&self, delta_y: f32, region: Option<ScrollMetrics>) -> InputIntent {
        if delta_y == 0.0 || delta_y.abs() <= self.wheel_threshold_px {
            return InputIntent::None;
        }

        let tolerance = self.boundary_tolerance_px;
        let (at_top, at_bottom) = match region {
            Some(metrics) => (metrics.is_at_top(tolerance), metrics.is_at_bottom(tolerance)),
            None => (true, true),
        };

        if delta_y > 0.0 && at_bottom {
            InputIntent::Advance
        } else if delta_y < 0.0 && at_top {
            InputIntent::Retreat
        } else {
            InputIntent::None
        }
    }

    pub fn is_touch_tracking(&self) -> bool {
        self.touch.is_tracking()
    }
}

pub fn classify_key(key: NavKey) -> InputIntent {
    match key {
        NavKey::ArrowDown | NavKey::ArrowRight => InputIntent::Advance,
        NavKey::ArrowUp | NavKey::ArrowLeft => InputIntent::Retreat,
        NavKey::Other => InputIntent::None,
    }
}

/// `delta` is upward travel: positive means the finger moved up.
pub fn classify_swipe(delta: f32, threshold_px: f32) -> InputIntent {
    if delta.abs() <= threshold_px {
        InputIntent::None
    } else if delta > 0.0 {
        InputIntent::Advance
    } else {
        InputIntent::Retreat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> InputArbiter {
        InputArbiter::new(70.0, 0.0, 5.0)
    }

    #[test]
    fn test_arrow_keys() {
        let mut arbiter = arbiter();
        assert_eq!(arbiter.classify(&InputEvent::Key(NavKey::ArrowDown)), InputIntent::Advance);
        assert_eq!(arbiter.classify(&InputEvent::Key(NavKey::ArrowRight)), InputIntent::Advance);
        assert_eq!(arbiter.classify(&InputEvent::Key(NavKey::ArrowUp)), InputIntent::Retreat);
        assert_eq!(arbiter.classify(&InputEvent::Key(NavKey::ArrowLeft)), InputIntent::Retreat);
        assert_eq!(arbiter.classify(&InputEvent::Key(NavKey::Other)), InputIntent::None);
        assert_eq!(NavKey::from(egui::Key::Enter), NavKey::Other);
        assert_eq!(NavKey::from(egui::Key::ArrowDown), NavKey::ArrowDown);
    }

    #[test]
    fn test_wheel_scrolls_content_before_navigating() {
        let mut arbiter = arbiter();
        let middle = Some(ScrollMetrics::new(200.0, 1000.0, 500.0));
        let event = InputEvent::Wheel { delta_y: 40.0, region: middle };
        assert_eq!(arbiter.classify(&event), InputIntent::None);

        let event = InputEvent::Wheel { delta_y: -40.0, region: middle };
        assert_eq!(arbiter.classify(&event), InputIntent::None);
    }

    #[test]
    fn test_wheel_at_boundaries() {
        let mut arbiter = arbiter();
        let bottom = Some(ScrollMetrics::new(500.0, 1000.0, 500.0));
        let top = Some(ScrollMetrics::new(0.0, 1000.0, 500.0));

        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: 30.0, region: bottom }),
            InputIntent::Advance
        );
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: -30.0, region: top }),
            InputIntent::Retreat
        );
        // Scrolling up at the bottom is ordinary scrolling
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: -30.0, region: bottom }),
            InputIntent::None
        );
    }

    #[test]
    fn test_wheel_without_scroll_region_navigates_both_ways() {
        let mut arbiter = arbiter();
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: 10.0, region: None }),
            InputIntent::Advance
        );
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: -10.0, region: None }),
            InputIntent::Retreat
        );
    }

    #[test]
    fn test_wheel_threshold_filters_small_deltas() {
        let mut arbiter = InputArbiter::new(70.0, 50.0, 5.0);
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: 40.0, region: None }),
            InputIntent::None
        );
        assert_eq!(
            arbiter.classify(&InputEvent::Wheel { delta_y: 60.0, region: None }),
            InputIntent::Advance
        );
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        let mut arbiter = arbiter();
        arbiter.classify(&InputEvent::TouchStart { y: 400.0 });
        arbiter.classify(&InputEvent::TouchMove { y: 360.0 });
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::None);
        assert!(!arbiter.is_touch_tracking());
    }

    #[test]
    fn test_swipe_directions() {
        let mut arbiter = arbiter();
        arbiter.classify(&InputEvent::TouchStart { y: 600.0 });
        arbiter.classify(&InputEvent::TouchMove { y: 450.0 });
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::Advance);

        arbiter.classify(&InputEvent::TouchStart { y: 200.0 });
        arbiter.classify(&InputEvent::TouchMove { y: 300.0 });
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::Retreat);
    }

    #[test]
    fn test_touch_state_resets_between_gestures() {
        let mut arbiter = arbiter();
        arbiter.classify(&InputEvent::TouchStart { y: 600.0 });
        arbiter.classify(&InputEvent::TouchMove { y: 400.0 });
        arbiter.classify(&InputEvent::TouchCancel);

        // An end without a start must not reuse the cancelled gesture
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::None);

        // A tap right after a long swipe produces nothing
        arbiter.classify(&InputEvent::TouchStart { y: 600.0 });
        arbiter.classify(&InputEvent::TouchMove { y: 400.0 });
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::Advance);
        arbiter.classify(&InputEvent::TouchStart { y: 100.0 });
        assert_eq!(arbiter.classify(&InputEvent::TouchEnd), InputIntent::None);
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut tracker = TouchTracker::new();
        tracker.moved(10.0);
        assert_eq!(tracker.finish(), None);
    }
}
