//! Section navigation controller.
//!
//! Owns the active section index and the transition lock, and decides whether
//! a requested move is allowed. All input channels funnel into [`NavigationController::go_to`];
//! nothing else mutates [`NavigationState`].
//!
//! Time is passed in explicitly as `Instant`s. The transition lock is a
//! deadline rather than a callback, and every entry point polls it first, so
//! an expired lock can never be observed as held.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::completion::{CompletionTracker, ScrollProbe};
use crate::config::NavConfig;
use crate::intent::InputIntent;
use crate::section::{Section, SectionRegistry};

/// Which way a transition moves through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Forward,
    Backward,
}

/// An in-flight section change. Acts as the controller's lock timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    from: usize,
    to: usize,
    started_at: Instant,
    duration: Duration,
}

impl Transition {
    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn direction(&self) -> TransitionDirection {
        if self.to > self.from {
            TransitionDirection::Forward
        } else {
            TransitionDirection::Backward
        }
    }

    pub fn deadline(&self) -> Instant {
        self.started_at + self.duration
    }

    pub fn is_elapsed(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Ease-out cubic of [`Transition::progress`], for slide animations.
    pub fn eased_progress(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        1.0 - (1.0 - t).powi(3)
    }
}

/// The controller's mutable state. Read-only outside this module.
#[derive(Debug, Clone)]
pub struct NavigationState {
    active_index: usize,
    section_count: usize,
    transition: Option<Transition>,
    section_complete: bool,
    visited: BTreeSet<usize>,
    completed: BTreeSet<usize>,
}

impl NavigationState {
    fn new(section_count: usize, initial_index: usize) -> Self {
        let active_index = initial_index.min(section_count.saturating_sub(1));
        Self {
            active_index,
            section_count,
            transition: None,
            // Unmeasured sections fail open until the first completion refresh
            section_complete: true,
            visited: BTreeSet::from([active_index]),
            completed: BTreeSet::new(),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_section_complete(&self) -> bool {
        self.section_complete
    }

    pub fn has_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    pub fn has_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }
}

/// Why a navigation request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Transitioning,
    OutOfRange,
    AlreadyActive,
}

/// Result of a navigation request.
///
/// Callers are free to ignore it; a rejection is surfaced to the user through
/// the scroll hint, not through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition began
    Started { from: usize, to: usize },
    /// Forward move blocked because the current section is not finished
    Rejected,
    /// Request was a no-op
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, NavOutcome::Started { .. })
    }
}

/// Emitted once when a transition's lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionFinished {
    pub index: usize,
}

/// Fullscreen navigation over a fixed [`SectionRegistry`].
pub struct NavigationController<K> {
    registry: SectionRegistry<K>,
    state: NavigationState,
    tracker: CompletionTracker,
    lock_duration: Duration,
    hint_duration: Duration,
    hint_raised_at: Option<Instant>,
}

impl<K> NavigationController<K> {
    pub fn new(config: &NavConfig, registry: SectionRegistry<K>) -> Self {
        Self::with_initial_index(config, registry, 0)
    }

    /// Starts on `initial_index`, clamped into range.
    pub fn with_initial_index(config: &NavConfig, registry: SectionRegistry<K>, initial_index: usize) -> Self {
        let state = NavigationState::new(registry.len(), initial_index);
        Self {
            registry,
            state,
            tracker: CompletionTracker::new(config.completion_tolerance_px),
            lock_duration: Duration::from_millis(config.lock_duration_ms()),
            hint_duration: Duration::from_millis(config.hint_duration_ms),
            hint_raised_at: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn registry(&self) -> &SectionRegistry<K> {
        &self.registry
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn active_section(&self) -> Option<&Section<K>> {
        self.registry.get(self.state.active_index)
    }

    pub fn lock_duration(&self) -> Duration {
        self.lock_duration
    }

    /// Picks up changed timing settings, e.g. reduced motion toggled at
    /// runtime. A transition already in flight keeps its original deadline.
    pub fn reconfigure(&mut self, config: &NavConfig) {
        self.tracker = CompletionTracker::new(config.completion_tolerance_px);
        self.lock_duration = Duration::from_millis(config.lock_duration_ms());
        self.hint_duration = Duration::from_millis(config.hint_duration_ms);
    }

    /// Releases the transition lock once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TransitionFinished> {
        let transition = self.state.transition?;
        if !transition.is_elapsed(now) {
            return None;
        }

        self.state.transition = None;
        debug!(index = transition.to, "transition finished");
        Some(TransitionFinished { index: transition.to })
    }

    /// Re-evaluates the completion gate against the active section.
    ///
    /// Call on every scroll of the active section and once right after a
    /// section becomes active.
    pub fn refresh_completion(&mut self, probe: &dyn ScrollProbe) -> bool {
        let index = self.state.active_index;
        let complete = self.tracker.is_complete(probe, index);
        self.state.section_complete = complete;
        if complete && self.state.completed.insert(index) {
            debug!(index, "section completed");
        }
        complete
    }

    /// Requests a move to `target`.
    pub fn go_to(&mut self, target: usize, now: Instant) -> NavOutcome {
        self.poll(now);

        if self.state.is_transitioning() {
            return NavOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if target >= self.state.section_count {
            return NavOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        let from = self.state.active_index;
        if target == from {
            return NavOutcome::Ignored(IgnoreReason::AlreadyActive);
        }

        if target > from && !self.forward_gate_open(target) {
            info!(from, target, "forward move blocked until section is read");
            self.hint_raised_at = Some(now);
            return NavOutcome::Rejected;
        }

        self.state.transition = Some(Transition {
            from,
            to: target,
            started_at: now,
            duration: self.lock_duration,
        });
        self.state.active_index = target;
        self.state.visited.insert(target);
        // New section is unmeasured until the host refreshes completion
        self.state.section_complete = true;
        self.hint_raised_at = None;

        debug!(from, to = target, "transition started");
        NavOutcome::Started { from, to: target }
    }

    pub fn on_advance(&mut self, now: Instant) -> NavOutcome {
        let target = self.state.active_index + 1;
        self.go_to(target, now)
    }

    pub fn on_retreat(&mut self, now: Instant) -> NavOutcome {
        match self.state.active_index.checked_sub(1) {
            Some(target) => self.go_to(target, now),
            None => NavOutcome::Ignored(IgnoreReason::OutOfRange),
        }
    }

    /// Dispatches a classified intent.
    pub fn apply_intent(&mut self, intent: InputIntent, now: Instant) -> Option<NavOutcome> {
        match intent {
            InputIntent::Advance => Some(self.on_advance(now)),
            InputIntent::Retreat => Some(self.on_retreat(now)),
            InputIntent::None => None,
        }
    }

    /// Whether a previous section exists. Ignores the transition lock.
    pub fn can_retreat(&self) -> bool {
        self.state.active_index > 0
    }

    /// Whether a next section exists and the gate would let us through.
    /// Ignores the transition lock.
    pub fn can_advance(&self) -> bool {
        let next = self.state.active_index + 1;
        next < self.state.section_count && self.forward_gate_open(next)
    }

    /// Whether the "scroll to continue" hint should be shown.
    pub fn hint_visible(&self, now: Instant) -> bool {
        match self.hint_raised_at {
            Some(raised_at) => now.saturating_duration_since(raised_at) < self.hint_duration,
            None => false,
        }
    }

    pub fn dismiss_hint(&mut self) {
        self.hint_raised_at = None;
    }

    /// Tears down timers; used on unmount.
    pub fn cancel(&mut self) {
        if let Some(transition) = self.state.transition.take() {
            debug!(index = transition.to, "transition cancelled");
        }
        self.hint_raised_at = None;
    }

    /// Forward moves pass when the current section is complete, or when the
    /// target was already seen or finished in this session.
    fn forward_gate_open(&self, target: usize) -> bool {
        self.state.section_complete
            || self.state.visited.contains(&target)
            || self.state.completed.contains(&target)
    }
}

impl<K> Drop for NavigationController<K> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{ScrollMetrics, ScrollRegion};

    fn controller(count: usize) -> NavigationController<()> {
        let sections = (0..count)
            .map(|i| Section::new(format!("s{}", i), format!("Section {}", i), ()))
            .collect();
        let registry = SectionRegistry::new(sections).unwrap();
        NavigationController::new(&NavConfig::default(), registry)
    }

    fn unread(_: usize) -> ScrollRegion {
        ScrollRegion::Measured(ScrollMetrics::new(0.0, 1000.0, 500.0))
    }

    fn read(_: usize) -> ScrollRegion {
        ScrollRegion::Measured(ScrollMetrics::new(500.0, 1000.0, 500.0))
    }

    fn after_lock(nav: &NavigationController<()>, start: Instant) -> Instant {
        start + nav.lock_duration()
    }

    #[test]
    fn test_initial_state() {
        let nav = controller(4);
        assert_eq!(nav.active_index(), 0);
        assert!(!nav.state().is_transitioning());
        assert!(nav.state().has_visited(0));
        assert!(!nav.can_retreat());
    }

    #[test]
    fn test_reconfigure_keeps_running_transition() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        assert!(nav.go_to(1, t0).is_started());

        nav.reconfigure(&NavConfig {
            reduced_motion: true,
            ..NavConfig::default()
        });
        assert_eq!(nav.lock_duration(), Duration::from_millis(100));

        // Old deadline still applies
        assert_eq!(nav.go_to(2, t0 + Duration::from_millis(150)), NavOutcome::Ignored(IgnoreReason::Transitioning));
        assert!(nav.go_to(2, t0 + Duration::from_millis(1200)).is_started());
    }

    #[test]
    fn test_initial_index_is_clamped() {
        let registry = SectionRegistry::new(vec![Section::new("a", "A", ()), Section::new("b", "B", ())]).unwrap();
        let nav = NavigationController::with_initial_index(&NavConfig::default(), registry, 7);
        assert_eq!(nav.active_index(), 1);
    }

    #[test]
    fn test_lock_releases_after_duration() {
        let mut nav = controller(4);
        let t0 = Instant::now();
        assert!(nav.on_advance(t0).is_started());
        assert!(nav.state().is_transitioning());

        let almost = t0 + nav.lock_duration() - Duration::from_millis(1);
        assert_eq!(nav.poll(almost), None);
        assert!(nav.state().is_transitioning());

        let done = nav.poll(after_lock(&nav, t0));
        assert_eq!(done, Some(TransitionFinished { index: 1 }));
        assert!(!nav.state().is_transitioning());
        // Released only once
        assert_eq!(nav.poll(after_lock(&nav, t0)), None);
    }

    #[test]
    fn test_go_to_while_transitioning_is_dropped() {
        let mut nav = controller(4);
        let t0 = Instant::now();
        nav.go_to(2, t0);
        let outcome = nav.go_to(0, t0 + Duration::from_millis(10));
        assert_eq!(outcome, NavOutcome::Ignored(IgnoreReason::Transitioning));
        assert_eq!(nav.active_index(), 2);
    }

    #[test]
    fn test_go_to_polls_elapsed_lock() {
        let mut nav = controller(4);
        let t0 = Instant::now();
        nav.go_to(2, t0);
        let outcome = nav.go_to(1, after_lock(&nav, t0));
        assert_eq!(outcome, NavOutcome::Started { from: 2, to: 1 });
    }

    #[test]
    fn test_redundant_and_out_of_range_requests() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        assert_eq!(nav.go_to(0, t0), NavOutcome::Ignored(IgnoreReason::AlreadyActive));
        assert!(!nav.state().is_transitioning());
        assert_eq!(nav.go_to(3, t0), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(nav.on_retreat(t0), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_rejected_forward_raises_hint() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        assert!(!nav.refresh_completion(&unread));
        assert!(!nav.can_advance());

        assert_eq!(nav.on_advance(t0), NavOutcome::Rejected);
        assert_eq!(nav.active_index(), 0);
        assert!(!nav.state().is_transitioning());
        assert!(nav.hint_visible(t0 + Duration::from_millis(3999)));
        assert!(!nav.hint_visible(t0 + Duration::from_millis(4000)));
    }

    #[test]
    fn test_backward_ignores_gate() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.go_to(1, t0);
        let t1 = after_lock(&nav, t0);
        nav.poll(t1);
        nav.refresh_completion(&unread);

        assert_eq!(nav.on_retreat(t1), NavOutcome::Started { from: 1, to: 0 });
    }

    #[test]
    fn test_visited_section_skips_gate() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.go_to(1, t0);
        let t1 = after_lock(&nav, t0);
        nav.go_to(0, t1);
        let t2 = after_lock(&nav, t1);
        nav.poll(t2);

        nav.refresh_completion(&unread);
        assert!(nav.can_advance());
        assert_eq!(nav.go_to(1, t2), NavOutcome::Started { from: 0, to: 1 });
    }

    #[test]
    fn test_refresh_marks_completed_history() {
        let mut nav = controller(3);
        nav.refresh_completion(&read);
        assert!(nav.state().has_completed(0));
        assert!(nav.state().is_section_complete());
    }

    #[test]
    fn test_successful_move_clears_hint() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.refresh_completion(&unread);
        nav.on_advance(t0);
        assert!(nav.hint_visible(t0));

        nav.refresh_completion(&read);
        assert!(nav.on_advance(t0 + Duration::from_millis(5)).is_started());
        assert!(!nav.hint_visible(t0 + Duration::from_millis(5)));
    }

    #[test]
    fn test_cancel_clears_lock() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.on_advance(t0);
        nav.cancel();
        assert!(!nav.state().is_transitioning());
        assert_eq!(nav.active_index(), 1);
    }

    #[test]
    fn test_transition_progress_and_direction() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.go_to(2, t0);
        let transition = *nav.state().transition().unwrap();
        assert_eq!(transition.direction(), TransitionDirection::Forward);
        assert_eq!(transition.progress(t0), 0.0);
        let half = t0 + nav.lock_duration() / 2;
        assert!((transition.progress(half) - 0.5).abs() < 0.01);
        assert!(transition.eased_progress(half) > transition.progress(half));
        assert_eq!(transition.progress(t0 + nav.lock_duration() * 2), 1.0);
    }

    #[test]
    fn test_apply_intent_none_does_nothing() {
        let mut nav = controller(3);
        assert_eq!(nav.apply_intent(InputIntent::None, Instant::now()), None);
        assert_eq!(nav.active_index(), 0);
    }
}
