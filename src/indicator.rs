//! Read-only projection of navigation state for dots and progress bars.

use std::time::Instant;

use crate::navigation::{NavOutcome, NavigationController, NavigationState};

/// One dot in the section indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorEntry {
    pub index: usize,
    pub title: String,
    pub is_active: bool,
    pub is_reachable: bool,
}

/// Whether `index` can be jumped to from the indicator.
///
/// Anything at or behind the active section is reachable, as is any section
/// already visited or finished earlier in the session.
pub fn is_reachable(state: &NavigationState, index: usize) -> bool {
    index < state.section_count()
        && (index <= state.active_index() || state.has_visited(index) || state.has_completed(index))
}

pub fn entries<K>(nav: &NavigationController<K>) -> Vec<IndicatorEntry> {
    let state = nav.state();
    nav.registry()
        .iter()
        .enumerate()
        .map(|(index, section)| IndicatorEntry {
            index,
            title: section.title().to_string(),
            is_active: index == state.active_index(),
            is_reachable: is_reachable(state, index),
        })
        .collect()
}

/// Highest index [`is_reachable`] allows, the target of an "end" jump.
pub fn furthest_reachable(state: &NavigationState) -> usize {
    (0..state.section_count())
        .rev()
        .find(|&index| is_reachable(state, index))
        .unwrap_or(0)
}

/// Fraction of the registry passed so far, `1.0` on the last section.
pub fn progress_fraction(state: &NavigationState) -> f32 {
    let count = state.section_count();
    if count <= 1 {
        return 1.0;
    }
    state.active_index() as f32 / (count - 1) as f32
}

/// Handles a click on an indicator entry. Unreachable entries do nothing;
/// reachable ones go straight to the controller, gate included.
pub fn activate<K>(nav: &mut NavigationController<K>, index: usize, now: Instant) -> Option<NavOutcome> {
    if !is_reachable(nav.state(), index) {
        return None;
    }
    Some(nav.go_to(index, now))
}
