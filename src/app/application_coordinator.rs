//! Application-level coordination and workflow management.
//!
//! Turns panel interactions and input commands into calls on the navigation
//! controller, the chat session, and the request dispatcher, and feeds
//! finished background requests back into state.

use std::time::Instant;

use eframe::egui;
use tracing::{debug, info};

use folio::{indicator, ChatError, ChatPhase, IgnoreReason, InputIntent, NavOutcome, NoticeKind};

use crate::app::AppState;
use crate::io::{DispatchResult, RequestDispatcher};

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Routing navigation requests to the controller
/// - Starting chat and contact requests
/// - Applying finished requests and raising notices
/// - Advancing timers once per frame
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Advances every timer-driven piece of state. Called once per frame.
    pub fn tick(state: &mut AppState, now: Instant) {
        if let Some(finished) = state.navigation.poll(now) {
            debug!(index = finished.index, "section settled");
        }
        state.chat.session_mut().poll(now);
        state.notices.prune(now);
    }

    /// Re-evaluates the completion gate after the active section was drawn.
    pub fn refresh_completion(state: &mut AppState) {
        state.navigation.refresh_completion(&state.scroll);
    }

    // ===== Navigation =====

    pub fn handle_intent(state: &mut AppState, intent: InputIntent, now: Instant) {
        if let Some(outcome) = state.navigation.apply_intent(intent, now) {
            Self::log_outcome(outcome);
        }
    }

    /// Click on an indicator dot.
    pub fn handle_indicator_click(state: &mut AppState, index: usize, now: Instant) {
        if let Some(outcome) = indicator::activate(&mut state.navigation, index, now) {
            Self::log_outcome(outcome);
        }
    }

    pub fn go_to_first(state: &mut AppState, now: Instant) {
        let outcome = state.navigation.go_to(0, now);
        Self::log_outcome(outcome);
    }

    /// Jumps to the furthest section the indicator would allow, so "End"
    /// never skips sections the visitor has not reached yet.
    pub fn go_to_furthest(state: &mut AppState, now: Instant) {
        let target = indicator::furthest_reachable(state.navigation.state());
        let outcome = state.navigation.go_to(target, now);
        Self::log_outcome(outcome);
    }

    fn log_outcome(outcome: NavOutcome) {
        match outcome {
            NavOutcome::Started { from, to } => debug!(from, to, "navigation started"),
            NavOutcome::Rejected => debug!("navigation rejected, hint shown"),
            NavOutcome::Ignored(IgnoreReason::Transitioning) => {}
            NavOutcome::Ignored(reason) => debug!(?reason, "navigation ignored"),
        }
    }

    // ===== Chat =====

    /// Submits the chat draft and dispatches the request.
    pub fn send_chat(state: &mut AppState, dispatcher: &mut RequestDispatcher, ctx: &egui::Context, now: Instant) {
        let draft = state.chat.draft().to_string();
        let (session, rng) = state.chat.session_and_rng();

        match session.submit(&draft, now, rng) {
            Ok(request) => {
                state.chat.clear_draft();
                let pool = state.chat.session().pool().clone();
                if !dispatcher.start_chat(pool, request, ctx) {
                    Self::apply_chat_failure(state, ChatError::NoCredentials, now);
                }
            }
            Err(ChatError::EmptyInput) | Err(ChatError::Busy) => {}
            Err(e) => {
                state.notices.push(NoticeKind::Error, "Message not sent", e.to_string(), now);
            }
        }
    }

    /// Manual "reset and retry" from the chat's failed state.
    pub fn retry_chat(state: &mut AppState, dispatcher: &mut RequestDispatcher, ctx: &egui::Context, now: Instant) {
        let Some(request) = state.chat.session_mut().reset_and_retry() else {
            return;
        };
        let pool = state.chat.session().pool().clone();
        if !dispatcher.start_chat(pool, request, ctx) {
            Self::apply_chat_failure(state, ChatError::NoCredentials, now);
        }
    }

    fn apply_chat_failure(state: &mut AppState, error: ChatError, now: Instant) {
        let cursor = state.chat.session().pool().cursor();
        state.chat.session_mut().apply_outcome(
            folio::RotationOutcome {
                result: Err(error),
                cursor,
            },
            now,
        );
        Self::notice_if_chat_failed(state, now);
    }

    fn notice_if_chat_failed(state: &mut AppState, now: Instant) {
        if let ChatPhase::Failed { message } = state.chat.session().phase() {
            let message = message.clone();
            state.notices.push(NoticeKind::Error, "Chat unavailable", message, now);
        }
    }

    // ===== Contact =====

    /// Validates the contact form and hands it to the relay.
    pub fn submit_contact(state: &mut AppState, dispatcher: &mut RequestDispatcher, ctx: &egui::Context, now: Instant) {
        if state.contact.is_sending() {
            return;
        }

        if let Err(e) = state.contact.form().validate() {
            state.notices.push(NoticeKind::Error, "Check the form", e.to_string(), now);
            return;
        }

        if !dispatcher.has_relay() {
            state.notices.push(
                NoticeKind::Error,
                "Message not sent",
                "The contact form is not configured.",
                now,
            );
            return;
        }

        if dispatcher.start_mail(state.contact.form().clone(), ctx) {
            state.contact.begin_sending();
        }
    }

    // ===== Background Completion =====

    /// Applies finished background requests. Called once per frame.
    pub fn check_request_completion(state: &mut AppState, dispatcher: &mut RequestDispatcher, now: Instant) {
        for result in dispatcher.check_completion() {
            match result {
                DispatchResult::Chat(outcome) => {
                    state.chat.session_mut().apply_outcome(outcome, now);
                    Self::notice_if_chat_failed(state, now);
                }
                DispatchResult::Mail(Ok(())) => {
                    state.contact.finish_sending(true);
                    state.notices.push(
                        NoticeKind::Success,
                        "Message sent",
                        "Thanks for reaching out. I'll get back to you soon.",
                        now,
                    );
                    if state.config.contact.return_home_on_success {
                        info!("contact sent, returning to the first section");
                        Self::go_to_first(state, now);
                    }
                }
                DispatchResult::Mail(Err(e)) => {
                    state.contact.finish_sending(false);
                    state.notices.push(NoticeKind::Error, "Message not sent", e.to_string(), now);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Preferences;
    use folio::{Portfolio, SiteConfig};
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(
            SiteConfig::default(),
            Portfolio::bundled().unwrap(),
            "Dark".to_string(),
            Preferences::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_home_and_end_commands() {
        let mut state = state();
        let lock = state.navigation.lock_duration();
        let t0 = Instant::now();

        // Nothing reached yet, so End stays put
        ApplicationCoordinator::go_to_furthest(&mut state, t0);
        assert_eq!(state.navigation.active_index(), 0);
        assert!(!state.navigation.state().is_transitioning());

        ApplicationCoordinator::handle_intent(&mut state, InputIntent::Advance, t0);
        ApplicationCoordinator::handle_intent(&mut state, InputIntent::Advance, t0 + lock);
        assert_eq!(state.navigation.active_index(), 2);

        ApplicationCoordinator::go_to_first(&mut state, t0 + lock * 2);
        assert_eq!(state.navigation.active_index(), 0);

        // Back to the furthest visited section, not past it
        ApplicationCoordinator::go_to_furthest(&mut state, t0 + lock * 3);
        assert_eq!(state.navigation.active_index(), 2);
    }

    #[test]
    fn test_indicator_ignores_unreached_sections() {
        let mut state = state();
        ApplicationCoordinator::handle_indicator_click(&mut state, 3, Instant::now());
        assert_eq!(state.navigation.active_index(), 0);
    }

    #[test]
    fn test_chat_without_backend_fails_visibly() {
        let mut state = state();
        let mut dispatcher = RequestDispatcher::default();
        let ctx = egui::Context::default();
        let now = Instant::now();

        state.chat.draft_mut().push_str("What do you build?");
        ApplicationCoordinator::send_chat(&mut state, &mut dispatcher, &ctx, now);

        assert!(state.chat.draft().is_empty());
        assert!(matches!(state.chat.session().phase(), ChatPhase::Failed { .. }));
        assert!(state.notices.visible(now).any(|n| n.kind == NoticeKind::Error));
    }

    #[test]
    fn test_invalid_contact_form_raises_notice() {
        let mut state = state();
        let mut dispatcher = RequestDispatcher::default();
        let ctx = egui::Context::default();
        let now = Instant::now();

        ApplicationCoordinator::submit_contact(&mut state, &mut dispatcher, &ctx, now);
        assert!(!state.contact.is_sending());
        assert_eq!(state.notices.visible(now).count(), 1);

        ApplicationCoordinator::tick(&mut state, now + Duration::from_secs(5));
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_unconfigured_relay_refuses_valid_form() {
        let mut state = state();
        let mut dispatcher = RequestDispatcher::default();
        let ctx = egui::Context::default();
        let now = Instant::now();

        if let Some(form) = state.contact.form_mut() {
            form.fullname = "Ada".to_string();
            form.email = "ada@example.org".to_string();
            form.message = "Hello".to_string();
        }
        ApplicationCoordinator::submit_contact(&mut state, &mut dispatcher, &ctx, now);
        assert!(!state.contact.is_sending());
        assert_eq!(state.contact.form().fullname, "Ada");
    }
}
