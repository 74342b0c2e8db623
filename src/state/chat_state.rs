//! Chat widget state: the session plus what the window needs around it.

use rand::rngs::StdRng;
use rand::SeedableRng;

use folio::{ChatConfig, ChatSession};

/// State owned by the chat window.
///
/// Responsibilities:
/// - Holding the conversation and its phase
/// - Buffering the text the user is typing
/// - Tracking whether the window is open
pub struct ChatState {
    session: ChatSession,
    draft: String,
    open: bool,
    rng: StdRng,
}

impl ChatState {
    pub fn new(config: &ChatConfig, context: String) -> Self {
        Self {
            session: ChatSession::new(config, context),
            draft: String::new(),
            open: false,
            rng: StdRng::from_entropy(),
        }
    }

    // ===== Queries =====

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Characters left before the input budget is spent.
    pub fn remaining_chars(&self) -> usize {
        self.session
            .max_input_chars()
            .saturating_sub(self.draft.chars().count())
    }

    // ===== Mutations =====

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    /// Session and rng together, for `ChatSession::submit`.
    pub fn session_and_rng(&mut self) -> (&mut ChatSession, &mut StdRng) {
        (&mut self.session, &mut self.rng)
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }
}
