//! Chat widget: a short conversation with a text-generation backend that
//! answers as the site owner.
//!
//! The session is a small state machine driven from the UI thread:
//! `Idle -> Waiting -> Composing -> Idle`, with `Failed` as the terminal state
//! once every credential in the pool has been tried. Network calls happen in
//! [`request_with_rotation`], which is safe to run on a worker thread.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::error::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Local>,
    pub read: bool,
    read_due: Option<Instant>,
}

impl ChatMessage {
    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sent_at: Local::now(),
            read: true,
            read_due: None,
        }
    }

    fn user(content: impl Into<String>, read_due: Instant) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sent_at: Local::now(),
            read: false,
            read_due: Some(read_due),
        }
    }
}

/// Where the session is in the request/reply cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    /// Request in flight
    Waiting,
    /// Reply received, held back to look like someone typing
    Composing { reply: String, reveal_at: Instant },
    /// Every credential failed; needs a manual reset
    Failed { message: String },
}

/// A prompt ready to send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub question: String,
    pub prompt: String,
}

/// Fixed pool of API keys with a rotation cursor.
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: usize,
    exhausted: bool,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: 0,
            exhausted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn current(&self) -> Option<&str> {
        self.keys.get(self.cursor).map(String::as_str)
    }

    /// Starts a fresh round from the first key.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.exhausted = false;
    }

    fn key_at(&self, offset: usize) -> (usize, &str) {
        let index = (self.cursor + offset) % self.keys.len();
        (index, self.keys[index].as_str())
    }
}

/// Capability to turn a prompt into text.
pub trait GenerativeBackend: Send + Sync {
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ChatError>;
}

/// Result of one rotation round, to be applied back on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    pub result: Result<String, ChatError>,
    /// Pool cursor to continue from next time
    pub cursor: usize,
}

/// Sends `request`, rotating through the pool on failure until a key works or
/// each key has failed once.
pub fn request_with_rotation(
    backend: &dyn GenerativeBackend,
    pool: &CredentialPool,
    request: &ChatRequest,
) -> RotationOutcome {
    if pool.is_empty() {
        return RotationOutcome {
            result: Err(ChatError::NoCredentials),
            cursor: 0,
        };
    }

    for attempt in 0..pool.len() {
        let (index, key) = pool.key_at(attempt);
        match backend.generate(key, &request.prompt) {
            Ok(text) => {
                if attempt > 0 {
                    info!(key_index = index, attempts = attempt + 1, "chat request succeeded after rotation");
                }
                return RotationOutcome {
                    result: Ok(text),
                    cursor: index,
                };
            }
            Err(e) => {
                warn!(key_index = index, "chat request failed, rotating key: {}", e);
            }
        }
    }

    RotationOutcome {
        result: Err(ChatError::CredentialsExhausted(pool.len())),
        cursor: pool.cursor,
    }
}

/// Conversation state for the chat widget.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
    pool: CredentialPool,
    last_question: Option<String>,
    persona: String,
    context: String,
    max_input_chars: usize,
    history_window: usize,
    reply_delay: Duration,
    read_receipt_min: Duration,
    read_receipt_jitter_ms: u64,
}

impl ChatSession {
    /// `context` is appended to the configured persona, typically a summary
    /// of the portfolio content.
    pub fn new(config: &ChatConfig, context: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(config.greeting.clone())],
            phase: ChatPhase::Idle,
            pool: CredentialPool::new(config.api_keys.clone()),
            last_question: None,
            persona: config.persona.clone(),
            context: context.into(),
            max_input_chars: config.max_input_chars,
            history_window: config.history_window,
            reply_delay: Duration::from_millis(config.reply_delay_ms()),
            read_receipt_min: Duration::from_millis(config.read_receipt_min_ms),
            read_receipt_jitter_ms: config.read_receipt_jitter_ms,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    /// True while the other side should look like it is typing.
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, ChatPhase::Waiting | ChatPhase::Composing { .. })
    }

    pub fn can_send(&self) -> bool {
        matches!(self.phase, ChatPhase::Idle)
    }

    /// Accepts a user message and builds the request to send.
    pub fn submit<R: Rng>(&mut self, input: &str, now: Instant, rng: &mut R) -> Result<ChatRequest, ChatError> {
        match &self.phase {
            ChatPhase::Idle => {}
            ChatPhase::Failed { .. } => return Err(ChatError::CredentialsExhausted(self.pool.len())),
            ChatPhase::Waiting | ChatPhase::Composing { .. } => return Err(ChatError::Busy),
        }

        let question = input.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        let len = question.chars().count();
        if len > self.max_input_chars {
            return Err(ChatError::InputTooLong {
                len,
                max: self.max_input_chars,
            });
        }

        let jitter = if self.read_receipt_jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..self.read_receipt_jitter_ms)
        };
        let read_due = now + self.read_receipt_min + Duration::from_millis(jitter);

        let request = self.build_request(question);
        self.messages.push(ChatMessage::user(question, read_due));
        self.last_question = Some(question.to_string());
        self.phase = ChatPhase::Waiting;
        debug!(chars = len, "chat message submitted");
        Ok(request)
    }

    /// Applies a finished rotation round.
    pub fn apply_outcome(&mut self, outcome: RotationOutcome, now: Instant) {
        if !matches!(self.phase, ChatPhase::Waiting) {
            debug!("dropping chat outcome that arrived outside of a request");
            return;
        }

        self.pool.cursor = outcome.cursor;
        match outcome.result {
            Ok(reply) => {
                let reply = if reply.trim().is_empty() {
                    "Hmm... no response received".to_string()
                } else {
                    reply
                };
                self.phase = ChatPhase::Composing {
                    reply,
                    reveal_at: now + self.reply_delay,
                };
            }
            Err(e) => {
                warn!("chat gave up: {}", e);
                self.pool.exhausted = true;
                self.phase = ChatPhase::Failed {
                    message: "Sorry, I'm having trouble right now. Reset to try again.".to_string(),
                };
            }
        }
    }

    /// Advances timers: read receipts and delayed replies. Returns true if
    /// anything visible changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for message in self.messages.iter_mut() {
            if let Some(due) = message.read_due {
                if now >= due {
                    message.read = true;
                    message.read_due = None;
                    changed = true;
                }
            }
        }

        if let ChatPhase::Composing { reveal_at, .. } = &self.phase {
            if now >= *reveal_at {
                if let ChatPhase::Composing { reply, .. } = std::mem::replace(&mut self.phase, ChatPhase::Idle) {
                    self.messages.push(ChatMessage::assistant(reply));
                    changed = true;
                }
            }
        }

        changed
    }

    /// Manual recovery from [`ChatPhase::Failed`]: resets the pool and
    /// re-sends the last question.
    pub fn reset_and_retry(&mut self) -> Option<ChatRequest> {
        if !matches!(self.phase, ChatPhase::Failed { .. }) {
            return None;
        }

        self.pool.reset();
        let question = self.last_question.clone();
        match question {
            Some(question) => {
                // The question is already in the transcript; leave it out of the window
                let window_end = self.messages.len().saturating_sub(1);
                let request = self.build_request_from(&question, window_end);
                self.phase = ChatPhase::Waiting;
                info!("chat reset, retrying with all credentials");
                Some(request)
            }
            None => {
                self.phase = ChatPhase::Idle;
                None
            }
        }
    }

    fn build_request(&self, question: &str) -> ChatRequest {
        self.build_request_from(question, self.messages.len())
    }

    /// Prompt = persona + context + the last `history_window` messages before
    /// `window_end` + the question.
    fn build_request_from(&self, question: &str, window_end: usize) -> ChatRequest {
        let window_start = window_end.saturating_sub(self.history_window);
        let history = self.messages[window_start..window_end]
            .iter()
            .map(|m| match m.role {
                Role::User => format!("User: {}", m.content),
                Role::Assistant => format!("Me: {}", m.content),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "{}\n\n--- BEGIN CONTEXT ---\n{}\n--- END CONTEXT ---\n\n--- CONVERSATION ---\n{}\n\nQuestion: {}",
            self.persona, self.context, history, question
        );

        ChatRequest {
            question: question.to_string(),
            prompt,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Extracts the reply text from a `generateContent` response body.
pub fn parse_generate_response(body: &str) -> Result<String, ChatError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ChatError::BadResponse(e.to_string()))?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::BadResponse("no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    Ok(text)
}

/// Google generative language API over blocking HTTP.
pub struct GeminiBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

impl GenerativeBackend for GeminiBackend {
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ChatError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ChatError::Request(format!("status {}", status.as_u16())));
        }
        parse_generate_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// Backend that fails for listed keys and records every key it saw.
    struct ScriptedBackend {
        bad_keys: Vec<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(bad_keys: Vec<&'static str>) -> Self {
            Self {
                bad_keys,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl GenerativeBackend for ScriptedBackend {
        fn generate(&self, api_key: &str, _prompt: &str) -> Result<String, ChatError> {
            self.seen.lock().unwrap().push(api_key.to_string());
            if self.bad_keys.contains(&api_key) {
                Err(ChatError::Request("status 429".to_string()))
            } else {
                Ok(format!("reply via {}", api_key))
            }
        }
    }

    fn config(keys: &[&str]) -> ChatConfig {
        ChatConfig {
            api_keys: keys.iter().map(|k| k.to_string()).collect(),
            history_window: 2,
            ..ChatConfig::default()
        }
    }

    #[test]
    fn test_submit_validates_input() {
        let mut session = ChatSession::new(&config(&["a"]), "");
        let mut rng = StdRng::seed_from_u64(7);
        let now = Instant::now();

        assert_eq!(session.submit("   ", now, &mut rng), Err(ChatError::EmptyInput));
        let long = "x".repeat(101);
        assert_eq!(
            session.submit(&long, now, &mut rng),
            Err(ChatError::InputTooLong { len: 101, max: 100 })
        );
        assert!(session.submit(&"x".repeat(100), now, &mut rng).is_ok());
        assert_eq!(session.submit("again", now, &mut rng), Err(ChatError::Busy));
    }

    #[test]
    fn test_reply_is_delayed() {
        let mut session = ChatSession::new(&config(&["a"]), "");
        let mut rng = StdRng::seed_from_u64(7);
        let t0 = Instant::now();
        let request = session.submit("what do you build?", t0, &mut rng).unwrap();
        assert!(session.is_typing());

        let backend = ScriptedBackend::new(vec![]);
        let outcome = request_with_rotation(&backend, session.pool(), &request);
        session.apply_outcome(outcome, t0);

        session.poll(t0 + Duration::from_millis(1899));
        assert_eq!(session.messages().len(), 2);
        assert!(session.is_typing());

        session.poll(t0 + Duration::from_millis(1900));
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].content, "reply via a");
        assert!(session.can_send());
    }

    #[test]
    fn test_rotation_skips_failing_keys() {
        let backend = ScriptedBackend::new(vec!["a", "b"]);
        let pool = CredentialPool::new(vec!["a".into(), "b".into(), "c".into()]);
        let request = ChatRequest {
            question: "q".into(),
            prompt: "p".into(),
        };
        let outcome = request_with_rotation(&backend, &pool, &request);
        assert_eq!(outcome.result, Ok("reply via c".to_string()));
        assert_eq!(outcome.cursor, 2);
        assert_eq!(*backend.seen.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exhaustion_fails_and_reset_retries_all() {
        let mut session = ChatSession::new(&config(&["a", "b"]), "");
        let mut rng = StdRng::seed_from_u64(1);
        let t0 = Instant::now();
        let request = session.submit("hello", t0, &mut rng).unwrap();

        let failing = ScriptedBackend::new(vec!["a", "b"]);
        let outcome = request_with_rotation(&failing, session.pool(), &request);
        assert_eq!(outcome.result, Err(ChatError::CredentialsExhausted(2)));
        session.apply_outcome(outcome, t0);
        assert!(matches!(session.phase(), ChatPhase::Failed { .. }));
        assert!(session.pool().is_exhausted());
        assert!(session.submit("more", t0, &mut rng).is_err());

        let retry = session.reset_and_retry().unwrap();
        assert_eq!(retry.question, "hello");
        assert!(!session.pool().is_exhausted());
        // The question is not duplicated in the transcript
        assert_eq!(session.messages().iter().filter(|m| m.role == Role::User).count(), 1);

        let healthy = ScriptedBackend::new(vec![]);
        let outcome = request_with_rotation(&healthy, session.pool(), &retry);
        session.apply_outcome(outcome, t0);
        session.poll(t0 + Duration::from_secs(5));
        assert_eq!(session.messages().last().map(|m| m.role), Some(Role::Assistant));
    }

    #[test]
    fn test_no_credentials() {
        let backend = ScriptedBackend::new(vec![]);
        let outcome = request_with_rotation(
            &backend,
            &CredentialPool::default(),
            &ChatRequest {
                question: "q".into(),
                prompt: "p".into(),
            },
        );
        assert_eq!(outcome.result, Err(ChatError::NoCredentials));
    }

    #[test]
    fn test_prompt_carries_rolling_window() {
        let mut session = ChatSession::new(&config(&["a"]), "I build things.");
        let mut rng = StdRng::seed_from_u64(3);
        let backend = ScriptedBackend::new(vec![]);
        let mut now = Instant::now();

        for question in ["first", "second"] {
            let request = session.submit(question, now, &mut rng).unwrap();
            let outcome = request_with_rotation(&backend, session.pool(), &request);
            session.apply_outcome(outcome, now);
            now += Duration::from_secs(5);
            session.poll(now);
        }

        let request = session.submit("third", now, &mut rng).unwrap();
        assert!(request.prompt.contains("I build things."));
        assert!(request.prompt.contains("User: second"));
        assert!(request.prompt.contains("Me: reply via a"));
        assert!(!request.prompt.contains("User: first"));
        assert!(request.prompt.ends_with("Question: third"));
    }

    #[test]
    fn test_read_receipts_arrive_within_jitter_window() {
        let mut session = ChatSession::new(&config(&["a"]), "");
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = Instant::now();
        session.submit("hi", t0, &mut rng).unwrap();

        session.poll(t0 + Duration::from_millis(1999));
        assert!(!session.messages()[1].read);
        session.poll(t0 + Duration::from_millis(4500));
        assert!(session.messages()[1].read);
    }

    #[test]
    fn test_parse_generate_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"there"}]}}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "Hello there");

        let err = parse_generate_response(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, ChatError::BadResponse(_)));
    }
}
