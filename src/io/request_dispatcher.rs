//! Background dispatch of chat and contact requests.
//!
//! Both external services are called with blocking HTTP, so each request runs
//! on its own thread and reports back through a channel. The GUI thread calls
//! [`RequestDispatcher::check_completion`] once per frame.

use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use eframe::egui;
use tracing::{debug, warn};

use folio::{request_with_rotation, ChatRequest, ContactForm, CredentialPool, GenerativeBackend, MailRelay, RelayError, RotationOutcome};

use crate::io::PendingRequests;

/// A finished background request.
pub enum DispatchResult {
    Chat(RotationOutcome),
    Mail(Result<(), RelayError>),
}

/// Runs chat and mail requests off the GUI thread.
pub struct RequestDispatcher {
    pending: Arc<Mutex<PendingRequests>>,
    chat_receiver: Option<Receiver<RotationOutcome>>,
    mail_receiver: Option<Receiver<Result<(), RelayError>>>,
    backend: Option<Arc<dyn GenerativeBackend>>,
    relay: Option<Arc<dyn MailRelay>>,
}

impl RequestDispatcher {
    /// Either service may be missing; requests for it are then refused.
    pub fn new(backend: Option<Arc<dyn GenerativeBackend>>, relay: Option<Arc<dyn MailRelay>>) -> Self {
        Self {
            pending: Arc::new(Mutex::new(PendingRequests::new())),
            chat_receiver: None,
            mail_receiver: None,
            backend,
            relay,
        }
    }

    pub fn has_relay(&self) -> bool {
        self.relay.is_some()
    }

    pub fn pending(&self) -> PendingRequests {
        self.pending.lock().map(|p| *p).unwrap_or_default()
    }

    /// Sends a chat request with key rotation on a worker thread.
    ///
    /// Returns false if no backend is available or a chat request is already
    /// in flight.
    pub fn start_chat(&mut self, pool: CredentialPool, request: ChatRequest, ctx: &egui::Context) -> bool {
        let Some(backend) = self.backend.clone() else {
            return false;
        };
        if self.chat_receiver.is_some() {
            return false;
        }

        let (sender, receiver) = channel();
        self.chat_receiver = Some(receiver);
        self.set_pending(|p| p.chat = true);

        let pending = Arc::clone(&self.pending);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let outcome = request_with_rotation(backend.as_ref(), &pool, &request);
            let _ = sender.send(outcome);

            if let Ok(mut p) = pending.lock() {
                p.chat = false;
            }
            ctx_handle.request_repaint();
        });

        debug!("chat request dispatched");
        true
    }

    /// Sends the contact form through the relay on a worker thread.
    ///
    /// Returns false if no relay is configured or a submission is in flight.
    pub fn start_mail(&mut self, form: ContactForm, ctx: &egui::Context) -> bool {
        let Some(relay) = self.relay.clone() else {
            return false;
        };
        if self.mail_receiver.is_some() {
            return false;
        }

        let (sender, receiver) = channel();
        self.mail_receiver = Some(receiver);
        self.set_pending(|p| p.mail = true);

        let pending = Arc::clone(&self.pending);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = relay.send(&form);
            if let Err(e) = &result {
                warn!("contact relay failed: {}", e);
            }
            let _ = sender.send(result);

            if let Ok(mut p) = pending.lock() {
                p.mail = false;
            }
            ctx_handle.request_repaint();
        });

        debug!("contact message dispatched");
        true
    }

    /// Collects whatever finished since the last call.
    pub fn check_completion(&mut self) -> Vec<DispatchResult> {
        let mut results = Vec::new();

        if let Some(receiver) = &self.chat_receiver {
            if let Ok(outcome) = receiver.try_recv() {
                results.push(DispatchResult::Chat(outcome));
                self.chat_receiver = None;
            }
        }

        if let Some(receiver) = &self.mail_receiver {
            if let Ok(result) = receiver.try_recv() {
                results.push(DispatchResult::Mail(result));
                self.mail_receiver = None;
            }
        }

        results
    }

    fn set_pending(&self, update: impl FnOnce(&mut PendingRequests)) {
        if let Ok(mut p) = self.pending.lock() {
            update(&mut p);
        }
    }
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::ChatError;
    use std::time::{Duration, Instant};

    struct EchoBackend;

    impl GenerativeBackend for EchoBackend {
        fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ChatError> {
            Ok(format!("{}:{}", api_key, prompt.len()))
        }
    }

    struct RefusingRelay;

    impl MailRelay for RefusingRelay {
        fn send(&self, _form: &ContactForm) -> Result<(), RelayError> {
            Err(RelayError::Rejected {
                status: 400,
                body: "bad template".to_string(),
            })
        }
    }

    fn wait_for(dispatcher: &mut RequestDispatcher) -> Vec<DispatchResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let results = dispatcher.check_completion();
            if !results.is_empty() || Instant::now() > deadline {
                return results;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            question: "hi".to_string(),
            prompt: "hello".to_string(),
        }
    }

    #[test]
    fn test_idle_dispatcher() {
        let mut dispatcher = RequestDispatcher::default();
        assert!(!dispatcher.pending().any());
        assert!(dispatcher.check_completion().is_empty());
        assert!(!dispatcher.has_relay());
    }

    #[test]
    fn test_missing_services_refuse_requests() {
        let ctx = egui::Context::default();
        let mut dispatcher = RequestDispatcher::default();
        assert!(!dispatcher.start_chat(CredentialPool::new(vec!["k".into()]), request(), &ctx));
        assert!(!dispatcher.start_mail(ContactForm::default(), &ctx));
    }

    #[test]
    fn test_chat_round_trip_through_worker() {
        let ctx = egui::Context::default();
        let mut dispatcher = RequestDispatcher::new(Some(Arc::new(EchoBackend)), None);

        assert!(dispatcher.start_chat(CredentialPool::new(vec!["k1".into()]), request(), &ctx));
        // Second request while the first is unread is refused
        assert!(!dispatcher.start_chat(CredentialPool::new(vec!["k1".into()]), request(), &ctx));

        let results = wait_for(&mut dispatcher);
        assert_eq!(results.len(), 1);
        match &results[0] {
            DispatchResult::Chat(outcome) => assert_eq!(outcome.result, Ok("k1:5".to_string())),
            DispatchResult::Mail(_) => panic!("expected chat result"),
        }
    }

    #[test]
    fn test_mail_failure_is_reported() {
        let ctx = egui::Context::default();
        let mut dispatcher = RequestDispatcher::new(None, Some(Arc::new(RefusingRelay)));

        assert!(dispatcher.start_mail(ContactForm::default(), &ctx));
        let results = wait_for(&mut dispatcher);
        assert!(matches!(
            results.as_slice(),
            [DispatchResult::Mail(Err(RelayError::Rejected { status: 400, .. }))]
        ));
    }
}
