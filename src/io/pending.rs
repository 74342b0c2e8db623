//! In-flight flags shared with background request threads.

/// Which background requests are currently running.
///
/// Only the flags are shared; results come through channels.
/// This struct is wrapped in an `Arc<Mutex<>>` so worker threads can clear
/// their flag when they finish.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingRequests {
    pub chat: bool,
    pub mail: bool,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.chat || self.mail
    }
}
