//! Contact form state.

use folio::ContactForm;

/// The form being edited and whether a submission is in flight.
#[derive(Debug, Default)]
pub struct ContactState {
    form: ContactForm,
    sending: bool,
}

impl ContactState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Fields are read-only while a submission is in flight.
    pub fn form_mut(&mut self) -> Option<&mut ContactForm> {
        if self.sending {
            None
        } else {
            Some(&mut self.form)
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn begin_sending(&mut self) {
        self.sending = true;
    }

    /// Ends a submission. A successful one clears the form.
    pub fn finish_sending(&mut self, delivered: bool) {
        self.sending = false;
        if delivered {
            self.form.reset();
        }
    }
}
