//! Contact form and the mail relay it submits through.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ContactConfig;
use crate::error::{ContactError, RelayError};

/// The three fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fullname: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.fullname.trim().is_empty() {
            return Err(ContactError::MissingField("fullname"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One `@`, a non-empty local part, and a dotted domain with no empty labels.
fn looks_like_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// External mail relay. Fire-and-forget: one attempt, success or failure.
pub trait MailRelay: Send + Sync {
    fn send(&self, form: &ContactForm) -> Result<(), RelayError>;
}

#[derive(Debug, Serialize)]
struct EmailJsPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
}

/// EmailJS REST relay over blocking HTTP.
pub struct EmailJsRelay {
    client: reqwest::blocking::Client,
    config: ContactConfig,
}

impl EmailJsRelay {
    pub fn new(config: &ContactConfig) -> Result<Self, RelayError> {
        if !config.is_configured() {
            return Err(RelayError::NotConfigured);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl MailRelay for EmailJsRelay {
    fn send(&self, form: &ContactForm) -> Result<(), RelayError> {
        let payload = EmailJsPayload {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: form.fullname.trim(),
                from_email: form.email.trim(),
                message: form.message.trim(),
            },
        };

        let response = self.client.post(&self.config.endpoint).json(&payload).send()?;
        let status = response.status();
        if status.is_success() {
            info!("contact message relayed");
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "mail relay rejected message");
            Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            fullname: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            message: "Hello!".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled();
        form.fullname = "  ".into();
        assert_eq!(form.validate(), Err(ContactError::MissingField("fullname")));

        let mut form = filled();
        form.message.clear();
        assert_eq!(form.validate(), Err(ContactError::MissingField("message")));
    }

    #[test]
    fn test_email_shapes() {
        for bad in ["ada", "ada@", "@example.org", "ada@example", "a@b@c.org", "ada@.org", "a da@x.org"] {
            let form = ContactForm {
                email: bad.into(),
                ..filled()
            };
            assert_eq!(form.validate(), Err(ContactError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_unconfigured_relay() {
        let err = EmailJsRelay::new(&ContactConfig::default()).err();
        assert!(matches!(err, Some(RelayError::NotConfigured)));
    }
}
