//! Error types for the folio library.
//!
//! Navigation itself never fails: rejected or redundant moves are reported as
//! outcomes, not errors. Everything here belongs to configuration, content, or
//! the two boundary services (chat and mail relay).

use thiserror::Error;

/// Errors raised while loading or validating [`crate::config::SiteConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the navigation core cannot work with
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised when building a [`crate::section::SectionRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A registry needs at least one section to navigate
    #[error("section registry is empty")]
    Empty,

    /// Two sections share an id
    #[error("duplicate section id: {0}")]
    DuplicateId(String),
}

/// Errors raised while loading portfolio content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid content: {0}")]
    Invalid(String),
}

/// Errors produced by the chat widget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Input was blank after trimming
    #[error("message is empty")]
    EmptyInput,

    /// Input exceeds the character budget
    #[error("message is {len} characters, limit is {max}")]
    InputTooLong { len: usize, max: usize },

    /// A request is already in flight or a reply is still being composed
    #[error("a reply is already on its way")]
    Busy,

    /// No API keys were configured
    #[error("no credentials configured")]
    NoCredentials,

    /// Every configured key failed once in this round
    #[error("all {0} credentials failed")]
    CredentialsExhausted(usize),

    /// Transport or HTTP-level failure from the generation backend
    #[error("request failed: {0}")]
    Request(String),

    /// Backend answered but the payload had no usable text
    #[error("unexpected response: {0}")]
    BadResponse(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Request(err.to_string())
    }
}

/// Errors produced by the contact form's mail relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("mail relay is not configured")]
    NotConfigured,

    #[error("mail relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Validation errors for the contact form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("email address looks invalid")]
    InvalidEmail,
}
