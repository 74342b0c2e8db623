//! Site configuration.
//!
//! Everything is optional on disk: a missing file, or a file that only sets a
//! few fields, falls back to the defaults below. Config is JSON so it shares
//! the serializer used for persisted UI settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";
/// Comma-separated API keys that replace `chat.api_keys`.
pub const CHAT_KEYS_ENV: &str = "FOLIO_CHAT_KEYS";

/// Transition duration used when reduced motion is requested.
pub const REDUCED_MOTION_DURATION_MS: u64 = 100;

/// Upper bound for every millisecond timer in the config.
pub const MAX_TIMER_MS: u64 = 60_000;
/// Upper bound for `chat.request_timeout_secs`.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Tunables for the section navigation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Slack when deciding whether a section was scrolled to its bottom
    pub completion_tolerance_px: f32,
    /// How long the transition lock holds after a section change
    pub transition_duration_ms: u64,
    /// Minimum vertical swipe distance that counts as navigation
    pub touch_threshold_px: f32,
    /// Wheel deltas at or below this magnitude never navigate
    pub wheel_threshold_px: f32,
    /// How long the "scroll to continue" hint stays up
    pub hint_duration_ms: u64,
    /// Ceiling on the transition lock, whatever the duration says
    pub max_lock_ms: u64,
    /// Shortens transitions to a near-instant swap
    pub reduced_motion: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            completion_tolerance_px: 5.0,
            transition_duration_ms: 1200,
            touch_threshold_px: 70.0,
            wheel_threshold_px: 0.0,
            hint_duration_ms: 4000,
            max_lock_ms: 3000,
            reduced_motion: false,
        }
    }
}

impl NavConfig {
    /// Effective lock duration: reduced motion applied, capped by `max_lock_ms`.
    pub fn lock_duration_ms(&self) -> u64 {
        let duration = if self.reduced_motion {
            REDUCED_MOTION_DURATION_MS.min(self.transition_duration_ms)
        } else {
            self.transition_duration_ms
        };
        duration.min(self.max_lock_ms)
    }
}

/// Chat widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of the generative language API
    pub endpoint: String,
    pub model: String,
    /// Credential pool, tried in order on failure
    pub api_keys: Vec<String>,
    /// Persona and context prepended to every prompt
    pub persona: String,
    /// First assistant message shown when the widget opens
    pub greeting: String,
    pub max_input_chars: usize,
    /// Number of prior messages sent along with each question
    pub history_window: usize,
    /// Simulated typing time before a reply is ready
    pub typing_delay_ms: u64,
    /// Extra pause between "ready" and the reply appearing
    pub ready_delay_ms: u64,
    pub read_receipt_min_ms: u64,
    pub read_receipt_jitter_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_keys: Vec::new(),
            persona: "You are the owner of this portfolio. Answer in the first person, \
                      stay relaxed and friendly, and only answer questions about your \
                      work, skills, education and projects. Politely decline anything \
                      else. Never say you are an AI."
                .to_string(),
            greeting: "Hi there! Ask me anything about my work.".to_string(),
            max_input_chars: 100,
            history_window: 10,
            typing_delay_ms: 1000,
            ready_delay_ms: 900,
            read_receipt_min_ms: 2000,
            read_receipt_jitter_ms: 2500,
            request_timeout_secs: 30,
        }
    }
}

impl ChatConfig {
    pub fn reply_delay_ms(&self) -> u64 {
        self.typing_delay_ms + self.ready_delay_ms
    }
}

/// Contact form mail relay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Jump back to the first section after a successful send
    pub return_home_on_success: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            return_home_on_success: true,
        }
    }
}

impl ContactConfig {
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// Top-level configuration for the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navigation: NavConfig,
    pub chat: ChatConfig,
    pub contact: ContactConfig,
    /// Portfolio content file; the bundled content is used when unset
    pub content_path: Option<PathBuf>,
}

impl SiteConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, validates it, and applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        config.apply_env_overrides();
        info!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Resolves the config file and loads it, falling back to defaults when
    /// no file exists.
    ///
    /// Lookup order: explicit path, `$FOLIO_CONFIG`, then the per-user config
    /// directory. An explicit path that does not exist is an error; the
    /// implicit locations are allowed to be missing.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&env_path));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load(&path);
            }
            debug!(path = %path.display(), "no config file, using defaults");
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replaces the chat key pool with `$FOLIO_CHAT_KEYS` when it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(keys) = std::env::var(CHAT_KEYS_ENV) {
            self.chat.api_keys = parse_key_list(&keys);
            debug!(count = self.chat.api_keys.len(), "chat keys taken from environment");
        }
    }

    /// Checks values the navigation and chat code rely on.
    ///
    /// Every timer must fit within [`MAX_TIMER_MS`] so deadlines computed from
    /// `Instant::now()` cannot overflow. A transition longer than the lock
    /// ceiling is allowed; the lock then releases at the ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;

        for (field, value, min) in [
            ("navigation.transition_duration_ms", nav.transition_duration_ms, 1),
            ("navigation.max_lock_ms", nav.max_lock_ms, 1),
            ("navigation.hint_duration_ms", nav.hint_duration_ms, 0),
            ("chat.typing_delay_ms", self.chat.typing_delay_ms, 0),
            ("chat.ready_delay_ms", self.chat.ready_delay_ms, 0),
            ("chat.read_receipt_min_ms", self.chat.read_receipt_min_ms, 0),
            ("chat.read_receipt_jitter_ms", self.chat.read_receipt_jitter_ms, 0),
        ] {
            check_range(field, value, min, MAX_TIMER_MS)?;
        }
        check_range(
            "chat.request_timeout_secs",
            self.chat.request_timeout_secs,
            1,
            MAX_REQUEST_TIMEOUT_SECS,
        )?;

        for (field, value) in [
            ("navigation.completion_tolerance_px", nav.completion_tolerance_px),
            ("navigation.touch_threshold_px", nav.touch_threshold_px),
            ("navigation.wheel_threshold_px", nav.wheel_threshold_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {}", value),
                });
            }
        }

        if nav.max_lock_ms < nav.transition_duration_ms {
            warn!(
                max_lock_ms = nav.max_lock_ms,
                transition_duration_ms = nav.transition_duration_ms,
                "transition longer than the lock ceiling, lock releases at the ceiling"
            );
        }

        if self.chat.max_input_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "chat.max_input_chars",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.chat.history_window == 0 {
            return Err(ConfigError::Invalid {
                field: "chat.history_window",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// `<config dir>/folio/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.json"))
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be between {} and {}, got {}", min, max, value),
        });
    }
    Ok(())
}

fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = SiteConfig::default();
        assert_eq!(config.navigation.completion_tolerance_px, 5.0);
        assert_eq!(config.navigation.touch_threshold_px, 70.0);
        assert_eq!(config.navigation.hint_duration_ms, 4000);
        assert_eq!(config.chat.max_input_chars, 100);
        assert_eq!(config.chat.reply_delay_ms(), 1900);
        assert!(!config.contact.is_configured());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SiteConfig::from_json(r#"{"navigation": {"touch_threshold_px": 50.0}}"#).unwrap();
        assert_eq!(config.navigation.touch_threshold_px, 50.0);
        assert_eq!(config.navigation.transition_duration_ms, 1200);
        assert_eq!(config.chat.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = SiteConfig::from_json(r#"{"navigation": {"transition_duration_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "navigation.transition_duration_ms", .. }));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = SiteConfig::from_json(r#"{"navigation": {"touch_threshold_px": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "navigation.touch_threshold_px", .. }));
    }

    #[test]
    fn test_lock_ceiling_caps_long_transition() {
        let config = SiteConfig::from_json(
            r#"{"navigation": {"transition_duration_ms": 2000, "max_lock_ms": 500}}"#,
        )
        .unwrap();
        assert_eq!(config.navigation.max_lock_ms, 500);
        assert_eq!(config.navigation.lock_duration_ms(), 500);
    }

    #[test]
    fn test_oversized_timers_rejected() {
        let err = SiteConfig::from_json(r#"{"navigation": {"transition_duration_ms": 18446744073709551615}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "navigation.transition_duration_ms", .. }));

        let err = SiteConfig::from_json(r#"{"navigation": {"max_lock_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "navigation.max_lock_ms", .. }));

        let err = SiteConfig::from_json(r#"{"chat": {"typing_delay_ms": 90000000}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "chat.typing_delay_ms", .. }));

        let err = SiteConfig::from_json(r#"{"chat": {"request_timeout_secs": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "chat.request_timeout_secs", .. }));
    }

    #[test]
    fn test_timers_at_bound_accepted() {
        let json = format!(
            r#"{{"navigation": {{"transition_duration_ms": {max}, "max_lock_ms": {max}, "hint_duration_ms": {max}}}}}"#,
            max = MAX_TIMER_MS
        );
        let config = SiteConfig::from_json(&json).unwrap();
        assert_eq!(config.navigation.lock_duration_ms(), MAX_TIMER_MS);
    }

    #[test]
    fn test_reduced_motion_shortens_lock() {
        let nav = NavConfig {
            reduced_motion: true,
            ..NavConfig::default()
        };
        assert_eq!(nav.lock_duration_ms(), REDUCED_MOTION_DURATION_MS);
    }

    #[test]
    fn test_parse_key_list() {
        assert_eq!(parse_key_list(" a, ,b ,c"), vec!["a", "b", "c"]);
        assert!(parse_key_list("").is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SiteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
