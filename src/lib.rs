pub mod error;
pub mod config;
pub mod section;
pub mod completion;
pub mod intent;
pub mod navigation;
pub mod indicator;
pub mod notice;
pub mod chat;
pub mod contact;
pub mod content;
pub mod theme;

// Export navigation core
pub use section::{Section, SectionRegistry};
pub use completion::{CompletionTracker, ScrollMetrics, ScrollProbe, ScrollRecorder, ScrollRegion};
pub use intent::{InputArbiter, InputEvent, InputIntent, NavKey, TouchTracker};
pub use navigation::{
    IgnoreReason, NavOutcome, NavigationController, NavigationState,
    Transition, TransitionDirection, TransitionFinished
};
pub use indicator::IndicatorEntry;

// Export configuration and errors
pub use config::{ChatConfig, ContactConfig, NavConfig, SiteConfig};
pub use error::{ChatError, ConfigError, ContactError, ContentError, RegistryError, RelayError};

// Export boundary components
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use chat::{
    ChatMessage, ChatPhase, ChatRequest, ChatSession, CredentialPool,
    GeminiBackend, GenerativeBackend, Role, RotationOutcome, request_with_rotation
};
pub use contact::{ContactForm, EmailJsRelay, MailRelay};
pub use content::{Portfolio, Proficiency, Project, ProjectFilter, ProjectKind, SectionKind, Skill, default_registry};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, adjust_brightness, with_alpha, lerp_color};
