//! Configuration surface for the moderation service.
//!
//! Options are normally built in code, but they also load from TOML:
//!
//! ```toml
//! [suggestion_messages]
//! spam = "No advertising, please."
//!
//! [validation_limits]
//! max_text_length = 2000
//! image_protocols = ["https"]
//!
//! [[custom_rules]]
//! id = "no-phone"
//! name = "Phone numbers"
//! content_types = ["text", "voice"]
//! severity = "medium"
//! violation_type = "personal_info"
//! patterns = ['\d{3}-\d{3}-\d{4}']
//! ```

use crate::uri::is_valid_scheme;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};
use vigil_core::{ModerationRule, ViolationType};
use vigil_error::{ConfigError, ConfigErrorKind, VigilResult};

/// Default maximum text length in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;
/// Default maximum voice text length in characters.
pub const DEFAULT_MAX_VOICE_TEXT_LENGTH: usize = 5_000;
/// Default maximum URI length in characters.
pub const DEFAULT_MAX_URI_LENGTH: usize = 2_048;
/// Schemes accepted for images by default.
pub const DEFAULT_IMAGE_PROTOCOLS: [&str; 4] = ["http", "https", "file", "data"];
/// Schemes accepted for video by default.
pub const DEFAULT_VIDEO_PROTOCOLS: [&str; 3] = ["http", "https", "file"];

/// Length limits and protocol allow-lists. Unset fields leave the
/// moderator's current value untouched.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, Setters,
)]
#[setters(prefix = "with_", strip_option)]
#[serde(default)]
pub struct ValidationLimits {
    /// Maximum text length in characters
    max_text_length: Option<usize>,
    /// Maximum voice text length in characters
    max_voice_text_length: Option<usize>,
    /// Maximum image or video URI length in characters
    max_uri_length: Option<usize>,
    /// Replacement scheme allow-list for images
    image_protocols: Option<Vec<String>>,
    /// Replacement scheme allow-list for video
    video_protocols: Option<Vec<String>>,
}

impl ValidationLimits {
    /// Limits that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the first unusable limit or protocol.
    pub fn validate(&self) -> VigilResult<()> {
        for (field, value) in [
            ("max_text_length", self.max_text_length),
            ("max_voice_text_length", self.max_voice_text_length),
            ("max_uri_length", self.max_uri_length),
        ] {
            if value == Some(0) {
                return Err(ConfigError::new(ConfigErrorKind::InvalidLimit {
                    field: field.to_string(),
                    value: 0,
                })
                .into());
            }
        }
        let protocols = self
            .image_protocols
            .iter()
            .chain(self.video_protocols.iter())
            .flatten();
        for protocol in protocols {
            let scheme = protocol.trim().trim_end_matches(':');
            if !is_valid_scheme(scheme) {
                return Err(ConfigError::new(ConfigErrorKind::InvalidProtocol(protocol.clone())).into());
            }
        }
        Ok(())
    }
}

/// Everything `configure` accepts. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
#[serde(default)]
pub struct ModerationOptions {
    /// Suggestion overrides per violation type
    suggestion_messages: Option<HashMap<ViolationType, String>>,
    /// Length limits and protocol allow-lists
    validation_limits: Option<ValidationLimits>,
    /// Rules added to the registry, merged by id
    custom_rules: Option<Vec<ModerationRule>>,
}

impl ModerationOptions {
    /// Options that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> VigilResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(ConfigErrorKind::FileRead(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> VigilResult<Self> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::TomlParse(e.to_string())))?;
        debug!(
            suggestions = options.suggestion_messages.as_ref().map_or(0, HashMap::len),
            custom_rules = options.custom_rules.as_ref().map_or(0, Vec::len),
            "Parsed moderation options"
        );
        Ok(options)
    }

    /// Report the first problem with these options.
    pub fn validate(&self) -> VigilResult<()> {
        if let Some(limits) = &self.validation_limits {
            limits.validate()?;
        }
        for rule in self.custom_rules.iter().flatten() {
            rule.validate().map_err(|e| {
                ConfigError::new(ConfigErrorKind::InvalidRule(format!("{}: {}", rule.id(), e)))
            })?;
        }
        Ok(())
    }
}
