//! Moderator for video references.

use crate::config::DEFAULT_VIDEO_PROTOCOLS;
use crate::moderator::ContentModerator;
use crate::uri::UriPolicy;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};
use vigil_core::{ContentType, ModeratorOutcome, ViolationType};

/// Validates video URIs structurally.
///
/// Inline `data:` payloads are not allowed by default.
#[derive(Debug, Clone)]
pub struct VideoModerator {
    policy: UriPolicy,
}

impl Default for VideoModerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoModerator {
    /// Create a video moderator allowing `http`, `https` and `file`.
    pub fn new() -> Self {
        Self {
            policy: UriPolicy::new(DEFAULT_VIDEO_PROTOCOLS),
        }
    }

    /// Maximum accepted URI length in characters.
    pub fn max_uri_length(&self) -> usize {
        self.policy.max_uri_length()
    }

    /// Allowed schemes, lowercased.
    pub fn allowed_protocols(&self) -> &BTreeSet<String> {
        self.policy.allowed_protocols()
    }

    /// Set the maximum accepted URI length in characters.
    pub fn set_max_uri_length(&mut self, max_uri_length: usize) {
        self.policy.set_max_uri_length(max_uri_length);
    }

    /// Replace the scheme allow-list.
    pub fn set_allowed_protocols<I, S>(&mut self, protocols: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.policy.set_allowed_protocols(protocols);
    }
}

impl ContentModerator for VideoModerator {
    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    #[instrument(skip_all, fields(uri_len = content.len()))]
    fn moderate(&self, content: &str) -> ModeratorOutcome {
        self.policy
            .check(content)
            .map(|violation| {
                debug!(rule_id = %violation.rule_id(), "Video URI rejected");
                ModeratorOutcome::rejected(violation)
            })
            .unwrap_or_else(ModeratorOutcome::allowed)
    }

    fn set_suggestion_messages(&mut self, messages: HashMap<ViolationType, String>) {
        self.policy.suggestions_mut().set_overrides(messages);
    }
}
