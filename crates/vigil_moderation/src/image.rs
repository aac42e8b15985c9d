//! Moderator for image references.

use crate::config::DEFAULT_IMAGE_PROTOCOLS;
use crate::moderator::ContentModerator;
use crate::uri::UriPolicy;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};
use vigil_core::{ContentType, ModeratorOutcome, ViolationType};

/// Validates image URIs structurally. The image bytes are never fetched.
#[derive(Debug, Clone)]
pub struct ImageModerator {
    policy: UriPolicy,
}

impl Default for ImageModerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageModerator {
    /// Create an image moderator allowing `http`, `https`, `file` and `data`.
    pub fn new() -> Self {
        Self {
            policy: UriPolicy::new(DEFAULT_IMAGE_PROTOCOLS),
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

impl ContentModerator for ImageModerator {
    fn content_type(&self) -> ContentType {
        ContentType::Image
    }

    #[instrument(skip_all, fields(uri_len = content.len()))]
    fn moderate(&self, content: &str) -> ModeratorOutcome {
        match self.policy.check(content) {
            Some(violation) => {
                debug!(rule_id = %violation.rule_id(), "Image URI rejected");
                ModeratorOutcome::rejected(violation)
            }
            None => ModeratorOutcome::allowed(),
        }
    }

    fn set_suggestion_messages(&mut self, messages: HashMap<ViolationType, String>) {
        self.policy.suggestions_mut().set_overrides(messages);
    }
}
