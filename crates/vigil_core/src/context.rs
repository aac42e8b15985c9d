//! Orchestrator input.

use crate::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One piece of content submitted for moderation.
///
/// # Examples
///
/// ```
/// use vigil_core::{ContentType, ModerationContext};
///
/// let context = ModerationContext::new(ContentType::Text, "hello")
///     .with_user_id("user-42".to_string());
/// assert_eq!(context.content(), "hello");
/// assert_eq!(context.user_id().as_deref(), Some("user-42"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option)]
pub struct ModerationContext {
    /// Submitting user, if known
    #[serde(default)]
    user_id: Option<String>,
    /// Kind of payload
    content_type: ContentType,
    /// The payload: text, or a URI for image and video
    content: String,
    /// Free-form caller metadata, not consulted by the engine
    #[serde(default)]
    metadata: Option<HashMap<String, serde_json::Value>>,
}

impl ModerationContext {
    /// Create a context for the given payload.
    pub fn new(content_type: ContentType, content: impl Into<String>) -> Self {
        Self {
            user_id: None,
            content_type,
            content: content.into(),
            metadata: None,
        }
    }
}
