//! Rule registry, moderators and the moderation service.
//!
//! [`ModerationService`] dispatches each [`ModerationContext`](vigil_core::ModerationContext)
//! to the moderator for its content type, then scores the violations and
//! picks an action. Text and voice moderators evaluate rules from a shared
//! [`RuleRegistry`]; image and video moderators validate URIs only.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod image;
mod moderator;
mod registry;
mod service;
mod suggestion;
mod text;
mod uri;
mod video;
mod voice;

pub use config::{
    DEFAULT_IMAGE_PROTOCOLS, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_MAX_URI_LENGTH,
    DEFAULT_MAX_VOICE_TEXT_LENGTH, DEFAULT_VIDEO_PROTOCOLS, ModerationOptions, ValidationLimits,
};
pub use image::ImageModerator;
pub use moderator::{ContentModerator, RuleEvaluator};
pub use registry::RuleRegistry;
pub use service::{ModerationService, action_for, confidence_for};
pub use suggestion::{GENERIC_SUGGESTION, SuggestionResolver, default_suggestion};
pub use text::TextModerator;
pub use uri::{UriPolicy, is_valid_scheme, scheme_of};
pub use video::VideoModerator;
pub use voice::VoiceModerator;
