//! Core data types for the Vigil content moderation engine.
//!
//! This crate provides the data model shared by the matcher, the
//! moderators and the orchestrating service.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod blocked;
mod content_type;
mod context;
mod result;
mod rule;
mod severity;
mod violation;

pub use blocked::ContentBlocked;
pub use content_type::ContentType;
pub use context::ModerationContext;
pub use result::{ModerationResult, ModeratorOutcome};
pub use rule::{ModerationRule, ModerationRuleBuilder, ModerationRuleBuilderError, RulePatch};
pub use severity::{Severity, SuggestedAction, ViolationType};
pub use violation::{CONTEXT_MAX_CHARS, VALIDATION_SENTINEL, Violation, excerpt};
