//! Vigil: deterministic, rule-based content moderation.
//!
//! This crate re-exports the public API of the workspace crates so callers
//! can depend on a single crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vigil::{
//!     ContentType, ModerationContext, ModerationRule, ModerationService, RuleRegistry,
//!     Severity, SuggestedAction, ViolationType,
//! };
//!
//! let registry = Arc::new(RuleRegistry::new());
//! registry
//!     .add_rule(
//!         ModerationRule::builder()
//!             .id("free-money")
//!             .name("Free money spam")
//!             .content_type(ContentType::Text)
//!             .severity(Severity::Medium)
//!             .violation_type(ViolationType::Spam)
//!             .pattern(r"free\s+money")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let service = ModerationService::new(registry);
//! let result = service.moderate_sync(&ModerationContext::new(
//!     ContentType::Text,
//!     "claim your free money now",
//! ));
//! assert_eq!(*result.suggested_action(), SuggestedAction::Warn);
//! assert_eq!(*result.confidence(), 0.25);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use vigil_core::*;
pub use vigil_error::*;
pub use vigil_moderation::*;
pub use vigil_security::*;
