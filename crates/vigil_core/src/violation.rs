//! Concrete findings produced by moderators.

use crate::{ModerationRule, Severity, ViolationType};
use serde::{Deserialize, Serialize};

/// Maximum number of characters of offending content kept as context.
pub const CONTEXT_MAX_CHARS: usize = 100;

/// Sentinel `matched_pattern` for structural violations not tied to a pattern.
pub const VALIDATION_SENTINEL: &str = "validation";

/// Bounded prefix of `content` suitable for a violation's context.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn excerpt(content: &str) -> String {
    content.chars().take(CONTEXT_MAX_CHARS).collect()
}

/// One concrete rule or structural failure.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct Violation {
    /// Id of the originating rule or structural check
    rule_id: String,
    /// Name of the originating rule or structural check
    rule_name: String,
    /// Category of the finding
    violation_type: ViolationType,
    /// Severity of the finding
    severity: Severity,
    /// Literal matched text, or [`VALIDATION_SENTINEL`]
    matched_pattern: String,
    /// Excerpt of the offending content
    context: String,
    /// Human-readable remediation
    suggestion: String,
}

impl Violation {
    /// Violation raised by a rule whose pattern matched.
    pub fn from_rule(
        rule: &ModerationRule,
        matched_text: impl Into<String>,
        content: &str,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(
            rule.id().clone(),
            rule.name().clone(),
            *rule.violation_type(),
            *rule.severity(),
            matched_text.into(),
            excerpt(content),
            suggestion.into(),
        )
    }

    /// Violation raised directly by a moderator's structural or security check.
    ///
    /// These always carry [`Severity::High`].
    pub fn structural(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        violation_type: ViolationType,
        matched_pattern: impl Into<String>,
        content: &str,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(
            rule_id.into(),
            rule_name.into(),
            violation_type,
            Severity::High,
            matched_pattern.into(),
            excerpt(content),
            suggestion.into(),
        )
    }
}
