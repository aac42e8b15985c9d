//! Error wrapper for callers that prefer failing on blocked content.

use crate::{ModerationResult, Severity, SuggestedAction, Violation};

const GENERIC_BLOCK_MESSAGE: &str = "This content cannot be used because it violates our content guidelines.";

/// Blocked content, carrying the violations that caused the block.
///
/// The engine never returns this itself; presentation code builds it from a
/// [`ModerationResult`] when it wants `?` to abort on a block.
///
/// # Examples
///
/// ```
/// use vigil_core::{ContentBlocked, ModerationResult};
///
/// assert!(ContentBlocked::from_result(&ModerationResult::allow()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Content blocked ({} violation(s)): {}", violations.len(), message_for(violations))]
pub struct ContentBlocked {
    violations: Vec<Violation>,
}

impl ContentBlocked {
    /// Wrap the violations of a blocking verdict; `None` unless the action is block.
    pub fn from_result(result: &ModerationResult) -> Option<Self> {
        (*result.suggested_action() == SuggestedAction::Block).then(|| Self {
            violations: result.violations().clone(),
        })
    }

    /// Convert a verdict into `Ok(())` or this error.
    pub fn check(result: &ModerationResult) -> Result<(), Self> {
        match Self::from_result(result) {
            Some(blocked) => Err(blocked),
            None => Ok(()),
        }
    }

    /// The violations behind the block.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Highest severity among the violations.
    pub fn dominant_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| *v.severity()).max()
    }

    /// Message for end users: the first violation's suggestion.
    pub fn user_message(&self) -> &str {
        message_for(&self.violations)
    }
}

fn message_for(violations: &[Violation]) -> &str {
    violations
        .first()
        .map(|v| v.suggestion().as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(GENERIC_BLOCK_MESSAGE)
}
