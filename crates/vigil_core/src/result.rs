//! Moderation verdicts.

use crate::{Severity, SuggestedAction, Violation};
use serde::{Deserialize, Serialize};

/// What a single content-type moderator reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModeratorOutcome {
    /// Whether the moderator found nothing
    is_allowed: bool,
    /// Findings in detection order
    violations: Vec<Violation>,
}

impl ModeratorOutcome {
    /// Outcome for a list of findings; allowed exactly when the list is empty.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_allowed: violations.is_empty(),
            violations,
        }
    }

    /// Outcome with no findings.
    pub fn allowed() -> Self {
        Self::from_violations(Vec::new())
    }

    /// Outcome for a single structural rejection.
    pub fn rejected(violation: Violation) -> Self {
        Self::from_violations(vec![violation])
    }

    /// Consume the outcome, returning its findings.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Final verdict for one moderation call.
///
/// `confidence` is the engine's confidence that it identified a problem:
/// exactly 1.0 when there are no violations, otherwise derived from the
/// severities present.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct ModerationResult {
    /// Whether the content may be used
    is_allowed: bool,
    /// Findings in detection order
    violations: Vec<Violation>,
    /// Confidence in [0, 1]
    confidence: f64,
    /// Recommended action
    suggested_action: SuggestedAction,
}

impl ModerationResult {
    /// The verdict for clean content.
    pub fn allow() -> Self {
        Self::new(true, Vec::new(), 1.0, SuggestedAction::Allow)
    }

    /// Whether the content may be used.
    pub fn allowed(&self) -> bool {
        self.is_allowed
    }

    /// Highest severity among the violations, if any.
    pub fn dominant_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| *v.severity()).max()
    }
}
