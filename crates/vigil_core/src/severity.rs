//! Severity, violation categories and recommended actions.

use serde::{Deserialize, Serialize};

/// Ordinal rank of a violation: low < medium < high < critical.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    /// Minor issue
    Low,
    /// Noticeable issue
    Medium,
    /// Serious issue, content is blocked
    High,
    /// Severe issue, content is blocked
    Critical,
}

impl Severity {
    /// Whether a violation of this severity forces a block.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

/// Closed set of categories describing what kind of problem was found.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationType {
    /// Sexual or otherwise explicit material
    ExplicitContent,
    /// Violent or gory material
    Violence,
    /// Attacks on protected groups
    HateSpeech,
    /// Targeted abuse of individuals
    Harassment,
    /// Facilitation of crimes
    IllegalActivity,
    /// Unsolicited or malformed bulk content
    Spam,
    /// Infringement of intellectual property
    Copyright,
    /// Exposure of personal data
    PersonalInfo,
    /// Content that endangers users or the system
    DangerousContent,
}

/// The engine's recommendation for a piece of content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuggestedAction {
    /// Let the content through
    Allow,
    /// Let the content through with a warning
    Warn,
    /// Refuse the content
    Block,
}
