//! Remediation text attached to violations.
//!
//! Resolution runs through three tiers: the caller's override for the
//! violation type, then a fixed default sentence, then a generic fallback.

use std::collections::HashMap;
use vigil_core::ViolationType;

/// Sentence used when no better suggestion is known.
pub const GENERIC_SUGGESTION: &str = "Please revise your content to comply with our content guidelines.";

const DEFAULT_SUGGESTIONS: &[(ViolationType, &str)] = &[
    (
        ViolationType::ExplicitContent,
        "Please remove explicit or sexual content.",
    ),
    (
        ViolationType::Violence,
        "Please remove violent or graphic descriptions.",
    ),
    (
        ViolationType::HateSpeech,
        "Please remove language that attacks people based on who they are.",
    ),
    (
        ViolationType::Harassment,
        "Please remove content that targets or intimidates individuals.",
    ),
    (
        ViolationType::IllegalActivity,
        "Please remove content that promotes illegal activity.",
    ),
    (
        ViolationType::Spam,
        "Please remove promotional or repetitive content.",
    ),
    (
        ViolationType::Copyright,
        "Please avoid reproducing copyrighted material.",
    ),
    (
        ViolationType::PersonalInfo,
        "Please remove personal information such as emails, phone numbers or addresses.",
    ),
    (
        ViolationType::DangerousContent,
        "Please remove content that could be used to cause harm.",
    ),
];

/// The fixed default sentence for a violation type.
pub fn default_suggestion(violation_type: ViolationType) -> Option<&'static str> {
    DEFAULT_SUGGESTIONS
        .iter()
        .find(|(kind, _)| *kind == violation_type)
        .map(|(_, text)| *text)
}

/// Resolves suggestions, honoring caller overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionResolver {
    overrides: HashMap<ViolationType, String>,
}

impl SuggestionResolver {
    /// Create a resolver without overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the override table.
    pub fn set_overrides(&mut self, overrides: HashMap<ViolationType, String>) {
        self.overrides = overrides;
    }

    /// Current overrides.
    pub fn overrides(&self) -> &HashMap<ViolationType, String> {
        &self.overrides
    }

    /// Override, else the default sentence, else the generic fallback.
    pub fn resolve(&self, violation_type: ViolationType) -> String {
        self.resolve_with(violation_type, default_suggestion(violation_type))
    }

    /// Override, else `specific`, else the generic fallback.
    ///
    /// Structural checks use this with their own message as the middle tier.
    pub fn resolve_or(&self, violation_type: ViolationType, specific: &str) -> String {
        self.resolve_with(violation_type, Some(specific))
    }

    fn resolve_with(&self, violation_type: ViolationType, middle: Option<&str>) -> String {
        self.overrides
            .get(&violation_type)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
            .or(middle.filter(|text| !text.trim().is_empty()))
            .unwrap_or(GENERIC_SUGGESTION)
            .to_string()
    }
}
