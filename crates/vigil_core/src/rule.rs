//! Configurable detection rules.

use crate::{ContentType, Severity, ViolationType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use vigil_error::{RegistryError, RegistryErrorKind, RegistryResult};

/// A configurable detection rule.
///
/// A rule is evaluated only by moderators whose content type is listed in
/// `content_types`, and only while `enabled` is set. Patterns are tried in
/// order; the first one that matches produces the rule's single violation.
///
/// # Examples
///
/// ```
/// use vigil_core::{ContentType, ModerationRule, Severity, ViolationType};
///
/// let rule = ModerationRule::builder()
///     .id("free-money")
///     .name("Free money spam")
///     .content_type(ContentType::Text)
///     .severity(Severity::Medium)
///     .violation_type(ViolationType::Spam)
///     .pattern(r"free\s+money")
///     .build()
///     .unwrap();
///
/// assert!(rule.is_enabled());
/// assert!(rule.applies_to(ContentType::Text));
/// assert!(!rule.applies_to(ContentType::Voice));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ModerationRule {
    /// Unique identifier within a registry
    id: String,
    /// Human-readable name
    name: String,
    /// What the rule detects
    #[serde(default)]
    #[builder(default)]
    description: String,
    /// Content types the rule applies to (never empty once registered)
    #[builder(setter(each(name = "content_type")))]
    content_types: BTreeSet<ContentType>,
    /// Severity carried by every violation the rule produces
    severity: Severity,
    /// Category carried by every violation the rule produces
    violation_type: ViolationType,
    /// Ordered pattern strings
    #[serde(default)]
    #[builder(default, setter(each(name = "pattern", into)))]
    patterns: Vec<String>,
    /// Whether the rule participates in moderation
    #[serde(default = "default_enabled")]
    #[builder(default = "true")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ModerationRule {
    /// Returns a builder for constructing a rule.
    pub fn builder() -> ModerationRuleBuilder {
        ModerationRuleBuilder::default()
    }

    /// Whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the rule should be evaluated for the given content type.
    pub fn applies_to(&self, content_type: ContentType) -> bool {
        self.enabled && self.content_types.contains(&content_type)
    }

    /// Check the invariants a rule must satisfy before registration.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.id.trim().is_empty() {
            return Err(RegistryError::new(RegistryErrorKind::MissingId));
        }
        if self.name.trim().is_empty() {
            return Err(RegistryError::new(RegistryErrorKind::EmptyName(
                self.id.clone(),
            )));
        }
        if self.content_types.is_empty() {
            return Err(RegistryError::new(RegistryErrorKind::EmptyContentTypes(
                self.id.clone(),
            )));
        }
        Ok(())
    }

    /// Overwrite every field with the fields of `other`.
    ///
    /// Used when a rule is added under an id that already exists: the
    /// entry keeps its position in the registry and takes the new fields.
    pub fn merge(&mut self, other: ModerationRule) {
        *self = other;
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    ///
    /// The patch is refused (and `false` returned) when it would empty the
    /// content type set.
    pub fn apply(&mut self, patch: &RulePatch) -> bool {
        if patch
            .content_types
            .as_ref()
            .is_some_and(|types| types.is_empty())
        {
            return false;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(content_types) = &patch.content_types {
            self.content_types = content_types.clone();
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(violation_type) = patch.violation_type {
            self.violation_type = violation_type;
        }
        if let Some(patterns) = &patch.patterns {
            self.patterns = patterns.clone();
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        true
    }
}

/// Partial update for an existing rule. The id is never patched.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option)]
pub struct RulePatch {
    /// Replacement name
    #[serde(default)]
    name: Option<String>,
    /// Replacement description
    #[serde(default)]
    description: Option<String>,
    /// Replacement content type set
    #[serde(default)]
    content_types: Option<BTreeSet<ContentType>>,
    /// Replacement severity
    #[serde(default)]
    severity: Option<Severity>,
    /// Replacement violation category
    #[serde(default)]
    violation_type: Option<ViolationType>,
    /// Replacement pattern list
    #[serde(default)]
    patterns: Option<Vec<String>>,
    /// Replacement enabled flag
    #[serde(default)]
    enabled: Option<bool>,
}

impl RulePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }
}
