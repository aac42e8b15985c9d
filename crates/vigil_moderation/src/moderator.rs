//! Contract shared by the content-type moderators.
//!
//! Every moderator runs structural validation first and stops at the first
//! failure with a single high-severity violation. Text and voice then
//! evaluate the registry's rules for their content type.

use crate::{RuleRegistry, SuggestionResolver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use vigil_core::{
    ContentType, ModeratorOutcome, VALIDATION_SENTINEL, Violation, ViolationType,
};
use vigil_security::{PatternMatcher, PromptInjectionGuard};

/// One moderator per content type.
pub trait ContentModerator: Send + Sync + std::fmt::Debug {
    /// The content type this moderator handles.
    fn content_type(&self) -> ContentType;

    /// Validate and evaluate one payload.
    fn moderate(&self, content: &str) -> ModeratorOutcome;

    /// Replace the per-violation-type suggestion overrides.
    fn set_suggestion_messages(&mut self, messages: HashMap<ViolationType, String>);
}

/// Evaluates the registry's rules for one content type.
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    registry: Arc<RuleRegistry>,
    matcher: Arc<PatternMatcher>,
}

impl RuleEvaluator {
    /// Create an evaluator over a shared registry and matcher.
    pub fn new(registry: Arc<RuleRegistry>, matcher: Arc<PatternMatcher>) -> Self {
        Self { registry, matcher }
    }

    /// One violation per enabled rule with a matching pattern.
    ///
    /// Patterns are tried in order and the first match is reported.
    pub fn evaluate(
        &self,
        content_type: ContentType,
        content: &str,
        suggestions: &SuggestionResolver,
    ) -> Vec<Violation> {
        let rules = self.registry.get_rules_by_content_type(content_type);
        debug!(rules = rules.len(), %content_type, "Evaluating rules");
        rules
            .iter()
            .filter_map(|rule| {
                let found = self.matcher.first_match(content, rule.patterns())?;
                debug!(rule_id = %rule.id(), "Rule matched");
                Some(Violation::from_rule(
                    rule,
                    found.matched_text().clone().unwrap_or_default(),
                    content,
                    suggestions.resolve(*rule.violation_type()),
                ))
            })
            .collect()
    }
}

/// Rejects blank text.
pub(crate) fn check_empty(
    content: &str,
    rule_id: &str,
    suggestions: &SuggestionResolver,
) -> Option<Violation> {
    content.trim().is_empty().then(|| {
        Violation::structural(
            rule_id,
            "Empty content",
            ViolationType::Spam,
            VALIDATION_SENTINEL,
            content,
            suggestions.resolve_or(ViolationType::Spam, "Please provide some content."),
        )
    })
}

/// Rejects text longer than `max_length` characters.
pub(crate) fn check_length(
    content: &str,
    max_length: usize,
    suggestions: &SuggestionResolver,
) -> Option<Violation> {
    let length = content.chars().count();
    (length > max_length).then(|| {
        Violation::structural(
            "too-long",
            "Content too long",
            ViolationType::Spam,
            VALIDATION_SENTINEL,
            content,
            suggestions.resolve_or(
                ViolationType::Spam,
                &format!("Please shorten your content to at most {max_length} characters."),
            ),
        )
    })
}

/// Rejects instruction-override attempts.
pub(crate) fn check_injection(
    guard: &PromptInjectionGuard,
    content: &str,
    suggestions: &SuggestionResolver,
) -> Option<Violation> {
    let finding = guard.check(content)?;
    debug!(layer = %finding.layer(), "Prompt injection detected");
    Some(Violation::structural(
        "prompt-injection",
        "Prompt injection",
        ViolationType::DangerousContent,
        finding.matched().clone(),
        content,
        suggestions.resolve_or(
            ViolationType::DangerousContent,
            "Please describe the content you want without instructions aimed at the system.",
        ),
    ))
}
