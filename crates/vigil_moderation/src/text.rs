//! Moderator for plain text.

use crate::config::DEFAULT_MAX_TEXT_LENGTH;
use crate::moderator::{ContentModerator, RuleEvaluator, check_empty, check_injection, check_length};
use crate::SuggestionResolver;
use std::collections::HashMap;
use tracing::{debug, instrument};
use vigil_core::{ContentType, ModeratorOutcome, Violation, ViolationType};
use vigil_security::{MarkupScanner, PromptInjectionGuard};

/// Moderates text: emptiness, length, markup, prompt injection, then rules.
#[derive(Debug, Clone)]
pub struct TextModerator {
    max_length: usize,
    suggestions: SuggestionResolver,
    rules: RuleEvaluator,
    markup: MarkupScanner,
    injection: PromptInjectionGuard,
}

impl TextModerator {
    /// Create a text moderator with the default length limit.
    pub fn new(rules: RuleEvaluator) -> Self {
        Self {
            max_length: DEFAULT_MAX_TEXT_LENGTH,
            suggestions: SuggestionResolver::new(),
            rules,
            markup: MarkupScanner::new(),
            injection: PromptInjectionGuard::new(),
        }
    }

    /// Maximum accepted length in characters.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Set the maximum accepted length in characters.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
    }

    fn structural(&self, content: &str) -> Option<Violation> {
        check_empty(content, "empty-content", &self.suggestions)
            .or_else(|| check_length(content, self.max_length, &self.suggestions))
            .or_else(|| self.check_markup(content))
            .or_else(|| check_injection(&self.injection, content, &self.suggestions))
    }

    fn check_markup(&self, content: &str) -> Option<Violation> {
        let indicator = self.markup.scan(content)?;
        debug!(%indicator, "Malicious markup detected");
        Some(Violation::structural(
            "malicious-content",
            "Malicious markup",
            ViolationType::DangerousContent,
            indicator,
            content,
            self.suggestions.resolve_or(
                ViolationType::DangerousContent,
                "Please remove HTML, scripts and encoded markup from your content.",
            ),
        ))
    }
}

impl ContentModerator for TextModerator {
    fn content_type(&self) -> ContentType {
        ContentType::Text
    }

    #[instrument(skip_all, fields(content_len = content.len()))]
    fn moderate(&self, content: &str) -> ModeratorOutcome {
        if let Some(violation) = self.structural(content) {
            debug!(rule_id = %violation.rule_id(), "Structural validation failed");
            return ModeratorOutcome::rejected(violation);
        }
        ModeratorOutcome::from_violations(self.rules.evaluate(
            ContentType::Text,
            content,
            &self.suggestions,
        ))
    }

    fn set_suggestion_messages(&mut self, messages: HashMap<ViolationType, String>) {
        self.suggestions.set_overrides(messages);
    }
}
