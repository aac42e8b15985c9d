//! Moderator for text destined for speech synthesis.

use crate::config::DEFAULT_MAX_VOICE_TEXT_LENGTH;
use crate::moderator::{ContentModerator, RuleEvaluator, check_empty, check_injection, check_length};
use crate::SuggestionResolver;
use std::collections::HashMap;
use tracing::{debug, instrument};
use vigil_core::{ContentType, ModeratorOutcome, ViolationType};
use vigil_security::PromptInjectionGuard;

/// Moderates voice text: emptiness, length, prompt injection, then rules.
///
/// Markup is not scanned; the text is spoken, never rendered.
#[derive(Debug, Clone)]
pub struct VoiceModerator {
    max_length: usize,
    suggestions: SuggestionResolver,
    rules: RuleEvaluator,
    injection: PromptInjectionGuard,
}

impl VoiceModerator {
    /// Create a voice moderator with the default length limit.
    pub fn new(rules: RuleEvaluator) -> Self {
        Self {
            max_length: DEFAULT_MAX_VOICE_TEXT_LENGTH,
            suggestions: SuggestionResolver::new(),
            rules,
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
}

impl ContentModerator for VoiceModerator {
    fn content_type(&self) -> ContentType {
        ContentType::Voice
    }

    #[instrument(skip_all, fields(content_len = content.len()))]
    fn moderate(&self, content: &str) -> ModeratorOutcome {
        let structural = check_empty(content, "empty-text", &self.suggestions)
            .or_else(|| check_length(content, self.max_length, &self.suggestions))
            .or_else(|| check_injection(&self.injection, content, &self.suggestions));
        if let Some(violation) = structural {
            debug!(rule_id = %violation.rule_id(), "Structural validation failed");
            return ModeratorOutcome::rejected(violation);
        }
        ModeratorOutcome::from_violations(self.rules.evaluate(
            ContentType::Voice,
            content,
            &self.suggestions,
        ))
    }

    fn set_suggestion_messages(&mut self, messages: HashMap<ViolationType, String>) {
        self.suggestions.set_overrides(messages);
    }
}
