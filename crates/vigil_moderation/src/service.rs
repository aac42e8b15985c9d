//! The moderation orchestrator.

use crate::{
    ContentModerator, ImageModerator, ModerationOptions, RuleEvaluator, RuleRegistry,
    TextModerator, VideoModerator, VoiceModerator,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use vigil_core::{
    ContentType, ModerationContext, ModerationResult, Severity, SuggestedAction, Violation,
};
use vigil_error::VigilResult;
use vigil_security::PatternMatcher;

/// Weight a violation contributes to the confidence score.
fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 1.0,
        Severity::High => 0.75,
        Severity::Medium => 0.5,
        Severity::Low => 0.25,
    }
}

/// Confidence that moderation identified a problem.
///
/// Exactly 1.0 with no violations; otherwise half the summed severity
/// weights, capped at 1.0.
pub fn confidence_for(violations: &[Violation]) -> f64 {
    if violations.is_empty() {
        return 1.0;
    }
    let total: f64 = violations.iter().map(|v| severity_weight(*v.severity())).sum();
    (total / 2.0).min(1.0)
}

/// Block on any high or critical violation, warn on any other, else allow.
pub fn action_for(violations: &[Violation]) -> SuggestedAction {
    if violations.iter().any(|v| v.severity().is_blocking()) {
        SuggestedAction::Block
    } else if violations.is_empty() {
        SuggestedAction::Allow
    } else {
        SuggestedAction::Warn
    }
}

/// Single entry point for moderating content of any supported type.
///
/// Configure with [`configure`](Self::configure) at startup, then share the
/// service behind an `Arc`; moderation only needs `&self`.
///
/// # Examples
///
/// ```
/// use vigil_core::{ContentType, ModerationContext, SuggestedAction};
/// use vigil_moderation::ModerationService;
///
/// let service = ModerationService::default();
/// let result = service.moderate_sync(&ModerationContext::new(
///     ContentType::Image,
///     "https://example.com/cat.png",
/// ));
/// assert!(result.allowed());
/// assert_eq!(*result.suggested_action(), SuggestedAction::Allow);
/// ```
#[derive(Debug)]
pub struct ModerationService {
    registry: Arc<RuleRegistry>,
    matcher: Arc<PatternMatcher>,
    text: TextModerator,
    image: ImageModerator,
    video: VideoModerator,
    voice: VoiceModerator,
}

impl Default for ModerationService {
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::new()))
    }
}

impl ModerationService {
    /// Create a service over a shared registry with a fresh matcher.
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self::with_matcher(registry, Arc::new(PatternMatcher::new()))
    }

    /// Create a service over a shared registry and matcher.
    pub fn with_matcher(registry: Arc<RuleRegistry>, matcher: Arc<PatternMatcher>) -> Self {
        let rules = RuleEvaluator::new(Arc::clone(&registry), Arc::clone(&matcher));
        Self {
            text: TextModerator::new(rules.clone()),
            voice: VoiceModerator::new(rules),
            image: ImageModerator::new(),
            video: VideoModerator::new(),
            registry,
            matcher,
        }
    }

    /// The shared rule registry.
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// The shared pattern matcher, including its rejection diagnostics.
    pub fn matcher(&self) -> &Arc<PatternMatcher> {
        &self.matcher
    }

    /// The text moderator.
    pub fn text(&self) -> &TextModerator {
        &self.text
    }

    /// Mutable access to the text moderator.
    pub fn text_mut(&mut self) -> &mut TextModerator {
        &mut self.text
    }

    /// The image moderator.
    pub fn image(&self) -> &ImageModerator {
        &self.image
    }

    /// Mutable access to the image moderator.
    pub fn image_mut(&mut self) -> &mut ImageModerator {
        &mut self.image
    }

    /// The video moderator.
    pub fn video(&self) -> &VideoModerator {
        &self.video
    }

    /// Mutable access to the video moderator.
    pub fn video_mut(&mut self) -> &mut VideoModerator {
        &mut self.video
    }

    /// The voice moderator.
    pub fn voice(&self) -> &VoiceModerator {
        &self.voice
    }

    /// Mutable access to the voice moderator.
    pub fn voice_mut(&mut self) -> &mut VoiceModerator {
        &mut self.voice
    }

    fn moderator_for(&self, content_type: ContentType) -> Option<&dyn ContentModerator> {
        match content_type {
            ContentType::Text => Some(&self.text),
            ContentType::Image => Some(&self.image),
            ContentType::Video => Some(&self.video),
            ContentType::Voice => Some(&self.voice),
            ContentType::Unknown => None,
        }
    }

    /// Apply configuration.
    ///
    /// Everything is validated before anything changes. Suggestion overrides
    /// reach the text and voice moderators; custom rules merge into the
    /// registry by id, so repeated calls with the same options are no-ops.
    #[instrument(skip_all)]
    pub fn configure(&mut self, options: &ModerationOptions) -> VigilResult<()> {
        options.validate()?;

        if let Some(messages) = options.suggestion_messages() {
            self.text.set_suggestion_messages(messages.clone());
            self.voice.set_suggestion_messages(messages.clone());
            debug!(count = messages.len(), "Applied suggestion overrides");
        }

        if let Some(limits) = options.validation_limits() {
            if let Some(max) = limits.max_text_length() {
                self.text.set_max_length(*max);
            }
            if let Some(max) = limits.max_voice_text_length() {
                self.voice.set_max_length(*max);
            }
            if let Some(max) = limits.max_uri_length() {
                self.image.set_max_uri_length(*max);
                self.video.set_max_uri_length(*max);
            }
            if let Some(protocols) = limits.image_protocols() {
                self.image.set_allowed_protocols(protocols);
            }
            if let Some(protocols) = limits.video_protocols() {
                self.video.set_allowed_protocols(protocols);
            }
        }

        if let Some(rules) = options.custom_rules() {
            self.registry.add_rules(rules.iter().cloned())?;
        }

        info!(rules = self.registry.len(), "Moderation service configured");
        Ok(())
    }

    /// Moderate one piece of content.
    ///
    /// Never fails: unsafe content, bad patterns and unknown content types
    /// are all reported through the returned result.
    #[instrument(
        skip_all,
        fields(
            content_type = %context.content_type(),
            user_id = context.user_id().as_deref().unwrap_or("-"),
            content_len = context.content().len()
        )
    )]
    pub fn moderate_sync(&self, context: &ModerationContext) -> ModerationResult {
        let Some(moderator) = self.moderator_for(*context.content_type()) else {
            warn!("Unknown content type, allowing");
            return ModerationResult::allow();
        };

        let outcome = moderator.moderate(context.content());
        let violations = outcome.into_violations();
        let confidence = confidence_for(&violations);
        let action = action_for(&violations);
        debug!(
            violations = violations.len(),
            confidence,
            action = %action,
            "Moderation resolved"
        );
        ModerationResult::new(violations.is_empty(), violations, confidence, action)
    }

    /// Async form of [`moderate_sync`](Self::moderate_sync).
    ///
    /// The work is synchronous and never suspends.
    pub async fn moderate(&self, context: &ModerationContext) -> ModerationResult {
        self.moderate_sync(context)
    }

    /// Whether `content` of the given type would be allowed.
    pub fn is_content_allowed_sync(&self, content: &str, content_type: ContentType) -> bool {
        self.moderate_sync(&ModerationContext::new(content_type, content))
            .allowed()
    }

    /// Async form of [`is_content_allowed_sync`](Self::is_content_allowed_sync).
    pub async fn is_content_allowed(&self, content: &str, content_type: ContentType) -> bool {
        self.is_content_allowed_sync(content, content_type)
    }
}
