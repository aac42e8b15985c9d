//! Tests for the moderation data model.

use std::collections::BTreeSet;
use vigil_core::*;
use vigil_error::RegistryErrorKind;

fn spam_rule() -> ModerationRule {
    ModerationRule::builder()
        .id("spam")
        .name("Spam")
        .content_type(ContentType::Text)
        .severity(Severity::Medium)
        .violation_type(ViolationType::Spam)
        .pattern(r"free\s+money")
        .build()
        .expect("Valid rule")
}

fn violation(severity: Severity, suggestion: &str) -> Violation {
    Violation::new(
        "rule".to_string(),
        "Rule".to_string(),
        ViolationType::Harassment,
        severity,
        VALIDATION_SENTINEL.to_string(),
        String::new(),
        suggestion.to_string(),
    )
}

// ============================================================================
// Severity and Tags
// ============================================================================

#[test]
fn test_severity_ordering() {
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::Medium < Severity::High);
    assert!(Severity::High < Severity::Critical);
}

#[test]
fn test_blocking_severities() {
    assert!(!Severity::Low.is_blocking());
    assert!(!Severity::Medium.is_blocking());
    assert!(Severity::High.is_blocking());
    assert!(Severity::Critical.is_blocking());
}

#[test]
fn test_violation_type_names() {
    assert_eq!(ViolationType::DangerousContent.to_string(), "dangerous_content");
    assert_eq!(
        "personal_info".parse::<ViolationType>().ok(),
        Some(ViolationType::PersonalInfo)
    );
}

#[test]
fn test_unknown_content_type_tag() {
    assert_eq!(ContentType::from_tag("VOICE"), ContentType::Voice);
    assert_eq!(ContentType::from_tag("hologram"), ContentType::Unknown);
    let parsed: ContentType = serde_json::from_str("\"hologram\"").expect("Falls back");
    assert_eq!(parsed, ContentType::Unknown);
    assert!(ContentType::Image.is_uri());
    assert!(!ContentType::Voice.is_uri());
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_builder_defaults() {
    let rule = spam_rule();
    assert!(rule.is_enabled());
    assert!(rule.description().is_empty());
    assert_eq!(rule.patterns().len(), 1);
}

#[test]
fn test_builder_requires_content_types() {
    let result = ModerationRule::builder()
        .id("spam")
        .name("Spam")
        .severity(Severity::Low)
        .violation_type(ViolationType::Spam)
        .build();
    assert!(result.is_err());
}

#[test]
fn test_disabled_rule_does_not_apply() {
    let mut rule = spam_rule();
    assert!(rule.apply(&RulePatch::new().with_enabled(false)));
    assert!(!rule.applies_to(ContentType::Text));
}

#[test]
fn test_patch_leaves_unset_fields() {
    let mut rule = spam_rule();
    assert!(rule.apply(&RulePatch::new().with_severity(Severity::Critical)));
    assert_eq!(*rule.severity(), Severity::Critical);
    assert_eq!(rule.name(), "Spam");
    assert_eq!(rule.patterns(), &vec![r"free\s+money".to_string()]);
}

#[test]
fn test_patch_refuses_empty_content_types() {
    let mut rule = spam_rule();
    assert!(!rule.apply(&RulePatch::new().with_content_types(BTreeSet::new())));
    assert!(rule.applies_to(ContentType::Text));
}

#[test]
fn test_validate_rejects_blank_id() {
    let rule = ModerationRule::builder()
        .id("  ")
        .name("Blank")
        .content_type(ContentType::Text)
        .severity(Severity::Low)
        .violation_type(ViolationType::Spam)
        .build()
        .expect("Builder accepts it");
    let err = rule.validate().unwrap_err();
    assert_eq!(err.kind(), &RegistryErrorKind::MissingId);
}

#[test]
fn test_deserialize_rule_from_toml() {
    let rule: ModerationRule = toml::from_str(
        r#"
        id = "pii-email"
        name = "Email address"
        content_types = ["text", "voice"]
        severity = "high"
        violation_type = "personal_info"
        patterns = ['[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}']
        "#,
    )
    .expect("Valid TOML");
    assert!(rule.is_enabled());
    assert!(rule.applies_to(ContentType::Voice));
    assert_eq!(*rule.violation_type(), ViolationType::PersonalInfo);
}

// ============================================================================
// Violations
// ============================================================================

#[test]
fn test_excerpt_is_bounded() {
    let long = "x".repeat(250);
    assert_eq!(excerpt(&long).chars().count(), CONTEXT_MAX_CHARS);
    assert_eq!(excerpt("short"), "short");
}

#[test]
fn test_excerpt_respects_char_boundaries() {
    let cut = excerpt(&"é".repeat(150));
    assert_eq!(cut.chars().count(), CONTEXT_MAX_CHARS);
    assert_eq!(cut.len(), CONTEXT_MAX_CHARS * 2);
}

#[test]
fn test_structural_violation_is_high() {
    let violation = Violation::structural(
        "too-long",
        "Content too long",
        ViolationType::Spam,
        VALIDATION_SENTINEL,
        "abc",
        "Shorten it.",
    );
    assert_eq!(*violation.severity(), Severity::High);
    assert_eq!(violation.matched_pattern(), VALIDATION_SENTINEL);
    assert_eq!(violation.context(), "abc");
}

// ============================================================================
// Blocked Content
// ============================================================================

#[test]
fn test_blocked_from_block_verdict() {
    let result = ModerationResult::new(
        false,
        vec![
            violation(Severity::Low, "Be kinder."),
            violation(Severity::Critical, "Remove threats."),
        ],
        0.625,
        SuggestedAction::Block,
    );
    assert_eq!(result.dominant_severity(), Some(Severity::Critical));
    let blocked = ContentBlocked::check(&result).unwrap_err();
    assert_eq!(blocked.dominant_severity(), Some(Severity::Critical));
    assert_eq!(blocked.user_message(), "Be kinder.");
    assert_eq!(
        blocked.to_string(),
        "Content blocked (2 violation(s)): Be kinder."
    );
}

#[test]
fn test_warn_verdict_is_not_blocked() {
    let result = ModerationResult::new(
        false,
        vec![violation(Severity::Medium, "Tone it down.")],
        0.25,
        SuggestedAction::Warn,
    );
    assert!(ContentBlocked::check(&result).is_ok());
    assert!(ContentBlocked::from_result(&ModerationResult::allow()).is_none());
}

#[test]
fn test_generic_message_without_suggestion() {
    let result = ModerationResult::new(
        false,
        vec![violation(Severity::High, "")],
        0.375,
        SuggestedAction::Block,
    );
    let blocked = ContentBlocked::from_result(&result).expect("Blocked");
    assert!(blocked.user_message().contains("content guidelines"));
    assert!(blocked.to_string().ends_with(blocked.user_message()));
}
