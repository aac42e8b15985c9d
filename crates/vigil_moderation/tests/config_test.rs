//! Tests for loading and applying moderation options.

use std::collections::HashMap;
use std::io::Write;
use vigil_core::{ContentType, ModerationContext, SuggestedAction, ViolationType};
use vigil_error::{ConfigErrorKind, VigilErrorKind, VigilResult};
use vigil_moderation::{ModerationOptions, ModerationService, ValidationLimits};

const OPTIONS: &str = r#"
[suggestion_messages]
spam = "Keep it short and ad-free."

[validation_limits]
max_text_length = 20
max_uri_length = 40
video_protocols = ["https"]

[[custom_rules]]
id = "no-phone"
name = "Phone numbers"
content_types = ["text", "voice"]
severity = "medium"
violation_type = "personal_info"
patterns = ['\d{3}-\d{4}']
"#;

fn config_kind(result: VigilResult<()>) -> ConfigErrorKind {
    match result.unwrap_err().kind() {
        VigilErrorKind::Config(err) => err.kind.clone(),
        other => panic!("Expected config error, got {other}"),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_empty_options_are_valid() {
    assert!(ModerationOptions::new().validate().is_ok());
    let parsed = ModerationOptions::from_toml_str("").expect("Empty document parses");
    assert!(parsed.validate().is_ok());
}

#[test]
fn test_zero_limit_rejected() {
    let options = ModerationOptions::new()
        .with_validation_limits(ValidationLimits::new().with_max_uri_length(0usize));
    assert_eq!(
        config_kind(options.validate()),
        ConfigErrorKind::InvalidLimit {
            field: "max_uri_length".to_string(),
            value: 0
        }
    );
}

#[test]
fn test_bad_protocol_rejected() {
    let limits = ValidationLimits::new()
        .with_video_protocols(vec!["https".to_string(), "3gp".to_string()]);
    assert_eq!(
        config_kind(limits.validate()),
        ConfigErrorKind::InvalidProtocol("3gp".to_string())
    );
}

#[test]
fn test_trailing_colon_accepted() {
    let limits = ValidationLimits::new().with_image_protocols(vec!["https:".to_string()]);
    assert!(limits.validate().is_ok());
}

#[test]
fn test_parse_error_is_config_error() {
    let err = ModerationOptions::from_toml_str("validation_limits = 3").unwrap_err();
    match err.kind() {
        VigilErrorKind::Config(config) => {
            assert!(matches!(config.kind, ConfigErrorKind::TomlParse(_)))
        }
        other => panic!("Expected config error, got {other}"),
    }
}

// ============================================================================
// Loading and Applying
// ============================================================================

#[test]
fn test_load_options_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    file.write_all(OPTIONS.as_bytes()).expect("Write options");

    let options = ModerationOptions::from_file(file.path()).expect("Valid options");
    let limits = options.validation_limits().as_ref().expect("Limits present");
    assert_eq!(*limits.max_text_length(), Some(20));
    assert_eq!(*limits.max_voice_text_length(), None);
    assert_eq!(options.custom_rules().as_ref().map(Vec::len), Some(1));
    assert_eq!(
        options
            .suggestion_messages()
            .as_ref()
            .and_then(|m| m.get(&ViolationType::Spam))
            .map(String::as_str),
        Some("Keep it short and ad-free.")
    );
}

#[test]
fn test_missing_file_is_file_read_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = ModerationOptions::from_file(dir.path().join("absent.toml")).unwrap_err();
    match err.kind() {
        VigilErrorKind::Config(config) => {
            assert!(matches!(config.kind, ConfigErrorKind::FileRead(_)))
        }
        other => panic!("Expected config error, got {other}"),
    }
}

#[test]
fn test_configure_applies_everything() {
    let options = ModerationOptions::from_toml_str(OPTIONS).expect("Valid options");
    let mut service = ModerationService::default();
    service.configure(&options).expect("Configured");

    assert_eq!(service.text().max_length(), 20);
    assert_eq!(service.image().max_uri_length(), 40);
    assert_eq!(service.video().max_uri_length(), 40);
    assert!(service.video().allowed_protocols().contains("https"));
    assert!(!service.video().allowed_protocols().contains("http"));

    let too_long = service.moderate_sync(&ModerationContext::new(
        ContentType::Text,
        "this sentence is well over twenty characters",
    ));
    assert_eq!(too_long.violations()[0].rule_id(), "too-long");
    assert_eq!(too_long.violations()[0].suggestion(), "Keep it short and ad-free.");

    let phone = service.moderate_sync(&ModerationContext::new(ContentType::Voice, "call 555-1234"));
    assert_eq!(phone.violations()[0].rule_id(), "no-phone");
    assert_eq!(*phone.suggested_action(), SuggestedAction::Warn);
}

#[test]
fn test_configure_is_idempotent() {
    let options = ModerationOptions::from_toml_str(OPTIONS).expect("Valid options");
    let mut service = ModerationService::default();
    service.configure(&options).expect("Configured");
    let rules = service.registry().get_rules();

    service.configure(&options).expect("Configured again");
    assert_eq!(service.registry().get_rules(), rules);
    assert_eq!(service.text().max_length(), 20);
}

#[test]
fn test_invalid_options_change_nothing() {
    let options = ModerationOptions::new()
        .with_suggestion_messages(HashMap::from([(
            ViolationType::Spam,
            "Changed".to_string(),
        )]))
        .with_validation_limits(
            ValidationLimits::new()
                .with_max_text_length(50usize)
                .with_image_protocols(vec!["not a scheme".to_string()]),
        );
    let mut service = ModerationService::default();

    let err = service.configure(&options).unwrap_err();
    assert!(matches!(err.kind(), VigilErrorKind::Config(_)));
    assert_eq!(service.text().max_length(), vigil_moderation::DEFAULT_MAX_TEXT_LENGTH);
    assert!(service.image().allowed_protocols().contains("data"));
}

#[test]
fn test_invalid_custom_rule_rejected() {
    let options = ModerationOptions::from_toml_str(
        r#"
[[custom_rules]]
id = "nowhere"
name = "Applies to nothing"
content_types = []
severity = "low"
violation_type = "spam"
"#,
    )
    .expect("Parses");
    let mut service = ModerationService::default();

    let err = service.configure(&options).unwrap_err();
    match err.kind() {
        VigilErrorKind::Config(config) => {
            assert!(matches!(config.kind, ConfigErrorKind::InvalidRule(_)))
        }
        other => panic!("Expected config error, got {other}"),
    }
    assert!(service.registry().is_empty());
}
