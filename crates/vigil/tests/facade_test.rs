//! Tests for the re-exporting facade with a configured service.

use std::io::Write;

#[test]
fn test_facade_moderates_with_configured_rules() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    writeln!(
        file,
        r#"
[validation_limits]
image_protocols = ["https"]

[[custom_rules]]
id = "crypto"
name = "Crypto giveaways"
content_types = ["text"]
severity = "critical"
violation_type = "spam"
patterns = ['(?:btc|eth)\s+giveaway']
"#
    )
    .expect("Write config");

    let options = vigil::ModerationOptions::from_file(file.path()).expect("Valid options");
    let mut service = vigil::ModerationService::default();
    service.configure(&options).expect("Configured");

    let result = service.moderate_sync(&vigil::ModerationContext::new(
        vigil::ContentType::Text,
        "Huge BTC giveaway today",
    ));
    assert_eq!(*result.suggested_action(), vigil::SuggestedAction::Block);
    assert_eq!(*result.confidence(), 0.5);
    assert!(!service.is_content_allowed_sync("http://x.io/a.png", vigil::ContentType::Image));
}
