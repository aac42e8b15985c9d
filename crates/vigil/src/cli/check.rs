//! Check command handler.

use super::OutputFormat;
use std::io::Read;
use tracing::info;
use vigil_core::{ContentType, ModerationContext, ModerationResult, SuggestedAction};
use vigil_moderation::ModerationService;

/// Process exit code for a suggested action.
pub fn exit_code_for(action: SuggestedAction) -> u8 {
    match action {
        SuggestedAction::Allow => 0,
        SuggestedAction::Block => 1,
        SuggestedAction::Warn => 2,
    }
}

/// Handles the check command.
#[tracing::instrument(skip_all, fields(content_type = %content_type))]
pub async fn handle_check_command(
    service: &ModerationService,
    content_type: ContentType,
    user: Option<String>,
    content: &str,
    format: OutputFormat,
) -> anyhow::Result<SuggestedAction> {
    let content = if content == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer.trim_end_matches(['\r', '\n']).to_string()
    } else {
        content.to_string()
    };

    let mut context = ModerationContext::new(content_type, content);
    if let Some(user) = user {
        context = context.with_user_id(user);
    }

    let result = service.moderate(&context).await;
    info!(action = %result.suggested_action(), "Check complete");

    match format {
        OutputFormat::Human => output_human(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(*result.suggested_action())
}

/// Outputs a result in human-readable format.
fn output_human(result: &ModerationResult) {
    let icon = match result.suggested_action() {
        SuggestedAction::Allow => "✅",
        SuggestedAction::Warn => "⚠️",
        SuggestedAction::Block => "❌",
    };
    println!(
        "{} {} (confidence {:.2})",
        icon,
        result.suggested_action(),
        result.confidence()
    );

    for (i, violation) in result.violations().iter().enumerate() {
        println!(
            "\n  {}. {} [{}, {}]",
            i + 1,
            violation.rule_name(),
            violation.violation_type(),
            violation.severity()
        );
        println!("     rule: {}", violation.rule_id());
        println!("     matched: {}", violation.matched_pattern());
        println!("     💡 {}", violation.suggestion());
    }
}
