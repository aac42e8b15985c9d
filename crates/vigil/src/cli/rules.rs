//! Rules command handler.

use super::OutputFormat;
use vigil_core::{ContentType, ModerationRule};
use vigil_moderation::ModerationService;

/// Handles the rules command.
pub fn handle_rules_command(
    service: &ModerationService,
    content_type: Option<ContentType>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rules = match content_type {
        Some(content_type) => service.registry().get_rules_by_content_type(content_type),
        None => service.registry().get_rules(),
    };

    match format {
        OutputFormat::Human => output_human(&rules),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
    }
    Ok(())
}

fn output_human(rules: &[ModerationRule]) {
    if rules.is_empty() {
        println!("No rules registered");
        return;
    }
    for rule in rules {
        let types = rule
            .content_types()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let status = if rule.is_enabled() { "" } else { " (disabled)" };
        println!(
            "{} - {} [{} {}] ({}){}",
            rule.id(),
            rule.name(),
            rule.severity(),
            rule.violation_type(),
            types,
            status
        );
        for pattern in rule.patterns() {
            println!("    {}", pattern);
        }
    }
}
