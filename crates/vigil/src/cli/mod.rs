//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the vigil binary.

mod check;
mod commands;
mod rules;

pub use check::{exit_code_for, handle_check_command};
pub use commands::{Cli, Commands, OutputFormat};
pub use rules::handle_rules_command;

use std::path::Path;
use tracing::info;
use vigil_moderation::{ModerationOptions, ModerationService};

/// Build a moderation service, applying the configuration file if given.
pub fn build_service(config: Option<&Path>) -> anyhow::Result<ModerationService> {
    let mut service = ModerationService::default();
    if let Some(path) = config {
        info!(config = %path.display(), "Loading moderation options");
        let options = ModerationOptions::from_file(path)?;
        service.configure(&options)?;
    }
    Ok(service)
}
