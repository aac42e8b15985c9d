//! Vigil command-line interface.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before clap reads VIGIL_CONFIG
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();
    let service = cli::build_service(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            content_type,
            user,
            content,
        } => {
            let action =
                cli::handle_check_command(&service, content_type, user, &content, cli.format)
                    .await?;
            Ok(ExitCode::from(cli::exit_code_for(action)))
        }
        Commands::Rules { content_type } => {
            cli::handle_rules_command(&service, content_type, cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
