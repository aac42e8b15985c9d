//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vigil_core::ContentType;

/// Deterministic content moderation.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(about = "Moderate text, image, video and voice content")]
#[command(version)]
pub struct Cli {
    /// Moderation options file (TOML)
    #[arg(short, long, global = true, env = "VIGIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Moderate one piece of content.
    ///
    /// Exits 0 when allowed, 2 on a warning and 1 when blocked.
    Check {
        /// Content type: text, image, video or voice
        #[arg(short = 't', long = "type", default_value = "text")]
        content_type: ContentType,

        /// Submitting user id, recorded in logs
        #[arg(short, long)]
        user: Option<String>,

        /// The content, or `-` to read it from stdin
        content: String,
    },

    /// List the registered rules.
    Rules {
        /// Only rules applying to this content type
        #[arg(short = 't', long = "type")]
        content_type: Option<ContentType>,
    },
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON document
    Json,
}
