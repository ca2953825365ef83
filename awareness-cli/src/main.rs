// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Awareness CLI - track how prominently projects appear in web search.
//!
//! # Examples
//!
//! ```bash
//! # Total result counts for a few terms
//! awareness search -t "rust web framework" "rust orm"
//!
//! # Rank projects within the top 50 results of every term in a file
//! awareness rank -f terms.yaml -p axum actix rocket -n 50 -o ranks.json
//!
//! # Today's API usage
//! awareness usage
//!
//! # Effective settings, key masked
//! awareness config show
//! ```

mod commands;
mod output;
mod prompt;

use anyhow::Result;
use awareness_store::TermsError;
use awareness_tracker::TrackerError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, rank, search, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// Awareness CLI - search visibility tracking.
#[derive(Parser)]
#[command(name = "awareness")]
#[command(about = "Track how prominently projects appear in web search results")]
#[command(long_about = r#"
Awareness queries the Google Custom Search JSON API in batch and records
either the total result count of each term or the rank at which each
tracked project first appears.

Usage is counted in a local ledger. The first 100 queries of a day are
free; beyond that each query costs $0.005 and a batch that may leave the
free tier asks for confirmation first.

Examples:
  awareness search -t "rust orm"            # Result count
  awareness rank -f terms.txt -p diesel     # Project ranks
  awareness usage                           # Today's usage
  awareness --format json usage             # JSON output
"#)]
#[command(version)]
#[command(author = "Awareness Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of the default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Usage ledger file to use instead of the default.
    #[arg(long, global = true, value_name = "PATH")]
    pub ledger: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the total result count of each term.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Find the rank of each project in the results of each term.
    #[command(visible_alias = "r")]
    Rank(rank::RankArgs),

    /// Show today's API usage.
    #[command(visible_alias = "u")]
    Usage,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Cancelled at the cost confirmation.
    Cancelled = 2,
    /// The term list could not be loaded.
    TermsError = 3,
    /// The hard daily cap was reached.
    QuotaExceeded = 4,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        if error.downcast_ref::<TermsError>().is_some() {
            Self::TermsError
        } else if error
            .downcast_ref::<TrackerError>()
            .is_some_and(TrackerError::is_quota_exceeded)
        {
            Self::QuotaExceeded
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("awareness=debug,info")
        } else {
            EnvFilter::new("awareness=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<ExitCode> = match &cli.command {
        Commands::Search(args) => search::run(args, &cli).await,
        Commands::Rank(args) => rank::run(args, &cli).await,
        Commands::Usage => usage::run(&cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            ExitCode::for_error(&e)
        }
    };

    if code != ExitCode::Success {
        std::process::exit(code as i32);
    }
}
