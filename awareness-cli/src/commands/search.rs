//! Search command - total result count per term.

use anyhow::Result;
use awareness_tracker::{CountTracker, TrackerError};
use clap::Args;
use tracing::info;

use super::common::{self, ApiArgs, BatchArgs, TermsArgs};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub terms: TermsArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli) -> Result<ExitCode> {
    let settings = common::load_settings(cli).await?;
    let terms = common::resolve_terms(&args.terms).await?;
    let config = common::config_builder(&args.api, cli, &settings)?.build()?;

    info!(terms = terms.len(), "Searching");

    let mut tracker = CountTracker::connect(&config).await?;
    let mut confirm = common::confirmation(&args.batch, cli);

    let Some(mut outcome) = tracker.run(&terms, confirm.as_mut()).await? else {
        if !cli.quiet {
            eprintln!("Search cancelled.");
        }
        return Ok(ExitCode::Cancelled);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for (term, report) in outcome.results.iter() {
                println!("{}", formatter.format_count(term, report));
            }
            if !outcome.failures.is_empty() && !cli.quiet {
                eprintln!("{}", formatter.format_failures(&outcome.failures));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&outcome.results)?);
            if !outcome.failures.is_empty() && !cli.quiet {
                eprintln!("{}", formatter.format_failures(&outcome.failures)?);
            }
        }
    }

    common::write_results(args.batch.output.as_deref(), &outcome.results).await?;

    if let Some(e) = outcome.interrupted.take() {
        if !cli.quiet {
            eprintln!("Batch stopped early, {} of {} terms done.", outcome.results.len(), terms.len());
        }
        return Err(TrackerError::from(e).into());
    }
    Ok(ExitCode::Success)
}
