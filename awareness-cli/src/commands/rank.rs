//! Rank command - first-occurrence rank of each project per term.

use anyhow::Result;
use awareness_tracker::{MAX_RESULTS_PER_TERM, RankTracker, TrackerError};
use clap::Args;
use tracing::info;

use super::common::{self, ApiArgs, BatchArgs, TermsArgs};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the rank command.
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Projects to look for (defaults to the settings file).
    #[arg(short = 'p', long, num_args = 1..)]
    pub projects: Vec<String>,

    /// Results to scan per term (at most 100) [default: 100].
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_results: Option<u32>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

/// Runs the rank command.
pub async fn run(args: &RankArgs, cli: &Cli) -> Result<ExitCode> {
    let settings = common::load_settings(cli).await?;
    let terms = common::resolve_terms(&args.terms).await?;

    let projects = if args.projects.is_empty() {
        settings.projects.clone()
    } else {
        common::clean_list(&args.projects)
    };
    if projects.is_empty() {
        anyhow::bail!("No projects to track: pass --projects or add projects to the settings file");
    }

    let max_results = args
        .num_results
        .or(settings.max_results)
        .unwrap_or(MAX_RESULTS_PER_TERM);

    let config = common::config_builder(&args.api, cli, &settings)?
        .projects(&projects)
        .max_results_per_term(max_results)
        .build()?;

    info!(
        terms = terms.len(),
        projects = config.projects().len(),
        max_results = config.max_results_per_term(),
        "Ranking"
    );

    let mut tracker = RankTracker::connect(&config).await?;
    let mut confirm = common::confirmation(&args.batch, cli);

    let Some(mut outcome) = tracker.run(&terms, confirm.as_mut()).await? else {
        if !cli.quiet {
            eprintln!("Rank search cancelled.");
        }
        return Ok(ExitCode::Cancelled);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let blocks: Vec<String> = outcome
                .results
                .iter()
                .map(|(term, report)| {
                    formatter.format_rank(term, report, config.max_results_per_term())
                })
                .collect();
            println!("{}", blocks.join("\n\n"));
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
