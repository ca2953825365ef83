//! Usage command - today's API usage from the ledger.

use anyhow::Result;
use awareness_core::{QuotaPolicy, models::today};
use awareness_store::LedgerStore;

use super::common;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the usage command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let settings = common::load_settings(cli).await?;
    let store = LedgerStore::load(common::ledger_path(cli, &settings)).await;
    let ledger = store.ledger().current_for(today());
    let quota = QuotaPolicy::default();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_usage(&ledger, &quota));
            if cli.verbose {
                println!("Ledger file:  {}", store.path().display());
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_usage(&ledger, &quota)?);
        }
    }

    Ok(ExitCode::Success)
}
