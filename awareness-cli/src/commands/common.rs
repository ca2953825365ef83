//! Arguments and resolution shared by the batch commands.

use anyhow::{Context, Result, bail};
use awareness_core::CostConfirmation;
use awareness_store::{Settings, default_ledger_path, load_terms, save_json};
use awareness_tracker::{TrackerConfig, TrackerConfigBuilder};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::Cli;
use crate::prompt::PromptConfirmation;

/// Search API credentials.
#[derive(Args, Debug)]
pub struct ApiArgs {
    /// Search API key.
    #[arg(long, env = "AWARENESS_API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Search engine id.
    #[arg(long, env = "AWARENESS_ENGINE_ID")]
    pub cx: Option<String>,
}

/// Where the search terms come from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TermsArgs {
    /// Search terms.
    #[arg(short = 't', long, num_args = 1..)]
    pub terms: Vec<String>,

    /// File containing search terms (txt, csv, json, yaml).
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Batch output and confirmation options.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Write the results to this JSON file.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip the cost confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Loads the settings file selected by `--config`.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = cli.config.clone().unwrap_or_else(Settings::default_path);
    Ok(Settings::load_from(&path).await?)
}

/// Resolves the ledger path: flag, then settings, then default.
pub fn ledger_path(cli: &Cli, settings: &Settings) -> PathBuf {
    cli.ledger
        .clone()
        .or_else(|| settings.ledger_path.clone())
        .unwrap_or_else(default_ledger_path)
}

/// Collects the terms of a batch.
pub async fn resolve_terms(args: &TermsArgs) -> Result<Vec<String>> {
    let terms = match &args.file {
        Some(path) => load_terms(path).await?,
        None => clean_list(&args.terms),
    };

    if terms.is_empty() {
        bail!("No search terms given");
    }
    debug!(count = terms.len(), "Resolved search terms");
    Ok(terms)
}

/// Trims entries and drops empty ones.
pub fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Starts a tracker config from flags, environment, and settings.
pub fn config_builder(api: &ApiArgs, cli: &Cli, settings: &Settings) -> Result<TrackerConfigBuilder> {
    let Some(key) = api.key.clone().or_else(|| settings.api_key.clone()) else {
        bail!("No API key: pass --key, set AWARENESS_API_KEY, or add api_key to the settings file");
    };
    let Some(cx) = api.cx.clone().or_else(|| settings.search_engine_id.clone()) else {
        bail!("No search engine id: pass --cx, set AWARENESS_ENGINE_ID, or add search_engine_id to the settings file");
    };

    let mut builder = TrackerConfig::builder(key, cx).ledger_path(ledger_path(cli, settings));
    if let Some(ms) = settings.request_delay_ms {
        builder = builder.request_delay(Duration::from_millis(ms));
    }
    Ok(builder)
}

/// Picks the cost confirmation for a batch.
pub fn confirmation(batch: &BatchArgs, cli: &Cli) -> Box<dyn CostConfirmation> {
    if batch.yes {
        Box::new(awareness_core::AutoApprove)
    } else {
        Box::new(PromptConfirmation::stdin(!cli.no_color))
    }
}

/// Writes batch results when `--output` was given.
pub async fn write_results<T: Serialize>(output: Option<&Path>, results: &T) -> Result<()> {
    if let Some(path) = output {
        save_json(path, results)
            .await
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        info!(path = %path.display(), "Results saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_list() {
        let raw = vec![" rust ".to_string(), String::new(), "  ".to_string(), "go".to_string()];
        assert_eq!(clean_list(&raw), vec!["rust", "go"]);
    }

    #[tokio::test]
    async fn test_resolve_terms_rejects_blank_list() {
        let args = TermsArgs {
            terms: vec!["  ".to_string()],
            file: None,
        };
        assert!(resolve_terms(&args).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_terms_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("terms.txt");
        tokio::fs::write(&path, "one\n\ntwo\n").await.unwrap();

        let args = TermsArgs {
            terms: Vec::new(),
            file: Some(path),
        };
        assert_eq!(resolve_terms(&args).await.unwrap(), vec!["one", "two"]);
    }
}
