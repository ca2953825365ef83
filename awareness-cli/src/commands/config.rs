//! Config command - manage configuration.

use anyhow::{Result, bail};
use awareness_store::{Settings, default_config_dir};
use clap::{Args, Subcommand};
use tracing::info;

use super::common;
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration (API key masked).
    Show,

    /// Show configuration paths.
    Path,

    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await?,
        ConfigAction::Path => show_paths(cli).await?,
        ConfigAction::Init { force } => init_config(*force, cli).await?,
    }
    Ok(ExitCode::Success)
}

fn settings_path(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(Settings::default_path)
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = common::load_settings(cli).await?.redacted();

    match cli.format {
        OutputFormat::Text => {
            let unset = || "(not set)".to_string();
            println!("Awareness Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API key:          {}", settings.api_key.clone().unwrap_or_else(unset));
            println!(
                "Search engine id: {}",
                settings.search_engine_id.clone().unwrap_or_else(unset)
            );
            if settings.projects.is_empty() {
                println!("Projects:         {}", unset());
            } else {
                println!("Projects:");
                for project in &settings.projects {
                    println!("  • {project}");
                }
            }
            println!(
                "Results per term: {}",
                settings.max_results.map_or_else(|| "100 (default)".to_string(), |n| n.to_string())
            );
            println!(
                "Ledger file:      {}",
                common::ledger_path(cli, &settings).display()
            );
            println!(
                "Request delay:    {}",
                settings
                    .request_delay_ms
                    .map_or_else(|| "1000 ms (default)".to_string(), |ms| format!("{ms} ms"))
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let settings = common::load_settings(cli).await?;
    let config_dir = default_config_dir();
    let settings_path = settings_path(cli);
    let ledger_path = common::ledger_path(cli, &settings);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
            println!("Ledger file:   {}", ledger_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
                "ledger_file": ledger_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = settings_path(cli);

    if tokio::fs::try_exists(&path).await? && !force {
        bail!(
            "Settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default().save_to(&path).await?;
    info!(path = %path.display(), "Settings file written");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
