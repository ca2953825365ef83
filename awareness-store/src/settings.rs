//! User settings file.
//!
//! Optional defaults for the CLI so credentials and tracked projects don't
//! have to be passed on every invocation. Every field is optional; the CLI
//! layers flags and environment variables on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json_private};

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Search API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Search engine id (`cx`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine_id: Option<String>,

    /// Projects tracked by `rank` when none are given on the command line.
    pub projects: Vec<String>,

    /// Default number of results to scan per term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Usage ledger location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,

    /// Minimum delay between API calls, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
}

impl Settings {
    /// Returns the default settings file path.
    pub fn default_path() -> PathBuf {
        default_settings_path()
    }

    /// Loads settings from a specific path.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        match load_json::<Settings>(path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(StoreError::Config(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Saves settings to a specific path with owner-only permissions.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json_private(path, self).await?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Returns a copy safe to display, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api_key = copy.api_key.as_deref().map(mask_secret);
        copy
    }
}

/// Masks all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
