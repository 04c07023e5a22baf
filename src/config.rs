//! Configuration handling for the TUI

use crate::state::OptionTable;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend address
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default submission path
const DEFAULT_ENDPOINT: &str = "/submit";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend base URL
    pub base_url: Option<String>,
    /// Submission path on the backend
    pub endpoint: Option<String>,
    /// Anti-forgery token sent with every submission
    pub csrf_token: Option<String>,
    /// JSON file replacing the built-in state/district table
    pub option_table_path: Option<PathBuf>,
    /// Request timeout; the transport default applies when unset
    pub timeout_seconds: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("in", "taxform", "taxform-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(base_url) = std::env::var("TAXFORM_BASE_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(token) = std::env::var("TAXFORM_CSRF_TOKEN") {
            config.csrf_token = Some(token);
        }

        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Full URL the form is posted to
    pub fn submit_url(&self) -> String {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn csrf_token(&self) -> String {
        self.csrf_token.clone().unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// The configured option table, or the built-in one
    pub fn option_table(&self) -> Result<OptionTable> {
        match &self.option_table_path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read option table {}", path.display()))?;
                OptionTable::from_json(&content)
                    .with_context(|| format!("Invalid option table {}", path.display()))
            }
            None => Ok(OptionTable::builtin()),
        }
    }
}
