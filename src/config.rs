//! Configuration management for boardctl
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file, environment variables, and CLI
//! overrides. Precedence, lowest to highest: built-in defaults, config
//! file, `BOARDCTL_BASE_URL` / `--base-url`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::Cli;
use crate::error::{BoardctlError, Result};

/// Main configuration structure for boardctl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the board backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Credential-store profile name; lets several accounts coexist on one
    /// machine without sharing tokens.
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_base_url() -> String {
    "https://front-mission.bigs.or.kr".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_profile() -> String {
    "default".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            profile: default_profile(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist, then applies environment and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns [`BoardctlError::Io`] when the file exists but cannot be
    /// read, or [`BoardctlError::Yaml`] when it cannot be parsed.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path).map_err(BoardctlError::Io)?;
            serde_yaml::from_str(&contents).map_err(BoardctlError::Yaml)?
        } else {
            tracing::debug!(path, "config file not found, using defaults");
            Self::default()
        };

        // `--base-url` also picks up BOARDCTL_BASE_URL via clap's env support.
        if let Some(base_url) = &cli.base_url {
            config.api.base_url = base_url.clone();
        }

        Ok(config)
    }

    /// Validates the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardctlError::Config`] when the base URL does not parse,
    /// the timeout is zero, or the profile name is empty.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url).map_err(|e| {
            BoardctlError::Config(format!("invalid base_url '{}': {e}", self.api.base_url))
        })?;
        if self.api.timeout_seconds == 0 {
            return Err(BoardctlError::Config("timeout_seconds must be non-zero".into()).into());
        }
        if self.api.profile.trim().is_empty() {
            return Err(BoardctlError::Config("profile must not be empty".into()).into());
        }
        Ok(())
    }

    /// The parsed base URL. Call [`validate`](Self::validate) first.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api.base_url).map_err(|e| {
            BoardctlError::Config(format!("invalid base_url '{}': {e}", self.api.base_url)).into()
        })
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }
}
