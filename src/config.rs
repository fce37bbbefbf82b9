//! Configuration management for the income statement viewer.
//!
//! Loads settings from a JSONC file and applies environment overrides.
//! The resulting `Config` is read once at startup and passed to the parts
//! that need it.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

const APP_DIR: &str = "income-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the income statement backend
    pub backend_url: String,
    /// Per-request timeout in seconds (no timeout when unset)
    pub request_timeout_secs: Option<u64>,
    /// Log file path (relative to config dir or absolute)
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            request_timeout_secs: None,
            log_file: "income-tui.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// If no config file exists, returns default configuration.
    /// `//` comments outside of strings are stripped before parsing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_comments(&content))
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.with_backend_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    /// Replace `backend_url` when an override is present and non-empty.
    pub fn with_backend_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.backend_url = url;
        }
        self
    }

    /// Normalized backend base URL.
    ///
    /// # Returns
    /// * `Option<String>` - URL without surrounding whitespace or trailing `/`,
    ///   `None` when not configured
    pub fn backend_base_url(&self) -> Option<String> {
        let url = self.backend_url.trim().trim_end_matches('/');
        (!url.is_empty()).then(|| url.to_string())
    }

    /// Get default configuration file path.
    ///
    /// # Details
    /// Returns `$XDG_CONFIG_HOME/income-tui/config.jsonc` or `~/.config/income-tui/config.jsonc`.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join(APP_DIR).join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Details
    /// If log_file is absolute, returns it as-is.
    /// Otherwise, returns path relative to config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_file);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            let config_dir = config_dir()
                .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
            Ok(config_dir.join(APP_DIR).join(&self.log_file))
        }
    }
}

/// Strip `//` comments that are not inside a string literal.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return line[..i].trim_end();
        }
    }
    line
}
