//! Configuration file
//!
//! ```json
//! {
//!   "backend": "file",
//!   "data_dir": "/var/lib/ledgerkv",
//!   "sync_writes": true,
//!   "log_level": "info"
//! }
//! ```
//!
//! Every key is optional except `data_dir` for the file backend. A missing
//! config file means all defaults (in-memory store).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;

/// Which state store backend to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    File,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// State store backend (default: memory)
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory; required for the file backend
    #[serde(default)]
    pub data_dir: Option<String>,

    /// fsync every append (file backend, default: true)
    #[serde(default = "default_sync_writes")]
    pub sync_writes: bool,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_sync_writes() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: None,
            sync_writes: default_sync_writes(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file; a missing file yields defaults
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.backend == BackendKind::File && self.data_dir.is_none() {
            return Err(CliError::config_error(
                "data_dir is required when backend is 'file'",
            ));
        }

        self.severity()?;
        Ok(())
    }

    /// Minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Data directory as a path, if configured
    pub fn data_path(&self) -> Option<&Path> {
        self.data_dir.as_deref().map(Path::new)
    }
}
