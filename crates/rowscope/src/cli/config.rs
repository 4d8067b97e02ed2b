//! CLI configuration
//!
//! Read from `$ROWSCOPE_HOME/config.toml` (or `--config <path>`). Every key
//! is optional; a missing default file means defaults.

use crate::cli::error::HelpfulError;
use anyhow::{Context, Result};
use rowscope_core::{DEFAULT_INTERNAL_PREFIX, IDENTITY_COLUMN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use rowscope_logging::rowscope_home;

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowscopeConfig {
    /// Tables starting with this prefix are listed as internal
    pub internal_table_prefix: String,
    /// Default page size for `rows`
    pub page_size: usize,
    /// Column left out of insert forms
    pub identity_column: String,
}

impl Default for RowscopeConfig {
    fn default() -> Self {
        Self {
            internal_table_prefix: DEFAULT_INTERNAL_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            identity_column: IDENTITY_COLUMN.to_string(),
        }
    }
}

/// Default config file: ~/.rowscope/config.toml
pub fn config_path() -> PathBuf {
    rowscope_home().join("config.toml")
}

/// Load config from `explicit` if given (it must exist), otherwise from the
/// default location if present.
pub fn load_config(explicit: Option<&Path>) -> Result<RowscopeConfig> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(HelpfulError::config_not_found(path).into()),
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(RowscopeConfig::default());
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<RowscopeConfig> {
    Ok(toml::from_str(text)?)
}
