//! Report Configuration
//!
//! Controls how a verification is rendered. Values come from the
//! environment and can be overridden on the command line.

use std::str::FromStr;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Default currency label for amounts.
pub const DEFAULT_CURRENCY: &str = "TON";

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable console report.
    #[default]
    Text,
    /// Machine readable JSON.
    Json,
}

/// Unknown output format name.
#[derive(Debug, Clone, Error)]
#[error("unknown output format: {0} (expected text or json)")]
pub struct ParseFormatError(pub String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Label printed after amounts.
    pub currency: String,
    /// Shorten long addresses in the range table.
    pub shorten_addresses: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            currency: DEFAULT_CURRENCY.to_string(),
            shorten_addresses: true,
        }
    }
}

impl ReportConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            format: lookup("JACKPOT_VERIFY_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.format),
            currency: lookup("JACKPOT_VERIFY_CURRENCY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.currency),
            shorten_addresses: !lookup("JACKPOT_VERIFY_FULL_ADDRESSES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
