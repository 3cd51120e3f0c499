//! Round Audit Record
//!
//! The published data for one jackpot round, as returned by the
//! operator's verification endpoint. Loaded once, never mutated.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

/// Treat an explicit `null` like a missing field.
///
/// Operator backends emit `null` for empty lists and unset strings
/// (`"bets": null` on an empty round, `"previous_hash": null` on the first).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single bet in the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    /// Player wallet address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_address: String,

    /// Bet amount (non-negative).
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    /// Gift identifier attached to the bet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub gift_id: String,
}

impl Bet {
    /// Create a new bet.
    pub fn new(player_address: impl Into<String>, amount: f64, gift_id: impl Into<String>) -> Self {
        Self {
            player_address: player_address.into(),
            amount,
            gift_id: gift_id.into(),
        }
    }
}

/// Everything needed to re-derive a round outcome.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Whether the operator produced the record successfully.
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Round identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_id: String,

    /// Sequential round number.
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_number: i64,

    /// Server seed, revealed after the round.
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_seed: String,

    /// SHA-256 commitment to the server seed, published before the round.
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_hash: String,

    /// Claimed client seed (digest of the sorted bets).
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_seed: String,

    /// Hash of the previous round (chain link).
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_hash: String,

    /// Bets in the order the operator published them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bets: Vec<Bet>,

    /// Claimed result in `[0, 100]`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: f64,

    /// Claimed winner address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner_address: String,

    /// Total pot.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pot: f64,

    /// Error reported by the operator when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Where a record was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordSource {
    /// A JSON file on disk.
    File,
    /// JSON passed directly as a string.
    Inline,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Inline => write!(f, "string"),
        }
    }
}

/// Errors that stop verification before any check runs.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input is not a valid record.
    #[error("Failed to parse JSON from {source_kind}")]
    Parse {
        /// File or inline input.
        source_kind: RecordSource,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Operator flagged the record as failed.
    #[error("Verification data contains error: {0}")]
    Reported(String),

    /// A bet amount is negative (or not a number).
    #[error("Bet from {player_address} has invalid amount {amount}")]
    InvalidAmount {
        /// Address of the offending bet.
        player_address: String,
        /// The amount as published.
        amount: f64,
    },
}

impl RoundRecord {
    /// Parse a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a record from a file path, falling back to inline JSON.
    ///
    /// If `input` names a readable file its contents are parsed,
    /// otherwise `input` itself is parsed as JSON.
    pub fn load(input: &str) -> Result<Self, RecordError> {
        let (json, source_kind) = match std::fs::read_to_string(Path::new(input)) {
            Ok(contents) => {
                debug!("Reading round record from file {}", input);
                (contents, RecordSource::File)
            }
            Err(e) => {
                debug!("Input is not a readable file ({}), parsing as JSON", e);
                (input.to_string(), RecordSource::Inline)
            }
        };

        let record = Self::from_json(&json)
            .map_err(|source| RecordError::Parse { source_kind, source })?;

        record.ensure_success()?;
        record.ensure_valid_amounts()?;
        Ok(record)
    }

    /// Reject records the operator marked as failed.
    pub fn ensure_success(&self) -> Result<(), RecordError> {
        if self.success {
            Ok(())
        } else {
            Err(RecordError::Reported(self.error.clone().unwrap_or_default()))
        }
    }

    /// Reject bets whose amount is negative or NaN.
    ///
    /// Range layout assumes non-negative weights.
    pub fn ensure_valid_amounts(&self) -> Result<(), RecordError> {
        match self.bets.iter().find(|b| b.amount.is_nan() || b.amount < 0.0) {
            Some(bet) => Err(RecordError::InvalidAmount {
                player_address: bet.player_address.clone(),
                amount: bet.amount,
            }),
            None => Ok(()),
        }
    }
}
