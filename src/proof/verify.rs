//! Verification API
//!
//! Re-derive a round from its audit record and compare every claimed
//! value. All four checks always run, so a failed round still reports
//! everything that went wrong.

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::core::fixed::{format_milli, milli_eq};
use crate::core::hash::sha256_hex;
use crate::core::rng::derive_result;
use crate::proof::commitment::{derive_client_seed, verify_server_hash};
use crate::proof::record::RoundRecord;
use crate::proof::winner::{select_winner, winner_ranges, WinnerRange};

/// The four checks, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// `SHA-256(server_seed) == server_hash`.
    ServerHash,
    /// Client seed re-derived from the bets.
    ClientSeed,
    /// Result re-derived from the seeds.
    Result,
    /// Winner re-selected from the claimed result.
    Winner,
}

impl CheckKind {
    /// All checks in execution order.
    pub const ALL: [CheckKind; 4] = [
        CheckKind::ServerHash,
        CheckKind::ClientSeed,
        CheckKind::Result,
        CheckKind::Winner,
    ];

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ServerHash => "Server Hash",
            Self::ClientSeed => "Client Seed",
            Self::Result => "Result Calculation",
            Self::Winner => "Winner Selection",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Which check this is.
    pub kind: CheckKind,
    /// Did the recomputed value match the claim?
    pub passed: bool,
    /// Value recomputed by the verifier.
    pub expected: String,
    /// Value claimed in the record.
    pub actual: String,
}

impl CheckOutcome {
    fn compare(kind: CheckKind, expected: String, actual: String, passed: bool) -> Self {
        if passed {
            debug!("{} check passed", kind);
        } else {
            warn!("{} mismatch: expected {}, got {}", kind, expected, actual);
        }
        Self { kind, passed, expected, actual }
    }
}

/// Full verification of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundVerification {
    /// Did every check pass?
    pub passed: bool,
    /// Per-check outcomes in execution order.
    pub checks: Vec<CheckOutcome>,
    /// Winner ranges laid out for the claimed result.
    pub ranges: Vec<WinnerRange>,
}

impl RoundVerification {
    /// Look up a check by kind.
    pub fn check(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.kind == kind)
    }

    /// Checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Check the server seed against its commitment.
pub fn check_server_hash(record: &RoundRecord) -> CheckOutcome {
    let expected = sha256_hex(&record.server_seed);
    let passed = verify_server_hash(&record.server_seed, &record.server_hash);
    CheckOutcome::compare(CheckKind::ServerHash, expected, record.server_hash.clone(), passed)
}

/// Check the claimed client seed against the bets.
pub fn check_client_seed(record: &RoundRecord) -> CheckOutcome {
    let expected = derive_client_seed(&record.bets);
    let passed = expected == record.client_seed;
    CheckOutcome::compare(CheckKind::ClientSeed, expected, record.client_seed.clone(), passed)
}

/// Check the claimed result at three-decimal precision.
///
/// Uses the claimed client seed, so a bad seed and a bad result are
/// reported independently.
pub fn check_result(record: &RoundRecord) -> CheckOutcome {
    let computed = derive_result(
        &record.server_seed,
        &record.client_seed,
        record.round_number,
        &record.previous_hash,
    );
    let passed = milli_eq(computed, record.result);
    CheckOutcome::compare(
        CheckKind::Result,
        format_milli(computed),
        format_milli(record.result),
        passed,
    )
}

/// Check the claimed winner against the claimed result.
pub fn check_winner(record: &RoundRecord) -> CheckOutcome {
    let expected = select_winner(&record.bets, record.result);
    let passed = expected == record.winner_address;
    CheckOutcome::compare(CheckKind::Winner, expected, record.winner_address.clone(), passed)
}

/// Run every check against a record.
pub fn verify_round(record: &RoundRecord) -> RoundVerification {
    debug!(
        "Verifying round #{} ({}) with {} bets",
        record.round_number,
        record.round_id,
        record.bets.len()
    );

    let checks: Vec<CheckOutcome> = CheckKind::ALL
        .iter()
        .map(|kind| match kind {
            CheckKind::ServerHash => check_server_hash(record),
            CheckKind::ClientSeed => check_client_seed(record),
            CheckKind::Result => check_result(record),
            CheckKind::Winner => check_winner(record),
        })
        .collect();

    let passed = checks.iter().all(|c| c.passed);
    let ranges = winner_ranges(&record.bets, record.result);

    info!(
        "Round #{} verification {}",
        record.round_number,
        if passed { "passed" } else { "failed" }
    );

    RoundVerification { passed, checks, ranges }
}
