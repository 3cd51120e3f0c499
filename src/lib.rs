//! # Jackpot Verify
//!
//! Independent verification of provably fair jackpot rounds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    JACKPOT VERIFY                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── hash.rs     - SHA-256 commitment and seed hashing       │
//! │  ├── fixed.rs    - Three-decimal formatting and comparison   │
//! │  └── rng.rs      - HMAC-SHA256 round result derivation       │
//! │                                                              │
//! │  proof/          - Round verification                        │
//! │  ├── record.rs   - Audit record and loading                  │
//! │  ├── commitment.rs- Server hash and client seed              │
//! │  ├── winner.rs   - Weighted range winner selection           │
//! │  └── verify.rs   - Runs every check against a record         │
//! │                                                              │
//! │  config.rs       - Report options (env + CLI)                │
//! │  report.rs       - Text and JSON rendering                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Everything under `core/` and `proof/` is a pure function of the record:
//! - Bets are always processed in stable address order
//! - Amounts and results are compared at three decimals
//! - No system time, no global state
//!
//! Any third party with the revealed server seed gets the same verdict.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod proof;
pub mod report;

// Re-export commonly used types
pub use config::{OutputFormat, ReportConfig};
pub use proof::{
    Bet, RoundRecord, RecordError, RoundVerification, CheckOutcome, CheckKind, WinnerRange,
    verify_round,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
