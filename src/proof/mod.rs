//! Provably Fair Round Verification
//!
//! Re-derives a jackpot round from its published audit record:
//! - Server seed commitment
//! - Client seed from the sorted bet set
//! - HMAC result from both seeds
//! - Winner from cumulative bet ranges
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    VERIFICATION                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  record.rs       - Round audit record and loading           │
//! │  commitment.rs   - Server hash and client seed derivation   │
//! │  winner.rs       - Weighted range layout and selection      │
//! │  verify.rs       - Runs all checks against a record         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod record;
pub mod commitment;
pub mod winner;
pub mod verify;

// Re-export key types
pub use record::{Bet, RoundRecord, RecordError, RecordSource};
pub use commitment::{derive_client_seed, sort_bets, verify_server_hash};
pub use winner::{select_winner, winner_ranges, WinnerRange};
pub use verify::{
    verify_round, check_server_hash, check_client_seed, check_result, check_winner,
    RoundVerification, CheckOutcome, CheckKind,
};
