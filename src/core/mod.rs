//! Core deterministic primitives.
//!
//! Hashing, fixed-point formatting and result derivation. Every function
//! here is pure, so any third party gets bit-identical outputs.

pub mod fixed;
pub mod hash;
pub mod rng;

// Re-export core functions
pub use fixed::{format_milli, milli_eq};
pub use hash::{sha256_hex, SeedHasher};
pub use rng::derive_result;
