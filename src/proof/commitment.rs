//! Round Commitment Protocol
//!
//! Before a round the operator publishes `server_hash = SHA-256(server_seed)`.
//! The client seed is derived from the bets themselves, so the operator
//! cannot pick it. After the round the seed is revealed and both values
//! can be recomputed here.

use crate::core::hash::{sha256_hex, SeedHasher};
use crate::proof::record::Bet;

/// Check a revealed server seed against its published commitment.
pub fn verify_server_hash(server_seed: &str, server_hash: &str) -> bool {
    sha256_hex(server_seed) == server_hash
}

/// Return the bets in canonical order (ascending by address).
///
/// The sort is stable, so bets from the same address keep their
/// published relative order.
pub fn sort_bets(bets: &[Bet]) -> Vec<&Bet> {
    let mut sorted: Vec<&Bet> = bets.iter().collect();
    sorted.sort_by(|a, b| a.player_address.cmp(&b.player_address));
    sorted
}

/// Derive the client seed from the bet set.
///
/// For each bet in canonical order the digest absorbs the address, the
/// amount rendered with three decimals and the gift id, with no
/// separators.
pub fn derive_client_seed(bets: &[Bet]) -> String {
    let mut hasher = SeedHasher::new();

    for bet in sort_bets(bets) {
        hasher.update_str(&bet.player_address);
        hasher.update_amount(bet.amount);
        hasher.update_str(&bet.gift_id);
    }

    hasher.finalize_hex()
}
