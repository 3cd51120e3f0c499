//! Round Hashing
//!
//! SHA-256 helpers shared by the verification checks:
//! - Server seed commitment (`sha256_hex`)
//! - Streaming client seed digest (`SeedHasher`)

use sha2::{Sha256, Digest};

use super::fixed::format_milli;

/// Raw digest output (256 bits / 32 bytes).
pub type Digest256 = [u8; 32];

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash a string and return the lowercase hex digest.
///
/// This is the commitment the operator publishes before a round:
/// `server_hash == sha256_hex(server_seed)`.
pub fn sha256_hex(secret: &str) -> String {
    hex::encode(sha256(secret.as_bytes()))
}

/// Compute the raw SHA-256 digest of arbitrary bytes.
pub fn sha256(data: &[u8]) -> Digest256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Streaming hasher for bet data.
///
/// Fields are written back to back with no separators, so the order of
/// updates is part of the digest.
pub struct SeedHasher {
    hasher: Sha256,
}

impl Default for SeedHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedHasher {
    /// Create an empty hasher (no domain prefix).
    pub fn new() -> Self {
        Self { hasher: Sha256::new() }
    }

    /// Update with the raw UTF-8 bytes of a string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.hasher.update(value.as_bytes());
    }

    /// Update with an amount rendered to exactly three decimals.
    #[inline]
    pub fn update_amount(&mut self, amount: f64) {
        self.hasher.update(format_milli(amount).as_bytes());
    }

    /// Finalize and return the raw digest.
    pub fn finalize(self) -> Digest256 {
        self.hasher.finalize().into()
    }

    /// Finalize and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_shape() {
        for secret in ["", "abc123", "a much longer server seed with spaces", "ünïcødé"] {
            let digest = sha256_hex(secret);
            assert_eq!(digest.len(), DIGEST_HEX_LEN);
            assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(digest, sha256_hex(secret));
        }
    }

    #[test]
    fn test_seed_hasher_matches_concatenation() {
        let mut h = SeedHasher::new();
        h.update_str("addrA");
        h.update_amount(20.0);
        h.update_str("g2");

        assert_eq!(h.finalize_hex(), sha256_hex("addrA20.000g2"));
    }

    #[test]
    fn test_seed_hasher_order_matters() {
        let hash1 = {
            let mut h = SeedHasher::new();
            h.update_str("a");
            h.update_str("b");
            h.finalize()
        };

        let hash2 = {
            let mut h = SeedHasher::new();
            h.update_str("b");
            h.update_str("a");
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }
}
