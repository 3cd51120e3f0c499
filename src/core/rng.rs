//! Round Result Derivation
//!
//! The round outcome is an HMAC-SHA256 keyed by the revealed server seed:
//!
//! ```text
//! message = "{server_seed}:{client_seed}:{round_number}:{previous_hash}"
//! tag     = HMAC-SHA256(key = server_seed, message)
//! result  = (tag as big-endian integer mod 100001) / 1000
//! ```
//!
//! Anyone holding the revealed server seed can reproduce the value.
//!
//! # Example
//!
//! ```
//! use jackpot_verify::core::rng::derive_result;
//!
//! let a = derive_result("abc123", "client", 7, "prev");
//! let b = derive_result("abc123", "client", 7, "prev");
//! assert_eq!(a, b);
//! assert!((0.0..=100.0).contains(&a));
//! ```

use hmac::digest::Key;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::fixed::{residue_to_result, RESULT_MODULUS};
use super::hash::{sha256, Digest256};

/// HMAC-SHA256 as used for result derivation.
pub type HmacSha256 = Hmac<Sha256>;

/// Build the colon-joined message fed to the result HMAC.
pub fn result_message(
    server_seed: &str,
    client_seed: &str,
    round_number: i64,
    previous_hash: &str,
) -> String {
    format!("{}:{}:{}:{}", server_seed, client_seed, round_number, previous_hash)
}

/// Expand a secret to a full HMAC-SHA256 key block.
///
/// Same normalization HMAC applies internally: keys longer than the
/// 64-byte block are hashed first, shorter keys are zero padded. The
/// resulting tag is identical to keying with the raw secret.
pub fn hmac_key(secret: &[u8]) -> Key<HmacSha256> {
    let mut key = Key::<HmacSha256>::default();
    if secret.len() > key.len() {
        let digest = sha256(secret);
        key[..digest.len()].copy_from_slice(&digest);
    } else {
        key[..secret.len()].copy_from_slice(secret);
    }
    key
}

/// Compute the raw result tag.
pub fn result_hmac(
    server_seed: &str,
    client_seed: &str,
    round_number: i64,
    previous_hash: &str,
) -> Digest256 {
    let mut mac = <HmacSha256 as KeyInit>::new(&hmac_key(server_seed.as_bytes()));
    mac.update(result_message(server_seed, client_seed, round_number, previous_hash).as_bytes());
    mac.finalize().into_bytes().into()
}

/// Reduce a big-endian unsigned integer modulo `modulus`.
///
/// Folds byte by byte, so the integer never has to be materialized.
#[inline]
pub fn reduce_be_mod(bytes: &[u8], modulus: u64) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &b| ((acc << 8) | b as u64) % modulus)
}

/// Derive the round result in `[0.000, 100.000]`.
pub fn derive_result(
    server_seed: &str,
    client_seed: &str,
    round_number: i64,
    previous_hash: &str,
) -> f64 {
    let tag = result_hmac(server_seed, client_seed, round_number, previous_hash);
    residue_to_result(reduce_be_mod(&tag, RESULT_MODULUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_result_message_layout() {
        assert_eq!(result_message("s", "c", 42, "p"), "s:c:42:p");
        assert_eq!(result_message("", "", -1, ""), ":::-1:");
    }

    #[test]
    fn test_hmac_known_vector() {
        // Same as a plain HMAC over the joined message.
        let mut mac = <HmacSha256 as Mac>::new_from_slice(b"key").unwrap();
        mac.update(b"key:c:1:p");
        let expected: Digest256 = mac.finalize().into_bytes().into();

        assert_eq!(result_hmac("key", "c", 1, "p"), expected);
    }

    #[test]
    fn test_key_block_matches_raw_key() {
        let long_seed = "x".repeat(100);
        for seed in ["", "abc123", "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef", long_seed.as_str()] {
            let mut mac = <HmacSha256 as Mac>::new_from_slice(seed.as_bytes()).unwrap();
            mac.update(result_message(seed, "c", 3, "p").as_bytes());
            let expected: Digest256 = mac.finalize().into_bytes().into();

            assert_eq!(result_hmac(seed, "c", 3, "p"), expected, "seed length {}", seed.len());
        }
    }

    #[test]
    fn test_reduce_be_mod() {
        assert_eq!(reduce_be_mod(&[], RESULT_MODULUS), 0);
        assert_eq!(reduce_be_mod(&[0x01, 0x00], RESULT_MODULUS), 256);
        assert_eq!(reduce_be_mod(&[0x01, 0x86, 0xA1], RESULT_MODULUS), 0); // 100001
        assert_eq!(reduce_be_mod(&[0x01, 0x86, 0xA2], RESULT_MODULUS), 1);

        // Leading zero bytes do not change the value.
        assert_eq!(
            reduce_be_mod(&[0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF], 1_000_003),
            0xFFFF_FFFFu64 % 1_000_003
        );

        // 2^64 mod 100001, checked against u128 arithmetic.
        let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            reduce_be_mod(&bytes, RESULT_MODULUS),
            ((1u128 << 64) % RESULT_MODULUS as u128) as u64
        );
    }

    #[test]
    fn test_reduce_matches_u128_for_16_bytes() {
        let bytes: [u8; 16] = [
            0xde, 0xad, 0xbe, 0xef, 0x01, 0x23, 0x45, 0x67,
            0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98,
        ];
        let value = u128::from_be_bytes(bytes);
        assert_eq!(
            reduce_be_mod(&bytes, RESULT_MODULUS),
            (value % RESULT_MODULUS as u128) as u64
        );
    }

    #[test]
    fn test_result_determinism() {
        let a = derive_result("abc123", "deadbeef", 17, "0000");
        let b = derive_result("abc123", "deadbeef", 17, "0000");
        assert_eq!(a, b);
    }

    #[test]
    fn test_result_depends_on_every_input() {
        let base = result_hmac("seed", "client", 1, "prev");
        assert_ne!(base, result_hmac("seed2", "client", 1, "prev"));
        assert_ne!(base, result_hmac("seed", "client2", 1, "prev"));
        assert_ne!(base, result_hmac("seed", "client", 2, "prev"));
        assert_ne!(base, result_hmac("seed", "client", 1, "prev2"));
    }

    proptest! {
        #[test]
        fn prop_result_in_range(
            server in ".{0,32}",
            client in "[0-9a-f]{0,64}",
            round in any::<i64>(),
            prev in ".{0,32}",
        ) {
            let result = derive_result(&server, &client, round, &prev);
            prop_assert!((0.0..=100.0).contains(&result));
            // Exactly three decimals of granularity.
            let steps = result * 1000.0;
            prop_assert!((steps - steps.round()).abs() < 1e-6);
        }
    }
}
