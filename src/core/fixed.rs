//! Three-decimal fixed-point helpers.
//!
//! Bet amounts and round results are published as decimals with
//! millesimal precision. Every comparison and every hash input goes
//! through the same `{:.3}` rendering so that binary floating-point
//! noise never changes an outcome.

/// Number of result steps per unit (results have 3 decimal places).
pub const RESULT_SCALE: f64 = 1000.0;

/// Modulus applied to the result HMAC (residues 0..=100_000).
pub const RESULT_MODULUS: u64 = 100_001;

/// Largest possible round result.
pub const RESULT_MAX: f64 = (RESULT_MODULUS - 1) as f64 / RESULT_SCALE;

/// Render a value with exactly three digits after the decimal point.
#[inline]
pub fn format_milli(value: f64) -> String {
    format!("{:.3}", value)
}

/// Compare two values at three-decimal string precision.
#[inline]
pub fn milli_eq(a: f64, b: f64) -> bool {
    format_milli(a) == format_milli(b)
}

/// Convert a residue in `0..RESULT_MODULUS` to a result value.
#[inline]
pub fn residue_to_result(residue: u64) -> f64 {
    residue as f64 / RESULT_SCALE
}
