//! Winner Selection
//!
//! Bets are laid out in canonical (address) order over `[0, 100)`, each
//! taking a slice proportional to its amount. The result lands in exactly
//! one slice; that bet wins.
//!
//! ```text
//!  0                    66.667                 100
//!  |------- addrA ------|------- addrB -------|
//!                 ^ result = 50.0 -> addrA
//! ```
//!
//! Intervals are lower-inclusive and upper-exclusive. If floating-point
//! drift leaves the result uncovered at the top edge, the last bet in
//! canonical order wins, so some bet always wins a non-empty round.

use serde::{Serialize, Deserialize};

use crate::proof::commitment::sort_bets;
use crate::proof::record::Bet;

/// One bet's slice of the `[0, 100)` range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinnerRange {
    /// Player address.
    pub address: String,
    /// Inclusive start of the slice.
    pub range_start: f64,
    /// Exclusive end of the slice.
    pub range_end: f64,
    /// Share of the pot, in percent.
    pub percentage: f64,
    /// Bet amount.
    pub amount: f64,
    /// Whether this slice holds the result.
    pub is_winner: bool,
}

impl WinnerRange {
    /// Check if `result` falls in `[range_start, range_end)`.
    #[inline]
    pub fn contains(&self, result: f64) -> bool {
        result >= self.range_start && result < self.range_end
    }
}

/// Lay out every bet's range and flag the winner.
///
/// Exactly one entry is flagged for a non-empty bet list. Zero-amount
/// bets get zero-width ranges and never win unless the fallback picks
/// them. A zero total pot gives every bet a zero-width range and the
/// last bet wins by fallback.
pub fn winner_ranges(bets: &[Bet], result: f64) -> Vec<WinnerRange> {
    let sorted = sort_bets(bets);
    let total: f64 = sorted.iter().map(|b| b.amount).sum();

    let mut cursor = 0.0;
    let mut ranges: Vec<WinnerRange> = sorted
        .iter()
        .map(|bet| {
            let percentage = if total > 0.0 {
                bet.amount / total * 100.0
            } else {
                0.0
            };
            let range = WinnerRange {
                address: bet.player_address.clone(),
                range_start: cursor,
                range_end: cursor + percentage,
                percentage,
                amount: bet.amount,
                is_winner: false,
            };
            cursor = range.range_end;
            range
        })
        .collect();

    let winner = ranges
        .iter()
        .position(|r| r.contains(result))
        .or_else(|| ranges.len().checked_sub(1));

    if let Some(idx) = winner {
        ranges[idx].is_winner = true;
    }

    ranges
}

/// Select the winning address for `result`.
///
/// Returns an empty string when there are no bets.
pub fn select_winner(bets: &[Bet], result: f64) -> String {
    winner_ranges(bets, result)
        .into_iter()
        .find(|r| r.is_winner)
        .map(|r| r.address)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_bets() -> Vec<Bet> {
        vec![
            Bet::new("addrB", 10.0, "g1"),
            Bet::new("addrA", 20.0, "g2"),
        ]
    }

    #[test]
    fn test_two_bet_ranges() {
        let ranges = winner_ranges(&two_bets(), 50.0);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].address, "addrA");
        assert_eq!(ranges[0].range_start, 0.0);
        assert_eq!(format!("{:.3}", ranges[0].range_end), "66.667");
        assert_eq!(ranges[1].address, "addrB");
        assert_eq!(ranges[1].range_start, ranges[0].range_end);
        assert!((ranges[1].range_end - 100.0).abs() < 1e-9);

        assert!(ranges[0].is_winner);
        assert!(!ranges[1].is_winner);
    }

    #[test]
    fn test_two_bet_selection() {
        assert_eq!(select_winner(&two_bets(), 50.0), "addrA");
        assert_eq!(select_winner(&two_bets(), 90.0), "addrB");
        assert_eq!(select_winner(&two_bets(), 0.0), "addrA");
        assert_eq!(select_winner(&two_bets(), 100.0), "addrB");
    }

    #[test]
    fn test_boundary_belongs_to_upper_range() {
        let bets = vec![Bet::new("a", 1.0, ""), Bet::new("b", 1.0, "")];

        assert_eq!(select_winner(&bets, 49.999), "a");
        assert_eq!(select_winner(&bets, 50.0), "b");
    }

    #[test]
    fn test_single_bet_takes_everything() {
        let bets = vec![Bet::new("addrA", 5.0, "g1")];

        let ranges = winner_ranges(&bets, 0.0);
        assert_eq!(ranges[0].range_start, 0.0);
        assert_eq!(ranges[0].range_end, 100.0);
        assert_eq!(ranges[0].percentage, 100.0);

        for result in [0.0, 0.001, 42.0, 99.999, 100.0] {
            assert_eq!(select_winner(&bets, result), "addrA");
        }
    }

    #[test]
    fn test_empty_bets() {
        assert!(winner_ranges(&[], 10.0).is_empty());
        assert_eq!(select_winner(&[], 10.0), "");
    }

    #[test]
    fn test_zero_total_falls_back_to_last() {
        let bets = vec![Bet::new("b", 0.0, ""), Bet::new("a", 0.0, "")];

        let ranges = winner_ranges(&bets, 10.0);
        assert!(ranges.iter().all(|r| r.percentage == 0.0));
        assert!(ranges[1].is_winner);
        assert_eq!(select_winner(&bets, 10.0), "b");
    }

    #[test]
    fn test_zero_amount_never_wins() {
        let bets = vec![
            Bet::new("a", 1.0, ""),
            Bet::new("b", 0.0, ""),
            Bet::new("c", 1.0, ""),
        ];

        let ranges = winner_ranges(&bets, 50.0);
        assert_eq!(ranges[1].range_start, ranges[1].range_end);
        assert!(!ranges[1].is_winner);
        assert_eq!(select_winner(&bets, 50.0), "c");
    }

    #[test]
    fn test_duplicate_address_flags_one_entry() {
        let bets = vec![Bet::new("a", 1.0, "x"), Bet::new("a", 1.0, "y")];

        let ranges = winner_ranges(&bets, 75.0);
        assert_eq!(ranges.iter().filter(|r| r.is_winner).count(), 1);
        assert!(ranges[1].is_winner);
    }

    proptest! {
        #[test]
        fn prop_ranges_partition(
            amounts in prop::collection::vec(0u32..1_000_000, 1..20),
            result_milli in 0u32..=100_000,
        ) {
            prop_assume!(amounts.iter().any(|&a| a > 0));

            let bets: Vec<Bet> = amounts
                .iter()
                .enumerate()
                .map(|(i, &a)| Bet::new(format!("addr{:03}", i), a as f64 / 1000.0, ""))
                .collect();
            let result = result_milli as f64 / 1000.0;

            let ranges = winner_ranges(&bets, result);

            prop_assert_eq!(ranges[0].range_start, 0.0);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].range_end, pair[1].range_start);
            }
            let total_pct: f64 = ranges.iter().map(|r| r.percentage).sum();
            prop_assert!((total_pct - 100.0).abs() < 1e-6);

            let winners: Vec<&WinnerRange> = ranges.iter().filter(|r| r.is_winner).collect();
            prop_assert_eq!(winners.len(), 1);
            let winner = winners[0];
            prop_assert!(winner.contains(result) || std::ptr::eq(winner, ranges.last().unwrap()));
            prop_assert_eq!(select_winner(&bets, result), winner.address.clone());
        }
    }
}
