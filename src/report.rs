//! Verification Reports
//!
//! Renders a `RoundVerification` for people (text) or tools (JSON).
//! Rendering never changes the verdict.

use std::fmt;

use serde::Serialize;

use crate::config::{OutputFormat, ReportConfig};
use crate::core::fixed::format_milli;
use crate::proof::record::RoundRecord;
use crate::proof::verify::{CheckKind, CheckOutcome, RoundVerification};
use crate::proof::winner::WinnerRange;

/// Width of the separator lines.
const RULE_WIDTH: usize = 60;

/// Characters of a passing hash shown before eliding.
const HASH_PREVIEW_LEN: usize = 16;

/// JSON report body.
#[derive(Debug, Serialize)]
pub struct RoundReport<'a> {
    /// Round identifier.
    pub round_id: &'a str,
    /// Round number.
    pub round_number: i64,
    /// Total pot as published.
    pub total_pot: f64,
    /// Claimed result.
    pub claimed_result: f64,
    /// Claimed winner.
    pub claimed_winner: &'a str,
    /// Verification outcome.
    #[serde(flatten)]
    pub verification: &'a RoundVerification,
}

/// Render a verification in the configured format.
pub fn render(
    record: &RoundRecord,
    verification: &RoundVerification,
    config: &ReportConfig,
) -> Result<String, serde_json::Error> {
    match config.format {
        OutputFormat::Text => Ok(render_text(record, verification, config)),
        OutputFormat::Json => render_json(record, verification),
    }
}

/// Render the JSON report.
pub fn render_json(
    record: &RoundRecord,
    verification: &RoundVerification,
) -> Result<String, serde_json::Error> {
    let report = RoundReport {
        round_id: &record.round_id,
        round_number: record.round_number,
        total_pot: record.total_pot,
        claimed_result: record.result,
        claimed_winner: &record.winner_address,
        verification,
    };
    serde_json::to_string_pretty(&report)
}

/// Render the console report.
pub fn render_text(
    record: &RoundRecord,
    verification: &RoundVerification,
    config: &ReportConfig,
) -> String {
    TextReport { record, verification, config }.to_string()
}

/// Console rendering of a verified round.
pub struct TextReport<'a> {
    /// Record that was verified.
    pub record: &'a RoundRecord,
    /// Outcome of the verification.
    pub verification: &'a RoundVerification,
    /// Rendering options.
    pub config: &'a ReportConfig,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "🎰 Verifying Jackpot Round #{} ({})", record.round_number, record.round_id)?;
        writeln!(f, "📊 Total Pot: {:.2} {}", record.total_pot, self.config.currency)?;
        writeln!(f, "🎯 Claimed Result: {}", format_milli(record.result))?;
        writeln!(f, "🏆 Claimed Winner: {}", record.winner_address)?;
        writeln!(f, "{}", rule)?;

        for (step, check) in self.verification.checks.iter().enumerate() {
            writeln!(f, "{}. Verifying {}...", step + 1, check.kind)?;
            write_check(f, check)?;
        }

        writeln!(f, "{}. Winner Ranges:", self.verification.checks.len() + 1)?;
        write_ranges(f, &self.verification.ranges, record.result, self.config)?;

        writeln!(f, "{}", rule)?;
        if self.verification.passed {
            writeln!(f, "🎉 VERIFICATION PASSED! This round is provably fair.")
        } else {
            writeln!(f, "💀 VERIFICATION FAILED! This round may not be fair.")
        }
    }
}

fn write_check(f: &mut fmt::Formatter<'_>, check: &CheckOutcome) -> fmt::Result {
    if check.passed {
        let shown = match check.kind {
            CheckKind::ServerHash | CheckKind::ClientSeed => preview(&check.actual),
            CheckKind::Result | CheckKind::Winner => check.actual.clone(),
        };
        writeln!(f, "    ✅ {} matches: {}", check.kind, shown)
    } else {
        writeln!(f, "    ❌ {} mismatch!", check.kind)?;
        writeln!(f, "       Calculated: {}", check.expected)?;
        writeln!(f, "       Claimed:    {}", check.actual)
    }
}

fn write_ranges(
    f: &mut fmt::Formatter<'_>,
    ranges: &[WinnerRange],
    result: f64,
    config: &ReportConfig,
) -> fmt::Result {
    if ranges.is_empty() {
        return writeln!(f, "    No bets to show");
    }

    for range in ranges {
        let icon = if range.is_winner { "🏆" } else { "  " };
        let address = if config.shorten_addresses {
            shorten_address(&range.address)
        } else {
            range.address.clone()
        };
        writeln!(
            f,
            "    {} {}: {:.3} - {:.3} ({:.1}% chance, {:.2} {})",
            icon, address, range.range_start, range.range_end, range.percentage,
            range.amount, config.currency,
        )?;
    }

    writeln!(f, "    🎯 Result {} falls in winner's range", format_milli(result))
}

/// First 16 characters of a digest followed by `...`.
fn preview(value: &str) -> String {
    let head: String = value.chars().take(HASH_PREVIEW_LEN).collect();
    format!("{}...", head)
}

/// Shorten addresses longer than 8 characters to `abcd...wxyz`.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
