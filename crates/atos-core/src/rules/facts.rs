//! Literal grounded-fact formatting.
//!
//! Every fact a rule cites goes through these helpers, so "derivable from
//! the snapshot by simple projection" stays mechanically checkable: a test
//! can re-project the snapshot with the same helpers and compare strings.

use std::fmt;

use chrono::NaiveDate;

/// `"Evidence items: 0"`
pub fn count(label: &str, value: usize) -> String {
    format!("{label}: {value}")
}

/// `"region: missing"`
pub fn missing(field: &str) -> String {
    format!("{field}: missing")
}

/// `"Equity outcome: not recorded"`
pub fn not_recorded(field: &str) -> String {
    format!("{field}: not recorded")
}

/// `"Claim CLM-88 milestone: estimated"`
pub fn labeled(label: &str, value: impl fmt::Display) -> String {
    format!("{label}: {value}")
}

/// Integer cents rendered as `"$48,250.00"`. Negative amounts keep the sign
/// ahead of the currency symbol.
pub fn money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let rem = abs % 100;
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, ch) in dollars.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{sign}${grouped}.{rem:02}")
}

/// Ratio rendered as a one-decimal percentage: `0.358` → `"35.8%"`.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// ISO calendar date: `"2026-07-01"`.
pub fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}
