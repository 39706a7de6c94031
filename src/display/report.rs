//! Report formatting utilities for terminal output
//!
//! Numeric formatting contracts shared by every view: currency amounts,
//! percentages, bars and separators.

use crate::models::numeric::{finite_or_zero, round_half_up};

/// Format an amount with a currency symbol and thousands separators
///
/// Two decimals, half-up rounding on cents, sign before the symbol:
/// `-$1,234.50`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let cents = round_half_up(finite_or_zero(amount) * 100.0);
    let negative = cents < 0.0;
    let cents = cents.abs() as u64;

    let whole = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, whole, cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a whole-number percentage: `75%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:.0}%", finite_or_zero(pct))
}

/// Format a progress percentage with one decimal: `5.0%`
pub fn format_progress(pct: f64) -> String {
    format!("{:.1}%", finite_or_zero(pct))
}

/// Format an angle in degrees: `180.0°`
pub fn format_degrees(angle: f64) -> String {
    format!("{:.1}°", finite_or_zero(angle))
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
