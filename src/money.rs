//! pt-BR number formatting for dashboard values.
//!
//! Periods group thousands and a comma separates decimals, so
//! `2121320.90` renders as `R$ 2.121.320,90`.

use rust_decimal::{Decimal, RoundingStrategy};

const THOUSANDS_SEP: char = '.';
const DECIMAL_SEP: char = ',';
const CURRENCY_PREFIX: &str = "R$ ";

/// Format `value` with `decimals` fractional digits, grouping the integer part.
///
/// Ties round to the even neighbour, so `2612526.50` becomes `2.612.526`.
pub fn format_decimal(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(DECIMAL_SEP);
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEP);
        }
        out.push(ch);
    }
    out
}

/// Currency with two decimals: `R$ 2.121.320,90`
pub fn format_brl(value: Decimal) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_decimal(value, 2))
}

/// Grouped integer used on axes and bar labels: `2.121.321`
pub fn format_grouped(value: Decimal) -> String {
    format_decimal(value, 0)
}

/// Percentage with two decimals: `-10,78%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_decimal(value, 2))
}

/// Rescale a currency amount to millions.
pub fn to_millions(value: Decimal) -> Decimal {
    value / Decimal::from(1_000_000)
}
