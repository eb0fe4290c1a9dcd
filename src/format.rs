//! Currency formatting for tooltips, table cells and value-axis ticks.
//!
//! Two families are used:
//! - [`currency`]: full value, thousands grouped (`$52,977`, `$1,234.5`).
//! - [`currency_2sig`]: rounded to two significant digits, grouped (`$70,000`, `$0.50`).

use num_format::{Locale, ToFormattedString};

const SYMBOL: &str = "$";

/// Group the integer part with `,` and append an optional fractional part.
fn grouped(int_part: u64, frac: &str) -> String {
    let mut s = String::from(SYMBOL);
    s.push_str(&int_part.to_formatted_string(&Locale::en));
    if !frac.is_empty() {
        s.push('.');
        s.push_str(frac);
    }
    s
}

fn signed(v: f64, body: String) -> String {
    if v < 0.0 { format!("-{body}") } else { body }
}

/// `$` + grouped value, shortest decimal representation (no trailing zeros).
pub fn currency(v: f64) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let a = v.abs();
    let int_part = a.trunc();
    // Up to 6 decimals, then trim trailing zeros.
    let text = format!("{:.6}", a - int_part);
    let (int_part, frac) = match text.strip_prefix("0.") {
        Some(f) => (int_part, f.trim_end_matches('0')),
        // fraction rounded up to 1.000000
        None => (int_part + 1.0, ""),
    };
    signed(v, grouped(int_part as u64, frac))
}

/// `$` + grouped value rounded to two significant digits.
pub fn currency_2sig(v: f64) -> String {
    currency_sig(v, 2)
}

/// `$` + grouped value rounded to `digits` significant digits, keeping
/// trailing zeros in the fraction (`0.5` with 2 digits is `$0.50`).
pub fn currency_sig(v: f64, digits: u32) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let digits = digits.max(1) as i32;
    let a = v.abs();
    if a == 0.0 {
        return grouped(0, &"0".repeat((digits - 1) as usize));
    }
    let mut exp = a.log10().floor() as i32;
    let mut rounded = round_to(a, exp - digits + 1);
    // Rounding may carry into a new decade (9.96 -> 10).
    if rounded >= 10f64.powi(exp + 1) {
        exp += 1;
        rounded = round_to(a, exp - digits + 1);
    }
    let decimals = (digits - 1 - exp).max(0) as usize;
    let text = format!("{:.*}", decimals, rounded);
    let (int_str, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let int_part = int_str.parse::<u64>().unwrap_or(0);
    signed(v, grouped(int_part, frac))
}

fn round_to(a: f64, pow10: i32) -> f64 {
    let m = 10f64.powi(pow10);
    (a / m).round() * m
}
