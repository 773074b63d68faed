use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::GrammarError;

/// Largest power of ten applied in a single scaling step.
const MAX_STEP: u32 = 28;

/// Convert a number token accepted by the grammar into an exact decimal.
///
/// Handles the forms `Decimal::from_str` rejects: a leading `+`, a missing integer part
/// (`.5`), a missing fraction (`3.`) and an exponent (`1.5e-3`).
pub(crate) fn parse_number(text: &str) -> Result<Decimal, GrammarError> {
    let invalid = || GrammarError::InvalidNumber(text.to_string());

    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, mantissa),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);

    let mut normalized = String::with_capacity(digits.len() + 2);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits);

    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;

    match exponent {
        None => Ok(value),
        Some(exponent) => {
            let exponent: i64 = exponent.parse().map_err(|_| invalid())?;
            scale_by_power_of_ten(value, exponent).ok_or_else(invalid)
        }
    }
}

/// Multiply `value` by `10^exponent`, or `None` on overflow.
///
/// Results too small for 28 decimal places round to zero.
fn scale_by_power_of_ten(value: Decimal, exponent: i64) -> Option<Decimal> {
    let mut result = value;
    let mut remaining = exponent.unsigned_abs();

    while remaining > 0 && !result.is_zero() {
        let step = remaining.min(MAX_STEP as u64) as u32;
        let factor = if exponent > 0 {
            Decimal::from_i128_with_scale(10i128.pow(step), 0)
        } else {
            Decimal::new(1, step)
        };
        result = result.checked_mul(factor)?;
        remaining -= step as u64;
    }

    Some(result)
}
