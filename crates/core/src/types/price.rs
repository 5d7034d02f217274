//! Price parsing and validation using decimal arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a price string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Not an unsigned decimal number.
    #[error("not a valid price")]
    Invalid,
    /// More than two fractional digits.
    #[error("at most two decimal places are allowed")]
    TooPrecise,
    /// Zero or negative.
    #[error("price must be positive")]
    NotPositive,
}

/// Parse a user-entered price.
///
/// Accepts unsigned decimals with at most two fractional digits ("10",
/// "10.5", "10.55"); signs, exponents, and stray characters are rejected.
///
/// # Errors
///
/// Returns a [`PriceError`] describing the first failed rule.
pub fn parse_price(input: &str) -> Result<Decimal, PriceError> {
    let input = input.trim();

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PriceError::Invalid);
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceError::Invalid);
        }
        if fraction.len() > 2 {
            return Err(PriceError::TooPrecise);
        }
    }

    let price = Decimal::from_str(input).map_err(|_| PriceError::Invalid)?;
    if price <= Decimal::ZERO {
        return Err(PriceError::NotPositive);
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_whole_and_two_place_prices() {
        assert_eq!(parse_price("10").expect("whole").to_string(), "10");
        assert_eq!(parse_price("10.5").expect("one place").to_string(), "10.5");
        assert_eq!(
            parse_price("10.55").expect("two places").to_string(),
            "10.55"
        );
        assert_eq!(parse_price(" 3.20 ").expect("trimmed").to_string(), "3.20");
    }

    #[test]
    fn test_rejects_extra_precision() {
        assert_eq!(parse_price("10.555"), Err(PriceError::TooPrecise));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(parse_price("0"), Err(PriceError::NotPositive));
        assert_eq!(parse_price("0.00"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_rejects_malformed_input() {
        for bad in ["", "abc", "-5", "+1", "1.", ".5", "1e3", "1,50", "1.2.3"] {
            assert_eq!(parse_price(bad), Err(PriceError::Invalid), "input: {bad}");
        }
    }
}
