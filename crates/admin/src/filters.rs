//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Format a decimal amount as a dollar price string.
///
/// Usage in templates: `{{ product.price|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

fn format_money(raw: &str) -> String {
    raw.parse::<f64>()
        .map_or_else(|_| format!("${raw}"), |amount| format!("${amount:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_pads_to_two_places() {
        assert_eq!(format_money("49.9"), "$49.90");
        assert_eq!(format_money("10"), "$10.00");
    }

    #[test]
    fn test_money_passes_through_unparsable_values() {
        assert_eq!(format_money("n/a"), "$n/a");
    }
}
