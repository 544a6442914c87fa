use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Money and rates are exact decimals, so interest on 500.00 at 0.05 is
/// exactly 25.00 rather than a binary approximation of it.
pub type Amount = Decimal;

/// Format an amount with two decimal places, rounding half away from zero.
/// Example: 525 -> "525.00", 12.345 -> "12.35", -0.5 -> "-0.50"
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50, "12.5" -> 12.5, "-3" -> -3
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(525)), "525.00");
        assert_eq!(format_amount(Decimal::new(1234, 2)), "12.34");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_amount(Decimal::new(1, 2)), "0.01");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(-5, 1)), "-0.50");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(Decimal::from(50)));
        assert_eq!(parse_amount("50"), Ok(Decimal::from(50)));
        assert_eq!(parse_amount(" 12.5 "), Ok(Decimal::new(125, 1)));
        assert_eq!(parse_amount("-3"), Ok(Decimal::from(-3)));
        assert_eq!(parse_amount("0.05"), Ok(Decimal::new(5, 2)));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.34.56"), Err(ParseAmountError::InvalidFormat));
    }
}
