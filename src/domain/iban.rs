use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// IBAN-shaped account identifier.
///
/// The check digits are carried as given; they are not computed from, or
/// validated against, the other fields. Two identifiers are the same key
/// exactly when all four fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iban {
    country_code: String,
    check_digits: u8,
    bank_code: String,
    account_number: u64,
}

impl Iban {
    pub fn new(
        country_code: impl Into<String>,
        check_digits: u8,
        bank_code: impl Into<String>,
        account_number: u64,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            check_digits,
            bank_code: bank_code.into(),
            account_number,
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn check_digits(&self) -> u8 {
        self.check_digits
    }

    pub fn bank_code(&self) -> &str {
        &self.bank_code
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }
}

/// Renders the compact form, e.g. `NL00BANK7830770891`.
impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{}{:010}",
            self.country_code, self.check_digits, self.bank_code, self.account_number
        )
    }
}

impl FromStr for Iban {
    type Err = ParseIbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() {
            return Err(ParseIbanError::InvalidCharacter);
        }
        if s.len() < 6 {
            return Err(ParseIbanError::TooShort);
        }

        let (country, rest) = s.split_at(2);
        if !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseIbanError::InvalidCountryCode);
        }

        let (check, rest) = rest.split_at(2);
        let check_digits: u8 = if check.chars().all(|c| c.is_ascii_digit()) {
            check.parse().map_err(|_| ParseIbanError::InvalidCheckDigits)?
        } else {
            return Err(ParseIbanError::InvalidCheckDigits);
        };

        let bank_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if bank_len == 0 {
            return Err(ParseIbanError::InvalidBankCode);
        }
        let (bank, number) = rest.split_at(bank_len);

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseIbanError::InvalidAccountNumber);
        }
        let account_number: u64 = number
            .parse()
            .map_err(|_| ParseIbanError::InvalidAccountNumber)?;

        Ok(Iban::new(
            country.to_ascii_uppercase(),
            check_digits,
            bank.to_ascii_uppercase(),
            account_number,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIbanError {
    TooShort,
    InvalidCharacter,
    InvalidCountryCode,
    InvalidCheckDigits,
    InvalidBankCode,
    InvalidAccountNumber,
}

impl fmt::Display for ParseIbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIbanError::TooShort => write!(f, "IBAN is too short"),
            ParseIbanError::InvalidCharacter => write!(f, "IBAN contains non-ASCII characters"),
            ParseIbanError::InvalidCountryCode => {
                write!(f, "IBAN must start with a two-letter country code")
            }
            ParseIbanError::InvalidCheckDigits => {
                write!(f, "IBAN check digits must be two decimal digits")
            }
            ParseIbanError::InvalidBankCode => write!(f, "IBAN is missing the bank code"),
            ParseIbanError::InvalidAccountNumber => {
                write!(f, "IBAN account number must be a non-empty run of digits")
            }
        }
    }
}

impl std::error::Error for ParseIbanError {}
