use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Iban};

use super::LedgerError;

/// Ledger-wide settings. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Annual rate snapshotted into each account when it is opened.
    pub interest_rate: Amount,
    pub country_code: String,
    pub check_digits: u8,
    pub bank_code: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            interest_rate: Decimal::new(5, 2),
            country_code: "NL".to_string(),
            check_digits: 0,
            bank_code: "BANK".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn with_interest_rate(mut self, rate: Amount) -> Self {
        self.interest_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.country_code.len() != 2
            || !self.country_code.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LedgerError::InvalidConfig(format!(
                "country code must be two ASCII letters, got '{}'",
                self.country_code
            )));
        }
        if self.bank_code.is_empty() || !self.bank_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::InvalidConfig(format!(
                "bank code must be one or more ASCII letters, got '{}'",
                self.bank_code
            )));
        }
        if self.check_digits > 99 {
            return Err(LedgerError::InvalidConfig(format!(
                "check digits must be at most 99, got {}",
                self.check_digits
            )));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(LedgerError::InvalidConfig(format!(
                "interest rate must not be negative, got {}",
                self.interest_rate
            )));
        }
        Ok(())
    }

    /// Builds the identifier for `account_number` at this bank.
    ///
    /// Codes are upper-cased so the printed form parses back to the same key.
    pub fn iban_for(&self, account_number: u64) -> Iban {
        Iban::new(
            self.country_code.to_ascii_uppercase(),
            self.check_digits,
            self.bank_code.to_ascii_uppercase(),
            account_number,
        )
    }
}
