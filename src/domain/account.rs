use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, CustomerId, Iban, format_amount};

/// A single-owner bank account.
///
/// The balance can only move through `deposit`, `withdraw` and
/// `apply_interest`. The interest rate is a snapshot taken when the account
/// is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    owner: CustomerId,
    iban: Iban,
    balance: Amount,
    interest_rate: Amount,
}

impl Account {
    pub fn new(owner: CustomerId, iban: Iban, balance: Amount, interest_rate: Amount) -> Self {
        Self {
            owner,
            iban,
            balance,
            interest_rate,
        }
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn interest_rate(&self) -> Amount {
        self.interest_rate
    }

    /// Adds `amount` to the balance. No sign check is done here.
    /// Fails, leaving the balance untouched, if the sum is not representable.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), BalanceOverflow> {
        self.balance = self.balance.checked_add(amount).ok_or(BalanceOverflow)?;
        Ok(())
    }

    /// True when `deposit(amount)` would succeed.
    pub fn can_deposit(&self, amount: Amount) -> bool {
        self.balance.checked_add(amount).is_some()
    }

    /// Takes `amount` out if the balance covers it.
    /// Returns false and leaves the balance untouched otherwise.
    pub fn withdraw(&mut self, amount: Amount) -> bool {
        if self.balance < amount {
            return false;
        }
        match self.balance.checked_sub(amount) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Interest one accrual would add, without applying it.
    pub fn calculate_interest(&self) -> Result<Amount, BalanceOverflow> {
        self.balance
            .checked_mul(self.interest_rate)
            .ok_or(BalanceOverflow)
    }

    /// Balance after one accrual, without applying it.
    pub fn balance_with_interest(&self) -> Result<Amount, BalanceOverflow> {
        self.balance
            .checked_add(self.calculate_interest()?)
            .ok_or(BalanceOverflow)
    }

    pub fn apply_interest(&mut self) -> Result<(), BalanceOverflow> {
        self.balance = self.balance_with_interest()?;
        Ok(())
    }
}

/// The result of a balance update falls outside the decimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceOverflow;

impl fmt::Display for BalanceOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "balance overflow")
    }
}

impl std::error::Error for BalanceOverflow {}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owned by customer #{}: balance {}",
            self.iban,
            self.owner,
            format_amount(self.balance)
        )
    }
}
