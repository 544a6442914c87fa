use thiserror::Error;

use crate::domain::{Amount, Iban};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Unknown account: {0}")]
    UnknownAccount(Iban),

    #[error("Transfer failed: insufficient funds in account {iban}: balance {balance}, required {required}")]
    TransferFailed {
        iban: Iban,
        balance: Amount,
        required: Amount,
    },

    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(Iban),

    #[error("Total {0} would overflow")]
    TotalOverflow(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
