use serde::{Deserialize, Serialize};

use crate::domain::{Amount, CustomerId, Iban};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReport {
    pub interest_rate: Amount,
    pub accounts: Vec<AccountSummary>,
    pub total_balance: Amount,
    pub total_interest: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub iban: Iban,
    pub customer_id: CustomerId,
    pub balance: Amount,
    pub interest_rate: Amount,
    /// What the next accrual would add at the current balance
    pub interest_next_year: Amount,
}
