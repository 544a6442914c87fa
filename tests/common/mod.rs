// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use bankbook::application::Ledger;
use bankbook::domain::{Amount, Iban};
use rust_decimal::Decimal;

/// Shorthand for a whole-unit amount
pub fn amount(units: i64) -> Amount {
    Decimal::from(units)
}

/// Test fixture: two customers with one account each
pub struct StandardAccounts {
    pub ledger: Ledger,
    pub checking: Iban,
    pub savings: Iban,
}

impl StandardAccounts {
    /// Alice holds 1000 in checking, Bob holds 250 in savings
    pub fn create() -> Self {
        let mut ledger = Ledger::new();
        let alice = ledger.add_customer("Alice", "Jansen");
        let bob = ledger.add_customer("Bob", "Bakker");
        let checking = ledger
            .add_account_number(&alice, 1111111111, amount(1000))
            .unwrap();
        let savings = ledger
            .add_account_number(&bob, 2222222222, amount(250))
            .unwrap();
        Self {
            ledger,
            checking,
            savings,
        }
    }

    pub fn balances(&self) -> (Amount, Amount) {
        (
            self.ledger.get_balance(&self.checking).unwrap(),
            self.ledger.get_balance(&self.savings).unwrap(),
        )
    }
}
