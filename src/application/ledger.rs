use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{Account, Amount, Customer, CustomerId, Iban, format_amount};

use super::{AccountSummary, LedgerConfig, LedgerError, LedgerReport};

/// In-memory bank: the single owner of every customer and account.
/// This is the primary interface for any client (CLI, tests, embedding code).
#[derive(Debug, Clone)]
pub struct Ledger {
    config: LedgerConfig,
    accounts: HashMap<Iban, Account>,
    customers: Vec<Customer>,
    next_customer_id: CustomerId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(LedgerConfig::default())
    }

    /// Create an empty ledger, rejecting invalid configuration.
    pub fn with_config(config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: LedgerConfig) -> Self {
        Self {
            config,
            accounts: HashMap::new(),
            customers: Vec::new(),
            next_customer_id: 0,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ========================
    // Customer operations
    // ========================

    /// Register a customer under the next sequential id.
    /// Names are not checked for uniqueness.
    pub fn add_customer(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Customer {
        let customer = Customer::new(self.next_customer_id, first_name.into(), last_name.into());
        self.next_customer_id += 1;
        self.customers.push(customer.clone());
        debug!(customer_id = customer.id(), "added customer");
        customer
    }

    /// Find a customer by id.
    pub fn get_customer(&self, id: CustomerId) -> Result<&Customer, LedgerError> {
        self.customers
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| LedgerError::CustomerNotFound(format!("#{}", id)))
    }

    /// Find the first customer whose names match exactly.
    pub fn get_customer_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<&Customer, LedgerError> {
        self.customers
            .iter()
            .find(|c| c.has_name(first_name, last_name))
            .ok_or_else(|| LedgerError::CustomerNotFound(format!("{} {}", first_name, last_name)))
    }

    /// Rejects customers this ledger did not issue, including look-alikes
    /// from another ledger that reuse a local id under different names.
    fn ensure_registered(&self, customer: &Customer) -> Result<(), LedgerError> {
        match self.get_customer(customer.id()) {
            Ok(registered) if registered == customer => Ok(()),
            _ => {
                warn!(customer_id = customer.id(), "customer is not registered in this ledger");
                Err(LedgerError::CustomerNotFound(customer.to_string()))
            }
        }
    }

    /// All customers in registration order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    // ========================
    // Account operations
    // ========================

    /// Open an account for `customer` under `iban` at the ledger's current rate.
    ///
    /// `customer` must have been issued by this ledger. An existing account
    /// with the same iban is replaced, balance and all.
    pub fn add_account(
        &mut self,
        customer: &Customer,
        iban: Iban,
        balance: Amount,
    ) -> Result<Iban, LedgerError> {
        self.ensure_registered(customer)?;
        let account = Account::new(
            customer.id(),
            iban.clone(),
            balance,
            self.config.interest_rate,
        );
        if let Some(previous) = self.accounts.insert(iban.clone(), account) {
            warn!(
                iban = %iban,
                previous_owner = previous.owner(),
                previous_balance = %previous.balance(),
                "replaced existing account"
            );
        }
        debug!(iban = %iban, customer_id = customer.id(), balance = %balance, "opened account");
        Ok(iban)
    }

    /// Open an account at this bank's configured country and bank code.
    pub fn add_account_number(
        &mut self,
        customer: &Customer,
        account_number: u64,
        balance: Amount,
    ) -> Result<Iban, LedgerError> {
        let iban = self.config.iban_for(account_number);
        self.add_account(customer, iban, balance)
    }

    pub fn get_account(&self, iban: &Iban) -> Result<&Account, LedgerError> {
        self.accounts
            .get(iban)
            .ok_or_else(|| LedgerError::UnknownAccount(iban.clone()))
    }

    pub fn get_balance(&self, iban: &Iban) -> Result<Amount, LedgerError> {
        Ok(self.get_account(iban)?.balance())
    }

    /// Identifiers of every account owned by `customer`, sorted.
    pub fn get_accounts_by_customer(&self, customer: &Customer) -> Vec<Iban> {
        let mut ibans: Vec<Iban> = self
            .accounts
            .values()
            .filter(|account| account.owner() == customer.id())
            .map(|account| account.iban().clone())
            .collect();
        ibans.sort();
        ibans
    }

    /// All accounts, sorted by iban.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.iban().cmp(b.iban()));
        accounts
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    // ========================
    // Money movement
    // ========================

    /// Move `amount` from one account to another.
    ///
    /// Both accounts must exist before anything changes. If the source
    /// cannot cover the amount the destination is never touched.
    pub fn transfer_money(
        &mut self,
        from: &Iban,
        to: &Iban,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(from) {
            return Err(LedgerError::UnknownAccount(from.clone()));
        }
        if !self.accounts.contains_key(to) {
            return Err(LedgerError::UnknownAccount(to.clone()));
        }
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "transfer amount must not be negative, got {}",
                amount
            )));
        }
        if from != to && !self.get_account(to)?.can_deposit(amount) {
            warn!(from = %from, to = %to, amount = %amount, "transfer rejected: destination overflow");
            return Err(LedgerError::BalanceOverflow(to.clone()));
        }

        let source = self
            .accounts
            .get_mut(from)
            .ok_or_else(|| LedgerError::UnknownAccount(from.clone()))?;
        if !source.withdraw(amount) {
            warn!(from = %from, to = %to, amount = %amount, "transfer rejected: insufficient funds");
            return Err(LedgerError::TransferFailed {
                iban: from.clone(),
                balance: source.balance(),
                required: amount,
            });
        }

        self.accounts
            .get_mut(to)
            .ok_or_else(|| LedgerError::UnknownAccount(to.clone()))?
            .deposit(amount)
            .map_err(|_| LedgerError::BalanceOverflow(to.clone()))?;

        debug!(from = %from, to = %to, amount = %amount, "transferred");
        Ok(())
    }

    // ========================
    // Interest
    // ========================

    /// The configured rate new accounts are opened with.
    pub fn interest_rate(&self) -> Amount {
        self.config.interest_rate
    }

    /// Accrue one period of interest on every account at its own rate.
    ///
    /// Either every account accrues or none does: if any new balance would
    /// overflow, nothing is changed.
    pub fn apply_interest(&mut self) -> Result<(), LedgerError> {
        let mut accrued = Decimal::ZERO;
        for account in self.accounts.values() {
            account
                .balance_with_interest()
                .map_err(|_| LedgerError::BalanceOverflow(account.iban().clone()))?;
        }
        for account in self.accounts.values_mut() {
            let interest = account
                .calculate_interest()
                .map_err(|_| LedgerError::BalanceOverflow(account.iban().clone()))?;
            account
                .apply_interest()
                .map_err(|_| LedgerError::BalanceOverflow(account.iban().clone()))?;
            accrued = accrued.saturating_add(interest);
        }
        info!(
            accounts = self.accounts.len(),
            accrued = %accrued,
            "applied interest"
        );
        Ok(())
    }

    // ========================
    // Reporting
    // ========================

    pub fn report(&self) -> Result<LedgerReport, LedgerError> {
        let accounts = self
            .accounts()
            .into_iter()
            .map(|account| {
                let interest_next_year = account
                    .calculate_interest()
                    .map_err(|_| LedgerError::BalanceOverflow(account.iban().clone()))?;
                Ok(AccountSummary {
                    iban: account.iban().clone(),
                    customer_id: account.owner(),
                    balance: account.balance(),
                    interest_rate: account.interest_rate(),
                    interest_next_year,
                })
            })
            .collect::<Result<Vec<AccountSummary>, LedgerError>>()?;

        let total_balance = checked_total(accounts.iter().map(|a| a.balance), "balance")?;
        let total_interest =
            checked_total(accounts.iter().map(|a| a.interest_next_year), "interest")?;

        Ok(LedgerReport {
            interest_rate: self.interest_rate(),
            total_balance,
            total_interest,
            accounts,
        })
    }
}

fn checked_total(
    mut amounts: impl Iterator<Item = Amount>,
    what: &str,
) -> Result<Amount, LedgerError> {
    amounts
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| LedgerError::TotalOverflow(what.to_string()))
}

/// One line per account: `<account> - Interest next year: <amount>`.
impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for account in self.accounts() {
            let interest = match account.calculate_interest() {
                Ok(interest) => format_amount(interest),
                Err(_) => "overflow".to_string(),
            };
            writeln!(f, "{} - Interest next year: {}", account, interest)?;
        }
        Ok(())
    }
}
