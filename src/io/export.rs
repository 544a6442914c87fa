use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::Ledger;
use crate::domain::{Account, Amount, Customer, format_amount};

/// Full ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub interest_rate: Amount,
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export accounts, with owner names and projected interest, to CSV format.
    /// Money columns are rounded to two decimals; `interest_rate` is written
    /// exactly as stored (e.g. `0.05`).
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "iban",
            "customer_id",
            "first_name",
            "last_name",
            "balance",
            "interest_rate",
            "interest_next_year",
        ])?;

        let mut count = 0;
        for account in self.ledger.accounts() {
            let customer = self.ledger.get_customer(account.owner())?;

            csv_writer.write_record([
                account.iban().to_string(),
                customer.id().to_string(),
                customer.first_name().to_string(),
                customer.last_name().to_string(),
                format_amount(account.balance()),
                account.interest_rate().to_string(),
                format_amount(account.calculate_interest()?),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole ledger as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            interest_rate: self.ledger.interest_rate(),
            customers: self.ledger.customers().to_vec(),
            accounts: self.ledger.accounts().into_iter().cloned().collect(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
