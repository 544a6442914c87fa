use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::application::{Ledger, LedgerConfig};
use crate::domain::{Amount, Iban, parse_amount};
use crate::io::Exporter;

/// Account numbers seeded by `demo` when none are given.
pub const DEMO_ACCOUNT_NUMBERS: [u64; 4] = [7830770891, 5595284773, 9054943327, 8966820263];

/// Bankbook - in-memory banking ledger
#[derive(Parser)]
#[command(name = "bankbook")]
#[command(about = "An in-memory banking ledger with IBAN accounts, transfers and interest")]
#[command(version)]
pub struct Cli {
    /// Ledger configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed demo accounts with random balances, then show them before and after one interest run
    Demo {
        /// Account number to open (repeatable; defaults to four demo accounts)
        #[arg(long = "account")]
        accounts: Vec<u64>,

        /// Seed for the random balances, for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Transfer to run before interest, as FROM,TO,AMOUNT (repeatable)
        #[arg(long = "transfer")]
        transfers: Vec<String>,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let config = load_config(self.config.as_deref())?;
        let mut ledger = Ledger::with_config(config)?;

        match self.command {
            Commands::Demo {
                accounts,
                seed,
                transfers,
                format,
                output,
            } => {
                let numbers = if accounts.is_empty() {
                    DEMO_ACCOUNT_NUMBERS.to_vec()
                } else {
                    accounts
                };
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                seed_demo_accounts(&mut ledger, &numbers, &mut rng)?;
                apply_transfers(&mut ledger, &transfers)?;

                let writer: Box<dyn Write> = match output.as_deref() {
                    Some(path) => {
                        let file = File::create(path).with_context(|| {
                            format!("Failed to create output file: {}", path.display())
                        })?;
                        Box::new(file)
                    }
                    None => Box::new(stdout()),
                };

                let count = run_demo(&mut ledger, &format, writer)?;
                if output.is_some() {
                    eprintln!("Exported {} accounts", count);
                }
            }
        }

        Ok(())
    }
}

/// Logs go to stderr so they never mix with report output.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Read a JSON config file, or fall back to the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    match path {
        None => Ok(LedgerConfig::default()),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            LedgerConfig::from_json_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path.display()))
        }
    }
}

/// Open one account per number, each for a fresh customer "x x", with a
/// whole balance drawn from [200, 1000).
pub fn seed_demo_accounts<R: Rng>(
    ledger: &mut Ledger,
    numbers: &[u64],
    rng: &mut R,
) -> Result<Vec<Iban>> {
    let mut ibans = Vec::with_capacity(numbers.len());
    for &number in numbers {
        let customer = ledger.add_customer("x", "x");
        let balance = Decimal::from(rng.gen_range(200i64..1000));
        ibans.push(ledger.add_account_number(&customer, number, balance)?);
    }
    Ok(ibans)
}

/// Parse a `FROM,TO,AMOUNT` transfer argument.
pub fn parse_transfer(input: &str) -> Result<(Iban, Iban, Amount)> {
    let parts: Vec<&str> = input.split(',').collect();
    let [from, to, amount] = parts.as_slice() else {
        anyhow::bail!(
            "Invalid transfer '{}'. Use FROM,TO,AMOUNT (e.g. NL00BANK7830770891,NL00BANK5595284773,50)",
            input
        );
    };

    let from: Iban = from
        .parse()
        .with_context(|| format!("Invalid source IBAN '{}'", from))?;
    let to: Iban = to
        .parse()
        .with_context(|| format!("Invalid destination IBAN '{}'", to))?;
    let amount =
        parse_amount(amount).with_context(|| format!("Invalid amount '{}'", amount))?;
    Ok((from, to, amount))
}

/// Run each transfer argument in order, stopping at the first failure.
pub fn apply_transfers(ledger: &mut Ledger, transfers: &[String]) -> Result<usize> {
    for input in transfers {
        let (from, to, amount) = parse_transfer(input)?;
        ledger
            .transfer_money(&from, &to, amount)
            .with_context(|| format!("Transfer '{}' failed", input))?;
    }
    Ok(transfers.len())
}

/// Apply one round of interest and write the result in `format`.
///
/// `table` prints the report before and after the interest run; `json` and
/// `csv` export the ledger as it stands afterwards. Returns the number of
/// accounts written.
pub fn run_demo<W: Write>(ledger: &mut Ledger, format: &str, mut writer: W) -> Result<usize> {
    let count = ledger.account_count();
    match format {
        "table" => {
            writeln!(writer, "{}", ledger)?;
            ledger.apply_interest()?;
            writeln!(writer, "{}", ledger)?;
            writer.flush()?;
            Ok(count)
        }
        "json" => {
            ledger.apply_interest()?;
            let snapshot = Exporter::new(ledger).export_snapshot_json(writer)?;
            Ok(snapshot.accounts.len())
        }
        "csv" => {
            ledger.apply_interest()?;
            Exporter::new(ledger).export_accounts_csv(writer)
        }
        _ => {
            anyhow::bail!(
                "Invalid format '{}'. Valid formats: table, json, csv",
                format
            );
        }
    }
}
