pub mod application;
pub mod cli;
pub mod domain;
pub mod io;

pub use application::{Ledger, LedgerConfig, LedgerError};
pub use domain::*;
