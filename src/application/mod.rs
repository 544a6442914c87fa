// Application layer: the ledger and everything callers configure or read
// back from it. The CLI and the exporters only go through `Ledger`.

pub mod config;
pub mod error;
pub mod ledger;
pub mod reporting;

pub use config::*;
pub use error::*;
pub use ledger::*;
pub use reporting::*;
