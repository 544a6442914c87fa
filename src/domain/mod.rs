mod account;
mod customer;
mod iban;
mod money;

pub use account::*;
pub use customer::*;
pub use iban::*;
pub use money::*;
