pub mod bank_loader;
pub mod bank_registry;

pub use bank_registry::{BankRegistry, CsvBankRegistry};
