//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and PIN validation
//! - `transaction`: Ledger entries and identifiers
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{is_valid_pin, Account};
pub use error::LedgerError;
pub use transaction::{AccountNumber, EntryKind, LedgerEntry, TIMESTAMP_FORMAT};
