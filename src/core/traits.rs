//! Core traits for ledger persistence
//!
//! This module defines the storage abstraction used by the account directory
//! and the session recorder, so the in-memory ledger never touches files
//! directly.

use crate::types::{Account, LedgerEntry, LedgerError};
use rust_decimal::Decimal;

/// One row of the persisted account table
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub account_number: String,
    pub name: String,
    pub pin: String,
    pub balance: Decimal,
}

/// Trait for loading and saving accounts and their histories
///
/// Saves always overwrite what was stored before; there is no append mode.
pub trait LedgerStore {
    /// Read every row of the account table, in file order
    fn load_accounts(&self) -> Result<Vec<AccountRecord>, LedgerError>;

    /// Replace the account table with the given accounts
    fn save_accounts(&self, accounts: &[&Account]) -> Result<(), LedgerError>;

    /// Read the persisted history of one account
    ///
    /// Returns `Ok(None)` when no history has been stored for the account.
    fn load_history(&self, account_number: &str) -> Result<Option<Vec<LedgerEntry>>, LedgerError>;

    /// Replace the persisted history of one account
    fn save_history(&self, account_number: &str, entries: &[LedgerEntry]) -> Result<(), LedgerError>;
}
