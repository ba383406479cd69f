//! Account-related types for the ATM ledger
//!
//! This module defines the Account structure holding a customer's identity,
//! PIN, balance and ledger history. Balance-changing operations live in
//! [`crate::core::ledger`].

use super::transaction::{AccountNumber, LedgerEntry};
use rust_decimal::Decimal;

/// Customer account state
///
/// The account number is fixed at creation. The history is append-only and
/// keeps insertion order; it is only extended by the ledger operations or
/// when a persisted history is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub(crate) account_number: AccountNumber,
    pub(crate) name: String,
    pub(crate) pin: String,
    pub(crate) balance: Decimal,
    pub(crate) history: Vec<LedgerEntry>,
}

impl Account {
    /// Create a new account with a zero balance and empty history
    pub fn new(
        account_number: impl Into<AccountNumber>,
        name: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Account {
            account_number: account_number.into(),
            name: name.into(),
            pin: pin.into(),
            balance: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// Create an account with an opening balance, as read back from storage
    ///
    /// The caller supplies a validated, non-negative balance; stored rows are
    /// checked when they are converted.
    pub fn with_balance(
        account_number: impl Into<AccountNumber>,
        name: impl Into<String>,
        pin: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        let mut account = Self::new(account_number, name, pin);
        account.balance = balance;
        account
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Ordered ledger history, oldest first
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    /// Compare a candidate PIN with the stored one
    ///
    /// Plain string equality. Not hardened against timing or brute force.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin == candidate.trim()
    }

    /// Append previously persisted entries to the history
    pub(crate) fn extend_history(&mut self, entries: impl IntoIterator<Item = LedgerEntry>) {
        self.history.extend(entries);
    }
}

/// Check that a PIN is exactly four ASCII digits
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}
