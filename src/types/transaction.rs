//! Transaction-related types for the ATM ledger
//!
//! This module defines the ledger entry kinds and the immutable entry record
//! appended to an account history for every balance-affecting operation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Account identifier
///
/// Eight-digit numeric string, e.g. `"10000000"`.
pub type AccountNumber = String;

/// Timestamp layout used when persisting ledger entries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Kinds of balance-affecting operations recorded in a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Funds credited to the account
    Deposit,

    /// Funds debited from the account
    Withdraw,

    /// Funds sent to another account
    ///
    /// Only the sending side records this kind. The receiving account
    /// records a plain `Deposit`.
    Transfer,
}

impl EntryKind {
    /// Label used in persisted files and receipts
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "Deposit",
            EntryKind::Withdraw => "Withdraw",
            EntryKind::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(EntryKind::Deposit),
            "withdraw" | "withdrawal" => Ok(EntryKind::Withdraw),
            "transfer" => Ok(EntryKind::Transfer),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

/// One immutable record of a balance-affecting operation
///
/// Entries are created at the moment an operation succeeds and are never
/// mutated afterwards. Fields are private; use the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    kind: EntryKind,
    amount: Decimal,
    timestamp: NaiveDateTime,
}

impl LedgerEntry {
    /// Create an entry with an explicit timestamp
    pub fn new(kind: EntryKind, amount: Decimal, timestamp: NaiveDateTime) -> Self {
        LedgerEntry {
            kind,
            amount,
            timestamp,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp rendered in the persisted layout
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Amount: {} | Timestamp: {}",
            self.kind,
            self.amount,
            self.formatted_timestamp()
        )
    }
}
