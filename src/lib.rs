//! ATM Ledger Library
//! # Overview
//!
//! This library implements a single-user console ATM: customer accounts,
//! PIN-gated logins, deposits, withdrawals and transfers, with accounts and
//! per-account transaction histories persisted to flat CSV files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LedgerEntry, errors)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Balance mutation on a single account
//!   - [`core::recorder`] - Session transaction log, export and receipt
//!   - [`core::directory`] - Account directory, load/save, account creation
//!   - [`core::queue`] - Simulated teller queue
//! - [`io`] - CSV persistence behind the [`core::LedgerStore`] trait
//! - [`cli`] - Argument parsing, logging set-up and the console session
//!
//! # Ledger Entries
//!
//! Every successful balance change appends one entry to the account history:
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (requires sufficient balance)
//! - **Transfer**: Debit the source; the target records a Deposit
//!
//! Balances never go negative; rejected operations leave the account as it was.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountDirectory, LedgerStore, TellerQueue, TransactionRecorder};
pub use crate::io::CsvStore;
pub use crate::types::{Account, AccountNumber, EntryKind, LedgerEntry, LedgerError};
