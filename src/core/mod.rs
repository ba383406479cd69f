//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Storage abstraction for accounts and histories
//! - `ledger` - Deposit, withdrawal and transfer on a single account
//! - `recorder` - Per-session ordered log, export and receipt
//! - `directory` - Account directory with load/save and account creation
//! - `queue` - Simulated teller queue shown before the menu

pub mod directory;
pub mod ledger;
pub mod queue;
pub mod recorder;
pub mod traits;

pub use directory::AccountDirectory;
pub use queue::TellerQueue;
pub use recorder::TransactionRecorder;
pub use traits::{AccountRecord, LedgerStore};
