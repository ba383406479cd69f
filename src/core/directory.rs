//! Account directory
//!
//! This module provides the `AccountDirectory` which owns every account known
//! to the program and moves them to and from a [`LedgerStore`].
//!
//! The directory is responsible for:
//! - Loading accounts and their persisted histories at start-up
//! - Saving the account table after every change
//! - Generating account numbers and creating accounts
//! - Resolving accounts for login and transfers

use crate::core::traits::LedgerStore;
use crate::types::{is_valid_pin, Account, AccountNumber, LedgerEntry, LedgerError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Base of the generated account number range
pub const ACCOUNT_NUMBER_BASE: u64 = 10_000_000;

/// In-memory map of account number to account
///
/// Iteration is ordered by account number so saved tables are
/// deterministic.
#[derive(Debug, Default, Clone)]
pub struct AccountDirectory {
    accounts: BTreeMap<AccountNumber, Account>,
}

impl AccountDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all accounts and their histories from `store`
    ///
    /// Duplicate account numbers in the table are resolved last-write-wins
    /// for name, PIN and balance. Each account's history file is read once;
    /// a missing file means no prior history. If the account table cannot be
    /// read the failure is logged and an empty directory is returned.
    pub fn load<S: LedgerStore + ?Sized>(store: &S) -> Self {
        let records = match store.load_accounts() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "failed to load accounts, starting with an empty directory");
                return Self::new();
            }
        };

        let mut directory = Self::new();
        for record in records {
            if directory.accounts.contains_key(&record.account_number) {
                debug!(account = %record.account_number, "duplicate account row, later row wins");
            }
            directory.accounts.insert(
                record.account_number.clone(),
                Account::with_balance(record.account_number, record.name, record.pin, record.balance),
            );
        }

        for account in directory.accounts.values_mut() {
            match store.load_history(&account.account_number) {
                Ok(Some(entries)) => account.extend_history(entries),
                Ok(None) => {}
                Err(e) => warn!(
                    account = %account.account_number,
                    error = %e,
                    "failed to load history, continuing without it"
                ),
            }
        }

        info!(accounts = directory.len(), "loaded account directory");
        directory
    }

    /// Write every account to `store`, replacing the previous table
    pub fn save<S: LedgerStore + ?Sized>(&self, store: &S) -> Result<(), LedgerError> {
        store.save_accounts(&self.accounts())?;
        debug!(accounts = self.len(), "saved account directory");
        Ok(())
    }

    /// Next account number: `10000000 + number of accounts`
    ///
    /// Unique only while accounts are never removed; a removal followed by a
    /// creation would reuse the number of the newest account.
    pub fn generate_identifier(&self) -> AccountNumber {
        (ACCOUNT_NUMBER_BASE + self.accounts.len() as u64).to_string()
    }

    /// Create an account with a generated number and zero balance
    ///
    /// # Errors
    ///
    /// - `InvalidPin` if `pin` is not exactly four digits
    /// - `DuplicateAccount` if the generated number is already taken
    pub fn create_account(&mut self, name: &str, pin: &str) -> Result<&Account, LedgerError> {
        let pin = pin.trim();
        if !is_valid_pin(pin) {
            return Err(LedgerError::InvalidPin);
        }

        let account_number = self.generate_identifier();
        if self.accounts.contains_key(&account_number) {
            return Err(LedgerError::duplicate_account(&account_number));
        }

        info!(account = %account_number, "created account");
        Ok(self
            .accounts
            .entry(account_number.clone())
            .or_insert_with(|| Account::new(account_number, name.trim(), pin)))
    }

    /// Insert an account, replacing any account with the same number
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.account_number.clone(), account);
    }

    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn get_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(account_number)
    }

    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts ordered by account number
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    /// All account numbers in order
    pub fn account_numbers(&self) -> Vec<AccountNumber> {
        self.accounts.keys().cloned().collect()
    }

    /// Check a PIN against an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    pub fn authenticate(&self, account_number: &str, pin: &str) -> Result<bool, LedgerError> {
        self.get(account_number)
            .map(|account| account.verify_pin(pin))
            .ok_or_else(|| LedgerError::account_not_found(account_number))
    }

    /// Deposit into a directory account
    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> Result<LedgerEntry, LedgerError> {
        self.get_mut(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))?
            .deposit(amount)
    }

    /// Withdraw from a directory account
    pub fn withdraw(&mut self, account_number: &str, amount: Decimal) -> Result<LedgerEntry, LedgerError> {
        self.get_mut(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))?
            .withdraw(amount)
    }

    /// Transfer between two directory accounts
    ///
    /// Returns the `Transfer` entry recorded on the source account.
    ///
    /// # Errors
    ///
    /// - `SameAccountTransfer` if `from` and `to` are equal
    /// - `AccountNotFound` if either account does not exist
    /// - anything [`Account::transfer`] reports
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<LedgerEntry, LedgerError> {
        if from == to {
            return Err(LedgerError::same_account_transfer(from));
        }
        if !self.accounts.contains_key(to) {
            return Err(LedgerError::account_not_found(to));
        }

        // Two disjoint mutable borrows: take the source out, put it back.
        let mut source = self
            .accounts
            .remove(from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        let result = match self.accounts.get_mut(to) {
            Some(target) => source.transfer(amount, target),
            None => Err(LedgerError::account_not_found(to)),
        };
        self.accounts.insert(source.account_number.clone(), source);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::AccountRecord;
    use crate::io::CsvStore;
    use crate::types::EntryKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// In-memory store for exercising directory logic without files
    #[derive(Default)]
    struct MemoryStore {
        accounts: Vec<AccountRecord>,
        histories: RefCell<HashMap<String, Vec<LedgerEntry>>>,
        fail_accounts: bool,
    }

    impl LedgerStore for MemoryStore {
        fn load_accounts(&self) -> Result<Vec<AccountRecord>, LedgerError> {
            if self.fail_accounts {
                return Err(LedgerError::IoError {
                    message: "disk on fire".to_string(),
                });
            }
            Ok(self.accounts.clone())
        }

        fn save_accounts(&self, _accounts: &[&Account]) -> Result<(), LedgerError> {
            Ok(())
        }

        fn load_history(&self, account_number: &str) -> Result<Option<Vec<LedgerEntry>>, LedgerError> {
            Ok(self.histories.borrow().get(account_number).cloned())
        }

        fn save_history(&self, account_number: &str, entries: &[LedgerEntry]) -> Result<(), LedgerError> {
            self.histories
                .borrow_mut()
                .insert(account_number.to_string(), entries.to_vec());
            Ok(())
        }
    }

    fn record(number: &str, name: &str, balance: i64) -> AccountRecord {
        AccountRecord {
            account_number: number.to_string(),
            name: name.to_string(),
            pin: "1234".to_string(),
            balance: Decimal::new(balance, 0),
        }
    }

    fn directory_with(balances: &[(&str, i64)]) -> AccountDirectory {
        let mut directory = AccountDirectory::new();
        for (number, balance) in balances {
            directory.insert(Account::with_balance(*number, "Test", "1234", Decimal::new(*balance, 0)));
        }
        directory
    }

    #[test]
    fn test_new_creates_empty_directory() {
        let directory = AccountDirectory::new();
        assert!(directory.is_empty());
        assert_eq!(directory.generate_identifier(), "10000000");
    }

    #[test]
    fn test_generate_identifier_uses_account_count() {
        let directory = directory_with(&[("10000000", 0), ("10000001", 0)]);
        assert_eq!(directory.generate_identifier(), "10000002");
    }

    #[test]
    fn test_create_account_assigns_next_identifier() {
        let mut directory = directory_with(&[("10000000", 0), ("10000001", 0)]);

        let account = directory.create_account("Ada", "4321").unwrap();

        assert_eq!(account.account_number(), "10000002");
        assert_eq!(account.name(), "Ada");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_create_account_rejects_bad_pin() {
        let mut directory = AccountDirectory::new();
        assert_eq!(
            directory.create_account("Ada", "12").unwrap_err(),
            LedgerError::InvalidPin
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn test_create_account_refuses_to_reuse_number() {
        // Count-based numbering collides once the sequence has a gap.
        let mut directory = directory_with(&[("10000000", 0), ("10000002", 0)]);

        assert!(matches!(
            directory.create_account("Ada", "4321"),
            Err(LedgerError::DuplicateAccount { .. })
        ));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_authenticate() {
        let directory = directory_with(&[("10000000", 0)]);

        assert!(directory.authenticate("10000000", "1234").unwrap());
        assert!(!directory.authenticate("10000000", "0000").unwrap());
        assert!(matches!(
            directory.authenticate("99", "1234"),
            Err(LedgerError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_transfer_between_accounts() {
        let mut directory = directory_with(&[("10000000", 150), ("10000001", 0)]);

        let entry = directory
            .transfer("10000000", "10000001", Decimal::new(100, 0))
            .unwrap();

        assert_eq!(entry.kind(), EntryKind::Transfer);
        assert_eq!(directory.get("10000000").unwrap().balance(), Decimal::new(50, 0));
        assert_eq!(directory.get("10000001").unwrap().balance(), Decimal::new(100, 0));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_failed_transfer_keeps_source_in_directory() {
        let mut directory = directory_with(&[("10000000", 10), ("10000001", 0)]);

        let result = directory.transfer("10000000", "10000001", Decimal::new(100, 0));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(directory.get("10000000").unwrap().balance(), Decimal::new(10, 0));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_transfer_errors() {
        let mut directory = directory_with(&[("10000000", 10)]);

        assert!(matches!(
            directory.transfer("10000000", "10000000", Decimal::ONE),
            Err(LedgerError::SameAccountTransfer { .. })
        ));
        assert!(matches!(
            directory.transfer("10000000", "10000009", Decimal::ONE),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            directory.transfer("10000009", "10000000", Decimal::ONE),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert_eq!(directory.get("10000000").unwrap().balance(), Decimal::new(10, 0));
    }

    #[test]
    fn test_deposit_and_withdraw_unknown_account() {
        let mut directory = AccountDirectory::new();
        assert!(matches!(
            directory.deposit("1", Decimal::ONE),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            directory.withdraw("1", Decimal::ONE),
            Err(LedgerError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_load_last_write_wins_and_merges_history() {
        let store = MemoryStore {
            accounts: vec![
                record("10000000", "Old Name", 5),
                record("10000001", "Bob", 7),
                record("10000000", "New Name", 9),
            ],
            ..Default::default()
        };
        let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let history = vec![LedgerEntry::new(EntryKind::Deposit, Decimal::new(9, 0), timestamp)];
        store.save_history("10000000", &history).unwrap();

        let directory = AccountDirectory::load(&store);

        assert_eq!(directory.len(), 2);
        let account = directory.get("10000000").unwrap();
        assert_eq!(account.name(), "New Name");
        assert_eq!(account.balance(), Decimal::new(9, 0));
        assert_eq!(account.history(), history.as_slice());
        assert!(directory.get("10000001").unwrap().history().is_empty());
    }

    #[test]
    fn test_load_failure_yields_empty_directory() {
        let store = MemoryStore {
            fail_accounts: true,
            ..Default::default()
        };

        assert!(AccountDirectory::load(&store).is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path());
        let mut directory = AccountDirectory::new();
        directory.create_account("Ada", "0042").unwrap();
        directory.create_account("Bob", "9876").unwrap();
        directory.deposit("10000000", Decimal::new(12345, 2)).unwrap();

        directory.save(&store).unwrap();
        let reloaded = AccountDirectory::load(&store);

        assert_eq!(reloaded.account_numbers(), directory.account_numbers());
        for (before, after) in directory.accounts().iter().zip(reloaded.accounts()) {
            assert_eq!(before.account_number(), after.account_number());
            assert_eq!(before.name(), after.name());
            assert_eq!(before.pin(), after.pin());
            assert_eq!(before.balance(), after.balance());
        }
    }

    #[test]
    fn test_load_from_corrupt_table_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("accounts.csv"), "Account Number,Name,PIN,Balance\n1,Ada,1234,x\n")
            .unwrap();

        assert!(AccountDirectory::load(&CsvStore::new(dir.path())).is_empty());
    }

    #[test]
    fn test_negative_stored_balance_is_refused_at_load() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("accounts.csv"),
            "Account Number,Name,PIN,Balance\n10000000,Ada,1234,-5\n",
        )
        .unwrap();

        let directory = AccountDirectory::load(&CsvStore::new(dir.path()));

        assert!(directory.get("10000000").is_none());
    }
}
