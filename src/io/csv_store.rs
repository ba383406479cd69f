//! Flat-file CSV ledger store
//!
//! Implements [`LedgerStore`] over a data directory holding:
//! - `accounts.csv` - one row per account
//! - `transactions_<account number>.csv` - one file per account history
//!
//! Every save rewrites the whole file. Writes go through a sibling temporary
//! file that is renamed over the target, so a reader never sees a half
//! written table.

use crate::core::traits::{AccountRecord, LedgerStore};
use crate::io::csv_format::{
    convert_account_row, convert_history_row, write_accounts_csv, write_history_csv, AccountRow,
    HistoryRow,
};
use crate::io::row_reader::RowReader;
use crate::types::{Account, LedgerEntry, LedgerError};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the account table
pub const ACCOUNTS_FILE: &str = "accounts.csv";

/// CSV store rooted at a data directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    /// Create a store for `root`; the directory is created on first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CsvStore { root: root.into() }
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.root.join(ACCOUNTS_FILE)
    }

    pub fn history_path(&self, account_number: &str) -> PathBuf {
        self.root.join(format!("transactions_{}.csv", account_number))
    }

    /// Replace `path` with whatever `write` produces
    fn overwrite<F>(&self, path: &Path, write: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), LedgerError>,
    {
        fs::create_dir_all(&self.root)?;

        let tmp_path = path.with_extension("csv.tmp");
        {
            let mut out = BufWriter::new(File::create(&tmp_path)?);
            write(&mut out)?;
            out.flush()?;
        }
        fs::rename(&tmp_path, path)?;

        debug!(path = %path.display(), "rewrote file");
        Ok(())
    }
}

impl LedgerStore for CsvStore {
    /// Read the account table
    ///
    /// A missing table means a fresh installation and yields no rows. Any
    /// malformed row fails the whole load.
    fn load_accounts(&self) -> Result<Vec<AccountRecord>, LedgerError> {
        let path = self.accounts_path();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        RowReader::<_, AccountRow>::new(file)
            .map(|result| result.and_then(|(line, row)| convert_account_row(row, line)))
            .collect()
    }

    fn save_accounts(&self, accounts: &[&Account]) -> Result<(), LedgerError> {
        self.overwrite(&self.accounts_path(), |out| write_accounts_csv(accounts, out))
    }

    /// Read one account's history
    ///
    /// Malformed rows are skipped with a warning; the rest of the file is
    /// still used.
    fn load_history(&self, account_number: &str) -> Result<Option<Vec<LedgerEntry>>, LedgerError> {
        let path = self.history_path(account_number);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for result in RowReader::<_, HistoryRow>::new(file) {
            match result.and_then(|(line, row)| convert_history_row(row, line)) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(
                    account = account_number,
                    path = %path.display(),
                    error = %e,
                    "skipping history row"
                ),
            }
        }

        Ok(Some(entries))
    }

    fn save_history(&self, account_number: &str, entries: &[LedgerEntry]) -> Result<(), LedgerError> {
        self.overwrite(&self.history_path(account_number), |out| {
            write_history_csv(entries, out)
        })
    }
}
