//! Session transaction recorder
//!
//! This module provides the TransactionRecorder that accumulates the ledger
//! entries produced during one login session, in order. At the end of the
//! session (and after every menu action) the recorder is exported to the
//! account's persisted history and rendered as a receipt.

use crate::core::traits::LedgerStore;
use crate::types::{LedgerEntry, LedgerError};
use tracing::debug;

/// Message rendered when a session produced no entries
pub const EMPTY_RECEIPT: &str = "No transactions to display.";

const RECEIPT_TITLE: &str = "*** Session Transaction Receipt ***";
const RECEIPT_RULE: &str = "**********************************";

/// Ordered log of one session's ledger entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecorder {
    entries: Vec<LedgerEntry>,
}

impl TransactionRecorder {
    /// Create an empty recorder for a new session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, preserving insertion order
    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the recorded sequence as the account's persisted history
    ///
    /// Overwrites whatever was stored for `account_number`. Exporting the
    /// same sequence again produces the same content.
    pub fn export_to_storage<S: LedgerStore + ?Sized>(
        &self,
        store: &S,
        account_number: &str,
    ) -> Result<(), LedgerError> {
        store.save_history(account_number, &self.entries)?;
        debug!(
            account = account_number,
            entries = self.entries.len(),
            "exported session history"
        );
        Ok(())
    }

    /// Human-readable receipt of all recorded entries, in order
    pub fn render_receipt(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_RECEIPT.to_string();
        }

        let mut receipt = String::new();
        receipt.push_str(RECEIPT_TITLE);
        receipt.push('\n');
        for entry in &self.entries {
            receipt.push_str(&entry.to_string());
            receipt.push('\n');
        }
        receipt.push_str(RECEIPT_RULE);
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CsvStore;
    use crate::types::EntryKind;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn sample() -> TransactionRecorder {
        let mut recorder = TransactionRecorder::new();
        recorder.record(LedgerEntry::new(EntryKind::Deposit, Decimal::new(50, 0), at(0)));
        recorder.record(LedgerEntry::new(EntryKind::Withdraw, Decimal::new(125, 1), at(1)));
        recorder.record(LedgerEntry::new(EntryKind::Transfer, Decimal::new(100, 0), at(2)));
        recorder
    }

    #[test]
    fn test_record_preserves_order() {
        let recorder = sample();

        let kinds: Vec<EntryKind> = recorder.entries().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Deposit, EntryKind::Withdraw, EntryKind::Transfer]
        );
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn test_render_receipt_empty() {
        let recorder = TransactionRecorder::new();
        assert!(recorder.is_empty());
        assert_eq!(recorder.render_receipt(), "No transactions to display.");
    }

    #[test]
    fn test_render_receipt_lists_entries_in_order() {
        assert_eq!(
            sample().render_receipt(),
            "*** Session Transaction Receipt ***\n\
             Deposit | Amount: 50 | Timestamp: 2024-01-02 10:00:00.000000\n\
             Withdraw | Amount: 12.5 | Timestamp: 2024-01-02 10:01:00.000000\n\
             Transfer | Amount: 100 | Timestamp: 2024-01-02 10:02:00.000000\n\
             **********************************"
        );
    }

    #[test]
    fn test_export_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path());
        let recorder = sample();

        recorder.export_to_storage(&store, "10000000").unwrap();
        let first = fs::read(store.history_path("10000000")).unwrap();
        recorder.export_to_storage(&store, "10000000").unwrap();
        let second = fs::read(store.history_path("10000000")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_export_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path());

        sample().export_to_storage(&store, "10000000").unwrap();
        TransactionRecorder::new()
            .export_to_storage(&store, "10000000")
            .unwrap();

        let content = fs::read_to_string(store.history_path("10000000")).unwrap();
        assert_eq!(content, "Transaction Type,Amount,Timestamp\n");
    }
}
