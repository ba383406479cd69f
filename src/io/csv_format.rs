//! CSV format handling for account and history files
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization of both file layouts
//! - Conversion from CSV rows to domain types
//! - Serialization of accounts and ledger entries
//!
//! All functions are pure (no file system access) for easy testing.

use crate::core::traits::AccountRecord;
use crate::types::{Account, EntryKind, LedgerEntry, LedgerError};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Header of the account table
pub const ACCOUNT_HEADER: [&str; 4] = ["Account Number", "Name", "PIN", "Balance"];

/// Header of a per-account history file
pub const HISTORY_HEADER: [&str; 3] = ["Transaction Type", "Amount", "Timestamp"];

/// Lenient layout accepted when reading timestamps back
///
/// `%.f` makes the fractional part optional.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Account table row as read from disk
///
/// All fields are kept as strings and validated in [`convert_account_row`]
/// so that the error can name the offending line.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountRow {
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "PIN")]
    pub pin: String,
    #[serde(rename = "Balance")]
    pub balance: String,
}

/// History file row as read from disk
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HistoryRow {
    #[serde(rename = "Transaction Type")]
    pub kind: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Parse a decimal, accepting scientific notation as a fallback
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Convert an AccountRow to an AccountRecord
///
/// # Errors
///
/// Returns `InvalidRecord` if the account number is blank or the balance is
/// not a non-negative number.
pub fn convert_account_row(row: AccountRow, line: u64) -> Result<AccountRecord, LedgerError> {
    let account_number = row.account_number.trim().to_string();
    if account_number.is_empty() {
        return Err(LedgerError::invalid_record(line, "missing account number"));
    }

    let balance = parse_decimal(&row.balance)
        .filter(|b| !b.is_sign_negative())
        .ok_or_else(|| {
            LedgerError::invalid_record(line, format!("invalid balance '{}'", row.balance))
        })?;

    Ok(AccountRecord {
        account_number,
        name: row.name,
        pin: row.pin.trim().to_string(),
        balance,
    })
}

/// Convert a HistoryRow to a LedgerEntry
///
/// # Errors
///
/// Returns `InvalidRecord` for an unknown transaction type, a non-positive or
/// malformed amount, or an unreadable timestamp.
pub fn convert_history_row(row: HistoryRow, line: u64) -> Result<LedgerEntry, LedgerError> {
    let kind = EntryKind::from_str(&row.kind).map_err(|e| LedgerError::invalid_record(line, e))?;

    let amount = parse_decimal(&row.amount)
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| LedgerError::invalid_record(line, format!("invalid amount '{}'", row.amount)))?;

    let timestamp = NaiveDateTime::parse_from_str(row.timestamp.trim(), TIMESTAMP_PARSE_FORMAT)
        .map_err(|e| {
            LedgerError::invalid_record(line, format!("invalid timestamp '{}': {}", row.timestamp, e))
        })?;

    Ok(LedgerEntry::new(kind, amount, timestamp))
}

/// Write accounts to CSV format
///
/// Writes the columns `Account Number, Name, PIN, Balance` in the order the
/// accounts are given.
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(ACCOUNT_HEADER)?;

    for account in accounts {
        writer.write_record([
            account.account_number(),
            account.name(),
            account.pin(),
            account.balance().to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write ledger entries to CSV format
///
/// Writes the columns `Transaction Type, Amount, Timestamp` preserving the
/// order of `entries`. The output depends only on the entries, so writing
/// the same sequence twice yields identical bytes.
pub fn write_history_csv(entries: &[LedgerEntry], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(HISTORY_HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.kind().as_str(),
            entry.amount().to_string().as_str(),
            entry.formatted_timestamp().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
