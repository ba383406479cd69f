//! Error types for the ATM ledger
//!
//! This module defines all error types that can occur while operating on
//! accounts and their persisted files. Errors are designed to be descriptive
//! and user-friendly for console output.
//!
//! # Error Categories
//!
//! - **Storage Errors**: I/O failures, malformed CSV rows
//! - **Input Errors**: non-positive or malformed amounts, malformed PINs
//! - **Ledger Errors**: insufficient funds, unknown accounts, self transfers
//! - **Arithmetic Errors**: overflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// Every variant is recoverable from the point of view of a console session:
/// the operation is rejected, the account state is left unchanged and the
/// user is told why.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Raised when a persisted file cannot be read as CSV at all.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A CSV row was readable but its fields do not describe a valid record
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord {
        /// Line number of the offending row
        line: u64,
        /// Description of the problem
        message: String,
    },

    /// Amount is malformed, zero or negative
    #[error("Invalid amount '{amount}': amounts must be positive numbers")]
    InvalidAmount {
        /// The rejected amount as entered
        amount: String,
    },

    /// PIN is not exactly four digits
    #[error("PIN must be a 4-digit number.")]
    InvalidPin,

    /// Insufficient funds for withdrawal or transfer
    ///
    /// The operation is rejected and the account state remains unchanged.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: String,
        /// Current balance
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Referenced account is absent from the directory
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account number that was looked up
        account: String,
    },

    /// Generated account number is already in use
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// Account number that collided
        account: String,
    },

    /// Source and target of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccountTransfer {
        /// Account number used on both sides
        account: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        LedgerError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create a SameAccountTransfer error
    pub fn same_account_transfer(account: &str) -> Self {
        LedgerError::SameAccountTransfer {
            account: account.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        LedgerError::InvalidRecord {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::io_error(
        LedgerError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: "-5".to_string() },
        "Invalid amount '-5': amounts must be positive numbers"
    )]
    #[case::invalid_pin(LedgerError::InvalidPin, "PIN must be a 4-digit number.")]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds {
            account: "10000000".to_string(),
            balance: Decimal::new(100, 0),
            requested: Decimal::new(150, 0),
        },
        "Insufficient funds in account 10000000: balance 100, requested 150"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account: "99".to_string() },
        "Account 99 not found"
    )]
    #[case::same_account_transfer(
        LedgerError::SameAccountTransfer { account: "10000000".to_string() },
        "Cannot transfer from account 10000000 to itself"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account: "1".to_string() },
        "Arithmetic overflow in deposit for account 1"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds("1", Decimal::ONE, Decimal::TWO),
        LedgerError::InsufficientFunds { account: "1".to_string(), balance: Decimal::ONE, requested: Decimal::TWO }
    )]
    #[case::account_not_found(
        LedgerError::account_not_found("42"),
        LedgerError::AccountNotFound { account: "42".to_string() }
    )]
    #[case::invalid_amount(
        LedgerError::invalid_amount("abc"),
        LedgerError::InvalidAmount { amount: "abc".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
