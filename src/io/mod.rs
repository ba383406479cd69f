//! I/O module
//!
//! Handles the flat-file CSV persistence.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, serialization)
//! - `row_reader` - Streaming CSV row reader with line numbers
//! - `csv_store` - `LedgerStore` implementation over a data directory

pub mod csv_format;
pub mod csv_store;
pub mod row_reader;

pub use csv_format::{write_accounts_csv, write_history_csv};
pub use csv_store::CsvStore;
pub use row_reader::RowReader;
