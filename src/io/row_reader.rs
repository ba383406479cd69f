//! CSV row reader with iterator interface
//!
//! Provides a streaming iterator over deserialized rows of a CSV source,
//! tagging each row with its line number so conversion errors can point at
//! the offending line.
//!
//! ```no_run
//! use atm_ledger::io::csv_format::HistoryRow;
//! use atm_ledger::io::row_reader::RowReader;
//! use std::fs::File;
//!
//! let file = File::open("transactions_10000000.csv").unwrap();
//! for result in RowReader::<_, HistoryRow>::new(file) {
//!     match result {
//!         Ok((line, row)) => println!("line {}: {:?}", line, row),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::marker::PhantomData;

/// Streaming CSV row reader
///
/// The header row is required and used to match columns by name. Fields are
/// trimmed and rows with a different field count are still handed to serde,
/// which reports them as errors.
#[derive(Debug)]
pub struct RowReader<R: Read, Row> {
    reader: csv::Reader<R>,
    line_num: u64,
    _row: PhantomData<Row>,
}

impl<R: Read, Row: DeserializeOwned> RowReader<R, Row> {
    /// Wrap any reader; nothing is read until the first call to `next`
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
            _row: PhantomData,
        }
    }
}

impl<R: Read, Row: DeserializeOwned> Iterator for RowReader<R, Row> {
    type Item = Result<(u64, Row), LedgerError>;

    /// Get the next row with its 1-based line number
    ///
    /// # Returns
    ///
    /// * `Some(Ok((line, row)))` - Successfully deserialized row
    /// * `Some(Err(LedgerError))` - Malformed row
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<Row>();
        let result = deserializer.next()?;
        self.line_num += 1;

        Some(match result {
            Ok(row) => Ok((self.line_num, row)),
            Err(e) => Err(e.into()),
        })
    }
}
