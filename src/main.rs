//! ATM Ledger CLI
//!
//! Interactive console ATM over flat CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ./bank --queue-delay-ms 0
//! RUST_LOG=atm_ledger=debug cargo run -- --data-dir ./bank
//! ```
//!
//! Accounts are read from `<data-dir>/accounts.csv` at start-up and written
//! back after every change; each session's transactions are written to
//! `<data-dir>/transactions_<account>.csv`. The program runs until standard
//! input is closed.
//!
//! # Exit Codes
//!
//! - 0: Input closed normally
//! - 1: Console I/O error

use atm_ledger::cli::{self, Console, SessionController};
use atm_ledger::core::AccountDirectory;
use atm_ledger::io::CsvStore;
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_tracing(&args.log_level);

    let store = CsvStore::new(&args.data_dir);
    let mut directory = AccountDirectory::load(&store);

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = SessionController::new(
        &mut directory,
        &store,
        console,
        args.session_config(),
        rand::thread_rng(),
    );

    if let Err(e) = session.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
