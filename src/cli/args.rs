use crate::cli::session::SessionConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Console ATM simulator over flat CSV account files
#[derive(Parser, Debug)]
#[command(name = "atm-ledger")]
#[command(about = "Console ATM simulator over flat CSV account files", long_about = None)]
pub struct CliArgs {
    /// Directory holding accounts.csv and the per-account history files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding accounts.csv and transactions_<account>.csv files"
    )]
    pub data_dir: PathBuf,

    /// Pause between teller queue announcements, in milliseconds
    #[arg(
        long = "queue-delay-ms",
        value_name = "MS",
        default_value_t = 3000,
        help = "Pause between queue position announcements in milliseconds (0 disables)"
    )]
    pub queue_delay_ms: u64,

    /// Log filter directive, overridden by RUST_LOG
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter (e.g. 'info', 'atm_ledger=debug'); RUST_LOG takes precedence"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Build the session settings from the parsed arguments
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            queue_delay: Duration::from_millis(self.queue_delay_ms),
        }
    }
}
