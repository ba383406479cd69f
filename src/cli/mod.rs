// CLI module
// Command-line arguments, logging set-up and the interactive console session

mod args;
pub mod console;
pub mod session;

pub use args::CliArgs;
pub use console::Console;
pub use session::{LoginOutcome, MenuExit, SessionConfig, SessionController};

use clap::Parser;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so they never
/// mix with the console prompts on stdout. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
