use crate::{config::DEFAULT_RETRIES, fault::Mode};
use clap::Parser;

const AFTER_HELP: &str = "\
SENTRY_DSN is read before arguments are parsed: without it even --help fails.
Exit codes: 2 for a missing or invalid SENTRY_DSN and for usage errors,
1 when the client fails to start, 101 after a reported panic.";

/// Initializes Sentry and crashes on purpose.
///
/// SENTRY_DSN must be set. It is read before any arguments are parsed, so
/// even --help exits with 2 when it is missing.
#[derive(Parser, Debug, Clone)]
#[command(name = "error-trigger", version, about, after_help = AFTER_HELP)]
pub struct Cli {
    /// What to do once the crash hooks are registered
    #[arg(long, value_enum, env = "ERROR_TRIGGER_MODE", default_value_t = Mode::NullDeref)]
    pub mode: Mode,

    /// Timeout in seconds for config mode (defaults to 30)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,
}
