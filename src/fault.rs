//! Deliberate faults.

use crate::{config::Config, Reporter};
use clap::ValueEnum;
use std::fmt;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Resolve the config and log, without faulting
    Config,
    /// Unwrap an absent reference, caught by the panic hook
    Panic,
    /// Read through a null pointer, caught by the minidump reporter
    NullDeref,
    /// Abort the process, caught by the minidump reporter
    Abort,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Config => "config",
            Mode::Panic => "panic",
            Mode::NullDeref => "null-deref",
            Mode::Abort => "abort",
        }
    }

    /// Whether reporting this fault needs the out-of-process reporter.
    pub fn is_native(&self) -> bool {
        matches!(self, Mode::NullDeref | Mode::Abort)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `mode`. Only returns in [`Mode::Config`].
///
/// Borrowing the [`Reporter`] means the flush and panic hooks are registered
/// before any fault can fire.
pub fn trigger(reporter: &Reporter, mode: Mode, mut config: Config) {
    reporter.set_tag("fault", mode.as_str());

    if mode.is_native() && !reporter.has_crash_reporter() {
        tracing::warn!("crash reporter is not running, {mode} will not be reported");
    }

    tracing::info!("triggering {mode}");

    match mode {
        Mode::Config => {
            let timeout = config.resolve_timeout();
            tracing::info!(
                retries = config.retries,
                "Starting with timeout: {} seconds",
                timeout.as_secs()
            );
        }
        Mode::Panic => {
            let timeout: Option<&u64> = std::hint::black_box(None);
            let seconds = *timeout.unwrap();
            tracing::info!("Starting with timeout: {seconds} seconds");
        }
        Mode::NullDeref => unsafe { sadness_generator::raise_segfault() },
        Mode::Abort => std::process::abort(),
    }
}
