//! Starts a Sentry client, registers the crash capture hooks and then
//! deliberately crashes so the report can be inspected on a dashboard.

pub mod cli;
pub mod config;
pub mod dsn;
mod error;
pub mod fault;
pub mod logging;
pub mod minidump;
mod reporter;

pub use error::StartupError;
pub use reporter::{client_options, Reporter, FLUSH_TIMEOUT};
