use crate::{dsn, minidump, StartupError};
use sentry::{types::Dsn, Client, ClientOptions};
use std::{sync::Arc, time::Duration};

/// Time budget for sending pending reports before the process exits.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Options for the reporting client. `sentry::init` adds the default
/// integrations, the panic hook among them.
pub fn client_options(dsn: Dsn) -> ClientOptions {
    ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        shutdown_timeout: FLUSH_TIMEOUT,
        ..Default::default()
    }
}

/// Whether the options carry the integration that reports panics.
pub fn has_panic_hook(options: &ClientOptions) -> bool {
    options
        .integrations
        .iter()
        .any(|integration| integration.name() == "panic")
}

fn verify_client(client: Option<Arc<Client>>) -> Result<(), StartupError> {
    let client = match client {
        Some(client) if client.is_enabled() => client,
        _ => return Err(StartupError::ClientDisabled),
    };

    if !has_panic_hook(client.options()) {
        return Err(StartupError::PanicHookMissing);
    }

    Ok(())
}

/// A crash reporter that fails to start is reported but not fatal.
fn crash_reporter_or_report<E>(result: Result<minidump::Handle, E>) -> Option<minidump::Handle>
where
    E: std::error::Error,
{
    match result {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("native crash capture disabled: {e}");
            sentry::capture_error(&e);
            None
        }
    }
}

/// Holds the cleanup hooks for the life of the program.
///
/// Dropping it flushes pending reports within [`FLUSH_TIMEOUT`]. The panic
/// hook is installed by the time [`Reporter::start`] returns, so anything
/// holding a `Reporter` can fault and still be reported.
#[must_use = "The reporter should not be dropped until the program exits"]
pub struct Reporter {
    crash_reporter: Option<minidump::Handle>,
    _sentry: sentry::ClientInitGuard,
}

impl Reporter {
    /// Everything before the crash reporter is spawned runs in both the app
    /// and crash reporter processes.
    pub fn start() -> Result<Reporter, StartupError> {
        let dsn = dsn::dsn_from_env()?;
        let guard = sentry::init(client_options(dsn));
        verify_client(sentry::Hub::current().client())?;

        let crash_reporter =
            crash_reporter_or_report(minidump::init().map_err(StartupError::from));

        tracing::debug!(
            crash_reporter = crash_reporter.is_some(),
            "error reporting initialized"
        );

        Ok(Reporter {
            crash_reporter,
            _sentry: guard,
        })
    }

    pub fn has_crash_reporter(&self) -> bool {
        self.crash_reporter.is_some()
    }

    pub fn set_tag(&self, key: &str, value: &str) {
        sentry::configure_scope(|scope| scope.set_tag(key, value));

        #[cfg(feature = "ipc")]
        if let Some(handle) = &self.crash_reporter {
            handle.send(&minidump::ScopeMessage::SetTag(
                key.to_string(),
                value.to_string(),
            ));
        }
    }
}
