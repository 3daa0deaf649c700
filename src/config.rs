use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timeout: Option<Duration>,
    pub retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: Some(DEFAULT_TIMEOUT),
            retries: DEFAULT_RETRIES,
        }
    }
}

impl Config {
    pub fn new(timeout: Option<Duration>, retries: u32) -> Self {
        Config { timeout, retries }
    }

    /// Fills in [`DEFAULT_TIMEOUT`] when no timeout was given.
    pub fn resolve_timeout(&mut self) -> Duration {
        *self.timeout.get_or_insert_with(|| {
            tracing::warn!(
                "no timeout configured, using default of {} seconds",
                DEFAULT_TIMEOUT.as_secs()
            );
            DEFAULT_TIMEOUT
        })
    }
}
