use crate::StartupError;
use sentry::types::Dsn;

pub const DSN_ENV_VAR: &str = "SENTRY_DSN";

/// Reads the DSN from [`DSN_ENV_VAR`].
pub fn dsn_from_env() -> Result<Dsn, StartupError> {
    parse_dsn(std::env::var(DSN_ENV_VAR).ok().as_deref())
}

/// Blank values count as missing.
pub fn parse_dsn(value: Option<&str>) -> Result<Dsn, StartupError> {
    match value.map(str::trim) {
        None | Some("") => Err(StartupError::MissingDsn),
        Some(value) => Ok(value.parse()?),
    }
}
