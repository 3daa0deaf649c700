use sentry::types::ParseDsnError;

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("SENTRY_DSN environment variable is required")]
    MissingDsn,
    #[error("SENTRY_DSN is not a valid DSN: {0}")]
    InvalidDsn(#[from] ParseDsnError),
    #[error("sentry client did not initialize")]
    ClientDisabled,
    #[error("sentry client has no panic integration installed")]
    PanicHookMissing,
    #[error(transparent)]
    CrashReporter(#[from] minidumper_child::Error),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::MissingDsn | StartupError::InvalidDsn(_) => 2,
            _ => 1,
        }
    }
}
