use clap::Parser;
use sentry_error_trigger::{cli::Cli, config::Config, fault, logging, Reporter};
use std::{process::ExitCode, time::Duration};

fn main() -> ExitCode {
    logging::init();

    // Everything before here runs in both app and crash reporter processes
    let reporter = match Reporter::start() {
        Ok(reporter) => reporter,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    // Everything after here runs in only the app process

    let cli = Cli::parse();
    let config = Config::new(cli.timeout.map(Duration::from_secs), cli.retries);

    fault::trigger(&reporter, cli.mode, config);

    ExitCode::SUCCESS
}
