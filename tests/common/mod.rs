use actix_web::{
    web::{self, Bytes},
    App, HttpResponse, HttpServer,
};
use crossbeam_channel::{Receiver, Sender};
use sentry::protocol::Envelope;
use std::{
    fs::{self, File},
    net::SocketAddr,
    process::{Command, ExitStatus, Stdio},
};

/// Forwards each posted envelope to the test. Anything unparseable is refused
/// so a broken transport shows up as a missing envelope.
async fn collect(body: Bytes, envelope_tx: web::Data<Sender<Envelope>>) -> HttpResponse {
    match Envelope::from_slice(&body) {
        Ok(envelope) => {
            if envelope_tx.send(envelope).is_ok() {
                HttpResponse::Ok().finish()
            } else {
                HttpResponse::ServiceUnavailable().finish()
            }
        }
        Err(_) => HttpResponse::BadRequest().finish(),
    }
}

/// Starts a collector on a free local port. Returns its address and the
/// envelopes it receives.
pub fn server() -> std::io::Result<(SocketAddr, Receiver<Envelope>)> {
    let (envelope_tx, envelope_rx) = crossbeam_channel::unbounded();
    let envelope_tx = web::Data::new(envelope_tx);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(envelope_tx.clone())
            .route("/api/{project_id}/envelope/", web::post().to(collect))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server.addrs()[0];
    let server = server.run();

    actix_rt::spawn(async move { server.await });

    Ok((addr, envelope_rx))
}

pub fn dsn_for(addr: SocketAddr) -> String {
    format!("http://abc123@{addr}/12345")
}

/// Builds the binary invocation with a clean environment for the variables
/// the program reads.
pub fn error_trigger(dsn: Option<&str>, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_error-trigger"));
    command
        .args(args)
        .env_remove("ERROR_TRIGGER_MODE")
        .env("RUST_LOG", "info")
        .stdout(Stdio::null());

    match dsn {
        Some(dsn) => command.env("SENTRY_DSN", dsn),
        None => command.env_remove("SENTRY_DSN"),
    };

    command
}

/// Runs until the app process exits and returns its status with everything
/// it logged. Stderr goes to a file because the crash reporter process
/// inherits it and may outlive the app.
pub fn run_logged(mut command: Command, name: &str) -> std::io::Result<(ExitStatus, String)> {
    let log_path = std::env::temp_dir().join(format!(
        "error-trigger-{name}-{}.log",
        std::process::id()
    ));
    let log = File::create(&log_path)?;

    let status = command.stderr(log).spawn()?.wait()?;
    let logged = fs::read_to_string(&log_path)?;
    let _ = fs::remove_file(&log_path);

    Ok((status, logged))
}
