//! colorcat entry point: collects the arguments for adb and starts the async runtime.
//! The main function is intentionally thin and delegates to the runtime in `app`.

use std::process::ExitCode;

use colorcat::error::LaunchError;
use colorcat::{app, cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let config = cli::parse();
    match app::run(config).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("colorcat: {err:#}");
            match err.downcast_ref::<LaunchError>() {
                Some(LaunchError::NotFound { .. }) => ExitCode::from(127),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Diagnostics go to stderr, uncolored, and stay quiet unless RUST_LOG asks for more.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
