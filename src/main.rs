//! # Minesweeper API
//!
//! Entrypoint for the HTTP service. See the crate README for the available routes and settings.
use minesweeper_api::{config, error::StartupError, startup, telemetry};
use std::process::ExitCode;

/// Entrypoint for the application. Any startup failure is logged and turned into a non-zero exit
/// status.
#[tokio::main]
async fn main() -> ExitCode {
    let subscriber =
        telemetry::get_subscriber("minesweeper-api".into(), "info".into(), std::io::stdout);
    telemetry::init_subscriber(subscriber);

    match serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "The application is exiting due to an error");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<(), StartupError> {
    let configuration = config::get_configuration()?;
    let application = startup::Application::build(&configuration, startup::ADDRESS).await?;
    application.run_until_stopped().await
}
