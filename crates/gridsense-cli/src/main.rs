use std::process::ExitCode;

use gridsense_core::AppError;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = gridsense_core::init() {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// What the person running the command sees on failure
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => app_err.user_message().to_string(),
        None => format!("Error: {:#}", err),
    }
}
