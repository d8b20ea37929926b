pub mod config;
pub mod error;

pub use config::{ClimateConfig, Config, PredictionConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, PredictionError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging for a GridSense binary
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("GridSense core initialized");
    Ok(())
}
