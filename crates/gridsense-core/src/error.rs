//! Centralized error types for GridSense.
//!
//! Climate lookups never surface errors (they degrade to the static fallback),
//! so this hierarchy covers configuration, the prediction service and the
//! network underneath it.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a message suitable for showing to the person
/// filling in the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a user-friendly message, non-technical and actionable.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Prediction(e) => e.user_message(),
            AppError::InvalidInput(_) => "Some of the home details are invalid. Please review the form.",
            AppError::Io(_) => "A file could not be read or written. Check the path and permissions.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration file not found. Check the --config path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Errors from the bill prediction service.
///
/// Every variant is terminal for the submission that caused it: no partial
/// results are shown.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Prediction service error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),

    #[error("Prediction rejected input: {0}")]
    InvalidInput(String),
}

impl PredictionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictionError::Network(_) => {
                "Failed to analyze energy usage. Please check that the prediction service is running."
            }
            PredictionError::Server { status, .. } if *status >= 500 => {
                "The prediction service failed. Please try again later."
            }
            PredictionError::Server { .. } | PredictionError::InvalidInput(_) => {
                "The prediction service rejected the home details. Please review the form."
            }
            PredictionError::InvalidResponse(_) => {
                "The prediction service returned an unexpected response."
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            AppError::Config(ConfigError::NotFound("gridsense.toml".into())),
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Prediction(PredictionError::InvalidResponse("test".into())),
            AppError::InvalidInput("residents".into()),
            AppError::Io(std::io::Error::other("disk")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_prediction_error_conversion() {
        let err: AppError = PredictionError::Network(NetworkError::Timeout).into();
        assert!(matches!(
            err,
            AppError::Prediction(PredictionError::Network(NetworkError::Timeout))
        ));
    }

    #[test]
    fn test_server_status_selects_message() {
        let outage = PredictionError::Server {
            status: 503,
            message: "down".into(),
        };
        let rejected = PredictionError::Server {
            status: 400,
            message: "Missing required field: climate".into(),
        };
        assert!(outage.user_message().contains("try again later"));
        assert!(rejected.user_message().contains("review the form"));
        assert!(rejected.to_string().contains("Missing required field"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AppError = ConfigError::ParseError("line 1".into()).into();
        assert!(err.user_message().contains("malformed"));
        assert!(err.to_string().contains("line 1"));
    }
}
