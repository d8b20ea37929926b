use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{AppError, ConfigError};

/// Environment variable that overrides `prediction.api_url`
pub const PREDICTION_URL_ENV: &str = "GRIDSENSE_PREDICTION_URL";

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_COUNTRY: &str = "US";
pub const CLIMATE_TIMEOUT_SECS: u64 = 10;
pub const PREDICTION_TIMEOUT_SECS: u64 = 30;

/// Nominatim's usage policy requires an identifying user agent
pub const USER_AGENT: &str = concat!("GridSense/", env!("CARGO_PKG_VERSION"));

const MAX_REASONABLE_TIMEOUT_SECS: u64 = 120;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoder and weather lookups used for climate detection
    #[serde(default)]
    pub climate: ClimateConfig,

    /// Bill prediction service
    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Base URL of a Nominatim-compatible geocoder
    pub geocoder_url: String,

    /// Base URL of an Open-Meteo-compatible forecast API
    pub weather_url: String,

    /// Country filter passed to the geocoder
    pub country: String,

    pub request_timeout_secs: u64,

    pub user_agent: String,
}

impl ClimateConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            geocoder_url: NOMINATIM_URL.to_string(),
            weather_url: OPEN_METEO_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            request_timeout_secs: CLIMATE_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// URL of the prediction service (serves `/predict` and `/health`)
    pub api_url: String,

    pub request_timeout_secs: u64,
}

impl PredictionConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: PREDICTION_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing.
    ///
    /// Environment overrides are applied after reading the file.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            config
        };

        config.apply_env_overrides(std::env::var(PREDICTION_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from an explicit file. No environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::Config(ConfigError::NotFound(path.display().to_string()))
            }
            _ => AppError::Io(e),
        })?;

        toml::from_str(&contents).map_err(|e| {
            AppError::Config(ConfigError::ParseError(format!("{}: {}", path.display(), e)))
        })
    }

    /// Load and validate, from `path` if given or the default location.
    ///
    /// Returns an error if validation fails; warnings are logged.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => {
                let mut config = Self::load_from(p)?;
                config.apply_env_overrides(std::env::var(PREDICTION_URL_ENV).ok());
                config
            }
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(AppError::Config(ConfigError::Invalid(validation.error_summary())).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    fn apply_env_overrides(&mut self, prediction_url: Option<String>) {
        if let Some(url) = prediction_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Prediction URL overridden from {}", PREDICTION_URL_ENV);
            self.prediction.api_url = url;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.climate.geocoder_url, "climate.geocoder_url", &mut result);
        validate_url(&self.climate.weather_url, "climate.weather_url", &mut result);
        validate_url(&self.prediction.api_url, "prediction.api_url", &mut result);

        validate_timeout(
            self.climate.request_timeout_secs,
            "climate.request_timeout_secs",
            &mut result,
        );
        validate_timeout(
            self.prediction.request_timeout_secs,
            "prediction.request_timeout_secs",
            &mut result,
        );

        if self.climate.country.trim().is_empty() {
            result.add_warning(
                "climate.country",
                "No country filter - postal codes may geocode to the wrong country",
            );
        }

        if self.climate.user_agent.trim().is_empty() {
            result.add_warning(
                "climate.user_agent",
                "Empty user agent - public geocoders may reject requests",
            );
        }

        result
    }

    /// Save configuration to an explicit file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("gridsense");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

fn validate_timeout(secs: u64, field_name: &str, result: &mut ValidationResult) {
    if secs == 0 {
        result.add_error(field_name, "Timeout must be greater than 0");
    } else if secs > MAX_REASONABLE_TIMEOUT_SECS {
        result.add_warning(
            field_name,
            format!("Timeout is unusually long (>{}s)", MAX_REASONABLE_TIMEOUT_SECS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.prediction.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "prediction.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.climate.geocoder_url = "ftp://nominatim.example".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.climate.request_timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "climate.request_timeout_secs"));
    }

    #[test]
    fn test_long_timeout_is_warning() {
        let mut config = Config::default();
        config.prediction.request_timeout_secs = 600;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "prediction.request_timeout_secs"));
    }

    #[test]
    fn test_empty_country_is_warning() {
        let mut config = Config::default();
        config.climate.country = String::new();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "climate.country"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.prediction.api_url = "http://predict.internal:8080".to_string();
        config.climate.country = "CA".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.prediction.api_url, "http://predict.internal:8080");
        assert_eq!(loaded.climate.country, "CA");
        assert_eq!(loaded.climate.request_timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[prediction]\napi_url = \"http://127.0.0.1:5001\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.prediction.api_url, "http://127.0.0.1:5001");
        assert_eq!(loaded.prediction.request_timeout_secs, 30);
        assert_eq!(loaded.climate.geocoder_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[prediction\napi_url = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::ParseError(_))));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::NotFound(_))));
        assert!(Config::load_validated(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_invalid_file_fails_validation_with_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[climate]\nrequest_timeout_secs = 0\n").unwrap();

        let err = Config::load_validated(Some(path.as_path())).unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(AppError::Config(ConfigError::Invalid(summary))) => {
                assert!(summary.contains("climate.request_timeout_secs"));
            }
            other => panic!("expected ConfigError::Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_env_override_replaces_prediction_url() {
        let mut config = Config::default();
        config.apply_env_overrides(Some("http://override:9000".to_string()));
        assert_eq!(config.prediction.api_url, "http://override:9000");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(Some("  ".to_string()));
        assert_eq!(config.prediction.api_url, "http://localhost:5000");
    }

    #[test]
    fn test_timeouts_convert_to_durations() {
        let config = Config::default();
        assert_eq!(config.climate.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.prediction.request_timeout(), Duration::from_secs(30));
    }
}
