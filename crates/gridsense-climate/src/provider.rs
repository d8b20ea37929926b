//! Current-conditions lookup via the Open-Meteo forecast API.

use crate::types::{Coordinates, LookupFailure, WeatherSample};
use chrono::Utc;
use gridsense_core::ClimateConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    precipitation: Option<f64>,
}

impl ForecastResponse {
    fn into_sample(self) -> WeatherSample {
        let (temperature_celsius, precipitation_mm) = match self.current {
            Some(c) => (c.temperature_2m, c.precipitation.unwrap_or(0.0)),
            None => (None, 0.0),
        };
        WeatherSample {
            temperature_celsius,
            precipitation_mm,
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    /// Provider against the public Open-Meteo endpoint.
    pub fn open_meteo() -> Result<Self, LookupFailure> {
        Self::from_config(&ClimateConfig::default())
    }

    pub fn from_config(config: &ClimateConfig) -> Result<Self, LookupFailure> {
        Self::new(&config.weather_url, config.request_timeout())
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupFailure> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current temperature and precipitation for a point.
    ///
    /// A missing temperature in a successful response is reported as `None`,
    /// not as a failure.
    #[instrument(skip(self), level = "debug")]
    pub async fn current(&self, at: Coordinates) -> Result<WeatherSample, LookupFailure> {
        let url = format!("{}/v1/forecast", self.base_url);
        let latitude = at.latitude.to_string();
        let longitude = at.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", "temperature_2m,precipitation"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Weather API returned status {}", status);
            return Err(LookupFailure::Status(status.as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| LookupFailure::InvalidResponse(e.to_string()))?;

        let sample = body.into_sample();
        tracing::debug!(
            temperature = ?sample.temperature_celsius,
            precipitation = sample.precipitation_mm,
            "Fetched current weather"
        );
        Ok(sample)
    }
}
