//! Forward geocoding: postal code to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::{Coordinates, LookupFailure};
use gridsense_core::ClimateConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Degrees,
    lon: Degrees,
}

/// Nominatim reports coordinates as decimal strings; accept plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn parse(&self, field: &str) -> Result<f64, LookupFailure> {
        match self {
            Degrees::Number(n) => Ok(*n),
            Degrees::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                LookupFailure::InvalidResponse(format!("{} {:?}: {}", field, s, e))
            }),
        }
    }
}

/// Resolves postal codes to coordinates within one country.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    country: String,
}

impl Geocoder {
    /// Geocoder against the public Nominatim instance, restricted to the US.
    pub fn nominatim() -> Result<Self, LookupFailure> {
        Self::from_config(&ClimateConfig::default())
    }

    pub fn from_config(config: &ClimateConfig) -> Result<Self, LookupFailure> {
        Self::new(
            &config.geocoder_url,
            &config.country,
            config.request_timeout(),
            &config.user_agent,
        )
    }

    pub fn new(
        base_url: &str,
        country: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, LookupFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country: country.to_string(),
        })
    }

    /// Look up a postal code and return the first candidate's coordinates.
    ///
    /// A single attempt; any transport error, non-success status or empty
    /// result set is a `LookupFailure`.
    #[instrument(skip(self), level = "debug")]
    pub async fn locate(&self, postal_code: &str) -> Result<Coordinates, LookupFailure> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("postalcode", postal_code),
                ("country", self.country.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Geocoder returned status {}", status);
            return Err(LookupFailure::Status(status.as_u16()));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| LookupFailure::InvalidResponse(e.to_string()))?;

        let place = places.first().ok_or(LookupFailure::NoResults)?;
        let coordinates = Coordinates {
            latitude: place.lat.parse("lat")?,
            longitude: place.lon.parse("lon")?,
        };

        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "Geocoded postal code"
        );
        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_from_string() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": "37.4419", "lon": "-122.1430"}"#).unwrap();
        assert_eq!(place.lat.parse("lat").unwrap(), 37.4419);
        assert_eq!(place.lon.parse("lon").unwrap(), -122.1430);
    }

    #[test]
    fn test_degrees_from_number() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": 33.5, "lon": -116.0}"#).unwrap();
        assert_eq!(place.lat.parse("lat").unwrap(), 33.5);
    }

    #[test]
    fn test_degrees_garbage_is_invalid_response() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": "north", "lon": "-122"}"#).unwrap();
        let err = place.lat.parse("lat").unwrap_err();
        assert!(matches!(err, LookupFailure::InvalidResponse(_)));
        assert!(err.to_string().contains("lat"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let geocoder = Geocoder::new(
            "http://localhost:9000/",
            "US",
            Duration::from_secs(1),
            gridsense_core::config::USER_AGENT,
        )
        .unwrap();
        assert_eq!(geocoder.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -p gridsense-climate -- --ignored
    async fn test_locate_palo_alto() {
        let geocoder = Geocoder::nominatim().unwrap();
        let coords = geocoder.locate("94301").await.unwrap();
        assert!((coords.latitude - 37.4).abs() < 0.5);
        assert!((coords.longitude + 122.1).abs() < 0.5);
    }
}
