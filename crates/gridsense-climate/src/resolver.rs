//! Postal code to climate category, combining the geocoder and weather
//! lookups with the static fallback.

use gridsense_core::ClimateConfig;
use serde::Serialize;

use crate::classify::{classify, fallback_climate};
use crate::geocode::Geocoder;
use crate::provider::WeatherProvider;
use crate::types::{ClimateCategory, Coordinates, LookupFailure, WeatherSample};

/// Postal codes shorter than this are not worth a remote lookup.
pub const MIN_POSTAL_CODE_LEN: usize = 4;

/// Whether a caller should start climate resolution for this input.
pub fn should_resolve(postal_code: &str) -> bool {
    postal_code.chars().count() >= MIN_POSTAL_CODE_LEN
}

/// How a category was arrived at
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Classified from live geocoder + weather data
    Observed {
        coordinates: Coordinates,
        sample: WeatherSample,
    },
    /// Postal-prefix table, after an upstream lookup failed
    Fallback { reason: String },
}

impl ResolutionSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionSource::Observed { .. } => "observed",
            ResolutionSource::Fallback { .. } => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateResolution {
    pub category: ClimateCategory,
    pub source: ResolutionSource,
}

impl ClimateResolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ResolutionSource::Fallback { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ClimateResolver {
    geocoder: Geocoder,
    weather: WeatherProvider,
}

impl ClimateResolver {
    pub fn new(geocoder: Geocoder, weather: WeatherProvider) -> Self {
        Self { geocoder, weather }
    }

    /// Resolver against the public Nominatim and Open-Meteo endpoints.
    pub fn public() -> Result<Self, LookupFailure> {
        Self::from_config(&ClimateConfig::default())
    }

    pub fn from_config(config: &ClimateConfig) -> Result<Self, LookupFailure> {
        Ok(Self::new(
            Geocoder::from_config(config)?,
            WeatherProvider::from_config(config)?,
        ))
    }

    /// Resolve a postal code to a climate category. Never fails.
    ///
    /// Callers are expected to gate on [`should_resolve`] first; this method
    /// does not enforce the minimum length.
    pub async fn resolve(&self, postal_code: &str) -> ClimateCategory {
        self.resolve_detailed(postal_code).await.category
    }

    /// Like [`resolve`](Self::resolve), but reports which path produced the
    /// category.
    pub async fn resolve_detailed(&self, postal_code: &str) -> ClimateResolution {
        let resolution = match self.observe(postal_code).await {
            Ok((coordinates, sample)) => ClimateResolution {
                category: classify(
                    sample.temperature_celsius,
                    sample.precipitation_mm,
                    coordinates.latitude,
                    coordinates.longitude,
                ),
                source: ResolutionSource::Observed {
                    coordinates,
                    sample,
                },
            },
            Err(failure) => ClimateResolution {
                category: fallback_climate(postal_code),
                source: ResolutionSource::Fallback {
                    reason: failure.to_string(),
                },
            },
        };

        tracing::info!(
            postal_code,
            category = %resolution.category,
            source = resolution.source.kind(),
            "Resolved climate"
        );
        resolution
    }

    /// Caller-side entry point: skips resolution entirely for inputs shorter
    /// than [`MIN_POSTAL_CODE_LEN`].
    pub async fn detect(&self, postal_code: &str) -> Option<ClimateCategory> {
        if !should_resolve(postal_code) {
            tracing::debug!(postal_code, "Postal code too short, skipping climate detection");
            return None;
        }
        Some(self.resolve(postal_code).await)
    }

    async fn observe(
        &self,
        postal_code: &str,
    ) -> Result<(Coordinates, WeatherSample), LookupFailure> {
        tracing::debug!(postal_code, "Fetching coordinates");
        let coordinates = self
            .geocoder
            .locate(postal_code)
            .await
            .inspect_err(|e| tracing::warn!(postal_code, error = %e, "Geocoding failed"))?;

        let sample = self
            .weather
            .current(coordinates)
            .await
            .inspect_err(|e| tracing::warn!(postal_code, error = %e, "Weather lookup failed"))?;

        Ok((coordinates, sample))
    }
}
