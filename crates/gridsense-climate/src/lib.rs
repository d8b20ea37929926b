//! Climate detection for GridSense
//!
//! Resolves a postal code to one of four climate categories using Nominatim
//! geocoding and Open-Meteo current conditions, with a static postal-prefix
//! fallback whenever either lookup fails.

pub mod classify;
pub mod geocode;
pub mod provider;
pub mod resolver;
pub mod types;

pub use classify::{classify, fallback_climate};
pub use geocode::Geocoder;
pub use provider::WeatherProvider;
pub use resolver::{
    should_resolve, ClimateResolution, ClimateResolver, ResolutionSource, MIN_POSTAL_CODE_LEN,
};
pub use types::*;
