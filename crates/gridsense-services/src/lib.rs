//! Client for the bill prediction service.
//!
//! The service itself is a black box: it takes the household's answers and
//! returns predicted bill and kWh figures.

pub mod prediction;

pub use gridsense_core::PredictionError;
pub use prediction::PredictionClient;
