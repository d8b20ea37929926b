use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Climate categories used as a proxy for heating/cooling demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClimateCategory {
    Coastal,
    #[default]
    Inland,
    Desert,
    Mountain,
}

impl ClimateCategory {
    pub const ALL: [ClimateCategory; 4] = [
        Self::Coastal,
        Self::Inland,
        Self::Desert,
        Self::Mountain,
    ];

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coastal => "Coastal",
            Self::Inland => "Inland",
            Self::Desert => "Desert",
            Self::Mountain => "Mountain",
        }
    }

    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coastal => "coastal",
            Self::Inland => "inland",
            Self::Desert => "desert",
            Self::Mountain => "mountain",
        }
    }
}

impl std::fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WGS84 coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a point, as much as the weather source reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature_celsius: Option<f64>,
    /// Defaults to 0 when the source omits it
    pub precipitation_mm: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Failure of a single geocoder or weather lookup.
///
/// Never escapes the climate resolver; it is logged and replaced by the
/// static fallback.
#[derive(Debug, thiserror::Error)]
pub enum LookupFailure {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Lookup returned status {0}")]
    Status(u16),
    #[error("Lookup returned no results")]
    NoResults,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ClimateCategory::Mountain).unwrap();
        assert_eq!(json, "\"mountain\"");
        let parsed: ClimateCategory = serde_json::from_str("\"coastal\"").unwrap();
        assert_eq!(parsed, ClimateCategory::Coastal);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ClimateCategory::Coastal.label(), "Coastal");
        assert_eq!(ClimateCategory::Desert.label(), "Desert");
    }

    #[test]
    fn test_display_matches_wire_name() {
        for category in ClimateCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_default_is_inland() {
        assert_eq!(ClimateCategory::default(), ClimateCategory::Inland);
    }
}
