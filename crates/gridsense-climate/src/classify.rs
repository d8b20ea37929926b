//! Pure climate classification: the observed-weather decision table and the
//! postal-prefix fallback.

use crate::types::ClimateCategory;

/// Known two-character postal prefixes. Covers California ZIP ranges only;
/// everything else falls back to inland.
const PREFIX_TABLE: &[(&str, ClimateCategory)] = &[
    ("90", ClimateCategory::Coastal),
    ("91", ClimateCategory::Desert),
    ("92", ClimateCategory::Coastal),
    ("93", ClimateCategory::Desert),
    ("94", ClimateCategory::Coastal),
    ("95", ClimateCategory::Inland),
    ("96", ClimateCategory::Mountain),
];

pub const FALLBACK_CATEGORY: ClimateCategory = ClimateCategory::Inland;

/// Classify from observed conditions and location.
///
/// Rules are checked top to bottom and the first match wins. Desert and
/// mountain signals are checked before the coastal longitude band.
pub fn classify(
    temperature_celsius: Option<f64>,
    precipitation_mm: f64,
    latitude: f64,
    longitude: f64,
) -> ClimateCategory {
    let Some(temp) = temperature_celsius else {
        return classify_by_location(latitude, longitude);
    };

    if (temp > 26.0 && precipitation_mm < 5.0) || (latitude < 34.0 && temp > 20.0) {
        return ClimateCategory::Desert;
    }

    if temp < 10.0 || (latitude > 39.0 && temp < 18.0) {
        return ClimateCategory::Mountain;
    }

    if longitude < -121.5 && latitude > 32.0 && latitude < 41.0 {
        return ClimateCategory::Coastal;
    }

    ClimateCategory::Inland
}

/// Location-only rules, used when the weather source had no temperature.
fn classify_by_location(latitude: f64, longitude: f64) -> ClimateCategory {
    if longitude > -125.0 && longitude < -118.0 {
        ClimateCategory::Coastal
    } else if latitude < 34.0 {
        ClimateCategory::Desert
    } else if latitude > 39.0 {
        ClimateCategory::Mountain
    } else {
        ClimateCategory::Inland
    }
}

/// Static, network-free classification from the first two characters of the
/// postal code.
pub fn fallback_climate(postal_code: &str) -> ClimateCategory {
    let mut chars = postal_code.char_indices();
    let prefix = match (chars.next(), chars.next()) {
        (Some(_), Some((i, c))) => &postal_code[..i + c.len_utf8()],
        _ => return FALLBACK_CATEGORY,
    };

    tracing::debug!(prefix, "Using fallback climate for postal prefix");

    PREFIX_TABLE
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coastal_band_with_mild_weather() {
        assert_eq!(
            classify(Some(18.0), 2.0, 37.0, -122.4),
            ClimateCategory::Coastal
        );
    }

    #[test]
    fn test_hot_dry_south_is_desert() {
        assert_eq!(
            classify(Some(30.0), 1.0, 33.0, -116.0),
            ClimateCategory::Desert
        );
    }

    #[test]
    fn test_cold_north_is_mountain_regardless_of_longitude() {
        for lon in [-124.0, -122.4, -120.0, -100.0] {
            assert_eq!(classify(Some(5.0), 0.0, 40.0, lon), ClimateCategory::Mountain);
        }
    }

    #[test]
    fn test_hot_southern_coast_is_desert_not_coastal() {
        // Inside the coastal band, but the desert rule is checked first.
        assert_eq!(
            classify(Some(24.0), 0.0, 33.5, -122.0),
            ClimateCategory::Desert
        );
    }

    #[test]
    fn test_hot_but_wet_is_not_desert() {
        assert_eq!(
            classify(Some(28.0), 12.0, 37.0, -122.4),
            ClimateCategory::Coastal
        );
    }

    #[test]
    fn test_cool_high_latitude_is_mountain() {
        assert_eq!(
            classify(Some(15.0), 0.0, 39.5, -122.0),
            ClimateCategory::Mountain
        );
    }

    #[test]
    fn test_sacramento_is_inland() {
        assert_eq!(
            classify(Some(20.0), 0.0, 38.58, -121.49),
            ClimateCategory::Inland
        );
    }

    #[test]
    fn test_coastal_band_latitude_bounds_are_exclusive() {
        assert_eq!(
            classify(Some(19.0), 0.0, 41.0, -124.0),
            ClimateCategory::Inland
        );
    }

    #[test]
    fn test_missing_temperature_uses_location_rules() {
        assert_eq!(classify(None, 0.0, 37.0, -122.0), ClimateCategory::Coastal);
        assert_eq!(classify(None, 0.0, 33.0, -116.0), ClimateCategory::Desert);
        assert_eq!(classify(None, 0.0, 40.0, -110.0), ClimateCategory::Mountain);
        assert_eq!(classify(None, 0.0, 36.0, -110.0), ClimateCategory::Inland);
    }

    #[test]
    fn test_missing_temperature_band_precedes_latitude() {
        // lat < 34 would be desert, but the longitude band wins.
        assert_eq!(classify(None, 0.0, 32.7, -117.1), ClimateCategory::Coastal);
    }

    #[test]
    fn test_fallback_known_prefixes() {
        assert_eq!(fallback_climate("90210"), ClimateCategory::Coastal);
        assert_eq!(fallback_climate("92262"), ClimateCategory::Coastal);
        assert_eq!(fallback_climate("93501"), ClimateCategory::Desert);
        assert_eq!(fallback_climate("95814"), ClimateCategory::Inland);
        assert_eq!(fallback_climate("96150"), ClimateCategory::Mountain);
    }

    #[test]
    fn test_fallback_unmapped_prefix_is_inland() {
        assert_eq!(fallback_climate("99501"), ClimateCategory::Inland);
        assert_eq!(fallback_climate("10001"), ClimateCategory::Inland);
        assert_eq!(fallback_climate("SW1A"), ClimateCategory::Inland);
    }

    #[test]
    fn test_fallback_short_input_is_inland() {
        assert_eq!(fallback_climate(""), ClimateCategory::Inland);
        assert_eq!(fallback_climate("9"), ClimateCategory::Inland);
    }

    #[test]
    fn test_fallback_exact_two_chars() {
        assert_eq!(fallback_climate("96"), ClimateCategory::Mountain);
    }

    #[test]
    fn test_fallback_multibyte_prefix_does_not_panic() {
        assert_eq!(fallback_climate("é9401"), ClimateCategory::Inland);
    }
}
