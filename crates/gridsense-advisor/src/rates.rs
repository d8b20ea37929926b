//! Time-of-use tariffs per utility provider.

use serde::Serialize;

use crate::types::UtilityProvider;

/// Peak and off-peak unit prices, USD/kWh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePair {
    pub peak_rate: f64,
    pub offpeak_rate: f64,
}

impl RatePair {
    /// Arithmetic mean of peak and off-peak price
    pub fn blended(&self) -> f64 {
        (self.peak_rate + self.offpeak_rate) / 2.0
    }

    /// Price difference saved per kWh moved out of peak hours
    pub fn peak_premium(&self) -> f64 {
        self.peak_rate - self.offpeak_rate
    }
}

const PGE_RATES: RatePair = RatePair {
    peak_rate: 0.35,
    offpeak_rate: 0.15,
};

const SCE_RATES: RatePair = RatePair {
    peak_rate: 0.32,
    offpeak_rate: 0.14,
};

const SDGE_RATES: RatePair = RatePair {
    peak_rate: 0.38,
    offpeak_rate: 0.16,
};

pub fn rates_for(utility: UtilityProvider) -> RatePair {
    match utility {
        UtilityProvider::PgAndE => PGE_RATES,
        UtilityProvider::Sce => SCE_RATES,
        UtilityProvider::SdgAndE => SDGE_RATES,
    }
}

/// Lookup by provider name. Unrecognized names get PG&E's rates.
pub fn rates_for_name(name: &str) -> RatePair {
    rates_for(UtilityProvider::from_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers() {
        assert_eq!(rates_for(UtilityProvider::PgAndE), PGE_RATES);
        assert_eq!(rates_for(UtilityProvider::Sce).peak_rate, 0.32);
        assert_eq!(rates_for(UtilityProvider::SdgAndE).offpeak_rate, 0.16);
    }

    #[test]
    fn test_unknown_name_gets_pge() {
        assert_eq!(rates_for_name("Municipal Light Co"), PGE_RATES);
        assert_eq!(rates_for_name(""), PGE_RATES);
        assert_eq!(rates_for_name("SCE"), SCE_RATES);
    }

    #[test]
    fn test_blended_and_premium() {
        let rates = rates_for(UtilityProvider::PgAndE);
        assert!((rates.blended() - 0.25).abs() < 1e-12);
        assert!((rates.peak_premium() - 0.20).abs() < 1e-12);
    }
}
