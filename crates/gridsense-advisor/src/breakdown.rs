use serde::Serialize;

use crate::types::EnergyPrediction;

/// How the predicted consumption splits, as percentages of total kWh
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UsageBreakdown {
    pub hvac_pct: f64,
    pub peak_pct: f64,
    pub offpeak_pct: f64,
}

impl UsageBreakdown {
    /// All shares are 0 when the prediction reports no consumption.
    pub fn from_prediction(prediction: &EnergyPrediction) -> Self {
        let total = prediction.total_kwh;
        if total.is_nan() || total <= 0.0 {
            return Self::default();
        }
        Self {
            hvac_pct: prediction.hvac_kwh / total * 100.0,
            peak_pct: prediction.peak_kwh / total * 100.0,
            offpeak_pct: prediction.offpeak_kwh / total * 100.0,
        }
    }
}
