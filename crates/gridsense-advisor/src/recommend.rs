//! Savings recommendations derived from a prediction and the household's
//! answers.
//!
//! Candidates are generated in a fixed order (HVAC, peak shifting,
//! appliances), the optional goal clause is appended to whichever message
//! ends up first, and the list is capped at [`MAX_RECOMMENDATIONS`]. Dollar
//! figures are rendered into the text with two decimals.

use crate::rates::{rates_for, RatePair};
use crate::types::{AcLevel, EnergyPrediction, TimeOfUse, UserInput};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// Fraction of HVAC load saved by a 2°F setpoint change at high usage
const HVAC_HIGH_REDUCTION: f64 = 0.20;
const HVAC_MEDIUM_REDUCTION: f64 = 0.15;
/// Fraction of peak consumption assumed movable to off-peak hours
const PEAK_SHIFT_FRACTION: f64 = 0.20;
const APPLIANCE_REDUCTION: f64 = 0.15;
/// More appliances than this triggers the unplug/efficiency message
const APPLIANCE_THRESHOLD: usize = 3;

/// Ordered, at most three, human-readable recommendations
pub type RecommendationList = Vec<String>;

pub fn recommend(prediction: &EnergyPrediction, input: &UserInput) -> RecommendationList {
    let rates = rates_for(input.utility);
    let mut recommendations = Vec::with_capacity(MAX_RECOMMENDATIONS);

    if let Some(message) = hvac_recommendation(prediction, input.ac_level, &rates) {
        recommendations.push(message);
    }

    if let Some(message) = peak_shift_recommendation(prediction, input.time_usage_type, &rates) {
        recommendations.push(message);
    }

    recommendations.push(appliance_recommendation(
        prediction,
        input.appliances.count(),
        &rates,
    ));

    if let Some(goal) = input.goal() {
        if prediction.predicted_bill_usd - goal > 0.0 {
            if let Some(first) = recommendations.first_mut() {
                first.push_str(&goal_clause(goal));
            }
        }
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    tracing::debug!(count = recommendations.len(), "Generated recommendations");
    recommendations
}

fn hvac_recommendation(
    prediction: &EnergyPrediction,
    level: AcLevel,
    rates: &RatePair,
) -> Option<String> {
    match level {
        AcLevel::High => {
            let savings = prediction.hvac_kwh * HVAC_HIGH_REDUCTION * rates.blended();
            Some(format!(
                "Lower thermostat by 2°F to reduce HVAC usage by ~20% and save ${}/month",
                dollars(savings)
            ))
        }
        AcLevel::Medium => {
            let savings = prediction.hvac_kwh * HVAC_MEDIUM_REDUCTION * rates.blended();
            Some(format!(
                "Adjust thermostat to save ~15% on HVAC and cut ${}/month from your bill",
                dollars(savings)
            ))
        }
        AcLevel::Low => None,
    }
}

fn peak_shift_recommendation(
    prediction: &EnergyPrediction,
    time_of_use: TimeOfUse,
    rates: &RatePair,
) -> Option<String> {
    if time_of_use == TimeOfUse::OffPeak {
        return None;
    }
    let savings = prediction.peak_kwh * PEAK_SHIFT_FRACTION * rates.peak_premium();
    Some(format!(
        "Shift heavy appliance usage to off-peak hours (after 9 PM) and save ${}/month",
        dollars(savings)
    ))
}

fn appliance_recommendation(
    prediction: &EnergyPrediction,
    appliance_count: usize,
    rates: &RatePair,
) -> String {
    if appliance_count > APPLIANCE_THRESHOLD {
        let non_hvac_kwh = prediction.total_kwh - prediction.hvac_kwh;
        let savings = non_hvac_kwh * APPLIANCE_REDUCTION * rates.blended();
        format!(
            "Unplug rarely-used appliances and use energy-efficient models, saving ${}/month",
            dollars(savings)
        )
    } else {
        "Consider upgrading to ENERGY STAR appliances for long-term savings on your energy costs"
            .to_string()
    }
}

/// The goal is shown as entered: `$120`, `$99.5`.
fn goal_clause(goal: f64) -> String {
    format!(" to reach your ${}/month goal", goal)
}

fn dollars(amount: f64) -> String {
    format!("{:.2}", amount)
}
