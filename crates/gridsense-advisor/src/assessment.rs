use serde::Serialize;

use crate::breakdown::UsageBreakdown;
use crate::goal::{progress, remaining_to_goal};
use crate::rates::{rates_for, RatePair};
use crate::recommend::{recommend, RecommendationList};
use crate::types::{EnergyPrediction, UserInput};

/// Everything shown after a prediction comes back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub prediction: EnergyPrediction,
    pub rates: RatePair,
    pub recommendations: RecommendationList,
    pub breakdown: UsageBreakdown,
    /// Only meaningful when a goal is set
    pub goal_progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_to_goal: Option<f64>,
}

impl Assessment {
    pub fn goal_met(&self) -> bool {
        self.goal_progress >= 100.0
    }
}

/// Run the recommendation engine and goal calculator on a prediction.
pub fn assess(prediction: EnergyPrediction, input: &UserInput) -> Assessment {
    let goal = input.goal();
    Assessment {
        rates: rates_for(input.utility),
        recommendations: recommend(&prediction, input),
        breakdown: UsageBreakdown::from_prediction(&prediction),
        goal_progress: progress(prediction.predicted_bill_usd, goal),
        remaining_to_goal: remaining_to_goal(prediction.predicted_bill_usd, goal),
        prediction,
    }
}
