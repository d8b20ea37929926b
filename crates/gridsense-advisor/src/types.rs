//! Household input and prediction result shapes shared with the prediction
//! service.

use gridsense_climate::ClimateCategory;
use serde::{Deserialize, Serialize};

pub const MIN_RESIDENTS: u8 = 1;
pub const MAX_RESIDENTS: u8 = 6;

/// Utility providers with known tariffs. Unknown names deserialize as PG&E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum UtilityProvider {
    #[default]
    #[serde(rename = "PG&E")]
    PgAndE,
    #[serde(rename = "SCE")]
    Sce,
    #[serde(rename = "SDG&E")]
    SdgAndE,
}

impl UtilityProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PgAndE => "PG&E",
            Self::Sce => "SCE",
            Self::SdgAndE => "SDG&E",
        }
    }

    /// Case-insensitive lookup by display name; anything unrecognized is PG&E.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "SCE" => Self::Sce,
            "SDG&E" | "SDGE" => Self::SdgAndE,
            _ => Self::PgAndE,
        }
    }
}

impl From<String> for UtilityProvider {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for UtilityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// AC/heating intensity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl AcLevel {
    /// Bucket daily AC/heating hours: up to 8 is low, up to 14 medium, above
    /// that high. Input is clamped to a single day.
    pub fn from_hours(hours: f64) -> Self {
        if !hours.is_finite() {
            return Self::Low;
        }
        let hours = hours.clamp(0.0, 24.0);
        if hours <= 8.0 {
            Self::Low
        } else if hours <= 14.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// When the household does most of its consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfUse {
    MorningPeak,
    EveningPeak,
    OffPeak,
    #[default]
    Mixed,
}

/// The six appliance flags. On the wire each flag is `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appliances {
    #[serde(default, with = "flag")]
    pub fridge: bool,
    #[serde(default, with = "flag")]
    pub washer: bool,
    #[serde(default, with = "flag")]
    pub dryer: bool,
    #[serde(default, with = "flag")]
    pub dishwasher: bool,
    #[serde(default, with = "flag")]
    pub ev_charger: bool,
    #[serde(default, with = "flag")]
    pub pool_pump: bool,
}

impl Appliances {
    /// Number of appliances present. Only the six flags count.
    pub fn count(&self) -> usize {
        [
            self.fridge,
            self.washer,
            self.dryer,
            self.dishwasher,
            self.ev_charger,
            self.pool_pump,
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Self-reported home attributes, as submitted to the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub home_size_sqft: u32,
    pub residents: u8,
    /// Postal code as typed; only used for climate detection
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub utility: UtilityProvider,
    #[serde(default)]
    pub ac_level: AcLevel,
    #[serde(default)]
    pub climate: ClimateCategory,
    #[serde(default)]
    pub time_usage_type: TimeOfUse,
    #[serde(flatten)]
    pub appliances: Appliances,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_spend_goal: Option<f64>,
}

impl UserInput {
    /// The spend goal, if one was set to a meaningful (positive) amount.
    pub fn goal(&self) -> Option<f64> {
        self.monthly_spend_goal.filter(|g| g.is_finite() && *g > 0.0)
    }

    /// Form-level checks before the input is sent for prediction.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(MIN_RESIDENTS..=MAX_RESIDENTS).contains(&self.residents) {
            return Err(InputError::ResidentsOutOfRange(self.residents));
        }
        if let Some(goal) = self.monthly_spend_goal {
            if !goal.is_finite() || goal < 0.0 {
                return Err(InputError::InvalidGoal(goal));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Residents must be between 1 and 6, got {0}")]
    ResidentsOutOfRange(u8),
    #[error("Monthly spend goal must be a non-negative amount, got {0}")]
    InvalidGoal(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub eco_score: f64,
}

/// Result of the prediction service. Numeric fields default to 0 and the
/// social-comparison fields are passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyPrediction {
    #[serde(default)]
    pub predicted_bill_usd: f64,
    #[serde(default)]
    pub total_kwh: f64,
    #[serde(default)]
    pub hvac_kwh: f64,
    #[serde(default)]
    pub peak_kwh: f64,
    #[serde(default)]
    pub offpeak_kwh: f64,
    #[serde(default, alias = "carbon_kg_month")]
    pub carbon_kg: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eco_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eco_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_users_avg_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_users_comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_energy_saving_recommendation: Option<String>,
}

/// `0`/`1` on the wire, accepting JSON booleans as well.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bool(b) => b,
            Repr::Int(n) => n != 0,
        })
    }
}
