//! Savings advice for GridSense
//!
//! Everything here runs synchronously on a prediction that has already come
//! back: the utility rate table, the recommendation engine, goal progress
//! and the usage breakdown. All functions are total over well-typed input.

pub mod assessment;
pub mod breakdown;
pub mod goal;
pub mod rates;
pub mod recommend;
pub mod types;

pub use assessment::{assess, Assessment};
pub use breakdown::UsageBreakdown;
pub use goal::{progress, remaining_to_goal};
pub use rates::{rates_for, rates_for_name, RatePair};
pub use recommend::{recommend, RecommendationList, MAX_RECOMMENDATIONS};
pub use types::*;
