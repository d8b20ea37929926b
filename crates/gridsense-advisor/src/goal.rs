//! Progress toward a monthly spending goal.

/// Percentage of the way to the goal, in [0, 100].
///
/// 100 when the bill is at or under the goal, falling linearly with the
/// overage relative to the goal, 0 once the bill reaches twice the goal.
/// A missing or non-positive goal gives 0.
pub fn progress(current_bill: f64, goal: Option<f64>) -> f64 {
    let Some(goal) = goal.filter(|g| *g > 0.0) else {
        return 0.0;
    };
    let percent = (1.0 - (current_bill - goal) / goal) * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Dollars still to cut to reach the goal, or `None` when there is no
/// positive goal or it is already met.
pub fn remaining_to_goal(current_bill: f64, goal: Option<f64>) -> Option<f64> {
    let goal = goal.filter(|g| *g > 0.0)?;
    let gap = current_bill - goal;
    (gap > 0.0).then_some(gap)
}
