use crate::domain::analysis::{CostSummary, REPORT_CURRENCY, TeamSummary, UserResult, round2};

/// Sums user totals into the team summary.
///
/// Regular hours are derived as total minus overtime rather than summed, so
/// the three hour figures always agree with each other.
pub fn summarize_team(users: &[UserResult]) -> TeamSummary {
    let total_hours: f64 = users.iter().map(|user| user.total_hours).sum();
    let overtime_hours: f64 = users.iter().map(|user| user.overtime_hours).sum();
    let base_cost: f64 = users.iter().map(|user| user.base_cost).sum();
    let ot_premium: f64 = users.iter().map(|user| user.ot_premium).sum();

    TeamSummary {
        total_hours: round2(total_hours),
        regular_hours: round2(total_hours - overtime_hours),
        overtime_hours: round2(overtime_hours),
        user_count: users.len(),
        costs: CostSummary {
            base_cost: round2(base_cost),
            ot_premium: round2(ot_premium),
            total_cost: round2(base_cost + ot_premium),
            currency: REPORT_CURRENCY.to_string(),
        },
    }
}
