//! Savings goal progress and required contributions

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::finances::{Goal, GoalPriority};
use crate::money::{months_between, ratio, round_currency};

/// Where a goal stands on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Current amount has reached the target
    Completed,
    /// Deadline has passed with money still to save
    Overdue,
    InProgress,
}

/// Amount still to save, floored at zero
pub fn remaining(goal: &Goal) -> Decimal {
    (goal.target_amount - goal.current_amount).max(Decimal::ZERO)
}

/// Signed days until the deadline; negative once it has passed
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> i64 {
    (goal.deadline - today).num_days()
}

/// Monthly saving needed to hit the target by the deadline.
///
/// With less than one whole month left the full remaining amount is due now.
pub fn monthly_contribution_needed(goal: &Goal, today: NaiveDate) -> Decimal {
    let remaining = remaining(goal);
    let months = months_between(today, goal.deadline);
    if months <= 0 {
        return round_currency(remaining);
    }
    round_currency(remaining / Decimal::from(months))
}

/// `current / target`, unclamped; 0 when the target is not positive
pub fn progress(goal: &Goal) -> Decimal {
    ratio(goal.current_amount, goal.target_amount).unwrap_or(Decimal::ZERO)
}

/// Progress clamped to [0, 1] for display
pub fn progress_clamped(goal: &Goal) -> Decimal {
    progress(goal).max(Decimal::ZERO).min(Decimal::ONE)
}

pub fn goal_status(goal: &Goal, today: NaiveDate) -> GoalStatus {
    if goal.current_amount >= goal.target_amount {
        GoalStatus::Completed
    } else if goal.deadline < today {
        GoalStatus::Overdue
    } else {
        GoalStatus::InProgress
    }
}

/// Per-goal view combining every derived value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub id: String,
    pub name: String,
    pub priority: GoalPriority,
    pub deadline: NaiveDate,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub remaining: Decimal,
    pub progress: Decimal,
    pub progress_clamped: Decimal,
    pub days_remaining: i64,
    pub monthly_contribution_needed: Decimal,
    pub status: GoalStatus,
}

impl GoalProgress {
    pub fn evaluate(goal: &Goal, today: NaiveDate) -> Self {
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            priority: goal.priority,
            deadline: goal.deadline,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            remaining: round_currency(remaining(goal)),
            progress: progress(goal),
            progress_clamped: progress_clamped(goal),
            days_remaining: days_remaining(goal, today),
            monthly_contribution_needed: monthly_contribution_needed(goal, today),
            status: goal_status(goal, today),
        }
    }
}

/// Totals across a set of goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub goal_count: usize,
    pub total_target: Decimal,
    pub total_current: Decimal,
    /// Mean of unclamped progress; 0 for no goals
    pub average_progress: Decimal,
    pub completed_count: usize,
    pub overdue_count: usize,
    /// Sum of every open goal's required monthly contribution
    pub total_monthly_contribution: Decimal,
}

impl GoalSummary {
    pub fn from_goals(goals: &[Goal], today: NaiveDate) -> Self {
        let progress_sum: Decimal = goals.iter().map(progress).sum();
        let average_progress = if goals.is_empty() {
            Decimal::ZERO
        } else {
            ratio(progress_sum, Decimal::from(goals.len())).unwrap_or(Decimal::ZERO)
        };

        let statuses: Vec<GoalStatus> = goals.iter().map(|g| goal_status(g, today)).collect();

        let total_monthly_contribution = goals
            .iter()
            .zip(&statuses)
            .filter(|(_, status)| **status != GoalStatus::Completed)
            .map(|(goal, _)| monthly_contribution_needed(goal, today))
            .sum();

        Self {
            goal_count: goals.len(),
            total_target: goals.iter().map(|g| g.target_amount).sum(),
            total_current: goals.iter().map(|g| g.current_amount).sum(),
            average_progress,
            completed_count: statuses.iter().filter(|s| **s == GoalStatus::Completed).count(),
            overdue_count: statuses.iter().filter(|s| **s == GoalStatus::Overdue).count(),
            total_monthly_contribution,
        }
    }

    /// Average progress as a 0-100 percentage
    pub fn average_progress_percent(&self) -> f64 {
        (self.average_progress * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
    }
}

/// Goals ordered by priority (high first), then earliest deadline
pub fn prioritized(goals: &[Goal]) -> Vec<&Goal> {
    let mut ordered: Vec<&Goal> = goals.iter().collect();
    ordered.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.deadline.cmp(&b.deadline)));
    ordered
}
