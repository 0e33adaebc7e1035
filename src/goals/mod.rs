//! Savings goal tracking

mod tracker;

pub use tracker::{
    days_remaining, goal_status, monthly_contribution_needed, prioritized, progress,
    progress_clamped, remaining, GoalProgress, GoalStatus, GoalSummary,
};
