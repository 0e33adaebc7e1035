//! Debt payoff math: single-debt amortization, multi-debt strategy simulation
//! and aggregate summaries

pub mod amortization;
mod schedule;
mod simulator;
mod state;
mod strategy;
mod summary;

pub use amortization::{monthly_interest, months_to_payoff, total_interest, PayoffHorizon};
pub use schedule::{DebtPayoff, PayoffMonth, PayoffOutcome, PayoffPlan};
pub use simulator::{
    compare_strategies, simulate_payoff, simulate_payoff_strict, PayoffSimulator,
    SimulationConfig, StrategyComparison, DEFAULT_MAX_MONTHS,
};
pub use state::{DebtState, SimulationState};
pub use strategy::PayoffStrategy;
pub use summary::{DebtShare, DebtSummary};
