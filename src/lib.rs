//! Financial Engine - calculation core for personal-finance planning
//!
//! This library provides:
//! - Fixed-point money and rate primitives
//! - Single-debt amortization math and multi-debt avalanche/snowball simulation
//! - Savings, retirement and net worth growth projections
//! - Savings goal tracking
//! - Portfolio diversification and risk scoring
//! - Rule-based financial health scoring with recommendations
//!
//! All operations are pure: inputs are borrowed, outputs are owned, and the
//! current date is always an explicit argument.

pub mod config;
pub mod debt;
pub mod engine;
pub mod error;
pub mod finances;
pub mod goals;
pub mod health;
pub mod money;
pub mod portfolio;
pub mod projection;

// Re-export commonly used types
pub use config::EngineConfig;
pub use debt::{PayoffHorizon, PayoffPlan, PayoffSimulator, PayoffStrategy, StrategyComparison};
pub use engine::{FinancialEngine, FinancialReport, PayoffScenario};
pub use error::{EngineError, EngineResult};
pub use finances::{
    AssetClass, Debt, DebtType, FinancialProfile, FinancialSnapshot, Goal, GoalPriority, Holding,
};
pub use health::HealthBreakdown;
