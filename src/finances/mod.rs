//! Financial input records and file loading

mod data;
pub mod loader;

pub use data::{
    total_balance, total_minimum_payment, AssetClass, Debt, DebtType, FinancialProfile,
    FinancialSnapshot, Goal, GoalPriority, Holding,
};
pub use loader::{load_debts, load_debts_from_reader, load_goals, load_holdings, load_profile, load_snapshot};
