//! Debt ordering strategies

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::finances::Debt;

/// Which debt receives the extra payment first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    /// Highest interest rate first
    #[default]
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl PayoffStrategy {
    pub const ALL: [PayoffStrategy; 2] = [PayoffStrategy::Avalanche, PayoffStrategy::Snowball];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }

    /// Compare two debts under this strategy's key.
    ///
    /// Avalanche: rate desc, then balance desc.
    /// Snowball: balance asc, then rate desc.
    /// Full ties are left to the caller's stable sort (input order).
    pub fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        match self {
            PayoffStrategy::Avalanche => b
                .annual_rate
                .cmp(&a.annual_rate)
                .then_with(|| b.balance.cmp(&a.balance)),
            PayoffStrategy::Snowball => a
                .balance
                .cmp(&b.balance)
                .then_with(|| b.annual_rate.cmp(&a.annual_rate)),
        }
    }

    /// Indices of `debts` in payoff priority order
    pub fn order(&self, debts: &[Debt]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..debts.len()).collect();
        // sort_by is stable, so equal keys keep input order
        indices.sort_by(|&a, &b| self.compare(&debts[a], &debts[b]));
        indices
    }

    /// Debts cloned into payoff priority order
    pub fn ordered(&self, debts: &[Debt]) -> Vec<Debt> {
        self.order(debts).into_iter().map(|i| debts[i].clone()).collect()
    }
}

impl std::fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoffStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(PayoffStrategy::Avalanche),
            "snowball" => Ok(PayoffStrategy::Snowball),
            other => Err(EngineError::invalid(
                "strategy",
                format!("unknown strategy '{}', expected avalanche or snowball", other),
            )),
        }
    }
}
