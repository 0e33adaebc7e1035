//! Payoff plan output structures

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::strategy::PayoffStrategy;
use crate::error::{EngineError, EngineResult};

/// One simulated month across all debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffMonth {
    /// Month index; 0 is the starting position before any payment
    pub month: u32,

    /// Interest accrued this month
    pub interest: Decimal,

    /// Payments applied this month (minimums plus extra)
    pub payment: Decimal,

    /// Total remaining balance at end of month
    pub remaining_balance: Decimal,

    /// Debts with a balance left at end of month
    pub debts_remaining: usize,
}

impl PayoffMonth {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            interest: Decimal::ZERO,
            payment: Decimal::ZERO,
            remaining_balance: Decimal::ZERO,
            debts_remaining: 0,
        }
    }
}

/// Per-debt result of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub id: String,
    pub name: String,

    /// Position in the strategy order (1 = receives extra payment first)
    pub priority: u32,

    pub starting_balance: Decimal,

    /// Month the balance reached zero; `None` if it never did
    pub months_to_zero: Option<u32>,

    pub total_interest: Decimal,
    pub total_paid: Decimal,

    /// Balance left when the simulation stopped
    pub ending_balance: Decimal,
}

/// How the simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffOutcome {
    /// Every balance reached zero
    DebtFree,
    /// The month ceiling was reached with balances left
    NeverPayoff,
}

/// Full month-by-month payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    pub extra_payment: Decimal,
    pub outcome: PayoffOutcome,

    /// Months until every debt is paid; `None` for `NeverPayoff`
    pub months_to_debt_free: Option<u32>,

    pub starting_balance: Decimal,
    pub total_interest: Decimal,
    pub total_paid: Decimal,

    /// Per-debt results in strategy order
    pub debts: Vec<DebtPayoff>,

    /// Debt ids in the order their balances reached zero
    pub payoff_order: Vec<String>,

    /// Month 0 (starting position) followed by one row per simulated month
    pub schedule: Vec<PayoffMonth>,
}

impl PayoffPlan {
    /// Plan for an empty debt set: already debt free
    pub fn empty(strategy: PayoffStrategy, extra_payment: Decimal) -> Self {
        Self {
            strategy,
            extra_payment,
            outcome: PayoffOutcome::DebtFree,
            months_to_debt_free: Some(0),
            starting_balance: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            debts: Vec::new(),
            payoff_order: Vec::new(),
            schedule: vec![PayoffMonth::new(0)],
        }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: PayoffMonth) {
        self.schedule.push(row);
    }

    pub fn is_debt_free(&self) -> bool {
        self.outcome == PayoffOutcome::DebtFree
    }

    /// Turn a `NeverPayoff` outcome into a `ComputationLimit` error
    pub fn require_debt_free(self) -> EngineResult<Self> {
        match self.outcome {
            PayoffOutcome::DebtFree => Ok(self),
            PayoffOutcome::NeverPayoff => Err(EngineError::ceiling(self.simulated_months())),
        }
    }

    /// Months actually simulated (excludes the month-0 row)
    pub fn simulated_months(&self) -> u32 {
        self.schedule.len().saturating_sub(1) as u32
    }

    /// (month, remaining total) pairs for a reduction-trend chart
    pub fn remaining_balance_series(&self) -> Vec<(u32, Decimal)> {
        self.schedule
            .iter()
            .map(|row| (row.month, row.remaining_balance))
            .collect()
    }

    /// Calendar date of the final payment, counting from `start`
    pub fn debt_free_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        self.months_to_debt_free
            .and_then(|months| start.checked_add_months(Months::new(months)))
    }

    /// Look up a debt's result by id
    pub fn debt(&self, id: &str) -> Option<&DebtPayoff> {
        self.debts.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_plan() {
        let plan = PayoffPlan::empty(PayoffStrategy::Snowball, dec!(100));
        assert!(plan.is_debt_free());
        assert_eq!(plan.months_to_debt_free, Some(0));
        assert_eq!(plan.simulated_months(), 0);
        assert_eq!(plan.remaining_balance_series(), vec![(0, Decimal::ZERO)]);
    }

    #[test]
    fn test_debt_free_date() {
        let mut plan = PayoffPlan::empty(PayoffStrategy::Avalanche, Decimal::ZERO);
        plan.months_to_debt_free = Some(14);
        let start = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(
            plan.debt_free_date(start),
            NaiveDate::from_ymd_opt(2026, 1, 30)
        );
    }

    #[test]
    fn test_require_debt_free() {
        let mut plan = PayoffPlan::empty(PayoffStrategy::Avalanche, Decimal::ZERO);
        plan.outcome = PayoffOutcome::NeverPayoff;
        plan.months_to_debt_free = None;
        for month in 1..=3 {
            plan.add_row(PayoffMonth::new(month));
        }
        assert_eq!(
            plan.require_debt_free().unwrap_err(),
            EngineError::ceiling(3)
        );
    }
}
