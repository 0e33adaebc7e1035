//! Running state of a multi-debt payoff simulation

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::finances::Debt;
use crate::money::{monthly_rate, round_working};

/// State of one debt at a point in the simulation
#[derive(Debug, Clone)]
pub struct DebtState {
    /// Index into the caller's debt slice
    pub source_index: usize,

    /// Remaining balance at working scale
    pub balance: Decimal,

    pub minimum_payment: Decimal,

    /// Monthly rate derived from the annual rate
    pub monthly_rate: Decimal,

    /// Cumulative interest accrued
    pub interest_paid: Decimal,

    /// Cumulative payments applied
    pub total_paid: Decimal,

    /// Month the balance reached zero
    pub paid_off_month: Option<u32>,
}

impl DebtState {
    pub fn from_debt(source_index: usize, debt: &Debt) -> Self {
        let paid_off_month = if debt.balance <= Decimal::ZERO { Some(0) } else { None };
        Self {
            source_index,
            balance: debt.balance.max(Decimal::ZERO),
            minimum_payment: debt.minimum_payment,
            monthly_rate: monthly_rate(debt.annual_rate),
            interest_paid: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            paid_off_month,
        }
    }

    pub fn is_active(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// One month of interest on the current balance, or `None` when the
    /// interest or the grown balance leaves the decimal range
    pub fn pending_interest(&self) -> Option<Decimal> {
        let interest = round_working(self.balance.checked_mul(self.monthly_rate)?);
        self.balance.checked_add(interest)?;
        self.interest_paid.checked_add(interest)?;
        Some(interest)
    }

    /// Add one month of interest to the balance, returning the amount
    pub fn accrue_interest(&mut self) -> EngineResult<Decimal> {
        let interest = self
            .pending_interest()
            .ok_or_else(|| EngineError::overflow("monthly interest"))?;
        self.balance += interest;
        self.interest_paid += interest;
        Ok(interest)
    }

    /// Pay up to `amount`, capped at the balance. Returns what was applied.
    pub fn pay(&mut self, amount: Decimal) -> Decimal {
        let applied = amount.min(self.balance).max(Decimal::ZERO);
        self.balance -= applied;
        self.total_paid += applied;
        applied
    }
}

/// Simulation state across all debts, kept in strategy priority order
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current simulated month (0 before the first month)
    pub month: u32,

    /// Debts in payoff priority order
    pub debts: Vec<DebtState>,

    /// Minimum payments freed by debts already paid off
    pub rollover: Decimal,

    /// Source indices in the order their balances reached zero
    pub payoff_order: Vec<usize>,
}

impl SimulationState {
    /// Initialize from debts and the strategy's priority order
    pub fn new(debts: &[Debt], order: &[usize]) -> Self {
        let states: Vec<DebtState> = order
            .iter()
            .map(|&i| DebtState::from_debt(i, &debts[i]))
            .collect();

        // Debts that start at zero free their minimum immediately
        let rollover = states
            .iter()
            .filter(|d| d.paid_off_month.is_some())
            .map(|d| d.minimum_payment)
            .sum();

        let payoff_order = states
            .iter()
            .filter(|d| d.paid_off_month.is_some())
            .map(|d| d.source_index)
            .collect();

        Self {
            month: 0,
            debts: states,
            rollover,
            payoff_order,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Accrue one month of interest on every open debt, returning the total.
    ///
    /// All or nothing: when any balance, or the running totals across debts,
    /// would leave the decimal range, no debt is touched.
    pub fn accrue_interest(&mut self) -> EngineResult<Decimal> {
        let month = self.month;
        let total = self
            .checked_month_interest()
            .ok_or_else(|| EngineError::overflow(format!("interest in month {}", month)))?;

        for debt in self.debts.iter_mut().filter(|d| d.is_active()) {
            debt.accrue_interest()?;
        }
        Ok(total)
    }

    fn checked_month_interest(&self) -> Option<Decimal> {
        let mut month_interest = Decimal::ZERO;
        let mut balance_after = Decimal::ZERO;
        let mut interest_after = Decimal::ZERO;

        for debt in &self.debts {
            let interest = if debt.is_active() {
                debt.pending_interest()?
            } else {
                Decimal::ZERO
            };
            month_interest = month_interest.checked_add(interest)?;
            balance_after = balance_after.checked_add(debt.balance)?.checked_add(interest)?;
            interest_after = interest_after
                .checked_add(debt.interest_paid)?
                .checked_add(interest)?;
        }
        Some(month_interest)
    }

    pub fn total_balance(&self) -> Decimal {
        self.debts.iter().map(|d| d.balance).sum()
    }

    pub fn active_count(&self) -> usize {
        self.debts.iter().filter(|d| d.is_active()).count()
    }

    pub fn all_paid(&self) -> bool {
        self.debts.iter().all(|d| !d.is_active())
    }

    /// Record debts that reached zero this month and free their minimums
    pub fn settle_payoffs(&mut self) {
        for debt in self.debts.iter_mut() {
            if debt.paid_off_month.is_none() && !debt.is_active() {
                debt.paid_off_month = Some(self.month);
                self.rollover += debt.minimum_payment;
                self.payoff_order.push(debt.source_index);
            }
        }
    }
}
