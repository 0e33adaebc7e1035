//! Multi-debt monthly payoff simulation with avalanche/snowball rollover

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::{DebtPayoff, PayoffMonth, PayoffOutcome, PayoffPlan};
use super::state::SimulationState;
use super::strategy::PayoffStrategy;
use crate::error::{EngineError, EngineResult};
use crate::finances::Debt;
use crate::money::{require_non_negative, round_currency};

/// Safety ceiling on simulated months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Configuration for a payoff simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stop after this many months even if balances remain
    pub max_months: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Both strategies run on the same input, plus a minimum-only baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffPlan,
    pub snowball: PayoffPlan,
    pub minimum_only: PayoffPlan,

    /// Strategy with the lower total interest (fewer months on a tie)
    pub recommended: PayoffStrategy,

    /// Snowball interest minus avalanche interest
    pub avalanche_interest_savings: Decimal,

    /// Minimum-only interest minus the recommended plan's interest
    pub extra_payment_interest_savings: Decimal,
}

impl StrategyComparison {
    pub fn plan(&self, strategy: PayoffStrategy) -> &PayoffPlan {
        match strategy {
            PayoffStrategy::Avalanche => &self.avalanche,
            PayoffStrategy::Snowball => &self.snowball,
        }
    }
}

/// Payoff simulator
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate paying off `debts` month by month.
    ///
    /// Each month: interest accrues on every open debt, every open debt gets
    /// its minimum payment, then the extra budget (plus minimums freed by
    /// debts already paid off) goes to open debts in strategy order.
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: PayoffStrategy,
        extra_payment: Decimal,
    ) -> EngineResult<PayoffPlan> {
        require_non_negative("extra_payment", extra_payment)?;
        for debt in debts {
            debt.validate()?;
        }

        if debts.is_empty() {
            return Ok(PayoffPlan::empty(strategy, extra_payment));
        }

        let order = strategy.order(debts);
        let mut state = SimulationState::new(debts, &order);

        debug!(
            "simulating {} payoff of {} debts, extra {}",
            strategy,
            debts.len(),
            extra_payment
        );

        let starting_balance = debts
            .iter()
            .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.balance))
            .ok_or_else(|| EngineError::overflow("starting balance"))?;
        let mut plan = PayoffPlan::empty(strategy, extra_payment);
        plan.starting_balance = round_currency(starting_balance);
        plan.schedule[0].remaining_balance = round_currency(starting_balance);
        plan.schedule[0].debts_remaining = state.active_count();

        let mut diverged = false;
        while !state.all_paid() && state.month < self.config.max_months {
            state.advance_month();
            match self.simulate_month(&mut state, extra_payment) {
                Ok(row) => plan.add_row(row),
                // Balances outgrew the decimal range: they can never clear
                Err(err) if err.is_computation_limit() => {
                    warn!("{} payoff stopped at month {}: {}", strategy, state.month, err);
                    diverged = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let outcome = if state.all_paid() {
            PayoffOutcome::DebtFree
        } else {
            if !diverged {
                warn!(
                    "{} payoff did not converge within {} months; remaining balance {}",
                    strategy,
                    self.config.max_months,
                    round_currency(state.total_balance())
                );
            }
            PayoffOutcome::NeverPayoff
        };

        plan.outcome = outcome;
        plan.months_to_debt_free = match outcome {
            PayoffOutcome::DebtFree => Some(state.month),
            PayoffOutcome::NeverPayoff => None,
        };
        self.finish_plan(&mut plan, debts, &state);

        debug!(
            "{} plan: {:?} months, interest {}",
            strategy, plan.months_to_debt_free, plan.total_interest
        );

        Ok(plan)
    }

    /// Apply one month of interest and payments
    fn simulate_month(
        &self,
        state: &mut SimulationState,
        extra_payment: Decimal,
    ) -> EngineResult<PayoffMonth> {
        let mut row = PayoffMonth::new(state.month);

        // Interest on every open debt
        row.interest = state.accrue_interest()?;

        // Minimum payments, capped at each balance
        for debt in state.debts.iter_mut().filter(|d| d.is_active()) {
            let minimum = debt.minimum_payment;
            row.payment += debt.pay(minimum);
        }

        // Extra budget plus rollover goes down the priority list
        let mut pool = extra_payment
            .checked_add(state.rollover)
            .ok_or_else(|| EngineError::overflow("extra payment pool"))?;
        for debt in state.debts.iter_mut() {
            if pool <= Decimal::ZERO {
                break;
            }
            if debt.is_active() {
                let applied = debt.pay(pool);
                pool -= applied;
                row.payment += applied;
            }
        }

        state.settle_payoffs();

        row.interest = round_currency(row.interest);
        row.payment = round_currency(row.payment);
        row.remaining_balance = round_currency(state.total_balance());
        row.debts_remaining = state.active_count();
        Ok(row)
    }

    /// Fill per-debt results and totals from the final state
    fn finish_plan(&self, plan: &mut PayoffPlan, debts: &[Debt], state: &SimulationState) {
        plan.debts = state
            .debts
            .iter()
            .enumerate()
            .map(|(priority, ds)| {
                let debt = &debts[ds.source_index];
                DebtPayoff {
                    id: debt.id.clone(),
                    name: debt.name.clone(),
                    priority: priority as u32 + 1,
                    starting_balance: debt.balance,
                    months_to_zero: ds.paid_off_month,
                    total_interest: round_currency(ds.interest_paid),
                    total_paid: round_currency(ds.total_paid),
                    ending_balance: round_currency(ds.balance),
                }
            })
            .collect();

        plan.payoff_order = state
            .payoff_order
            .iter()
            .map(|&i| debts[i].id.clone())
            .collect();

        let interest: Decimal = state.debts.iter().map(|d| d.interest_paid).sum();
        let paid: Decimal = state.debts.iter().map(|d| d.total_paid).sum();
        plan.total_interest = round_currency(interest);
        plan.total_paid = round_currency(paid);
    }

    /// Run both strategies and a minimum-only baseline on the same debts
    pub fn compare(&self, debts: &[Debt], extra_payment: Decimal) -> EngineResult<StrategyComparison> {
        let avalanche = self.simulate(debts, PayoffStrategy::Avalanche, extra_payment)?;
        let snowball = self.simulate(debts, PayoffStrategy::Snowball, extra_payment)?;
        let minimum_only = self.simulate(debts, PayoffStrategy::Avalanche, Decimal::ZERO)?;

        let recommended = recommend(&avalanche, &snowball);
        let best = match recommended {
            PayoffStrategy::Avalanche => &avalanche,
            PayoffStrategy::Snowball => &snowball,
        };

        Ok(StrategyComparison {
            avalanche_interest_savings: snowball.total_interest - avalanche.total_interest,
            extra_payment_interest_savings: minimum_only.total_interest - best.total_interest,
            recommended,
            avalanche,
            snowball,
            minimum_only,
        })
    }

    /// Simulate the same debts over several extra-payment budgets
    pub fn sweep(
        &self,
        debts: &[Debt],
        strategy: PayoffStrategy,
        extra_payments: &[Decimal],
    ) -> EngineResult<Vec<PayoffPlan>> {
        extra_payments
            .iter()
            .map(|&extra| self.simulate(debts, strategy, extra))
            .collect()
    }
}

/// Pick the strategy that converges with less interest, then fewer months
fn recommend(avalanche: &PayoffPlan, snowball: &PayoffPlan) -> PayoffStrategy {
    match (avalanche.is_debt_free(), snowball.is_debt_free()) {
        (false, true) => return PayoffStrategy::Snowball,
        (true, false) => return PayoffStrategy::Avalanche,
        _ => {}
    }

    if snowball.total_interest < avalanche.total_interest {
        return PayoffStrategy::Snowball;
    }
    if snowball.total_interest == avalanche.total_interest
        && snowball.months_to_debt_free < avalanche.months_to_debt_free
    {
        return PayoffStrategy::Snowball;
    }
    PayoffStrategy::Avalanche
}

/// Simulate with the default 600-month ceiling
pub fn simulate_payoff(
    debts: &[Debt],
    strategy: PayoffStrategy,
    extra_payment: Decimal,
) -> EngineResult<PayoffPlan> {
    PayoffSimulator::default().simulate(debts, strategy, extra_payment)
}

/// Run avalanche and snowball side by side with the default ceiling
pub fn compare_strategies(debts: &[Debt], extra_payment: Decimal) -> EngineResult<StrategyComparison> {
    PayoffSimulator::default().compare(debts, extra_payment)
}

/// Simulate and fail with `ComputationLimit` if the debts never clear
pub fn simulate_payoff_strict(
    debts: &[Debt],
    strategy: PayoffStrategy,
    extra_payment: Decimal,
) -> EngineResult<PayoffPlan> {
    simulate_payoff(debts, strategy, extra_payment)?.require_debt_free()
}
