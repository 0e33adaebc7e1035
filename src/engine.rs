//! Engine facade
//!
//! Holds an `EngineConfig` and exposes every calculation with the configured
//! assumptions. Stateless between calls: the same inputs always give the same
//! outputs, and "today" is always passed in.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::debt::{
    months_to_payoff, DebtSummary, PayoffHorizon, PayoffPlan, PayoffSimulator, PayoffStrategy,
    StrategyComparison,
};
use crate::error::{EngineError, EngineResult};
use crate::finances::{Debt, FinancialProfile, FinancialSnapshot, Goal, Holding};
use crate::goals::{GoalProgress, GoalSummary};
use crate::health::HealthBreakdown;
use crate::portfolio::{analyze as analyze_portfolio, PortfolioAnalysis};
use crate::projection::{
    future_value, generate_projection, project_retirement, retirement_income, ProjectionYear,
    RetirementIncome, RetirementProjection,
};

/// One payoff scenario in a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffScenario {
    pub strategy: PayoffStrategy,
    pub extra_payment: Decimal,
}

impl PayoffScenario {
    pub fn new(strategy: PayoffStrategy, extra_payment: Decimal) -> Self {
        Self {
            strategy,
            extra_payment,
        }
    }

    /// Every strategy crossed with every extra payment
    pub fn grid(extra_payments: &[Decimal]) -> Vec<Self> {
        extra_payments
            .iter()
            .flat_map(|&extra| PayoffStrategy::ALL.iter().map(move |&s| Self::new(s, extra)))
            .collect()
    }
}

/// Everything the engine can say about one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub as_of: NaiveDate,
    pub health: HealthBreakdown,
    pub debt_summary: DebtSummary,
    pub payoff: StrategyComparison,

    /// `None` when the birth date or retirement age is missing, or the
    /// retirement age has been reached
    pub retirement: Option<RetirementProjection>,
    pub retirement_income: RetirementIncome,

    pub projection: Vec<ProjectionYear>,
    pub goals: Vec<GoalProgress>,
    pub goal_summary: GoalSummary,
    pub portfolio: PortfolioAnalysis,
}

#[derive(Debug, Clone, Default)]
pub struct FinancialEngine {
    config: EngineConfig,
}

impl FinancialEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn simulator(&self) -> PayoffSimulator {
        PayoffSimulator::new(self.config.simulation)
    }

    pub fn months_to_payoff(
        &self,
        balance: Decimal,
        annual_rate: Decimal,
        payment: Decimal,
    ) -> EngineResult<PayoffHorizon> {
        months_to_payoff(balance, annual_rate, payment)
    }

    pub fn simulate_payoff(
        &self,
        debts: &[Debt],
        strategy: PayoffStrategy,
        extra_payment: Decimal,
    ) -> EngineResult<PayoffPlan> {
        self.simulator().simulate(debts, strategy, extra_payment)
    }

    pub fn compare_strategies(&self, debts: &[Debt], extra_payment: Decimal) -> EngineResult<StrategyComparison> {
        self.simulator().compare(debts, extra_payment)
    }

    pub fn debt_summary(&self, debts: &[Debt]) -> DebtSummary {
        DebtSummary::from_debts(debts)
    }

    pub fn future_value(
        &self,
        present_value: Decimal,
        monthly_contribution: Decimal,
        annual_rate: Decimal,
        years: u32,
    ) -> EngineResult<Decimal> {
        future_value(present_value, monthly_contribution, annual_rate, years)
    }

    /// Expected annual return for the profile's risk tolerance
    pub fn expected_return(&self, profile: &FinancialProfile) -> Decimal {
        self.config.returns.expected_return(profile.risk_tolerance)
    }

    pub fn project_retirement(
        &self,
        profile: &FinancialProfile,
        today: NaiveDate,
    ) -> EngineResult<RetirementProjection> {
        project_retirement(profile, today, &self.config.returns, &self.config.retirement)
    }

    pub fn retirement_income(&self, profile: &FinancialProfile, today: NaiveDate) -> EngineResult<RetirementIncome> {
        retirement_income(profile, today, &self.config.returns, &self.config.retirement)
    }

    /// Net worth projection over the configured number of years
    pub fn generate_projection(
        &self,
        profile: &FinancialProfile,
        debts: &[Debt],
        today: NaiveDate,
    ) -> EngineResult<Vec<ProjectionYear>> {
        generate_projection(profile, debts, self.config.projection_years, today, &self.config.returns)
    }

    pub fn goal_progress(&self, goals: &[Goal], today: NaiveDate) -> Vec<GoalProgress> {
        goals.iter().map(|g| GoalProgress::evaluate(g, today)).collect()
    }

    pub fn goal_summary(&self, goals: &[Goal], today: NaiveDate) -> GoalSummary {
        GoalSummary::from_goals(goals, today)
    }

    pub fn analyze_portfolio(&self, holdings: &[Holding]) -> PortfolioAnalysis {
        analyze_portfolio(holdings)
    }

    pub fn health(&self, profile: &FinancialProfile, debts: &[Debt]) -> HealthBreakdown {
        HealthBreakdown::evaluate(profile, debts)
    }

    /// Full report with no extra payment beyond the minimums
    pub fn analyze(&self, snapshot: &FinancialSnapshot, today: NaiveDate) -> EngineResult<FinancialReport> {
        self.analyze_with_extra(snapshot, today, Decimal::ZERO)
    }

    /// Full report, comparing payoff strategies at `extra_payment`
    pub fn analyze_with_extra(
        &self,
        snapshot: &FinancialSnapshot,
        today: NaiveDate,
        extra_payment: Decimal,
    ) -> EngineResult<FinancialReport> {
        validate_snapshot(snapshot)?;
        debug!(
            "analyzing snapshot: {} debts, {} goals, {} holdings",
            snapshot.debts.len(),
            snapshot.goals.len(),
            snapshot.holdings.len()
        );

        let profile = &snapshot.profile;

        let retirement = match self.project_retirement(profile, today) {
            Ok(projection) => Some(projection),
            Err(EngineError::InsufficientData(reason)) => {
                debug!("skipping retirement projection: {}", reason);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(FinancialReport {
            as_of: today,
            health: self.health(profile, &snapshot.debts),
            debt_summary: self.debt_summary(&snapshot.debts),
            payoff: self.compare_strategies(&snapshot.debts, extra_payment)?,
            retirement,
            retirement_income: self.retirement_income(profile, today)?,
            projection: self.generate_projection(profile, &snapshot.debts, today)?,
            goals: self.goal_progress(&snapshot.goals, today),
            goal_summary: self.goal_summary(&snapshot.goals, today),
            portfolio: self.analyze_portfolio(&snapshot.holdings),
        })
    }

    /// Run several payoff scenarios on the same debts
    pub fn run_scenarios(&self, debts: &[Debt], scenarios: &[PayoffScenario]) -> EngineResult<Vec<PayoffPlan>> {
        let simulator = self.simulator();
        scenarios
            .iter()
            .map(|s| simulator.simulate(debts, s.strategy, s.extra_payment))
            .collect()
    }
}

fn validate_snapshot(snapshot: &FinancialSnapshot) -> EngineResult<()> {
    snapshot.profile.validate()?;
    for debt in &snapshot.debts {
        debt.validate()?;
    }
    for goal in &snapshot.goals {
        goal.validate()?;
    }
    for holding in &snapshot.holdings {
        holding.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::SimulationConfig;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            profile: FinancialProfile {
                monthly_income: Some(dec!(5000)),
                monthly_expenses: Some(dec!(3500)),
                monthly_savings: Some(dec!(1000)),
                emergency_fund: Some(dec!(15000)),
                other_assets: Some(dec!(10000)),
                birth_date: Some(date(1990, 1, 1)),
                target_retirement_age: Some(65),
                risk_tolerance: Some(4),
            },
            debts: vec![
                Debt::new("card", dec!(1000), dec!(0.24), dec!(50)),
                Debt::new("student", dec!(5000), dec!(0.10), dec!(100)),
            ],
            goals: vec![Goal::new("house", dec!(20000), dec!(5000), date(2027, 1, 1))],
            holdings: vec![Holding::new(
                "VTI",
                crate::finances::AssetClass::Etf,
                dec!(10),
                dec!(200),
                dec!(250),
            )],
        }
    }

    #[test]
    fn test_analyze_report() {
        let engine = FinancialEngine::new();
        let today = date(2025, 1, 1);
        let report = engine.analyze(&snapshot(), today).unwrap();

        assert_eq!(report.as_of, today);
        // DTI 150/5000 = 0.03: 30, savings 0.2: 25, emergency 4.29: 20, assets: 20
        assert_eq!(report.health.score, 95);
        assert_eq!(report.debt_summary.total_balance, dec!(6000));
        assert!(report.payoff.avalanche.is_debt_free());
        assert!(report.retirement.is_some());
        assert_eq!(report.projection.len(), 10);
        assert_eq!(report.goals.len(), 1);
        assert_eq!(report.goal_summary.goal_count, 1);
        assert_eq!(report.portfolio.valuation.total_market_value, dec!(2500));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let engine = FinancialEngine::new();
        let today = date(2025, 1, 1);
        let first = engine.analyze(&snapshot(), today).unwrap();
        let second = engine.analyze(&snapshot(), today).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_without_retirement_data() {
        let mut snap = snapshot();
        snap.profile.birth_date = None;
        let report = FinancialEngine::new().analyze(&snap, date(2025, 1, 1)).unwrap();
        assert!(report.retirement.is_none());
        assert_eq!(report.retirement_income.investment_income, Decimal::ZERO);
    }

    #[test]
    fn test_analyze_rejects_invalid_snapshot() {
        let mut snap = snapshot();
        snap.debts[0].annual_rate = dec!(-0.1);
        let err = FinancialEngine::new().analyze(&snap, date(2025, 1, 1)).unwrap_err();
        assert!(err.is_invalid_input());

        let mut snap = snapshot();
        snap.holdings[0].shares = Decimal::ZERO;
        let err = FinancialEngine::new().analyze(&snap, date(2025, 1, 1)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_analyze_survives_runaway_debt() {
        let mut snap = snapshot();
        snap.debts.push(Debt::new("payday", dec!(1000), dec!(4.0), dec!(10)));
        let report = FinancialEngine::new().analyze(&snap, date(2025, 1, 1)).unwrap();
        assert!(!report.payoff.avalanche.is_debt_free());
        assert!(!report.payoff.snowball.is_debt_free());
    }

    #[test]
    fn test_run_scenarios() {
        let engine = FinancialEngine::with_config(EngineConfig {
            simulation: SimulationConfig { max_months: 240 },
            ..Default::default()
        });
        let scenarios = PayoffScenario::grid(&[dec!(0), dec!(200)]);
        assert_eq!(scenarios.len(), 4);

        let plans = engine.run_scenarios(&snapshot().debts, &scenarios).unwrap();
        assert_eq!(plans.len(), 4);
        assert_eq!(plans[0].strategy, PayoffStrategy::Avalanche);
        assert_eq!(plans[1].strategy, PayoffStrategy::Snowball);
        assert!(plans[2].months_to_debt_free < plans[0].months_to_debt_free);
    }

    #[test]
    fn test_expected_return_uses_config() {
        let mut config = EngineConfig::default();
        config.returns.moderate = dec!(0.06);
        let engine = FinancialEngine::with_config(config);
        assert_eq!(engine.expected_return(&snapshot().profile), dec!(0.06));
    }
}
