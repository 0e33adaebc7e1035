//! Rule-based financial health score (0-100)
//!
//! Four independently capped factors:
//!
//! | Factor                 | Max | Bands                                   |
//! |------------------------|-----|-----------------------------------------|
//! | Debt-to-income         | 30  | <=0.20: 30, <=0.36: 20, <=0.50: 10      |
//! | Savings rate           | 25  | >=0.20: 25, >=0.15: 20, >=0.10: 15, >=0.05: 10 |
//! | Emergency fund months  | 25  | >=6: 25, >=3: 20, >=1: 10               |
//! | Diversification proxy  | 20  | other assets: 20, savings only: 10      |
//!
//! A ratio whose denominator is zero or missing evaluates to 0.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::recommendations::{generate_recommendations, Recommendation};
use crate::finances::{total_balance, total_minimum_payment, Debt, FinancialProfile};
use crate::money::{ratio, round_currency};

pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthFactor {
    DebtToIncome,
    SavingsRate,
    EmergencyFund,
    Diversification,
}

impl HealthFactor {
    pub const ALL: [HealthFactor; 4] = [
        HealthFactor::DebtToIncome,
        HealthFactor::SavingsRate,
        HealthFactor::EmergencyFund,
        HealthFactor::Diversification,
    ];

    pub fn max_points(&self) -> u32 {
        match self {
            HealthFactor::DebtToIncome => 30,
            HealthFactor::SavingsRate => 25,
            HealthFactor::EmergencyFund => 25,
            HealthFactor::Diversification => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthFactor::DebtToIncome => "debt",
            HealthFactor::SavingsRate => "savings",
            HealthFactor::EmergencyFund => "emergency",
            HealthFactor::Diversification => "diversification",
        }
    }
}

/// Assets beyond the emergency fund, or at least a savings habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestingLevel {
    None,
    SavingsOnly,
    OtherAssets,
}

impl InvestingLevel {
    pub fn of(profile: &FinancialProfile) -> Self {
        if profile.other_assets() > Decimal::ZERO {
            InvestingLevel::OtherAssets
        } else if profile.savings() > Decimal::ZERO {
            InvestingLevel::SavingsOnly
        } else {
            InvestingLevel::None
        }
    }
}

/// Monthly debt payments over monthly income
pub fn debt_to_income(profile: &FinancialProfile, monthly_debt_payment: Decimal) -> Decimal {
    ratio(monthly_debt_payment, profile.income()).unwrap_or(Decimal::ZERO)
}

/// Monthly savings over monthly income
pub fn savings_rate(profile: &FinancialProfile) -> Decimal {
    ratio(profile.savings(), profile.income()).unwrap_or(Decimal::ZERO)
}

/// Months of expenses covered by the emergency fund
pub fn emergency_fund_months(profile: &FinancialProfile) -> Decimal {
    ratio(profile.emergency_fund(), profile.expenses()).unwrap_or(Decimal::ZERO)
}

pub fn monthly_cash_flow(profile: &FinancialProfile) -> Decimal {
    profile.income() - profile.expenses()
}

fn debt_points(dti: Decimal, income: Decimal) -> u32 {
    // No income: the ratio is undefined and scores the lowest band
    if income <= Decimal::ZERO {
        return 0;
    }
    if dti <= dec!(0.20) {
        30
    } else if dti <= dec!(0.36) {
        20
    } else if dti <= dec!(0.50) {
        10
    } else {
        0
    }
}

fn savings_points(rate: Decimal) -> u32 {
    if rate >= dec!(0.20) {
        25
    } else if rate >= dec!(0.15) {
        20
    } else if rate >= dec!(0.10) {
        15
    } else if rate >= dec!(0.05) {
        10
    } else {
        0
    }
}

fn emergency_points(months: Decimal) -> u32 {
    if months >= dec!(6) {
        25
    } else if months >= dec!(3) {
        20
    } else if months >= dec!(1) {
        10
    } else {
        0
    }
}

fn diversification_points(level: InvestingLevel) -> u32 {
    match level {
        InvestingLevel::OtherAssets => 20,
        InvestingLevel::SavingsOnly => 10,
        InvestingLevel::None => 0,
    }
}

/// Points earned by one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: HealthFactor,
    /// Raw ratio behind the points (0/1/2 investing level for diversification)
    pub value: Decimal,
    pub points: u32,
    pub max_points: u32,
}

fn factor_scores(profile: &FinancialProfile, monthly_debt_payment: Decimal) -> Vec<FactorScore> {
    let dti = debt_to_income(profile, monthly_debt_payment);
    let savings = savings_rate(profile);
    let emergency = emergency_fund_months(profile);
    let level = InvestingLevel::of(profile);

    let score = |factor: HealthFactor, value: Decimal, points: u32| FactorScore {
        factor,
        value,
        points,
        max_points: factor.max_points(),
    };

    vec![
        score(HealthFactor::DebtToIncome, dti, debt_points(dti, profile.income())),
        score(HealthFactor::SavingsRate, savings, savings_points(savings)),
        score(HealthFactor::EmergencyFund, emergency, emergency_points(emergency)),
        score(
            HealthFactor::Diversification,
            Decimal::from(level as u8),
            diversification_points(level),
        ),
    ]
}

/// Composite health score in 0..=100
pub fn score(profile: &FinancialProfile, monthly_debt_payment: Decimal) -> u32 {
    let total: u32 = factor_scores(profile, monthly_debt_payment)
        .iter()
        .map(|f| f.points)
        .sum();
    total.min(MAX_SCORE)
}

/// Score, the ratios behind it and advice for each factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub score: u32,
    pub debt_to_income: Decimal,
    pub savings_rate: Decimal,
    pub emergency_fund_months: Decimal,
    pub monthly_cash_flow: Decimal,
    /// Emergency fund plus other assets, less debt balances
    pub net_worth: Decimal,
    pub total_monthly_debt_payment: Decimal,
    pub factors: Vec<FactorScore>,
    pub recommendations: Vec<Recommendation>,
}

impl HealthBreakdown {
    /// Evaluate a profile with its debts' minimum payments as the debt load
    pub fn evaluate(profile: &FinancialProfile, debts: &[Debt]) -> Self {
        let monthly_debt_payment = total_minimum_payment(debts);
        let factors = factor_scores(profile, monthly_debt_payment);
        let score = factors.iter().map(|f| f.points).sum::<u32>().min(MAX_SCORE);

        Self {
            score,
            debt_to_income: debt_to_income(profile, monthly_debt_payment),
            savings_rate: savings_rate(profile),
            emergency_fund_months: emergency_fund_months(profile),
            monthly_cash_flow: round_currency(monthly_cash_flow(profile)),
            net_worth: round_currency(profile.liquid_assets() - total_balance(debts)),
            total_monthly_debt_payment: round_currency(monthly_debt_payment),
            factors,
            recommendations: generate_recommendations(profile, monthly_debt_payment),
        }
    }

    pub fn factor(&self, factor: HealthFactor) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: Some(dec!(5000)),
            monthly_expenses: Some(dec!(3500)),
            monthly_savings: Some(dec!(1000)),
            emergency_fund: Some(dec!(15000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_profile_factors() {
        let p = profile();
        // 15000 / 3500 = 4.2857...
        assert_eq!(emergency_fund_months(&p), dec!(4.2857142857));
        assert_eq!(emergency_points(emergency_fund_months(&p)), 20);
        assert_eq!(savings_rate(&p), dec!(0.2));
        assert_eq!(savings_points(savings_rate(&p)), 25);

        // No debt: 30, savings 25, emergency 20, savings-only 10
        assert_eq!(score(&p, Decimal::ZERO), 85);
    }

    #[test]
    fn test_debt_bands() {
        let p = profile();
        assert_eq!(score(&p, dec!(1000)), 85);
        assert_eq!(score(&p, dec!(1001)), 75);
        assert_eq!(score(&p, dec!(1800)), 75);
        assert_eq!(score(&p, dec!(2500)), 65);
        assert_eq!(score(&p, dec!(2501)), 55);
    }

    #[test]
    fn test_full_marks() {
        let mut p = profile();
        p.emergency_fund = Some(dec!(21000));
        p.other_assets = Some(dec!(50000));
        assert_eq!(score(&p, dec!(200)), 100);
    }

    #[test]
    fn test_missing_income_scores_lowest_bands() {
        let p = FinancialProfile {
            monthly_expenses: Some(dec!(2000)),
            emergency_fund: Some(dec!(2000)),
            ..Default::default()
        };
        assert_eq!(debt_to_income(&p, dec!(300)), Decimal::ZERO);
        assert_eq!(savings_rate(&p), Decimal::ZERO);
        // Only the 1-month emergency band
        assert_eq!(score(&p, dec!(300)), 10);

        assert_eq!(score(&FinancialProfile::default(), Decimal::ZERO), 0);
    }

    #[test]
    fn test_breakdown() {
        let mut p = profile();
        p.other_assets = Some(dec!(5000));
        let debts = vec![
            Debt::new("card", dec!(3000), dec!(0.2), dec!(90)),
            Debt::new("car", dec!(9000), dec!(0.06), dec!(310)),
        ];
        let breakdown = HealthBreakdown::evaluate(&p, &debts);

        assert_eq!(breakdown.total_monthly_debt_payment, dec!(400));
        assert_eq!(breakdown.debt_to_income, dec!(0.08));
        assert_eq!(breakdown.monthly_cash_flow, dec!(1500));
        // 15000 + 5000 - 12000
        assert_eq!(breakdown.net_worth, dec!(8000));
        assert_eq!(breakdown.score, 30 + 25 + 20 + 20);
        assert_eq!(breakdown.factor(HealthFactor::EmergencyFund).map(|f| f.points), Some(20));
        assert_eq!(breakdown.recommendations.len(), 4);

        let max: u32 = breakdown.factors.iter().map(|f| f.max_points).sum();
        assert_eq!(max, MAX_SCORE);
    }
}
