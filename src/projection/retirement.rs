//! Retirement savings projection and a simplified retirement income estimate
//!
//! The income estimate is a planning placeholder. The Social Security piece
//! is a flat share of capped wages, not a benefit formula.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::growth::{future_value, ReturnAssumptions};
use crate::error::{EngineError, EngineResult};
use crate::finances::FinancialProfile;
use crate::money::{age_on, require_non_negative, round_currency, MONTHS_PER_YEAR};

/// Constants behind the retirement projection and income estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementAssumptions {
    /// Share of current income needed in retirement
    pub replacement_ratio: Decimal,

    /// Months of retirement the savings must fund (25 years)
    pub horizon_months: u32,

    /// Annual safe withdrawal rate
    pub withdrawal_rate: Decimal,

    /// Share of capped wages paid as Social Security
    pub social_security_ratio: Decimal,

    /// Annual wage cap for the Social Security estimate
    pub social_security_wage_cap: Decimal,

    /// Annual ceiling on the Social Security estimate
    pub social_security_max_benefit: Decimal,
}

impl Default for RetirementAssumptions {
    fn default() -> Self {
        Self {
            replacement_ratio: dec!(0.8),
            horizon_months: 300,
            withdrawal_rate: dec!(0.04),
            social_security_ratio: dec!(0.40),
            social_security_wage_cap: dec!(160200),
            social_security_max_benefit: dec!(48000),
        }
    }
}

impl RetirementAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("retirement.replacement_ratio", self.replacement_ratio)?;
        require_non_negative("retirement.withdrawal_rate", self.withdrawal_rate)?;
        require_non_negative("retirement.social_security_ratio", self.social_security_ratio)?;
        require_non_negative("retirement.social_security_wage_cap", self.social_security_wage_cap)?;
        require_non_negative(
            "retirement.social_security_max_benefit",
            self.social_security_max_benefit,
        )
    }
}

/// Projected savings at the target retirement age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub current_age: i32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,

    /// Starting balance (the profile's other assets)
    pub current_savings: Decimal,
    pub monthly_savings: Decimal,
    pub expected_return: Decimal,

    pub projected_savings: Decimal,
    pub required_savings: Decimal,

    /// Required minus projected; negative when ahead of target
    pub savings_gap: Decimal,
    pub on_track: bool,
}

/// Annual retirement income estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementIncome {
    pub investment_income: Decimal,
    pub social_security: Decimal,
    pub other_income: Decimal,
    pub total_annual: Decimal,
}

impl RetirementIncome {
    pub fn total_monthly(&self) -> Decimal {
        round_currency(self.total_annual / MONTHS_PER_YEAR)
    }
}

/// Project savings forward to the profile's target retirement age
pub fn project_retirement(
    profile: &FinancialProfile,
    today: NaiveDate,
    returns: &ReturnAssumptions,
    assumptions: &RetirementAssumptions,
) -> EngineResult<RetirementProjection> {
    let (birth_date, retirement_age) = match (profile.birth_date, profile.target_retirement_age) {
        (Some(birth), Some(age)) => (birth, age),
        _ => {
            return Err(EngineError::insufficient(
                "birth date and target retirement age are required",
            ))
        }
    };

    let current_age = age_on(birth_date, today);
    let years_to_retirement = i64::from(retirement_age) - i64::from(current_age);
    if years_to_retirement <= 0 {
        return Err(EngineError::insufficient(format!(
            "already at or past retirement age ({} >= {})",
            current_age, retirement_age
        )));
    }
    let years_to_retirement = years_to_retirement as u32;

    let current_savings = profile.other_assets();
    let monthly_savings = profile.savings();
    let expected_return = returns.expected_return(profile.risk_tolerance);

    let projected = future_value(current_savings, monthly_savings, expected_return, years_to_retirement)?;
    let projected_savings = round_currency(projected);

    let required_savings = round_currency(
        profile.income() * assumptions.replacement_ratio * Decimal::from(assumptions.horizon_months),
    );

    Ok(RetirementProjection {
        current_age,
        retirement_age,
        years_to_retirement,
        current_savings,
        monthly_savings,
        expected_return,
        projected_savings,
        required_savings,
        savings_gap: required_savings - projected_savings,
        on_track: projected_savings >= required_savings,
    })
}

/// Annual income from projected savings plus a Social Security placeholder
pub fn estimate_retirement_income(
    projected_savings: Decimal,
    annual_income: Decimal,
    assumptions: &RetirementAssumptions,
) -> RetirementIncome {
    let investment_income = round_currency(projected_savings * assumptions.withdrawal_rate);

    let covered_wages = annual_income.min(assumptions.social_security_wage_cap);
    let social_security = round_currency(
        (covered_wages * assumptions.social_security_ratio).min(assumptions.social_security_max_benefit),
    );

    let other_income = Decimal::ZERO;

    RetirementIncome {
        total_annual: investment_income + social_security + other_income,
        investment_income,
        social_security,
        other_income,
    }
}

/// Income estimate for a profile.
///
/// Savings count as zero when the projection cannot run (missing birth date
/// or already retired); the Social Security piece is still estimated.
pub fn retirement_income(
    profile: &FinancialProfile,
    today: NaiveDate,
    returns: &ReturnAssumptions,
    assumptions: &RetirementAssumptions,
) -> EngineResult<RetirementIncome> {
    let projected_savings = match project_retirement(profile, today, returns, assumptions) {
        Ok(projection) => projection.projected_savings,
        Err(EngineError::InsufficientData(_)) => Decimal::ZERO,
        Err(e) => return Err(e),
    };

    let annual_income = profile.income() * MONTHS_PER_YEAR;
    Ok(estimate_retirement_income(projected_savings, annual_income, assumptions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: Some(dec!(5000)),
            monthly_savings: Some(dec!(500)),
            other_assets: Some(dec!(20000)),
            birth_date: Some(date(1990, 6, 15)),
            target_retirement_age: Some(65),
            risk_tolerance: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_retirement() {
        let today = date(2025, 6, 14);
        let projection = project_retirement(
            &profile(),
            today,
            &ReturnAssumptions::default(),
            &RetirementAssumptions::default(),
        )
        .unwrap();

        assert_eq!(projection.current_age, 34);
        assert_eq!(projection.years_to_retirement, 31);
        assert_eq!(projection.expected_return, dec!(0.07));
        // 5000 * 0.8 * 300
        assert_eq!(projection.required_savings, dec!(1200000));

        let expected = future_value(dec!(20000), dec!(500), dec!(0.07), 31).unwrap();
        assert_eq!(projection.projected_savings, round_currency(expected));
        assert_eq!(
            projection.savings_gap,
            projection.required_savings - projection.projected_savings
        );
        assert_eq!(projection.on_track, projection.savings_gap <= Decimal::ZERO);
    }

    #[test]
    fn test_missing_data_is_insufficient() {
        let mut p = profile();
        p.birth_date = None;
        let err = project_retirement(
            &p,
            date(2025, 1, 1),
            &ReturnAssumptions::default(),
            &RetirementAssumptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_past_retirement_is_insufficient() {
        let mut p = profile();
        p.target_retirement_age = Some(30);
        let err = project_retirement(
            &p,
            date(2025, 1, 1),
            &ReturnAssumptions::default(),
            &RetirementAssumptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_income_estimate_caps() {
        let assumptions = RetirementAssumptions::default();

        let income = estimate_retirement_income(dec!(1000000), dec!(60000), &assumptions);
        assert_eq!(income.investment_income, dec!(40000));
        assert_eq!(income.social_security, dec!(24000));
        assert_eq!(income.other_income, Decimal::ZERO);
        assert_eq!(income.total_annual, dec!(64000));
        assert_eq!(income.total_monthly(), dec!(5333.33));

        // min(200000, 160200) * 0.4 = 64080, capped at 48000
        let high = estimate_retirement_income(Decimal::ZERO, dec!(200000), &assumptions);
        assert_eq!(high.social_security, dec!(48000));
    }

    #[test]
    fn test_retirement_income_without_projection() {
        let mut p = profile();
        p.birth_date = None;
        let income = retirement_income(
            &p,
            date(2025, 1, 1),
            &ReturnAssumptions::default(),
            &RetirementAssumptions::default(),
        )
        .unwrap();
        assert_eq!(income.investment_income, Decimal::ZERO);
        assert_eq!(income.social_security, dec!(24000));
    }
}
