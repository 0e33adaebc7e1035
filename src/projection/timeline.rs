//! Year-by-year savings and net worth projection

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::growth::{future_value, ReturnAssumptions};
use crate::error::EngineResult;
use crate::finances::{total_balance, Debt, FinancialProfile};
use crate::money::{age_on, round_currency};

/// Default number of projected years
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// One projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// 1-based year offset from today
    pub year: u32,

    pub projected_savings: Decimal,
    pub projected_net_worth: Decimal,

    /// Age at that point, when the birth date is known
    pub age: Option<i32>,
}

/// Emergency fund plus other assets, less all debt balances
pub fn net_worth(profile: &FinancialProfile, debts: &[Debt]) -> Decimal {
    round_currency(profile.liquid_assets() - total_balance(debts))
}

/// Project savings and net worth for `years` years.
///
/// Savings grow from the profile's other assets with its monthly savings at
/// the risk-tolerance return. Net worth moves by the growth in savings only;
/// debt balances are held at today's value.
pub fn generate_projection(
    profile: &FinancialProfile,
    debts: &[Debt],
    years: u32,
    today: NaiveDate,
    returns: &ReturnAssumptions,
) -> EngineResult<Vec<ProjectionYear>> {
    let current_savings = profile.other_assets();
    let monthly_savings = profile.savings();
    let rate = returns.expected_return(profile.risk_tolerance);
    let current_net_worth = net_worth(profile, debts);
    let current_age = profile.birth_date.map(|birth| age_on(birth, today));

    (1..=years)
        .map(|year| {
            let projected_savings =
                round_currency(future_value(current_savings, monthly_savings, rate, year)?);
            Ok(ProjectionYear {
                year,
                projected_savings,
                projected_net_worth: current_net_worth + (projected_savings - current_savings),
                age: current_age.map(|age| age + year as i32),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_projection_rows() {
        let profile = FinancialProfile {
            monthly_savings: Some(dec!(1000)),
            emergency_fund: Some(dec!(15000)),
            other_assets: Some(dec!(10000)),
            birth_date: Some(NaiveDate::from_ymd_opt(1985, 3, 1).unwrap()),
            risk_tolerance: Some(1),
            ..Default::default()
        };
        let debts = vec![Debt::new("car", dec!(8000), dec!(0.06), dec!(250))];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let rows = generate_projection(&profile, &debts, 10, today, &ReturnAssumptions::default()).unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[0].age, Some(40));
        assert_eq!(rows[9].age, Some(49));

        // Net worth baseline 15000 + 10000 - 8000
        assert_eq!(net_worth(&profile, &debts), dec!(17000));
        for row in &rows {
            assert_eq!(row.projected_net_worth, dec!(17000) + row.projected_savings - dec!(10000));
        }
        assert!(rows.windows(2).all(|w| w[1].projected_savings > w[0].projected_savings));
    }

    #[test]
    fn test_zero_years_and_unknown_age() {
        let profile = FinancialProfile::default();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let rows = generate_projection(&profile, &[], 0, today, &ReturnAssumptions::default()).unwrap();
        assert!(rows.is_empty());

        let rows = generate_projection(&profile, &[], 2, today, &ReturnAssumptions::default()).unwrap();
        assert_eq!(rows[1].age, None);
        assert_eq!(rows[1].projected_savings, Decimal::ZERO);
    }
}
