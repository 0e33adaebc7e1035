//! Compound growth with regular monthly contributions

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::{monthly_rate, require_non_negative, round_working, MONTHS_PER_YEAR};

/// Expected annual returns by risk tolerance bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnAssumptions {
    /// Risk tolerance 1-2
    pub conservative: Decimal,
    /// Risk tolerance 3-4, and the fallback when tolerance is unknown
    pub moderate: Decimal,
    /// Risk tolerance 5
    pub aggressive: Decimal,
}

impl Default for ReturnAssumptions {
    fn default() -> Self {
        Self {
            conservative: dec!(0.05),
            moderate: dec!(0.07),
            aggressive: dec!(0.10),
        }
    }
}

impl ReturnAssumptions {
    /// Expected annual return for a 1-5 risk tolerance
    pub fn expected_return(&self, risk_tolerance: Option<u8>) -> Decimal {
        match risk_tolerance {
            Some(1) | Some(2) => self.conservative,
            Some(3) | Some(4) => self.moderate,
            Some(5) => self.aggressive,
            _ => self.moderate,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("returns.conservative", self.conservative)?;
        require_non_negative("returns.moderate", self.moderate)?;
        require_non_negative("returns.aggressive", self.aggressive)
    }
}

/// Expected annual return with the built-in assumptions
pub fn expected_return(risk_tolerance: Option<u8>) -> Decimal {
    ReturnAssumptions::default().expected_return(risk_tolerance)
}

/// Future value of a lump sum plus level monthly contributions.
///
/// Contributions are an ordinary annuity: each one is made at the end of its
/// month and earns nothing that month.
///
/// ```text
/// r   = annual_rate / 12
/// n   = years * 12
/// fv  = pv * (1 + r)^n + pmt * ((1 + r)^n - 1) / r      (r > 0)
/// fv  = pv + pmt * n                                    (r = 0)
/// ```
///
/// The result is kept at working scale; round for display.
pub fn future_value(
    present_value: Decimal,
    monthly_contribution: Decimal,
    annual_rate: Decimal,
    years: u32,
) -> EngineResult<Decimal> {
    require_non_negative("present_value", present_value)?;
    require_non_negative("monthly_contribution", monthly_contribution)?;
    require_non_negative("annual_rate", annual_rate)?;

    let months = u64::from(years) * 12;
    let r = monthly_rate(annual_rate);

    if r.is_zero() {
        let contributions = monthly_contribution
            .checked_mul(Decimal::from(months))
            .ok_or_else(|| overflow(years))?;
        return present_value
            .checked_add(contributions)
            .map(round_working)
            .ok_or_else(|| overflow(years));
    }

    let growth = (Decimal::ONE + r).checked_powu(months).ok_or_else(|| overflow(years))?;

    let fv_present = present_value.checked_mul(growth).ok_or_else(|| overflow(years))?;
    let annuity_factor = round_working((growth - Decimal::ONE) / r);
    let fv_annuity = monthly_contribution
        .checked_mul(annuity_factor)
        .ok_or_else(|| overflow(years))?;

    fv_present
        .checked_add(fv_annuity)
        .map(round_working)
        .ok_or_else(|| overflow(years))
}

fn overflow(years: u32) -> EngineError {
    EngineError::overflow(format!("future value over {} years", years))
}

/// Total contributed over `years` (principal, not growth)
pub fn total_contributions(present_value: Decimal, monthly_contribution: Decimal, years: u32) -> Decimal {
    present_value + monthly_contribution * MONTHS_PER_YEAR * Decimal::from(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::round_currency;

    #[test]
    fn test_expected_return_buckets() {
        assert_eq!(expected_return(Some(1)), dec!(0.05));
        assert_eq!(expected_return(Some(2)), dec!(0.05));
        assert_eq!(expected_return(Some(3)), dec!(0.07));
        assert_eq!(expected_return(Some(4)), dec!(0.07));
        assert_eq!(expected_return(Some(5)), dec!(0.10));
        assert_eq!(expected_return(None), dec!(0.07));
        assert_eq!(expected_return(Some(9)), dec!(0.07));
        assert_eq!(expected_return(Some(0)), dec!(0.07));
    }

    #[test]
    fn test_identity_cases() {
        assert_eq!(future_value(dec!(1234.56), Decimal::ZERO, dec!(0.07), 0).unwrap(), dec!(1234.56));
        assert_eq!(future_value(dec!(1234.56), Decimal::ZERO, Decimal::ZERO, 30).unwrap(), dec!(1234.56));
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let fv = future_value(dec!(1000), dec!(100), Decimal::ZERO, 2).unwrap();
        assert_eq!(fv, dec!(3400));
    }

    #[test]
    fn test_lump_sum_at_twelve_percent() {
        // 1000 * 1.01^12 = 1126.825030...
        let fv = future_value(dec!(1000), Decimal::ZERO, dec!(0.12), 1).unwrap();
        assert_eq!(round_currency(fv), dec!(1126.83));
    }

    #[test]
    fn test_ordinary_annuity() {
        // 100 * (1.01^12 - 1) / 0.01 = 1268.25
        let fv = future_value(Decimal::ZERO, dec!(100), dec!(0.12), 1).unwrap();
        assert_eq!(round_currency(fv), dec!(1268.25));
    }

    #[test]
    fn test_combined_matches_float_formula() {
        let fv = future_value(dec!(10000), dec!(500), dec!(0.07), 10).unwrap();

        let r: f64 = 0.07 / 12.0;
        let g = (1.0 + r).powi(120);
        let expected = 10000.0 * g + 500.0 * (g - 1.0) / r;
        approx::assert_relative_eq!(crate::money::to_f64(fv), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(future_value(dec!(-1), dec!(0), dec!(0.05), 1).is_err());
        assert!(future_value(dec!(1), dec!(-1), dec!(0.05), 1).is_err());
        assert!(future_value(dec!(1), dec!(0), dec!(-0.05), 1).is_err());
    }

    #[test]
    fn test_overflow_is_computation_limit() {
        let err = future_value(dec!(0), dec!(100), dec!(0.12), 560).unwrap_err();
        assert!(err.is_computation_limit());
    }

    #[test]
    fn test_total_contributions() {
        assert_eq!(total_contributions(dec!(1000), dec!(100), 2), dec!(3400));
    }
}
