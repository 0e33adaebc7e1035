//! Money and rate primitives
//!
//! All monetary math runs on `rust_decimal::Decimal`. Values surfaced to a
//! caller are rounded to currency scale (2 dp); intermediate values are kept
//! at working scale so that iterative use does not compound rounding error.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{EngineError, EngineResult};

/// Fractional digits for amounts returned to callers
pub const CURRENCY_SCALE: u32 = 2;

/// Fractional digits carried through intermediate calculations
pub const WORKING_SCALE: u32 = 10;

/// Round-half-up for positive amounts (midpoint away from zero)
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round to currency scale
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, ROUNDING)
}

/// Round to working scale
pub fn round_working(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(WORKING_SCALE, ROUNDING)
}

/// Convert an annual nominal rate (0.18 = 18%) to its monthly rate
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    round_working(annual_rate / MONTHS_PER_YEAR)
}

/// Guarded division: `None` when the denominator is zero or negative
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        None
    } else {
        Some(round_working(numerator / denominator))
    }
}

/// Reject negative values for a named field
pub fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid(field, format!("must not be negative (got {})", value)));
    }
    Ok(())
}

/// Lossy conversion for dimensionless scores and logarithms
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Whole calendar months from `start` to `end`.
///
/// A partial trailing month is not counted, so Jan 31 -> Feb 28 is 0 months.
/// Negative when `end` precedes `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);

    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }

    months
}

/// Completed years of age on `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(83.335)), dec!(83.34));
        assert_eq!(round_currency(dec!(83.3333333)), dec!(83.33));
        assert_eq!(round_currency(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(0.12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0.20)), dec!(0.0166666667));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_ratio_guards_zero_denominator() {
        assert_eq!(ratio(dec!(1), Decimal::ZERO), None);
        assert_eq!(ratio(dec!(1), dec!(-5)), None);
        assert_eq!(ratio(dec!(1000), dec!(5000)), Some(dec!(0.2)));
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("rate", dec!(0)).is_ok());
        assert!(require_non_negative("rate", dec!(0.05)).is_ok());
        assert!(require_non_negative("rate", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2024, 1, 15), date(2024, 7, 15)), 6);
        assert_eq!(months_between(date(2024, 1, 15), date(2024, 7, 14)), 5);
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 28)), 0);
        assert_eq!(months_between(date(2024, 7, 15), date(2024, 1, 15)), -6);
        assert_eq!(months_between(date(2024, 7, 15), date(2024, 7, 1)), 0);
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(date(1990, 6, 15), date(2024, 6, 14)), 33);
        assert_eq!(age_on(date(1990, 6, 15), date(2024, 6, 15)), 34);
        assert_eq!(age_on(date(1990, 6, 15), date(2024, 12, 1)), 34);
    }
}
