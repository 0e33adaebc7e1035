//! Closed-form payoff math for a single debt

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::finances::Debt;
use crate::money::{monthly_rate, require_non_negative, round_currency, round_working, to_f64};

/// Number of months until a balance reaches zero at a fixed payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "snake_case")]
pub enum PayoffHorizon {
    Months(u32),
    /// The payment never exceeds the interest accruing each month
    Never,
}

impl PayoffHorizon {
    pub fn months(&self) -> Option<u32> {
        match self {
            PayoffHorizon::Months(m) => Some(*m),
            PayoffHorizon::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, PayoffHorizon::Never)
    }
}

impl std::fmt::Display for PayoffHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoffHorizon::Months(m) => write!(f, "{} months", m),
            PayoffHorizon::Never => write!(f, "never"),
        }
    }
}

/// Interest accruing on `balance` for one month, at currency scale
pub fn monthly_interest(balance: Decimal, annual_rate: Decimal) -> Decimal {
    round_currency(balance * annual_rate / crate::money::MONTHS_PER_YEAR)
}

/// Months to pay off `balance` at `annual_rate` with a fixed monthly `payment`.
///
/// Uses the standard amortization closed form
/// `n = -ln(1 - r*B/P) / ln(1 + r)`, after checking that the payment covers
/// more than one month of interest.
pub fn months_to_payoff(
    balance: Decimal,
    annual_rate: Decimal,
    payment: Decimal,
) -> EngineResult<PayoffHorizon> {
    require_non_negative("balance", balance)?;
    require_non_negative("annual_rate", annual_rate)?;
    require_non_negative("payment", payment)?;

    if balance.is_zero() {
        return Ok(PayoffHorizon::Months(0));
    }

    let r = monthly_rate(annual_rate);
    let interest = round_working(balance * r);

    // Must be checked before the logarithm: 1 - r*B/P <= 0 otherwise
    if payment <= interest {
        return Ok(PayoffHorizon::Never);
    }

    if r.is_zero() {
        let months = (balance / payment).ceil();
        return to_months(months);
    }

    let r_f = to_f64(r);
    let coverage = 1.0 - to_f64(interest) / to_f64(payment);
    let n = -coverage.ln() / (1.0 + r_f).ln();

    if !n.is_finite() {
        return Err(EngineError::overflow("months to payoff"));
    }

    // Trim float noise so an exact integer horizon is not pushed up by one
    let n = (n * 1e9).round() / 1e9;
    Ok(PayoffHorizon::Months(n.ceil().max(1.0) as u32))
}

fn to_months(value: Decimal) -> EngineResult<PayoffHorizon> {
    value
        .to_u32()
        .map(PayoffHorizon::Months)
        .ok_or_else(|| EngineError::overflow("months to payoff"))
}

/// Interest paid over the life of the debt at a fixed payment.
///
/// `payment * months - balance`, floored at zero to absorb the final partial
/// payment. `None` when the debt never amortizes.
pub fn total_interest(
    balance: Decimal,
    annual_rate: Decimal,
    payment: Decimal,
) -> EngineResult<Option<Decimal>> {
    let horizon = months_to_payoff(balance, annual_rate, payment)?;
    Ok(horizon.months().map(|months| {
        let paid = payment * Decimal::from(months);
        round_currency((paid - balance).max(Decimal::ZERO))
    }))
}

impl Debt {
    /// One month of interest on the current balance
    pub fn monthly_interest(&self) -> Decimal {
        monthly_interest(self.balance, self.annual_rate)
    }

    /// Whether the minimum payment exceeds the monthly interest
    pub fn is_amortizing(&self) -> bool {
        self.balance.is_zero() || self.minimum_payment > round_working(self.balance * monthly_rate(self.annual_rate))
    }

    /// Payoff horizon when paying only the minimum
    pub fn months_to_payoff_at_minimum(&self) -> EngineResult<PayoffHorizon> {
        months_to_payoff(self.balance, self.annual_rate, self.minimum_payment)
    }

    /// Lifetime interest when paying only the minimum
    pub fn total_interest_at_minimum(&self) -> EngineResult<Option<Decimal>> {
        total_interest(self.balance, self.annual_rate, self.minimum_payment)
    }
}
