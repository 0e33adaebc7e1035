//! Aggregate view over a set of debts
//!
//! The minimum-only estimate here treats all debts as one balance and ignores
//! rollover. Use the simulator for an actual plan.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amortization::PayoffHorizon;
use crate::finances::{total_balance, total_minimum_payment, Debt, DebtType};
use crate::money::{ratio, round_currency, round_working};

/// One debt's share of the total balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtShare {
    pub id: String,
    pub name: String,
    pub debt_type: DebtType,
    pub balance: Decimal,
    /// Fraction of total balance (0..1)
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub debt_count: usize,
    pub total_balance: Decimal,
    pub total_minimum_payment: Decimal,
    pub total_monthly_interest: Decimal,

    /// Balance-weighted average annual rate
    pub weighted_average_rate: Decimal,

    pub distribution: Vec<DebtShare>,

    /// `total / (payments - interest)` estimate
    pub estimated_months_to_debt_free: PayoffHorizon,
}

impl DebtSummary {
    pub fn from_debts(debts: &[Debt]) -> Self {
        let total = total_balance(debts);
        let minimums = total_minimum_payment(debts);
        let interest: Decimal = debts.iter().map(|d| d.monthly_interest()).sum();

        let weighted: Decimal = debts.iter().map(|d| d.balance * d.annual_rate).sum();
        let weighted_average_rate = ratio(weighted, total).unwrap_or(Decimal::ZERO);

        let distribution = debts
            .iter()
            .map(|d| DebtShare {
                id: d.id.clone(),
                name: d.name.clone(),
                debt_type: d.debt_type,
                balance: d.balance,
                share: ratio(d.balance, total).unwrap_or(Decimal::ZERO),
            })
            .collect();

        Self {
            debt_count: debts.len(),
            total_balance: round_currency(total),
            total_minimum_payment: round_currency(minimums),
            total_monthly_interest: round_currency(interest),
            weighted_average_rate: round_working(weighted_average_rate),
            distribution,
            estimated_months_to_debt_free: estimate_months(total, minimums, interest),
        }
    }

    /// Total balance per debt type, largest first
    pub fn balance_by_type(&self) -> Vec<(DebtType, Decimal)> {
        let mut totals: Vec<(DebtType, Decimal)> = Vec::new();
        for share in &self.distribution {
            match totals.iter_mut().find(|(t, _)| *t == share.debt_type) {
                Some((_, sum)) => *sum += share.balance,
                None => totals.push((share.debt_type, share.balance)),
            }
        }
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }
}

fn estimate_months(total: Decimal, payments: Decimal, interest: Decimal) -> PayoffHorizon {
    if total <= Decimal::ZERO {
        return PayoffHorizon::Months(0);
    }
    let principal_per_month = payments - interest;
    if principal_per_month <= Decimal::ZERO {
        return PayoffHorizon::Never;
    }
    (total / principal_per_month)
        .ceil()
        .to_u32()
        .map(PayoffHorizon::Months)
        .unwrap_or(PayoffHorizon::Never)
}
