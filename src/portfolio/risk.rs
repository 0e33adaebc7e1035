//! Diversification, volatility proxy and composite risk score
//!
//! Scores are dimensionless 0-10 values and are returned as `f64`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::finances::{AssetClass, Holding};
use crate::money::to_f64;

/// Upper bound of every score on this scale
pub const MAX_SCORE: f64 = 10.0;

const DIVERSIFICATION_WEIGHT: f64 = 0.4;
const STABILITY_WEIGHT: f64 = 0.6;

/// Total market value of the portfolio
pub fn total_market_value(holdings: &[Holding]) -> Decimal {
    holdings.iter().map(|h| h.market_value()).sum()
}

/// Market value per asset class
pub fn value_by_class(holdings: &[Holding]) -> BTreeMap<AssetClass, Decimal> {
    let mut totals = BTreeMap::new();
    for holding in holdings {
        *totals.entry(holding.asset_class).or_insert(Decimal::ZERO) += holding.market_value();
    }
    totals
}

/// Herfindahl-Hirschman index of asset-class shares (0..1, 1 = one class)
pub fn herfindahl_index(holdings: &[Holding]) -> Option<f64> {
    let total = total_market_value(holdings);
    if total <= Decimal::ZERO {
        return None;
    }

    let hhi = value_by_class(holdings)
        .values()
        .map(|value| {
            let share = to_f64(*value / total);
            share * share
        })
        .sum();
    Some(hhi)
}

/// `(1 - HHI) * 10`; 0 for an empty or zero-value portfolio
pub fn diversification(holdings: &[Holding]) -> f64 {
    match herfindahl_index(holdings) {
        Some(hhi) => ((1.0 - hhi) * MAX_SCORE).max(0.0),
        None => 0.0,
    }
}

/// Value-weighted mean absolute return.
///
/// A dispersion proxy from one price observation per holding, not a standard
/// deviation of returns over time.
pub fn volatility(holdings: &[Holding]) -> f64 {
    let total = total_market_value(holdings);
    if total <= Decimal::ZERO {
        return 0.0;
    }

    holdings
        .iter()
        .map(|h| {
            let weight = to_f64(h.market_value() / total);
            (to_f64(h.return_rate()) * weight).abs()
        })
        .sum()
}

/// `diversification * 0.4 + (10 - volatility) * 0.6`, clamped to [0, 10]
pub fn risk_score(holdings: &[Holding]) -> f64 {
    combine(diversification(holdings), volatility(holdings))
}

pub(crate) fn combine(diversification: f64, volatility: f64) -> f64 {
    let score = diversification * DIVERSIFICATION_WEIGHT + (MAX_SCORE - volatility) * STABILITY_WEIGHT;
    score.clamp(0.0, MAX_SCORE)
}
