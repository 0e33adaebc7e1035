//! Portfolio totals, allocation breakdown and rankings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::risk::{combine, diversification, herfindahl_index, total_market_value, value_by_class, volatility};
use crate::finances::{AssetClass, Holding};
use crate::money::{ratio, round_currency, round_working};

/// Value totals across all holdings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub holding_count: usize,
    pub total_market_value: Decimal,
    pub total_cost: Decimal,
    pub total_unrealized_gain: Decimal,
    /// Gain over cost as a percentage (12.5 = 12.5%); 0 with no cost
    pub return_rate_percent: Decimal,
}

impl PortfolioValuation {
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let market = total_market_value(holdings);
        let cost: Decimal = holdings.iter().map(|h| h.cost_value()).sum();
        let gain = market - cost;
        let return_rate_percent = ratio(gain, cost)
            .map(|r| (r * Decimal::ONE_HUNDRED).round_dp(2))
            .unwrap_or(Decimal::ZERO);

        Self {
            holding_count: holdings.len(),
            total_market_value: round_currency(market),
            total_cost: round_currency(cost),
            total_unrealized_gain: round_currency(gain),
            return_rate_percent,
        }
    }
}

/// One asset class's slice of the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub asset_class: AssetClass,
    pub market_value: Decimal,
    /// Fraction of total market value
    pub share: Decimal,
}

/// Market value and share per asset class, largest first
pub fn allocation_by_class(holdings: &[Holding]) -> Vec<AllocationSlice> {
    let total = total_market_value(holdings);
    let mut slices: Vec<AllocationSlice> = value_by_class(holdings)
        .into_iter()
        .map(|(asset_class, value)| AllocationSlice {
            asset_class,
            market_value: round_currency(value),
            share: ratio(value, total).map(round_working).unwrap_or(Decimal::ZERO),
        })
        .collect();
    slices.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    slices
}

/// Holdings sorted by return rate, best first
pub fn ranked_by_return(holdings: &[Holding]) -> Vec<&Holding> {
    let mut ranked: Vec<&Holding> = holdings.iter().collect();
    ranked.sort_by(|a, b| b.return_rate().cmp(&a.return_rate()));
    ranked
}

/// Holdings sorted by market value, largest first
pub fn ranked_by_value(holdings: &[Holding]) -> Vec<&Holding> {
    let mut ranked: Vec<&Holding> = holdings.iter().collect();
    ranked.sort_by(|a, b| b.market_value().cmp(&a.market_value()));
    ranked
}

/// Every portfolio metric in one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub valuation: PortfolioValuation,
    pub allocation: Vec<AllocationSlice>,
    pub herfindahl_index: Option<f64>,
    pub diversification: f64,
    pub volatility: f64,
    pub risk_score: f64,
    /// Symbols ordered best return first
    pub by_return: Vec<String>,
    /// Symbols ordered largest value first
    pub by_value: Vec<String>,
}

pub fn analyze(holdings: &[Holding]) -> PortfolioAnalysis {
    let diversification = diversification(holdings);
    let volatility = volatility(holdings);

    PortfolioAnalysis {
        valuation: PortfolioValuation::from_holdings(holdings),
        allocation: allocation_by_class(holdings),
        herfindahl_index: herfindahl_index(holdings),
        diversification,
        volatility,
        risk_score: combine(diversification, volatility),
        by_return: ranked_by_return(holdings).iter().map(|h| h.symbol.clone()).collect(),
        by_value: ranked_by_value(holdings).iter().map(|h| h.symbol.clone()).collect(),
    }
}
