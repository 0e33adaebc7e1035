//! Portfolio analysis: diversification, risk, valuation and allocation

mod risk;
mod valuation;

pub use risk::{
    diversification, herfindahl_index, risk_score, total_market_value, value_by_class, volatility,
    MAX_SCORE,
};
pub use valuation::{
    allocation_by_class, analyze, ranked_by_return, ranked_by_value, AllocationSlice,
    PortfolioAnalysis, PortfolioValuation,
};
