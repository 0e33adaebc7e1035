//! Financial health scoring and recommendations

mod recommendations;
mod scorer;

pub use recommendations::{
    debt_tier, diversification_tier, emergency_tier, generate_recommendations, message,
    savings_tier, Recommendation, RecommendationTier,
};
pub use scorer::{
    debt_to_income, emergency_fund_months, monthly_cash_flow, savings_rate, score, FactorScore,
    HealthBreakdown, HealthFactor, InvestingLevel, MAX_SCORE,
};
