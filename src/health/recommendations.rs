//! Canned advice per health factor

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::scorer::{debt_to_income, emergency_fund_months, savings_rate, HealthFactor, InvestingLevel};
use crate::finances::FinancialProfile;

/// How pressing a recommendation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Urgent,
    Improving,
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub factor: HealthFactor,
    pub tier: RecommendationTier,
    pub message: String,
}

impl Recommendation {
    fn new(factor: HealthFactor, tier: RecommendationTier) -> Self {
        Self {
            factor,
            tier,
            message: message(factor, tier).to_string(),
        }
    }
}

/// Advice text for a factor at a tier
pub fn message(factor: HealthFactor, tier: RecommendationTier) -> &'static str {
    use HealthFactor::*;
    use RecommendationTier::*;

    match (factor, tier) {
        (EmergencyFund, Urgent) => "Build your emergency fund to at least 3-6 months of expenses",
        (EmergencyFund, Improving) => "Consider increasing your emergency fund to 6 months of expenses",
        (EmergencyFund, Healthy) => "Great job! Your emergency fund is well-funded",

        (DebtToIncome, Urgent) => "Focus on reducing debt - your debt-to-income ratio is high",
        (DebtToIncome, Improving) => "Consider paying down debt to improve your financial flexibility",
        (DebtToIncome, Healthy) => "Your debt levels are manageable",

        (SavingsRate, Urgent) => "Try to save at least 10% of your income",
        (SavingsRate, Improving) => "Good savings rate! Consider increasing to 20% if possible",
        (SavingsRate, Healthy) => "Excellent savings rate! You're on track for financial success",

        (Diversification, Urgent) => "Start setting aside part of your income each month to build assets",
        (Diversification, Improving) => "Put your monthly savings to work in a diversified investment account",
        (Diversification, Healthy) => "You hold assets beyond your emergency fund; keep them diversified",
    }
}

pub fn emergency_tier(months: Decimal) -> RecommendationTier {
    if months < dec!(3) {
        RecommendationTier::Urgent
    } else if months < dec!(6) {
        RecommendationTier::Improving
    } else {
        RecommendationTier::Healthy
    }
}

pub fn debt_tier(dti: Decimal) -> RecommendationTier {
    if dti > dec!(0.36) {
        RecommendationTier::Urgent
    } else if dti > dec!(0.20) {
        RecommendationTier::Improving
    } else {
        RecommendationTier::Healthy
    }
}

pub fn savings_tier(rate: Decimal) -> RecommendationTier {
    if rate < dec!(0.10) {
        RecommendationTier::Urgent
    } else if rate < dec!(0.20) {
        RecommendationTier::Improving
    } else {
        RecommendationTier::Healthy
    }
}

pub fn diversification_tier(level: InvestingLevel) -> RecommendationTier {
    match level {
        InvestingLevel::None => RecommendationTier::Urgent,
        InvestingLevel::SavingsOnly => RecommendationTier::Improving,
        InvestingLevel::OtherAssets => RecommendationTier::Healthy,
    }
}

/// One recommendation per factor, most pressing first (stable within a tier)
pub fn generate_recommendations(
    profile: &FinancialProfile,
    monthly_debt_payment: Decimal,
) -> Vec<Recommendation> {
    let mut recommendations = vec![
        Recommendation::new(
            HealthFactor::EmergencyFund,
            emergency_tier(emergency_fund_months(profile)),
        ),
        Recommendation::new(
            HealthFactor::DebtToIncome,
            debt_tier(debt_to_income(profile, monthly_debt_payment)),
        ),
        Recommendation::new(HealthFactor::SavingsRate, savings_tier(savings_rate(profile))),
        Recommendation::new(
            HealthFactor::Diversification,
            diversification_tier(InvestingLevel::of(profile)),
        ),
    ];
    recommendations.sort_by_key(|r| r.tier);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_of(recs: &[Recommendation], factor: HealthFactor) -> RecommendationTier {
        recs.iter()
            .find(|r| r.factor == factor)
            .map(|r| r.tier)
            .unwrap()
    }

    #[test]
    fn test_reference_profile() {
        let profile = FinancialProfile {
            monthly_income: Some(dec!(5000)),
            monthly_expenses: Some(dec!(3500)),
            monthly_savings: Some(dec!(1000)),
            emergency_fund: Some(dec!(15000)),
            ..Default::default()
        };
        let recs = generate_recommendations(&profile, dec!(1500));

        assert_eq!(tier_of(&recs, HealthFactor::EmergencyFund), RecommendationTier::Improving);
        assert_eq!(tier_of(&recs, HealthFactor::DebtToIncome), RecommendationTier::Improving);
        assert_eq!(tier_of(&recs, HealthFactor::SavingsRate), RecommendationTier::Healthy);
        assert_eq!(tier_of(&recs, HealthFactor::Diversification), RecommendationTier::Improving);

        assert_eq!(
            recs[0].message,
            "Consider increasing your emergency fund to 6 months of expenses"
        );
        assert!(recs.windows(2).all(|w| w[0].tier <= w[1].tier));
    }

    #[test]
    fn test_empty_profile_is_all_urgent_except_debt() {
        let recs = generate_recommendations(&FinancialProfile::default(), Decimal::ZERO);
        assert_eq!(tier_of(&recs, HealthFactor::EmergencyFund), RecommendationTier::Urgent);
        assert_eq!(tier_of(&recs, HealthFactor::SavingsRate), RecommendationTier::Urgent);
        assert_eq!(tier_of(&recs, HealthFactor::Diversification), RecommendationTier::Urgent);
        // An undefined ratio reads as zero debt load
        assert_eq!(tier_of(&recs, HealthFactor::DebtToIncome), RecommendationTier::Healthy);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(emergency_tier(dec!(3)), RecommendationTier::Improving);
        assert_eq!(emergency_tier(dec!(6)), RecommendationTier::Healthy);
        assert_eq!(debt_tier(dec!(0.36)), RecommendationTier::Improving);
        assert_eq!(debt_tier(dec!(0.20)), RecommendationTier::Healthy);
        assert_eq!(savings_tier(dec!(0.10)), RecommendationTier::Improving);
        assert_eq!(savings_tier(dec!(0.20)), RecommendationTier::Healthy);
    }
}
