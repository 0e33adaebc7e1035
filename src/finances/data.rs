//! Input records: debts, goals, holdings and the user's financial profile
//!
//! These are flat value snapshots. The engine never owns their lifecycle and
//! never follows references between them; callers hand in the collections a
//! calculation needs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::require_non_negative;

/// Kind of debt (informational, does not change the math)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    StudentLoan,
    Mortgage,
    AutoLoan,
    PersonalLoan,
    MedicalDebt,
    BusinessLoan,
    #[default]
    Other,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CreditCard => "credit_card",
            DebtType::StudentLoan => "student_loan",
            DebtType::Mortgage => "mortgage",
            DebtType::AutoLoan => "auto_loan",
            DebtType::PersonalLoan => "personal_loan",
            DebtType::MedicalDebt => "medical_debt",
            DebtType::BusinessLoan => "business_loan",
            DebtType::Other => "other",
        }
    }
}

/// A single debt account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Caller-side identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub debt_type: DebtType,

    /// Original amount borrowed
    pub principal: Decimal,

    /// Remaining balance (0 <= balance <= principal)
    pub balance: Decimal,

    /// Annual nominal rate as a fraction (0.18 = 18%)
    pub annual_rate: Decimal,

    /// Required monthly payment
    pub minimum_payment: Decimal,

    #[serde(default)]
    pub start_date: NaiveDate,
}

impl Debt {
    /// Create a debt whose principal equals its current balance
    pub fn new(
        id: impl Into<String>,
        balance: Decimal,
        annual_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            debt_type: DebtType::Other,
            principal: balance,
            balance,
            annual_rate,
            minimum_payment,
            start_date: NaiveDate::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_type(mut self, debt_type: DebtType) -> Self {
        self.debt_type = debt_type;
        self
    }

    pub fn with_principal(mut self, principal: Decimal) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Check the record's numeric invariants
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("balance", self.balance)?;
        require_non_negative("annual_rate", self.annual_rate)?;
        require_non_negative("minimum_payment", self.minimum_payment)?;

        if self.principal <= Decimal::ZERO {
            return Err(EngineError::invalid(
                "principal",
                format!("debt '{}' must have a positive principal", self.id),
            ));
        }
        if self.balance > self.principal {
            return Err(EngineError::invalid(
                "balance",
                format!(
                    "debt '{}' balance {} exceeds principal {}",
                    self.id, self.balance, self.principal
                ),
            ));
        }
        Ok(())
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

/// Goal priority; `High` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub target_amount: Decimal,

    #[serde(default)]
    pub current_amount: Decimal,

    pub deadline: NaiveDate,

    #[serde(default)]
    pub priority: GoalPriority,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        target_amount: Decimal,
        current_amount: Decimal,
        deadline: NaiveDate,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            target_amount,
            current_amount,
            deadline,
            priority: GoalPriority::Medium,
        }
    }

    pub fn with_priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("current_amount", self.current_amount)?;
        if self.target_amount <= Decimal::ZERO {
            return Err(EngineError::invalid(
                "target_amount",
                format!("goal '{}' must have a positive target", self.id),
            ));
        }
        Ok(())
    }
}

/// Asset class tag used for allocation and diversification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Stocks,
    Bonds,
    MutualFunds,
    Etf,
    RealEstate,
    Cryptocurrency,
    Commodities,
    CashEquivalents,
    #[default]
    Other,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Stocks => "stocks",
            AssetClass::Bonds => "bonds",
            AssetClass::MutualFunds => "mutual_funds",
            AssetClass::Etf => "etf",
            AssetClass::RealEstate => "real_estate",
            AssetClass::Cryptocurrency => "cryptocurrency",
            AssetClass::Commodities => "commodities",
            AssetClass::CashEquivalents => "cash_equivalents",
            AssetClass::Other => "other",
        }
    }
}

/// An investment position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,

    #[serde(default)]
    pub asset_class: AssetClass,

    pub shares: Decimal,

    /// Purchase price per share
    pub cost_basis: Decimal,

    /// Caller-supplied current price per share
    pub current_price: Decimal,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        asset_class: AssetClass,
        shares: Decimal,
        cost_basis: Decimal,
        current_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            shares,
            cost_basis,
            current_price,
        }
    }

    pub fn market_value(&self) -> Decimal {
        self.shares * self.current_price
    }

    pub fn cost_value(&self) -> Decimal {
        self.shares * self.cost_basis
    }

    pub fn unrealized_gain(&self) -> Decimal {
        self.market_value() - self.cost_value()
    }

    /// Price return as a fraction of cost basis (0 when the basis is zero)
    pub fn return_rate(&self) -> Decimal {
        if self.cost_basis <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.current_price - self.cost_basis) / self.cost_basis
    }

    /// Shares and cost basis must be positive; the price may be zero
    pub fn validate(&self) -> EngineResult<()> {
        if self.shares <= Decimal::ZERO {
            return Err(EngineError::invalid(
                "shares",
                format!("holding '{}' must hold a positive number of shares", self.symbol),
            ));
        }
        if self.cost_basis <= Decimal::ZERO {
            return Err(EngineError::invalid(
                "cost_basis",
                format!("holding '{}' must have a positive cost basis", self.symbol),
            ));
        }
        require_non_negative("current_price", self.current_price)
    }
}

/// Aggregate of a user's self-reported finances.
///
/// Missing monetary values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub monthly_savings: Option<Decimal>,
    pub emergency_fund: Option<Decimal>,
    pub other_assets: Option<Decimal>,
    pub birth_date: Option<NaiveDate>,
    pub target_retirement_age: Option<u32>,
    /// 1 (conservative) to 5 (aggressive)
    pub risk_tolerance: Option<u8>,
}

impl FinancialProfile {
    pub fn income(&self) -> Decimal {
        self.monthly_income.unwrap_or(Decimal::ZERO)
    }

    pub fn expenses(&self) -> Decimal {
        self.monthly_expenses.unwrap_or(Decimal::ZERO)
    }

    pub fn savings(&self) -> Decimal {
        self.monthly_savings.unwrap_or(Decimal::ZERO)
    }

    pub fn emergency_fund(&self) -> Decimal {
        self.emergency_fund.unwrap_or(Decimal::ZERO)
    }

    pub fn other_assets(&self) -> Decimal {
        self.other_assets.unwrap_or(Decimal::ZERO)
    }

    /// Emergency fund plus other assets
    pub fn liquid_assets(&self) -> Decimal {
        self.emergency_fund() + self.other_assets()
    }

    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("monthly_income", self.income())?;
        require_non_negative("monthly_expenses", self.expenses())?;
        require_non_negative("monthly_savings", self.savings())?;
        require_non_negative("emergency_fund", self.emergency_fund())?;
        require_non_negative("other_assets", self.other_assets())
    }
}

/// Everything the engine needs for a full report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    pub profile: FinancialProfile,
    pub debts: Vec<Debt>,
    pub goals: Vec<Goal>,
    pub holdings: Vec<Holding>,
}

/// Sum of remaining balances
pub fn total_balance(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.balance).sum()
}

/// Sum of required monthly payments
pub fn total_minimum_payment(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.minimum_payment).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debt_validation() {
        let debt = Debt::new("card", dec!(5000), dec!(0.20), dec!(150));
        assert!(debt.validate().is_ok());

        let negative_rate = Debt::new("card", dec!(5000), dec!(-0.01), dec!(150));
        assert!(negative_rate.validate().is_err());

        let over_principal = Debt::new("card", dec!(5000), dec!(0.2), dec!(150))
            .with_principal(dec!(4000));
        assert!(over_principal.validate().is_err());

        let zero_principal = Debt::new("card", dec!(0), dec!(0.2), dec!(150));
        assert!(zero_principal.validate().is_err());
    }

    #[test]
    fn test_holding_derived_values() {
        let holding = Holding::new("VTI", AssetClass::Etf, dec!(10), dec!(200), dec!(250));
        assert_eq!(holding.market_value(), dec!(2500));
        assert_eq!(holding.cost_value(), dec!(2000));
        assert_eq!(holding.unrealized_gain(), dec!(500));
        assert_eq!(holding.return_rate(), dec!(0.25));
    }

    #[test]
    fn test_holding_validation() {
        let holding = Holding::new("VTI", AssetClass::Etf, dec!(10), dec!(200), dec!(0));
        assert!(holding.validate().is_ok());

        let no_shares = Holding::new("VTI", AssetClass::Etf, dec!(0), dec!(200), dec!(250));
        let err = no_shares.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "shares"));

        let free = Holding::new("GIFT", AssetClass::Stocks, dec!(5), dec!(0), dec!(40));
        let err = free.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "cost_basis"));

        let negative_price = Holding::new("VTI", AssetClass::Etf, dec!(10), dec!(200), dec!(-1));
        assert!(negative_price.validate().is_err());
    }

    #[test]
    fn test_profile_missing_values_are_zero() {
        let profile = FinancialProfile::default();
        assert_eq!(profile.income(), Decimal::ZERO);
        assert_eq!(profile.liquid_assets(), Decimal::ZERO);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_priority_ordering() {
        let mut priorities = vec![GoalPriority::Low, GoalPriority::High, GoalPriority::Medium];
        priorities.sort();
        assert_eq!(priorities, vec![GoalPriority::High, GoalPriority::Medium, GoalPriority::Low]);
    }

    #[test]
    fn test_totals() {
        let debts = vec![
            Debt::new("a", dec!(1000), dec!(0.24), dec!(50)),
            Debt::new("b", dec!(5000), dec!(0.10), dec!(100)),
        ];
        assert_eq!(total_balance(&debts), dec!(6000));
        assert_eq!(total_minimum_payment(&debts), dec!(150));
    }
}
