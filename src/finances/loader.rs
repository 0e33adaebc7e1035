//! Load snapshot data from CSV and JSON files
//!
//! Expected layout of a data directory:
//! - `debts.csv`: id,name,debt_type,principal,balance,annual_rate,minimum_payment,start_date
//! - `goals.csv`: id,name,target_amount,current_amount,deadline,priority
//! - `holdings.csv`: symbol,asset_class,shares,cost_basis,current_price
//! - `profile.json`: a `FinancialProfile`
//!
//! Rates are annual fractions (0.18 = 18%). Dates are `YYYY-MM-DD`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;

use super::{AssetClass, Debt, DebtType, FinancialProfile, FinancialSnapshot, Goal, GoalPriority, Holding};

pub const DEBTS_FILE: &str = "debts.csv";
pub const GOALS_FILE: &str = "goals.csv";
pub const HOLDINGS_FILE: &str = "holdings.csv";
pub const PROFILE_FILE: &str = "profile.json";

/// Raw row of debts.csv
#[derive(Debug, serde::Deserialize)]
struct DebtRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    debt_type: String,
    #[serde(default)]
    principal: String,
    balance: String,
    annual_rate: String,
    minimum_payment: String,
    #[serde(default)]
    start_date: String,
}

impl DebtRow {
    fn into_debt(self) -> Result<Debt> {
        let balance = parse_decimal(&self.balance).with_context(|| format!("debt '{}' balance", self.id))?;
        let principal = if self.principal.trim().is_empty() {
            balance
        } else {
            parse_decimal(&self.principal).with_context(|| format!("debt '{}' principal", self.id))?
        };

        let mut debt = Debt::new(
            self.id.trim(),
            balance,
            parse_decimal(&self.annual_rate).with_context(|| format!("debt '{}' annual_rate", self.id))?,
            parse_decimal(&self.minimum_payment)
                .with_context(|| format!("debt '{}' minimum_payment", self.id))?,
        )
        .with_principal(principal)
        .with_type(parse_debt_type(&self.debt_type)?);

        if !self.name.trim().is_empty() {
            debt = debt.with_name(self.name.trim());
        }
        if !self.start_date.trim().is_empty() {
            debt = debt.with_start_date(parse_date(&self.start_date)?);
        }
        Ok(debt)
    }
}

/// Raw row of goals.csv
#[derive(Debug, serde::Deserialize)]
struct GoalRow {
    id: String,
    #[serde(default)]
    name: String,
    target_amount: String,
    #[serde(default)]
    current_amount: String,
    deadline: String,
    #[serde(default)]
    priority: String,
}

impl GoalRow {
    fn into_goal(self) -> Result<Goal> {
        let current = if self.current_amount.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_decimal(&self.current_amount).with_context(|| format!("goal '{}' current_amount", self.id))?
        };

        let mut goal = Goal::new(
            self.id.trim(),
            parse_decimal(&self.target_amount).with_context(|| format!("goal '{}' target_amount", self.id))?,
            current,
            parse_date(&self.deadline).with_context(|| format!("goal '{}' deadline", self.id))?,
        )
        .with_priority(parse_priority(&self.priority)?);

        if !self.name.trim().is_empty() {
            goal.name = self.name.trim().to_string();
        }
        Ok(goal)
    }
}

/// Raw row of holdings.csv
#[derive(Debug, serde::Deserialize)]
struct HoldingRow {
    symbol: String,
    #[serde(default)]
    asset_class: String,
    shares: String,
    cost_basis: String,
    current_price: String,
}

impl HoldingRow {
    fn into_holding(self) -> Result<Holding> {
        let symbol = self.symbol.trim().to_string();
        Ok(Holding::new(
            symbol.clone(),
            parse_asset_class(&self.asset_class)?,
            parse_decimal(&self.shares).with_context(|| format!("holding '{}' shares", symbol))?,
            parse_decimal(&self.cost_basis).with_context(|| format!("holding '{}' cost_basis", symbol))?,
            parse_decimal(&self.current_price)
                .with_context(|| format!("holding '{}' current_price", symbol))?,
        ))
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '$').collect();
    Decimal::from_str(&cleaned).map_err(|e| anyhow!("invalid number '{}': {}", raw.trim(), e))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw.trim()))
}

/// Lowercase with separators removed, so "Credit Card", "credit_card" and
/// "CreditCard" all match
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_debt_type(raw: &str) -> Result<DebtType> {
    let debt_type = match normalize(raw).as_str() {
        "creditcard" => DebtType::CreditCard,
        "studentloan" => DebtType::StudentLoan,
        "mortgage" => DebtType::Mortgage,
        "autoloan" => DebtType::AutoLoan,
        "personalloan" => DebtType::PersonalLoan,
        "medicaldebt" => DebtType::MedicalDebt,
        "businessloan" => DebtType::BusinessLoan,
        "other" | "" => DebtType::Other,
        _ => return Err(anyhow!("unknown debt type '{}'", raw.trim())),
    };
    Ok(debt_type)
}

fn parse_priority(raw: &str) -> Result<GoalPriority> {
    let priority = match normalize(raw).as_str() {
        "high" => GoalPriority::High,
        "medium" | "" => GoalPriority::Medium,
        "low" => GoalPriority::Low,
        _ => return Err(anyhow!("unknown goal priority '{}'", raw.trim())),
    };
    Ok(priority)
}

fn parse_asset_class(raw: &str) -> Result<AssetClass> {
    let class = match normalize(raw).as_str() {
        "stocks" | "stock" => AssetClass::Stocks,
        "bonds" | "bond" => AssetClass::Bonds,
        "mutualfunds" | "mutualfund" => AssetClass::MutualFunds,
        "etf" | "etfs" => AssetClass::Etf,
        "realestate" => AssetClass::RealEstate,
        "cryptocurrency" | "crypto" => AssetClass::Cryptocurrency,
        "commodities" | "commodity" => AssetClass::Commodities,
        "cashequivalents" | "cash" => AssetClass::CashEquivalents,
        "other" | "" => AssetClass::Other,
        _ => return Err(anyhow!("unknown asset class '{}'", raw.trim())),
    };
    Ok(class)
}

fn read_rows<R, T, U, F>(reader: R, convert: F) -> Result<Vec<U>>
where
    R: Read,
    T: serde::de::DeserializeOwned,
    F: Fn(T) -> Result<U>,
{
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in csv_reader.deserialize().enumerate() {
        // +2: header row and 1-based numbering
        let row: T = result.with_context(|| format!("malformed row {}", line + 2))?;
        records.push(convert(row).with_context(|| format!("row {}", line + 2))?);
    }

    Ok(records)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("open {}", path.display()))
}

/// Load debts from any reader
pub fn load_debts_from_reader<R: Read>(reader: R) -> Result<Vec<Debt>> {
    read_rows(reader, DebtRow::into_debt)
}

/// Load debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>> {
    let path = path.as_ref();
    load_debts_from_reader(open(path)?).with_context(|| format!("load debts from {}", path.display()))
}

pub fn load_goals_from_reader<R: Read>(reader: R) -> Result<Vec<Goal>> {
    read_rows(reader, GoalRow::into_goal)
}

pub fn load_goals<P: AsRef<Path>>(path: P) -> Result<Vec<Goal>> {
    let path = path.as_ref();
    load_goals_from_reader(open(path)?).with_context(|| format!("load goals from {}", path.display()))
}

pub fn load_holdings_from_reader<R: Read>(reader: R) -> Result<Vec<Holding>> {
    read_rows(reader, HoldingRow::into_holding)
}

pub fn load_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>> {
    let path = path.as_ref();
    load_holdings_from_reader(open(path)?)
        .with_context(|| format!("load holdings from {}", path.display()))
}

/// Load a profile from a JSON file
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<FinancialProfile> {
    let path = path.as_ref();
    let reader = BufReader::new(open(path)?);
    serde_json::from_reader(reader).with_context(|| format!("parse profile {}", path.display()))
}

/// Load a snapshot from a data directory. Missing files yield empty
/// collections (or a default profile).
pub fn load_snapshot<P: AsRef<Path>>(dir: P) -> Result<FinancialSnapshot> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(anyhow!("data directory {} does not exist", dir.display()));
    }

    let debts_path = dir.join(DEBTS_FILE);
    let goals_path = dir.join(GOALS_FILE);
    let holdings_path = dir.join(HOLDINGS_FILE);
    let profile_path = dir.join(PROFILE_FILE);

    Ok(FinancialSnapshot {
        profile: if profile_path.exists() {
            load_profile(&profile_path)?
        } else {
            FinancialProfile::default()
        },
        debts: if debts_path.exists() { load_debts(&debts_path)? } else { Vec::new() },
        goals: if goals_path.exists() { load_goals(&goals_path)? } else { Vec::new() },
        holdings: if holdings_path.exists() {
            load_holdings(&holdings_path)?
        } else {
            Vec::new()
        },
    })
}
