//! End-to-end scenarios through the engine facade

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use financial_engine::debt::monthly_interest;
use financial_engine::finances::{load_debts_from_reader, load_snapshot};
use financial_engine::health::HealthFactor;
use financial_engine::{
    Debt, EngineConfig, FinancialEngine, FinancialProfile, PayoffHorizon, PayoffStrategy,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("sample")
}

#[test]
fn test_credit_card_payoff_horizon() {
    let engine = FinancialEngine::new();

    assert_eq!(monthly_interest(dec!(5000), dec!(0.20)), dec!(83.33));
    // n = -ln(1 - r*B/P) / ln(1 + r) = 49.06 for r = 0.20/12, B = 5000, P = 150
    assert_eq!(
        engine.months_to_payoff(dec!(5000), dec!(0.20), dec!(150)).unwrap(),
        PayoffHorizon::Months(50)
    );
    assert_eq!(
        engine.months_to_payoff(dec!(5000), dec!(0.20), dec!(80)).unwrap(),
        PayoffHorizon::Never
    );
}

#[test]
fn test_extra_payment_rolls_over_through_facade() {
    let engine = FinancialEngine::new();
    let debts = vec![
        Debt::new("student", dec!(5000), dec!(0.10), dec!(100)),
        Debt::new("card", dec!(1000), dec!(0.24), dec!(50)),
    ];

    let comparison = engine.compare_strategies(&debts, dec!(200)).unwrap();
    let avalanche = &comparison.avalanche;

    assert_eq!(avalanche.payoff_order[0], "card");
    assert_eq!(avalanche.debt("card").unwrap().months_to_zero, Some(5));
    assert_eq!(avalanche.schedule[6].payment, dec!(350));
    assert_eq!(avalanche.months_to_debt_free, Some(19));

    // Extra payments always beat paying minimums only
    assert!(comparison.extra_payment_interest_savings > Decimal::ZERO);
    assert!(comparison.minimum_only.months_to_debt_free > avalanche.months_to_debt_free);
}

#[test]
fn test_health_breakdown_for_reference_profile() {
    let profile = FinancialProfile {
        monthly_income: Some(dec!(5000)),
        monthly_expenses: Some(dec!(3500)),
        monthly_savings: Some(dec!(1000)),
        emergency_fund: Some(dec!(15000)),
        ..Default::default()
    };

    let health = FinancialEngine::new().health(&profile, &[]);

    assert_eq!(health.emergency_fund_months.round_dp(2), dec!(4.29));
    assert_eq!(health.factor(HealthFactor::EmergencyFund).unwrap().points, 20);
    assert_eq!(health.savings_rate, dec!(0.2));
    assert_eq!(health.factor(HealthFactor::SavingsRate).unwrap().points, 25);
    assert_eq!(health.factor(HealthFactor::DebtToIncome).unwrap().points, 30);
    // Savings but no other assets
    assert_eq!(health.factor(HealthFactor::Diversification).unwrap().points, 10);
    assert_eq!(health.score, 85);
}

#[test]
fn test_loader_accepts_formatted_amounts() {
    let csv = "\
id,name,debt_type,principal,balance,annual_rate,minimum_payment,start_date
card, Main Card ,Credit Card,\"$2,500.00\",\"$1,200.50\",0.1999,$40,2024-01-15
";
    let debts = load_debts_from_reader(csv.as_bytes()).unwrap();

    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].name, "Main Card");
    assert_eq!(debts[0].balance, dec!(1200.50));
    assert_eq!(debts[0].minimum_payment, dec!(40));
    assert_eq!(debts[0].start_date, date(2024, 1, 15));
}

#[test]
fn test_sample_snapshot_report() {
    let dir = sample_dir();
    let snapshot = load_snapshot(&dir).unwrap();
    let config = EngineConfig::from_json_path(dir.join("engine.json")).unwrap();
    let engine = FinancialEngine::with_config(config);

    assert_eq!(snapshot.debts.len(), 4);
    assert_eq!(snapshot.goals.len(), 3);
    assert_eq!(snapshot.holdings.len(), 5);

    let today = date(2025, 6, 1);
    let report = engine.analyze(&snapshot, today).unwrap();

    // DTI 495/5800: 30, savings 0.155: 20, emergency 3.08 months: 20, assets: 20
    assert_eq!(report.health.score, 90);
    assert_eq!(report.debt_summary.total_balance, dec!(14850));
    assert_eq!(report.debt_summary.total_minimum_payment, dec!(495));

    // Store card is both the highest rate and the smallest balance
    let avalanche_ids: Vec<&str> = report.payoff.avalanche.debts.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(avalanche_ids, vec!["store", "visa", "student", "car"]);
    assert_eq!(report.payoff.snowball.debts[0].id, "store");
    assert!(report.payoff.avalanche.is_debt_free());
    assert!(report.payoff.snowball.is_debt_free());

    let retirement = report.retirement.as_ref().unwrap();
    assert_eq!(retirement.current_age, 37);
    assert_eq!(retirement.expected_return, dec!(0.065));

    assert_eq!(report.projection.len(), 15);
    assert_eq!(report.goal_summary.goal_count, 3);
    assert_eq!(report.goal_summary.total_target, dec!(51000));
    assert_eq!(report.goal_summary.overdue_count, 0);
    assert_eq!(report.portfolio.valuation.total_market_value, dec!(23280));

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"as_of\":\"2025-06-01\""));
}

#[test]
fn test_sample_scenario_grid() {
    let snapshot = load_snapshot(sample_dir()).unwrap();
    let engine = FinancialEngine::new();
    let scenarios = financial_engine::PayoffScenario::grid(&[dec!(0), dec!(250), dec!(500)]);

    let plans = engine.run_scenarios(&snapshot.debts, &scenarios).unwrap();
    assert_eq!(plans.len(), 6);

    let avalanche: Vec<_> = plans
        .iter()
        .filter(|p| p.strategy == PayoffStrategy::Avalanche)
        .collect();
    assert!(avalanche[1].total_interest < avalanche[0].total_interest);
    assert!(avalanche[2].months_to_debt_free < avalanche[1].months_to_debt_free);
}

#[test]
fn test_missing_data_directory_is_an_error() {
    assert!(load_snapshot(sample_dir().join("does-not-exist")).is_err());
}
