//! Sweep extra-payment budgets for both payoff strategies
//!
//! Runs every (strategy, extra payment) pair in parallel on the debts in
//! debts.csv and writes one summary row per scenario.
//!
//! Usage: cargo run --release --bin compare_strategies -- --debts data/sample/debts.csv

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use financial_engine::debt::DebtSummary;
use financial_engine::finances::load_debts;
use financial_engine::{EngineConfig, FinancialEngine, PayoffPlan, PayoffScenario};

#[derive(Parser)]
#[command(name = "compare_strategies")]
#[command(about = "Sweep extra payments for avalanche and snowball payoff", long_about = None)]
struct Args {
    /// Debts CSV
    #[arg(long, default_value = "data/sample/debts.csv")]
    debts: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "strategy_sweep.csv")]
    output: PathBuf,

    /// Largest extra payment to try
    #[arg(long, default_value = "1000")]
    max_extra: Decimal,

    /// Step between extra payments
    #[arg(long, default_value = "50")]
    step: Decimal,

    /// Engine configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// One output row
#[derive(Debug, Serialize)]
struct SweepRow {
    strategy: String,
    extra_payment: Decimal,
    outcome: String,
    months_to_debt_free: Option<u32>,
    total_interest: Decimal,
    total_paid: Decimal,
    first_payoff: String,
    payoff_order: String,
}

impl SweepRow {
    fn from_plan(plan: &PayoffPlan) -> Self {
        Self {
            strategy: plan.strategy.to_string(),
            extra_payment: plan.extra_payment,
            outcome: if plan.is_debt_free() { "debt_free" } else { "never_payoff" }.to_string(),
            months_to_debt_free: plan.months_to_debt_free,
            total_interest: plan.total_interest,
            total_paid: plan.total_paid,
            first_payoff: plan.payoff_order.first().cloned().unwrap_or_default(),
            payoff_order: plan.payoff_order.join(";"),
        }
    }
}

fn extra_payments(max: Decimal, step: Decimal) -> Result<Vec<Decimal>> {
    if step <= Decimal::ZERO {
        anyhow::bail!("--step must be positive");
    }
    let mut extras = Vec::new();
    let mut extra = Decimal::ZERO;
    while extra <= max {
        extras.push(extra);
        extra += step;
    }
    Ok(extras)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let start = Instant::now();
    let debts = load_debts(&args.debts)?;
    println!("Loaded {} debts from {} in {:?}", debts.len(), args.debts.display(), start.elapsed());

    let summary = DebtSummary::from_debts(&debts);
    println!(
        "  Total balance ${}, minimums ${}/month, weighted rate {}",
        summary.total_balance, summary.total_minimum_payment, summary.weighted_average_rate
    );

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = FinancialEngine::with_config(config);

    let scenarios = PayoffScenario::grid(&extra_payments(args.max_extra, args.step)?);
    println!("Running {} scenarios...", scenarios.len());
    let sim_start = Instant::now();

    // Each scenario is independent; results keep scenario order
    let plans: Vec<PayoffPlan> = scenarios
        .par_iter()
        .map(|scenario| engine.run_scenarios(&debts, std::slice::from_ref(scenario)))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    println!("Scenarios complete in {:?}", sim_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    for plan in &plans {
        writer.serialize(SweepRow::from_plan(plan))?;
    }
    writer.flush()?;

    info!("wrote {} rows", plans.len());
    println!("Results written to: {}", args.output.display());

    // Best scenario by interest at each budget
    println!();
    println!("{:>10} {:>12} {:>8} {:>14}", "Extra", "Best", "Months", "Interest");
    for pair in plans.chunks(2) {
        if let Some(best) = pair.iter().min_by(|a, b| a.total_interest.cmp(&b.total_interest)) {
            let months = best
                .months_to_debt_free
                .map(|m| m.to_string())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "{:>10} {:>12} {:>8} {:>14}",
                best.extra_payment, best.strategy, months, best.total_interest
            );
        }
    }

    Ok(())
}
