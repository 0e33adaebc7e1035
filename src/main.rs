//! Financial Engine CLI
//!
//! Loads a snapshot from a data directory (debts.csv, goals.csv,
//! holdings.csv, profile.json) and prints engine results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use financial_engine::debt::{PayoffPlan, PayoffStrategy};
use financial_engine::finances::load_snapshot;
use financial_engine::money::round_currency;
use financial_engine::{EngineConfig, FinancialEngine, FinancialSnapshot};

#[derive(Parser)]
#[command(name = "financial-engine")]
#[command(about = "Debt payoff, growth projection and financial health calculations", long_about = None)]
struct Cli {
    /// Directory holding debts.csv, goals.csv, holdings.csv and profile.json
    #[arg(short, long, global = true, default_value = "data/sample")]
    data: PathBuf,

    /// Engine configuration JSON (defaults apply to anything not set)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a month-by-month payoff plan for all debts
    Payoff {
        /// avalanche or snowball
        #[arg(short, long, default_value = "avalanche")]
        strategy: PayoffStrategy,

        /// Monthly budget on top of the minimum payments
        #[arg(short, long, default_value = "0")]
        extra: Decimal,

        /// Print every month of the schedule
        #[arg(long)]
        schedule: bool,
    },

    /// Compare avalanche and snowball on the same debts
    Compare {
        #[arg(short, long, default_value = "0")]
        extra: Decimal,
    },

    /// Months and interest to pay off a single balance
    Amortize {
        #[arg(long)]
        balance: Decimal,

        /// Annual rate as a fraction (0.18 = 18%)
        #[arg(long)]
        rate: Decimal,

        #[arg(long)]
        payment: Decimal,
    },

    /// Year-by-year savings and net worth projection
    Project,

    /// Retirement savings projection and income estimate
    Retirement,

    /// Progress and required contributions for each goal
    Goals,

    /// Portfolio valuation, allocation and risk
    Portfolio,

    /// Financial health score and recommendations
    Health,

    /// Everything above in one report
    Report {
        #[arg(short, long, default_value = "0")]
        extra: Decimal,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = FinancialEngine::with_config(config);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    // Single-balance math needs no data files
    let snapshot = if matches!(cli.command, Commands::Amortize { .. }) {
        FinancialSnapshot::default()
    } else {
        load_snapshot(&cli.data).with_context(|| format!("load snapshot from {}", cli.data.display()))?
    };

    run_command(&engine, &cli.command, &snapshot, today, cli.json)
}

fn run_command(
    engine: &FinancialEngine,
    command: &Commands,
    snapshot: &FinancialSnapshot,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let profile = &snapshot.profile;
    let debts = &snapshot.debts;

    match command {
        Commands::Payoff {
            strategy,
            extra,
            schedule,
        } => {
            let plan = engine.simulate_payoff(debts, *strategy, *extra)?;
            if json {
                return print_json(&plan);
            }
            print_plan(&plan, today, *schedule);
        }

        Commands::Compare { extra } => {
            let comparison = engine.compare_strategies(debts, *extra)?;
            if json {
                return print_json(&comparison);
            }
            println!("Strategy comparison (extra ${}/month)", extra);
            println!("{}", "=".repeat(60));
            println!("{:<12} {:>10} {:>14} {:>14}", "Strategy", "Months", "Interest", "Total Paid");
            println!("{}", "-".repeat(60));
            for (label, plan) in [
                ("avalanche", &comparison.avalanche),
                ("snowball", &comparison.snowball),
                ("minimum", &comparison.minimum_only),
            ] {
                println!(
                    "{:<12} {:>10} {:>14} {:>14}",
                    label,
                    months_label(plan.months_to_debt_free),
                    plan.total_interest,
                    plan.total_paid
                );
            }
            println!();
            println!("Recommended: {}", comparison.recommended);
            println!("Avalanche saves ${} over snowball", comparison.avalanche_interest_savings);
            println!(
                "Extra payment saves ${} over minimums only",
                comparison.extra_payment_interest_savings
            );
        }

        Commands::Amortize {
            balance,
            rate,
            payment,
        } => return run_amortize(engine, *balance, *rate, *payment, json),

        Commands::Project => {
            let rows = engine.generate_projection(profile, debts, today)?;
            if json {
                return print_json(&rows);
            }
            println!("{:>4} {:>5} {:>16} {:>16}", "Year", "Age", "Savings", "Net Worth");
            println!("{}", "-".repeat(44));
            for row in &rows {
                let age = row.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>4} {:>5} {:>16} {:>16}",
                    row.year, age, row.projected_savings, row.projected_net_worth
                );
            }
        }

        Commands::Retirement => {
            let projection = engine.project_retirement(profile, today)?;
            let income = engine.retirement_income(profile, today)?;
            if json {
                return print_json(&(projection, income));
            }
            println!("Retirement projection");
            println!("  Current age:          {}", projection.current_age);
            println!("  Years to retirement:  {}", projection.years_to_retirement);
            println!("  Expected return:      {}", projection.expected_return);
            println!("  Projected savings:    ${}", projection.projected_savings);
            println!("  Required savings:     ${}", projection.required_savings);
            println!("  Savings gap:          ${}", projection.savings_gap);
            println!("  On track:             {}", projection.on_track);
            println!();
            println!("Estimated annual retirement income");
            println!("  Investments:          ${}", income.investment_income);
            println!("  Social Security:      ${}", income.social_security);
            println!("  Total:                ${}", income.total_annual);
        }

        Commands::Goals => {
            let goals = engine.goal_progress(&snapshot.goals, today);
            let summary = engine.goal_summary(&snapshot.goals, today);
            if json {
                return print_json(&(goals, summary));
            }
            println!(
                "{:<20} {:>12} {:>12} {:>9} {:>8} {:>12} {}",
                "Goal", "Target", "Current", "Progress", "Days", "Monthly", "Status"
            );
            println!("{}", "-".repeat(92));
            for goal in &goals {
                println!(
                    "{:<20} {:>12} {:>12} {:>8.1}% {:>8} {:>12} {:?}",
                    goal.name,
                    goal.target_amount,
                    goal.current_amount,
                    percent(goal.progress_clamped),
                    goal.days_remaining,
                    goal.monthly_contribution_needed,
                    goal.status
                );
            }
            println!();
            println!(
                "{} goals, ${} of ${} saved ({:.1}% average), {} completed",
                summary.goal_count,
                summary.total_current,
                summary.total_target,
                summary.average_progress_percent(),
                summary.completed_count
            );
        }

        Commands::Portfolio => {
            let analysis = engine.analyze_portfolio(&snapshot.holdings);
            if json {
                return print_json(&analysis);
            }
            let v = &analysis.valuation;
            println!("Portfolio ({} holdings)", v.holding_count);
            println!("  Market value:     ${}", v.total_market_value);
            println!("  Cost:             ${}", v.total_cost);
            println!("  Unrealized gain:  ${} ({}%)", v.total_unrealized_gain, v.return_rate_percent);
            println!("  Diversification:  {:.2} / 10", analysis.diversification);
            println!("  Volatility:       {:.4}", analysis.volatility);
            println!("  Risk score:       {:.2} / 10", analysis.risk_score);
            println!();
            println!("{:<18} {:>14} {:>8}", "Asset class", "Value", "Share");
            for slice in &analysis.allocation {
                println!(
                    "{:<18} {:>14} {:>7.1}%",
                    slice.asset_class.as_str(),
                    slice.market_value,
                    percent(slice.share)
                );
            }
        }

        Commands::Health => {
            let breakdown = engine.health(profile, debts);
            if json {
                return print_json(&breakdown);
            }
            println!("Financial health score: {} / 100", breakdown.score);
            println!();
            for factor in &breakdown.factors {
                println!(
                    "  {:<16} {:>14} {:>3} / {}",
                    factor.factor.as_str(),
                    factor.value.round_dp(4),
                    factor.points,
                    factor.max_points
                );
            }
            println!();
            println!("  Monthly cash flow: ${}", breakdown.monthly_cash_flow);
            println!("  Net worth:         ${}", breakdown.net_worth);
            println!();
            for rec in &breakdown.recommendations {
                println!("  [{:?}] {}", rec.tier, rec.message);
            }
        }

        Commands::Report { extra } => {
            let report = engine.analyze_with_extra(snapshot, today, *extra)?;
            return print_json(&report);
        }
    }

    Ok(())
}

fn run_amortize(
    engine: &FinancialEngine,
    balance: Decimal,
    rate: Decimal,
    payment: Decimal,
    json: bool,
) -> Result<()> {
    let horizon = engine.months_to_payoff(balance, rate, payment)?;
    let interest = financial_engine::debt::total_interest(balance, rate, payment)?;
    let monthly = financial_engine::debt::monthly_interest(balance, rate);

    if json {
        return print_json(&serde_json::json!({
            "monthly_interest": monthly,
            "horizon": horizon,
            "total_interest": interest,
        }));
    }

    println!("Monthly interest: ${}", monthly);
    println!("Payoff:           {}", horizon);
    match interest {
        Some(total) => println!("Total interest:   ${}", total),
        None => println!("Total interest:   unbounded (payment does not cover interest)"),
    }
    Ok(())
}

fn print_plan(plan: &PayoffPlan, today: NaiveDate, full_schedule: bool) {
    println!("{} payoff plan (extra ${}/month)", plan.strategy, plan.extra_payment);
    println!("{}", "=".repeat(72));
    println!(
        "{:>4} {:<20} {:>12} {:>8} {:>12} {:>12}",
        "Rank", "Debt", "Balance", "Months", "Interest", "Paid"
    );
    println!("{}", "-".repeat(72));
    for debt in &plan.debts {
        println!(
            "{:>4} {:<20} {:>12} {:>8} {:>12} {:>12}",
            debt.priority,
            debt.name,
            debt.starting_balance,
            months_label(debt.months_to_zero),
            debt.total_interest,
            debt.total_paid
        );
    }
    println!();

    match plan.debt_free_date(today) {
        Some(date) => println!(
            "Debt free in {} months ({})",
            months_label(plan.months_to_debt_free),
            date
        ),
        None => println!(
            "Not paid off within {} months; ${} remains",
            plan.simulated_months(),
            plan.schedule.last().map(|r| r.remaining_balance).unwrap_or(Decimal::ZERO)
        ),
    }
    println!("Total interest: ${}", plan.total_interest);
    println!("Total paid:     ${}", plan.total_paid);

    let rows: Vec<_> = if full_schedule {
        plan.schedule.iter().collect()
    } else {
        plan.schedule.iter().take(13).collect()
    };

    println!();
    println!("{:>5} {:>12} {:>12} {:>14} {:>6}", "Month", "Interest", "Payment", "Remaining", "Open");
    for row in &rows {
        println!(
            "{:>5} {:>12} {:>12} {:>14} {:>6}",
            row.month, row.interest, row.payment, row.remaining_balance, row.debts_remaining
        );
    }
    if !full_schedule && plan.schedule.len() > rows.len() {
        println!("... ({} more months, use --schedule)", plan.schedule.len() - rows.len());
    }
}

fn months_label(months: Option<u32>) -> String {
    months.map(|m| m.to_string()).unwrap_or_else(|| "never".to_string())
}

fn percent(share: Decimal) -> f64 {
    financial_engine::money::to_f64(round_currency(share * Decimal::ONE_HUNDRED))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
