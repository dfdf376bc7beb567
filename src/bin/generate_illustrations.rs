//! Generate illustration tables as CSV
//!
//! Writes premium_grid.csv, cash_value_schedule.csv and crediting_history.csv
//! for review alongside the rate tables they were produced from.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use illustration_engine::inputs::{Gender, IulCreditInputs, PremiumInputs};
use illustration_engine::projection::cash_value_schedule;
use illustration_engine::ScenarioRunner;

#[derive(Parser)]
#[command(name = "generate_illustrations", version)]
struct Cli {
    /// Directory the CSV files are written to
    #[arg(long, default_value = "illustrations")]
    out_dir: PathBuf,

    /// Directory of CSV rate tables (built-in tables when omitted)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Monthly premium for the cash value schedule
    #[arg(long, default_value_t = 200.0)]
    monthly_premium: f64,

    /// Starting value for the crediting history
    #[arg(long, default_value_t = 100_000.0)]
    start_value: f64,
}

#[derive(Serialize)]
struct PremiumGridRecord {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Smoker")]
    smoker: bool,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "MonthlyPremium")]
    monthly_premium: f64,
}

#[derive(Serialize)]
struct CashValueRecord {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "TotalPremiums")]
    total_premiums: f64,
    #[serde(rename = "CashValueRate")]
    cash_value_rate: f64,
    #[serde(rename = "CashValue")]
    cash_value: f64,
}

#[derive(Serialize)]
struct CreditingRecord {
    #[serde(rename = "Method")]
    method: &'static str,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "IndexReturn")]
    index_return: f64,
    #[serde(rename = "CreditedRate")]
    credited_rate: f64,
    #[serde(rename = "AccountValue")]
    account_value: f64,
    #[serde(rename = "MarketValue")]
    market_value: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let runner = match &cli.tables {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };
    std::fs::create_dir_all(&cli.out_dir).with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let rows = write_premium_grid(&runner, &cli.out_dir.join("premium_grid.csv"))?;
    println!("premium_grid.csv: {} rows", rows);

    let rows = write_cash_value_schedule(cli.monthly_premium, &cli.out_dir.join("cash_value_schedule.csv"))?;
    println!("cash_value_schedule.csv: {} rows", rows);

    let rows = write_crediting_history(&runner, cli.start_value, &cli.out_dir.join("crediting_history.csv"))?;
    println!("crediting_history.csv: {} rows", rows);

    println!("Wrote illustrations to {} in {:?}", cli.out_dir.display(), start.elapsed());
    Ok(())
}

fn write_premium_grid(runner: &ScenarioRunner, path: &Path) -> anyhow::Result<usize> {
    let ages: Vec<u32> = (18..=70).collect();
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for gender in [Gender::Male, Gender::Female] {
        for smoker in [false, true] {
            for term_years in [10, 20, 30] {
                let base = PremiumInputs {
                    gender,
                    smoker,
                    term_years,
                    ..Default::default()
                };
                for row in runner.premium_grid(&base, &ages)? {
                    writer.serialize(PremiumGridRecord {
                        age: row.age,
                        gender: gender.as_str(),
                        smoker,
                        term_years,
                        monthly_premium: row.monthly_premium,
                    })?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

fn write_cash_value_schedule(monthly_premium: f64, path: &Path) -> anyhow::Result<usize> {
    let schedule = cash_value_schedule(monthly_premium, 40)?;
    let mut writer = csv::Writer::from_path(path)?;

    for p in &schedule {
        writer.serialize(CashValueRecord {
            year: p.years,
            total_premiums: p.total_premiums,
            cash_value_rate: p.cash_value_rate,
            cash_value: p.cash_value,
        })?;
    }

    writer.flush()?;
    Ok(schedule.len())
}

fn write_crediting_history(runner: &ScenarioRunner, start_value: f64, path: &Path) -> anyhow::Result<usize> {
    let comparison = runner.iul_method_comparison(start_value, &IulCreditInputs::default(), None)?;
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for run in &comparison {
        for year in &run.history {
            writer.serialize(CreditingRecord {
                method: run.method.as_str(),
                year: year.year,
                index_return: year.index_return,
                credited_rate: year.credited_rate,
                account_value: year.account_value,
                market_value: year.market_value,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}
