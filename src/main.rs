//! Illustration Engine CLI
//!
//! Runs a single calculator from the command line, or a JSON request file.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use illustration_engine::inputs::{
    AnnuityInputs, CoverageInputs, FundingLevel, Gender, HumanLifeInputs, IulCreditInputs, PremiumInputs,
    RetirementInputs,
};
use illustration_engine::{Assumptions, CreditingMethod, IllustrationRequest, ProjectionResult, ScenarioRunner};

/// Calculators behind insurance and annuity sales illustrations
#[derive(Parser)]
#[command(name = "illustrate", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Directory of CSV rate tables (built-in tables when omitted)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Clamp inputs into slider bounds instead of rejecting them
    #[arg(long, global = true)]
    clamp: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Calculator(CalculatorCommand),
    /// Run a JSON request, or an array of requests (stdin when no file given)
    Request { file: Option<PathBuf> },
}

/// One subcommand per calculator
#[derive(Subcommand)]
enum CalculatorCommand {
    /// Estimate a monthly term premium
    Premium(PremiumArgs),
    /// Whole life cash value after a number of years
    CashValue(CashValueArgs),
    /// Fixed annuity growth (guaranteed term rate when --rate is omitted)
    Annuity(AnnuityArgs),
    /// Indexed universal life crediting
    Iul(IulArgs),
    /// Max-funded IUL at one or all funding levels
    MaxFunding(MaxFundingArgs),
    /// Retirement income from annual contributions
    Retirement(RetirementArgs),
    /// Additional life coverage needed
    CoverageGap(CoverageArgs),
    /// Human life value of an income stream
    HumanLifeValue(HumanLifeArgs),
    /// Licensing requirements for a state (name or code)
    State { name: String },
    /// Guaranteed rate for a fixed annuity term
    TermRate { term_years: u32 },
}

#[derive(Args)]
struct PremiumArgs {
    #[arg(long, default_value_t = 35)]
    age: u32,
    #[arg(long, default_value = "male")]
    gender: Gender,
    #[arg(long)]
    smoker: bool,
    #[arg(long, default_value_t = 250_000.0)]
    coverage: f64,
    #[arg(long, default_value_t = 20)]
    term: u32,
}

#[derive(Args)]
struct CashValueArgs {
    #[arg(long, default_value_t = 200.0)]
    monthly_premium: f64,
    #[arg(long, default_value_t = 20)]
    years: u32,
}

#[derive(Args)]
struct AnnuityArgs {
    #[arg(long, default_value_t = 100_000.0)]
    principal: f64,
    /// Annual rate in percent
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long, default_value_t = 5)]
    years: u32,
}

#[derive(Args)]
struct IulArgs {
    /// Index return in percent
    #[arg(long, default_value_t = 8.0, allow_hyphen_values = true)]
    index_return: f64,
    #[arg(long, default_value_t = 10.0)]
    cap: f64,
    #[arg(long, default_value_t = 0.0)]
    floor: f64,
    #[arg(long, default_value_t = 100.0)]
    participation: f64,
    #[arg(long, default_value = "floor-first")]
    method: CreditingMethod,
    /// Credit the sample index history instead of a single return
    #[arg(long)]
    history: bool,
    #[arg(long, default_value_t = 100_000.0)]
    start_value: f64,
}

#[derive(Args)]
struct MaxFundingArgs {
    #[arg(long, default_value_t = 10_000.0)]
    base_premium: f64,
    /// minimum, target or max; all three compared when omitted
    #[arg(long)]
    level: Option<FundingLevel>,
}

#[derive(Args)]
struct RetirementArgs {
    #[arg(long, default_value_t = 45)]
    current_age: u32,
    #[arg(long, default_value_t = 65)]
    retirement_age: u32,
    #[arg(long, default_value_t = 10_000.0)]
    contribution: f64,
    #[arg(long, default_value_t = 6.5)]
    growth: f64,
    #[arg(long, default_value_t = 4.5)]
    payout_rate: f64,
    #[arg(long, default_value_t = 25)]
    payout_years: u32,
}

#[derive(Args)]
struct CoverageArgs {
    #[arg(long, default_value_t = 75_000.0)]
    income: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    #[arg(long, default_value_t = 250_000.0)]
    mortgage: f64,
    #[arg(long, default_value_t = 25_000.0)]
    other_debts: f64,
    #[arg(long, default_value_t = 100_000.0)]
    college: f64,
    #[arg(long, default_value_t = 50_000.0)]
    savings: f64,
    #[arg(long, default_value_t = 0.0)]
    existing_coverage: f64,
}

#[derive(Args)]
struct HumanLifeArgs {
    #[arg(long, default_value_t = 35)]
    current_age: u32,
    #[arg(long, default_value_t = 65)]
    retirement_age: u32,
    #[arg(long, default_value_t = 75_000.0)]
    income: f64,
    #[arg(long, default_value_t = 3.0)]
    growth: f64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(results) => print_results(cli.output, &results),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Vec<ProjectionResult>> {
    let assumptions = match &cli.tables {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => Assumptions::default_pricing(),
    };
    let runner = ScenarioRunner::with_assumptions(assumptions);

    let requests = match &cli.command {
        Commands::Request { file } => read_requests(file.as_ref())?,
        Commands::Calculator(command) => vec![build_request(command)],
    };
    let requests: Vec<_> = if cli.clamp {
        requests.iter().map(IllustrationRequest::clamped).collect()
    } else {
        requests
    };

    let results = runner.run_batch(&requests).into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}

fn build_request(command: &CalculatorCommand) -> IllustrationRequest {
    match command {
        CalculatorCommand::Premium(a) => IllustrationRequest::Premium(PremiumInputs {
            age: a.age,
            gender: a.gender,
            smoker: a.smoker,
            coverage_amount: a.coverage,
            term_years: a.term,
        }),
        CalculatorCommand::CashValue(a) => IllustrationRequest::WholeLife {
            monthly_premium: a.monthly_premium,
            years: a.years,
        },
        CalculatorCommand::Annuity(a) => match a.rate {
            Some(rate) => IllustrationRequest::FixedAnnuity(AnnuityInputs {
                principal: a.principal,
                annual_rate_percent: rate,
                term_years: a.years,
            }),
            None => IllustrationRequest::TermAnnuity {
                principal: a.principal,
                term_years: a.years,
            },
        },
        CalculatorCommand::Iul(a) => {
            let terms = IulCreditInputs {
                index_return_percent: a.index_return,
                cap_percent: a.cap,
                floor_percent: a.floor,
                participation_percent: a.participation,
            };
            if a.history {
                IllustrationRequest::CreditHistory {
                    start_value: a.start_value,
                    terms,
                    method: a.method,
                    returns: None,
                }
            } else {
                IllustrationRequest::IulCredit { terms, method: a.method }
            }
        }
        CalculatorCommand::MaxFunding(a) => IllustrationRequest::MaxFunding {
            base_annual_premium: a.base_premium,
            level: a.level,
        },
        CalculatorCommand::Retirement(a) => IllustrationRequest::RetirementIncome(RetirementInputs {
            current_age: a.current_age,
            retirement_age: a.retirement_age,
            annual_contribution: a.contribution,
            growth_rate_percent: a.growth,
            payout_rate_percent: a.payout_rate,
            payout_years: a.payout_years,
        }),
        CalculatorCommand::CoverageGap(a) => IllustrationRequest::CoverageGap(CoverageInputs {
            annual_income: a.income,
            years_to_replace: a.years,
            mortgage_balance: a.mortgage,
            other_debts: a.other_debts,
            college_fund_target: a.college,
            existing_savings: a.savings,
            existing_coverage: a.existing_coverage,
        }),
        CalculatorCommand::HumanLifeValue(a) => IllustrationRequest::HumanLifeValue(HumanLifeInputs {
            current_age: a.current_age,
            retirement_age: a.retirement_age,
            annual_income: a.income,
            growth_rate_percent: a.growth,
        }),
        CalculatorCommand::State { name } => IllustrationRequest::StateRequirement { state: name.clone() },
        CalculatorCommand::TermRate { term_years } => IllustrationRequest::TermRate { term_years: *term_years },
    }
}

fn read_requests(file: Option<&PathBuf>) -> anyhow::Result<Vec<IllustrationRequest>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let value: serde_json::Value = serde_json::from_str(&text).context("parsing request JSON")?;
    let requests = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(requests)
}

fn print_results(format: OutputFormat, results: &[ProjectionResult]) {
    match format {
        OutputFormat::Json => {
            let json = if results.len() == 1 {
                serde_json::to_string_pretty(&results[0])
            } else {
                serde_json::to_string_pretty(results)
            };
            match json {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
        OutputFormat::Table => {
            for result in results {
                println!("{}", result.calculator);
                println!("{}", "-".repeat(48));
                let width = result.formatted_outputs.keys().map(String::len).max().unwrap_or(0);
                for (name, text) in &result.formatted_outputs {
                    println!("  {:<width$}  {:>20}", name, text, width = width);
                }
                println!();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_calculator_subcommand_builds_request() {
        let cli = parse(&["illustrate", "premium", "--age", "40", "--smoker"]);
        let request = match &cli.command {
            Commands::Calculator(command) => build_request(command),
            Commands::Request { .. } => panic!("premium parsed as a request file"),
        };
        match request {
            IllustrationRequest::Premium(inputs) => {
                assert_eq!(inputs.age, 40);
                assert!(inputs.smoker);
                assert_eq!(inputs.coverage_amount, 250_000.0);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_annuity_without_rate_uses_term_table() {
        let cli = parse(&["illustrate", "annuity", "--years", "7"]);
        let Commands::Calculator(command) = &cli.command else {
            panic!("annuity parsed as a request file");
        };
        assert_eq!(
            build_request(command),
            IllustrationRequest::TermAnnuity { principal: 100_000.0, term_years: 7 }
        );
    }

    #[test]
    fn test_request_subcommand_kept_apart() {
        let cli = parse(&["illustrate", "--output", "json", "request", "batch.json"]);
        assert!(matches!(
            &cli.command,
            Commands::Request { file: Some(path) } if path == &PathBuf::from("batch.json")
        ));
    }
}
