//! CSV-based rate table loader
//!
//! Loads rate tables from CSV files in data/rate_tables/. Every file is
//! optional in the sense that callers may load tables one at a time, but
//! `LoadedTables::load_from` expects all four to be present.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::product::{IndexYear, TermAnnuityRate};
use super::rates::RateAssumptions;
use super::states::{StateRequirement, StateRequirementTable, UsState};
use crate::error::{IllustrationError, IllustrationResult};

/// Default path to rate tables directory
pub const DEFAULT_RATE_TABLES_PATH: &str = "data/rate_tables";

pub const RATE_ASSUMPTIONS_FILE: &str = "rate_assumptions.csv";
pub const STATE_REQUIREMENTS_FILE: &str = "state_requirements.csv";
pub const ANNUITY_TERMS_FILE: &str = "annuity_terms.csv";
pub const INDEX_RETURNS_FILE: &str = "index_returns.csv";

/// Raw CSV row matching state_requirements.csv columns
#[derive(Debug, serde::Deserialize)]
struct StateRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "PreLicenseHours")]
    pre_license_hours: u32,
    #[serde(rename = "ExamFee")]
    exam_fee: f64,
    #[serde(rename = "RenewalYears")]
    renewal_years: u32,
    #[serde(rename = "CEHours")]
    ce_hours: u32,
}

/// Raw CSV row matching annuity_terms.csv columns
#[derive(Debug, serde::Deserialize)]
struct TermRow {
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "RatePercent")]
    rate_percent: f64,
    #[serde(rename = "MinDeposit")]
    min_deposit: f64,
}

/// Raw CSV row matching index_returns.csv columns
#[derive(Debug, serde::Deserialize)]
struct IndexRow {
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "ReturnPercent")]
    return_percent: f64,
}

fn parse_error(table: &str, line: usize, reason: impl Into<String>) -> IllustrationError {
    IllustrationError::Parse {
        table: table.to_string(),
        line,
        reason: reason.into(),
    }
}

/// Header is line 1, so the nth data record sits on line n + 2
fn line_of(index: usize) -> usize {
    index + 2
}

/// Load pricing factors from key,value rows, starting from the defaults
pub fn load_rate_assumptions_from_reader<R: Read>(reader: R) -> IllustrationResult<RateAssumptions> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rates = RateAssumptions::default();

    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = line_of(i);
        let key = record.get(0).unwrap_or("").trim();
        let raw = record.get(1).unwrap_or("").trim();
        let number = || -> IllustrationResult<f64> {
            raw.parse()
                .map_err(|_| parse_error(RATE_ASSUMPTIONS_FILE, line, format!("'{}' is not a number", raw)))
        };
        let whole = || -> IllustrationResult<u32> {
            raw.parse().map_err(|_| {
                parse_error(RATE_ASSUMPTIONS_FILE, line, format!("{} must be a whole number, got '{}'", key, raw))
            })
        };

        match key {
            "base_rate_per_thousand" => rates.base_rate_per_thousand = number()?,
            "female_rate_per_thousand" => rates.female_rate_per_thousand = number()?,
            "age_multiplier_slope" => rates.age_multiplier_slope = number()?,
            "pivot_age" => rates.pivot_age = whole()?,
            "smoker_multiplier" => rates.smoker_multiplier = number()?,
            "term_multiplier_slope" => rates.term_multiplier_slope = number()?,
            "pivot_term_years" => rates.pivot_term_years = whole()?,
            other => return Err(parse_error(RATE_ASSUMPTIONS_FILE, line, format!("unknown key '{}'", other))),
        }
    }

    rates.validate()?;
    Ok(rates)
}

pub fn load_rate_assumptions(path: &Path) -> IllustrationResult<RateAssumptions> {
    let file = File::open(path.join(RATE_ASSUMPTIONS_FILE))?;
    load_rate_assumptions_from_reader(file)
}

/// Load licensing requirements; states missing from the file keep their defaults
pub fn load_state_requirements_from_reader<R: Read>(reader: R) -> IllustrationResult<StateRequirementTable> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut table = StateRequirementTable::default();

    for result in csv_reader.deserialize() {
        let row: StateRow = result?;
        let state: UsState = row.state.parse()?;
        table.set(
            state,
            StateRequirement::new(row.pre_license_hours, row.exam_fee, row.renewal_years, row.ce_hours),
        );
    }

    Ok(table)
}

pub fn load_state_requirements(path: &Path) -> IllustrationResult<StateRequirementTable> {
    let file = File::open(path.join(STATE_REQUIREMENTS_FILE))?;
    load_state_requirements_from_reader(file)
}

/// Load offered annuity terms; the file replaces the default term list
pub fn load_annuity_terms_from_reader<R: Read>(reader: R) -> IllustrationResult<Vec<TermAnnuityRate>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rates: Vec<TermAnnuityRate> = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: TermRow = result?;
        let line = line_of(i);

        if row.term_years == 0 {
            return Err(parse_error(ANNUITY_TERMS_FILE, line, "term must be at least one year"));
        }
        if !(0.0..=100.0).contains(&row.rate_percent) {
            return Err(parse_error(ANNUITY_TERMS_FILE, line, format!("rate {} outside [0, 100]", row.rate_percent)));
        }
        if !row.min_deposit.is_finite() || row.min_deposit < 0.0 {
            return Err(parse_error(ANNUITY_TERMS_FILE, line, "minimum deposit must be non-negative"));
        }
        if rates.iter().any(|r| r.term_years == row.term_years) {
            return Err(parse_error(ANNUITY_TERMS_FILE, line, format!("duplicate {}-year term", row.term_years)));
        }

        rates.push(TermAnnuityRate {
            term_years: row.term_years,
            rate_percent: row.rate_percent,
            min_deposit: row.min_deposit,
        });
    }

    Ok(rates)
}

pub fn load_annuity_terms(path: &Path) -> IllustrationResult<Vec<TermAnnuityRate>> {
    let file = File::open(path.join(ANNUITY_TERMS_FILE))?;
    load_annuity_terms_from_reader(file)
}

pub fn load_index_returns_from_reader<R: Read>(reader: R) -> IllustrationResult<Vec<IndexYear>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut years = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: IndexRow = result?;
        if !row.return_percent.is_finite() {
            return Err(parse_error(INDEX_RETURNS_FILE, line_of(i), "return must be a finite number"));
        }
        years.push(IndexYear {
            year: row.year,
            return_percent: row.return_percent,
        });
    }

    Ok(years)
}

pub fn load_index_returns(path: &Path) -> IllustrationResult<Vec<IndexYear>> {
    let file = File::open(path.join(INDEX_RETURNS_FILE))?;
    load_index_returns_from_reader(file)
}

/// All rate tables loaded from one directory
pub struct LoadedTables {
    pub rate_assumptions: RateAssumptions,
    pub state_requirements: StateRequirementTable,
    pub annuity_terms: Vec<TermAnnuityRate>,
    pub index_returns: Vec<IndexYear>,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> IllustrationResult<Self> {
        Self::load_from(Path::new(DEFAULT_RATE_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> IllustrationResult<Self> {
        let loaded = Self {
            rate_assumptions: load_rate_assumptions(path)?,
            state_requirements: load_state_requirements(path)?,
            annuity_terms: load_annuity_terms(path)?,
            index_returns: load_index_returns(path)?,
        };
        log::info!(
            "loaded rate tables from {}: {} annuity terms, {} index years",
            path.display(),
            loaded.annuity_terms.len(),
            loaded.index_returns.len()
        );
        Ok(loaded)
    }
}
