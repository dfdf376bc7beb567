//! Product tables: fixed annuity term rates, funding multipliers, sample index returns

use serde::{Deserialize, Serialize};

use crate::error::{IllustrationError, IllustrationResult};
use crate::inputs::FundingLevel;

pub(crate) const ANNUITY_TERM_TABLE: &str = "annuity term rates";

/// Guaranteed rate offered for one fixed annuity term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermAnnuityRate {
    pub term_years: u32,
    /// Annual guaranteed rate in percent
    pub rate_percent: f64,
    pub min_deposit: f64,
}

/// Offered multi-year guaranteed annuity terms
#[derive(Debug, Clone, PartialEq)]
pub struct AnnuityTermTable {
    rates: Vec<TermAnnuityRate>,
}

impl Default for AnnuityTermTable {
    fn default() -> Self {
        Self {
            rates: vec![
                TermAnnuityRate { term_years: 3, rate_percent: 4.75, min_deposit: 10_000.0 },
                TermAnnuityRate { term_years: 5, rate_percent: 5.25, min_deposit: 10_000.0 },
                TermAnnuityRate { term_years: 7, rate_percent: 5.50, min_deposit: 25_000.0 },
                TermAnnuityRate { term_years: 10, rate_percent: 5.75, min_deposit: 25_000.0 },
            ],
        }
    }
}

impl AnnuityTermTable {
    /// Create from loaded CSV data
    pub fn from_loaded(rates: &[TermAnnuityRate]) -> Self {
        let mut rates = rates.to_vec();
        rates.sort_by_key(|r| r.term_years);
        Self { rates }
    }

    /// Rate for an offered term; any other term is `NotFound`
    pub fn rate_for(&self, term_years: u32) -> IllustrationResult<TermAnnuityRate> {
        self.rates
            .iter()
            .find(|r| r.term_years == term_years)
            .copied()
            .ok_or_else(|| IllustrationError::not_found(ANNUITY_TERM_TABLE, format!("{}-year term", term_years)))
    }

    pub fn offered_terms(&self) -> Vec<u32> {
        self.rates.iter().map(|r| r.term_years).collect()
    }

    pub fn rates(&self) -> &[TermAnnuityRate] {
        &self.rates
    }
}

/// Scaling factors applied to the base annual premium for one funding level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingMultipliers {
    pub premium: f64,
    pub cash_value_year_10: f64,
    pub cash_value_year_20: f64,
    pub death_benefit: f64,
}

/// Funding-level multipliers for cash value life illustrations
///
/// Heavier funding buys more cash value per premium dollar and a smaller
/// death benefit per premium dollar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundingTable {
    minimum: FundingMultipliers,
    target: FundingMultipliers,
    max: FundingMultipliers,
}

impl Default for FundingTable {
    fn default() -> Self {
        Self {
            minimum: FundingMultipliers {
                premium: 1.0,
                cash_value_year_10: 6.5,
                cash_value_year_20: 18.0,
                death_benefit: 50.0,
            },
            target: FundingMultipliers {
                premium: 1.5,
                cash_value_year_10: 11.0,
                cash_value_year_20: 32.0,
                death_benefit: 45.0,
            },
            max: FundingMultipliers {
                premium: 2.0,
                cash_value_year_10: 16.0,
                cash_value_year_20: 48.0,
                death_benefit: 40.0,
            },
        }
    }
}

impl FundingTable {
    pub fn for_level(&self, level: FundingLevel) -> FundingMultipliers {
        match level {
            FundingLevel::Minimum => self.minimum,
            FundingLevel::Target => self.target,
            FundingLevel::Max => self.max,
        }
    }
}

/// One calendar year of index performance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexYear {
    pub year: u16,
    /// Price return in percent
    pub return_percent: f64,
}

/// Sample index returns used to illustrate cap and floor crediting
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHistory {
    years: Vec<IndexYear>,
}

impl Default for IndexHistory {
    fn default() -> Self {
        // S&P 500 calendar-year price returns
        let returns = [
            (2015, -0.7),
            (2016, 9.5),
            (2017, 19.4),
            (2018, -6.2),
            (2019, 28.9),
            (2020, 16.3),
            (2021, 26.9),
            (2022, -19.4),
            (2023, 24.2),
            (2024, 23.3),
        ];
        Self {
            years: returns
                .iter()
                .map(|&(year, return_percent)| IndexYear { year, return_percent })
                .collect(),
        }
    }
}

impl IndexHistory {
    /// Create from loaded CSV data
    pub fn from_loaded(years: &[IndexYear]) -> Self {
        let mut years = years.to_vec();
        years.sort_by_key(|y| y.year);
        Self { years }
    }

    pub fn years(&self) -> &[IndexYear] {
        &self.years
    }

    /// Returns in percent, oldest first
    pub fn returns(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.return_percent).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
