//! Rate assumptions and static lookup tables

mod product;
mod rates;
mod states;
pub mod loader;

pub use loader::LoadedTables;
pub use product::{
    AnnuityTermTable, FundingMultipliers, FundingTable, IndexHistory, IndexYear, TermAnnuityRate,
};
pub use rates::RateAssumptions;
pub use states::{StateRequirement, StateRequirementTable, UsState};

use std::path::Path;

use crate::error::IllustrationResult;

/// Container for all illustration assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub rates: RateAssumptions,
    pub states: StateRequirementTable,
    pub annuity_terms: AnnuityTermTable,
    pub funding: FundingTable,
    pub index_history: IndexHistory,
}

impl Assumptions {
    /// Built-in tables used by the marketing calculators
    pub fn default_pricing() -> Self {
        Self::default()
    }

    /// Load rate tables from CSV files in the default location (data/rate_tables/)
    pub fn from_csv() -> IllustrationResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATE_TABLES_PATH))
    }

    /// Load rate tables from CSV files in a specific directory
    ///
    /// Funding multipliers are defined constants and are not read from disk.
    pub fn from_csv_path(path: &Path) -> IllustrationResult<Self> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            rates: loaded.rate_assumptions,
            states: loaded.state_requirements,
            annuity_terms: AnnuityTermTable::from_loaded(&loaded.annuity_terms),
            funding: FundingTable::default(),
            index_history: IndexHistory::from_loaded(&loaded.index_returns),
        })
    }

    pub fn state_requirement(&self, state_name: &str) -> IllustrationResult<StateRequirement> {
        self.states.requirement(state_name)
    }

    pub fn term_annuity_rate(&self, term_years: u32) -> IllustrationResult<TermAnnuityRate> {
        self.annuity_terms.rate_for(term_years)
    }
}
