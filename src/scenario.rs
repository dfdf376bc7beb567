//! Scenario runner for batch illustrations
//!
//! Loads assumptions once, then runs many calculator requests against them
//! without re-reading CSV files.

use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::error::IllustrationResult;
use crate::inputs::{IulCreditInputs, PremiumInputs};
use crate::projection::{
    credit_history, estimate_monthly_premium, summarize_history, CreditedYear, CreditingMethod, CreditingSummary,
    IllustrationRequest, ProjectionEngine, ProjectionResult,
};

/// Premium estimate for one row of an age grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumGridRow {
    pub age: u32,
    pub monthly_premium: f64,
}

/// One crediting method applied to a return sequence
#[derive(Debug, Clone, PartialEq)]
pub struct MethodComparison {
    pub method: CreditingMethod,
    pub history: Vec<CreditedYear>,
    pub summary: CreditingSummary,
}

/// Pre-loaded scenario runner for batch illustrations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// let requests = vec![
///     IllustrationRequest::TermRate { term_years: 5 },
///     IllustrationRequest::CoverageGap(CoverageInputs::default()),
/// ];
/// let results = runner.run_batch(&requests);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in tables
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_pricing())
    }

    /// Create runner by loading rate tables from the default CSV directory
    pub fn from_csv() -> IllustrationResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from a specific rate tables directory
    pub fn from_csv_path(path: &std::path::Path) -> IllustrationResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
        }
    }

    pub fn run(&self, request: &IllustrationRequest) -> IllustrationResult<ProjectionResult> {
        self.engine.illustrate(request)
    }

    /// Run requests in parallel; results come back in request order
    pub fn run_batch(&self, requests: &[IllustrationRequest]) -> Vec<IllustrationResult<ProjectionResult>> {
        log::debug!("running batch of {} requests", requests.len());
        requests.par_iter().map(|r| self.engine.illustrate(r)).collect()
    }

    /// Monthly premium for `base` at each age
    pub fn premium_grid(&self, base: &PremiumInputs, ages: &[u32]) -> IllustrationResult<Vec<PremiumGridRow>> {
        let rates = &self.engine.assumptions().rates;
        ages.par_iter()
            .map(|&age| {
                let inputs = PremiumInputs { age, ..*base };
                estimate_monthly_premium(&inputs, rates).map(|monthly_premium| PremiumGridRow { age, monthly_premium })
            })
            .collect()
    }

    /// Every crediting method over the same returns; sample index history when `returns` is None
    pub fn iul_method_comparison(
        &self,
        start_value: f64,
        terms: &IulCreditInputs,
        returns: Option<&[f64]>,
    ) -> IllustrationResult<Vec<MethodComparison>> {
        let sample;
        let returns = match returns {
            Some(r) => r,
            None => {
                sample = self.engine.assumptions().index_history.returns();
                &sample
            }
        };

        CreditingMethod::ALL
            .iter()
            .map(|&method| {
                let history = credit_history(start_value, returns, terms, method)?;
                let summary = summarize_history(&history, terms, start_value);
                Ok(MethodComparison { method, history, summary })
            })
            .collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.engine.assumptions()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
