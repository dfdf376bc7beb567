//! Coverage sizing: needs-based gap and human life value

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::error::IllustrationResult;
use crate::inputs::{CoverageInputs, HumanLifeInputs};

/// Needs analysis broken into its components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageNeed {
    pub income_replacement: f64,
    /// Mortgage plus other debts
    pub debts: f64,
    pub education: f64,
    pub total_need: f64,
    /// Existing savings plus existing coverage
    pub offsets: f64,
    /// Additional coverage needed, never negative
    pub gap: f64,
}

pub fn coverage_need(inputs: &CoverageInputs) -> IllustrationResult<CoverageNeed> {
    inputs.validate()?;

    let income_replacement = inputs.annual_income * inputs.years_to_replace as f64;
    let debts = inputs.mortgage_balance + inputs.other_debts;
    let education = inputs.college_fund_target;
    let total_need = income_replacement + debts + education;
    let offsets = inputs.existing_savings + inputs.existing_coverage;

    Ok(CoverageNeed {
        income_replacement,
        debts,
        education,
        total_need,
        offsets,
        gap: round_currency((total_need - offsets).max(0.0)),
    })
}

/// Additional coverage needed; zero when existing resources cover the need
pub fn coverage_gap(inputs: &CoverageInputs) -> IllustrationResult<f64> {
    coverage_need(inputs).map(|need| need.gap)
}

/// Future value of the income stream until retirement, growing at `g` per year
///
/// `income * ((1 + g)^n - 1) / g`, or `income * n` when growth is zero.
pub fn human_life_value(inputs: &HumanLifeInputs) -> IllustrationResult<f64> {
    inputs.validate()?;

    let n = inputs.working_years();
    let g = inputs.growth_rate_percent / 100.0;
    let value = if g == 0.0 {
        inputs.annual_income * n as f64
    } else {
        inputs.annual_income * ((1.0 + g).powi(n as i32) - 1.0) / g
    };

    Ok(round_currency(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_scenario() {
        let inputs = CoverageInputs {
            annual_income: 75_000.0,
            years_to_replace: 10,
            mortgage_balance: 250_000.0,
            other_debts: 25_000.0,
            college_fund_target: 100_000.0,
            existing_savings: 50_000.0,
            existing_coverage: 0.0,
        };
        let need = coverage_need(&inputs).unwrap();

        assert_eq!(need.income_replacement, 750_000.0);
        assert_eq!(need.debts, 275_000.0);
        assert_eq!(need.total_need, 1_125_000.0);
        assert_eq!(need.gap, 1_075_000.0);
    }

    #[test]
    fn test_gap_never_negative() {
        let inputs = CoverageInputs {
            existing_coverage: 5_000_000.0,
            ..Default::default()
        };
        assert_eq!(coverage_gap(&inputs).unwrap(), 0.0);

        let nothing = CoverageInputs {
            annual_income: 0.0,
            years_to_replace: 0,
            mortgage_balance: 0.0,
            other_debts: 0.0,
            college_fund_target: 0.0,
            existing_savings: 0.0,
            existing_coverage: 0.0,
        };
        assert_eq!(coverage_gap(&nothing).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_input_rejected() {
        let inputs = CoverageInputs {
            other_debts: -10.0,
            ..Default::default()
        };
        assert!(coverage_gap(&inputs).is_err());
    }

    #[test]
    fn test_human_life_value_zero_growth() {
        let inputs = HumanLifeInputs {
            current_age: 35,
            retirement_age: 65,
            annual_income: 80_000.0,
            growth_rate_percent: 0.0,
        };
        assert_eq!(human_life_value(&inputs).unwrap(), 2_400_000.0);
    }

    #[test]
    fn test_human_life_value_growing() {
        let inputs = HumanLifeInputs {
            current_age: 63,
            retirement_age: 65,
            annual_income: 100_000.0,
            growth_rate_percent: 10.0,
        };
        // 100,000 * (1.21 - 1) / 0.1 = 210,000
        assert_eq!(human_life_value(&inputs).unwrap(), 210_000.0);
    }

    #[test]
    fn test_human_life_value_rejects_unbounded_career() {
        let inputs = HumanLifeInputs {
            current_age: 0,
            retirement_age: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            human_life_value(&inputs),
            Err(crate::error::IllustrationError::Domain { .. })
        ));
    }

    #[test]
    fn test_human_life_value_requires_working_years() {
        let inputs = HumanLifeInputs {
            current_age: 66,
            retirement_age: 65,
            ..Default::default()
        };
        assert!(human_life_value(&inputs).is_err());
    }
}
