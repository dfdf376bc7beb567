//! Retirement income projection

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::error::IllustrationResult;
use crate::inputs::RetirementInputs;

/// Marginal bracket used to express tax-free income as a taxable equivalent
pub const ASSUMED_TAX_BRACKET: f64 = 0.24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub years_to_retirement: u32,
    pub total_contributions: f64,
    pub accumulated_value: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    /// Pre-tax income needed to match `annual_income` at the assumed bracket
    pub taxable_equivalent: f64,
    /// Income summed over the payout period
    pub total_payout: f64,
}

/// Accumulate contributions to retirement, then pay a level income
///
/// Each year the contribution is added at the start and the balance grows
/// for the full year: `acc = (acc + contribution) * (1 + g)`.
pub fn retirement_income_projection(inputs: &RetirementInputs) -> IllustrationResult<RetirementProjection> {
    inputs.validate()?;

    let years = inputs.years_to_retirement();
    let growth = inputs.growth_rate_percent / 100.0;

    let mut accumulation = 0.0;
    for _ in 0..years {
        accumulation = (accumulation + inputs.annual_contribution) * (1.0 + growth);
    }

    let annual_income = round_currency(accumulation * inputs.payout_rate_percent / 100.0);
    let projection = RetirementProjection {
        years_to_retirement: years,
        total_contributions: inputs.annual_contribution * years as f64,
        accumulated_value: round_currency(accumulation),
        annual_income,
        monthly_income: round_currency(annual_income / 12.0),
        taxable_equivalent: round_currency(annual_income / (1.0 - ASSUMED_TAX_BRACKET)),
        total_payout: annual_income * inputs.payout_years as f64,
    };

    log::debug!(
        "retirement: {} years of {} at {}% -> {} accumulated, {}/yr income",
        years,
        inputs.annual_contribution,
        inputs.growth_rate_percent,
        projection.accumulated_value,
        projection.annual_income
    );

    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_year() {
        let inputs = RetirementInputs {
            current_age: 64,
            retirement_age: 65,
            annual_contribution: 10_000.0,
            growth_rate_percent: 10.0,
            payout_rate_percent: 5.0,
            payout_years: 20,
        };
        let projection = retirement_income_projection(&inputs).unwrap();

        assert_eq!(projection.accumulated_value, 11_000.0);
        assert_eq!(projection.annual_income, 550.0);
        assert_eq!(projection.monthly_income, 46.0); // round(45.83)
        assert_eq!(projection.taxable_equivalent, 724.0); // round(723.68)
        assert_eq!(projection.total_payout, 11_000.0);
    }

    #[test]
    fn test_matches_annuity_due_closed_form() {
        let inputs = RetirementInputs::default();
        let projection = retirement_income_projection(&inputs).unwrap();

        let g: f64 = 0.065;
        let n = 20;
        let closed_form = 10_000.0 * ((1.0 + g).powi(n) - 1.0) / g * (1.0 + g);
        assert_relative_eq!(projection.accumulated_value, closed_form.round(), epsilon = 1.0);
        assert_eq!(projection.total_contributions, 200_000.0);
    }

    #[test]
    fn test_zero_growth() {
        let inputs = RetirementInputs {
            growth_rate_percent: 0.0,
            ..Default::default()
        };
        let projection = retirement_income_projection(&inputs).unwrap();
        assert_eq!(projection.accumulated_value, 200_000.0);
        assert_eq!(projection.annual_income, 9_000.0);
    }

    #[test]
    fn test_retirement_before_current_age_rejected() {
        let inputs = RetirementInputs {
            current_age: 65,
            retirement_age: 65,
            ..Default::default()
        };
        assert!(retirement_income_projection(&inputs).is_err());

        let no_payout = RetirementInputs { payout_years: 0, ..Default::default() };
        assert!(retirement_income_projection(&no_payout).is_err());

        let endless = RetirementInputs { current_age: 0, retirement_age: u32::MAX, ..Default::default() };
        assert!(retirement_income_projection(&endless).is_err());
    }
}
