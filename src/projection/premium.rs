//! Illustrative term premium estimate

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::assumptions::RateAssumptions;
use crate::error::IllustrationResult;
use crate::inputs::PremiumInputs;

/// Factors behind a premium estimate, kept for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub base_rate: f64,
    pub age_multiplier: f64,
    pub smoker_multiplier: f64,
    pub term_multiplier: f64,
    /// Rounded monthly premium
    pub monthly_premium: f64,
    pub annual_premium: f64,
}

/// Full premium calculation with the factors that produced it
pub fn premium_breakdown(inputs: &PremiumInputs, rates: &RateAssumptions) -> IllustrationResult<PremiumBreakdown> {
    inputs.validate()?;

    let base_rate = rates.base_rate(inputs.gender);
    let age_multiplier = rates.age_multiplier(inputs.age);
    let smoker_multiplier = rates.smoker_multiplier(inputs.smoker);
    let term_multiplier = rates.term_multiplier(inputs.term_years);

    let monthly_premium = round_currency(
        inputs.coverage_amount / 1000.0 * base_rate * age_multiplier * smoker_multiplier * term_multiplier,
    );

    log::debug!(
        "premium: age={} gender={} smoker={} coverage={} term={} -> {}/mo",
        inputs.age,
        inputs.gender.as_str(),
        inputs.smoker,
        inputs.coverage_amount,
        inputs.term_years,
        monthly_premium
    );

    Ok(PremiumBreakdown {
        base_rate,
        age_multiplier,
        smoker_multiplier,
        term_multiplier,
        monthly_premium,
        annual_premium: monthly_premium * 12.0,
    })
}

/// Rounded monthly premium for the given inputs
pub fn estimate_monthly_premium(inputs: &PremiumInputs, rates: &RateAssumptions) -> IllustrationResult<f64> {
    premium_breakdown(inputs, rates).map(|b| b.monthly_premium)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IllustrationError;
    use crate::inputs::Gender;

    fn rates() -> RateAssumptions {
        RateAssumptions::default()
    }

    #[test]
    fn test_male_35_nonsmoker_20_year() {
        let inputs = PremiumInputs {
            age: 35,
            gender: Gender::Male,
            smoker: false,
            coverage_amount: 250_000.0,
            term_years: 20,
        };
        let breakdown = premium_breakdown(&inputs, &rates()).unwrap();

        // 250 * 0.10 * 1.5 * 1 * 1.2 = 45
        assert_eq!(breakdown.monthly_premium, 45.0);
        assert_eq!(breakdown.annual_premium, 540.0);
    }

    #[test]
    fn test_female_rate_lower() {
        let male = PremiumInputs::default();
        let female = PremiumInputs { gender: Gender::Female, ..male };

        let m = estimate_monthly_premium(&male, &rates()).unwrap();
        let f = estimate_monthly_premium(&female, &rates()).unwrap();
        assert!(f < m);
        // 250 * 0.08 * 1.5 * 1.2 = 36
        assert_eq!(f, 36.0);
    }

    #[test]
    fn test_smoker_strictly_more() {
        let base = PremiumInputs::default();
        let smoker = PremiumInputs { smoker: true, ..base };

        let non = estimate_monthly_premium(&base, &rates()).unwrap();
        let yes = estimate_monthly_premium(&smoker, &rates()).unwrap();
        assert!(yes > non);
        assert_eq!(yes, 113.0); // round(112.5)
    }

    #[test]
    fn test_monotonic_in_age_and_coverage() {
        let mut prev = 0.0;
        for age in 18..=100 {
            let inputs = PremiumInputs { age, ..Default::default() };
            let premium = estimate_monthly_premium(&inputs, &rates()).unwrap();
            assert!(premium >= prev, "premium fell at age {}", age);
            prev = premium;
        }

        let mut prev = 0.0;
        for step in 0..=80 {
            let inputs = PremiumInputs {
                coverage_amount: 100_000.0 + step as f64 * 25_000.0,
                ..Default::default()
            };
            let premium = estimate_monthly_premium(&inputs, &rates()).unwrap();
            assert!(premium >= prev);
            prev = premium;
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let inputs = PremiumInputs { term_years: 0, ..Default::default() };
        let err = estimate_monthly_premium(&inputs, &rates()).unwrap_err();
        assert!(matches!(err, IllustrationError::Domain { .. }));
    }

    #[test]
    fn test_idempotent() {
        let inputs = PremiumInputs { age: 52, smoker: true, ..Default::default() };
        let a = premium_breakdown(&inputs, &rates()).unwrap();
        let b = premium_breakdown(&inputs, &rates()).unwrap();
        assert_eq!(a, b);
    }
}
