//! Illustrative term pricing factors

use serde::{Deserialize, Serialize};

use crate::error::{IllustrationError, IllustrationResult};
use crate::inputs::Gender;

/// Multiplicative factors behind the monthly premium estimate
///
/// monthly = coverage / 1000 * base(gender) * age_mult * smoker_mult * term_mult
/// where age_mult = 1 + (age - pivot_age) * age_multiplier_slope and
/// term_mult = 1 + (term - pivot_term_years) * term_multiplier_slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateAssumptions {
    /// Monthly rate per $1000 of coverage for male insureds
    pub base_rate_per_thousand: f64,
    /// Monthly rate per $1000 of coverage for female insureds
    pub female_rate_per_thousand: f64,
    pub age_multiplier_slope: f64,
    pub pivot_age: u32,
    pub smoker_multiplier: f64,
    pub term_multiplier_slope: f64,
    pub pivot_term_years: u32,
}

impl Default for RateAssumptions {
    fn default() -> Self {
        Self {
            base_rate_per_thousand: 0.10,
            female_rate_per_thousand: 0.08,
            age_multiplier_slope: 0.05,
            pivot_age: 25,
            smoker_multiplier: 2.5,
            term_multiplier_slope: 0.02,
            pivot_term_years: 10,
        }
    }
}

impl RateAssumptions {
    /// All factors must be finite and non-negative
    pub fn validate(&self) -> IllustrationResult<()> {
        let factors = [
            ("base_rate_per_thousand", self.base_rate_per_thousand),
            ("female_rate_per_thousand", self.female_rate_per_thousand),
            ("age_multiplier_slope", self.age_multiplier_slope),
            ("smoker_multiplier", self.smoker_multiplier),
            ("term_multiplier_slope", self.term_multiplier_slope),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(IllustrationError::domain(field, format!("must be a non-negative factor, got {}", value)));
            }
        }
        Ok(())
    }

    pub fn base_rate(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.base_rate_per_thousand,
            Gender::Female => self.female_rate_per_thousand,
        }
    }

    /// Never negative, so young issue ages cannot flip the premium sign
    pub fn age_multiplier(&self, age: u32) -> f64 {
        (1.0 + (age as f64 - self.pivot_age as f64) * self.age_multiplier_slope).max(0.0)
    }

    pub fn smoker_multiplier(&self, smoker: bool) -> f64 {
        if smoker { self.smoker_multiplier } else { 1.0 }
    }

    pub fn term_multiplier(&self, term_years: u32) -> f64 {
        (1.0 + (term_years as f64 - self.pivot_term_years as f64) * self.term_multiplier_slope).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_factors() {
        let rates = RateAssumptions::default();

        assert_eq!(rates.base_rate(Gender::Male), 0.10);
        assert_eq!(rates.base_rate(Gender::Female), 0.08);
        assert_relative_eq!(rates.age_multiplier(35), 1.5, epsilon = 1e-12);
        assert_relative_eq!(rates.age_multiplier(25), 1.0, epsilon = 1e-12);
        assert_relative_eq!(rates.term_multiplier(20), 1.2, epsilon = 1e-12);
        assert_eq!(rates.smoker_multiplier(true), 2.5);
        assert_eq!(rates.smoker_multiplier(false), 1.0);
    }

    #[test]
    fn test_multiplier_never_negative() {
        let rates = RateAssumptions {
            age_multiplier_slope: 0.2,
            ..Default::default()
        };
        assert_eq!(rates.age_multiplier(18), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_factor() {
        let rates = RateAssumptions {
            smoker_multiplier: -1.0,
            ..Default::default()
        };
        assert!(rates.validate().is_err());
        assert!(RateAssumptions::default().validate().is_ok());
    }
}
