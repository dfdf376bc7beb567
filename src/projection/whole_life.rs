//! Whole life cash value illustration

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::error::IllustrationResult;
use crate::inputs::guard;

/// Cash value after `years` of level monthly premiums
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WholeLifeProjection {
    pub years: u32,
    pub monthly_premium: f64,
    pub total_premiums: f64,
    pub cash_value_rate: f64,
    pub cash_value: f64,
}

/// Share of cumulative premium available as cash value
///
/// Step function: under 10 years 35%, 10 through 19 years 55%, 20 years and
/// later 75%. Years 10 and 20 fall into the higher bucket.
pub fn cash_value_rate(years: u32) -> f64 {
    if years < 10 {
        0.35
    } else if years < 20 {
        0.55
    } else {
        0.75
    }
}

pub fn whole_life_cash_value(monthly_premium: f64, years: u32) -> IllustrationResult<WholeLifeProjection> {
    guard::require_non_negative("monthly_premium", monthly_premium)?;
    guard::require_positive("years", years)?;
    guard::require_in_range("years", years, 1, guard::MAX_PROJECTION_YEARS)?;

    let total_premiums = monthly_premium * 12.0 * years as f64;
    let rate = cash_value_rate(years);

    Ok(WholeLifeProjection {
        years,
        monthly_premium,
        total_premiums,
        cash_value_rate: rate,
        cash_value: round_currency(total_premiums * rate),
    })
}

/// Projection for every policy year from 1 through `years`
pub fn cash_value_schedule(monthly_premium: f64, years: u32) -> IllustrationResult<Vec<WholeLifeProjection>> {
    guard::require_positive("years", years)?;
    guard::require_in_range("years", years, 1, guard::MAX_PROJECTION_YEARS)?;
    (1..=years)
        .map(|year| whole_life_cash_value(monthly_premium, year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(cash_value_rate(1), 0.35);
        assert_eq!(cash_value_rate(9), 0.35);
        assert_eq!(cash_value_rate(10), 0.55);
        assert_eq!(cash_value_rate(19), 0.55);
        assert_eq!(cash_value_rate(20), 0.75);
        assert_eq!(cash_value_rate(40), 0.75);
    }

    #[test]
    fn test_year_nine_versus_ten() {
        let nine = whole_life_cash_value(200.0, 9).unwrap();
        let ten = whole_life_cash_value(200.0, 10).unwrap();

        assert_eq!(nine.total_premiums, 21_600.0);
        assert_eq!(nine.cash_value, 7_560.0); // 21,600 * 0.35
        assert_eq!(ten.total_premiums, 24_000.0);
        assert_eq!(ten.cash_value, 13_200.0); // 24,000 * 0.55
    }

    #[test]
    fn test_zero_years_rejected() {
        assert!(whole_life_cash_value(200.0, 0).is_err());
        assert!(whole_life_cash_value(-5.0, 10).is_err());
    }

    #[test]
    fn test_schedule() {
        let schedule = cash_value_schedule(100.0, 25).unwrap();

        assert_eq!(schedule.len(), 25);
        assert_eq!(schedule[0].years, 1);
        assert_eq!(schedule[24].cash_value, 22_500.0); // 100 * 12 * 25 * 0.75
        assert!(cash_value_schedule(100.0, 0).is_err());
        assert!(cash_value_schedule(100.0, u32::MAX).is_err());
    }
}
