//! Fixed annuity compounding

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::assumptions::AnnuityTermTable;
use crate::error::{IllustrationError, IllustrationResult};
use crate::inputs::guard;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityProjection {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    /// Rounded once, after compounding every year
    pub future_value: f64,
    pub interest_earned: f64,
}

/// Annual compounding: FV = round(P * (1 + r/100)^years)
///
/// Zero years is the identity, so a zero-length illustration shows the deposit.
pub fn fixed_annuity_future_value(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
) -> IllustrationResult<AnnuityProjection> {
    guard::require_non_negative("principal", principal)?;
    guard::require_in_range("annual_rate_percent", annual_rate_percent, 0.0, 100.0)?;
    guard::require_in_range("years", years, 0, guard::MAX_PROJECTION_YEARS)?;

    let growth = (1.0 + annual_rate_percent / 100.0).powi(years as i32);
    let future_value = round_currency(principal * growth);

    Ok(AnnuityProjection {
        principal,
        annual_rate_percent,
        years,
        future_value,
        interest_earned: future_value - principal,
    })
}

/// Illustrate a deposit at the guaranteed rate offered for `term_years`
pub fn fixed_annuity_for_term(
    principal: f64,
    term_years: u32,
    terms: &AnnuityTermTable,
) -> IllustrationResult<AnnuityProjection> {
    let offered = terms.rate_for(term_years)?;
    guard::require_non_negative("principal", principal)?;
    if principal < offered.min_deposit {
        return Err(IllustrationError::domain(
            "principal",
            format!("{}-year term requires at least {} deposited, got {}", term_years, offered.min_deposit, principal),
        ));
    }
    fixed_annuity_future_value(principal, offered.rate_percent, term_years)
}
