//! Funding-level comparison for cash value life policies

use serde::{Deserialize, Serialize};

use super::rounding::round_currency;
use crate::assumptions::FundingTable;
use crate::error::IllustrationResult;
use crate::inputs::{guard, FundingLevel};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxFundingProjection {
    pub level: FundingLevel,
    pub premium: f64,
    pub cash_value_year_10: f64,
    pub cash_value_year_20: f64,
    pub death_benefit: f64,
}

/// Scale the base annual premium by the table multipliers for `level`
pub fn max_funding_projection(
    base_annual_premium: f64,
    level: FundingLevel,
    table: &FundingTable,
) -> IllustrationResult<MaxFundingProjection> {
    guard::require_non_negative("base_annual_premium", base_annual_premium)?;
    let m = table.for_level(level);

    Ok(MaxFundingProjection {
        level,
        premium: round_currency(base_annual_premium * m.premium),
        cash_value_year_10: round_currency(base_annual_premium * m.cash_value_year_10),
        cash_value_year_20: round_currency(base_annual_premium * m.cash_value_year_20),
        death_benefit: round_currency(base_annual_premium * m.death_benefit),
    })
}

/// All three funding levels side by side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingComparison {
    pub minimum: MaxFundingProjection,
    pub target: MaxFundingProjection,
    pub max: MaxFundingProjection,
    /// Year-20 cash value gained by funding at max instead of minimum
    pub cash_value_advantage: f64,
}

pub fn max_funding_comparison(base_annual_premium: f64, table: &FundingTable) -> IllustrationResult<FundingComparison> {
    let minimum = max_funding_projection(base_annual_premium, FundingLevel::Minimum, table)?;
    let target = max_funding_projection(base_annual_premium, FundingLevel::Target, table)?;
    let max = max_funding_projection(base_annual_premium, FundingLevel::Max, table)?;

    Ok(FundingComparison {
        minimum,
        target,
        max,
        cash_value_advantage: max.cash_value_year_20 - minimum.cash_value_year_20,
    })
}
