//! Indexed universal life interest crediting
//!
//! Two crediting rules are in use across the illustrations and they disagree
//! on whether participation applies, so both are exposed and the caller picks.

use serde::{Deserialize, Serialize};

use crate::error::IllustrationResult;
use crate::inputs::{guard, IulCreditInputs};

/// Rule used to turn an index return into a credited rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditingMethod {
    /// Negative return credits the floor, otherwise the return capped at the cap.
    /// Participation is not applied.
    #[default]
    FloorFirst,
    /// Return scaled by participation, then capped, then floored
    ParticipationThenClamp,
}

impl CreditingMethod {
    pub const ALL: [CreditingMethod; 2] = [CreditingMethod::FloorFirst, CreditingMethod::ParticipationThenClamp];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditingMethod::FloorFirst => "floor_first",
            CreditingMethod::ParticipationThenClamp => "participation_then_clamp",
        }
    }
}

impl std::str::FromStr for CreditingMethod {
    type Err = crate::error::IllustrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "floor_first" => Ok(CreditingMethod::FloorFirst),
            "participation_then_clamp" => Ok(CreditingMethod::ParticipationThenClamp),
            other => Err(crate::error::IllustrationError::domain(
                "crediting_method",
                format!("unknown crediting method '{}'", other),
            )),
        }
    }
}

/// Credited rate in percent for one period
pub fn iul_credited_rate(inputs: &IulCreditInputs, method: CreditingMethod) -> IllustrationResult<f64> {
    inputs.validate()?;
    if inputs.floor_percent > inputs.cap_percent {
        log::warn!("floor {}% above cap {}%", inputs.floor_percent, inputs.cap_percent);
    }
    Ok(credit(inputs, method))
}

fn credit(inputs: &IulCreditInputs, method: CreditingMethod) -> f64 {
    let index_return = inputs.index_return_percent;
    match method {
        CreditingMethod::FloorFirst => {
            if index_return < 0.0 {
                inputs.floor_percent
            } else {
                index_return.min(inputs.cap_percent)
            }
        }
        CreditingMethod::ParticipationThenClamp => (index_return * inputs.participation_percent / 100.0)
            .min(inputs.cap_percent)
            .max(inputs.floor_percent),
    }
}

/// One year of an indexed account compared against direct index exposure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditedYear {
    /// Policy year, starting at 1
    pub year: u32,
    pub index_return: f64,
    pub credited_rate: f64,
    /// Indexed account value at year end
    pub account_value: f64,
    /// Value of the same deposit fully exposed to the index
    pub market_value: f64,
}

/// Compound `start_value` through a sequence of annual index returns (percent)
///
/// The index return in `terms` is ignored; cap, floor and participation apply
/// to every year.
pub fn credit_history(
    start_value: f64,
    returns: &[f64],
    terms: &IulCreditInputs,
    method: CreditingMethod,
) -> IllustrationResult<Vec<CreditedYear>> {
    guard::require_non_negative("start_value", start_value)?;

    let mut account_value = start_value;
    let mut market_value = start_value;
    let mut history = Vec::with_capacity(returns.len());

    for (i, &index_return) in returns.iter().enumerate() {
        let period = terms.with_index_return(index_return);
        period.validate()?;
        let credited_rate = credit(&period, method);

        account_value *= 1.0 + credited_rate / 100.0;
        market_value = (market_value * (1.0 + index_return / 100.0)).max(0.0);

        history.push(CreditedYear {
            year: i as u32 + 1,
            index_return,
            credited_rate,
            account_value,
            market_value,
        });
    }

    Ok(history)
}

/// Outcome counts and ending values for a crediting history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditingSummary {
    pub years: u32,
    pub years_at_floor: u32,
    pub years_at_cap: u32,
    pub final_account_value: f64,
    pub final_market_value: f64,
}

pub fn summarize_history(history: &[CreditedYear], terms: &IulCreditInputs, start_value: f64) -> CreditingSummary {
    let years_at_floor = history
        .iter()
        .filter(|y| y.index_return < 0.0 && y.credited_rate == terms.floor_percent)
        .count() as u32;
    let years_at_cap = history
        .iter()
        .filter(|y| y.index_return > 0.0 && y.credited_rate == terms.cap_percent)
        .count() as u32;

    CreditingSummary {
        years: history.len() as u32,
        years_at_floor,
        years_at_cap,
        final_account_value: history.last().map(|y| y.account_value).unwrap_or(start_value),
        final_market_value: history.last().map(|y| y.market_value).unwrap_or(start_value),
    }
}
