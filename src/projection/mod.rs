//! Calculator formulas and the engine that runs them

mod annuity;
mod coverage;
mod crediting;
mod engine;
mod funding;
mod premium;
mod result;
mod retirement;
mod rounding;
mod whole_life;

pub use annuity::{fixed_annuity_for_term, fixed_annuity_future_value, AnnuityProjection};
pub use coverage::{coverage_gap, coverage_need, human_life_value, CoverageNeed};
pub use crediting::{
    credit_history, iul_credited_rate, summarize_history, CreditedYear, CreditingMethod, CreditingSummary,
};
pub use engine::{IllustrationRequest, ProjectionEngine};
pub use funding::{max_funding_comparison, max_funding_projection, FundingComparison, MaxFundingProjection};
pub use premium::{estimate_monthly_premium, premium_breakdown, PremiumBreakdown};
pub use result::ProjectionResult;
pub use retirement::{retirement_income_projection, RetirementProjection, ASSUMED_TAX_BRACKET};
pub use rounding::round_currency;
pub use whole_life::{cash_value_rate, cash_value_schedule, whole_life_cash_value, WholeLifeProjection};
