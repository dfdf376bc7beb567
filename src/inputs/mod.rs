//! Calculator inputs and the guards applied to them before computation

mod data;
pub mod guard;

pub use data::{
    AnnuityInputs, CoverageInputs, FundingLevel, Gender, HumanLifeInputs, IulCreditInputs,
    PremiumInputs, RetirementInputs, DEFAULT_GROWTH_RATE_PERCENT, DEFAULT_PAYOUT_RATE_PERCENT,
    DEFAULT_PAYOUT_YEARS,
};
pub use guard::{clamp, SliderBounds};
