//! Calculator input values

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::guard::{self, clamp_logged, clamp_whole_logged};
use crate::error::{IllustrationError, IllustrationResult};

/// Default growth rate for retirement accumulation (percent)
pub const DEFAULT_GROWTH_RATE_PERCENT: f64 = 6.5;
/// Default payout rate applied to the accumulated value (percent)
pub const DEFAULT_PAYOUT_RATE_PERCENT: f64 = 4.5;
/// Default number of years income is paid
pub const DEFAULT_PAYOUT_YEARS: u32 = 25;

fn default_growth_rate() -> f64 { DEFAULT_GROWTH_RATE_PERCENT }
fn default_payout_rate() -> f64 { DEFAULT_PAYOUT_RATE_PERCENT }
fn default_payout_years() -> u32 { DEFAULT_PAYOUT_YEARS }

/// Gender of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = IllustrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(IllustrationError::domain("gender", format!("unknown gender '{}'", other))),
        }
    }
}

/// Inputs for a term premium estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumInputs {
    /// Issue age, 18 to 100
    pub age: u32,
    pub gender: Gender,
    pub smoker: bool,
    /// Face amount in dollars
    pub coverage_amount: f64,
    /// Level term period in years
    pub term_years: u32,
}

impl Default for PremiumInputs {
    fn default() -> Self {
        Self {
            age: 35,
            gender: Gender::Male,
            smoker: false,
            coverage_amount: 250_000.0,
            term_years: 20,
        }
    }
}

impl PremiumInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        guard::require_in_range("age", self.age, 18, 100)?;
        guard::require_non_negative("coverage_amount", self.coverage_amount)?;
        guard::require_positive("term_years", self.term_years)?;
        Ok(())
    }

    /// Copy with every field pulled into its slider bounds
    pub fn clamped(&self) -> Self {
        Self {
            age: clamp_whole_logged("age", self.age, &guard::AGE),
            coverage_amount: clamp_logged("coverage_amount", self.coverage_amount, &guard::COVERAGE),
            term_years: clamp_whole_logged("term_years", self.term_years, &guard::TERM_YEARS),
            ..*self
        }
    }
}

/// Inputs for a needs-based coverage calculation (whole dollars)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageInputs {
    pub annual_income: f64,
    pub years_to_replace: u32,
    pub mortgage_balance: f64,
    pub other_debts: f64,
    pub college_fund_target: f64,
    pub existing_savings: f64,
    pub existing_coverage: f64,
}

impl Default for CoverageInputs {
    fn default() -> Self {
        Self {
            annual_income: 75_000.0,
            years_to_replace: 10,
            mortgage_balance: 250_000.0,
            other_debts: 25_000.0,
            college_fund_target: 100_000.0,
            existing_savings: 50_000.0,
            existing_coverage: 0.0,
        }
    }
}

impl CoverageInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        guard::require_non_negative("annual_income", self.annual_income)?;
        guard::require_non_negative("mortgage_balance", self.mortgage_balance)?;
        guard::require_non_negative("other_debts", self.other_debts)?;
        guard::require_non_negative("college_fund_target", self.college_fund_target)?;
        guard::require_non_negative("existing_savings", self.existing_savings)?;
        guard::require_non_negative("existing_coverage", self.existing_coverage)?;
        Ok(())
    }

    /// Negative or non-finite currency fields become zero; income is slider-bounded
    pub fn clamped(&self) -> Self {
        let floor_zero = |field: &str, v: f64| clamp_logged(field, v, &guard::SliderBounds::new(0.0, f64::MAX, 0.0));
        Self {
            annual_income: clamp_logged("annual_income", self.annual_income, &guard::ANNUAL_INCOME),
            years_to_replace: clamp_whole_logged("years_to_replace", self.years_to_replace, &guard::PREMIUM_YEARS),
            mortgage_balance: floor_zero("mortgage_balance", self.mortgage_balance),
            other_debts: floor_zero("other_debts", self.other_debts),
            college_fund_target: floor_zero("college_fund_target", self.college_fund_target),
            existing_savings: floor_zero("existing_savings", self.existing_savings),
            existing_coverage: floor_zero("existing_coverage", self.existing_coverage),
        }
    }
}

/// Inputs for a fixed annuity growth illustration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityInputs {
    pub principal: f64,
    /// Annual guaranteed rate in percent (5.0 = 5%)
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Default for AnnuityInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate_percent: 5.0,
            term_years: 5,
        }
    }
}

impl AnnuityInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        guard::require_non_negative("principal", self.principal)?;
        guard::require_in_range("annual_rate_percent", self.annual_rate_percent, 0.0, 100.0)?;
        guard::require_positive("term_years", self.term_years)?;
        Ok(())
    }

    pub fn clamped(&self) -> Self {
        Self {
            principal: clamp_logged("principal", self.principal, &guard::ANNUITY_PRINCIPAL),
            annual_rate_percent: clamp_logged("annual_rate_percent", self.annual_rate_percent, &guard::ANNUITY_RATE),
            term_years: clamp_whole_logged("term_years", self.term_years, &guard::ANNUITY_YEARS),
        }
    }
}

/// Inputs for one indexed universal life crediting period (all percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IulCreditInputs {
    /// Index return for the period, may be negative
    pub index_return_percent: f64,
    pub cap_percent: f64,
    pub floor_percent: f64,
    pub participation_percent: f64,
}

impl Default for IulCreditInputs {
    fn default() -> Self {
        Self {
            index_return_percent: 8.0,
            cap_percent: 10.0,
            floor_percent: 0.0,
            participation_percent: 100.0,
        }
    }
}

impl IulCreditInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        guard::require_finite("index_return_percent", self.index_return_percent)?;
        guard::require_non_negative("cap_percent", self.cap_percent)?;
        guard::require_non_negative("floor_percent", self.floor_percent)?;
        guard::require_non_negative("participation_percent", self.participation_percent)?;
        Ok(())
    }

    pub fn clamped(&self) -> Self {
        Self {
            index_return_percent: clamp_logged("index_return_percent", self.index_return_percent, &guard::INDEX_RETURN),
            cap_percent: clamp_logged("cap_percent", self.cap_percent, &guard::CAP),
            floor_percent: clamp_logged("floor_percent", self.floor_percent, &guard::FLOOR),
            participation_percent: clamp_logged("participation_percent", self.participation_percent, &guard::PARTICIPATION),
        }
    }

    /// Same crediting terms applied to a different index return
    pub fn with_index_return(&self, index_return_percent: f64) -> Self {
        Self { index_return_percent, ..*self }
    }
}

/// Inputs for a retirement income projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_contribution: f64,
    #[serde(default = "default_growth_rate")]
    pub growth_rate_percent: f64,
    #[serde(default = "default_payout_rate")]
    pub payout_rate_percent: f64,
    #[serde(default = "default_payout_years")]
    pub payout_years: u32,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: 45,
            retirement_age: 65,
            annual_contribution: 10_000.0,
            growth_rate_percent: DEFAULT_GROWTH_RATE_PERCENT,
            payout_rate_percent: DEFAULT_PAYOUT_RATE_PERCENT,
            payout_years: DEFAULT_PAYOUT_YEARS,
        }
    }
}

impl RetirementInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        if self.retirement_age <= self.current_age {
            return Err(IllustrationError::domain(
                "retirement_age",
                format!("must be after current age {}, got {}", self.current_age, self.retirement_age),
            ));
        }
        guard::require_in_range("years_to_retirement", self.years_to_retirement(), 1, guard::MAX_PROJECTION_YEARS)?;
        guard::require_non_negative("annual_contribution", self.annual_contribution)?;
        guard::require_finite("growth_rate_percent", self.growth_rate_percent)?;
        if self.growth_rate_percent <= -100.0 {
            return Err(IllustrationError::domain("growth_rate_percent", "must be greater than -100"));
        }
        guard::require_in_range("payout_rate_percent", self.payout_rate_percent, 0.0, 100.0)?;
        guard::require_positive("payout_years", self.payout_years)?;
        Ok(())
    }

    pub fn clamped(&self) -> Self {
        let current_age = clamp_whole_logged("current_age", self.current_age, &guard::AGE);
        // retirement slider never sits at or below the current age
        let retirement_age = clamp_whole_logged("retirement_age", self.retirement_age, &guard::RETIREMENT_AGE)
            .max(current_age + 1);
        Self {
            current_age,
            retirement_age,
            annual_contribution: clamp_logged("annual_contribution", self.annual_contribution, &guard::CONTRIBUTION),
            growth_rate_percent: clamp_logged("growth_rate_percent", self.growth_rate_percent, &guard::GROWTH_RATE),
            payout_rate_percent: clamp_logged("payout_rate_percent", self.payout_rate_percent, &guard::PAYOUT_RATE),
            payout_years: clamp_whole_logged("payout_years", self.payout_years, &guard::PAYOUT_YEARS),
        }
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

/// Inputs for a human life value estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanLifeInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_income: f64,
    /// Expected annual income growth in percent
    pub growth_rate_percent: f64,
}

impl Default for HumanLifeInputs {
    fn default() -> Self {
        Self {
            current_age: 35,
            retirement_age: 65,
            annual_income: 75_000.0,
            growth_rate_percent: 3.0,
        }
    }
}

impl HumanLifeInputs {
    pub fn validate(&self) -> IllustrationResult<()> {
        if self.retirement_age <= self.current_age {
            return Err(IllustrationError::domain(
                "retirement_age",
                format!("must be after current age {}, got {}", self.current_age, self.retirement_age),
            ));
        }
        guard::require_in_range("working_years", self.working_years(), 1, guard::MAX_PROJECTION_YEARS)?;
        guard::require_non_negative("annual_income", self.annual_income)?;
        guard::require_finite("growth_rate_percent", self.growth_rate_percent)?;
        if self.growth_rate_percent <= -100.0 {
            return Err(IllustrationError::domain("growth_rate_percent", "must be greater than -100"));
        }
        Ok(())
    }

    pub fn clamped(&self) -> Self {
        let current_age = clamp_whole_logged("current_age", self.current_age, &guard::AGE);
        let retirement_age = clamp_whole_logged("retirement_age", self.retirement_age, &guard::RETIREMENT_AGE)
            .max(current_age + 1);
        Self {
            current_age,
            retirement_age,
            annual_income: clamp_logged("annual_income", self.annual_income, &guard::ANNUAL_INCOME),
            growth_rate_percent: clamp_logged("growth_rate_percent", self.growth_rate_percent, &guard::GROWTH_RATE),
        }
    }

    pub fn working_years(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

/// How heavily a cash value policy is funded relative to its base premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingLevel {
    /// Premium just sufficient to keep the policy in force
    Minimum,
    /// Carrier's target premium
    Target,
    /// Highest premium before the contract becomes a MEC
    Max,
}

impl FundingLevel {
    pub const ALL: [FundingLevel; 3] = [FundingLevel::Minimum, FundingLevel::Target, FundingLevel::Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            FundingLevel::Minimum => "minimum",
            FundingLevel::Target => "target",
            FundingLevel::Max => "max",
        }
    }
}

impl FromStr for FundingLevel {
    type Err = IllustrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimum" | "min" => Ok(FundingLevel::Minimum),
            "target" => Ok(FundingLevel::Target),
            "max" | "maximum" => Ok(FundingLevel::Max),
            other => Err(IllustrationError::domain("funding_level", format!("unknown funding level '{}'", other))),
        }
    }
}
