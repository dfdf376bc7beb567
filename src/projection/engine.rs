//! Illustration engine: runs calculator requests against one set of assumptions

use serde::{Deserialize, Serialize};

use super::annuity::{self, AnnuityProjection};
use super::coverage;
use super::crediting::{self, CreditingMethod};
use super::funding::{self, MaxFundingProjection};
use super::premium;
use super::result::ProjectionResult;
use super::retirement::{self, RetirementProjection};
use super::whole_life::{self, WholeLifeProjection};
use crate::assumptions::{Assumptions, StateRequirement, TermAnnuityRate, UsState};
use crate::error::IllustrationResult;
use crate::inputs::{
    guard, AnnuityInputs, CoverageInputs, FundingLevel, HumanLifeInputs, IulCreditInputs, PremiumInputs,
    RetirementInputs,
};
use crate::presentation::{describe_delta, format_compact_currency, format_delta};

/// One calculator invocation, as produced by a page or a JSON request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum IllustrationRequest {
    Premium(PremiumInputs),
    WholeLife {
        monthly_premium: f64,
        years: u32,
    },
    FixedAnnuity(AnnuityInputs),
    /// Fixed annuity at the guaranteed rate offered for a term
    TermAnnuity {
        principal: f64,
        term_years: u32,
    },
    IulCredit {
        terms: IulCreditInputs,
        #[serde(default)]
        method: CreditingMethod,
    },
    /// Crediting applied to a run of annual index returns
    CreditHistory {
        start_value: f64,
        terms: IulCreditInputs,
        #[serde(default)]
        method: CreditingMethod,
        /// Returns in percent; the sample index history when absent
        #[serde(default)]
        returns: Option<Vec<f64>>,
    },
    /// A single funding level, or all three compared when `level` is absent
    MaxFunding {
        base_annual_premium: f64,
        #[serde(default)]
        level: Option<FundingLevel>,
    },
    RetirementIncome(RetirementInputs),
    CoverageGap(CoverageInputs),
    HumanLifeValue(HumanLifeInputs),
    StateRequirement {
        state: String,
    },
    TermRate {
        term_years: u32,
    },
}

impl IllustrationRequest {
    pub fn name(&self) -> &'static str {
        match self {
            IllustrationRequest::Premium(_) => "premium",
            IllustrationRequest::WholeLife { .. } => "whole_life",
            IllustrationRequest::FixedAnnuity(_) => "fixed_annuity",
            IllustrationRequest::TermAnnuity { .. } => "term_annuity",
            IllustrationRequest::IulCredit { .. } => "iul_credit",
            IllustrationRequest::CreditHistory { .. } => "credit_history",
            IllustrationRequest::MaxFunding { .. } => "max_funding",
            IllustrationRequest::RetirementIncome(_) => "retirement_income",
            IllustrationRequest::CoverageGap(_) => "coverage_gap",
            IllustrationRequest::HumanLifeValue(_) => "human_life_value",
            IllustrationRequest::StateRequirement { .. } => "state_requirement",
            IllustrationRequest::TermRate { .. } => "term_rate",
        }
    }

    /// Same calculator with the inputs a page shows on first load
    pub fn with_defaults(&self) -> Self {
        match self {
            IllustrationRequest::Premium(_) => IllustrationRequest::Premium(PremiumInputs::default()),
            IllustrationRequest::WholeLife { .. } => IllustrationRequest::WholeLife {
                monthly_premium: 200.0,
                years: 20,
            },
            IllustrationRequest::FixedAnnuity(_) => IllustrationRequest::FixedAnnuity(AnnuityInputs::default()),
            IllustrationRequest::TermAnnuity { .. } => IllustrationRequest::TermAnnuity {
                principal: 100_000.0,
                term_years: 5,
            },
            IllustrationRequest::IulCredit { method, .. } => IllustrationRequest::IulCredit {
                terms: IulCreditInputs::default(),
                method: *method,
            },
            IllustrationRequest::CreditHistory { method, .. } => IllustrationRequest::CreditHistory {
                start_value: 100_000.0,
                terms: IulCreditInputs::default(),
                method: *method,
                returns: None,
            },
            IllustrationRequest::MaxFunding { level, .. } => IllustrationRequest::MaxFunding {
                base_annual_premium: 10_000.0,
                level: *level,
            },
            IllustrationRequest::RetirementIncome(_) => {
                IllustrationRequest::RetirementIncome(RetirementInputs::default())
            }
            IllustrationRequest::CoverageGap(_) => IllustrationRequest::CoverageGap(CoverageInputs::default()),
            IllustrationRequest::HumanLifeValue(_) => {
                IllustrationRequest::HumanLifeValue(HumanLifeInputs::default())
            }
            IllustrationRequest::StateRequirement { .. } => IllustrationRequest::StateRequirement {
                state: UsState::NewYork.name().to_string(),
            },
            IllustrationRequest::TermRate { .. } => IllustrationRequest::TermRate { term_years: 5 },
        }
    }

    /// Pull slider-driven inputs into their declared bounds
    pub fn clamped(&self) -> Self {
        match self {
            IllustrationRequest::Premium(inputs) => IllustrationRequest::Premium(inputs.clamped()),
            IllustrationRequest::WholeLife { monthly_premium, years } => IllustrationRequest::WholeLife {
                monthly_premium: guard::clamp_logged("monthly_premium", *monthly_premium, &guard::MONTHLY_PREMIUM),
                years: guard::clamp_whole_logged("years", *years, &guard::PREMIUM_YEARS),
            },
            IllustrationRequest::FixedAnnuity(inputs) => IllustrationRequest::FixedAnnuity(inputs.clamped()),
            IllustrationRequest::TermAnnuity { principal, term_years } => IllustrationRequest::TermAnnuity {
                principal: guard::clamp_logged("principal", *principal, &guard::ANNUITY_PRINCIPAL),
                term_years: *term_years,
            },
            IllustrationRequest::IulCredit { terms, method } => IllustrationRequest::IulCredit {
                terms: terms.clamped(),
                method: *method,
            },
            IllustrationRequest::CreditHistory { start_value, terms, method, returns } => {
                IllustrationRequest::CreditHistory {
                    start_value: guard::clamp_logged("start_value", *start_value, &guard::ANNUITY_PRINCIPAL),
                    terms: terms.clamped(),
                    method: *method,
                    returns: returns.as_ref().map(|r| {
                        r.iter()
                            .map(|&v| guard::clamp_logged("index_return_percent", v, &guard::INDEX_RETURN))
                            .collect()
                    }),
                }
            }
            IllustrationRequest::MaxFunding { base_annual_premium, level } => IllustrationRequest::MaxFunding {
                base_annual_premium: guard::clamp_logged(
                    "base_annual_premium",
                    *base_annual_premium,
                    &guard::ANNUAL_PREMIUM,
                ),
                level: *level,
            },
            IllustrationRequest::RetirementIncome(inputs) => IllustrationRequest::RetirementIncome(inputs.clamped()),
            IllustrationRequest::CoverageGap(inputs) => IllustrationRequest::CoverageGap(inputs.clamped()),
            IllustrationRequest::HumanLifeValue(inputs) => IllustrationRequest::HumanLifeValue(inputs.clamped()),
            IllustrationRequest::StateRequirement { .. } | IllustrationRequest::TermRate { .. } => self.clone(),
        }
    }
}

/// Main illustration engine
///
/// Holds no mutable state, so one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(Assumptions::default_pricing())
    }
}

impl ProjectionEngine {
    /// Create a new engine with given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn estimate_monthly_premium(&self, inputs: &PremiumInputs) -> IllustrationResult<f64> {
        premium::estimate_monthly_premium(inputs, &self.assumptions.rates)
    }

    pub fn whole_life_cash_value(&self, monthly_premium: f64, years: u32) -> IllustrationResult<WholeLifeProjection> {
        whole_life::whole_life_cash_value(monthly_premium, years)
    }

    pub fn fixed_annuity_future_value(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> IllustrationResult<AnnuityProjection> {
        annuity::fixed_annuity_future_value(principal, annual_rate_percent, years)
    }

    pub fn iul_credited_rate(&self, inputs: &IulCreditInputs, method: CreditingMethod) -> IllustrationResult<f64> {
        crediting::iul_credited_rate(inputs, method)
    }

    pub fn max_funding_projection(
        &self,
        base_annual_premium: f64,
        level: FundingLevel,
    ) -> IllustrationResult<MaxFundingProjection> {
        funding::max_funding_projection(base_annual_premium, level, &self.assumptions.funding)
    }

    pub fn retirement_income_projection(&self, inputs: &RetirementInputs) -> IllustrationResult<RetirementProjection> {
        retirement::retirement_income_projection(inputs)
    }

    pub fn coverage_gap(&self, inputs: &CoverageInputs) -> IllustrationResult<f64> {
        coverage::coverage_gap(inputs)
    }

    pub fn human_life_value(&self, inputs: &HumanLifeInputs) -> IllustrationResult<f64> {
        coverage::human_life_value(inputs)
    }

    pub fn state_requirement(&self, state_name: &str) -> IllustrationResult<StateRequirement> {
        self.assumptions.state_requirement(state_name)
    }

    pub fn term_annuity_rate(&self, term_years: u32) -> IllustrationResult<TermAnnuityRate> {
        self.assumptions.term_annuity_rate(term_years)
    }

    /// Run one request and package its outputs for display
    pub fn illustrate(&self, request: &IllustrationRequest) -> IllustrationResult<ProjectionResult> {
        let mut result = ProjectionResult::new(request.name());

        match request {
            IllustrationRequest::Premium(inputs) => {
                let b = premium::premium_breakdown(inputs, &self.assumptions.rates)?;
                result
                    .insert_currency("monthly_premium", b.monthly_premium)
                    .insert_currency("annual_premium", b.annual_premium)
                    .insert("base_rate", b.base_rate, format!("${:.2} per $1,000", b.base_rate))
                    .insert("age_multiplier", b.age_multiplier, format!("{:.2}x", b.age_multiplier))
                    .insert("smoker_multiplier", b.smoker_multiplier, format!("{:.2}x", b.smoker_multiplier))
                    .insert("term_multiplier", b.term_multiplier, format!("{:.2}x", b.term_multiplier));
            }
            IllustrationRequest::WholeLife { monthly_premium, years } => {
                let p = whole_life::whole_life_cash_value(*monthly_premium, *years)?;
                result
                    .insert_count("years", p.years)
                    .insert_currency("total_premiums", p.total_premiums)
                    .insert_percent("cash_value_rate", p.cash_value_rate * 100.0, 0)
                    .insert_currency("cash_value", p.cash_value);
            }
            IllustrationRequest::FixedAnnuity(inputs) => {
                let p = annuity::fixed_annuity_future_value(
                    inputs.principal,
                    inputs.annual_rate_percent,
                    inputs.term_years,
                )?;
                insert_annuity(&mut result, &p);
            }
            IllustrationRequest::TermAnnuity { principal, term_years } => {
                let offered = self.assumptions.term_annuity_rate(*term_years)?;
                let p = annuity::fixed_annuity_for_term(*principal, *term_years, &self.assumptions.annuity_terms)?;
                insert_annuity(&mut result, &p);
                result.insert_currency("min_deposit", offered.min_deposit);
            }
            IllustrationRequest::IulCredit { terms, method } => {
                let rate = crediting::iul_credited_rate(terms, *method)?;
                result
                    .insert_percent("index_return", terms.index_return_percent, 1)
                    .insert_percent("credited_rate", rate, 2)
                    .insert_text("method", method.as_str());
            }
            IllustrationRequest::CreditHistory { start_value, terms, method, returns } => {
                let returns = match returns {
                    Some(r) => r.clone(),
                    None => self.assumptions.index_history.returns(),
                };
                let history = crediting::credit_history(*start_value, &returns, terms, *method)?;
                let summary = crediting::summarize_history(&history, terms, *start_value);
                let versus_market = summary.final_account_value - summary.final_market_value;

                result
                    .insert_count("years", summary.years)
                    .insert_count("years_at_floor", summary.years_at_floor)
                    .insert_count("years_at_cap", summary.years_at_cap)
                    .insert_currency("final_account_value", summary.final_account_value)
                    .insert_currency("final_market_value", summary.final_market_value)
                    .insert("account_vs_market", versus_market, format_delta(versus_market))
                    .insert_text("method", method.as_str());
                for year in &history {
                    result.insert_percent(&format!("year_{:02}_credited_rate", year.year), year.credited_rate, 2);
                }
            }
            IllustrationRequest::MaxFunding { base_annual_premium, level: Some(level) } => {
                let p = funding::max_funding_projection(*base_annual_premium, *level, &self.assumptions.funding)?;
                insert_funding(&mut result, "", &p);
                result.insert_text("level", level.as_str());
            }
            IllustrationRequest::MaxFunding { base_annual_premium, level: None } => {
                let cmp = funding::max_funding_comparison(*base_annual_premium, &self.assumptions.funding)?;
                for p in [&cmp.minimum, &cmp.target, &cmp.max] {
                    insert_funding(&mut result, &format!("{}_", p.level.as_str()), p);
                }
                result
                    .insert("cash_value_advantage", cmp.cash_value_advantage, format_delta(cmp.cash_value_advantage))
                    .insert_text(
                        "cash_value_advantage_note",
                        describe_delta(cmp.cash_value_advantage, "at max funding"),
                    );
            }
            IllustrationRequest::RetirementIncome(inputs) => {
                let p = retirement::retirement_income_projection(inputs)?;
                result
                    .insert_count("years_to_retirement", p.years_to_retirement)
                    .insert_currency("total_contributions", p.total_contributions)
                    .insert_currency("accumulated_value", p.accumulated_value)
                    .insert_currency("annual_income", p.annual_income)
                    .insert_currency("monthly_income", p.monthly_income)
                    .insert_currency("taxable_equivalent", p.taxable_equivalent)
                    .insert_currency("total_payout", p.total_payout);
            }
            IllustrationRequest::CoverageGap(inputs) => {
                let need = coverage::coverage_need(inputs)?;
                result
                    .insert_currency("income_replacement", need.income_replacement)
                    .insert_currency("debts", need.debts)
                    .insert_currency("education", need.education)
                    .insert_currency("total_need", need.total_need)
                    .insert_currency("offsets", need.offsets)
                    .insert_currency("gap", need.gap)
                    .insert_text("gap_headline", format_compact_currency(need.gap));
            }
            IllustrationRequest::HumanLifeValue(inputs) => {
                let value = coverage::human_life_value(inputs)?;
                result
                    .insert_count("working_years", inputs.working_years())
                    .insert_currency("human_life_value", value)
                    .insert_text("headline", format_compact_currency(value));
            }
            IllustrationRequest::StateRequirement { state } => {
                let state: UsState = state.parse()?;
                let req = self.assumptions.states.requirement_for(state);
                result
                    .insert_text("state", state.name())
                    .insert_count("pre_license_hours", req.pre_license_hours)
                    .insert_currency("exam_fee", req.exam_fee)
                    .insert_count("renewal_years", req.renewal_years)
                    .insert_count("ce_hours", req.ce_hours);
            }
            IllustrationRequest::TermRate { term_years } => {
                let rate = self.assumptions.term_annuity_rate(*term_years)?;
                result
                    .insert_count("term_years", rate.term_years)
                    .insert_percent("rate_percent", rate.rate_percent, 2)
                    .insert_currency("min_deposit", rate.min_deposit);
            }
        }

        log::debug!("{}: {} outputs", request.name(), result.scalar_outputs.len());
        Ok(result)
    }

    /// Clamp slider inputs into bounds, then illustrate
    pub fn illustrate_clamped(&self, request: &IllustrationRequest) -> IllustrationResult<ProjectionResult> {
        self.illustrate(&request.clamped())
    }

    /// Never fails: a rejected request is answered with the calculator's defaults
    pub fn illustrate_or_default(&self, request: &IllustrationRequest) -> ProjectionResult {
        match self.illustrate(request) {
            Ok(result) => result,
            Err(err) if err.is_recoverable() => {
                log::warn!("{} rejected ({}), resetting to defaults", request.name(), err);
                self.illustrate(&request.with_defaults()).unwrap_or_else(|err| {
                    log::warn!("{} defaults rejected ({})", request.name(), err);
                    ProjectionResult::new(request.name())
                })
            }
            Err(err) => {
                log::warn!("{} failed ({}), showing no outputs", request.name(), err);
                ProjectionResult::new(request.name())
            }
        }
    }
}

fn insert_annuity(result: &mut ProjectionResult, p: &AnnuityProjection) {
    result
        .insert_currency("principal", p.principal)
        .insert_percent("annual_rate_percent", p.annual_rate_percent, 2)
        .insert_count("years", p.years)
        .insert_currency("future_value", p.future_value)
        .insert_currency("interest_earned", p.interest_earned);
}

fn insert_funding(result: &mut ProjectionResult, prefix: &str, p: &MaxFundingProjection) {
    result
        .insert_currency(&format!("{}premium", prefix), p.premium)
        .insert_currency(&format!("{}cash_value_year_10", prefix), p.cash_value_year_10)
        .insert_currency(&format!("{}cash_value_year_20", prefix), p.cash_value_year_20)
        .insert_currency(&format!("{}death_benefit", prefix), p.death_benefit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IllustrationError;
    use crate::inputs::Gender;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::default()
    }

    #[test]
    fn test_premium_request() {
        let request = IllustrationRequest::Premium(PremiumInputs {
            age: 35,
            gender: Gender::Male,
            smoker: false,
            coverage_amount: 250_000.0,
            term_years: 20,
        });
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.calculator, "premium");
        assert_eq!(result.scalar("monthly_premium"), Some(45.0));
        assert_eq!(result.formatted("monthly_premium"), Some("$45"));
        assert_eq!(result.formatted("age_multiplier"), Some("1.50x"));
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "calculator": "fixed_annuity",
            "principal": 100000,
            "annual_rate_percent": 5.0,
            "term_years": 5
        }"#;
        let request: IllustrationRequest = serde_json::from_str(json).unwrap();
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.scalar("future_value"), Some(127_628.0));
        assert_eq!(result.formatted("interest_earned"), Some("$27,628"));
    }

    #[test]
    fn test_iul_request_defaults_to_floor_first() {
        let json = r#"{
            "calculator": "iul_credit",
            "terms": {
                "index_return_percent": 24.2,
                "cap_percent": 10.0,
                "floor_percent": 0.0,
                "participation_percent": 100.0
            }
        }"#;
        let request: IllustrationRequest = serde_json::from_str(json).unwrap();
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.scalar("credited_rate"), Some(10.0));
        assert_eq!(result.formatted("method"), Some("floor_first"));
    }

    #[test]
    fn test_credit_history_uses_sample_returns() {
        let request = IllustrationRequest::CreditHistory {
            start_value: 100_000.0,
            terms: IulCreditInputs::default(),
            method: CreditingMethod::FloorFirst,
            returns: None,
        };
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.scalar("years"), Some(10.0));
        assert_eq!(result.scalar("years_at_floor"), Some(3.0));
        assert_eq!(result.scalar("year_08_credited_rate"), Some(0.0));
        assert!(result.scalar("final_account_value").unwrap() > 100_000.0);
    }

    #[test]
    fn test_max_funding_comparison_request() {
        let request = IllustrationRequest::MaxFunding {
            base_annual_premium: 10_000.0,
            level: None,
        };
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.scalar("max_cash_value_year_20"), Some(480_000.0));
        assert_eq!(result.scalar("minimum_cash_value_year_20"), Some(180_000.0));
        assert_eq!(
            result.formatted("cash_value_advantage_note"),
            Some("+$300,000 more at max funding")
        );
    }

    #[test]
    fn test_state_lookup() {
        let request = IllustrationRequest::StateRequirement { state: "ny".to_string() };
        let result = engine().illustrate(&request).unwrap();

        assert_eq!(result.formatted("state"), Some("New York"));
        assert_eq!(result.scalar("pre_license_hours"), Some(40.0));
        assert_eq!(result.formatted("exam_fee"), Some("$15"));

        let missing = IllustrationRequest::StateRequirement { state: "Atlantis".to_string() };
        assert!(matches!(
            engine().illustrate(&missing),
            Err(IllustrationError::NotFound { .. })
        ));
    }

    #[test]
    fn test_illustrate_or_default_resets() {
        let bad = IllustrationRequest::WholeLife { monthly_premium: 200.0, years: 0 };
        let result = engine().illustrate_or_default(&bad);

        // defaults: $200/mo for 20 years at 75%
        assert_eq!(result.scalar("cash_value"), Some(36_000.0));

        let unknown_term = IllustrationRequest::TermRate { term_years: 4 };
        let result = engine().illustrate_or_default(&unknown_term);
        assert_eq!(result.scalar("term_years"), Some(5.0));
    }

    #[test]
    fn test_illustrate_clamped() {
        let request = IllustrationRequest::Premium(PremiumInputs {
            age: 90,
            coverage_amount: 50_000.0,
            ..Default::default()
        });
        let result = engine().illustrate_clamped(&request).unwrap();

        // age 70, $100k, 20 years: 100 * 0.10 * 3.25 * 1.2 = 39
        assert_eq!(result.scalar("monthly_premium"), Some(39.0));
    }

    #[test]
    fn test_illustrate_clamped_keeps_on_grid_inputs() {
        let request = IllustrationRequest::IulCredit {
            terms: IulCreditInputs {
                index_return_percent: 6.3,
                ..Default::default()
            },
            method: CreditingMethod::FloorFirst,
        };
        let result = engine().illustrate_clamped(&request).unwrap();
        assert_eq!(result.scalar("credited_rate"), Some(6.3));
    }

    #[test]
    fn test_illustrate_clamped_retirement_out_of_range() {
        let request = IllustrationRequest::RetirementIncome(RetirementInputs {
            payout_rate_percent: 150.0,
            payout_years: 0,
            ..Default::default()
        });
        assert!(matches!(
            engine().illustrate(&request),
            Err(IllustrationError::Domain { .. })
        ));

        let result = engine().illustrate_clamped(&request).unwrap();
        assert!(result.scalar("annual_income").unwrap() > 0.0);
        assert_eq!(
            result.scalar("total_payout"),
            result.scalar("annual_income").map(|income| income * 5.0)
        );
    }

    #[test]
    fn test_every_default_request_succeeds() {
        let requests = [
            IllustrationRequest::Premium(PremiumInputs::default()),
            IllustrationRequest::WholeLife { monthly_premium: 0.0, years: 1 },
            IllustrationRequest::FixedAnnuity(AnnuityInputs::default()),
            IllustrationRequest::TermAnnuity { principal: 0.0, term_years: 0 },
            IllustrationRequest::IulCredit { terms: IulCreditInputs::default(), method: CreditingMethod::default() },
            IllustrationRequest::CreditHistory {
                start_value: 0.0,
                terms: IulCreditInputs::default(),
                method: CreditingMethod::ParticipationThenClamp,
                returns: Some(vec![]),
            },
            IllustrationRequest::MaxFunding { base_annual_premium: 0.0, level: Some(FundingLevel::Target) },
            IllustrationRequest::RetirementIncome(RetirementInputs::default()),
            IllustrationRequest::CoverageGap(CoverageInputs::default()),
            IllustrationRequest::HumanLifeValue(HumanLifeInputs::default()),
            IllustrationRequest::StateRequirement { state: String::new() },
            IllustrationRequest::TermRate { term_years: 0 },
        ];
        for request in &requests {
            let defaults = request.with_defaults();
            assert_eq!(defaults.name(), request.name());
            assert!(engine().illustrate(&defaults).is_ok(), "{} defaults failed", request.name());
        }
    }
}
