//! Illustration Engine - calculators behind insurance and annuity sales illustrations
//!
//! This library provides:
//! - Input guards for slider-driven and direct calculator inputs
//! - Rate assumptions, state licensing requirements and product tables (built in or CSV)
//! - Premium, cash value, annuity, indexed crediting, funding, retirement and coverage formulas
//! - Display formatting and named-output results for presentation layers
//! - Parallel batch illustration

pub mod error;
pub mod inputs;
pub mod assumptions;
pub mod projection;
pub mod presentation;
pub mod scenario;

// Re-export commonly used types
pub use error::{IllustrationError, IllustrationResult};
pub use assumptions::{Assumptions, RateAssumptions, UsState};
pub use projection::{CreditingMethod, IllustrationRequest, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
