//! Input guards: slider clamping and domain validation
//!
//! Slider-driven values are clamped into the bounds the UI declares. Values
//! that reach a calculator directly are validated instead, so caller bugs
//! surface as `IllustrationError::Domain` rather than being masked.

use std::fmt::Display;

use crate::error::{IllustrationError, IllustrationResult};

/// Clamp `value` into `[min, max]`. NaN clamps to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    min.max(value.min(max))
}

/// Bounds declared by a slider or number box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    /// Step grid the slider snaps to (0 = continuous)
    pub step: f64,
}

impl SliderBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Snap to the step grid, then clamp into bounds
    ///
    /// A value already on the grid is returned unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        let snapped = if self.step > 0.0 && value.is_finite() {
            let steps = (value - self.min) / self.step;
            let nearest = steps.round();
            if (steps - nearest).abs() < GRID_TOLERANCE {
                value
            } else {
                let scale = 10f64.powi(step_decimals(self.step));
                ((self.min + nearest * self.step) * scale).round() / scale
            }
        } else {
            value
        };
        clamp(snapped, self.min, self.max)
    }

    /// Clamp a whole-number input (ages, years)
    pub fn clamp_whole(&self, value: u32) -> u32 {
        self.clamp(value as f64).round() as u32
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// Fraction of a step treated as sitting on the grid
const GRID_TOLERANCE: f64 = 1e-9;

/// Decimal places needed to write `step` exactly (0.25 -> 2, 5000 -> 0)
fn step_decimals(step: f64) -> i32 {
    (0..10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < GRID_TOLERANCE
        })
        .unwrap_or(10)
}

/// Longest period any calculator will compound or sum over
pub const MAX_PROJECTION_YEARS: u32 = 120;

// Bounds used by the calculator pages
pub const AGE: SliderBounds = SliderBounds::new(18.0, 70.0, 1.0);
pub const COVERAGE: SliderBounds = SliderBounds::new(100_000.0, 2_000_000.0, 25_000.0);
pub const TERM_YEARS: SliderBounds = SliderBounds::new(10.0, 30.0, 5.0);
pub const PREMIUM_YEARS: SliderBounds = SliderBounds::new(1.0, 40.0, 1.0);
pub const MONTHLY_PREMIUM: SliderBounds = SliderBounds::new(50.0, 5_000.0, 10.0);
pub const ANNUITY_PRINCIPAL: SliderBounds = SliderBounds::new(10_000.0, 1_000_000.0, 5_000.0);
pub const ANNUITY_RATE: SliderBounds = SliderBounds::new(0.0, 100.0, 0.05);
pub const ANNUITY_YEARS: SliderBounds = SliderBounds::new(1.0, 30.0, 1.0);
pub const INDEX_RETURN: SliderBounds = SliderBounds::new(-40.0, 40.0, 0.1);
pub const CAP: SliderBounds = SliderBounds::new(0.0, 25.0, 0.25);
pub const FLOOR: SliderBounds = SliderBounds::new(0.0, 5.0, 0.25);
pub const PARTICIPATION: SliderBounds = SliderBounds::new(0.0, 150.0, 5.0);
pub const RETIREMENT_AGE: SliderBounds = SliderBounds::new(50.0, 75.0, 1.0);
pub const CONTRIBUTION: SliderBounds = SliderBounds::new(1_000.0, 100_000.0, 1_000.0);
pub const ANNUAL_PREMIUM: SliderBounds = SliderBounds::new(1_000.0, 250_000.0, 1_000.0);
pub const ANNUAL_INCOME: SliderBounds = SliderBounds::new(0.0, 1_000_000.0, 5_000.0);
pub const GROWTH_RATE: SliderBounds = SliderBounds::new(0.0, 12.0, 0.5);
pub const PAYOUT_RATE: SliderBounds = SliderBounds::new(1.0, 10.0, 0.25);
pub const PAYOUT_YEARS: SliderBounds = SliderBounds::new(5.0, 40.0, 1.0);

/// Clamp a slider value, logging when the raw value was out of bounds
pub(crate) fn clamp_logged(field: &str, value: f64, bounds: &SliderBounds) -> f64 {
    let clamped = bounds.clamp(value);
    if !bounds.contains(value) {
        log::warn!("{} = {} outside [{}, {}], clamped to {}", field, value, bounds.min, bounds.max, clamped);
    }
    clamped
}

pub(crate) fn clamp_whole_logged(field: &str, value: u32, bounds: &SliderBounds) -> u32 {
    clamp_logged(field, value as f64, bounds).round() as u32
}

pub fn require_finite(field: &str, value: f64) -> IllustrationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IllustrationError::domain(field, format!("must be a finite number, got {}", value)))
    }
}

pub fn require_non_negative(field: &str, value: f64) -> IllustrationResult<f64> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(IllustrationError::domain(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

/// Strictly positive; used for years and term lengths
pub fn require_positive<T>(field: &str, value: T) -> IllustrationResult<T>
where
    T: PartialOrd + Default + Display + Copy,
{
    // NaN fails this comparison as well
    if value > T::default() {
        Ok(value)
    } else {
        Err(IllustrationError::domain(field, format!("must be greater than zero, got {}", value)))
    }
}

pub fn require_in_range<T>(field: &str, value: T, min: T, max: T) -> IllustrationResult<T>
where
    T: PartialOrd + Display + Copy,
{
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(IllustrationError::domain(field, format!("must be within [{}, {}], got {}", min, max, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.5, 0.0, 10.0), 10.0);
        assert_eq!(clamp(f64::NAN, 18.0, 70.0), 18.0);
        assert_eq!(clamp(f64::INFINITY, 18.0, 70.0), 70.0);
    }

    #[test]
    fn test_slider_snaps_to_step() {
        assert_eq!(COVERAGE.clamp(260_000.0), 250_000.0);
        assert_eq!(COVERAGE.clamp(5_000_000.0), 2_000_000.0);
        assert_eq!(COVERAGE.clamp(0.0), 100_000.0);
        assert_eq!(AGE.clamp_whole(12), 18);
        assert_eq!(AGE.clamp_whole(95), 70);
        assert_eq!(TERM_YEARS.clamp_whole(22), 20);
    }

    #[test]
    fn test_slider_keeps_on_grid_values() {
        assert_eq!(INDEX_RETURN.clamp(6.3), 6.3);
        assert_eq!(INDEX_RETURN.clamp(24.2), 24.2);
        assert_eq!(INDEX_RETURN.clamp(-19.4), -19.4);
        assert_eq!(ANNUITY_RATE.clamp(4.35), 4.35);
        assert_eq!(CAP.clamp(10.25), 10.25);
        assert_eq!(GROWTH_RATE.clamp(6.5), 6.5);
    }

    #[test]
    fn test_slider_snaps_to_clean_decimals() {
        assert_eq!(INDEX_RETURN.clamp(6.34), 6.3);
        assert_eq!(INDEX_RETURN.clamp(-0.66), -0.7);
        assert_eq!(ANNUITY_RATE.clamp(4.36), 4.35);
        assert_eq!(CAP.clamp(10.3), 10.25);
        assert_eq!(step_decimals(0.25), 2);
        assert_eq!(step_decimals(25_000.0), 0);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("years", 1u32).is_ok());
        assert!(require_positive("years", 0u32).is_err());
        assert!(require_positive("rate", -0.5).is_err());
        assert!(require_positive("rate", f64::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("income", 0.0).unwrap(), 0.0);
        assert!(require_non_negative("income", -1.0).is_err());
        assert!(require_non_negative("income", f64::NAN).is_err());
    }

    #[test]
    fn test_require_in_range() {
        assert!(require_in_range("age", 18u32, 18, 100).is_ok());
        assert!(require_in_range("age", 101u32, 18, 100).is_err());

        let err = require_in_range("rate", 120.0, 0.0, 100.0).unwrap_err();
        assert!(err.to_string().contains("rate"));
    }
}
