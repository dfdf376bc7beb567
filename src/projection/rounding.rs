//! Whole-currency rounding shared by every calculator

/// Round to the nearest whole currency unit, ties toward positive infinity
///
/// `round_currency(2.5) == 3.0` and `round_currency(-2.5) == -2.0`.
pub fn round_currency(value: f64) -> f64 {
    (value + 0.5).floor()
}
