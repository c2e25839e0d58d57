//! Numeric types for stat values.
//!
//! Stat values are plain `f64`. This module holds the two numeric rules the
//! rest of the crate depends on: rounding a computed value to a fixed number
//! of decimal digits, and the tolerance used when comparing modifier values.

/// Type alias for stat values.
pub type StatValue = f64;

/// Largest number of decimal digits a stat can round to.
pub const MAX_ROUND_DIGITS: u8 = 8;

/// Tolerance used when comparing modifier values for equality.
pub const MODIFIER_EPSILON: StatValue = 1e-4;

/// Round `value` to `digits` decimal places.
///
/// `digits` is clamped to [`MAX_ROUND_DIGITS`]. Midpoints round to the
/// nearest even digit, so `0.125` at two digits becomes `0.12`.
///
/// # Examples
///
/// ```rust
/// use modstat::numeric::round_to_digits;
///
/// assert_eq!(round_to_digits(244.80000000000004, 2), 244.8);
/// assert_eq!(round_to_digits(1.23456, 3), 1.235);
/// assert_eq!(round_to_digits(2.5, 0), 2.0);
/// ```
pub fn round_to_digits(value: StatValue, digits: u8) -> StatValue {
    if !value.is_finite() {
        return value;
    }

    let scale = 10_f64.powi(i32::from(digits.min(MAX_ROUND_DIGITS)));
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Too large to carry any fractional digits anyway.
        return value;
    }

    scaled.round_ties_even() / scale
}

/// Compare two modifier values within [`MODIFIER_EPSILON`].
///
/// # Examples
///
/// ```rust
/// use modstat::numeric::approx_eq;
///
/// assert!(approx_eq(0.1, 0.10001));
/// assert!(!approx_eq(0.1, 0.2));
/// ```
pub fn approx_eq(a: StatValue, b: StatValue) -> bool {
    (a - b).abs() < MODIFIER_EPSILON
}
