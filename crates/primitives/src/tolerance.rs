/// Default "same place" tolerance: one millimetre expressed in metres.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Absolute slack added to every tolerance test so that values exactly one
/// tolerance apart compare equal despite binary rounding.
pub const ROUNDING_SLACK: f64 = 1e-9;

/// Returns true when `a` and `b` differ by no more than `tolerance`.
#[inline]
pub fn is_equal(a: f64, b: f64, tolerance: f64) -> bool {
	(a - b).abs() <= tolerance + ROUNDING_SLACK
}

#[inline]
pub fn is_zero(value: f64, tolerance: f64) -> bool {
	is_equal(value, 0.0, tolerance)
}
