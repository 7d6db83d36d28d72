//! Numeric helpers shared by every stage that emits values to callers.

/// Finite-or-default: NaN and ±Inf become `0.0`.
///
/// This is the only place non-finite values are sanitized. Anything crossing
/// the output boundary goes through it.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Above this magnitude an `f64` has no fractional cents left to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Round half away from zero to 2 decimal places.
///
/// Values at or beyond `ROUNDING_LIMIT` are returned unchanged, so scaling
/// by 100 can never overflow to infinity.
#[inline]
pub fn round2(value: f64) -> f64 {
    if value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// `round2` then `finite_or_zero`; the result is always finite.
#[inline]
pub fn report(value: f64) -> f64 {
    finite_or_zero(round2(value))
}

/// Undefined values report as `0.0`.
#[inline]
pub fn report_opt(value: Option<f64>) -> f64 {
    value.map(report).unwrap_or(0.0)
}
