//! Validation helpers producing [`Error`](super::Error) values

use super::types::{Error, Result};

#[cfg(feature = "std")]
fn invalid_parameter(context: &'static str, reason: &'static str) -> Error {
    Error::InvalidParameter {
        context,
        message: reason.into(),
    }
}

#[cfg(not(feature = "std"))]
fn invalid_parameter(context: &'static str, _reason: &'static str) -> Error {
    Error::InvalidParameter { context }
}

#[inline(always)]
fn check(ok: bool, err: impl FnOnce() -> Error) -> Result<()> {
    match ok {
        true => Ok(()),
        false => Err(err()),
    }
}

#[inline(always)]
fn wrong_length(context: &'static str, expected: usize, actual: usize) -> Error {
    Error::InvalidLength {
        context,
        expected,
        actual,
    }
}

/// Fail with `InvalidParameter` unless `condition` holds
#[inline(always)]
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    check(condition, || invalid_parameter(context, reason))
}

/// Require `actual == expected`
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    check(actual == expected, || wrong_length(context, expected, actual))
}

/// Require `actual >= min`
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    check(actual >= min, || wrong_length(context, min, actual))
}

/// Require `actual <= max`
#[inline(always)]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    check(actual <= max, || wrong_length(context, max, actual))
}

/// Require a length that is a whole number of `unit`-sized blocks.
///
/// On failure `expected` carries the next multiple above `actual`.
#[inline(always)]
pub fn multiple_of(context: &'static str, actual: usize, unit: usize) -> Result<()> {
    check(unit != 0 && actual % unit == 0, || {
        wrong_length(context, actual - actual % unit.max(1) + unit, actual)
    })
}

/// Fail with `AuthenticationFailed` unless `is_valid`
#[inline(always)]
pub fn authentication(is_valid: bool, context: &'static str) -> Result<()> {
    check(is_valid, || Error::AuthenticationFailed {
        context,
        #[cfg(feature = "std")]
        message: String::new(),
    })
}
