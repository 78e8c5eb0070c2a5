//! Argument checks shared by the mode implementations.
//!
//! Each check returns `Ok(())` when the condition holds, so call sites read
//! as a list of preconditions followed by `?`.

use super::{Error, Result};

#[inline(always)]
fn ensure(ok: bool, err: impl FnOnce() -> Error) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(err())
    }
}

#[inline(always)]
fn bad_length(context: &'static str, expected: usize, actual: usize) -> Error {
    Error::Length {
        context,
        expected,
        actual,
    }
}

/// Fails with [`Error::Parameter`] unless `condition` holds.
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    ensure(condition, || Error::param(name, reason))
}

/// `actual` must equal `expected`.
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    ensure(actual == expected, || bad_length(context, expected, actual))
}

/// `actual` must be at least `min`.
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    ensure(actual >= min, || bad_length(context, min, actual))
}

/// `actual` must not exceed `max`.
#[inline(always)]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    ensure(actual <= max, || bad_length(context, max, actual))
}

/// Maps a failed tag comparison to [`Error::Authentication`].
#[inline(always)]
pub fn authentication(is_valid: bool, algorithm: &'static str) -> Result<()> {
    ensure(is_valid, || Error::Authentication { algorithm })
}
