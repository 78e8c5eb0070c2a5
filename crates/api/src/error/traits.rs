//! Extension methods on `Result`

use super::types::{Error, Result};

/// Lifts foreign errors into [`Error`] while naming the failing step
pub trait ResultExt<T> {
    /// Convert the error and replace its context with `context`
    fn with_context(self, context: &'static str) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for core::result::Result<T, E> {
    fn with_context(self, context: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
