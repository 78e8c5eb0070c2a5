//! Error handling for the dispatch layer
//!
//! The dispatch layer reports through the unified API error type. Errors
//! from the primitive and mode crate are lifted with
//! [`ResultExt::with_context`].

pub use blockmode_api::error::{validate, Error, Result, ResultExt};
