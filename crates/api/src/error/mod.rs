//! Error type shared by every blockmode crate, plus checks that build it

pub mod traits;
pub mod types;
pub mod validate;

pub use traits::ResultExt;
pub use types::{Error, Result};

#[cfg(feature = "std")]
impl std::error::Error for Error {}
