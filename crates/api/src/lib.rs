//! Public API types for the blockmode library
//!
//! This crate provides the error type shared by every blockmode component,
//! the `ResultExt` helpers, validation functions and a small set of common
//! types.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use types::*;
