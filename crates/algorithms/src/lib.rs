//! Block cipher primitive and modes of operation
//!
//! This crate provides the `BlockCipher` abstraction consumed by every mode,
//! the SM4 primitive, the stream modes (CTR with a 32-bit counter, CFB-1 and
//! CFB-8), RFC 3394 key wrapping, and the GHASH/GCM authenticated mode.
//! It works in both `std` and `no_std` environments.
//!
//! # Security Features
//!
//! - Key schedules and keystream buffers are zeroized on drop
//! - Tags and wrap check values are compared in constant time
//! - Unwrap output is cleared when the integrity check fails

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Block primitive and modes of operation
pub mod block;
pub use block::{Block, BlockCipher, Sm4};
pub use block::modes::{Cfb1, Cfb8, Ctr32, KeyWrap};

// Authenticated encryption
pub mod aead;
pub use aead::gcm::{GHash, Gcm128};

pub use blockmode_api::Direction;
