//! Common implementations and shared functionality for blockmode
//!
//! Secret-holding buffers and memory barrier helpers used by the cipher
//! and mode implementations.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod security;

pub use security::{barrier, AlignedSchedule, SecretBuffer};
