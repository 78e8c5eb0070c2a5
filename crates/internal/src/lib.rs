//! Internal utilities shared by the blockmode crates
//!
//! Not part of the public API surface; signatures may change between
//! releases.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
pub mod endian;
pub mod zeroing;
