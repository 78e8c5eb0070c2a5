//! Constant values for the blockmode library

#![no_std]

pub mod utils;
