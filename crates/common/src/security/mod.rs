//! Zeroizing buffers and compiler fences

pub mod memory;
pub mod secret;

pub use memory::barrier;
pub use secret::{AlignedSchedule, SecretBuffer};
