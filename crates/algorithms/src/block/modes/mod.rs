//! Block cipher modes of operation
//!
//! Each mode exposes low-level functions over caller-owned state (counter or
//! feedback register, keystream cache, progress counter), which is what the
//! dispatch layer drives, plus a typed wrapper that owns that state.

pub mod cfb;
pub mod ctr;
pub mod wrap;

pub use cfb::{Cfb1, Cfb8};
pub use ctr::Ctr32;
pub use wrap::KeyWrap;
