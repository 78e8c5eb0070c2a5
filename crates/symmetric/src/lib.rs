//! Host dispatch layer for the blockmode adapters
//!
//! Hosts look up a [`CipherDescriptor`] in the [`registry`], allocate a
//! [`CipherContext`] from it, initialise it with key, IV and direction, and
//! drive it with cipher calls. Each mode's behaviour lives in an adapter
//! behind the descriptor's function slots.
//!
//! ```
//! use blockmode_symmetric::{registry, CipherContext, CipherId, CipherStatus, Direction};
//!
//! let desc = registry::lookup(CipherId::Sm4Ctr);
//! let mut ctx = CipherContext::new(desc);
//! ctx.init(Some(&[0u8; 16][..]), Some(&[0u8; 16][..]), Direction::Encrypt).unwrap();
//!
//! let plaintext = [0u8; 17];
//! let mut ciphertext = [0u8; 17];
//! assert_eq!(ctx.update(&mut ciphertext, &plaintext), CipherStatus::Success);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod adapters;
pub mod cipher;
pub mod context;
pub mod error;
#[cfg(feature = "std")]
pub mod registry;

pub use cipher::{
    AdapterState, CipherDescriptor, CipherFlags, CipherId, CipherMode, CipherStatus, CtrlCommand,
    DescriptorBuilder,
};
pub use context::CipherContext;

pub use blockmode_api::Direction;
pub use error::{Error, Result};
