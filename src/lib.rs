//! # blockmode
//!
//! Block-cipher mode adapters: CTR, CFB-1, CFB-8, RFC 3394 key wrap and GCM,
//! composed from an opaque 128-bit block cipher primitive.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! blockmode = "0.3"
//! ```
//!
//! ## Features
//!
//! - `modes` (default): mode adapters and the host dispatch layer
//! - `algorithms`: typed mode implementations without the dispatch layer
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`blockmode-algorithms`]: block primitive trait, SM4, CTR/CFB/wrap, GHASH and GCM
//! - [`blockmode-symmetric`]: cipher descriptors, contexts and the algorithm registry

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use blockmode_api as api;
pub use blockmode_common as common;
pub use blockmode_internal as internal;
pub use blockmode_params as params;

// Callers wipe buffers and compare tags with the same crates the
// components use
pub use subtle;
pub use zeroize;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use blockmode_algorithms as algorithms;

#[cfg(feature = "modes")]
pub use blockmode_symmetric as symmetric;

/// Prelude for convenient imports
pub mod prelude {
    pub use blockmode_api::{Error, Result};

    #[cfg(feature = "algorithms")]
    pub use blockmode_algorithms::block::{BlockCipher, Sm4};

    #[cfg(feature = "modes")]
    pub use blockmode_symmetric::{
        CipherContext, CipherDescriptor, CipherId, CipherStatus, CtrlCommand, Direction,
    };

    #[cfg(all(feature = "modes", feature = "std"))]
    pub use blockmode_symmetric::registry;
}
