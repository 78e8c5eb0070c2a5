//! Mode adapters behind the descriptor function slots
//!
//! Each adapter supplies the init, cipher, optional cleanup and optional
//! ctrl slots for one family of modes, plus the state constructor and a
//! descriptor constructor generic over the block primitive.

pub mod gcm;
pub mod stream;
pub mod wrap;

pub use gcm::{gcm_descriptor, gcm_generic_descriptor, GcmState};
pub use stream::{cfb1_descriptor, cfb8_descriptor, ctr_descriptor, StreamState};
pub use wrap::{wrap_descriptor, WrapState};

use crate::cipher::CipherStatus;
use crate::error::Error;

/// Log a rejected call and return the failure status
pub(crate) fn reject(name: &str, reason: &str) -> CipherStatus {
    log::debug!("{}: {}", name, reason);
    CipherStatus::Failure
}

/// Log a rejected call caused by an error and return the failure status
pub(crate) fn reject_with(name: &str, err: impl Into<Error>) -> CipherStatus {
    let err = err.into();
    log::debug!("{}: {}", name, err);
    CipherStatus::Failure
}

pub(crate) const FOREIGN_STATE: &str = "context state belongs to another adapter";

/// Error for a call the current adapter state does not allow
pub(crate) fn invalid_state(context: &'static str, _message: &'static str) -> Error {
    Error::InvalidParameter {
        context,
        #[cfg(feature = "std")]
        message: _message.into(),
    }
}
