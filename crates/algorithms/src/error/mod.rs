//! Error handling for the primitive and mode implementations

use core::fmt;

use blockmode_api::{Error as CoreError, Result as CoreResult};

/// The error type for cryptographic primitives and modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Integrity failure (key-wrap check value or AEAD tag)
    Authentication {
        /// Algorithm that failed authentication
        algorithm: &'static str,
    },

    /// Feature not implemented
    NotImplemented {
        /// Name of the unimplemented feature
        feature: &'static str,
    },

    /// Operation invoked in a state that does not allow it
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Fallback for other errors
    Other(&'static str),
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }

    /// Shorthand to create a Processing error
    pub fn processing(operation: &'static str, details: &'static str) -> Self {
        Error::Processing { operation, details }
    }
}

/// Result type for primitive and mode operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Parameter { name, reason } => write!(f, "{name}: {reason}"),
            Error::Length {
                context,
                expected,
                actual,
            } => write!(f, "{context}: {actual} bytes where {expected} were required"),
            Error::Authentication { algorithm } => write!(f, "{algorithm}: integrity check failed"),
            Error::NotImplemented { feature } => write!(f, "{feature} is not available"),
            Error::Processing { operation, details } => write!(f, "{operation}: {details}"),
            Error::Other(msg) => f.write_str(msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// The api error carries an owned message only when std is on.
#[cfg(feature = "std")]
macro_rules! core_err {
    ($variant:ident, $context:expr, $message:expr) => {
        CoreError::$variant {
            context: $context,
            message: ::std::string::String::from($message),
        }
    };
}

#[cfg(not(feature = "std"))]
macro_rules! core_err {
    ($variant:ident, $context:expr, $message:expr) => {{
        let _ = $message;
        CoreError::$variant { context: $context }
    }};
}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::NotImplemented { feature } => CoreError::NotImplemented { feature },
            Error::Parameter { name, reason } => core_err!(InvalidParameter, name, reason),
            Error::Authentication { algorithm } => {
                core_err!(AuthenticationFailed, algorithm, "integrity check failed")
            }
            Error::Processing { operation, details } => core_err!(Other, operation, details),
            Error::Other(msg) => core_err!(Other, "algorithms", msg),
        }
    }
}

/// Lift a mode-level result into the api error type, tagging it with `ctx`.
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> CoreResult<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

pub use blockmode_api::error::ResultExt;

pub mod validate;
