//! The error enum every blockmode crate reports through

#[cfg(feature = "std")]
use std::string::String;

/// Primary error type for block mode operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key material rejected by a key schedule
    InvalidKey {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Input, output, IV or tag has an unacceptable length
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Parameter or state precondition violated
    InvalidParameter {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Integrity check failed (wrap check value or AEAD tag)
    AuthenticationFailed {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Operation not supported by the selected algorithm
    NotImplemented { feature: &'static str },

    /// Other error
    Other {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for block mode operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its kind
    pub fn with_context(mut self, new_context: &'static str) -> Self {
        match &mut self {
            Self::InvalidKey { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::InvalidParameter { context, .. }
            | Self::AuthenticationFailed { context, .. }
            | Self::Other { context, .. } => *context = new_context,
            Self::NotImplemented { .. } => {}
        }
        self
    }

    /// True for integrity failures
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

#[cfg(feature = "std")]
fn write_detail(
    f: &mut core::fmt::Formatter<'_>,
    kind: &str,
    context: &str,
    message: &str,
) -> core::fmt::Result {
    match (kind.is_empty(), message.is_empty()) {
        (true, true) => f.write_str(context),
        (true, false) => write!(f, "{context}: {message}"),
        (false, true) => write!(f, "{kind} ({context})"),
        (false, false) => write!(f, "{kind} ({context}): {message}"),
    }
}

#[cfg(not(feature = "std"))]
fn write_detail(
    f: &mut core::fmt::Formatter<'_>,
    kind: &str,
    context: &str,
    _message: &str,
) -> core::fmt::Result {
    if kind.is_empty() {
        f.write_str(context)
    } else {
        write!(f, "{kind} ({context})")
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[cfg(feature = "std")]
        let message = match self {
            Self::InvalidKey { message, .. }
            | Self::InvalidParameter { message, .. }
            | Self::AuthenticationFailed { message, .. }
            | Self::Other { message, .. } => message.as_str(),
            _ => "",
        };
        #[cfg(not(feature = "std"))]
        let message = "";

        match self {
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => write!(f, "{context}: length {actual}, wanted {expected}"),
            Self::NotImplemented { feature } => write!(f, "{feature} is not supported"),
            Self::InvalidKey { context, .. } => write_detail(f, "key rejected", context, message),
            Self::InvalidParameter { context, .. } => {
                write_detail(f, "bad parameter", context, message)
            }
            Self::AuthenticationFailed { context, .. } => {
                write_detail(f, "authentication failed", context, message)
            }
            Self::Other { context, .. } => write_detail(f, "", context, message),
        }
    }
}
