//! Error and status types for strider.

use thiserror::Error;

/// Result type alias using strider's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in strider operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A precondition on an argument was violated
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The operation is not available for this precision or backend
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the missing feature
        feature: String,
    },
}

impl Error {
    pub fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Error::NotImplemented {
            feature: feature.into(),
        }
    }
}

/// Outcome of one entry of a batched call.
///
/// A caller-allocated `&mut [Status]` receives one of these per entry (or a
/// single aggregate). Unlike [`Error`] it is `Copy`, so slots can be filled
/// from worker threads without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Success,
    InvalidArgument {
        arg: &'static str,
    },
    NotImplemented,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidArgument { arg, .. } => Status::InvalidArgument { arg },
            Error::NotImplemented { .. } => Status::NotImplemented,
        }
    }
}

impl From<&Result<()>> for Status {
    fn from(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Status::Success,
            Err(err) => Status::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::invalid("lda", "must be >= 3, got 2");
        assert_eq!(err.to_string(), "Invalid argument 'lda': must be >= 3, got 2");
        let err = Error::not_implemented("device gemm");
        assert_eq!(err.to_string(), "Not implemented: device gemm");
    }

    #[test]
    fn test_status_from_result() {
        assert_eq!(Status::from(&Ok(())), Status::Success);
        let bad: Result<()> = Err(Error::invalid("incx", "must be non-zero"));
        assert_eq!(Status::from(&bad), Status::InvalidArgument { arg: "incx" });
        let missing: Result<()> = Err(Error::not_implemented("x"));
        assert_eq!(Status::from(&missing), Status::NotImplemented);
        assert!(Status::default().is_success());
    }
}
