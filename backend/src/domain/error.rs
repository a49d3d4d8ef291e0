//! Domain-level error taxonomy.
//!
//! Every failure that leaves a service is an [`Error`]: an optional
//! machine-readable [`ErrorCode`], an optional human-readable message, the
//! logical operation that produced or wrapped it, and an exclusively owned
//! cause. Layers wrap errors with their own `op` label without re-tagging, so
//! [`Error::code`] and [`Error::message`] walk the chain and report the first
//! tag found. The chain ends either with no cause or with a non-taxonomy
//! error from an adapter.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message reported when no layer of the chain carries one.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An internal error has occurred. Please contact technical support.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The action cannot be performed in the current state.
    Conflict,
    /// Unclassified failure, including storage faults and timeouts.
    Internal,
    /// The request is malformed or fails validation.
    Invalid,
    /// The requested entity does not exist.
    NotFound,
    /// The request cannot be served in an acceptable representation.
    NotAccepted,
}

impl ErrorCode {
    /// Wire spelling of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::Invalid => "invalid",
            Self::NotFound => "not_found",
            Self::NotAccepted => "not_accepted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next link in an [`Error`] chain.
#[derive(Debug)]
pub enum Cause {
    /// Another taxonomy error, typically from a lower layer.
    Error(Box<Error>),
    /// A non-taxonomy error terminating the chain.
    External(Box<dyn StdError + Send + Sync + 'static>),
}

/// Layered domain error.
///
/// # Examples
/// ```
/// use catalog::domain::{Error, ErrorCode};
///
/// let inner = Error::invalid("Title cannot be empty.").with_op("categories.create");
/// let outer = Error::wrap("handlers.create_category", inner);
/// assert_eq!(outer.code(), ErrorCode::Invalid);
/// assert_eq!(outer.message(), "Title cannot be empty.");
/// ```
#[derive(Debug, Default)]
pub struct Error {
    code: Option<ErrorCode>,
    message: Option<String>,
    op: Option<&'static str>,
    cause: Option<Cause>,
}

impl Error {
    /// Create a tagged error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: Some(message.into()),
            op: None,
            cause: None,
        }
    }

    /// Wrap `cause` under the operation `op` without re-tagging it.
    pub fn wrap(op: &'static str, cause: Error) -> Self {
        Self {
            code: None,
            message: None,
            op: Some(op),
            cause: Some(Cause::Error(Box::new(cause))),
        }
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Convenience constructor for [`ErrorCode::Invalid`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Invalid, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAccepted`].
    pub fn not_accepted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAccepted, message)
    }

    /// Label this error with the operation that raised it.
    #[must_use]
    pub fn with_op(mut self, op: &'static str) -> Self {
        self.op = Some(op);
        self
    }

    /// Attach a lower-level taxonomy error as the cause.
    #[must_use]
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Cause::Error(Box::new(cause)));
        self
    }

    /// Attach a non-taxonomy error as the terminal cause.
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Cause::External(Box::new(source)));
        self
    }

    /// First code found walking the chain, [`ErrorCode::Internal`] if none.
    pub fn code(&self) -> ErrorCode {
        let mut current = self;
        loop {
            if let Some(code) = current.code {
                return code;
            }
            match &current.cause {
                Some(Cause::Error(inner)) => current = inner.as_ref(),
                _ => return ErrorCode::Internal,
            }
        }
    }

    /// First non-empty message found walking the chain, or
    /// [`GENERIC_ERROR_MESSAGE`].
    pub fn message(&self) -> &str {
        let mut current = self;
        loop {
            if let Some(message) = current.message.as_deref().filter(|m| !m.is_empty()) {
                return message;
            }
            match &current.cause {
                Some(Cause::Error(inner)) => current = inner.as_ref(),
                _ => return GENERIC_ERROR_MESSAGE,
            }
        }
    }

    /// Operation label attached at this layer.
    pub fn op(&self) -> Option<&'static str> {
        self.op
    }

    /// Code attached at this layer only.
    pub fn own_code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Next link in the chain.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.op {
            write!(f, "{op}: ")?;
        }
        match &self.cause {
            Some(Cause::Error(inner)) => write!(f, "{inner}"),
            Some(Cause::External(source)) => write!(f, "{source}"),
            None => {
                if let Some(code) = self.code {
                    write!(f, "<{code}> ")?;
                }
                f.write_str(self.message.as_deref().unwrap_or_default())
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Some(Cause::Error(inner)) => Some(&**inner),
            Some(Cause::External(source)) => Some(&**source),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests;
