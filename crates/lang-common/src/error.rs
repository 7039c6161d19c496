//! Error codes and the core's single error type.
//!
//! Every fallible operation in the type-inference core returns
//! `Result<T, TypeError>`. There is no recovery path: the module driver
//! converts the first `TypeError` it sees into a fatal diagnostic and
//! aborts (see `lang-common::diagnostics`).

use std::fmt;

use crate::location::Location;

/// A coarse classification of why an operation failed.
///
/// `TOKEN_UNEXPECTED` is reserved for the (out-of-scope) lexer/parser so
/// that a single `ErrorCode` enum is stable across the whole pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorCode {
    TokenUnexpected,
    IdUndeclared,
    TypeIncompatible,
    TypeIndeterminate,
    Unimplemented,
}

impl ErrorCode {
    pub fn code_str(self) -> &'static str {
        match self {
            ErrorCode::TokenUnexpected => "TOKEN_UNEXPECTED",
            ErrorCode::IdUndeclared => "ID_UNDECLARED",
            ErrorCode::TypeIncompatible => "TYPE_INCOMPATIBLE",
            ErrorCode::TypeIndeterminate => "TYPE_INDETERMINATE",
            ErrorCode::Unimplemented => "UNIMPLEMENTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_str())
    }
}

/// A type error encountered during inference or specialization.
///
/// Carries enough to render a single-span ariadne report: the error code,
/// a human message, and the location of the node that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TypeError {
    pub code: ErrorCode,
    pub message: String,
    pub location: Location,
}

impl TypeError {
    pub fn new(code: ErrorCode, message: impl Into<String>, location: Location) -> Self {
        TypeError { code, message: message.into(), location }
    }

    pub fn incompatible(message: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorCode::TypeIncompatible, message, location)
    }

    pub fn indeterminate(message: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorCode::TypeIndeterminate, message, location)
    }

    pub fn undeclared(name: &str, location: Location) -> Self {
        Self::new(ErrorCode::IdUndeclared, format!("undeclared identifier '{name}'"), location)
    }

    /// Reattributes this error to `location`. Used by the annotator to
    /// point a low-level solver failure (raised against a synthetic
    /// location) at the AST node whose inference triggered it.
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.location, self.message)
    }
}

impl std::error::Error for TypeError {}

/// The core's result alias. Every solver/typeable/annotator operation
/// returns this rather than panicking on an inference failure.
pub type Result<T> = std::result::Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_error_display() {
        let err = TypeError::incompatible("cannot unify Int64 with Bool", Location::synthetic());
        assert_eq!(err.to_string(), "TYPE_INCOMPATIBLE at <synthetic>:0:0: cannot unify Int64 with Bool");
    }

    #[test]
    fn undeclared_mentions_name() {
        let err = TypeError::undeclared("frobnicate", Location::synthetic());
        assert!(err.message.contains("frobnicate"));
        assert_eq!(err.code, ErrorCode::IdUndeclared);
    }
}
