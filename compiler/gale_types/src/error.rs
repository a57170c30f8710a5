//! Errors reported by type-graph operations.
//!
//! These carry handles rather than rendered text; the caller formats the
//! types involved when it turns the error into a diagnostic.

use gale_diagnostic::ErrorCode;
use gale_ir::{SymId, TypeId};

/// A user-facing error detected while building or querying types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Map key type is not comparable.
    #[error("invalid map key type")]
    InvalidMapKey { key: TypeId, line: u32 },
    /// Array bound is not an integer constant.
    #[error("array bound must be an integer expression")]
    NonConstantArrayBound,
    /// Array bound is a negative constant.
    #[error("array bound must be non negative")]
    NegativeArrayBound { bound: i64 },
    /// Two promotion paths of the same depth reach the selector.
    #[error("ambiguous selector")]
    AmbiguousSelector { ty: TypeId, sym: SymId },
}

impl TypeError {
    /// Error code of the diagnostic this error becomes.
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::InvalidMapKey { .. } => ErrorCode::E2001,
            TypeError::NonConstantArrayBound | TypeError::NegativeArrayBound { .. } => {
                ErrorCode::E2006
            }
            TypeError::AmbiguousSelector { .. } => ErrorCode::E2002,
        }
    }
}

/// Failure to render a type in export form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A forward-declared type was never defined.
    #[error("undefined type")]
    UndefinedType { sym: Option<SymId> },
}
