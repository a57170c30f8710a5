//! Error codes for all front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the category.

use std::fmt;

/// Error codes for front-end diagnostics.
///
/// Format: E#### where the first digit indicates the category:
/// - E2xxx: Type and symbol errors
/// - E9xxx: Internal compiler errors and aborts
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type and symbol errors (E2xxx)
    /// Map key type is not comparable
    E2001,
    /// Selector reaches more than one member at the shallowest depth
    E2002,
    /// Concrete type does not implement an interface
    E2003,
    /// Implicit interface conversion needs an explicit type assertion
    E2004,
    /// Name collision while importing a package's exported names
    E2005,
    /// Array bound is not a non-negative integer constant
    E2006,
    /// Reference to an unexported name of another package
    E2007,
    /// Forward-declared type never defined before export
    E2008,

    // Internal (E9xxx)
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "invalid map key type",
            ErrorCode::E2002 => "ambiguous selector",
            ErrorCode::E2003 => "type does not implement interface",
            ErrorCode::E2004 => "need type assertion",
            ErrorCode::E2005 => "redeclaration during import",
            ErrorCode::E2006 => "invalid array bound",
            ErrorCode::E2007 => "reference to unexported name",
            ErrorCode::E2008 => "undefined type",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    /// Check if this is a type or symbol error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        !self.is_internal_error()
    }

    /// Check if this is an internal compiler error or abort (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
