//! Error codes for the gdoc diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Analyzer errors
//! - `E1xx` - Model building warnings
//! - `E2xx` - Type resolution warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Analyzer Errors (E0xx)
    // =========================================================================
    /// Analyzer load failure.
    ///
    /// The source analyzer could not produce a symbol table for a package.
    /// Every cross-reference would be unreliable, so the whole run aborts.
    E001,

    // =========================================================================
    // Model Building (E1xx)
    // =========================================================================
    /// Duplicate declaration.
    ///
    /// A name is declared more than once in the same package. The first
    /// declaration is kept.
    E100,

    /// Orphaned method.
    ///
    /// A method receiver does not name an exported type of its package.
    E101,

    // =========================================================================
    // Type Resolution (E2xx)
    // =========================================================================
    /// Malformed type form.
    ///
    /// A type expression has no structural decomposition and is rendered as
    /// plain text.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "analyzer load failure",
            ErrorCode::E100 => "duplicate declaration",
            ErrorCode::E101 => "orphaned method",
            ErrorCode::E200 => "malformed type form",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E101.as_str(), "E101");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "analyzer load failure");
        assert_eq!(ErrorCode::E100.description(), "duplicate declaration");
        assert_eq!(ErrorCode::E200.description(), "malformed type form");
    }
}
