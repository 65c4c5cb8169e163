//! Error types for gdoc operations.
//!
//! This module provides the main error type [`GdocError`] which wraps
//! the error conditions of a documentation run.

use std::io;

use thiserror::Error;

use gdoc_parser::BuildError;

/// The main error type for gdoc operations.
///
/// # Diagnostic Variants
///
/// The `Build` variant carries every diagnostic reported while the model
/// was built, so that each can be reported on its own.
#[derive(Debug, Error)]
pub enum GdocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Build { err: BuildError },

    #[error("Invalid analysis input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<BuildError> for GdocError {
    fn from(err: BuildError) -> Self {
        Self::Build { err }
    }
}

impl From<crate::export::Error> for GdocError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Render(message) => Self::Render(message),
            error @ crate::export::Error::Io(_) => Self::Export(Box::new(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdoc_parser::{Diagnostic, ErrorCode};

    #[test]
    fn test_build_error_display() {
        let err: GdocError = BuildError::from(
            Diagnostic::error("cannot load package `m/a`").with_code(ErrorCode::E001),
        )
        .into();

        assert!(matches!(err, GdocError::Build { .. }));
        assert_eq!(err.to_string(), "error[E001]: cannot load package `m/a`");
    }

    #[test]
    fn test_render_error_conversion() {
        let err = GdocError::from(crate::export::Error::Render("unresolved".to_string()));
        assert_eq!(err.to_string(), "Render error: unresolved");
    }

    #[test]
    fn test_export_io_error_conversion() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = GdocError::from(crate::export::Error::Io(io));
        assert!(matches!(err, GdocError::Export(_)));
    }
}
