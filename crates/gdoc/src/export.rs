//! Export functionality for gdoc document models.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a resolved [`Module`] into an output document. It is the final
//! stage in the gdoc processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Analyzer Output
//!     ↓ build
//! Document Model
//!     ↓ resolve + link
//! Resolved Module
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`asciidoc`] - AsciiDoc output via [`asciidoc::AsciiDocBuilder`] and [`asciidoc::AsciiDoc`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`GdocError`] at the crate boundary.
//!
//! [`GdocError`]: crate::GdocError

/// AsciiDoc export backend.
pub mod asciidoc;

use gdoc_core::semantic::Module;

/// Abstraction for document export backends.
///
/// See the [`asciidoc`] module for the built-in AsciiDoc implementation.
pub trait Exporter {
    /// Exports a resolved module to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the module cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_module(&mut self, module: &Module) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into a [`GdocError`] at the crate boundary via the
/// [`From`] implementation in [`crate::error`].
///
/// [`GdocError`]: crate::GdocError
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
