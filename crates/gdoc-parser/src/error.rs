//! Error and diagnostic system for the gdoc model builder.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - A subject naming the declaration a diagnostic is about
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, subject, and
//! help text. Fatal diagnostics are wrapped in [`BuildError`] for returning
//! from the build lifecycle; warnings travel alongside a successful build.
//!
//! # Example
//!
//! ```
//! # use gdoc_parser::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::warning("method `Resize` has no documented receiver")
//!     .with_code(ErrorCode::E101)
//!     .with_subject("example.com/shop/catalog.widget")
//!     .with_help("methods on unexported types are not documented");
//! ```

mod build_error;
mod collector;
mod diagnostic;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use build_error::BuildError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
