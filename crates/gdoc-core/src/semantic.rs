//! Semantic documentation model types.
//!
//! This module contains the resolved, hierarchical representation of a
//! module after building. Every type occurrence carries a [`TypeDesc`] that
//! the resolver classifies exactly once; after that the model is read-only
//! and handed to an exporter.
//!
//! # Pipeline Position
//!
//! ```text
//! Analyzer output (analysis)
//!     ↓ builder
//! Unresolved Model (these types, origins unset)
//!     ↓ resolver + comment linker
//! Resolved Model (these types)
//!     ↓ export
//! AsciiDoc
//! ```
//!
//! # Organization
//!
//! - [`module`] - Containers: [`Module`], [`Package`]
//! - [`declaration`] - Declarations: [`Struct`], [`Function`], [`Method`], [`Field`], [`Stereotype`], etc.
//! - [`type_desc`] - Type occurrences: [`TypeDesc`], [`TypeOrigin`], [`MapType`]

pub mod declaration;
pub mod module;
pub mod type_desc;

pub use declaration::*;
pub use module::*;
pub use type_desc::*;
