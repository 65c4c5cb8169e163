//! gdoc Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! gdoc documentation pipeline. It includes:
//!
//! - **Identifiers**: Stable declaration identities with markup-safe digests ([`identifier::RefId`])
//! - **Analysis**: The input contract produced by a source analyzer ([`analysis`] module)
//! - **Type forms**: Structural facets of a raw type expression ([`type_form`] module)
//! - **Semantic**: The resolved, hierarchical document model ([`semantic`] module)

pub mod analysis;
pub mod identifier;
pub mod semantic;
pub mod type_form;
