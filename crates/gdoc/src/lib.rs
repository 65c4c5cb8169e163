//! gdoc - Cross-referenced AsciiDoc documentation for Go modules.
//!
//! Builds a resolved document model from the structural description of a
//! Go module and renders it as one AsciiDoc document, with every type
//! occurrence and comment mention linked to its declaration.

pub mod config;

mod error;
mod export;

pub use gdoc_core::{analysis, identifier, semantic};
pub use gdoc_parser::{BuildOutput, Diagnostic, ErrorCode, Severity};

pub use error::GdocError;
pub use export::asciidoc::reflow;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, asciidoc::AsciiDocBuilder};

/// Builder for documenting Go modules.
///
/// This provides an API for processing a module description through the
/// model building and rendering stages.
///
/// # Examples
///
/// ```rust
/// use gdoc::{DocBuilder, analysis::{AnalyzedPackage, SourceAnalysis}, config::AppConfig};
///
/// let analysis = SourceAnalysis {
///     module: "example.com/shop".to_string(),
///     packages: vec![AnalyzedPackage {
///         import_path: "example.com/shop".to_string(),
///         name: "shop".to_string(),
///         ..AnalyzedPackage::default()
///     }],
///     ..SourceAnalysis::default()
/// };
///
/// let builder = DocBuilder::new(AppConfig::default());
/// let output = builder.build(&analysis).expect("Failed to build");
/// let document = builder
///     .render_asciidoc(&output.module)
///     .expect("Failed to render");
///
/// assert!(document.contains("= Module example.com/shop"));
/// ```
#[derive(Debug, Default)]
pub struct DocBuilder {
    config: AppConfig,
}

impl DocBuilder {
    /// Create a new documentation builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including build and render settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the resolved document model of an analyzed module.
    ///
    /// Loads every package's symbols, builds the model of its exported
    /// declarations, resolves every type occurrence and links comments.
    ///
    /// # Errors
    ///
    /// Returns [`GdocError::Build`] when a package could not be loaded.
    /// Recoverable problems are returned as warnings in the output.
    pub fn build(&self, analysis: &analysis::SourceAnalysis) -> Result<BuildOutput, GdocError> {
        info!(module = analysis.module.as_str(); "Building document model");

        let output = gdoc_parser::build(analysis, self.config.build().to_build_config())?;

        debug!(warnings = output.warnings.len(); "Document model built");
        trace!(module:? = output.module; "Built module");

        Ok(output)
    }

    /// Render a resolved module to an AsciiDoc string.
    ///
    /// # Errors
    ///
    /// Returns [`GdocError::Render`] when the module holds a type that was
    /// never resolved.
    pub fn render_asciidoc(&self, module: &semantic::Module) -> Result<String, GdocError> {
        let renderer = AsciiDocBuilder::new()
            .with_config(self.config.render())
            .build();

        let document = renderer.render_module(module)?;

        info!(bytes = document.len(); "AsciiDoc rendered successfully");
        Ok(document)
    }

    /// Render a resolved module and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GdocError::Render`] for rendering failures and
    /// [`GdocError::Export`] when the file cannot be written.
    pub fn export_asciidoc(
        &self,
        module: &semantic::Module,
        path: impl AsRef<Path>,
    ) -> Result<(), GdocError> {
        let mut exporter = AsciiDocBuilder::new()
            .with_config(self.config.render())
            .with_file(path.as_ref())
            .build();

        exporter.export_module(module)?;
        Ok(())
    }
}
