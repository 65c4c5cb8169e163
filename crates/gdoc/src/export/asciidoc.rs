//! AsciiDoc export backend.
//!
//! [`AsciiDocBuilder`] configures an [`AsciiDoc`] renderer, which turns a
//! resolved [`Module`] into one document: a header, the module title and
//! readme, then one section per package in name order.
//!
//! Every declaration gets an anchor derived from its [`RefId`] digest, and
//! every linkable type occurrence points at that same digest, so links work
//! no matter where the target ends up in the document.
//!
//! [`RefId`]: gdoc_core::identifier::RefId

mod comment;
mod declarations;
mod markup;
mod types;

pub use comment::reflow;

use std::{fs, path::PathBuf};

use log::{debug, info};

use gdoc_core::semantic::Module;

use super::{Error, Exporter};
use crate::config::RenderConfig;
use markup::title;

/// Builder for [`AsciiDoc`] renderers.
#[derive(Debug, Default)]
pub struct AsciiDocBuilder {
    file_path: Option<PathBuf>,
    header: Vec<String>,
}

impl AsciiDocBuilder {
    /// Creates a builder with the default header.
    pub fn new() -> Self {
        Self::default().with_config(&RenderConfig::default())
    }

    /// Sets the file written by [`Exporter::export_module`].
    pub fn with_file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Takes the header attributes from `config`.
    pub fn with_config(mut self, config: &RenderConfig) -> Self {
        self.header = config.header_attributes();
        self
    }

    pub fn build(self) -> AsciiDoc {
        AsciiDoc {
            file_path: self.file_path,
            header: self.header,
        }
    }
}

/// Renders resolved modules as AsciiDoc.
#[derive(Debug)]
pub struct AsciiDoc {
    file_path: Option<PathBuf>,
    header: Vec<String>,
}

impl AsciiDoc {
    /// Renders `module` into a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when the module holds an unresolved type.
    pub fn render_module(&self, module: &Module) -> Result<String, Error> {
        info!(module = module.name.as_str(), packages = module.packages.len(); "Rendering module");

        let mut sections = Vec::new();
        if !self.header.is_empty() {
            sections.push(self.header.join("\n"));
        }

        sections.push(title(1, &format!("Module {}", module.name)));
        if !module.readme.trim().is_empty() {
            sections.push(format!("{}\n{}", title(2, "Readme"), module.readme.trim()));
        }

        for package in module.sorted_packages() {
            debug!(package = package.import_path.as_str(); "Rendering package");
            sections.push(self.render_package(package)?);
        }

        let mut document = sections.join("\n\n");
        document.push('\n');
        Ok(document)
    }
}

impl Exporter for AsciiDoc {
    fn export_module(&mut self, module: &Module) -> Result<(), Error> {
        let Some(file_path) = &self.file_path else {
            return Err(Error::Render("no output file configured".to_string()));
        };

        let document = self.render_module(module)?;
        fs::write(file_path, document).map_err(Error::Io)?;

        info!(output_file = file_path.display().to_string(); "AsciiDoc exported");
        Ok(())
    }
}
