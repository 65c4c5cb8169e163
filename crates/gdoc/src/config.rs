//! Configuration types for gdoc documentation runs.
//!
//! This module provides configuration structures that control how the
//! document model is built and how it is rendered. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining build and render settings.
//! - [`BuildSection`] - Controls package selection, constructor matching, path labels and comment linking.
//! - [`RenderConfig`] - Controls the document header.
//!
//! # Example
//!
//! ```
//! # use gdoc::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.build().link_comments());
//! assert_eq!(config.render().header_attributes(), vec![":docinfo: shared", ":toc:"]);
//! ```

use serde::Deserialize;

use gdoc_parser::{BuildConfig, DEFAULT_PACKAGE_SEPARATOR};

/// Top-level application configuration combining build and render settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Build configuration section.
    #[serde(default)]
    build: BuildSection,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified build and render configurations.
    ///
    /// # Arguments
    ///
    /// * `build` - Model build settings.
    /// * `render` - Document header settings.
    pub fn new(build: BuildSection, render: RenderConfig) -> Self {
        Self { build, render }
    }

    /// Returns the build configuration.
    pub fn build(&self) -> &BuildSection {
        &self.build
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Settings of the model build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Function name prefixes marking a constructor.
    constructor_prefixes: Vec<String>,

    /// Separator written in place of `/` in import paths.
    package_separator: String,

    /// Whether identifiers in comments become cross references.
    link_comments: bool,

    /// Import paths to document; empty documents every package.
    packages: Vec<String>,
}

impl BuildSection {
    pub fn new(
        constructor_prefixes: Vec<String>,
        package_separator: impl Into<String>,
        link_comments: bool,
    ) -> Self {
        Self {
            constructor_prefixes,
            package_separator: package_separator.into(),
            link_comments,
            packages: Vec::new(),
        }
    }

    /// Restricts the documented packages to `packages`.
    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = packages;
        self
    }

    pub fn constructor_prefixes(&self) -> &[String] {
        &self.constructor_prefixes
    }

    pub fn package_separator(&self) -> &str {
        &self.package_separator
    }

    pub fn link_comments(&self) -> bool {
        self.link_comments
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Returns the parser configuration for this section.
    pub fn to_build_config(&self) -> BuildConfig {
        BuildConfig::new(
            self.constructor_prefixes.clone(),
            self.package_separator.clone(),
            self.link_comments,
        )
        .with_packages(self.packages.clone())
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self::new(vec!["New".to_string()], DEFAULT_PACKAGE_SEPARATOR, true)
    }
}

/// Document header settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit a table of contents.
    toc: bool,

    /// Value of the `:docinfo:` attribute; `None` leaves it out.
    docinfo: Option<String>,

    /// Extra header attribute lines, e.g. `":icons: font"`.
    attributes: Vec<String>,
}

impl RenderConfig {
    pub fn new(toc: bool, docinfo: Option<String>, attributes: Vec<String>) -> Self {
        Self {
            toc,
            docinfo,
            attributes,
        }
    }

    pub fn toc(&self) -> bool {
        self.toc
    }

    pub fn docinfo(&self) -> Option<&str> {
        self.docinfo.as_deref()
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Returns the header attribute lines in output order.
    pub fn header_attributes(&self) -> Vec<String> {
        let docinfo = self.docinfo.iter().map(|value| format!(":docinfo: {value}"));
        let toc = self.toc.then(|| ":toc:".to_string());

        docinfo
            .chain(toc)
            .chain(self.attributes.iter().cloned())
            .collect()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, Some("shared".to_string()), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.build().constructor_prefixes(), ["New"]);
        assert_eq!(config.build().package_separator(), "/");
        assert!(config.build().link_comments());
        assert!(config.build().packages().is_empty());
        assert!(config.render().toc());
        assert_eq!(config.render().docinfo(), Some("shared"));
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [build]
            constructor_prefixes = ["New", "Make"]

            [render]
            toc = false
            attributes = [":icons: font"]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.build().constructor_prefixes(), ["New", "Make"]);
        assert_eq!(config.build().package_separator(), "/");
        assert!(config.build().link_comments());
        assert_eq!(
            config.render().header_attributes(),
            vec![":docinfo: shared", ":icons: font"]
        );
    }

    #[test]
    fn test_empty_toml() {
        let config: AppConfig = toml::from_str("").expect("valid config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_to_build_config() {
        let section = BuildSection::new(vec!["Open".to_string()], ".", false);
        let build = section.to_build_config();

        assert_eq!(build.constructor_prefixes, vec!["Open"]);
        assert_eq!(build.package_separator, ".");
        assert!(!build.link_comments);
        assert!(build.packages.is_empty());
    }

    #[test]
    fn test_package_selection() {
        let config: AppConfig = toml::from_str(
            r#"
            [build]
            packages = ["example.com/shop", "example.com/shop/catalog"]
            "#,
        )
        .expect("valid config");

        assert_eq!(
            config.build().packages(),
            ["example.com/shop", "example.com/shop/catalog"]
        );
        assert_eq!(
            config.build().to_build_config().packages,
            vec!["example.com/shop", "example.com/shop/catalog"]
        );
    }

    #[test]
    fn test_header_without_docinfo() {
        let render = RenderConfig::new(true, None, Vec::new());
        assert_eq!(render.header_attributes(), vec![":toc:"]);
    }
}
