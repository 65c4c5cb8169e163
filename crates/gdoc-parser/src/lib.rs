//! # gdoc Parser
//!
//! Turns the output of a Go source analyzer into a resolved, cross-linked
//! document model.
//!
//! ## Usage
//!
//! ```
//! # use gdoc_parser::{build, BuildConfig, BuildError};
//! use gdoc_core::analysis::{AnalyzedPackage, SourceAnalysis};
//!
//! fn main() -> Result<(), BuildError> {
//!     let analysis = SourceAnalysis {
//!         module: "example.com/shop".to_string(),
//!         packages: vec![AnalyzedPackage {
//!             import_path: "example.com/shop".to_string(),
//!             name: "shop".to_string(),
//!             ..AnalyzedPackage::default()
//!         }],
//!         ..SourceAnalysis::default()
//!     };
//!
//!     let output = build(&analysis, BuildConfig::default())?;
//!     assert_eq!(output.module.packages.len(), 1);
//!     Ok(())
//! }
//! ```

mod builder;
mod constructor;
pub mod error;
mod linker;
mod registry;
mod resolver;
pub mod type_form;

pub use constructor::{ConstructorPolicy, PrefixConstructorPolicy};
pub use error::{BuildError, Diagnostic, ErrorCode, Severity};
pub use linker::{CommentLinker, LexicalTieBreak, LinkTieBreak};
pub use registry::{CrossRefRegistry, PackageEntry, anchor_id_of, link_target_of};
pub use resolver::{AnalyzerError, Resolver, SourceAnalyzer, SymbolContext, SymbolTable};

use log::{debug, info, warn};

use gdoc_core::{analysis::SourceAnalysis, semantic::Module};

use builder::Builder;
use error::DiagnosticCollector;

/// Import path separator used by the analyzer.
pub const DEFAULT_PACKAGE_SEPARATOR: &str = "/";

/// Configuration of a model build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Name prefixes that mark a function as a constructor.
    pub constructor_prefixes: Vec<String>,
    /// Separator written in place of `/` in import paths.
    pub package_separator: String,
    /// Whether comments are rewritten into cross references.
    pub link_comments: bool,
    /// Import paths to document. Empty selects every analyzed package.
    pub packages: Vec<String>,
}

impl BuildConfig {
    pub fn new(
        constructor_prefixes: Vec<String>,
        package_separator: String,
        link_comments: bool,
    ) -> Self {
        Self {
            constructor_prefixes,
            package_separator,
            link_comments,
            packages: Vec::new(),
        }
    }

    /// Restricts the build to the given import paths.
    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = packages;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(
            vec!["New".to_string()],
            DEFAULT_PACKAGE_SEPARATOR.to_string(),
            true,
        )
    }
}

/// A built module and the warnings reported while building it.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub module: Module,
    pub warnings: Vec<Diagnostic>,
}

/// Builds a document model with pluggable policies.
///
/// [`build`] covers the common case; use this type to swap the symbol
/// source, the constructor policy, or the link tie-break.
pub struct ModelBuilder<'a> {
    config: BuildConfig,
    analyzer: Option<&'a dyn SourceAnalyzer>,
    constructor_policy: Box<dyn ConstructorPolicy + 'a>,
    tie_break: Box<dyn LinkTieBreak + 'a>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: BuildConfig) -> Self {
        let constructor_policy = PrefixConstructorPolicy::new(config.constructor_prefixes.clone());
        Self {
            config,
            analyzer: None,
            constructor_policy: Box::new(constructor_policy),
            tie_break: Box::new(LexicalTieBreak),
        }
    }

    /// Loads symbol tables from `analyzer` instead of the analysis itself.
    pub fn with_analyzer(mut self, analyzer: &'a dyn SourceAnalyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_constructor_policy(mut self, policy: impl ConstructorPolicy + 'a) -> Self {
        self.constructor_policy = Box::new(policy);
        self
    }

    pub fn with_tie_break(mut self, tie_break: impl LinkTieBreak + 'a) -> Self {
        self.tie_break = Box::new(tie_break);
        self
    }

    /// Builds, resolves and links the model of `analysis`.
    ///
    /// Packages outside [`BuildConfig::packages`] are dropped before anything
    /// else runs. The pipeline then runs in order:
    ///
    /// 1. **Load** - Read the symbol table of every package; any failure aborts
    /// 2. **Build** - Create the unresolved model of exported declarations
    /// 3. **Resolve** - Classify every type occurrence
    /// 4. **Link** - Rewrite comments into cross references
    /// 5. **Relabel** - Apply the package path separator
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] carrying an `E001` diagnostic per package the
    /// analyzer could not load.
    pub fn build(self, analysis: &SourceAnalysis) -> Result<BuildOutput, BuildError> {
        let selected;
        let analysis = if self.config.packages.is_empty() {
            analysis
        } else {
            selected = select_packages(analysis, &self.config.packages);
            &selected
        };
        let analyzer: &dyn SourceAnalyzer = match self.analyzer {
            Some(analyzer) => analyzer,
            None => analysis,
        };

        // Step 1: Load
        info!(packages = analysis.packages.len(); "Loading symbol tables");
        let import_paths = analysis.packages.iter().map(|p| p.import_path.as_str());
        let context = SymbolContext::load(analyzer, import_paths).map_err(|failures| {
            BuildError::new(failures.iter().map(load_failure).collect())
        })?;

        // Step 2: Build
        let mut diagnostics = DiagnosticCollector::new();
        let mut module =
            Builder::new(self.constructor_policy.as_ref(), &mut diagnostics).build_module(analysis);

        // Step 3: Resolve
        Resolver::new(&context).resolve_module(&mut module);

        // Step 4: Link
        if self.config.link_comments {
            let registry = CrossRefRegistry::from_module(&module);
            info!(declarations = registry.len(); "Linking comments");
            CommentLinker::new(&registry, self.tie_break.as_ref()).link_module(&mut module);
        }

        // Step 5: Relabel
        if self.config.package_separator != DEFAULT_PACKAGE_SEPARATOR {
            module = module.relabel_paths(&self.config.package_separator);
        }

        let warnings = diagnostics.finish()?;
        info!(
            packages = module.packages.len(),
            warnings = warnings.len();
            "Module built"
        );

        Ok(BuildOutput { module, warnings })
    }
}

/// Build a resolved, cross-linked document model from analyzer output.
///
/// This is the main entry point of the crate, using the default policies
/// and the analysis itself as symbol source.
///
/// # Example
///
/// ```
/// # use gdoc_parser::{build, BuildConfig, BuildError};
/// # use gdoc_core::analysis::SourceAnalysis;
/// fn main() -> Result<(), BuildError> {
///     let output = build(&SourceAnalysis::default(), BuildConfig::default())?;
///     assert!(output.module.packages.is_empty());
///     Ok(())
/// }
/// ```
pub fn build(analysis: &SourceAnalysis, config: BuildConfig) -> Result<BuildOutput, BuildError> {
    ModelBuilder::new(config).build(analysis)
}

/// Keeps the packages of `analysis` whose import path is listed.
fn select_packages(analysis: &SourceAnalysis, packages: &[String]) -> SourceAnalysis {
    for wanted in packages {
        if !analysis.packages.iter().any(|p| &p.import_path == wanted) {
            warn!(package = wanted.as_str(); "Selected package is not in the analysis");
        }
    }

    let kept = analysis
        .packages
        .iter()
        .filter(|p| {
            let selected = packages.contains(&p.import_path);
            if !selected {
                debug!(package = p.import_path.as_str(); "Package not selected");
            }
            selected
        })
        .cloned()
        .collect();

    SourceAnalysis {
        module: analysis.module.clone(),
        readme: analysis.readme.clone(),
        packages: kept,
    }
}

fn load_failure(failure: &AnalyzerError) -> Diagnostic {
    Diagnostic::error(failure.to_string())
        .with_code(ErrorCode::E001)
        .with_subject(failure.import_path().to_string())
        .with_help("no document is produced until the package loads")
}
