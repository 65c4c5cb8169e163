//! Symbol resolution.
//!
//! Symbol tables are loaded once from a [`SourceAnalyzer`] into a
//! [`SymbolContext`] before anything is resolved. The [`Resolver`] then
//! classifies each [`TypeDesc`] against that context only, so resolving the
//! same model twice yields the same origins and identities.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use thiserror::Error;

use gdoc_core::{
    analysis::{AnalyzedPackage, SourceAnalysis, is_exported},
    identifier::RefId,
    semantic::{Module, TypeDesc, TypeOrigin},
    type_form::TypeShape,
};

/// Failure reported by a [`SourceAnalyzer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("cannot load package `{import_path}`: {reason}")]
    LoadFailure { import_path: String, reason: String },

    #[error("package `{0}` is not known to the analyzer")]
    UnknownPackage(String),
}

impl AnalyzerError {
    /// The package that failed to load.
    pub fn import_path(&self) -> &str {
        match self {
            Self::LoadFailure { import_path, .. } | Self::UnknownPackage(import_path) => {
                import_path
            }
        }
    }
}

/// The exported symbols of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    import_path: String,
    name: String,
    imports: BTreeSet<String>,
    symbols: BTreeSet<String>,
}

impl SymbolTable {
    pub fn new<S, I>(
        import_path: impl Into<String>,
        name: impl Into<String>,
        symbols: S,
        imports: I,
    ) -> Self
    where
        S: IntoIterator<Item = String>,
        I: IntoIterator<Item = String>,
    {
        Self {
            import_path: import_path.into(),
            name: name.into(),
            imports: imports.into_iter().collect(),
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when `identifier` is declared and exported here.
    pub fn contains(&self, identifier: &str) -> bool {
        self.symbols.contains(identifier)
    }

    pub fn imports(&self, import_path: &str) -> bool {
        self.imports.contains(import_path)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Front-end that knows the symbols of each analyzed package.
pub trait SourceAnalyzer {
    /// Loads the exported-symbol table of the package at `import_path`.
    fn load_symbols(&self, import_path: &str) -> Result<SymbolTable, AnalyzerError>;
}

impl SourceAnalyzer for SourceAnalysis {
    fn load_symbols(&self, import_path: &str) -> Result<SymbolTable, AnalyzerError> {
        let package = self
            .packages
            .iter()
            .find(|p| p.import_path == import_path)
            .ok_or_else(|| AnalyzerError::UnknownPackage(import_path.to_string()))?;

        if let Some(reason) = &package.load_error {
            return Err(AnalyzerError::LoadFailure {
                import_path: import_path.to_string(),
                reason: reason.clone(),
            });
        }

        let symbols = match &package.symbols {
            Some(symbols) => symbols.clone(),
            None => exported_declarations(package),
        };

        Ok(SymbolTable::new(
            package.import_path.clone(),
            package.name.clone(),
            symbols,
            package.imports.iter().cloned(),
        ))
    }
}

/// Collects the exported package-level names of an analyzed package.
fn exported_declarations(package: &AnalyzedPackage) -> Vec<String> {
    let values = package
        .consts
        .iter()
        .chain(&package.vars)
        .flat_map(|group| &group.specs)
        .flat_map(|spec| &spec.names);
    let types = package.types.iter().map(|decl| &decl.name);
    let funcs = package
        .funcs
        .iter()
        .filter(|decl| decl.receiver.is_none())
        .map(|decl| &decl.name);

    values
        .chain(types)
        .chain(funcs)
        .filter(|name| is_exported(name))
        .cloned()
        .collect()
}

/// Symbol tables of every analyzed package, keyed by import path.
///
/// Built once per run and passed explicitly to the [`Resolver`].
#[derive(Debug, Clone, Default)]
pub struct SymbolContext {
    tables: BTreeMap<String, SymbolTable>,
}

impl SymbolContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the tables of `import_paths`, returning every failure.
    pub fn load<'a, I>(
        analyzer: &dyn SourceAnalyzer,
        import_paths: I,
    ) -> Result<Self, Vec<AnalyzerError>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut context = Self::new();
        let mut failures = Vec::new();

        for import_path in import_paths {
            match analyzer.load_symbols(import_path) {
                Ok(table) => context.insert(table),
                Err(err) => failures.push(err),
            }
        }

        if failures.is_empty() {
            Ok(context)
        } else {
            Err(failures)
        }
    }

    pub fn insert(&mut self, table: SymbolTable) {
        self.tables.insert(table.import_path.clone(), table);
    }

    pub fn table(&self, import_path: &str) -> Option<&SymbolTable> {
        self.tables.get(import_path)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Finds the package a qualifier refers to from inside `current`.
    ///
    /// Among packages sharing the short name, one imported by `current` wins;
    /// otherwise the smallest import path does.
    fn qualified_package(
        &self,
        current: Option<&SymbolTable>,
        qualifier: &str,
    ) -> Option<&SymbolTable> {
        let mut candidates = self.tables.values().filter(|t| t.name == qualifier);
        let first = candidates.next()?;
        let imported = current.and_then(|current| {
            std::iter::once(first)
                .chain(candidates)
                .find(|t| current.imports(&t.import_path))
        });
        Some(imported.unwrap_or(first))
    }
}

/// Classifies type occurrences against a [`SymbolContext`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    context: &'a SymbolContext,
}

impl<'a> Resolver<'a> {
    pub fn new(context: &'a SymbolContext) -> Self {
        Self { context }
    }

    /// Classifies `desc` as seen from the package at `import_path`, in place.
    ///
    /// Map types are classified as built-in and each side is resolved on its own.
    pub fn resolve(&self, import_path: &str, desc: &mut TypeDesc) {
        let (origin, ref_id) = self.classify(import_path, desc);
        trace!(raw = desc.raw(), origin:? = origin; "Resolved type");
        desc.resolve_as(origin, ref_id);

        if let Some(map) = desc.map_type_mut() {
            self.resolve(import_path, &mut map.key);
            self.resolve(import_path, &mut map.value);
        }
    }

    /// Resolves every type occurrence of every package in `module`.
    pub fn resolve_module(&self, module: &mut Module) {
        for package in module.packages.values_mut() {
            let import_path = package.import_path.clone();
            let mut resolved = 0usize;
            package.visit_type_descs_mut(&mut |desc| {
                self.resolve(&import_path, desc);
                resolved += 1;
            });
            debug!(package = import_path.as_str(), resolved = resolved; "Package resolved");
        }
    }

    fn classify(&self, import_path: &str, desc: &TypeDesc) -> (TypeOrigin, Option<RefId>) {
        let TypeShape::Named {
            qualifier,
            identifier,
            ..
        } = desc.form().shape()
        else {
            return (TypeOrigin::BuiltIn, None);
        };

        let current = self.context.table(import_path);
        match qualifier {
            None => match current {
                Some(table) if table.contains(identifier) => (
                    TypeOrigin::LocalCustom,
                    Some(RefId::new(table.import_path.clone(), identifier.clone())),
                ),
                _ => (TypeOrigin::BuiltIn, None),
            },
            Some(qualifier) => match self.context.qualified_package(current, qualifier) {
                Some(table) if table.contains(identifier) => {
                    let origin = if table.import_path == import_path {
                        TypeOrigin::LocalCustom
                    } else {
                        TypeOrigin::ExternalCustom
                    };
                    (
                        origin,
                        Some(RefId::new(table.import_path.clone(), identifier.clone())),
                    )
                }
                _ => (TypeOrigin::ExternalNonCustom, None),
            },
        }
    }
}
