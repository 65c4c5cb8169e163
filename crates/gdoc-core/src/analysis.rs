//! Input contract produced by a source analyzer.
//!
//! These types mirror what a front-end knows about each package after
//! reading the source: declarations with their raw type-expression text and
//! raw comment text, the package imports and the set of exported symbols.
//! They are plain data and deserialize from an analyzer dump, so the
//! pipeline can run without the front-end being linked in.
//!
//! In an analyzer dump, type expressions are stored under the `type` key.
//! Unknown keys are rejected, so a misspelled key fails to load instead of
//! leaving its field empty:
//!
//! ```toml
//! module = "example.com/shop"
//!
//! [[packages]]
//! import_path = "example.com/shop/catalog"
//! name = "catalog"
//!
//! [[packages.types]]
//! name = "Widget"
//! doc = "Widget is a sellable item."
//!
//! [[packages.types.fields]]
//! names = ["ID"]
//! type = "int"
//! ```

use serde::Deserialize;

/// Everything the analyzer extracted from one module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceAnalysis {
    /// Module name, used as the document title.
    pub module: String,
    pub readme: String,
    pub packages: Vec<AnalyzedPackage>,
}

/// One analyzed package.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzedPackage {
    pub import_path: String,
    /// Short package name as used in qualified identifiers.
    pub name: String,
    pub doc: String,
    pub readme: String,
    /// Import paths referenced by the package, in any order.
    pub imports: Vec<String>,
    /// Exported symbol table. When absent it is derived from the exported
    /// declarations below.
    pub symbols: Option<Vec<String>>,
    /// Set when the analyzer could not load the package.
    pub load_error: Option<String>,
    pub consts: Vec<ValueGroup>,
    pub vars: Vec<ValueGroup>,
    pub types: Vec<TypeDecl>,
    pub funcs: Vec<FuncDecl>,
}

/// A `const (...)` or `var (...)` block, or a single ungrouped declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueGroup {
    /// Documentation attached to the whole block.
    pub doc: String,
    pub specs: Vec<ValueSpec>,
}

/// One line of a value block, possibly naming several values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueSpec {
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_expr: Option<String>,
    /// Value expressions, positionally matching `names`.
    pub values: Vec<String>,
    pub doc: String,
    /// Trailing line comment.
    pub comment: String,
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDeclKind {
    #[default]
    Struct,
    Interface,
    /// `type Name Underlying`
    Defined,
}

/// A type declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    pub doc: String,
    pub kind: TypeDeclKind,
    /// Underlying type expression of a defined type.
    pub underlying: Option<String>,
    pub type_params: Vec<FieldDecl>,
    /// Struct fields in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Interface method set.
    pub methods: Vec<FuncDecl>,
}

/// A field, parameter, result or type parameter declaration.
///
/// An empty `names` list means an embedded field or an unnamed parameter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldDecl {
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_expr: String,
    pub doc: String,
    pub comment: String,
}

/// A function or method declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuncDecl {
    pub name: String,
    pub doc: String,
    pub receiver: Option<FieldDecl>,
    pub type_params: Vec<FieldDecl>,
    pub params: Vec<FieldDecl>,
    pub results: Vec<FieldDecl>,
}

impl FieldDecl {
    /// Creates a declaration naming a single field.
    pub fn named(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            type_expr: type_expr.into(),
            ..Self::default()
        }
    }

    /// Creates an unnamed declaration, e.g. an anonymous result.
    pub fn unnamed(type_expr: impl Into<String>) -> Self {
        Self {
            type_expr: type_expr.into(),
            ..Self::default()
        }
    }
}

/// Returns `true` when `name` is visible outside its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
