//! Structural decomposition of raw type expressions.
//!
//! A [`TypeForm`] splits a type expression such as `*[]pkg.Foo` into its
//! ordered prefix [`Facet`]s and a [`TypeShape`] describing what remains.
//! Producing a form from text lives in the parser crate; this module only
//! holds the vocabulary and the helpers used when re-rendering it.

use std::fmt;

/// A single prefix marker in front of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// `*`
    Pointer,
    /// `[]`
    Slice,
    /// `[N]` with a literal length.
    Array(u64),
    /// `...` on a variadic parameter.
    Variadic,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Pointer => write!(f, "*"),
            Facet::Slice => write!(f, "[]"),
            Facet::Array(len) => write!(f, "[{len}]"),
            Facet::Variadic => write!(f, "..."),
        }
    }
}

/// What is left of a type expression once its prefix facets are removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A possibly package-qualified name, e.g. `pkg.Foo` or `List[T]`.
    Named {
        qualifier: Option<String>,
        identifier: String,
        /// Raw text between the brackets of a generic instantiation.
        type_args: Option<String>,
    },
    /// `map[key]value`, with both sides kept as raw text.
    Map { key: String, value: String },
    /// Anything without a structural decomposition (channels, function
    /// literals, inline struct or interface types).
    Plain,
}

/// Structural facets of one type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeForm {
    facets: Vec<Facet>,
    shape: TypeShape,
}

impl TypeForm {
    /// Creates a form from its facets, in left-to-right order, and shape.
    pub fn new(facets: Vec<Facet>, shape: TypeShape) -> Self {
        Self { facets, shape }
    }

    /// A form with no structure at all.
    pub fn plain() -> Self {
        Self::new(Vec::new(), TypeShape::Plain)
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Returns the prefix markers as written, e.g. `*[]`.
    pub fn prefix(&self) -> String {
        self.facets.iter().map(Facet::to_string).collect()
    }

    /// Returns `true` when the outermost facet is a pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self.facets.first(), Some(Facet::Pointer))
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.shape, TypeShape::Plain)
    }

    pub fn is_map(&self) -> bool {
        matches!(self.shape, TypeShape::Map { .. })
    }

    /// Returns the package qualifier of a named shape.
    pub fn qualifier(&self) -> Option<&str> {
        match &self.shape {
            TypeShape::Named { qualifier, .. } => qualifier.as_deref(),
            _ => None,
        }
    }

    /// Returns the base identifier of a named shape.
    pub fn identifier(&self) -> Option<&str> {
        match &self.shape {
            TypeShape::Named { identifier, .. } => Some(identifier),
            _ => None,
        }
    }

    /// Returns the generic type arguments of a named shape.
    pub fn type_args(&self) -> Option<&str> {
        match &self.shape {
            TypeShape::Named { type_args, .. } => type_args.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(qualifier: Option<&str>, identifier: &str) -> TypeShape {
        TypeShape::Named {
            qualifier: qualifier.map(str::to_string),
            identifier: identifier.to_string(),
            type_args: None,
        }
    }

    #[test]
    fn test_prefix_preserves_order() {
        let form = TypeForm::new(
            vec![Facet::Pointer, Facet::Array(4), Facet::Slice, Facet::Pointer],
            named(None, "Foo"),
        );

        assert_eq!(form.prefix(), "*[4][]*");
        assert!(form.is_pointer());
    }

    #[test]
    fn test_is_pointer_only_checks_outermost() {
        let form = TypeForm::new(vec![Facet::Slice, Facet::Pointer], named(None, "Foo"));
        assert!(!form.is_pointer());
    }

    #[test]
    fn test_named_accessors() {
        let form = TypeForm::new(vec![], named(Some("pkg"), "Foo"));

        assert_eq!(form.qualifier(), Some("pkg"));
        assert_eq!(form.identifier(), Some("Foo"));
        assert_eq!(form.type_args(), None);
        assert!(!form.is_plain());
    }

    #[test]
    fn test_plain_has_no_name() {
        let form = TypeForm::plain();

        assert!(form.is_plain());
        assert_eq!(form.identifier(), None);
        assert_eq!(form.prefix(), "");
    }

    #[test]
    fn test_facet_display() {
        assert_eq!(Facet::Pointer.to_string(), "*");
        assert_eq!(Facet::Slice.to_string(), "[]");
        assert_eq!(Facet::Array(5).to_string(), "[5]");
        assert_eq!(Facet::Variadic.to_string(), "...");
    }
}
