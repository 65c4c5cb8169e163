//! Type occurrences and their classification.

use std::fmt;

use crate::{identifier::RefId, type_form::TypeForm};

/// Where the declaration behind a type occurrence lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOrigin {
    /// Predeclared or otherwise untracked type, e.g. `string`.
    BuiltIn,
    /// Declared in the package that uses it.
    LocalCustom,
    /// Declared in another analyzed package.
    ExternalCustom,
    /// Declared in a package outside the analyzed tree.
    ExternalNonCustom,
}

impl TypeOrigin {
    /// Returns `true` when the origin has a declaration to link to.
    pub fn is_linkable(&self) -> bool {
        matches!(self, TypeOrigin::LocalCustom | TypeOrigin::ExternalCustom)
    }
}

impl fmt::Display for TypeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeOrigin::BuiltIn => write!(f, "built-in"),
            TypeOrigin::LocalCustom => write!(f, "local"),
            TypeOrigin::ExternalCustom => write!(f, "external"),
            TypeOrigin::ExternalNonCustom => write!(f, "external (untracked)"),
        }
    }
}

/// Key and value sides of a map type, each classified on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType {
    pub key: TypeDesc,
    pub value: TypeDesc,
}

/// Description of one type occurrence.
///
/// A `TypeDesc` starts unresolved. The resolver sets its origin, and for
/// linkable origins its [`RefId`], through [`TypeDesc::resolve_as`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    raw: String,
    form: TypeForm,
    has_line_break: bool,
    map_type: Option<Box<MapType>>,
    origin: Option<TypeOrigin>,
    ref_id: Option<RefId>,
}

impl TypeDesc {
    /// Creates an unresolved description.
    pub fn new(raw: impl Into<String>, form: TypeForm, map_type: Option<MapType>) -> Self {
        let raw = raw.into();
        Self {
            has_line_break: raw.contains('\n'),
            raw,
            form,
            map_type: map_type.map(Box::new),
            origin: None,
            ref_id: None,
        }
    }

    /// Returns the type expression as written in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn form(&self) -> &TypeForm {
        &self.form
    }

    pub fn is_pointer(&self) -> bool {
        self.form.is_pointer()
    }

    /// Returns `true` when the raw text spans several lines, e.g. an inline struct type.
    pub fn has_line_break(&self) -> bool {
        self.has_line_break
    }

    pub fn map_type(&self) -> Option<&MapType> {
        self.map_type.as_deref()
    }

    pub fn map_type_mut(&mut self) -> Option<&mut MapType> {
        self.map_type.as_deref_mut()
    }

    /// Returns the classified origin, or `None` before resolution.
    pub fn origin(&self) -> Option<TypeOrigin> {
        self.origin
    }

    pub fn ref_id(&self) -> Option<&RefId> {
        self.ref_id.as_ref()
    }

    /// Records the classification of this occurrence.
    pub fn resolve_as(&mut self, origin: TypeOrigin, ref_id: Option<RefId>) {
        self.origin = Some(origin);
        self.ref_id = ref_id;
    }

    /// Returns `true` once this occurrence and both map sides are classified.
    pub fn is_resolved(&self) -> bool {
        self.origin.is_some()
            && self
                .map_type()
                .is_none_or(|map| map.key.is_resolved() && map.value.is_resolved())
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
