//! Declarations inside a package.
//!
//! - [`Field`] - struct fields, parameters, results and type parameters
//! - [`Function`] and [`Method`] - callables with a reconstructed signature
//! - [`Struct`] - named types with fields, methods and constructors
//! - [`Variable`] and [`Constant`] - package-level values

use indexmap::IndexMap;

use crate::{identifier::RefId, semantic::type_desc::TypeDesc};

/// Role tags attached to fields and packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stereotype {
    /// A package that builds a program rather than a library.
    Executable,
    /// A named struct field.
    Property,
    /// An embedded struct field.
    Embedded,
    Parameter,
    Result,
    Receiver,
    /// A generic type parameter.
    Generic,
}

/// Index of a [`Struct`] in its package's struct arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructIdx(pub usize);

/// A named, typed slot.
///
/// The same shape serves struct fields, parameters, results, receivers and
/// generic type parameters; [`Field::stereotypes`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Trailing line comment.
    pub comment: String,
    pub doc: String,
    pub type_desc: TypeDesc,
    /// Owning struct, for fields only. Lookup only; never traversed when rendering.
    pub parent_struct: Option<StructIdx>,
    pub stereotypes: Vec<Stereotype>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_desc: TypeDesc, stereotype: Stereotype) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            doc: String::new(),
            type_desc,
            parent_struct: None,
            stereotypes: vec![stereotype],
        }
    }

    pub fn has_stereotype(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }

    /// Returns the width of the name in characters.
    pub fn name_width(&self) -> usize {
        self.name.chars().count()
    }
}

/// A package-level function, an interface method or a constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub ref_id: RefId,
    pub name: String,
    pub comment: String,
    /// Plain-text signature, e.g. `func Open(name string) (*File, error)`.
    pub signature: String,
    pub type_params: Vec<Field>,
    /// Parameters in declaration order. Unnamed entries use `__<index>` keys.
    pub parameters: IndexMap<String, Field>,
    /// Results in declaration order. Unnamed entries use `__<index>` keys.
    pub results: IndexMap<String, Field>,
}

impl Function {
    pub fn new(ref_id: RefId, name: impl Into<String>) -> Self {
        Self {
            ref_id,
            name: name.into(),
            comment: String::new(),
            signature: String::new(),
            type_params: Vec::new(),
            parameters: IndexMap::new(),
            results: IndexMap::new(),
        }
    }

    /// Returns the type of the first result, if any.
    pub fn first_result(&self) -> Option<&TypeDesc> {
        self.results.values().next().map(|field| &field.type_desc)
    }

    /// Calls `visitor` on every type occurrence in the signature.
    pub fn visit_type_descs_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDesc)) {
        self.type_params
            .iter_mut()
            .chain(self.parameters.values_mut())
            .chain(self.results.values_mut())
            .for_each(|field| visitor(&mut field.type_desc));
    }

    /// Calls `visitor` on every free-text comment.
    pub fn visit_docs_mut(&mut self, visitor: &mut dyn FnMut(&mut String)) {
        visitor(&mut self.comment);
    }
}

/// Key under which an unnamed parameter or result is stored.
pub fn unnamed_key(index: usize) -> String {
    format!("__{index}")
}

/// Returns `true` for keys produced by [`unnamed_key`].
pub fn is_unnamed_key(key: &str) -> bool {
    key.strip_prefix("__")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// A function bound to a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub function: Function,
    pub receiver: Field,
}

/// What kind of named type a [`Struct`] documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructKind {
    Struct,
    /// An interface with its method set.
    Interface { methods: Vec<Function> },
    /// `type Name Underlying`
    Defined(TypeDesc),
}

/// A named type declaration with everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub ref_id: RefId,
    pub name: String,
    pub comment: String,
    pub kind: StructKind,
    /// Exported fields in declaration order.
    pub fields: Vec<Field>,
    /// `true` when unexported fields were dropped.
    pub has_hidden_fields: bool,
    pub methods: Vec<Method>,
    pub generics: Vec<Field>,
    pub constructors: Vec<Function>,
}

impl Struct {
    pub fn new(ref_id: RefId, name: impl Into<String>, kind: StructKind) -> Self {
        Self {
            ref_id,
            name: name.into(),
            comment: String::new(),
            kind,
            fields: Vec::new(),
            has_hidden_fields: false,
            methods: Vec::new(),
            generics: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, StructKind::Struct)
    }

    /// Returns the widest printed field name, in characters.
    ///
    /// Embedded fields print only their type, so they do not count.
    pub fn max_field_name_width(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| !field.has_stereotype(Stereotype::Embedded))
            .map(Field::name_width)
            .max()
            .unwrap_or(0)
    }

    /// Returns the alignment padding for a field of this struct.
    pub fn field_padding(&self, field: &Field) -> usize {
        self.max_field_name_width().saturating_sub(field.name_width())
    }

    /// Returns the methods ordered by name.
    pub fn sorted_methods(&self) -> Vec<&Method> {
        let mut methods: Vec<_> = self.methods.iter().collect();
        methods.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        methods
    }

    /// Calls `visitor` on every type occurrence owned by this declaration.
    pub fn visit_type_descs_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDesc)) {
        match &mut self.kind {
            StructKind::Struct => {}
            StructKind::Interface { methods } => methods
                .iter_mut()
                .for_each(|method| method.visit_type_descs_mut(visitor)),
            StructKind::Defined(underlying) => visitor(underlying),
        }
        self.fields
            .iter_mut()
            .chain(self.generics.iter_mut())
            .for_each(|field| visitor(&mut field.type_desc));
        for method in &mut self.methods {
            visitor(&mut method.receiver.type_desc);
            method.function.visit_type_descs_mut(visitor);
        }
        self.constructors
            .iter_mut()
            .for_each(|constructor| constructor.visit_type_descs_mut(visitor));
    }

    /// Calls `visitor` on every free-text comment owned by this declaration.
    pub fn visit_docs_mut(&mut self, visitor: &mut dyn FnMut(&mut String)) {
        visitor(&mut self.comment);
        if let StructKind::Interface { methods } = &mut self.kind {
            methods
                .iter_mut()
                .for_each(|method| method.visit_docs_mut(visitor));
        }
        for field in &mut self.fields {
            visitor(&mut field.doc);
            visitor(&mut field.comment);
        }
        self.methods
            .iter_mut()
            .for_each(|method| method.function.visit_docs_mut(visitor));
        self.constructors
            .iter_mut()
            .for_each(|constructor| constructor.visit_docs_mut(visitor));
    }

    /// Returns the constructors ordered by name.
    pub fn sorted_constructors(&self) -> Vec<&Function> {
        let mut constructors: Vec<_> = self.constructors.iter().collect();
        constructors.sort_by(|a, b| a.name.cmp(&b.name));
        constructors
    }
}

/// A package-level variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub ref_id: RefId,
    pub name: String,
    pub doc: String,
    pub comment: String,
    pub type_desc: Option<TypeDesc>,
    pub value: Option<String>,
}

/// A package-level constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub ref_id: RefId,
    pub name: String,
    pub doc: String,
    pub comment: String,
    pub type_desc: Option<TypeDesc>,
    pub value: Option<String>,
}
