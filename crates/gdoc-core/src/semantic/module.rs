//! Module and package containers.

use std::collections::BTreeMap;

use crate::{
    identifier::RefId,
    semantic::{
        declaration::{Constant, Function, Stereotype, Struct, StructIdx, Variable},
        type_desc::TypeDesc,
    },
};

/// One documented package.
///
/// Structs live in an arena in discovery order so that fields can refer
/// back to their owner by [`StructIdx`]; use [`Package::sorted_structs`] for
/// output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Anchor identity of the package itself.
    pub ref_id: RefId,
    pub import_path: String,
    pub name: String,
    pub readme: String,
    pub doc: String,
    /// Sorted and free of duplicates.
    pub imports: Vec<String>,
    pub stereotypes: Vec<Stereotype>,
    /// Every exported type name declared here.
    pub types: BTreeMap<String, RefId>,
    pub consts: BTreeMap<String, Constant>,
    pub vars: BTreeMap<String, Variable>,
    pub functions: BTreeMap<String, Function>,
    pub structs: Vec<Struct>,
}

impl Package {
    pub fn new(import_path: impl Into<String>, name: impl Into<String>) -> Self {
        let import_path = import_path.into();
        let name = name.into();
        Self {
            ref_id: RefId::new(import_path.clone(), name.clone()),
            import_path,
            name,
            readme: String::new(),
            doc: String::new(),
            imports: Vec::new(),
            stereotypes: Vec::new(),
            types: BTreeMap::new(),
            consts: BTreeMap::new(),
            vars: BTreeMap::new(),
            functions: BTreeMap::new(),
            structs: Vec::new(),
        }
    }

    /// Replaces the import list, sorting and de-duplicating it.
    pub fn set_imports<I>(&mut self, imports: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut imports: Vec<String> = imports.into_iter().collect();
        imports.sort();
        imports.dedup();
        self.imports = imports;
    }

    pub fn has_stereotype(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }

    pub fn is_executable(&self) -> bool {
        self.has_stereotype(Stereotype::Executable)
    }

    /// Adds a struct to the arena and returns its index.
    pub fn push_struct(&mut self, strukt: Struct) -> StructIdx {
        self.structs.push(strukt);
        StructIdx(self.structs.len() - 1)
    }

    pub fn struct_at(&self, idx: StructIdx) -> Option<&Struct> {
        self.structs.get(idx.0)
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn struct_index(&self, name: &str) -> Option<StructIdx> {
        self.structs.iter().position(|s| s.name == name).map(StructIdx)
    }

    /// Returns the structs ordered by name.
    pub fn sorted_structs(&self) -> Vec<&Struct> {
        let mut structs: Vec<_> = self.structs.iter().collect();
        structs.sort_by(|a, b| a.name.cmp(&b.name));
        structs
    }

    /// Calls `visitor` on every type occurrence in the package.
    pub fn visit_type_descs_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDesc)) {
        self.consts
            .values_mut()
            .filter_map(|constant| constant.type_desc.as_mut())
            .chain(
                self.vars
                    .values_mut()
                    .filter_map(|variable| variable.type_desc.as_mut()),
            )
            .for_each(|desc| visitor(desc));
        self.structs
            .iter_mut()
            .for_each(|strukt| strukt.visit_type_descs_mut(visitor));
        self.functions
            .values_mut()
            .for_each(|function| function.visit_type_descs_mut(visitor));
    }

    /// Calls `visitor` on every free-text comment in the package.
    pub fn visit_docs_mut(&mut self, visitor: &mut dyn FnMut(&mut String)) {
        visitor(&mut self.doc);
        for constant in self.consts.values_mut() {
            visitor(&mut constant.doc);
            visitor(&mut constant.comment);
        }
        for variable in self.vars.values_mut() {
            visitor(&mut variable.doc);
            visitor(&mut variable.comment);
        }
        self.structs
            .iter_mut()
            .for_each(|strukt| strukt.visit_docs_mut(visitor));
        self.functions
            .values_mut()
            .for_each(|function| function.visit_docs_mut(visitor));
    }

    /// Returns `true` when nothing in the package would be rendered.
    pub fn is_empty(&self) -> bool {
        self.consts.is_empty()
            && self.vars.is_empty()
            && self.functions.is_empty()
            && self.structs.is_empty()
    }
}

/// The root of the documentation model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub readme: String,
    /// Packages keyed by import path.
    pub packages: BTreeMap<String, Package>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn insert_package(&mut self, package: Package) {
        self.packages.insert(package.import_path.clone(), package);
    }

    pub fn package(&self, import_path: &str) -> Option<&Package> {
        self.packages.get(import_path)
    }

    /// Returns the packages ordered by name, ties broken by import path.
    pub fn sorted_packages(&self) -> Vec<&Package> {
        let mut packages: Vec<_> = self.packages.values().collect();
        packages.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.import_path.cmp(&b.import_path))
        });
        packages
    }

    /// Returns every package whose short name is `name`, in import path order.
    pub fn packages_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Package> + 'a {
        self.packages.values().filter(move |p| p.name == name)
    }

    /// Rewrites `/` in import paths (package keys, package paths and imports)
    /// with `separator`. Identities are left untouched so anchors stay stable.
    pub fn relabel_paths(self, separator: &str) -> Self {
        if separator == "/" {
            return self;
        }

        let packages = self
            .packages
            .into_values()
            .map(|mut package| {
                package.import_path = package.import_path.replace('/', separator);
                let imports = package
                    .imports
                    .iter()
                    .map(|import| import.replace('/', separator))
                    .collect::<Vec<_>>();
                package.set_imports(imports);
                (package.import_path.clone(), package)
            })
            .collect();

        Self { packages, ..self }
    }
}
