//! Cross-reference registry.
//!
//! Maps every documented declaration to its [`RefId`] so that anchors and
//! links can be emitted independently: the anchor at a declaration and the
//! link at each usage derive from the same digest.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use gdoc_core::{identifier::RefId, semantic::Module};

/// A documented package as seen by the linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub import_path: String,
    pub name: String,
    pub ref_id: RefId,
}

impl PackageEntry {
    /// Returns `true` when `qualifier` names this package: either its whole
    /// import path or a trailing path segment run of it.
    pub fn matches_qualifier(&self, qualifier: &str) -> bool {
        !qualifier.is_empty()
            && (self.import_path == qualifier
                || self
                    .import_path
                    .strip_suffix(qualifier)
                    .is_some_and(|head| head.ends_with('/')))
    }
}

/// Registry of every declaration identity in a module.
#[derive(Debug, Clone, Default)]
pub struct CrossRefRegistry {
    identities: BTreeMap<(String, String), RefId>,
    by_package: BTreeMap<String, IndexMap<String, RefId>>,
    packages: BTreeMap<String, PackageEntry>,
}

impl CrossRefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every package and declaration of `module`.
    pub fn from_module(module: &Module) -> Self {
        let mut registry = Self::new();

        for package in module.packages.values() {
            registry.register_package(&package.import_path, &package.name, package.ref_id.clone());

            let values = package
                .consts
                .values()
                .map(|c| &c.ref_id)
                .chain(package.vars.values().map(|v| &v.ref_id));
            let functions = package.functions.values().map(|f| &f.ref_id);
            for ref_id in values.chain(functions) {
                registry.register(ref_id.clone());
            }

            for strukt in &package.structs {
                registry.register(strukt.ref_id.clone());
                strukt
                    .methods
                    .iter()
                    .map(|m| &m.function.ref_id)
                    .chain(strukt.constructors.iter().map(|c| &c.ref_id))
                    .for_each(|ref_id| registry.register(ref_id.clone()));
            }
        }

        registry
    }

    pub fn register_package(&mut self, import_path: &str, name: &str, ref_id: RefId) {
        self.packages.insert(
            import_path.to_string(),
            PackageEntry {
                import_path: import_path.to_string(),
                name: name.to_string(),
                ref_id,
            },
        );
    }

    /// Registers a declaration. Re-registering an identity is a no-op.
    pub fn register(&mut self, ref_id: RefId) {
        let key = (
            ref_id.import_path().to_string(),
            ref_id.identifier().to_string(),
        );
        self.by_package
            .entry(key.0.clone())
            .or_default()
            .entry(key.1.clone())
            .or_insert_with(|| ref_id.clone());
        self.identities.entry(key).or_insert(ref_id);
    }

    /// Looks up a declaration by package and identifier.
    pub fn lookup(&self, import_path: &str, identifier: &str) -> Option<&RefId> {
        self.by_package.get(import_path)?.get(identifier)
    }

    /// Returns the identifier index of one package, in registration order.
    pub fn package_index(&self, import_path: &str) -> Option<&IndexMap<String, RefId>> {
        self.by_package.get(import_path)
    }

    pub fn package(&self, import_path: &str) -> Option<&PackageEntry> {
        self.packages.get(import_path)
    }

    /// Returns the registered packages in import path order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageEntry> {
        self.packages.values()
    }

    pub fn contains(&self, ref_id: &RefId) -> bool {
        self.identities.contains_key(&(
            ref_id.import_path().to_string(),
            ref_id.identifier().to_string(),
        ))
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

/// Returns the anchor placed at the declaration of `ref_id`.
pub fn anchor_id_of(ref_id: &RefId) -> String {
    ref_id.id()
}

/// Returns the target used by every link to `ref_id`.
pub fn link_target_of(ref_id: &RefId) -> String {
    ref_id.id()
}
