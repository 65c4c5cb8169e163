//! Document model builder.
//!
//! Walks the analyzer output once and creates every package, type, field,
//! function, variable and constant of the model. Only exported declarations
//! are kept. Type occurrences are left unresolved; classification happens in
//! a separate pass over the finished model.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::{debug, trace};

use gdoc_core::{
    analysis::{
        AnalyzedPackage, FieldDecl, FuncDecl, SourceAnalysis, TypeDecl, TypeDeclKind, ValueGroup,
        is_exported,
    },
    identifier::RefId,
    semantic::{
        Constant, Field, Function, Method, Module, Package, Stereotype, Struct, StructIdx,
        StructKind, TypeDesc, Variable, unnamed_key,
    },
};

use crate::{
    constructor::ConstructorPolicy,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    type_form::{describe, plain_fragments},
};

/// Name of the package that builds an executable.
const MAIN_PACKAGE: &str = "main";

/// A value declaration before it becomes a [`Constant`] or a [`Variable`].
struct ValueParts {
    ref_id: RefId,
    name: String,
    doc: String,
    comment: String,
    type_desc: Option<TypeDesc>,
    value: Option<String>,
}

pub(crate) struct Builder<'a> {
    constructor_policy: &'a dyn ConstructorPolicy,
    diagnostics: &'a mut DiagnosticCollector,
}

impl<'a> Builder<'a> {
    pub fn new(
        constructor_policy: &'a dyn ConstructorPolicy,
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            constructor_policy,
            diagnostics,
        }
    }

    /// Builds the unresolved model of every analyzed package.
    pub fn build_module(&mut self, analysis: &SourceAnalysis) -> Module {
        let mut module = Module::new(analysis.module.clone());
        module.readme = analysis.readme.clone();

        for analyzed in &analysis.packages {
            if module.packages.contains_key(&analyzed.import_path) {
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "package `{}` is listed more than once",
                        analyzed.import_path
                    ))
                    .with_code(ErrorCode::E100)
                    .with_subject(analyzed.import_path.clone())
                    .with_help("the first listing is kept"),
                );
                continue;
            }

            let package = self.build_package(analyzed);
            debug!(
                package = package.import_path.as_str(),
                structs = package.structs.len(),
                functions = package.functions.len();
                "Package built"
            );
            module.insert_package(package);
        }

        module
    }

    fn build_package(&mut self, analyzed: &AnalyzedPackage) -> Package {
        let mut package = Package::new(analyzed.import_path.clone(), analyzed.name.clone());
        package.doc = analyzed.doc.clone();
        package.readme = analyzed.readme.clone();
        package.set_imports(analyzed.imports.iter().cloned());
        if analyzed.name == MAIN_PACKAGE {
            package.stereotypes.push(Stereotype::Executable);
        }

        let mut declared = BTreeSet::new();

        for parts in self.build_values(&analyzed.consts, &package.import_path, &mut declared) {
            package.consts.insert(
                parts.name.clone(),
                Constant {
                    ref_id: parts.ref_id,
                    name: parts.name,
                    doc: parts.doc,
                    comment: parts.comment,
                    type_desc: parts.type_desc,
                    value: parts.value,
                },
            );
        }

        for parts in self.build_values(&analyzed.vars, &package.import_path, &mut declared) {
            package.vars.insert(
                parts.name.clone(),
                Variable {
                    ref_id: parts.ref_id,
                    name: parts.name,
                    doc: parts.doc,
                    comment: parts.comment,
                    type_desc: parts.type_desc,
                    value: parts.value,
                },
            );
        }

        for decl in &analyzed.types {
            if !is_exported(&decl.name) || !self.declare(&mut declared, &package, &decl.name) {
                continue;
            }
            let idx = StructIdx(package.structs.len());
            let strukt = self.build_type(decl, &package.import_path, idx);
            package.types.insert(strukt.name.clone(), strukt.ref_id.clone());
            package.push_struct(strukt);
        }

        for decl in analyzed.funcs.iter().filter(|decl| decl.receiver.is_some()) {
            self.attach_method(decl, &mut package);
        }

        for decl in analyzed.funcs.iter().filter(|decl| decl.receiver.is_none()) {
            if !is_exported(&decl.name) || !self.declare(&mut declared, &package, &decl.name) {
                continue;
            }
            let ref_id = RefId::new(package.import_path.clone(), decl.name.clone());
            let function = self.build_function(ref_id, decl, true);
            package.functions.insert(decl.name.clone(), function);
        }

        self.attach_constructors(&mut package);
        package
    }

    /// Records `name` in the package scope, reporting a duplicate.
    fn declare(&mut self, declared: &mut BTreeSet<String>, package: &Package, name: &str) -> bool {
        if declared.insert(name.to_string()) {
            return true;
        }

        self.diagnostics.emit(
            Diagnostic::warning(format!("`{name}` is declared more than once"))
                .with_code(ErrorCode::E100)
                .with_subject(format!("{}.{name}", package.import_path))
                .with_help("the first declaration is kept"),
        );
        false
    }

    fn build_values(
        &mut self,
        groups: &[ValueGroup],
        import_path: &str,
        declared: &mut BTreeSet<String>,
    ) -> Vec<ValueParts> {
        let mut values = Vec::new();

        for group in groups {
            for spec in &group.specs {
                for (index, name) in spec.names.iter().enumerate() {
                    if !is_exported(name) {
                        continue;
                    }
                    if !declared.insert(name.clone()) {
                        self.diagnostics.emit(
                            Diagnostic::warning(format!("`{name}` is declared more than once"))
                                .with_code(ErrorCode::E100)
                                .with_subject(format!("{import_path}.{name}"))
                                .with_help("the first declaration is kept"),
                        );
                        continue;
                    }

                    let ref_id = RefId::new(import_path, name.clone());
                    let type_desc = spec
                        .type_expr
                        .as_deref()
                        .map(|raw| self.describe(raw, &ref_id));
                    values.push(ValueParts {
                        doc: merge_docs(&group.doc, &spec.doc),
                        comment: spec.comment.clone(),
                        value: spec.values.get(index).cloned(),
                        name: name.clone(),
                        type_desc,
                        ref_id,
                    });
                }
            }
        }

        values
    }

    fn build_type(&mut self, decl: &TypeDecl, import_path: &str, idx: StructIdx) -> Struct {
        let ref_id = RefId::new(import_path, decl.name.clone());

        let kind = match decl.kind {
            TypeDeclKind::Struct => StructKind::Struct,
            TypeDeclKind::Interface => StructKind::Interface {
                methods: decl
                    .methods
                    .iter()
                    .filter(|method| is_exported(&method.name))
                    .map(|method| {
                        self.build_function(ref_id.create_nested(&method.name), method, false)
                    })
                    .collect(),
            },
            TypeDeclKind::Defined => {
                let underlying = decl.underlying.as_deref().unwrap_or_default();
                StructKind::Defined(self.describe(underlying, &ref_id))
            }
        };

        let mut strukt = Struct::new(ref_id.clone(), decl.name.clone(), kind);
        strukt.comment = decl.doc.clone();
        strukt.generics = self.build_fields(&decl.type_params, Stereotype::Generic, &ref_id);

        if strukt.is_struct() {
            for field_decl in &decl.fields {
                let type_desc = self.describe(&field_decl.type_expr, &ref_id);
                let named: Vec<(String, Stereotype)> = if field_decl.names.is_empty() {
                    let embedded = type_desc
                        .form()
                        .identifier()
                        .unwrap_or(type_desc.raw())
                        .to_string();
                    vec![(embedded, Stereotype::Embedded)]
                } else {
                    field_decl
                        .names
                        .iter()
                        .map(|name| (name.clone(), Stereotype::Property))
                        .collect()
                };

                for (name, stereotype) in named {
                    if !is_exported(&name) {
                        strukt.has_hidden_fields = true;
                        continue;
                    }
                    let mut field = Field::new(name, type_desc.clone(), stereotype);
                    field.doc = field_decl.doc.clone();
                    field.comment = field_decl.comment.clone();
                    field.parent_struct = Some(idx);
                    strukt.fields.push(field);
                }
            }
        }

        trace!(name = decl.name.as_str(), fields = strukt.fields.len(); "Type built");
        strukt
    }

    fn attach_method(&mut self, decl: &FuncDecl, package: &mut Package) {
        let Some(receiver_decl) = &decl.receiver else {
            return;
        };
        if !is_exported(&decl.name) {
            return;
        }

        let subject = RefId::new(package.import_path.clone(), decl.name.clone());
        let receiver_desc = self.describe(&receiver_decl.type_expr, &subject);
        let base = receiver_desc
            .form()
            .identifier()
            .unwrap_or(receiver_desc.raw())
            .to_string();
        if !is_exported(&base) {
            trace!(method = decl.name.as_str(), receiver = base.as_str(); "Method of unexported type dropped");
            return;
        }

        let Some(idx) = package.struct_index(&base) else {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "receiver `{}` of method `{}` is not a documented type",
                    receiver_desc.raw(),
                    decl.name
                ))
                .with_code(ErrorCode::E101)
                .with_subject(format!("{}.{base}.{}", package.import_path, decl.name))
                .with_help("the method is left out of the document"),
            );
            return;
        };

        let owner = &package.structs[idx.0];
        if owner.methods.iter().any(|m| m.function.name == decl.name) {
            self.diagnostics.emit(
                Diagnostic::warning(format!("method `{base}.{}` is declared more than once", decl.name))
                    .with_code(ErrorCode::E100)
                    .with_subject(format!("{}.{base}.{}", package.import_path, decl.name))
                    .with_help("the first declaration is kept"),
            );
            return;
        }

        let ref_id = owner.ref_id.create_nested(&decl.name);
        let function = self.build_function(ref_id, decl, true);
        let receiver_name = receiver_decl.names.first().cloned().unwrap_or_default();
        let receiver = Field::new(receiver_name, receiver_desc, Stereotype::Receiver);

        package.structs[idx.0].methods.push(Method { function, receiver });
    }

    /// Moves functions the constructor policy recognizes onto their type.
    fn attach_constructors(&self, package: &mut Package) {
        let type_names: BTreeSet<String> = package.structs.iter().map(|s| s.name.clone()).collect();
        let names: Vec<String> = package.functions.keys().cloned().collect();

        for name in names {
            let Some(owner) = package
                .functions
                .get(&name)
                .and_then(|function| self.constructor_policy.constructed_type(function, &type_names))
            else {
                continue;
            };
            let Some(idx) = package.struct_index(&owner) else {
                continue;
            };
            if let Some(function) = package.functions.remove(&name) {
                trace!(constructor = name.as_str(), owner = owner.as_str(); "Constructor attached");
                package.structs[idx.0].constructors.push(function);
            }
        }
    }

    fn build_function(&mut self, ref_id: RefId, decl: &FuncDecl, with_keyword: bool) -> Function {
        let mut function = Function::new(ref_id.clone(), decl.name.clone());
        function.comment = decl.doc.clone();
        function.signature = signature(decl, with_keyword);
        function.type_params = self.build_fields(&decl.type_params, Stereotype::Generic, &ref_id);
        function.parameters = self.build_keyed_fields(&decl.params, Stereotype::Parameter, &ref_id);
        function.results = self.build_keyed_fields(&decl.results, Stereotype::Result, &ref_id);
        function
    }

    /// Builds parameters or results keyed by name, in declaration order.
    fn build_keyed_fields(
        &mut self,
        decls: &[FieldDecl],
        stereotype: Stereotype,
        subject: &RefId,
    ) -> IndexMap<String, Field> {
        let mut keyed = IndexMap::new();
        for (index, field) in self
            .build_fields(decls, stereotype, subject)
            .into_iter()
            .enumerate()
        {
            let key = if field.name.is_empty() || field.name == "_" || keyed.contains_key(&field.name) {
                unnamed_key(index)
            } else {
                field.name.clone()
            };
            keyed.insert(key, field);
        }
        keyed
    }

    fn build_fields(
        &mut self,
        decls: &[FieldDecl],
        stereotype: Stereotype,
        subject: &RefId,
    ) -> Vec<Field> {
        let mut fields = Vec::new();
        for decl in decls {
            let type_desc = self.describe(&decl.type_expr, subject);
            let names: Vec<String> = if decl.names.is_empty() {
                vec![String::new()]
            } else {
                decl.names.clone()
            };
            for name in names {
                let mut field = Field::new(name, type_desc.clone(), stereotype);
                field.doc = decl.doc.clone();
                field.comment = decl.comment.clone();
                fields.push(field);
            }
        }
        fields
    }

    /// Describes a type expression, reporting parts that have no structure.
    fn describe(&mut self, raw: &str, subject: &RefId) -> TypeDesc {
        if raw.trim().is_empty() {
            self.diagnostics.emit(
                Diagnostic::warning("type expression is empty")
                    .with_code(ErrorCode::E200)
                    .with_subject(subject.to_string())
                    .with_help("the analyzer stores type expressions under the `type` key"),
            );
        }
        let desc = describe(raw);
        for fragment in plain_fragments(&desc) {
            self.diagnostics.emit(
                Diagnostic::warning(format!("type `{fragment}` has no structural form"))
                    .with_code(ErrorCode::E200)
                    .with_subject(subject.to_string())
                    .with_help("it is rendered as plain text"),
            );
        }
        desc
    }
}

/// Joins a group doc and a member doc, skipping empty parts.
fn merge_docs(group: &str, member: &str) -> String {
    match (group.trim(), member.trim()) {
        ("", member) => member.to_string(),
        (group, "") => group.to_string(),
        (group, member) => format!("{group}\n\n{member}"),
    }
}

/// Reconstructs the source signature of a function or method.
///
/// `func (w *Widget) Resize[T any](w, h int) (bool, error)`; interface
/// methods leave out the keyword.
pub(crate) fn signature(decl: &FuncDecl, with_keyword: bool) -> String {
    let mut signature = String::new();
    if with_keyword {
        signature.push_str("func ");
    }
    if let Some(receiver) = &decl.receiver {
        signature.push_str(&format!("({}) ", field_list(std::slice::from_ref(receiver))));
    }
    signature.push_str(&decl.name);
    if !decl.type_params.is_empty() {
        signature.push_str(&format!("[{}]", field_list(&decl.type_params)));
    }
    signature.push_str(&format!("({})", field_list(&decl.params)));

    match decl.results.as_slice() {
        [] => {}
        [single] if single.names.is_empty() => {
            signature.push(' ');
            signature.push_str(single.type_expr.trim());
        }
        results => signature.push_str(&format!(" ({})", field_list(results))),
    }

    signature
}

fn field_list(fields: &[FieldDecl]) -> String {
    fields
        .iter()
        .map(|field| {
            let type_expr = field.type_expr.trim();
            if field.names.is_empty() {
                type_expr.to_string()
            } else {
                format!("{} {type_expr}", field.names.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::PrefixConstructorPolicy;
    use gdoc_core::analysis::ValueSpec;

    const SHOP: &str = "example.com/shop";

    fn build(packages: Vec<AnalyzedPackage>) -> (Module, Vec<Diagnostic>) {
        let analysis = SourceAnalysis {
            module: "example.com/shop".to_string(),
            packages,
            ..SourceAnalysis::default()
        };
        let policy = PrefixConstructorPolicy::default();
        let mut diagnostics = DiagnosticCollector::new();
        let module = Builder::new(&policy, &mut diagnostics).build_module(&analysis);
        let warnings = diagnostics.finish().expect("warnings only");
        (module, warnings)
    }

    fn shop(types: Vec<TypeDecl>, funcs: Vec<FuncDecl>) -> AnalyzedPackage {
        AnalyzedPackage {
            import_path: SHOP.to_string(),
            name: "shop".to_string(),
            types,
            funcs,
            ..AnalyzedPackage::default()
        }
    }

    fn struct_decl(name: &str, fields: Vec<FieldDecl>) -> TypeDecl {
        TypeDecl {
            name: name.to_string(),
            fields,
            ..TypeDecl::default()
        }
    }

    fn func(name: &str, params: Vec<FieldDecl>, results: Vec<FieldDecl>) -> FuncDecl {
        FuncDecl {
            name: name.to_string(),
            params,
            results,
            ..FuncDecl::default()
        }
    }

    fn method(receiver: &str, name: &str) -> FuncDecl {
        FuncDecl {
            name: name.to_string(),
            receiver: Some(FieldDecl::named("w", receiver)),
            ..FuncDecl::default()
        }
    }

    #[test]
    fn test_unexported_declarations_are_dropped() {
        let (module, _) = build(vec![shop(
            vec![struct_decl("Widget", vec![]), struct_decl("widget", vec![])],
            vec![func("Open", vec![], vec![]), func("open", vec![], vec![])],
        )]);
        let package = module.package(SHOP).expect("package");

        assert_eq!(package.structs.len(), 1);
        assert_eq!(package.functions.keys().collect::<Vec<_>>(), vec!["Open"]);
        assert!(package.types.contains_key("Widget"));
    }

    #[test]
    fn test_fields_keep_declaration_order_and_owner() {
        let (module, _) = build(vec![shop(
            vec![struct_decl(
                "Record",
                vec![
                    FieldDecl::named("Zeta", "int"),
                    FieldDecl::named("hidden", "string"),
                    FieldDecl::named("Alpha", "*Record"),
                    FieldDecl::unnamed("io.Reader"),
                ],
            )],
            vec![],
        )]);
        let package = module.package(SHOP).expect("package");
        let record = package.struct_by_name("Record").expect("record");

        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Reader"]);
        assert!(record.has_hidden_fields);
        assert!(record.fields[2].has_stereotype(Stereotype::Embedded));
        assert!(
            record
                .fields
                .iter()
                .all(|f| f.parent_struct == package.struct_index("Record"))
        );
    }

    #[test]
    fn test_struct_with_only_unexported_fields() {
        let (module, _) = build(vec![shop(
            vec![struct_decl("Opaque", vec![FieldDecl::named("state", "int")])],
            vec![],
        )]);
        let opaque = module
            .package(SHOP)
            .and_then(|p| p.struct_by_name("Opaque"))
            .expect("opaque");

        assert!(opaque.fields.is_empty());
        assert!(opaque.has_hidden_fields);
    }

    #[test]
    fn test_generics_are_tagged() {
        let mut list = struct_decl("List", vec![FieldDecl::named("Items", "[]T")]);
        list.type_params = vec![FieldDecl {
            names: vec!["T".to_string(), "U".to_string()],
            type_expr: "any".to_string(),
            ..FieldDecl::default()
        }];
        let (module, _) = build(vec![shop(vec![list], vec![])]);
        let list = module
            .package(SHOP)
            .and_then(|p| p.struct_by_name("List"))
            .expect("list");

        assert_eq!(list.generics.len(), 2);
        assert!(list.generics.iter().all(|g| g.has_stereotype(Stereotype::Generic)));
        assert_eq!(list.generics[1].name, "U");
    }

    #[test]
    fn test_methods_attach_to_receiver() {
        let (module, warnings) = build(vec![shop(
            vec![struct_decl("Widget", vec![])],
            vec![
                method("*Widget", "Resize"),
                method("Widget", "Area"),
                method("*Widget", "paint"),
                method("*Gadget", "Spin"),
                method("*gadget", "Spin"),
            ],
        )]);
        let widget = module
            .package(SHOP)
            .and_then(|p| p.struct_by_name("Widget"))
            .expect("widget");

        let names: Vec<_> = widget
            .sorted_methods()
            .iter()
            .map(|m| m.function.name.as_str())
            .collect();
        assert_eq!(names, vec!["Area", "Resize"]);
        assert_eq!(
            widget.methods[0].function.ref_id,
            RefId::new(SHOP, "Widget.Resize")
        );
        assert!(widget.methods[0].receiver.type_desc.is_pointer());

        let codes: Vec<_> = warnings.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, vec![ErrorCode::E101]);
    }

    #[test]
    fn test_constructors_move_to_their_type() {
        let (module, _) = build(vec![shop(
            vec![struct_decl("Widget", vec![])],
            vec![
                func("NewWidget", vec![], vec![FieldDecl::unnamed("*Widget")]),
                func("NewDefault", vec![], vec![FieldDecl::unnamed("Widget")]),
                func("Open", vec![], vec![FieldDecl::unnamed("*Widget")]),
            ],
        )]);
        let package = module.package(SHOP).expect("package");
        let widget = package.struct_by_name("Widget").expect("widget");

        let constructors: Vec<_> = widget
            .sorted_constructors()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(constructors, vec!["NewDefault", "NewWidget"]);
        assert_eq!(package.functions.keys().collect::<Vec<_>>(), vec!["Open"]);
    }

    #[test]
    fn test_duplicate_declaration_keeps_first() {
        let mut first = func("Open", vec![], vec![]);
        first.doc = "first".to_string();
        let mut second = func("Open", vec![], vec![]);
        second.doc = "second".to_string();

        let (module, warnings) = build(vec![shop(vec![], vec![first, second])]);
        let open = module
            .package(SHOP)
            .and_then(|p| p.functions.get("Open"))
            .expect("open");

        assert_eq!(open.comment, "first");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_value_groups_merge_docs() {
        let mut package = shop(vec![], vec![]);
        package.consts = vec![ValueGroup {
            doc: "Sizes.".to_string(),
            specs: vec![
                ValueSpec {
                    names: vec!["Small".to_string(), "Large".to_string()],
                    type_expr: Some("Size".to_string()),
                    values: vec!["1".to_string(), "2".to_string()],
                    doc: "Common sizes.".to_string(),
                    comment: "in cm".to_string(),
                },
                ValueSpec {
                    names: vec!["tiny".to_string()],
                    ..ValueSpec::default()
                },
            ],
        }];
        let (module, _) = build(vec![package]);
        let package = module.package(SHOP).expect("package");

        assert_eq!(package.consts.len(), 2);
        let large = &package.consts["Large"];
        assert_eq!(large.doc, "Sizes.\n\nCommon sizes.");
        assert_eq!(large.value.as_deref(), Some("2"));
        assert_eq!(large.comment, "in cm");
        assert_eq!(large.type_desc.as_ref().map(TypeDesc::raw), Some("Size"));
    }

    #[test]
    fn test_main_package_is_executable() {
        let (module, _) = build(vec![AnalyzedPackage {
            import_path: "example.com/shop/cmd/shop".to_string(),
            name: "main".to_string(),
            imports: vec!["os".to_string(), "fmt".to_string(), "os".to_string()],
            ..AnalyzedPackage::default()
        }]);
        let package = module.package("example.com/shop/cmd/shop").expect("package");

        assert!(package.is_executable());
        assert_eq!(package.imports, vec!["fmt", "os"]);
    }

    #[test]
    fn test_interface_and_defined_types() {
        let reader = TypeDecl {
            name: "Reader".to_string(),
            kind: TypeDeclKind::Interface,
            methods: vec![func(
                "Read",
                vec![FieldDecl::named("p", "[]byte")],
                vec![FieldDecl::named("n", "int"), FieldDecl::named("err", "error")],
            )],
            ..TypeDecl::default()
        };
        let celsius = TypeDecl {
            name: "Celsius".to_string(),
            kind: TypeDeclKind::Defined,
            underlying: Some("float64".to_string()),
            ..TypeDecl::default()
        };
        let (module, _) = build(vec![shop(vec![reader, celsius], vec![])]);
        let package = module.package(SHOP).expect("package");

        let StructKind::Interface { methods } = &package.struct_by_name("Reader").expect("reader").kind
        else {
            panic!("expected an interface");
        };
        assert_eq!(methods[0].signature, "Read(p []byte) (n int, err error)");

        let StructKind::Defined(underlying) = &package.struct_by_name("Celsius").expect("celsius").kind
        else {
            panic!("expected a defined type");
        };
        assert_eq!(underlying.raw(), "float64");
    }

    #[test]
    fn test_malformed_type_form_is_reported() {
        let (_, warnings) = build(vec![shop(
            vec![struct_decl("Queue", vec![FieldDecl::named("Out", "chan int")])],
            vec![],
        )]);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E200));
        assert_eq!(warnings[0].subject(), Some("example.com/shop.Queue"));
    }

    #[test]
    fn test_missing_type_expression_is_reported() {
        let (_, warnings) = build(vec![shop(
            vec![struct_decl("Order", vec![FieldDecl::named("Total", "")])],
            vec![],
        )]);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E200));
        assert_eq!(warnings[0].message(), "type expression is empty");
        assert_eq!(warnings[0].subject(), Some("example.com/shop.Order"));
    }

    #[test]
    fn test_unnamed_parameters_get_positional_keys() {
        let (module, _) = build(vec![shop(
            vec![],
            vec![func(
                "Copy",
                vec![FieldDecl::unnamed("io.Writer"), FieldDecl::named("_", "io.Reader")],
                vec![FieldDecl::unnamed("int64"), FieldDecl::unnamed("error")],
            )],
        )]);
        let copy = module
            .package(SHOP)
            .and_then(|p| p.functions.get("Copy"))
            .expect("copy");

        assert_eq!(copy.parameters.keys().collect::<Vec<_>>(), vec!["__0", "__1"]);
        assert_eq!(copy.results.keys().collect::<Vec<_>>(), vec!["__0", "__1"]);
    }

    #[test]
    fn test_signature() {
        let decl = FuncDecl {
            name: "Resize".to_string(),
            receiver: Some(FieldDecl::named("w", "*Widget")),
            type_params: vec![FieldDecl::named("T", "constraints.Integer")],
            params: vec![FieldDecl {
                names: vec!["width".to_string(), "height".to_string()],
                type_expr: "T".to_string(),
                ..FieldDecl::default()
            }],
            results: vec![FieldDecl::unnamed("error")],
            ..FuncDecl::default()
        };

        assert_eq!(
            signature(&decl, true),
            "func (w *Widget) Resize[T constraints.Integer](width, height T) error"
        );
    }

    #[test]
    fn test_signature_without_results() {
        let decl = func("Reset", vec![], vec![]);
        assert_eq!(signature(&decl, true), "func Reset()");
        assert_eq!(signature(&decl, false), "Reset()");
    }

    #[test]
    fn test_merge_docs() {
        assert_eq!(merge_docs("", "member"), "member");
        assert_eq!(merge_docs("group", " "), "group");
        assert_eq!(merge_docs("group", "member"), "group\n\nmember");
    }
}
