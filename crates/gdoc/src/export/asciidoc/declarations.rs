//! AsciiDoc rendering of packages and their declarations.

use log::trace;

use gdoc_core::{
    identifier::RefId,
    semantic::{
        Constant, Field, Function, Method, Package, Stereotype, Struct, StructKind, TypeDesc,
        Variable,
    },
};
use gdoc_parser::anchor_id_of;

use super::{
    AsciiDoc,
    comment::reflow,
    markup::{
        HIDDEN_FIELDS_NOTICE, LINE_BREAK, Role, SEPARATOR, anchor, bold, code_block, indent,
        padding, pass_through, styled, title,
    },
    types::{CLOSE_BRACKET, OPEN_BRACKET},
};
use crate::export::Error;

const PACKAGE_LEVEL: usize = 2;
const SECTION_LEVEL: usize = 3;
const DECLARATION_LEVEL: usize = 4;

/// A constant or variable, seen the same way by the renderer.
struct ValueView<'a> {
    keyword: &'static str,
    ref_id: &'a RefId,
    name: &'a str,
    doc: &'a str,
    comment: &'a str,
    type_desc: Option<&'a TypeDesc>,
    value: Option<&'a str>,
}

impl<'a> From<&'a Constant> for ValueView<'a> {
    fn from(constant: &'a Constant) -> Self {
        Self {
            keyword: "const",
            ref_id: &constant.ref_id,
            name: &constant.name,
            doc: &constant.doc,
            comment: &constant.comment,
            type_desc: constant.type_desc.as_ref(),
            value: constant.value.as_deref(),
        }
    }
}

impl<'a> From<&'a Variable> for ValueView<'a> {
    fn from(variable: &'a Variable) -> Self {
        Self {
            keyword: "var",
            ref_id: &variable.ref_id,
            name: &variable.name,
            doc: &variable.doc,
            comment: &variable.comment,
            type_desc: variable.type_desc.as_ref(),
            value: variable.value.as_deref(),
        }
    }
}

impl AsciiDoc {
    pub(super) fn render_package(&self, package: &Package) -> Result<String, Error> {
        let mut heading = format!(
            "{} {}",
            styled(Role::Keyword, "Package"),
            styled(Role::Name, &package.name)
        );
        if package.has_stereotype(Stereotype::Executable) {
            heading.push(' ');
            heading.push_str(&styled(Role::Information, "(executable)"));
        }

        let mut sections = vec![format!(
            "{}\n{}\n{}",
            anchor(&anchor_id_of(&package.ref_id)),
            title(PACKAGE_LEVEL, &heading),
            styled(
                Role::Information,
                &format!("import {}", pass_through(&format!("\"{}\"", package.import_path)))
            )
        )];

        if !package.readme.trim().is_empty() {
            sections.push(format!(
                "{}\n{}",
                title(SECTION_LEVEL, "Readme"),
                package.readme.trim()
            ));
        }
        if !package.doc.trim().is_empty() {
            sections.push(reflow(&package.doc));
        }
        if !package.imports.is_empty() {
            let imports: Vec<String> = package
                .imports
                .iter()
                .map(|import| format!("* {}", pass_through(import)))
                .collect();
            sections.push(format!(
                "{}\n{}",
                title(SECTION_LEVEL, "Imports"),
                imports.join("\n")
            ));
        }

        if !package.consts.is_empty() {
            let values = package.consts.values().map(ValueView::from);
            sections.push(self.render_values("Constants", values)?);
        }
        if !package.vars.is_empty() {
            let values = package.vars.values().map(ValueView::from);
            sections.push(self.render_values("Variables", values)?);
        }

        let structs = package.sorted_structs();
        if !structs.is_empty() {
            let mut rendered = vec![title(SECTION_LEVEL, "Structs")];
            for strukt in structs {
                rendered.push(self.render_struct(package, strukt)?);
            }
            sections.push(rendered.join("\n\n"));
        }

        if !package.functions.is_empty() {
            let mut rendered = vec![title(SECTION_LEVEL, "Functions")];
            for function in package.functions.values() {
                rendered.push(self.render_function(function)?);
            }
            sections.push(rendered.join("\n\n"));
        }

        Ok(sections.join("\n\n"))
    }

    /// Undocumented values share one block; documented ones get their own.
    fn render_values<'a>(
        &self,
        heading: &str,
        values: impl Iterator<Item = ValueView<'a>>,
    ) -> Result<String, Error> {
        let mut undocumented = Vec::new();
        let mut documented = Vec::new();

        for value in values {
            let line = self.render_value_line(&value)?;
            if value.doc.trim().is_empty() {
                undocumented.push(line);
            } else {
                documented.push(format!("{}\n{}", code_block(&line), reflow(value.doc)));
            }
        }

        let mut blocks = vec![title(SECTION_LEVEL, heading)];
        if !undocumented.is_empty() {
            blocks.push(code_block(&undocumented.join(LINE_BREAK)));
        }
        blocks.extend(documented);
        Ok(blocks.join("\n\n"))
    }

    fn render_value_line(&self, value: &ValueView<'_>) -> Result<String, Error> {
        let mut line = format!(
            "{}{} {}",
            anchor(&anchor_id_of(value.ref_id)),
            styled(Role::Keyword, value.keyword),
            styled(Role::Name, value.name)
        );
        if let Some(type_desc) = value.type_desc {
            line.push(' ');
            line.push_str(&self.render_type(type_desc)?);
        }
        if let Some(expression) = value.value {
            line.push_str(&format!(
                " {} {}",
                styled(Role::Operator, "="),
                pass_through(expression)
            ));
        }
        line.push_str(&trailing_comment(value.comment));
        Ok(line)
    }

    fn render_struct(&self, package: &Package, strukt: &Struct) -> Result<String, Error> {
        let generics = self.render_generics(&strukt.generics)?;
        let head = format!(
            "{} {}{generics}",
            styled(Role::Keyword, "type"),
            styled(Role::Name, &strukt.name)
        );

        let signature = match &strukt.kind {
            StructKind::Struct => {
                let mut body = format!(
                    "{head} {} {}{LINE_BREAK}",
                    styled(Role::Keyword, "struct"),
                    styled(Role::Operator, "{")
                );
                for field in &strukt.fields {
                    body.push_str(&self.render_field(package, field)?);
                }
                if strukt.fields.is_empty() || strukt.has_hidden_fields {
                    body.push_str(&format!(
                        "{}{}{LINE_BREAK}",
                        indent(1),
                        styled(Role::Information, HIDDEN_FIELDS_NOTICE)
                    ));
                }
                body.push_str(&styled(Role::Operator, "}"));
                body
            }
            StructKind::Interface { methods } => {
                let mut body = format!(
                    "{head} {} {}{LINE_BREAK}",
                    styled(Role::Keyword, "interface"),
                    styled(Role::Operator, "{")
                );
                for method in methods {
                    body.push_str(&format!(
                        "{}{}{}{LINE_BREAK}",
                        indent(1),
                        styled(Role::Name, &method.name),
                        self.render_parameters_and_results(method)?
                    ));
                }
                body.push_str(&styled(Role::Operator, "}"));
                body
            }
            StructKind::Defined(underlying) => {
                format!("{head} {}", self.render_type(underlying)?)
            }
        };

        let mut parts = vec![format!(
            "{}\n{}\n{}",
            anchor(&anchor_id_of(&strukt.ref_id)),
            title(DECLARATION_LEVEL, &strukt.name),
            code_block(&signature)
        )];
        if !strukt.comment.trim().is_empty() {
            parts.push(reflow(&strukt.comment));
        }
        for constructor in strukt.sorted_constructors() {
            parts.push(self.render_function(constructor)?);
        }
        for method in strukt.sorted_methods() {
            parts.push(self.render_method(method)?);
        }
        parts.push(SEPARATOR.to_string());

        Ok(parts.join("\n\n"))
    }

    /// Renders one struct field line, aligned to the widest field name.
    fn render_field(&self, package: &Package, field: &Field) -> Result<String, Error> {
        let mut line = String::new();

        if field.has_stereotype(Stereotype::Property) {
            for doc_line in field.doc.lines().filter(|l| !l.trim().is_empty()) {
                line.push_str(&format!(
                    "{}{}{LINE_BREAK}",
                    indent(1),
                    styled(Role::Comment, &format!("// {}", doc_line.trim()))
                ));
            }
        }

        line.push_str(&indent(1));
        if !field.has_stereotype(Stereotype::Embedded) {
            let alignment = field
                .parent_struct
                .and_then(|idx| package.struct_at(idx))
                .map(|owner| owner.field_padding(field))
                .unwrap_or_default();
            line.push_str(&styled(Role::Variable, &field.name));
            line.push_str(&padding(alignment));
            line.push(' ');
        }
        line.push_str(&self.render_type(&field.type_desc)?);
        line.push_str(&trailing_comment(&field.comment));
        line.push_str(LINE_BREAK);

        Ok(line)
    }

    /// `[T any, K comparable]`, grouping names that share a constraint.
    fn render_generics(&self, generics: &[Field]) -> Result<String, Error> {
        if generics.is_empty() {
            return Ok(String::new());
        }

        let mut groups: Vec<(Vec<&str>, &TypeDesc)> = Vec::new();
        for generic in generics {
            match groups.last_mut() {
                Some((names, constraint)) if constraint.raw() == generic.type_desc.raw() => {
                    names.push(generic.name.as_str());
                }
                _ => groups.push((vec![generic.name.as_str()], &generic.type_desc)),
            }
        }

        let mut rendered = Vec::with_capacity(groups.len());
        for (names, constraint) in groups {
            let names: Vec<String> = names
                .into_iter()
                .map(|name| styled(Role::Name, name))
                .collect();
            rendered.push(format!("{} {}", names.join(", "), self.render_type(constraint)?));
        }

        Ok(format!("{OPEN_BRACKET}{}{CLOSE_BRACKET}", rendered.join(", ")))
    }

    fn render_function(&self, function: &Function) -> Result<String, Error> {
        trace!(signature = function.signature.as_str(); "Rendering function");

        let signature = format!(
            "{} {}{}{}",
            styled(Role::Keyword, "func"),
            styled(Role::Name, &function.name),
            self.render_generics(&function.type_params)?,
            self.render_parameters_and_results(function)?
        );
        Ok(self.render_callable(&function.ref_id, &function.name, &signature, &function.comment))
    }

    fn render_method(&self, method: &Method) -> Result<String, Error> {
        let function = &method.function;
        trace!(signature = function.signature.as_str(); "Rendering method");

        let signature = format!(
            "{} ({}) {}{}{}",
            styled(Role::Keyword, "func"),
            self.render_parameter(&method.receiver)?,
            styled(Role::Name, &function.name),
            self.render_generics(&function.type_params)?,
            self.render_parameters_and_results(function)?
        );
        Ok(self.render_callable(&function.ref_id, &function.name, &signature, &function.comment))
    }

    fn render_callable(&self, ref_id: &RefId, name: &str, signature: &str, comment: &str) -> String {
        let mut parts = vec![format!(
            "{}\n{}{LINE_BREAK}{}",
            anchor(&anchor_id_of(ref_id)),
            bold(&format!("{} {name}", styled(Role::Keyword, "func"))),
            code_block(signature)
        )];
        if !comment.trim().is_empty() {
            parts.push(reflow(comment));
        }
        parts.join("\n")
    }

    /// `(a int, b string) (int, error)`
    fn render_parameters_and_results(&self, function: &Function) -> Result<String, Error> {
        let parameters = self.render_parameter_list(function.parameters.values())?;
        let results: Vec<&Field> = function.results.values().collect();

        let results = match results.as_slice() {
            [] => String::new(),
            [single] if single.name.is_empty() => format!(" {}", self.render_type(&single.type_desc)?),
            results => format!(" ({})", self.render_parameter_list(results.iter().copied())?),
        };

        Ok(format!("({parameters}){results}"))
    }

    fn render_parameter_list<'a>(
        &self,
        fields: impl Iterator<Item = &'a Field>,
    ) -> Result<String, Error> {
        let mut rendered = Vec::new();
        for field in fields {
            rendered.push(self.render_parameter(field)?);
        }
        Ok(rendered.join(", "))
    }

    fn render_parameter(&self, field: &Field) -> Result<String, Error> {
        let type_desc = self.render_type(&field.type_desc)?;
        if field.name.is_empty() {
            Ok(type_desc)
        } else {
            Ok(format!("{} {type_desc}", styled(Role::Variable, &field.name)))
        }
    }
}

/// ` // comment` after a declaration, or nothing.
fn trailing_comment(comment: &str) -> String {
    let comment = comment.trim();
    if comment.is_empty() {
        String::new()
    } else {
        format!(" {}", styled(Role::Comment, &format!("// {comment}")))
    }
}
