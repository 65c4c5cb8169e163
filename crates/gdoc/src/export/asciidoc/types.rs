//! AsciiDoc rendering of type occurrences.

use gdoc_core::{
    identifier::RefId,
    semantic::{TypeDesc, TypeOrigin},
    type_form::TypeShape,
};
use gdoc_parser::link_target_of;

use super::{
    AsciiDoc,
    markup::{LINE_BREAK, Role, cross_reference, escape_prefix, pass_through, styled},
};
use crate::export::Error;

/// AsciiDoc built-in attributes for square brackets.
pub(super) const OPEN_BRACKET: &str = "{startsb}";
pub(super) const CLOSE_BRACKET: &str = "{endsb}";

impl AsciiDoc {
    /// Renders one resolved type occurrence.
    ///
    /// Built-in types are styled text, local types link to their declaration,
    /// types of other analyzed packages link to both the package and the
    /// declaration, and untracked types stay unlinked.
    pub(super) fn render_type(&self, desc: &TypeDesc) -> Result<String, Error> {
        let origin = desc
            .origin()
            .ok_or_else(|| Error::Render(format!("type `{}` is unresolved", desc.raw())))?;
        let form = desc.form();
        let prefix = escape_prefix(&form.prefix());

        let body = match (form.shape(), desc.map_type()) {
            (TypeShape::Map { .. }, Some(map)) => format!(
                "{}{OPEN_BRACKET}{}{CLOSE_BRACKET}{}",
                styled(Role::Keyword, "map"),
                self.render_type(&map.key)?,
                self.render_type(&map.value)?
            ),
            (
                TypeShape::Named {
                    qualifier,
                    identifier,
                    type_args,
                },
                _,
            ) => {
                let name = self.render_name(desc, origin, qualifier.as_deref(), identifier)?;
                let type_args = type_args
                    .as_deref()
                    .map(|args| pass_through(&format!("[{args}]")))
                    .unwrap_or_default();
                format!("{name}{type_args}")
            }
            _ => render_plain(desc.raw()),
        };

        Ok(format!("{prefix}{body}"))
    }

    fn render_name(
        &self,
        desc: &TypeDesc,
        origin: TypeOrigin,
        qualifier: Option<&str>,
        identifier: &str,
    ) -> Result<String, Error> {
        let name = styled(Role::Type, identifier);

        match (origin, qualifier) {
            (TypeOrigin::BuiltIn, None) => Ok(styled(Role::Builtin, identifier)),
            (TypeOrigin::BuiltIn, Some(qualifier)) => {
                Ok(styled(Role::Builtin, &format!("{qualifier}.{identifier}")))
            }
            (TypeOrigin::LocalCustom, _) => {
                let target = linked_identity(desc)?;
                Ok(cross_reference(&link_target_of(target), &name))
            }
            (TypeOrigin::ExternalCustom, qualifier) => {
                let target = linked_identity(desc)?;
                let qualifier = qualifier.unwrap_or_default();
                let package = RefId::new(target.import_path(), qualifier);
                Ok(format!(
                    "{}.{}",
                    cross_reference(&link_target_of(&package), &styled(Role::Type, qualifier)),
                    cross_reference(&link_target_of(target), &name)
                ))
            }
            (TypeOrigin::ExternalNonCustom, Some(qualifier)) => {
                Ok(format!("{}.{name}", styled(Role::Type, qualifier)))
            }
            (TypeOrigin::ExternalNonCustom, None) => Ok(name),
        }
    }
}

fn linked_identity(desc: &TypeDesc) -> Result<&RefId, Error> {
    desc.ref_id()
        .ok_or_else(|| Error::Render(format!("linked type `{}` has no identity", desc.raw())))
}

/// Renders a type without structure, keeping its line breaks.
fn render_plain(raw: &str) -> String {
    let lines: Vec<String> = raw.lines().map(|line| pass_through(line.trim_end())).collect();
    styled(Role::Builtin, &lines.join(LINE_BREAK))
}
