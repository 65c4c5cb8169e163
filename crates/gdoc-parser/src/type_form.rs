//! Type-form parser.
//!
//! Decomposes a raw type expression into a [`TypeForm`]: the run of prefix
//! facets (`*`, `[]`, `[N]`, `...`) in left-to-right order, followed by a
//! map split, a possibly qualified name, or nothing structural at all.
//!
//! Constructs without a decomposition (channels, function literals, inline
//! struct and interface types, arrays with a non-literal length) fall back to
//! [`TypeShape::Plain`] instead of failing.

use log::trace;
use winnow::{
    ModalResult, Parser as _,
    ascii::digit1,
    combinator::{alt, delimited, opt, preceded, repeat},
    token::{one_of, rest, take_while},
};

use gdoc_core::{
    semantic::{MapType, TypeDesc},
    type_form::{Facet, TypeForm, TypeShape},
};

/// Parses a raw type expression into its structural form.
///
/// # Examples
///
/// ```
/// use gdoc_core::type_form::Facet;
/// use gdoc_parser::type_form::parse_type_form;
///
/// let form = parse_type_form("*[]pkg.Foo");
/// assert_eq!(form.facets(), &[Facet::Pointer, Facet::Slice]);
/// assert_eq!(form.qualifier(), Some("pkg"));
/// assert_eq!(form.identifier(), Some("Foo"));
/// ```
pub fn parse_type_form(raw: &str) -> TypeForm {
    let text = raw.trim();
    match type_form.parse(text) {
        Ok(form) => form,
        Err(_) => {
            trace!(raw = text; "Type expression has no structural form");
            TypeForm::plain()
        }
    }
}

/// Builds an unresolved [`TypeDesc`] for a raw type expression, describing
/// both sides of a map type on their own.
pub fn describe(raw: &str) -> TypeDesc {
    let text = raw.trim();
    let form = parse_type_form(text);
    let map_type = match form.shape() {
        TypeShape::Map { key, value } => Some(MapType {
            key: describe(key),
            value: describe(value),
        }),
        _ => None,
    };
    TypeDesc::new(text, form, map_type)
}

/// Returns the raw text of every part of `desc` that degraded to plain text.
pub fn plain_fragments(desc: &TypeDesc) -> Vec<&str> {
    let mut fragments = Vec::new();
    collect_plain(desc, &mut fragments);
    fragments
}

fn collect_plain<'a>(desc: &'a TypeDesc, fragments: &mut Vec<&'a str>) {
    if desc.form().is_plain() && !desc.raw().is_empty() {
        fragments.push(desc.raw());
    }
    if let Some(map) = desc.map_type() {
        collect_plain(&map.key, fragments);
        collect_plain(&map.value, fragments);
    }
}

/// Returns the index of the `]` closing the `[` at `open`.
pub(crate) fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'[') {
        return None;
    }

    let mut depth = 0usize;
    for (offset, byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn type_form(input: &mut &str) -> ModalResult<TypeForm> {
    let facets: Vec<Facet> = repeat(0.., facet).parse_next(input)?;
    let shape = alt((map_shape, named_shape)).parse_next(input)?;
    Ok(TypeForm::new(facets, shape))
}

fn facet(input: &mut &str) -> ModalResult<Facet> {
    alt((
        '*'.value(Facet::Pointer),
        "...".value(Facet::Variadic),
        "[]".value(Facet::Slice),
        delimited('[', digit1.try_map(|digits: &str| digits.parse::<u64>()), ']')
            .map(Facet::Array),
    ))
    .parse_next(input)
}

/// `map[K]V`, where `K` may itself contain brackets.
fn map_shape(input: &mut &str) -> ModalResult<TypeShape> {
    preceded("map", rest)
        .verify_map(|tail: &str| {
            let close = matching_bracket(tail, 0)?;
            let key = &tail[1..close];
            let value = &tail[close + 1..];
            (!key.is_empty() && !value.is_empty()).then(|| TypeShape::Map {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .parse_next(input)
}

/// `Name`, `pkg.Name` or either followed by generic arguments.
fn named_shape(input: &mut &str) -> ModalResult<TypeShape> {
    let first = identifier.parse_next(input)?;
    let second = opt(preceded('.', identifier)).parse_next(input)?;
    let type_args = opt(type_args).parse_next(input)?;

    let (qualifier, identifier) = match second {
        Some(second) => (Some(first.to_string()), second.to_string()),
        None => (None, first.to_string()),
    };

    Ok(TypeShape::Named {
        qualifier,
        identifier,
        type_args: type_args.map(str::to_string),
    })
}

fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Bracketed generic arguments that close at the very end of the input.
fn type_args<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    rest.verify(|args: &str| args.len() > 2 && matching_bracket(args, 0) == Some(args.len() - 1))
        .map(|args: &str| &args[1..args.len() - 1])
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_named(form: &TypeForm, qualifier: Option<&str>, identifier: &str) {
        assert_eq!(form.qualifier(), qualifier);
        assert_eq!(form.identifier(), Some(identifier));
    }

    #[test]
    fn test_plain_identifier() {
        let form = parse_type_form("int");

        assert!(form.facets().is_empty());
        assert_named(&form, None, "int");
    }

    #[test]
    fn test_pointer() {
        let form = parse_type_form("*int");

        assert_eq!(form.facets(), &[Facet::Pointer]);
        assert!(form.is_pointer());
        assert_named(&form, None, "int");
    }

    #[test]
    fn test_slice() {
        let form = parse_type_form("[]int");

        assert_eq!(form.facets(), &[Facet::Slice]);
        assert!(!form.is_pointer());
        assert_named(&form, None, "int");
    }

    #[test]
    fn test_fixed_array() {
        let form = parse_type_form("[5]byte");

        assert_eq!(form.facets(), &[Facet::Array(5)]);
        assert_named(&form, None, "byte");
    }

    #[test]
    fn test_map() {
        let form = parse_type_form("map[string]int");

        assert!(form.facets().is_empty());
        assert_eq!(
            form.shape(),
            &TypeShape::Map {
                key: "string".to_string(),
                value: "int".to_string(),
            }
        );
    }

    #[test]
    fn test_qualified_pointer() {
        let form = parse_type_form("*pkg.Foo");

        assert_eq!(form.facets(), &[Facet::Pointer]);
        assert_named(&form, Some("pkg"), "Foo");
    }

    #[test]
    fn test_map_with_pointer_value() {
        let desc = describe("map[string]*pkg.Foo");
        let map = desc.map_type().expect("map sides");

        assert!(desc.form().is_map());
        assert_named(map.key.form(), None, "string");
        assert!(map.value.is_pointer());
        assert_named(map.value.form(), Some("pkg"), "Foo");
    }

    #[test]
    fn test_marker_order_is_preserved() {
        let form = parse_type_form("*[3][]*Bar");

        assert_eq!(
            form.facets(),
            &[Facet::Pointer, Facet::Array(3), Facet::Slice, Facet::Pointer]
        );
        assert_eq!(form.prefix(), "*[3][]*");
    }

    #[test]
    fn test_variadic() {
        let form = parse_type_form("...string");

        assert_eq!(form.facets(), &[Facet::Variadic]);
        assert_named(&form, None, "string");
    }

    #[test]
    fn test_generic_instantiation() {
        let form = parse_type_form("list.List[map[string]T]");

        assert_named(&form, Some("list"), "List");
        assert_eq!(form.type_args(), Some("map[string]T"));
    }

    #[test]
    fn test_nested_map_key_brackets() {
        let form = parse_type_form("map[[2]int][]string");

        assert_eq!(
            form.shape(),
            &TypeShape::Map {
                key: "[2]int".to_string(),
                value: "[]string".to_string(),
            }
        );
    }

    #[test]
    fn test_map_prefixed_identifier_is_a_name() {
        let form = parse_type_form("mapper");
        assert_named(&form, None, "mapper");
    }

    #[test]
    fn test_channel_falls_back_to_plain() {
        assert!(parse_type_form("chan int").is_plain());
        assert!(parse_type_form("<-chan error").is_plain());
    }

    #[test]
    fn test_other_constructs_fall_back_to_plain() {
        assert!(parse_type_form("func(int) error").is_plain());
        assert!(parse_type_form("interface{}").is_plain());
        assert!(parse_type_form("[N]byte").is_plain());
        assert!(parse_type_form("a.b.C").is_plain());
        assert!(parse_type_form("").is_plain());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let desc = describe("  *Foo\n");

        assert_eq!(desc.raw(), "*Foo");
        assert!(desc.is_pointer());
    }

    #[test]
    fn test_plain_fragments() {
        let desc = describe("map[string]chan int");
        assert_eq!(plain_fragments(&desc), vec!["chan int"]);

        assert!(plain_fragments(&describe("map[string]int")).is_empty());
    }

    #[test]
    fn test_matching_bracket() {
        assert_eq!(matching_bracket("[a[b]c]d", 0), Some(6));
        assert_eq!(matching_bracket("[a[b]c]d", 2), Some(4));
        assert_eq!(matching_bracket("[unclosed", 0), None);
        assert_eq!(matching_bracket("no", 0), None);
    }
}
