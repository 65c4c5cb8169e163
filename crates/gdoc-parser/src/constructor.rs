//! Constructor association policies.
//!
//! Deciding that a function constructs a type is a guess about author
//! intent, so the builder asks a [`ConstructorPolicy`] instead of matching
//! names itself.

use std::collections::BTreeSet;

use gdoc_core::semantic::Function;

/// Decides which documented type, if any, a function constructs.
pub trait ConstructorPolicy {
    /// Returns the name of the type in `type_names` that `function` constructs.
    fn constructed_type(
        &self,
        function: &Function,
        type_names: &BTreeSet<String>,
    ) -> Option<String>;
}

/// Matches constructors by name prefix.
///
/// A function is a constructor of `T` when it is named `<prefix>T`, or when
/// its name starts with a prefix and its first result is `T` or `*T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixConstructorPolicy {
    prefixes: Vec<String>,
}

impl PrefixConstructorPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for PrefixConstructorPolicy {
    fn default() -> Self {
        Self::new(["New"])
    }
}

impl ConstructorPolicy for PrefixConstructorPolicy {
    fn constructed_type(
        &self,
        function: &Function,
        type_names: &BTreeSet<String>,
    ) -> Option<String> {
        let mut suffixes = self
            .prefixes
            .iter()
            .filter_map(|prefix| function.name.strip_prefix(prefix.as_str()))
            .peekable();
        suffixes.peek()?;

        if let Some(exact) = suffixes.find(|suffix| type_names.contains(*suffix)) {
            return Some(exact.to_string());
        }

        let result = function.first_result()?.form();
        if result.qualifier().is_some() {
            return None;
        }
        result
            .identifier()
            .filter(|identifier| type_names.contains(*identifier))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_form::describe;
    use gdoc_core::{
        identifier::RefId,
        semantic::{Field, Stereotype},
    };

    fn function(name: &str, result: Option<&str>) -> Function {
        let mut function = Function::new(RefId::new("m/p", name), name);
        if let Some(result) = result {
            function.results.insert(
                "__0".to_string(),
                Field::new("", describe(result), Stereotype::Result),
            );
        }
        function
    }

    fn types() -> BTreeSet<String> {
        ["Widget", "Reader"].into_iter().map(String::from).collect()
    }

    #[test]
    fn test_exact_name() {
        let policy = PrefixConstructorPolicy::default();

        assert_eq!(
            policy.constructed_type(&function("NewWidget", None), &types()),
            Some("Widget".to_string())
        );
    }

    #[test]
    fn test_prefix_with_matching_result() {
        let policy = PrefixConstructorPolicy::default();

        assert_eq!(
            policy.constructed_type(&function("NewDefaultWidget", Some("*Widget")), &types()),
            Some("Widget".to_string())
        );
    }

    #[test]
    fn test_prefix_with_foreign_result() {
        let policy = PrefixConstructorPolicy::default();

        assert_eq!(
            policy.constructed_type(&function("NewClient", Some("*http.Client")), &types()),
            None
        );
    }

    #[test]
    fn test_no_prefix() {
        let policy = PrefixConstructorPolicy::default();

        assert_eq!(
            policy.constructed_type(&function("MakeWidget", Some("*Widget")), &types()),
            None
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let policy = PrefixConstructorPolicy::new(["Make", "Open"]);

        assert_eq!(
            policy.constructed_type(&function("OpenReader", None), &types()),
            Some("Reader".to_string())
        );
        assert_eq!(
            policy.constructed_type(&function("NewWidget", None), &types()),
            None
        );
    }
}
