//! Comment linker.
//!
//! Rewrites identifiers found in free-text documentation into AsciiDoc
//! cross references. Each whitespace-separated token is tried, in order, as:
//!
//! 1. a qualified name `pkg.Name`, where `pkg` is an import path or a
//!    trailing run of its segments,
//! 2. a declaration of the current package,
//! 3. a bracketed doc link `[Name]` or `[pkg.Name]`.
//!
//! The first rule that matches wins. Indented lines are preformatted text
//! and are left untouched, as is all whitespace.

use log::debug;

use gdoc_core::{identifier::RefId, semantic::Module};

use crate::registry::{CrossRefRegistry, PackageEntry, link_target_of};

/// Punctuation allowed to trail a linked identifier.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"'];

/// Punctuation allowed to lead a linked identifier.
const LEADING_PUNCTUATION: &[char] = &['(', '\'', '"'];

/// Chooses among several packages matching one qualifier.
pub trait LinkTieBreak {
    /// Picks one of `candidates`, which is never empty and is sorted by import path.
    fn choose<'a>(&self, candidates: &[&'a PackageEntry]) -> Option<&'a PackageEntry>;
}

/// Picks the candidate with the smallest import path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalTieBreak;

impl LinkTieBreak for LexicalTieBreak {
    fn choose<'a>(&self, candidates: &[&'a PackageEntry]) -> Option<&'a PackageEntry> {
        candidates
            .iter()
            .copied()
            .min_by(|a, b| a.import_path.cmp(&b.import_path))
    }
}

/// Rewrites comment text using a [`CrossRefRegistry`].
pub struct CommentLinker<'a> {
    registry: &'a CrossRefRegistry,
    tie_break: &'a dyn LinkTieBreak,
}

impl<'a> CommentLinker<'a> {
    pub fn new(registry: &'a CrossRefRegistry, tie_break: &'a dyn LinkTieBreak) -> Self {
        Self {
            registry,
            tie_break,
        }
    }

    /// Links `text` as written inside the package at `import_path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdoc_core::identifier::RefId;
    /// use gdoc_parser::{CommentLinker, CrossRefRegistry, LexicalTieBreak};
    ///
    /// let mut registry = CrossRefRegistry::new();
    /// let widget = RefId::new("m/shop", "Widget");
    /// registry.register(widget.clone());
    ///
    /// let linker = CommentLinker::new(&registry, &LexicalTieBreak);
    /// let linked = linker.link("Returns a Widget.", "m/shop");
    ///
    /// assert_eq!(linked, format!("Returns a <<{},Widget>>.", widget.id()));
    /// ```
    pub fn link(&self, text: &str, import_path: &str) -> String {
        let mut linked = String::with_capacity(text.len());

        for line in text.split_inclusive('\n') {
            // Preformatted lines stay verbatim; indented list items are prose.
            if line.starts_with([' ', '\t']) && !is_list_item(line) {
                linked.push_str(line);
                continue;
            }

            for piece in line.split_inclusive(char::is_whitespace) {
                let word = piece.trim_end_matches(char::is_whitespace);
                let spacing = &piece[word.len()..];
                linked.push_str(&self.link_word(word, import_path));
                linked.push_str(spacing);
            }
        }

        linked
    }

    /// Links every documentation string of `module` in place.
    pub fn link_module(&self, module: &mut Module) {
        for package in module.packages.values_mut() {
            let import_path = package.import_path.clone();
            package.visit_docs_mut(&mut |doc| {
                if !doc.is_empty() {
                    *doc = self.link(doc, &import_path);
                }
            });
            debug!(package = import_path.as_str(); "Comments linked");
        }
    }

    fn link_word(&self, word: &str, import_path: &str) -> String {
        let core = word.trim_start_matches(LEADING_PUNCTUATION);
        let lead = &word[..word.len() - core.len()];
        let token = core.trim_end_matches(TRAILING_PUNCTUATION);
        let trail = &core[token.len()..];

        match self.link_token(token, import_path) {
            Some(reference) => format!("{lead}{reference}{trail}"),
            None => word.to_string(),
        }
    }

    fn link_token(&self, token: &str, import_path: &str) -> Option<String> {
        if token.is_empty() {
            return None;
        }

        self.link_qualified(token)
            .or_else(|| self.link_local(token, import_path))
            .or_else(|| {
                let inner = token.strip_prefix('[')?.strip_suffix(']')?;
                self.link_qualified(inner)
                    .or_else(|| self.link_local(inner, import_path))
            })
    }

    /// `pkg.Name` or `pkg.Type.Method`.
    fn link_qualified(&self, token: &str) -> Option<String> {
        let (qualifier, identifier) = split_qualified(token)?;

        let candidates: Vec<&PackageEntry> = self
            .registry
            .packages()
            .filter(|entry| entry.matches_qualifier(qualifier))
            .filter(|entry| self.registry.lookup(&entry.import_path, identifier).is_some())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let package = self.tie_break.choose(&candidates)?;
        let target = self.registry.lookup(&package.import_path, identifier)?;
        Some(format!(
            "{}.{}",
            cross_reference(&package.ref_id, qualifier),
            cross_reference(target, identifier)
        ))
    }

    fn link_local(&self, token: &str, import_path: &str) -> Option<String> {
        self.registry
            .lookup(import_path, token)
            .map(|target| cross_reference(target, token))
    }
}

fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ") || trimmed.trim_end() == "-"
}

/// Splits `pkg.Name` at the first dot that is followed by an exported name.
fn split_qualified(token: &str) -> Option<(&str, &str)> {
    token.match_indices('.').find_map(|(at, _)| {
        let (qualifier, rest) = (&token[..at], &token[at + 1..]);
        let starts_exported = rest.chars().next().is_some_and(char::is_uppercase);
        (!qualifier.is_empty() && starts_exported).then_some((qualifier, rest))
    })
}

fn cross_reference(ref_id: &RefId, label: &str) -> String {
    format!("<<{},{label}>>", link_target_of(ref_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = "example.com/shop";
    const CATALOG: &str = "example.com/shop/catalog";

    fn registry() -> CrossRefRegistry {
        let mut registry = CrossRefRegistry::new();
        registry.register_package(SHOP, "shop", RefId::new(SHOP, "shop"));
        registry.register_package(CATALOG, "catalog", RefId::new(CATALOG, "catalog"));
        registry.register(RefId::new(SHOP, "Cart"));
        registry.register(RefId::new(SHOP, "Cart.Add"));
        registry.register(RefId::new(CATALOG, "Widget"));
        registry
    }

    fn link(text: &str, import_path: &str) -> String {
        let registry = registry();
        CommentLinker::new(&registry, &LexicalTieBreak).link(text, import_path)
    }

    fn xref(import_path: &str, identifier: &str, label: &str) -> String {
        format!("<<{},{label}>>", RefId::new(import_path, identifier).id())
    }

    #[test]
    fn test_local_link() {
        assert_eq!(
            link("Cart holds items.", SHOP),
            format!("{} holds items.", xref(SHOP, "Cart", "Cart"))
        );
    }

    #[test]
    fn test_qualified_link() {
        assert_eq!(
            link("Stores catalog.Widget values", SHOP),
            format!(
                "Stores {}.{} values",
                xref(CATALOG, "catalog", "catalog"),
                xref(CATALOG, "Widget", "Widget")
            )
        );
    }

    #[test]
    fn test_qualified_method_link() {
        assert_eq!(
            link("See shop.Cart.Add", CATALOG),
            format!(
                "See {}.{}",
                xref(SHOP, "shop", "shop"),
                xref(SHOP, "Cart.Add", "Cart.Add")
            )
        );
    }

    #[test]
    fn test_bracketed_link() {
        assert_eq!(
            link("Use [Cart], or [catalog.Widget].", SHOP),
            format!(
                "Use {}, or {}.{}.",
                xref(SHOP, "Cart", "Cart"),
                xref(CATALOG, "catalog", "catalog"),
                xref(CATALOG, "Widget", "Widget")
            )
        );
    }

    #[test]
    fn test_unknown_tokens_are_untouched() {
        let text = "A cart, e.g. a basket.\nNothing here";
        assert_eq!(link(text, SHOP), text);
    }

    #[test]
    fn test_local_lookup_is_per_package() {
        assert_eq!(link("Cart", CATALOG), "Cart");
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let linked = link("Cart  and\tCart\n\nend", SHOP);
        let cart = xref(SHOP, "Cart", "Cart");

        assert_eq!(linked, format!("{cart}  and\t{cart}\n\nend"));
    }

    #[test]
    fn test_indented_code_is_untouched_but_list_items_link() {
        let code = "Example:\n\tcart := Cart{}\n";
        assert_eq!(link(code, SHOP), code);

        let list = "Notes:\n  - every Cart is tracked\n  - see Cart for details\n";
        let cart = xref(SHOP, "Cart", "Cart");
        assert_eq!(
            link(list, SHOP),
            format!("Notes:\n  - every {cart} is tracked\n  - see {cart} for details\n")
        );
    }

    #[test]
    fn test_parenthesized_link() {
        assert_eq!(
            link("(see Cart)", SHOP),
            format!("(see {})", xref(SHOP, "Cart", "Cart"))
        );
    }

    #[test]
    fn test_lexical_tie_break() {
        let mut registry = CrossRefRegistry::new();
        for path in ["m/z/util", "m/a/util"] {
            registry.register_package(path, "util", RefId::new(path, "util"));
            registry.register(RefId::new(path, "Pool"));
        }

        let linked = CommentLinker::new(&registry, &LexicalTieBreak).link("util.Pool", "m/app");

        assert_eq!(
            linked,
            format!(
                "{}.{}",
                xref("m/a/util", "util", "util"),
                xref("m/a/util", "Pool", "Pool")
            )
        );
    }

    #[test]
    fn test_custom_tie_break() {
        struct Last;
        impl LinkTieBreak for Last {
            fn choose<'a>(&self, candidates: &[&'a PackageEntry]) -> Option<&'a PackageEntry> {
                candidates.last().copied()
            }
        }

        let mut registry = CrossRefRegistry::new();
        for path in ["m/a/util", "m/z/util"] {
            registry.register_package(path, "util", RefId::new(path, "util"));
            registry.register(RefId::new(path, "Pool"));
        }

        let linked = CommentLinker::new(&registry, &Last).link("util.Pool", "m/app");
        assert!(linked.ends_with(&xref("m/z/util", "Pool", "Pool")));
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("pkg.Foo"), Some(("pkg", "Foo")));
        assert_eq!(split_qualified("pkg.Foo.Bar"), Some(("pkg", "Foo.Bar")));
        assert_eq!(split_qualified("example.com/shop.Cart"), Some(("example.com/shop", "Cart")));
        assert_eq!(split_qualified("Foo"), None);
        assert_eq!(split_qualified(".Foo"), None);
    }

    #[test]
    fn test_link_module_rewrites_docs() {
        use gdoc_core::semantic::{Function, Package};

        let mut package = Package::new(SHOP, "shop");
        package.doc = "Package shop sells a Cart.".to_string();
        let mut open = Function::new(RefId::new(SHOP, "Open"), "Open");
        open.comment = "Open returns a catalog.Widget.".to_string();
        package.functions.insert("Open".to_string(), open);
        let mut module = Module::new("example.com/shop");
        module.insert_package(package);

        let registry = registry();
        CommentLinker::new(&registry, &LexicalTieBreak).link_module(&mut module);

        let package = module.package(SHOP).expect("package");
        assert_eq!(
            package.doc,
            format!("Package shop sells a {}.", xref(SHOP, "Cart", "Cart"))
        );
        assert!(package.functions["Open"].comment.contains(&xref(CATALOG, "Widget", "Widget")));
    }
}
