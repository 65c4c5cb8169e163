//! Stable declaration identities.
//!
//! This module provides the [`RefId`] type. Every named declaration in the
//! document model carries one, and its [`RefId::id`] digest doubles as the
//! anchor at the declaration site and the link target at every usage site.

use std::fmt;

use sha2::{Digest, Sha256};

/// Prefix that keeps digests valid as markup identifiers (they must not start with a digit).
const DIGEST_PREFIX: &str = "ref";

/// Number of hash bytes kept in a digest.
const DIGEST_BYTES: usize = 16;

/// Identity of a declaration: the import path of its package plus its identifier.
///
/// # Examples
///
/// ```
/// use gdoc_core::identifier::RefId;
///
/// let widget = RefId::new("example.com/shop/catalog", "Widget");
/// let again = RefId::new("example.com/shop/catalog", "Widget");
///
/// assert_eq!(widget.id(), again.id());
/// assert!(widget.id().chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId {
    import_path: String,
    identifier: String,
}

impl RefId {
    /// Creates a new identity.
    ///
    /// # Arguments
    ///
    /// * `import_path` - Import path of the declaring package.
    /// * `identifier` - Name of the declaration inside that package.
    pub fn new(import_path: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            identifier: identifier.into(),
        }
    }

    /// Creates the identity of a member nested in another declaration,
    /// e.g. a method `Widget.Resize`.
    pub fn create_nested(&self, member: &str) -> Self {
        Self::new(
            self.import_path.clone(),
            format!("{}.{}", self.identifier, member),
        )
    }

    /// Returns the import path of the declaring package.
    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    /// Returns the declaration name.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the deterministic digest of this identity.
    ///
    /// The digest only contains ASCII letters and digits and always starts
    /// with a letter, so it can be used verbatim as an anchor name.
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.import_path.as_bytes());
        // Separator keeps ("a", "bc") and ("ab", "c") apart
        hasher.update([0u8]);
        hasher.update(self.identifier.as_bytes());
        let hash = hasher.finalize();

        format!("{DIGEST_PREFIX}{}", hex::encode(&hash[..DIGEST_BYTES]))
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.import_path.is_empty() {
            write!(f, "{}", self.identifier)
        } else {
            write!(f, "{}.{}", self.import_path, self.identifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_stable() {
        let first = RefId::new("example.com/shop/catalog", "Widget");
        let second = RefId::new("example.com/shop/catalog", "Widget");

        assert_eq!(first.id(), first.id());
        assert_eq!(first.id(), second.id());
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_differs_by_identifier() {
        let foo = RefId::new("example.com/shop", "Foo");
        let bar = RefId::new("example.com/shop", "Bar");

        assert_ne!(foo.id(), bar.id());
    }

    #[test]
    fn test_id_differs_by_import_path() {
        let a = RefId::new("example.com/a", "Foo");
        let b = RefId::new("example.com/b", "Foo");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_id_separates_components() {
        let left = RefId::new("a", "bc");
        let right = RefId::new("ab", "c");

        assert_ne!(left.id(), right.id());
    }

    #[test]
    fn test_id_shape() {
        let id = RefId::new("example.com/shop", "Foo").id();

        assert!(id.starts_with(DIGEST_PREFIX));
        assert_eq!(id.len(), DIGEST_PREFIX.len() + DIGEST_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_create_nested() {
        let widget = RefId::new("example.com/shop", "Widget");
        let resize = widget.create_nested("Resize");

        assert_eq!(resize.import_path(), "example.com/shop");
        assert_eq!(resize.identifier(), "Widget.Resize");
        assert_ne!(resize.id(), widget.id());
    }

    #[test]
    fn test_display() {
        let id = RefId::new("example.com/shop", "Widget");
        assert_eq!(id.to_string(), "example.com/shop.Widget");

        let bare = RefId::new("", "Widget");
        assert_eq!(bare.to_string(), "Widget");
    }
}
