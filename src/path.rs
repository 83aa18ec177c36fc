//! Module path addressing

use std::fmt;

/// Ordered sequence of string keys addressing a module by descending from
/// the root. The empty sequence addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    /// The empty path, addressing the root module.
    pub fn root() -> Self {
        ModulePath(Vec::new())
    }

    /// Build a path from an ordered sequence of keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModulePath(keys.into_iter().map(Into::into).collect())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path by one key, yielding the child path.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        ModulePath(keys)
    }

    /// Split into parent keys and the final key.
    ///
    /// Returns `None` for the root path, which has no parent.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.0
            .split_last()
            .map(|(last, parent)| (parent, last.as_str()))
    }

    /// Dot-joined rendering used in diagnostics, e.g. `"cart.items"`.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.dotted())
        }
    }
}

impl From<Vec<String>> for ModulePath {
    fn from(keys: Vec<String>) -> Self {
        ModulePath(keys)
    }
}

impl From<&[&str]> for ModulePath {
    fn from(keys: &[&str]) -> Self {
        ModulePath::new(keys.iter().copied())
    }
}
