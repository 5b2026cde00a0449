//! Locale tree model.
//!
//! A locale tree is one language's strings: every key maps either to a nested
//! namespace or to a terminal leaf string. Placeholders such as `{{name}}` are
//! opaque text inside leaves.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};
use serde_json::Value;
use thiserror::Error;

use crate::types::NodeKind;

/// Ordered children of a namespace. Iteration follows insertion order, which
/// for parsed files is the order keys appear in the JSON document.
pub type Namespace = IndexMap<String, LocaleTree>;

/// Errors raised while converting JSON into a locale tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// JSON arrays and `null` have no leaf/namespace equivalent.
    #[error("Unsupported {kind} value at '{path}'")]
    UnsupportedValue { path: String, kind: &'static str },

    /// A locale document must be an object at its root.
    #[error("Locale document root must be an object, found {0}")]
    RootNotObject(&'static str),
}

/// One language's localized strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocaleTree {
    Leaf(String),
    Namespace(Namespace),
}

impl Default for LocaleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleTree {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::Namespace(Namespace::new())
    }

    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Converts a parsed locale document, requiring an object at the root.
    ///
    /// # Errors
    /// - The root is not an object
    /// - A nested value is an array or `null`
    pub fn from_document(value: Value) -> Result<Self, TreeError> {
        if !value.is_object() {
            return Err(TreeError::RootNotObject(json_kind(&value)));
        }
        Self::try_from(value)
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Leaf(_) => NodeKind::Leaf,
            Self::Namespace(_) => NodeKind::Namespace,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Namespace(_) => None,
        }
    }

    #[must_use]
    pub const fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Leaf(_) => None,
            Self::Namespace(children) => Some(children),
        }
    }

    /// Looks up the node at `path`. An empty path returns the tree itself.
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter().try_fold(self, |node, key| node.as_namespace()?.get(key.as_ref()))
    }

    /// Looks up the leaf string at `path`.
    #[must_use]
    pub fn get_leaf<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
        self.get(path).and_then(Self::as_leaf)
    }

    /// Number of leaves reachable from this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Namespace(children) => children.values().map(Self::leaf_count).sum(),
        }
    }

    /// Writes `value` at `path`, creating namespaces along the way.
    ///
    /// A leaf sitting where a namespace is needed is replaced by an empty
    /// namespace. Returns `true` when that happened anywhere along the path.
    pub fn insert_leaf<S: AsRef<str>>(&mut self, path: &[S], value: impl Into<String>) -> bool {
        let Some((first, rest)) = path.split_first() else {
            *self = Self::Leaf(value.into());
            return false;
        };

        let displaced = self.ensure_namespace();
        let Self::Namespace(children) = self else {
            return displaced;
        };

        let child = children.entry(first.as_ref().to_string()).or_insert_with(Self::new);
        child.insert_leaf(rest, value) || displaced
    }

    /// Turns a leaf into an empty namespace. Returns `true` if a leaf was dropped.
    fn ensure_namespace(&mut self) -> bool {
        if matches!(self, Self::Leaf(_)) {
            *self = Self::new();
            return true;
        }
        false
    }

    /// Flatten into `separator`-joined key paths (e.g. `"common.hello" -> "Hello"`).
    ///
    /// # Examples
    /// ```
    /// use locale_reconcile::LocaleTree;
    /// use serde_json::json;
    ///
    /// let tree = LocaleTree::try_from(json!({
    ///     "common": { "hello": "Hello", "goodbye": "Goodbye" }
    /// }))
    /// .unwrap_or_default();
    ///
    /// let flattened = tree.flatten(".");
    /// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
    /// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> IndexMap<String, String> {
        let mut result = IndexMap::new();
        flatten_node(self, separator, None, &mut result);
        result
    }
}

fn flatten_node(
    node: &LocaleTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut IndexMap<String, String>,
) {
    match node {
        LocaleTree::Namespace(children) => {
            for (key, child) in children {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_node(child, separator, Some(&full_key), result);
            }
        }
        LocaleTree::Leaf(value) => {
            result.insert(prefix.unwrap_or_default().to_string(), value.clone());
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn tree_from_value(value: Value, path: &mut Vec<String>) -> Result<LocaleTree, TreeError> {
    match value {
        Value::String(s) => Ok(LocaleTree::Leaf(s)),
        // Numbers and booleans are kept as their JSON text.
        Value::Bool(_) | Value::Number(_) => Ok(LocaleTree::Leaf(value.to_string())),
        Value::Object(map) => {
            let mut children = Namespace::with_capacity(map.len());
            for (key, child) in map {
                path.push(key);
                let node = tree_from_value(child, path)?;
                if let Some(key) = path.pop() {
                    children.insert(key, node);
                }
            }
            Ok(LocaleTree::Namespace(children))
        }
        Value::Array(_) | Value::Null => Err(TreeError::UnsupportedValue {
            path: path.join("."),
            kind: json_kind(&value),
        }),
    }
}

impl TryFrom<Value> for LocaleTree {
    type Error = TreeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        tree_from_value(value, &mut Vec::new())
    }
}

impl From<&LocaleTree> for Value {
    fn from(tree: &LocaleTree) -> Self {
        match tree {
            LocaleTree::Leaf(s) => Self::String(s.clone()),
            LocaleTree::Namespace(children) => Self::Object(
                children.iter().map(|(key, child)| (key.clone(), Self::from(child))).collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for LocaleTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for LocaleTree {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for LocaleTree {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for LocaleTree {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Namespace(iter.into_iter().map(|(key, child)| (key.into(), child)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::locale_tree;

    #[googletest::test]
    fn test_try_from_nested_object() {
        let tree = locale_tree(json!({
            "common": { "hello": "Hello", "bye": "Goodbye" },
            "title": "App"
        }));

        expect_that!(tree.get_leaf(&["common", "hello"]), some(eq("Hello")));
        expect_that!(tree.get_leaf(&["title"]), some(eq("App")));
        expect_that!(tree.get(&["common"]).map(LocaleTree::kind), some(eq(NodeKind::Namespace)));
        expect_that!(tree.leaf_count(), eq(3));
    }

    #[googletest::test]
    fn test_try_from_keeps_document_key_order() {
        let tree = locale_tree(json!({ "zeta": "z", "alpha": "a", "mid": "m" }));

        let keys: Vec<&str> =
            tree.as_namespace().unwrap().keys().map(String::as_str).collect();

        expect_that!(keys, elements_are![eq(&"zeta"), eq(&"alpha"), eq(&"mid")]);
    }

    #[googletest::test]
    fn test_try_from_stringifies_scalars() {
        let tree = locale_tree(json!({ "count": 42, "enabled": true }));

        expect_that!(tree.get_leaf(&["count"]), some(eq("42")));
        expect_that!(tree.get_leaf(&["enabled"]), some(eq("true")));
    }

    #[rstest]
    #[case(json!({ "items": ["a", "b"] }), "items", "array")]
    #[case(json!({ "menu": { "empty": null } }), "menu.empty", "null")]
    fn test_try_from_rejects_unsupported(
        #[case] value: Value,
        #[case] path: &str,
        #[case] kind: &'static str,
    ) {
        let result = LocaleTree::try_from(value);

        assert_eq!(result, Err(TreeError::UnsupportedValue { path: path.to_string(), kind }));
    }

    #[rstest]
    fn test_from_document_requires_object_root() {
        let result = LocaleTree::from_document(json!("just a string"));

        assert_eq!(result, Err(TreeError::RootNotObject("string")));
    }

    #[rstest]
    fn test_value_conversion_keeps_shape() {
        let original = json!({ "a": { "b": "x" }, "c": "y" });

        let value = Value::from(&locale_tree(original.clone()));

        assert_eq!(value, original);
    }

    #[rstest]
    fn test_get_empty_path_returns_root() {
        let tree = locale_tree(json!({ "a": "x" }));

        assert_eq!(tree.get::<&str>(&[]), Some(&tree));
    }

    #[rstest]
    fn test_get_through_leaf_is_none() {
        let tree = locale_tree(json!({ "a": "x" }));

        assert_eq!(tree.get(&["a", "b"]), None);
    }

    #[rstest]
    fn test_insert_leaf_creates_namespaces() {
        let mut tree = LocaleTree::new();

        let displaced = tree.insert_leaf(&["a", "b", "c"], "x");

        assert!(!displaced);
        assert_eq!(tree, locale_tree(json!({ "a": { "b": { "c": "x" } } })));
    }

    #[rstest]
    fn test_insert_leaf_replaces_intermediate_leaf() {
        let mut tree = locale_tree(json!({ "a": "x", "other": "kept" }));

        let displaced = tree.insert_leaf(&["a", "b"], "y");

        assert!(displaced);
        assert_eq!(tree, locale_tree(json!({ "a": { "b": "y" }, "other": "kept" })));
    }

    #[googletest::test]
    fn test_flatten_nested() {
        let tree = locale_tree(json!({
            "common": { "hello": "Hello", "goodbye": "Goodbye" },
            "errors": { "notFound": "Not found" }
        }));

        let result = tree.flatten(".");

        expect_that!(result.get("common.hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("common.goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(result.get("errors.notFound"), some(eq(&"Not found".to_string())));
        expect_that!(result.len(), eq(3));
    }

    #[googletest::test]
    fn test_flatten_custom_separator() {
        let tree = locale_tree(json!({ "common": { "hello": "Hello" } }));

        let result = tree.flatten("_");

        expect_that!(result.get("common_hello"), some(eq(&"Hello".to_string())));
    }

    #[rstest]
    fn test_deserialize_reports_unsupported_value() {
        let result: std::result::Result<LocaleTree, _> =
            serde_json::from_str(r#"{ "list": [1, 2] }"#);

        assert!(result.unwrap_err().to_string().contains("Unsupported array value at 'list'"));
    }
}
