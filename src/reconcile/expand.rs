//! Flat dotted-key tables to nested locale trees.

use super::ReconcileError;
use crate::tree::LocaleTree;

/// Separator used by `expand`.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Expand a flat `"a.b.c" -> value` table into a nested tree.
///
/// Entries are applied in iteration order. When a later key needs a segment
/// that an earlier key set to a leaf, the leaf is replaced by a namespace.
///
/// # Examples
/// ```
/// use locale_reconcile::expand;
///
/// let tree = expand([("a.b.c", "x")]).unwrap_or_default();
/// assert_eq!(tree.get_leaf(&["a", "b", "c"]), Some("x"));
/// ```
///
/// # Errors
/// `ReconcileError::MalformedPath` if any key has an empty segment.
pub fn expand<I, K, V>(flat: I) -> Result<LocaleTree, ReconcileError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    expand_with_separator(flat, DEFAULT_SEPARATOR)
}

/// Same as [`expand`] with a custom key separator.
///
/// An empty separator keeps every key as a single segment.
///
/// # Errors
/// `ReconcileError::MalformedPath` if any key has an empty segment.
pub fn expand_with_separator<I, K, V>(flat: I, separator: &str) -> Result<LocaleTree, ReconcileError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut tree = LocaleTree::new();
    let mut entries = 0usize;

    for (key, value) in flat {
        let key = key.as_ref();
        let segments = split_key(key, separator)?;

        if tree.insert_leaf(&segments, value) {
            tracing::warn!(key, "Leaf replaced by a namespace while expanding");
        }
        entries += 1;
    }

    tracing::debug!(entries, leaves = tree.leaf_count(), "Expanded flat keys");
    Ok(tree)
}

/// Split a dotted key into its segments, rejecting empty ones.
///
/// # Errors
/// `ReconcileError::MalformedPath` on the first empty segment.
pub fn split_key<'a>(key: &'a str, separator: &str) -> Result<Vec<&'a str>, ReconcileError> {
    let segments: Vec<&str> =
        if separator.is_empty() { vec![key] } else { key.split(separator).collect() };

    if let Some(segment) = segments.iter().position(|s| s.is_empty()) {
        return Err(ReconcileError::MalformedPath { key: key.to_string(), segment });
    }
    Ok(segments)
}
