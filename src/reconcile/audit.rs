//! Detection of source leaves the target language has not localized yet.

use std::collections::HashSet;

use super::expand::split_key;
use super::ReconcileError;
use crate::tree::LocaleTree;
use crate::types::{
    UntranslatedEntry,
    UntranslatedReason,
};

/// Leaves that may legitimately equal the source text ("OK", "km", brand names).
///
/// An allow-listed leaf is never reported as identical to the source. It is
/// still reported when the target is missing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    /// Source values that are the same in every language.
    values: HashSet<String>,
    /// Key paths whose value may stay identical.
    keys: HashSet<Vec<String>>,
}

impl AllowList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows every leaf whose source text is `value`.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.insert(value.into());
        self
    }

    /// Allows the leaf at `separator`-joined `key`.
    ///
    /// # Errors
    /// `ReconcileError::MalformedPath` if `key` has an empty segment.
    pub fn with_key(mut self, key: &str, separator: &str) -> Result<Self, ReconcileError> {
        let path = split_key(key, separator)?.into_iter().map(str::to_string).collect();
        self.keys.insert(path);
        Ok(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.keys.is_empty()
    }

    fn allows(&self, path: &[String], source_value: &str) -> bool {
        self.values.contains(source_value) || self.keys.contains(path)
    }
}

/// List every untranslated leaf of `source`, depth-first in source key order.
///
/// A leaf is untranslated when `target` has no leaf at its path or the target
/// leaf equals the source leaf. A namespace missing from `target` yields one
/// entry per leaf it contains.
#[must_use]
pub fn find_untranslated(source: &LocaleTree, target: &LocaleTree) -> Vec<UntranslatedEntry> {
    find_untranslated_with(source, target, &AllowList::default())
}

/// Same as [`find_untranslated`], skipping identical leaves the allow-list accepts.
#[must_use]
pub fn find_untranslated_with(
    source: &LocaleTree,
    target: &LocaleTree,
    allow_list: &AllowList,
) -> Vec<UntranslatedEntry> {
    let mut entries = Vec::new();
    walk(source, Some(target), &mut Vec::new(), allow_list, &mut |path, source_value, reason| {
        entries.push(UntranslatedEntry {
            path: path.to_vec(),
            source_value: source_value.to_string(),
            reason,
        });
    });
    entries
}

/// Number of entries [`find_untranslated`] would return.
#[must_use]
pub fn count_untranslated(source: &LocaleTree, target: &LocaleTree) -> usize {
    count_untranslated_with(source, target, &AllowList::default())
}

/// Number of entries [`find_untranslated_with`] would return.
#[must_use]
pub fn count_untranslated_with(
    source: &LocaleTree,
    target: &LocaleTree,
    allow_list: &AllowList,
) -> usize {
    let mut count = 0;
    walk(source, Some(target), &mut Vec::new(), allow_list, &mut |_, _, _| count += 1);
    count
}

fn walk<F>(
    source: &LocaleTree,
    target: Option<&LocaleTree>,
    path: &mut Vec<String>,
    allow_list: &AllowList,
    visit: &mut F,
) where
    F: FnMut(&[String], &str, UntranslatedReason),
{
    match source {
        LocaleTree::Leaf(source_value) => {
            let reason = match target.and_then(LocaleTree::as_leaf) {
                None => Some(UntranslatedReason::Missing),
                Some(target_value) if target_value == source_value.as_str() => {
                    (!allow_list.allows(path, source_value))
                        .then_some(UntranslatedReason::IdenticalToSource)
                }
                Some(_) => None,
            };
            if let Some(reason) = reason {
                visit(path, source_value, reason);
            }
        }
        LocaleTree::Namespace(children) => {
            let target_children = target.and_then(LocaleTree::as_namespace);
            for (key, child) in children {
                path.push(key.clone());
                walk(child, target_children.and_then(|t| t.get(key)), path, allow_list, visit);
                path.pop();
            }
        }
    }
}
