//! Structural merge of a patch tree into a base tree.

use super::ReconcileError;
use crate::tree::LocaleTree;
use crate::types::ConflictPolicy;

/// Merge `patch` into a copy of `base`.
///
/// Where both sides hold a namespace the merge recurses; anywhere else the
/// patch value replaces the base value, whatever its shape. Keys only present
/// in `base` are kept as they are. Neither input is modified.
#[must_use]
pub fn merge(base: &LocaleTree, patch: &LocaleTree) -> LocaleTree {
    let mut merged = base.clone();
    merge_node(&mut merged, patch, &mut Vec::new());
    merged
}

/// Merge with an explicit conflict policy.
///
/// With `ConflictPolicy::Strict` the first leaf/namespace mismatch is returned
/// as an error and nothing is merged.
///
/// # Errors
/// `ReconcileError::StructuralConflict` in strict mode.
pub fn merge_with_policy(
    base: &LocaleTree,
    patch: &LocaleTree,
    policy: ConflictPolicy,
) -> Result<LocaleTree, ReconcileError> {
    if policy == ConflictPolicy::Strict
        && let Some(conflict) = find_conflict(base, patch, &mut Vec::new())
    {
        tracing::debug!(%conflict, "Strict merge rejected");
        return Err(conflict);
    }
    Ok(merge(base, patch))
}

fn merge_node(base: &mut LocaleTree, patch: &LocaleTree, path: &mut Vec<String>) {
    if let LocaleTree::Namespace(patch_children) = patch
        && let LocaleTree::Namespace(base_children) = &mut *base
    {
        for (key, patch_child) in patch_children {
            if let Some(base_child) = base_children.get_mut(key) {
                path.push(key.clone());
                merge_node(base_child, patch_child, path);
                path.pop();
            } else {
                base_children.insert(key.clone(), patch_child.clone());
            }
        }
        return;
    }

    if base.kind() != patch.kind() {
        tracing::warn!(
            path = %path.join("."),
            base = %base.kind(),
            patch = %patch.kind(),
            "Patch replaces value of a different shape"
        );
    }
    *base = patch.clone();
}

/// First place where the patch would replace a value of a different shape.
fn find_conflict(
    base: &LocaleTree,
    patch: &LocaleTree,
    path: &mut Vec<String>,
) -> Option<ReconcileError> {
    match (base, patch) {
        (LocaleTree::Namespace(base_children), LocaleTree::Namespace(patch_children)) => {
            patch_children.iter().find_map(|(key, patch_child)| {
                let base_child = base_children.get(key)?;
                path.push(key.clone());
                let conflict = find_conflict(base_child, patch_child, path);
                path.pop();
                conflict
            })
        }
        (LocaleTree::Leaf(_), LocaleTree::Leaf(_)) => None,
        _ => Some(ReconcileError::StructuralConflict {
            path: path.join("."),
            base: base.kind(),
            patch: patch.kind(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::locale_tree;
    use crate::types::NodeKind;

    #[rstest]
    fn merge_disjoint_keys_is_union() {
        let base = locale_tree(json!({ "a": "x", "b": { "c": "y" } }));
        let patch = locale_tree(json!({ "d": "z", "e": { "f": "w" } }));

        let merged = merge(&base, &patch);

        assert_eq!(
            merged,
            locale_tree(json!({ "a": "x", "b": { "c": "y" }, "d": "z", "e": { "f": "w" } }))
        );
    }

    #[rstest]
    fn merge_recurses_into_shared_namespaces() {
        let base = locale_tree(json!({ "greeting": { "hello": "Hello", "bye": "Bye" } }));
        let patch = locale_tree(json!({ "greeting": { "hello": "Bonjour" } }));

        let merged = merge(&base, &patch);

        assert_eq!(merged, locale_tree(json!({ "greeting": { "hello": "Bonjour", "bye": "Bye" } })));
    }

    #[rstest]
    fn merge_does_not_mutate_inputs() {
        let base = locale_tree(json!({ "a": { "b": "x" } }));
        let patch = locale_tree(json!({ "a": { "b": "y" } }));
        let (base_before, patch_before) = (base.clone(), patch.clone());

        let _ = merge(&base, &patch);

        assert_eq!(base, base_before);
        assert_eq!(patch, patch_before);
    }

    #[rstest]
    fn merge_is_idempotent() {
        let base = locale_tree(json!({ "a": { "b": "x", "c": "keep" }, "d": "old" }));
        let patch = locale_tree(json!({ "a": { "b": "y" }, "d": { "e": "new" } }));

        let once = merge(&base, &patch);
        let twice = merge(&once, &patch);

        assert_eq!(twice, once);
    }

    #[rstest]
    fn merge_is_not_commutative() {
        let left = locale_tree(json!({ "a": "left" }));
        let right = locale_tree(json!({ "a": "right" }));

        assert_eq!(merge(&left, &right).get_leaf(&["a"]), Some("right"));
        assert_eq!(merge(&right, &left).get_leaf(&["a"]), Some("left"));
    }

    #[rstest]
    fn merge_leaf_replaces_namespace_wholesale() {
        let base = locale_tree(json!({ "a": { "b": "x", "c": "y" } }));
        let patch = locale_tree(json!({ "a": "flat" }));

        assert_eq!(merge(&base, &patch), locale_tree(json!({ "a": "flat" })));
    }

    #[rstest]
    fn merge_namespace_replaces_leaf() {
        let base = locale_tree(json!({ "a": "flat", "z": "kept" }));
        let patch = locale_tree(json!({ "a": { "b": "x" } }));

        assert_eq!(merge(&base, &patch), locale_tree(json!({ "a": { "b": "x" }, "z": "kept" })));
    }

    #[rstest]
    fn merge_with_permissive_policy_matches_merge() {
        let base = locale_tree(json!({ "a": { "b": "x" } }));
        let patch = locale_tree(json!({ "a": "flat" }));

        let result = merge_with_policy(&base, &patch, ConflictPolicy::Permissive);

        assert_eq!(result, Ok(merge(&base, &patch)));
    }

    #[googletest::test]
    fn merge_with_strict_policy_reports_conflict_path() {
        let base = locale_tree(json!({ "menu": { "file": { "open": "Open" } } }));
        let patch = locale_tree(json!({ "menu": { "file": "File" } }));

        let result = merge_with_policy(&base, &patch, ConflictPolicy::Strict);

        expect_that!(
            result,
            err(eq(&ReconcileError::StructuralConflict {
                path: "menu.file".to_string(),
                base: NodeKind::Namespace,
                patch: NodeKind::Leaf,
            }))
        );
    }

    #[rstest]
    fn merge_with_strict_policy_accepts_matching_shapes() {
        let base = locale_tree(json!({ "menu": { "open": "Open" } }));
        let patch = locale_tree(json!({ "menu": { "open": "Ouvrir", "new": { "doc": "Document" } } }));

        let merged = merge_with_policy(&base, &patch, ConflictPolicy::Strict).unwrap();

        assert_eq!(merged.get_leaf(&["menu", "open"]), Some("Ouvrir"));
        assert_eq!(merged.get_leaf(&["menu", "new", "doc"]), Some("Document"));
    }
}
