//! Audit, apply a patch or dictionary, audit again.

use std::borrow::Cow;

use super::audit::{
    AllowList,
    count_untranslated_with,
    find_untranslated_with,
};
use super::merge::{
    merge,
    merge_with_policy,
};
use super::substitute::{
    PhraseDictionary,
    translate_text,
};
use super::ReconcileError;
use crate::tree::LocaleTree;
use crate::types::ConflictPolicy;

/// New translations for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    /// Partial tree merged over the target.
    Patch(LocaleTree),
    /// Phrase table applied to every untranslated source leaf.
    Dictionary(PhraseDictionary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub policy: ConflictPolicy,
    pub allow_list: AllowList,
}

/// Result of [`apply`]: the updated tree and the progress counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub updated_tree: LocaleTree,
    /// Untranslated leaves before the delta was applied.
    pub untranslated_before: usize,
    /// Drop in the untranslated count. Zero if the delta made things worse.
    pub translated_count: usize,
    pub remaining_untranslated: usize,
}

/// Apply `delta` to `target` and report how many source leaves it localized.
///
/// Shape conflicts are resolved in favour of the delta.
#[must_use]
pub fn apply(source: &LocaleTree, target: &LocaleTree, delta: &Delta) -> ApplyOutcome {
    let allow_list = AllowList::default();
    let patch = patch_for(source, target, delta, &allow_list);
    let updated_tree = merge(target, &patch);
    outcome(source, target, updated_tree, &allow_list)
}

/// Same as [`apply`] with a conflict policy and an allow-list.
///
/// # Errors
/// `ReconcileError::StructuralConflict` when `options.policy` is strict and the
/// delta would change the shape of the target.
pub fn apply_with(
    source: &LocaleTree,
    target: &LocaleTree,
    delta: &Delta,
    options: &ApplyOptions,
) -> Result<ApplyOutcome, ReconcileError> {
    let patch = patch_for(source, target, delta, &options.allow_list);
    let updated_tree = merge_with_policy(target, &patch, options.policy)?;
    Ok(outcome(source, target, updated_tree, &options.allow_list))
}

/// The tree to merge over the target: the patch itself, or the dictionary
/// translations of the currently untranslated leaves.
fn patch_for<'a>(
    source: &LocaleTree,
    target: &LocaleTree,
    delta: &'a Delta,
    allow_list: &AllowList,
) -> Cow<'a, LocaleTree> {
    match delta {
        Delta::Patch(patch) => Cow::Borrowed(patch),
        Delta::Dictionary(dictionary) => {
            Cow::Owned(dictionary_patch(source, target, dictionary, allow_list))
        }
    }
}

fn dictionary_patch(
    source: &LocaleTree,
    target: &LocaleTree,
    dictionary: &PhraseDictionary,
    allow_list: &AllowList,
) -> LocaleTree {
    let mut patch = LocaleTree::new();
    for entry in find_untranslated_with(source, target, allow_list) {
        let translated = translate_text(&entry.source_value, dictionary);
        if translated != entry.source_value {
            patch.insert_leaf(entry.path.as_slice(), translated);
        }
    }
    tracing::debug!(leaves = patch.leaf_count(), "Built patch from dictionary");
    patch
}

fn outcome(
    source: &LocaleTree,
    target: &LocaleTree,
    updated_tree: LocaleTree,
    allow_list: &AllowList,
) -> ApplyOutcome {
    let untranslated_before = count_untranslated_with(source, target, allow_list);
    let remaining_untranslated = count_untranslated_with(source, &updated_tree, allow_list);
    let translated_count = untranslated_before.saturating_sub(remaining_untranslated);

    tracing::debug!(
        untranslated_before,
        translated_count,
        remaining_untranslated,
        "Applied translation delta"
    );

    ApplyOutcome { updated_tree, untranslated_before, translated_count, remaining_untranslated }
}
