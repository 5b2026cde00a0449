//! Reconciliation of a target-language locale tree against the source language.
//!
//! Every operation here is pure: inputs are borrowed, results are fresh values.

pub mod apply;
pub mod audit;
pub mod error;
pub mod expand;
pub mod merge;
pub mod substitute;

pub use apply::{
    ApplyOptions,
    ApplyOutcome,
    Delta,
    apply,
    apply_with,
};
pub use audit::{
    AllowList,
    count_untranslated,
    count_untranslated_with,
    find_untranslated,
    find_untranslated_with,
};
pub use error::ReconcileError;
pub use expand::{
    DEFAULT_SEPARATOR,
    expand,
    expand_with_separator,
};
pub use merge::{
    merge,
    merge_with_policy,
};
pub use substitute::{
    PhraseDictionary,
    translate_text,
};
