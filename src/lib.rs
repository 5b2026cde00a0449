//! locale-reconcile
//!
//! ソース言語のロケールツリーを基準に、翻訳先ロケールの未翻訳キーを検出・補完するライブラリ

pub mod config;
pub mod indexer;
pub mod input;
pub mod reconcile;
pub mod tree;
pub mod types;

mod test_utils;

pub use reconcile::{
    ApplyOptions,
    ApplyOutcome,
    Delta,
    PhraseDictionary,
    ReconcileError,
    apply,
    apply_with,
    count_untranslated,
    expand,
    find_untranslated,
    merge,
    translate_text,
};
pub use tree::LocaleTree;
