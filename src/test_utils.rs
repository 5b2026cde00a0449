//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::Value;

use crate::tree::LocaleTree;

/// JSON リテラルから `LocaleTree` を作成する
///
/// # Arguments
/// * `value` - ネストした JSON オブジェクト（`serde_json::json!` で記述）
///
/// # Returns
/// 変換された `LocaleTree`
#[allow(clippy::expect_used)]
pub(crate) fn locale_tree(value: Value) -> LocaleTree {
    LocaleTree::try_from(value).expect("test fixture must be a valid locale tree")
}
