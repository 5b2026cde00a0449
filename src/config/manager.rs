//! 設定管理を行うモジュール

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    ReconcileSettings,
};
use crate::types::ConflictPolicy;

/// ワークスペースに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".locale-reconcile.json";

/// コマンドライン引数による上書き
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// `--source-lang`
    pub source_language: Option<String>,
    /// `--strict`
    pub conflict_policy: Option<ConflictPolicy>,
}

/// 設定管理を行う
///
/// `Default` は設定ファイルなしの既定値
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    settings: ReconcileSettings,
}

impl ConfigManager {
    /// ワークスペースの設定を読み込む
    ///
    /// `.locale-reconcile.json` がなければ既定値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load(workspace_root: &Path) -> Result<Self, ConfigError> {
        let config_path = workspace_root.join(CONFIG_FILE_NAME);

        let settings = match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                tracing::debug!("Loading configuration from: {:?}", config_path);
                serde_json::from_str(&content)
                    .map_err(|source| ConfigError::ParseError { path: config_path, source })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Configuration file not found: {:?}", config_path);
                ReconcileSettings::default()
            }
            Err(source) => return Err(ConfigError::IoError { path: config_path, source }),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!("Settings loaded successfully: {:?}", settings);

        Ok(Self { settings })
    }

    /// 上書きを適用する
    ///
    /// 失敗した場合は現在の設定を保つ
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) -> Result<(), ConfigError> {
        let mut settings = self.settings.clone();
        if let Some(source_language) = &overrides.source_language {
            settings.source_language.clone_from(source_language);
        }
        if let Some(conflict_policy) = overrides.conflict_policy {
            settings.conflict_policy = conflict_policy;
        }

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(?overrides, "Applied setting overrides");
        self.settings = settings;

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }
}
