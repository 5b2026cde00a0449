use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::reconcile::{
    AllowList,
    ReconcileError,
};
use crate::types::ConflictPolicy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read {}: {source}", path.display())]
    IoError { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse {}: {source}", path.display())]
    ParseError { path: PathBuf, source: serde_json::Error },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileSettings {
    /// Language whose file defines the canonical key shape.
    pub source_language: String,

    pub key_separator: String,

    pub locale_files: LocaleFilesConfig,
    pub exclude_patterns: Vec<String>,

    /// Leaf/namespace mismatch handling when applying patches.
    pub conflict_policy: ConflictPolicy,

    pub allow_identical: AllowIdenticalConfig,

    /// Spaces per indentation level when writing locale files.
    pub pretty_indent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleFilesConfig {
    pub file_pattern: String,
}

impl Default for LocaleFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/{locales,i18n,lang}/**/*.json".to_string() }
    }
}

/// Values that may stay identical to the source without counting as untranslated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllowIdenticalConfig {
    /// Exact source strings (e.g. "OK", "km").
    pub values: Vec<String>,
    /// Key paths joined with `keySeparator`.
    pub keys: Vec<String>,
}

/// Upper bound for `prettyIndent`.
const MAX_PRETTY_INDENT: usize = 8;

impl ReconcileSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Malformed allow-listed key
    /// - Indent out of range
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.source_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "sourceLanguage",
                "The source language cannot be empty. Example: \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.locale_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.locale_files.file_pattern) {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.locale_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if !self.key_separator.is_empty() {
            for (index, key) in self.allow_identical.keys.iter().enumerate() {
                if let Err(e) = crate::reconcile::expand::split_key(key, &self.key_separator) {
                    errors.push(ValidationError::new(
                        format!("allowIdentical.keys[{index}]"),
                        e.to_string(),
                    ));
                }
            }
        }

        if !(1..=MAX_PRETTY_INDENT).contains(&self.pretty_indent) {
            errors.push(ValidationError::new(
                "prettyIndent",
                format!(
                    "The indent must be between 1 and {MAX_PRETTY_INDENT}, got {}",
                    self.pretty_indent
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Allow-list built from `allowIdentical`.
    ///
    /// # Errors
    /// `ReconcileError::MalformedPath` for a malformed key (rejected by `validate`).
    pub fn allow_list(&self) -> Result<AllowList, ReconcileError> {
        let allow_list = self
            .allow_identical
            .values
            .iter()
            .fold(AllowList::new(), |list, value| list.with_value(value.as_str()));

        self.allow_identical
            .keys
            .iter()
            .try_fold(allow_list, |list, key| list.with_key(key, &self.key_separator))
    }
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            key_separator: ".".to_string(),
            locale_files: LocaleFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string()],
            conflict_policy: ConflictPolicy::default(),
            allow_identical: AllowIdenticalConfig::default(),
            pretty_indent: 2,
        }
    }
}
