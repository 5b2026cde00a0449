//! Workspace scan for locale files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::config::ReconcileSettings;
use crate::indexer::types::WorkspaceError;
use crate::input::{
    LocaleFile,
    load_locale_file,
};

/// A source-language file and the target-language file at the same place in the layout.
#[derive(Debug, Clone, Copy)]
pub struct LocalePair<'a> {
    pub source: &'a LocaleFile,
    /// `None` when the target language has no file there yet.
    pub target: Option<&'a LocaleFile>,
}

/// Every locale file found in a workspace.
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    files: Vec<LocaleFile>,
}

impl LocaleCatalog {
    #[must_use]
    pub const fn new(files: Vec<LocaleFile>) -> Self {
        Self { files }
    }

    /// ワークスペースのロケールファイルを読み込む
    ///
    /// Files that fail to parse or whose language cannot be detected are
    /// skipped with a warning.
    ///
    /// # Errors
    /// - Invalid glob pattern
    /// - No file for the source language
    pub fn load(workspace_root: &Path, settings: &ReconcileSettings) -> Result<Self, WorkspaceError> {
        tracing::debug!(workspace_root = %workspace_root.display(), "Loading locale catalog");

        let paths = find_locale_files(
            workspace_root,
            &settings.locale_files.file_pattern,
            &settings.exclude_patterns,
        )?;

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let file = match load_locale_file(&path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!("Skipping locale file: {}", e);
                    continue;
                }
            };
            if file.language == "unknown" {
                tracing::warn!("Skipping {:?}: language could not be detected", path);
                continue;
            }
            files.push(file);
        }

        let catalog = Self::new(files);
        if catalog.files_for(&settings.source_language).is_empty() {
            return Err(WorkspaceError::SourceNotFound(settings.source_language.clone()));
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn files(&self) -> &[LocaleFile] {
        &self.files
    }

    /// Detected languages, sorted, without duplicates.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.files.iter().map(|f| f.language.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    #[must_use]
    pub fn files_for(&self, language: &str) -> Vec<&LocaleFile> {
        self.files.iter().filter(|f| f.is_language(language)).collect()
    }

    /// Pairs each source file with the target file in the same place of the
    /// layout: `en.json` with `fr.json`, `en/ui.json` with `fr/ui.json`,
    /// `ui/en.json` with `ui/fr.json`.
    ///
    /// # Errors
    /// `WorkspaceError::AmbiguousTarget` when several target files fit one
    /// source file (e.g. both `fr-CA.json` and `fr_CA.json`).
    pub fn pairs(
        &self,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<LocalePair<'_>>, WorkspaceError> {
        let targets = self.files_for(target_language);

        self.files_for(source_language)
            .into_iter()
            .map(|source| {
                let candidates: Vec<&LocaleFile> = targets
                    .iter()
                    .copied()
                    .filter(|target| is_counterpart(source, target))
                    .collect();

                match candidates.as_slice() {
                    [] => Ok(LocalePair { source, target: None }),
                    [target] => Ok(LocalePair { source, target: Some(*target) }),
                    _ => Err(WorkspaceError::AmbiguousTarget {
                        source_path: source.path.clone(),
                        candidates: candidates.iter().map(|file| file.path.clone()).collect(),
                    }),
                }
            })
            .collect()
    }
}

/// `target` sits where `source` would be if it were written in `target`'s language.
fn is_counterpart(source: &LocaleFile, target: &LocaleFile) -> bool {
    source.namespace == target.namespace
        && source.counterpart_path(&target.language).as_deref() == Some(target.path.as_path())
}

fn build_glob_set(patterns: &[String], kind: &str) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            WorkspaceError::InvalidPattern(format!("Invalid {kind} pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| WorkspaceError::InvalidPattern(format!("Failed to build {kind} patterns: {e}")))
}

/// ロケールファイルを検索
///
/// Paths are matched relative to `workspace_root` and returned sorted.
///
/// # Errors
/// Invalid include or exclude pattern.
pub fn find_locale_files(
    workspace_root: &Path,
    file_pattern: &str,
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>, WorkspaceError> {
    let include_set = build_glob_set(&[file_pattern.to_string()], "locale file")?;
    let exclude_set = build_glob_set(exclude_patterns, "exclude")?;

    let mut found_files = Vec::new();

    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(workspace_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();

        // workspace からの相対パスを取得
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(count = found_files.len(), "Found locale files");
    Ok(found_files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "app/locales/en.json", r#"{ "hello": "Hello" }"#);
        write(root, "app/locales/fr.json", r#"{ "hello": "Bonjour" }"#);
        write(root, "app/locales/de.json", "not json");
        write(root, "app/i18n/en/settings.json", r#"{ "title": "Settings" }"#);
        write(root, "app/i18n/fr/settings.json", r#"{ "title": "Réglages" }"#);
        write(root, "app/i18n/ja/settings.json", r#"{ "title": "設定" }"#);
        write(root, "node_modules/pkg/locales/en.json", r#"{ "x": "y" }"#);
        write(root, "app/src/config.json", "{}");
        temp_dir
    }

    #[rstest]
    fn find_locale_files_applies_include_and_exclude() {
        let temp_dir = workspace();
        let settings = ReconcileSettings::default();

        let files = find_locale_files(
            temp_dir.path(),
            &settings.locale_files.file_pattern,
            &settings.exclude_patterns,
        )
        .unwrap();

        let relative: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            relative,
            vec![
                "app/i18n/en/settings.json",
                "app/i18n/fr/settings.json",
                "app/i18n/ja/settings.json",
                "app/locales/de.json",
                "app/locales/en.json",
                "app/locales/fr.json",
            ]
        );
    }

    #[rstest]
    fn find_locale_files_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();

        let result = find_locale_files(temp_dir.path(), "**/{locales", &[]);

        assert!(matches!(result, Err(WorkspaceError::InvalidPattern(_))));
    }

    #[googletest::test]
    fn catalog_skips_unparseable_files() {
        let temp_dir = workspace();

        let catalog = LocaleCatalog::load(temp_dir.path(), &ReconcileSettings::default()).unwrap();

        expect_that!(catalog.files().len(), eq(5));
        expect_that!(catalog.languages(), elements_are![eq(&"en"), eq(&"fr"), eq(&"ja")]);
    }

    #[googletest::test]
    fn catalog_pairs_by_namespace() {
        let temp_dir = workspace();
        let catalog = LocaleCatalog::load(temp_dir.path(), &ReconcileSettings::default()).unwrap();

        let pairs = catalog.pairs("en", "ja").unwrap();

        expect_that!(pairs.len(), eq(2));
        let settings_pair = pairs.iter().find(|p| p.source.namespace.as_deref() == Some("settings"));
        expect_that!(
            settings_pair.and_then(|p| p.target).map(|t| t.path.ends_with("app/i18n/ja/settings.json")),
            some(eq(true))
        );
        let root_pair = pairs.iter().find(|p| p.source.namespace.is_none());
        expect_that!(root_pair.map(|p| p.target.is_none()), some(eq(true)));
    }

    #[googletest::test]
    fn catalog_pairs_namespace_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/common/en.json", r#"{ "ok": "OK" }"#);
        write(root, "locales/common/fr.json", r#"{ "ok": "D'accord" }"#);
        write(root, "locales/menu/en.json", r#"{ "file": "File" }"#);
        write(root, "locales/menu/fr.json", r#"{ "file": "Fichier" }"#);
        write(root, "locales/en/ui.json", r#"{ "close": "Close" }"#);
        let catalog = LocaleCatalog::load(root, &ReconcileSettings::default()).unwrap();

        let pairs = catalog.pairs("en", "fr").unwrap();

        let summary: Vec<(Option<&str>, Option<&Path>)> = pairs
            .iter()
            .map(|p| {
                (p.source.namespace.as_deref(), p.target.map(|t| t.path.strip_prefix(root).unwrap()))
            })
            .collect();
        expect_that!(
            summary,
            unordered_elements_are![
                eq(&(Some("common"), Some(Path::new("locales/common/fr.json")))),
                eq(&(Some("menu"), Some(Path::new("locales/menu/fr.json")))),
                eq(&(Some("ui"), None)),
            ]
        );
    }

    #[rstest]
    fn catalog_rejects_ambiguous_target() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/en.json", r#"{ "ok": "OK" }"#);
        write(root, "locales/fr-CA.json", r#"{ "ok": "Correct" }"#);
        write(root, "locales/fr_CA.json", r#"{ "ok": "D'accord" }"#);
        let catalog = LocaleCatalog::load(root, &ReconcileSettings::default()).unwrap();

        let result = catalog.pairs("en", "fr-CA");

        assert!(matches!(
            result,
            Err(WorkspaceError::AmbiguousTarget { candidates, .. }) if candidates.len() == 2
        ));
    }

    #[rstest]
    fn catalog_requires_source_language() {
        let temp_dir = workspace();
        let settings =
            ReconcileSettings { source_language: "ko".to_string(), ..ReconcileSettings::default() };

        let result = LocaleCatalog::load(temp_dir.path(), &settings);

        assert!(matches!(result, Err(WorkspaceError::SourceNotFound(lang)) if lang == "ko"));
    }
}
