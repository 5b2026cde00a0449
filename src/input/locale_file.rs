//! Locale file input definitions

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::reconcile::{
    PhraseDictionary,
    ReconcileError,
    expand_with_separator,
};
use crate::tree::{
    LocaleTree,
    TreeError,
};

/// Errors raised while reading or writing locale files.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to access '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse JSON in '{}': {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("Invalid locale tree in '{}': {source}", path.display())]
    Tree { path: PathBuf, source: TreeError },

    #[error("Invalid flat key in '{}': {source}", path.display())]
    Expand { path: PathBuf, source: ReconcileError },
}

/// A locale tree together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    /// Detected language code (e.g. "en", "pt-BR"), or "unknown".
    pub language: String,
    /// `settings` for both `fr/settings.json` and `settings/fr.json`.
    pub namespace: Option<String>,
    pub path: PathBuf,
    pub tree: LocaleTree,
}

impl LocaleFile {
    /// Whether this file belongs to `language`, ignoring case and `-`/`_`.
    #[must_use]
    pub fn is_language(&self, language: &str) -> bool {
        languages_match(&self.language, language)
    }

    /// Path of the same file in another language.
    ///
    /// The path component that carries the language (file stem or parent
    /// directory) is swapped for `language`:
    /// - `locales/en.json` -> `locales/{language}.json`
    /// - `locales/en/settings.json` -> `locales/{language}/settings.json`
    /// - `locales/settings/en.json` -> `locales/settings/{language}.json`
    ///
    /// `None` when neither component matches the detected language.
    #[must_use]
    pub fn counterpart_path(&self, language: &str) -> Option<PathBuf> {
        let stem = self.path.file_stem()?.to_string_lossy();
        if self.is_language(&stem) {
            let file_name = match self.path.extension() {
                Some(extension) => format!("{language}.{}", extension.to_string_lossy()),
                None => language.to_string(),
            };
            return Some(self.path.with_file_name(file_name));
        }

        let parent = self.path.parent()?;
        if self.is_language(&parent.file_name()?.to_string_lossy()) {
            return Some(parent.parent()?.join(language).join(self.path.file_name()?));
        }
        None
    }
}

/// Compare two language codes, ignoring case and `-`/`_`.
#[must_use]
pub fn languages_match(a: &str, b: &str) -> bool {
    normalize_language_code(a) == normalize_language_code(b)
}

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// ISO 639-1 の言語コードと、2 文字コードを持たない主要な ISO 639-3 コード
static PRIMARY_LANGUAGE_SUBTAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
        "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
        "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
        "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
        "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
        "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
        "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
        "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
        "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
        "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
        "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
        "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
        "yo", "za", "zh", "zu",
        // ISO 639-3
        "ast", "ceb", "fil", "gsw", "haw", "kok", "nso", "syr", "yue",
    ]
    .into_iter()
    .collect()
});

/// Directory names that hold locale files without being a namespace.
const LOCALE_ROOT_DIRS: &[&str] =
    &["locales", "locale", "messages", "translations", "i18n", "lang", "langs"];

/// Checks for a BCP 47 style tag with a known primary language:
/// `en`, `pt-BR`, `zh_Hant_TW`, `es-419`, `fil-PH`.
fn is_language_tag(candidate: &str) -> bool {
    let normalized = normalize_language_code(candidate);
    let mut subtags = normalized.split('_');

    let Some(primary) = subtags.next() else {
        return false;
    };
    if !PRIMARY_LANGUAGE_SUBTAGS.contains(primary) {
        return false;
    }

    let rest: Vec<&str> = subtags.collect();
    rest.len() <= 2
        && rest.iter().all(|subtag| {
            let alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let digits = subtag.chars().all(|c| c.is_ascii_digit());
            (alpha && (subtag.len() == 2 || subtag.len() == 4)) || (digits && subtag.len() == 3)
        })
}

/// Detect language from file path
///
/// The file stem wins, then the parent directory name.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `locales/pt-BR.json` → `pt-BR`
/// - `locales/fr/settings.json` → `fr`
/// - `locales/settings/fr.json` → `fr`
///
/// # Returns
/// Detected language code or "unknown"
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> String {
    let stem = file_path.file_stem().map(|s| s.to_string_lossy().to_string());
    let parent =
        file_path.parent().and_then(Path::file_name).map(|s| s.to_string_lossy().to_string());

    [stem, parent]
        .into_iter()
        .flatten()
        .find(|part| is_language_tag(part))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Detect namespace from file path.
///
/// The file stem is the namespace unless it is a language code. Then the
/// parent directory is, unless it is a language code or a locale root such
/// as `locales`.
///
/// # Examples
/// - `locales/fr/settings.json` -> Some("settings")
/// - `locales/settings/fr.json` -> Some("settings")
/// - `locales/fr.json` -> None
fn detect_namespace_from_path(file_path: &Path) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy().to_string();
    if !is_language_tag(&file_stem) {
        return Some(file_stem);
    }

    let parent_name = file_path.parent()?.file_name()?.to_string_lossy().to_string();
    let is_locale_root = LOCALE_ROOT_DIRS.contains(&parent_name.to_lowercase().as_str());
    if is_language_tag(&parent_name) || is_locale_root { None } else { Some(parent_name) }
}

fn read_json(path: &Path) -> Result<Value, InputError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content)
        .map_err(|source| InputError::Json { path: path.to_path_buf(), source })
}

/// Load a locale file and detect its language and namespace.
///
/// # Errors
/// Returns error if file read, JSON parse or tree conversion fails.
pub fn load_locale_file(path: &Path) -> Result<LocaleFile, InputError> {
    let json = read_json(path)?;
    let tree = LocaleTree::from_document(json)
        .map_err(|source| InputError::Tree { path: path.to_path_buf(), source })?;

    let language = detect_language_from_path(path);
    let namespace = detect_namespace_from_path(path);
    tracing::debug!(
        path = %path.display(),
        %language,
        ?namespace,
        leaves = tree.leaf_count(),
        "Loaded locale file"
    );

    Ok(LocaleFile { language, namespace, path: path.to_path_buf(), tree })
}

/// Load a translation patch.
///
/// A document whose top-level values are all strings is read as a flat table
/// of `separator`-joined keys and expanded. Anything else is read as a nested
/// tree, where keys are taken literally.
///
/// # Errors
/// Returns error if file read, JSON parse, tree conversion or expansion fails.
pub fn load_patch_file(path: &Path, separator: &str) -> Result<LocaleTree, InputError> {
    let json = read_json(path)?;

    if let Value::Object(map) = &json
        && map.values().all(Value::is_string)
    {
        let flat = map.iter().filter_map(|(key, value)| Some((key.as_str(), value.as_str()?)));
        return expand_with_separator(flat, separator)
            .map_err(|source| InputError::Expand { path: path.to_path_buf(), source });
    }

    LocaleTree::from_document(json)
        .map_err(|source| InputError::Tree { path: path.to_path_buf(), source })
}

/// Load a phrase dictionary from a flat JSON object of phrase → translation.
///
/// # Errors
/// Returns error if file read fails or the file is not an object of strings.
pub fn load_dictionary_file(path: &Path) -> Result<PhraseDictionary, InputError> {
    let json = read_json(path)?;
    serde_json::from_value(json)
        .map_err(|source| InputError::Json { path: path.to_path_buf(), source })
}

/// Render a tree as pretty-printed JSON with `indent` spaces and a trailing newline.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_locale_tree(tree: &LocaleTree, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    tree.serialize(&mut serializer)?;

    let mut rendered = String::from_utf8_lossy(&buffer).into_owned();
    rendered.push('\n');
    Ok(rendered)
}

/// Write a tree back to disk, pretty-printed.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub fn save_locale_file(path: &Path, tree: &LocaleTree, indent: usize) -> Result<(), InputError> {
    let rendered = render_locale_tree(tree, indent)
        .map_err(|source| InputError::Json { path: path.to_path_buf(), source })?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|source| InputError::Io { path: parent.to_path_buf(), source })?;
    }
    std::fs::write(path, rendered)
        .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), "Saved locale file");
    Ok(())
}
