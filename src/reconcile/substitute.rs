//! Longest-match-first phrase substitution.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Deserializer,
};

/// Exact source phrase to translation lookup table.
///
/// Entries are kept sorted by descending phrase length (in characters), so a
/// specific phrase such as `"New Event"` is always tried before `"New"`.
/// Phrases of equal length are ordered lexically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseDictionary {
    entries: Vec<(String, String)>,
}

impl PhraseDictionary {
    /// Builds a dictionary. A repeated phrase keeps its last translation and
    /// empty phrases are dropped.
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let unique: IndexMap<String, String> = entries
            .into_iter()
            .map(|(phrase, translation)| (phrase.into(), translation.into()))
            .collect();

        let mut entries: Vec<(String, String)> =
            unique.into_iter().filter(|(phrase, _)| !phrase.is_empty()).collect();
        entries.sort_by(|(a, _), (b, _)| {
            b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
        });

        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translation of an exact phrase.
    #[must_use]
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.iter().find(|(p, _)| p == phrase).map(|(_, t)| t.as_str())
    }

    /// Entries in match order (longest phrase first).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(phrase, translation)| (phrase.as_str(), translation.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PhraseDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'de> Deserialize<'de> for PhraseDictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = IndexMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::new(entries))
    }
}

/// Rewrite `text` by replacing every literal occurrence of each dictionary
/// phrase, longest phrase first.
///
/// Each replacement works on the output of the previous one. Matching is by
/// substring, not by word: keep dictionaries to whole UI strings, otherwise a
/// short entry like `"No"` also rewrites the inside of `"Notification"`.
///
/// # Examples
/// ```
/// use locale_reconcile::{PhraseDictionary, translate_text};
///
/// let dictionary = PhraseDictionary::new([("New", "Nouveau"), ("New Event", "Nouvel événement")]);
/// assert_eq!(translate_text("New Event", &dictionary), "Nouvel événement");
/// ```
#[must_use]
pub fn translate_text(text: &str, dictionary: &PhraseDictionary) -> String {
    let mut result = text.to_string();
    for (phrase, translation) in dictionary.iter() {
        if result.contains(phrase) {
            result = result.replace(phrase, translation);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn translate_exact_phrase() {
        let dictionary = PhraseDictionary::new([("OK", "D'accord")]);

        assert_that!(translate_text("OK", &dictionary), eq("D'accord"));
    }

    #[rstest]
    fn translate_prefers_longest_phrase() {
        let dictionary =
            PhraseDictionary::new([("New", "Nouveau"), ("New Event", "Nouvel Événement")]);

        assert_that!(translate_text("New Event", &dictionary), eq("Nouvel Événement"));
    }

    #[rstest]
    fn translate_longest_first_regardless_of_insertion_order() {
        let dictionary =
            PhraseDictionary::new([("New Event", "Nouvel Événement"), ("New", "Nouveau")]);

        assert_that!(
            translate_text("New Event / New", &dictionary),
            eq("Nouvel Événement / Nouveau")
        );
    }

    #[rstest]
    fn translate_replaces_every_occurrence() {
        let dictionary = PhraseDictionary::new([("Save", "Enregistrer")]);

        assert_that!(translate_text("Save or Save As", &dictionary), eq("Enregistrer or Enregistrer As"));
    }

    #[rstest]
    fn translate_without_match_returns_input() {
        let dictionary = PhraseDictionary::new([("Cancel", "Annuler")]);

        assert_that!(translate_text("Delete {{count}} items", &dictionary), eq("Delete {{count}} items"));
    }

    #[rstest]
    fn translate_keeps_placeholders() {
        let dictionary = PhraseDictionary::new([("Hello", "Bonjour")]);

        assert_that!(translate_text("Hello, {{name}}!", &dictionary), eq("Bonjour, {{name}}!"));
    }

    #[rstest]
    fn translate_matches_inside_words() {
        let dictionary = PhraseDictionary::new([("No", "Non")]);

        assert_that!(translate_text("Notification", &dictionary), eq("Nontification"));
    }

    #[rstest]
    fn dictionary_orders_by_character_length() {
        let dictionary = PhraseDictionary::new([("ab", "1"), ("ééé", "2"), ("abcd", "3"), ("zz", "4")]);

        let phrases: Vec<&str> = dictionary.iter().map(|(phrase, _)| phrase).collect();

        assert_that!(phrases, elements_are![eq(&"abcd"), eq(&"ééé"), eq(&"ab"), eq(&"zz")]);
    }

    #[rstest]
    fn dictionary_drops_empty_phrase_and_keeps_last_duplicate() {
        let dictionary = PhraseDictionary::new([("", "x"), ("Yes", "Oui"), ("Yes", "Ouais")]);

        assert_that!(dictionary.len(), eq(1));
        assert_that!(dictionary.get("Yes"), some(eq("Ouais")));
        assert_that!(translate_text("Yes", &dictionary), eq("Ouais"));
    }

    #[rstest]
    fn dictionary_deserializes_from_json_object() {
        let dictionary: PhraseDictionary =
            serde_json::from_str(r#"{ "Back": "Retour", "Go Back": "Revenir" }"#).unwrap_or_default();

        assert_that!(dictionary.len(), eq(2));
        assert_that!(translate_text("Go Back", &dictionary), eq("Revenir"));
    }
}
