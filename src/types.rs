//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Shape of a node in a locale tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Namespace,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("leaf"),
            Self::Namespace => f.write_str("namespace"),
        }
    }
}

/// How a leaf/namespace mismatch between a base tree and a patch is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictPolicy {
    /// The patch value replaces the base value, whatever its shape.
    #[default]
    Permissive,
    /// A shape mismatch is reported as an error and nothing is merged.
    Strict,
}

/// Why a source leaf counts as not yet localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UntranslatedReason {
    /// The target has no leaf at the path.
    Missing,
    /// The target leaf is string-equal to the source leaf.
    IdenticalToSource,
}

impl fmt::Display for UntranslatedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::IdenticalToSource => f.write_str("identical to source"),
        }
    }
}

/// A source leaf that the target language has not localized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedEntry {
    /// Keys from the root down to the leaf.
    pub path: Vec<String>,
    pub source_value: String,
    pub reason: UntranslatedReason,
}

impl UntranslatedEntry {
    /// Joins the path with `separator` (e.g. `settings.title`).
    #[must_use]
    pub fn dotted_path(&self, separator: &str) -> String {
        self.path.join(separator)
    }
}

impl fmt::Display for UntranslatedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.dotted_path("."), self.reason)
    }
}
