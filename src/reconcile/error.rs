use thiserror::Error;

use crate::types::NodeKind;

/// Errors raised by the reconciliation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A flat key with an empty segment (leading, trailing or doubled separator)
    #[error("Malformed key path '{key}': segment {segment} is empty")]
    MalformedPath { key: String, segment: usize },

    /// A patch value whose shape disagrees with the base at the same path
    #[error("Structural conflict at '{path}': {patch} in patch would replace {base}")]
    StructuralConflict { path: String, base: NodeKind, patch: NodeKind },
}
