//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Error when a glob pattern cannot be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    /// No locale file exists for the configured source language
    #[error("No locale file found for source language '{0}'")]
    SourceNotFound(String),
    /// Several target files sit in the layout slot of one source file
    #[error("Ambiguous target for {source_path:?}: {candidates:?}")]
    AmbiguousTarget { source_path: PathBuf, candidates: Vec<PathBuf> },
}
