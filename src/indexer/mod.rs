//! Locale file discovery in a workspace.

pub mod types;
pub mod workspace;

pub use types::WorkspaceError;
pub use workspace::{
    LocaleCatalog,
    LocalePair,
    find_locale_files,
};
