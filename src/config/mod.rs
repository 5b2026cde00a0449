//! Workspace configuration (`.locale-reconcile.json`).
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::{
    CONFIG_FILE_NAME,
    ConfigManager,
    SettingsOverrides,
};
pub use types::{
    AllowIdenticalConfig,
    ConfigError,
    LocaleFilesConfig,
    ReconcileSettings,
    ValidationError,
};
