//! コマンドラインインターフェース

mod apply;
mod audit;
mod expand;

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use locale_reconcile::config::{
    ConfigManager,
    SettingsOverrides,
};
use tracing_subscriber::EnvFilter;

use self::apply::{
    ApplyArgs,
    handle_apply,
};
use self::audit::{
    AuditArgs,
    handle_audit,
};
use self::expand::{
    ExpandArgs,
    handle_expand,
};

/// Find and fill untranslated keys in JSON locale files
#[derive(Debug, Parser)]
#[command(name = "locale-reconcile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub(crate) struct Cli {
    /// Workspace root directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub(crate) workspace_root: Option<PathBuf>,

    /// Source language, overriding `sourceLanguage` in the config file
    #[arg(short, long, global = true)]
    pub(crate) source_lang: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Report untranslated keys per target language
    Audit(AuditArgs),
    /// Apply a patch or a phrase dictionary to one target language
    Apply(ApplyArgs),
    /// Print the nested form of a flat dotted-key file
    Expand(ExpandArgs),
}

/// ワークスペースからの相対パスで表示する
fn relative_display(path: &Path, workspace_root: &Path) -> String {
    path.strip_prefix(workspace_root).unwrap_or(path).display().to_string()
}

/// ログ出力を初期化
///
/// `RUST_LOG` が設定されていればそれを優先する
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub(crate) fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace_root = match cli.workspace_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let mut config_manager = ConfigManager::load(&workspace_root)
        .with_context(|| format!("Failed to load settings from {}", workspace_root.display()))?;
    config_manager.apply_overrides(&SettingsOverrides {
        source_language: cli.source_lang,
        conflict_policy: match &cli.command {
            Commands::Apply(args) => args.conflict_policy(),
            _ => None,
        },
    })?;
    let settings = config_manager.settings();

    let mut out = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Audit(args) => handle_audit(args, settings, &workspace_root, &mut out),
        Commands::Apply(args) => handle_apply(args, settings, &workspace_root, &mut out),
        Commands::Expand(args) => handle_expand(args, settings, &mut out),
    };
    out.flush()?;
    result
}
