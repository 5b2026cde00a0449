//! `apply` コマンド

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
    bail,
};
use clap::{
    ArgGroup,
    Args,
};
use locale_reconcile::config::ReconcileSettings;
use locale_reconcile::indexer::LocaleCatalog;
use locale_reconcile::input::{
    languages_match,
    load_dictionary_file,
    load_patch_file,
    save_locale_file,
};
use locale_reconcile::reconcile::{
    ApplyOptions,
    Delta,
    apply_with,
};
use locale_reconcile::tree::LocaleTree;
use locale_reconcile::types::ConflictPolicy;

use super::relative_display;

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("delta").required(true).args(["patch", "dictionary"])))]
pub(crate) struct ApplyArgs {
    /// Target language
    #[arg(short, long)]
    pub(crate) lang: String,

    /// Translation patch, nested or with flat dotted keys
    #[arg(long)]
    pub(crate) patch: Option<PathBuf>,

    /// Phrase dictionary applied to every untranslated key
    #[arg(long)]
    pub(crate) dictionary: Option<PathBuf>,

    /// Namespace (file stem, e.g. `settings`) to apply to
    #[arg(short, long)]
    pub(crate) namespace: Option<String>,

    /// Fail on leaf/namespace conflicts instead of replacing
    #[arg(long)]
    pub(crate) strict: bool,

    /// Report the outcome without writing files
    #[arg(long)]
    pub(crate) dry_run: bool,
}

impl ApplyArgs {
    fn load_delta(&self, separator: &str) -> Result<Delta> {
        match (&self.patch, &self.dictionary) {
            (Some(path), None) => Ok(Delta::Patch(load_patch_file(path, separator)?)),
            (None, Some(path)) => Ok(Delta::Dictionary(load_dictionary_file(path)?)),
            _ => bail!("Exactly one of --patch or --dictionary is required"),
        }
    }

    /// `--strict` の上書き
    pub(crate) fn conflict_policy(&self) -> Option<ConflictPolicy> {
        self.strict.then_some(ConflictPolicy::Strict)
    }
}

pub(crate) fn handle_apply(
    args: &ApplyArgs,
    settings: &ReconcileSettings,
    workspace_root: &Path,
    out: &mut impl Write,
) -> Result<()> {
    if languages_match(&args.lang, &settings.source_language) {
        bail!("The target language must differ from the source language '{}'", args.lang);
    }

    let catalog = LocaleCatalog::load(workspace_root, settings)?;
    let delta = args.load_delta(&settings.key_separator)?;
    let options =
        ApplyOptions { policy: settings.conflict_policy, allow_list: settings.allow_list()? };

    // パッチは 1 ファイル分、辞書は全ファイルに適用
    let select_all = args.namespace.is_none() && matches!(delta, Delta::Dictionary(_));
    let pairs: Vec<_> = catalog
        .pairs(&settings.source_language, &args.lang)?
        .into_iter()
        .filter(|pair| select_all || pair.source.namespace == args.namespace)
        .collect();
    match pairs.as_slice() {
        [] => bail!(
            "No '{}' locale file found for namespace {}",
            settings.source_language,
            args.namespace.as_deref().unwrap_or("(none)")
        ),
        [_, _, ..] if matches!(delta, Delta::Patch(_)) => bail!(
            "The patch matches several '{}' locale files: {}",
            settings.source_language,
            pairs
                .iter()
                .map(|pair| relative_display(&pair.source.path, workspace_root))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        _ => {}
    }

    let empty = LocaleTree::new();
    for pair in pairs {
        let target_path = match pair.target {
            Some(file) => file.path.clone(),
            None => pair.source.counterpart_path(&args.lang).with_context(|| {
                format!("Cannot derive a '{}' path from {}", args.lang, pair.source.path.display())
            })?,
        };
        let target = pair.target.map_or(&empty, |file| &file.tree);

        let outcome = apply_with(&pair.source.tree, target, &delta, &options)
            .with_context(|| format!("Failed to apply to {}", target_path.display()))?;

        writeln!(
            out,
            "{}: {} untranslated, {} translated, {} remaining",
            relative_display(&target_path, workspace_root),
            outcome.untranslated_before,
            outcome.translated_count,
            outcome.remaining_untranslated
        )?;

        if args.dry_run {
            continue;
        }
        if pair.target.is_some_and(|file| file.tree == outcome.updated_tree) {
            tracing::debug!(path = %target_path.display(), "Unchanged, not writing");
            continue;
        }
        save_locale_file(&target_path, &outcome.updated_tree, settings.pretty_indent)?;
        tracing::info!(path = %target_path.display(), "Updated locale file");
    }

    Ok(())
}
