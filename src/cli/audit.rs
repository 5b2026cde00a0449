//! `audit` コマンド

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use locale_reconcile::config::ReconcileSettings;
use locale_reconcile::indexer::LocaleCatalog;
use locale_reconcile::input::languages_match;
use locale_reconcile::reconcile::find_untranslated_with;
use locale_reconcile::tree::LocaleTree;

use super::relative_display;

#[derive(Debug, Args)]
pub(crate) struct AuditArgs {
    /// Target language (defaults to every language except the source)
    #[arg(short, long)]
    pub(crate) lang: Option<String>,

    /// List every untranslated key with its reason
    #[arg(long)]
    pub(crate) list: bool,
}

pub(crate) fn handle_audit(
    args: &AuditArgs,
    settings: &ReconcileSettings,
    workspace_root: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = LocaleCatalog::load(workspace_root, settings)?;
    let allow_list = settings.allow_list()?;

    let languages: Vec<String> = match &args.lang {
        Some(lang) => vec![lang.clone()],
        None => catalog
            .languages()
            .into_iter()
            .filter(|lang| !languages_match(lang, &settings.source_language))
            .map(str::to_string)
            .collect(),
    };
    if languages.is_empty() {
        tracing::warn!("No target language found besides '{}'", settings.source_language);
    }

    let empty = LocaleTree::new();
    for language in &languages {
        let reports: Vec<_> = catalog
            .pairs(&settings.source_language, language)?
            .into_iter()
            .map(|pair| {
                let target = pair.target.map_or(&empty, |file| &file.tree);
                let entries = find_untranslated_with(&pair.source.tree, target, &allow_list);
                (pair.source, entries)
            })
            .collect();

        let untranslated: usize = reports.iter().map(|(_, entries)| entries.len()).sum();
        let leaves: usize = reports.iter().map(|(source, _)| source.tree.leaf_count()).sum();
        writeln!(out, "{language}: {untranslated} untranslated of {leaves}")?;

        for (source, entries) in &reports {
            writeln!(
                out,
                "  {}: {} of {}",
                relative_display(&source.path, workspace_root),
                entries.len(),
                source.tree.leaf_count()
            )?;
            if args.list {
                for entry in entries {
                    writeln!(
                        out,
                        "    {} ({})",
                        entry.dotted_path(&settings.key_separator),
                        entry.reason
                    )?;
                }
            }
        }
    }

    Ok(())
}
