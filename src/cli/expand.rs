//! `expand` コマンド

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use locale_reconcile::config::ReconcileSettings;
use locale_reconcile::input::{
    load_patch_file,
    render_locale_tree,
};

#[derive(Debug, Args)]
pub(crate) struct ExpandArgs {
    /// JSON file with flat dotted keys
    pub(crate) file: PathBuf,
}

pub(crate) fn handle_expand(
    args: &ExpandArgs,
    settings: &ReconcileSettings,
    out: &mut impl Write,
) -> Result<()> {
    let tree = load_patch_file(&args.file, &settings.key_separator)?;
    out.write_all(render_locale_tree(&tree, settings.pretty_indent)?.as_bytes())?;
    Ok(())
}
