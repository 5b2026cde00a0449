//! Entry point for the `locale-reconcile` command.

mod cli;

fn main() -> anyhow::Result<()> {
    cli::run_cli()
}
