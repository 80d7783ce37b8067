use anyhow::{Context, Result};
use clap::Parser;

use realmdeck::model::BackendConfig;
use realmdeck::store::ConsoleStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "realmdeck")]
#[command(about = "Operator console for the game-master assistant stack", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand: the interactive console.
        None => realmdeck::tui::run()?,
        Some(command) => crate::cli_exec::handle_command(command)?,
    }

    Ok(())
}

pub(crate) fn require_store() -> Result<ConsoleStore> {
    let cwd = std::env::current_dir().context("get current dir")?;
    ConsoleStore::discover(&cwd)
}

pub(crate) fn require_backend(store: &ConsoleStore) -> Result<BackendConfig> {
    let cfg = store.read_config()?;
    cfg.backend
        .context("no backend configured (run `realmdeck connect --url ...`)")
}
