mod app;
mod cli;
mod config;
mod error;
mod fetch;
mod link;
mod logging;
mod print;
mod renderer;

use std::io::{self, Write};

use clap::Parser;
use explorer_core::{filter, CatalogStore};

use crate::app::{Explorer, ExplorerFlags};
use crate::cli::{Cli, Command, ListArgs, ShowArgs};
use crate::config::ExplorerConfig;
use crate::error::{AppError, Result};
use crate::fetch::Fetcher;
use crate::logging::LogTarget;
use crate::renderer::PreviewRegistry;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::List(args)) => {
            logging::init(&LogTarget::Stderr)?;
            list(args)
        }
        Some(Command::Show(args)) => {
            logging::init(&LogTarget::Stderr)?;
            show(args)
        }
        None => {
            let config = ExplorerConfig::from_args(cli.tui);
            logging::init(&LogTarget::for_tui(config.log_file.as_deref()))?;
            interactive(config).await
        }
    }
}

fn list(args: ListArgs) -> Result<()> {
    let store = CatalogStore::seeded()?;
    let view = filter(store.catalog(), &args.query);
    let mut out = io::stdout().lock();
    print::write_list(&mut out, &view, args.hide_empty)?;
    out.flush()?;
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let store = CatalogStore::seeded()?;
    let entry = store
        .lookup(&args.name)
        .ok_or_else(|| AppError::NotFound(args.name.clone()))?;
    let mut out = io::stdout().lock();
    print::write_entry(&mut out, store.catalog(), entry)?;
    out.flush()?;
    Ok(())
}

async fn interactive(config: ExplorerConfig) -> Result<()> {
    let store = CatalogStore::seeded()?;
    let options = config.program_options();
    let flags = ExplorerFlags {
        store,
        registry: PreviewRegistry::builtin(),
        fetcher: Fetcher::new()?,
        config,
    };
    let explorer = explorer_runtime::run_with::<Explorer>(flags, options).await?;
    tracing::info!(query = explorer.query(), "explorer exited");
    Ok(())
}
