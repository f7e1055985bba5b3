use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portals::app::AppContext;
use portals::cli::{commands, Cli, Commands};
use portals::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_tracing(command == Commands::Tui)?;

    match command {
        Commands::ConfigPath => {
            commands::print_config_path()?;
        }
        Commands::Catalog { json } => {
            let ctx = AppContext::new(Config::load()?, cli.seed);
            commands::print_catalog(&ctx, json).await?;
        }
        Commands::Tui => {
            let ctx = AppContext::new(Config::load()?, cli.seed);
            portals::tui::run(Arc::new(ctx), !cli.no_splash).await?;
        }
    }

    Ok(())
}

/// The TUI owns the screen, so it logs to a file under the cache directory.
/// Everything else logs to stderr.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let dir = dirs::cache_dir()
            .context("Could not determine cache directory")?
            .join("portals");
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join("portals.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
    Ok(())
}
