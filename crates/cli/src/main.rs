use clap::Parser;
use cyclewatch_core::CYCLEWATCH_LOG_FILE_VAR;
use cyclewatch_tui::{run_session, SystemCommandRunner, TerminalManager};
use std::env;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{info, warn};

mod args;

use args::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let log_file = env::var_os(CYCLEWATCH_LOG_FILE_VAR).map(PathBuf::from);
    cyclewatch_utils::logging::init(log_file.as_deref())
        .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    // Malformed commands are fatal before the terminal is touched
    let config = cli.into_config()?;
    info!(commands = config.commands.len(), "configuration loaded");

    TerminalManager::install_panic_hook();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(true);
            }
            Err(e) => warn!("failed to listen for interrupt: {e}"),
        }
    });

    run_session(config, SystemCommandRunner::new(), shutdown_rx).await?;
    Ok(())
}
