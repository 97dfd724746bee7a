//! Terminal engine for cyclewatch
//!
//! Three activities share one [`state::SharedState`]:
//! - the [`fetcher::OutputFetcher`] re-runs the active command on a timer
//! - the [`cycler::Cycler`] advances the active command while cycling is on
//! - the display loop in [`app::App`] polls input and redraws when dirty

pub mod app;
pub mod cycler;
pub mod fetcher;
pub mod runner;
pub mod state;
pub mod terminal;

// Main exports
pub use app::{App, Flow, InputHandler, Renderer};
pub use cycler::Cycler;
pub use fetcher::OutputFetcher;
pub use runner::{CommandRunner, RunOutput, SystemCommandRunner};
pub use state::{Output, OutputStore, ScrollState, SharedState};
pub use terminal::{InputEvent, TerminalManager};

use cyclewatch_core::{Config, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Run a full interactive session until `shutdown` fires or Ctrl-C is
/// pressed.
///
/// The terminal is restored before this returns, on every path. Background
/// activities are aborted rather than joined; a command still in flight is
/// killed with its task.
pub async fn run_session<R: CommandRunner>(
    config: Config,
    runner: R,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let settings = config.runtime_settings;
    let commands = Arc::new(config.commands);
    let state = Arc::new(SharedState::new(commands.len(), &settings));

    let mut terminal = TerminalManager::new()?;

    info!(
        commands = commands.len(),
        interval = settings.interval,
        cycle_interval = settings.cycle_interval,
        cycle = settings.cycle,
        "session started"
    );

    let fetcher = OutputFetcher::new(state.clone(), commands.clone(), runner).spawn();
    let cycler = Cycler::new(state.clone(), settings.cycle_interval).spawn();

    let mut app = App::new(state, commands, settings.cycle_interval, settings.tick);
    let result = app.run(&mut terminal, shutdown).await;

    drop(terminal);
    fetcher.abort();
    cycler.abort();

    info!("session ended");
    result
}
