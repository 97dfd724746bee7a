use super::editor::LineEditor;
use super::input::InputHandler;
use super::render::{body_height, Renderer};
use crate::state::{ScrollState, SharedState};
use crate::terminal::{InputEvent, TerminalManager};
use cyclewatch_core::{CommandSet, Error, Result};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Who currently owns keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingInterval(LineEditor),
}

/// Whether the display loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The display loop and the state only it writes
pub struct App {
    pub(super) state: Arc<SharedState>,
    pub(super) commands: Arc<CommandSet>,
    pub(super) scroll: ScrollState,
    pub(super) mode: InputMode,
    pub(super) cycle_interval: f64,
    pub(super) viewport_height: usize,
    pub(super) tick: Duration,
}

impl App {
    pub fn new(
        state: Arc<SharedState>,
        commands: Arc<CommandSet>,
        cycle_interval: f64,
        tick: Duration,
    ) -> Self {
        let scroll = ScrollState::new(commands.len());
        Self {
            state,
            commands,
            scroll,
            mode: InputMode::Normal,
            cycle_interval,
            viewport_height: 0,
            tick,
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Rows available for command output at the last size query
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// One display loop iteration: apply at most one input event, then
    /// redraw if anything owes a redraw
    pub fn step<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event: Option<InputEvent>,
    ) -> Result<Flow> {
        let size = terminal
            .size()
            .map_err(|e| Error::terminal("query size", e))?;
        self.viewport_height = body_height(size.height);

        if let Some(event) = event {
            if self.handle_event(event) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        if self.state.take_dirty() {
            self.render(terminal)?;
        }
        Ok(Flow::Continue)
    }

    /// Poll, handle, redraw, sleep; until interrupted
    pub async fn run(
        &mut self,
        terminal: &mut TerminalManager,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        info!(commands = self.commands.len(), "display loop started");
        self.state.mark_dirty();

        loop {
            if *shutdown.borrow_and_update() {
                info!("interrupt received");
                break;
            }

            let event = terminal.poll_event()?;
            if self.step(terminal.terminal(), event)? == Flow::Quit {
                info!("interrupt key pressed");
                break;
            }

            tokio::time::sleep(self.tick).await;
        }

        info!("display loop stopped");
        Ok(())
    }
}
