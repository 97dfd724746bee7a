use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cyclewatch_core::{Error, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Terminal input the display loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
}

impl InputEvent {
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(Self::Key(key)),
            Event::Mouse(mouse) => Some(Self::Mouse(mouse)),
            Event::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Owns raw mode for the session.
///
/// Raw mode, the alternate screen and mouse capture are acquired in `new`
/// and released on drop, which also runs while unwinding from a panic.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<io::Stderr>>,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| Error::terminal("enable raw mode", e))?;
        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(Error::terminal("enter alternate screen", e));
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = or_restore(Terminal::new(backend), "create terminal")?;
        or_restore(terminal.hide_cursor(), "hide cursor")?;

        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<io::Stderr>> {
        &mut self.terminal
    }

    /// Read one pending event without waiting
    pub fn poll_event(&self) -> Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO).map_err(|e| Error::terminal("poll input", e))? {
            return Ok(None);
        }
        let event = event::read().map_err(|e| Error::terminal("read input", e))?;
        Ok(InputEvent::from_crossterm(event))
    }

    /// Restore the terminal before the default panic hook prints, so the
    /// report is readable
    pub fn install_panic_hook() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));
    }
}

/// Setup steps after raw mode is on run before the guard exists, so a
/// failure has to undo the terminal changes itself
fn or_restore<T>(result: io::Result<T>, operation: &str) -> Result<T> {
    result.map_err(|e| {
        restore();
        Error::terminal(operation, e)
    })
}

/// Leave raw mode and the alternate screen, ignoring errors
fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

    #[test]
    fn test_setup_failure_reports_operation() {
        let failed: io::Result<()> = Err(io::Error::other("no tty"));
        match or_restore(failed, "hide cursor") {
            Err(Error::Terminal { operation, .. }) => assert_eq!(operation, "hide cursor"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(or_restore(Ok(7), "hide cursor").unwrap(), 7);
    }

    #[test]
    fn test_event_conversion() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(
            InputEvent::from_crossterm(Event::Key(key)),
            Some(InputEvent::Key(key))
        );
        assert_eq!(
            InputEvent::from_crossterm(Event::Resize(80, 24)),
            Some(InputEvent::Resize)
        );
        assert_eq!(InputEvent::from_crossterm(Event::FocusGained), None);

        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            InputEvent::from_crossterm(Event::Mouse(mouse)),
            Some(InputEvent::Mouse(mouse))
        );
    }
}
