use super::core::{App, Flow, InputMode};
use super::editor::{EditOutcome, LineEditor};
use crate::terminal::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use cyclewatch_core::parse_interval;
use tracing::debug;

pub trait InputHandler {
    fn handle_event(&mut self, event: InputEvent) -> Flow;
}

impl InputHandler for App {
    fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return Flow::Continue;
                }
                if is_interrupt(&key) {
                    return Flow::Quit;
                }
                let consumed = if self.mode == InputMode::Normal {
                    self.handle_key(key)
                } else {
                    self.handle_edit_key(key);
                    true
                };
                if consumed {
                    self.state.mark_dirty();
                }
            }
            InputEvent::Mouse(mouse) if self.mode == InputMode::Normal => {
                let active = self.state.active_index();
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        self.scroll.scroll_up(active);
                        self.state.mark_dirty();
                    }
                    MouseEventKind::ScrollDown => {
                        self.scroll.scroll_down(active);
                        self.state.mark_dirty();
                    }
                    _ => {}
                }
            }
            InputEvent::Mouse(_) => {}
            InputEvent::Resize => self.state.mark_dirty(),
        }
        Flow::Continue
    }
}

impl App {
    /// Map a key to its action; returns false when the key means nothing
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let active = self.state.active_index();
        let page = self.viewport_height.max(1);

        match key.code {
            KeyCode::Home => self.scroll.jump_top(active),
            KeyCode::End => self.scroll.jump_bottom(active),
            KeyCode::Up => self.scroll.scroll_up(active),
            KeyCode::Down => self.scroll.scroll_down(active),
            KeyCode::Left | KeyCode::PageUp => self.scroll.page_back(active, page),
            KeyCode::Right | KeyCode::PageDown => self.scroll.page_forward(active, page),

            // Manual switching is disabled while the cycler owns the index
            KeyCode::Tab if !self.state.is_cycling() => {
                self.state.advance();
            }
            KeyCode::BackTab if !self.state.is_cycling() => {
                self.state.retreat();
            }

            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.state.toggle_cycling();
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                debug!("interval editor opened");
                self.mode = InputMode::EditingInterval(LineEditor::new());
            }

            _ => return false,
        }
        true
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let InputMode::EditingInterval(editor) = &mut self.mode else {
            return;
        };

        match editor.handle_key(key) {
            EditOutcome::Editing => {}
            EditOutcome::Cancelled => {
                debug!("interval edit cancelled");
                self.mode = InputMode::Normal;
            }
            EditOutcome::Submitted(text) => {
                match parse_interval(&text) {
                    Ok(seconds) => self.state.set_interval(seconds),
                    Err(e) => debug!("discarding interval edit: {e}"),
                }
                self.mode = InputMode::Normal;
            }
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
