use super::core::{App, InputMode};
use super::editor::LineEditor;
use crate::state::{clamp_offset, Output};
use cyclewatch_core::{CommandSet, Error, Result};
use cyclewatch_utils::{display_width, truncate_to_width};
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

pub const WAITING_PLACEHOLDER: &str = "waiting for output";

/// Rows above the output body: the header and one blank separator
const HEADER_ROWS: u16 = 2;

const COMMAND_DELIMITER: &str = " | ";

/// Rows left for command output in a terminal `rows` tall
pub fn body_height(rows: u16) -> usize {
    rows.saturating_sub(HEADER_ROWS) as usize
}

/// Header colors; the scheme in use is the only cycling-mode indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTheme {
    pub header: Style,
    pub highlight: Style,
}

impl HeaderTheme {
    pub fn for_mode(cycling: bool) -> Self {
        if cycling {
            Self {
                header: Style::default().fg(Color::Black).bg(Color::Yellow),
                highlight: Style::default()
                    .fg(Color::White)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                header: Style::default().fg(Color::Black).bg(Color::Cyan),
                highlight: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            }
        }
    }
}

/// Everything one frame shows, read once from shared state
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub commands: &'a CommandSet,
    pub active: usize,
    pub cycling: bool,
    pub interval: f64,
    pub cycle_interval: f64,
    pub output: &'a Output,
    pub offset: usize,
    pub clock: String,
    pub editor: Option<&'a LineEditor>,
}

pub trait Renderer {
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()>;
}

impl Renderer for App {
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let active = self.state.active_index();
        let output = self.state.outputs().get(active);
        let editor = match &self.mode {
            InputMode::EditingInterval(editor) => Some(editor),
            InputMode::Normal => None,
        };

        let view = FrameView {
            commands: &self.commands,
            active,
            cycling: self.state.is_cycling(),
            interval: self.state.interval(),
            cycle_interval: self.cycle_interval,
            output: &output,
            offset: self.scroll.offset(active),
            clock: chrono::Local::now().format("%H:%M:%S").to_string(),
            editor,
        };

        terminal
            .draw(|frame| draw_frame(frame, &view))
            .map_err(|e| Error::terminal("draw", e))?;
        Ok(())
    }
}

/// Compose a whole frame. The terminal flips it to the screen in one go
/// once this returns.
pub fn draw_frame(frame: &mut Frame<'_>, view: &FrameView<'_>) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    if area.height == 0 || area.width == 0 {
        return;
    }

    let theme = HeaderTheme::for_mode(view.cycling);

    let header_area = Rect {
        height: 1,
        ..area
    };
    let header = Paragraph::new(header_line(view, &theme, area.width as usize))
        .style(theme.header);
    frame.render_widget(header, header_area);

    let body_rows = body_height(area.height);
    if body_rows > 0 {
        let body_area = Rect {
            y: area.y + HEADER_ROWS,
            height: body_rows as u16,
            ..area
        };
        frame.render_widget(body(view, body_rows, area.width as usize), body_area);
    }

    if let Some(editor) = view.editor {
        draw_interval_editor(frame, editor, &theme);
    }
}

fn header_line(view: &FrameView<'_>, theme: &HeaderTheme, width: usize) -> Line<'static> {
    let mut segments: Vec<(String, Style)> = vec![(
        format!("{:.1}/{:.1}s: ", view.interval, view.cycle_interval),
        theme.header,
    )];
    for (index, command) in view.commands.iter().enumerate() {
        if index > 0 {
            segments.push((COMMAND_DELIMITER.to_string(), theme.header));
        }
        let style = if index == view.active {
            theme.highlight
        } else {
            theme.header
        };
        segments.push((command.display().to_string(), style));
    }

    let left_width: usize = segments.iter().map(|(text, _)| display_width(text)).sum();
    let clock_width = display_width(&view.clock);

    if left_width + 1 + clock_width <= width {
        let padding = width - left_width - clock_width;
        let mut spans: Vec<Span<'static>> = segments
            .into_iter()
            .map(|(text, style)| Span::styled(text, style))
            .collect();
        spans.push(Span::styled(" ".repeat(padding), theme.header));
        spans.push(Span::styled(view.clock.clone(), theme.header));
        return Line::from(spans);
    }

    // Too narrow: drop the clock and cut the command list at the edge
    let mut remaining = width;
    let mut spans = Vec::new();
    for (text, style) in segments {
        if remaining == 0 {
            break;
        }
        let visible = truncate_to_width(&text, remaining);
        remaining -= display_width(visible);
        spans.push(Span::styled(visible.to_string(), style));
    }
    if remaining > 0 {
        spans.push(Span::styled(" ".repeat(remaining), theme.header));
    }
    Line::from(spans)
}

fn body(view: &FrameView<'_>, rows: usize, width: usize) -> Paragraph<'static> {
    let lines = match view.output {
        Output::Pending => return Paragraph::new(WAITING_PLACEHOLDER),
        Output::Lines(lines) => lines,
    };

    let start = clamp_offset(view.offset, lines.len(), rows);
    let max_width = width.saturating_sub(1);
    let visible: Vec<Line<'static>> = lines[start..]
        .iter()
        .take(rows)
        .map(|line| Line::raw(truncate_to_width(line, max_width).to_string()))
        .collect();

    Paragraph::new(visible)
}

/// Bordered single-line prompt near the bottom of the screen
fn draw_interval_editor(frame: &mut Frame<'_>, editor: &LineEditor, theme: &HeaderTheme) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).min(40);
    let popup = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width,
        height: 3,
    }
    .intersection(area);
    if popup.width < 3 || popup.height < 3 {
        return;
    }

    let block = Block::default()
        .title(" Interval (seconds) ")
        .borders(Borders::ALL)
        .border_style(theme.highlight);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(editor.text().to_string()).block(block), popup);

    let before_cursor: String = editor.text().chars().take(editor.cursor()).collect();
    let cursor_x = inner.x + (display_width(&before_cursor) as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, inner.y));
}
