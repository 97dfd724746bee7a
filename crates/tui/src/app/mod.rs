mod core;
mod editor;
mod input;
mod render;

pub use self::core::{App, Flow, InputMode};
pub use self::editor::{EditOutcome, LineEditor};
pub use self::input::InputHandler;
pub use self::render::{body_height, draw_frame, FrameView, HeaderTheme, Renderer, WAITING_PLACEHOLDER};
