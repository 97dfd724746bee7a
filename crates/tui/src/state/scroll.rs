/// Offset stored by "jump to bottom".
///
/// It is resolved to the real last page by [`clamp_offset`] at draw time,
/// when the content length and viewport height are known.
pub const BOTTOM: usize = usize::MAX / 2;

/// Per-command top visible line.
///
/// Offsets are stored unclamped; only the renderer bounds them against the
/// live content, so switching commands or resizing never loses a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    offsets: Vec<usize>,
}

impl ScrollState {
    pub fn new(len: usize) -> Self {
        Self {
            offsets: vec![0; len],
        }
    }

    pub fn offset(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(0)
    }

    fn update(&mut self, index: usize, f: impl FnOnce(usize) -> usize) {
        if let Some(offset) = self.offsets.get_mut(index) {
            *offset = f(*offset);
        }
    }

    pub fn scroll_up(&mut self, index: usize) {
        self.update(index, |o| o.saturating_sub(1));
    }

    pub fn scroll_down(&mut self, index: usize) {
        self.update(index, |o| o.saturating_add(1));
    }

    pub fn page_back(&mut self, index: usize, page: usize) {
        self.update(index, |o| o.saturating_sub(page));
    }

    pub fn page_forward(&mut self, index: usize, page: usize) {
        self.update(index, |o| o.saturating_add(page));
    }

    pub fn jump_top(&mut self, index: usize) {
        self.update(index, |_| 0);
    }

    pub fn jump_bottom(&mut self, index: usize) {
        self.update(index, |_| BOTTOM);
    }
}

/// Bound a stored offset against the content actually on screen
pub fn clamp_offset(offset: usize, content_len: usize, viewport_height: usize) -> usize {
    if content_len < viewport_height {
        0
    } else {
        offset.min(content_len - viewport_height)
    }
}
