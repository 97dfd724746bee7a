use parking_lot::RwLock;
use std::sync::Arc;

/// Latest captured output of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The command has not completed a run yet
    Pending,
    /// Lines of the most recent completed run, stdout and stderr merged
    Lines(Arc<[String]>),
}

impl Output {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::Lines(cyclewatch_utils::split_lines(bytes).into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn line_count(&self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Lines(lines) => lines.len(),
        }
    }
}

/// Per-command output slots.
///
/// Slots are only written by the fetcher and only read by the renderer, so
/// a single lock around the vector is never contended for long: publishing
/// swaps one `Arc` and reading clones one.
#[derive(Debug)]
pub struct OutputStore {
    slots: RwLock<Vec<Output>>,
}

impl OutputStore {
    pub fn new(len: usize) -> Self {
        Self {
            slots: RwLock::new(vec![Output::Pending; len]),
        }
    }

    /// Replace the output for `index`; other slots are untouched
    pub fn publish(&self, index: usize, output: Output) {
        let mut slots = self.slots.write();
        if let Some(slot) = slots.get_mut(index) {
            *slot = output;
        }
    }

    /// Snapshot of the output for `index`
    pub fn get(&self, index: usize) -> Output {
        self.slots
            .read()
            .get(index)
            .cloned()
            .unwrap_or(Output::Pending)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
