//! State shared by the fetcher, the cycler and the display loop.
//!
//! Each field has one writer under normal operation:
//! - active index: the cycler while cycling, the input handler otherwise
//! - outputs: the fetcher, for the index it captured at the start of a run
//! - cycling flag and interval: the input handler
//! - dirty flag: set by everyone, cleared only by the display loop

mod output;
mod scroll;

pub use output::{Output, OutputStore};
pub use scroll::{clamp_offset, ScrollState, BOTTOM};

use cyclewatch_core::RuntimeSettings;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tokio::sync::Notify;
use tracing::debug;

#[derive(Debug)]
pub struct SharedState {
    len: usize,
    active: AtomicUsize,
    cycling: AtomicBool,
    dirty: AtomicBool,
    interval_bits: AtomicU64,
    interval_changed: Notify,
    outputs: OutputStore,
}

impl SharedState {
    /// State for `len` commands, which must be at least one
    pub fn new(len: usize, settings: &RuntimeSettings) -> Self {
        let len = len.max(1);
        Self {
            len,
            active: AtomicUsize::new(0),
            cycling: AtomicBool::new(settings.cycle),
            dirty: AtomicBool::new(true),
            interval_bits: AtomicU64::new(settings.interval.to_bits()),
            interval_changed: Notify::new(),
            outputs: OutputStore::new(len),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Move to the next command, wrapping around
    pub fn advance(&self) -> usize {
        let next = (self.active_index() + 1) % self.len;
        self.set_active(next);
        next
    }

    /// Move to the previous command, wrapping around
    pub fn retreat(&self) -> usize {
        let previous = (self.active_index() + self.len - 1) % self.len;
        self.set_active(previous);
        previous
    }

    fn set_active(&self, index: usize) {
        debug!(index, "active command changed");
        self.active.store(index % self.len, Ordering::Release);
        self.mark_dirty();
    }

    pub fn is_cycling(&self) -> bool {
        self.cycling.load(Ordering::Acquire)
    }

    /// Flip cycling mode and return the new value
    pub fn toggle_cycling(&self) -> bool {
        let cycling = !self.cycling.fetch_xor(true, Ordering::AcqRel);
        debug!(cycling, "cycling mode toggled");
        self.mark_dirty();
        cycling
    }

    /// Seconds between runs of the active command
    pub fn interval(&self) -> f64 {
        f64::from_bits(self.interval_bits.load(Ordering::Acquire))
    }

    /// Replace the refresh interval and wake the fetcher so the new value
    /// applies to the wait already in progress
    pub fn set_interval(&self, seconds: f64) {
        debug!(seconds, "refresh interval changed");
        self.interval_bits
            .store(seconds.to_bits(), Ordering::Release);
        self.interval_changed.notify_one();
        self.mark_dirty();
    }

    pub(crate) async fn interval_changed(&self) {
        self.interval_changed.notified().await;
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Clear the dirty flag, returning whether a redraw was owed
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn outputs(&self) -> &OutputStore {
        &self.outputs
    }

    /// Publish output for `index` and request a redraw
    pub fn publish(&self, index: usize, output: Output) {
        self.outputs.publish(index, output);
        self.mark_dirty();
    }
}
