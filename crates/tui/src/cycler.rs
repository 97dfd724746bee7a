use crate::state::SharedState;
use cyclewatch_core::interval_duration;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Advances the active command on a fixed cadence while cycling is on.
///
/// The timer runs whether or not cycling is enabled; the flag only gates the
/// effect, so enabling cycling takes effect on the next tick boundary.
pub struct Cycler {
    state: Arc<SharedState>,
    period: Duration,
}

impl Cycler {
    pub fn new(state: Arc<SharedState>, cycle_interval_secs: f64) -> Self {
        Self {
            state,
            period: interval_duration(cycle_interval_secs),
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick();
        }
    }

    /// One timer tick; returns the new active index when it moved
    pub fn tick(&self) -> Option<usize> {
        if !self.state.is_cycling() {
            return None;
        }
        let index = self.state.advance();
        debug!(index, "cycled to next command");
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclewatch_core::RuntimeSettings;

    fn state(len: usize, cycle: bool) -> Arc<SharedState> {
        let settings = RuntimeSettings {
            cycle,
            ..RuntimeSettings::default()
        };
        Arc::new(SharedState::new(len, &settings))
    }

    #[test]
    fn test_tick_gated_by_flag() {
        let state = state(2, false);
        let cycler = Cycler::new(state.clone(), 5.0);

        state.take_dirty();
        assert_eq!(cycler.tick(), None);
        assert_eq!(state.active_index(), 0);
        assert!(!state.is_dirty());

        state.toggle_cycling();
        state.take_dirty();
        assert_eq!(cycler.tick(), Some(1));
        assert!(state.take_dirty());
        assert_eq!(cycler.tick(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_alternates_every_cycle_interval() {
        let state = state(2, true);
        let handle = Cycler::new(state.clone(), 5.0).spawn();

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert_eq!(state.active_index(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(state.active_index(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.active_index(), 0);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabling_waits_for_tick_boundary() {
        let state = state(3, false);
        let handle = Cycler::new(state.clone(), 5.0).spawn();

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(state.active_index(), 0);

        state.toggle_cycling();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(state.active_index(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(state.active_index(), 1);

        handle.abort();
    }
}
