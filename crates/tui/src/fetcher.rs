//! Background activity that keeps the active command's output fresh.

use crate::runner::CommandRunner;
use crate::state::{Output, SharedState};
use cyclewatch_core::{interval_duration, CommandSet};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

pub struct OutputFetcher<R> {
    state: Arc<SharedState>,
    commands: Arc<CommandSet>,
    runner: R,
}

impl<R: CommandRunner> OutputFetcher<R> {
    pub fn new(state: Arc<SharedState>, commands: Arc<CommandSet>, runner: R) -> Self {
        Self {
            state,
            commands,
            runner,
        }
    }

    /// Run forever on the current runtime. The task is abandoned, not joined,
    /// at shutdown.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) {
        loop {
            self.fetch_once().await;
            self.wait_interval().await;
        }
    }

    /// Run the active command once and publish the result into the slot of
    /// the command that was active when the run started
    pub async fn fetch_once(&self) -> usize {
        let index = self.state.active_index();
        let Some(command) = self.commands.get(index) else {
            return index;
        };

        trace!(index, command = %command, "running command");
        let result = self.runner.run(command).await;
        debug!(
            index,
            command = %command,
            exit_code = ?result.exit_code,
            bytes = result.combined.len(),
            "command finished"
        );

        self.state.publish(index, Output::from_bytes(&result.combined));
        index
    }

    /// Wait one interval after the last run. An interval edit during the
    /// wait re-evaluates the deadline against the new value.
    async fn wait_interval(&self) {
        let finished = Instant::now();
        loop {
            let deadline = finished + interval_duration(self.state.interval());
            tokio::select! {
                _ = sleep_until(deadline) => return,
                _ = self.state.interval_changed() => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunOutput;
    use async_trait::async_trait;
    use cyclewatch_core::{Command, RuntimeSettings};
    use parking_lot::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Echoes the command's display string and counts runs
    #[derive(Default)]
    struct EchoRunner {
        runs: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CommandRunner for Arc<EchoRunner> {
        async fn run(&self, command: &Command) -> RunOutput {
            self.runs.lock().push(command.display().to_string());
            RunOutput {
                combined: format!("{}\n", command.display()).into_bytes(),
                exit_code: Some(0),
            }
        }
    }

    /// Blocks every run until released
    struct GatedRunner {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl CommandRunner for GatedRunner {
        async fn run(&self, command: &Command) -> RunOutput {
            self.started.notify_one();
            self.release.notified().await;
            RunOutput {
                combined: command.display().as_bytes().to_vec(),
                exit_code: Some(0),
            }
        }
    }

    fn setup(tokens: &[&str], interval: f64) -> (Arc<SharedState>, Arc<CommandSet>) {
        let commands = Arc::new(CommandSet::parse(tokens).unwrap());
        let settings = RuntimeSettings {
            interval,
            ..RuntimeSettings::default()
        };
        let state = Arc::new(SharedState::new(commands.len(), &settings));
        (state, commands)
    }

    fn lines(output: Output) -> Vec<String> {
        match output {
            Output::Lines(lines) => lines.to_vec(),
            Output::Pending => panic!("output still pending"),
        }
    }

    #[tokio::test]
    async fn test_fetch_publishes_active_slot() {
        let (state, commands) = setup(&["echo", "A", "&&", "echo", "B"], 1.0);
        let runner = Arc::new(EchoRunner::default());
        let fetcher = OutputFetcher::new(state.clone(), commands, runner);

        state.take_dirty();
        assert_eq!(fetcher.fetch_once().await, 0);

        assert!(state.take_dirty());
        assert_eq!(lines(state.outputs().get(0)), vec!["echo A"]);
        assert!(state.outputs().get(1).is_pending());
    }

    #[tokio::test]
    async fn test_result_lands_in_slot_active_at_start() {
        let (state, commands) = setup(&["echo", "A", "&&", "echo", "B"], 1.0);
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let runner = GatedRunner {
            started: started.clone(),
            release: release.clone(),
        };
        let fetcher = OutputFetcher::new(state.clone(), commands, runner);

        let handle = tokio::spawn(async move { fetcher.fetch_once().await });
        started.notified().await;

        // user switches away while the run is in flight
        state.advance();
        release.notify_one();

        assert_eq!(handle.await.unwrap(), 0);
        assert_eq!(lines(state.outputs().get(0)), vec!["echo A"]);
        assert!(state.outputs().get(1).is_pending());
        assert_eq!(state.active_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reruns_every_interval() {
        let (state, commands) = setup(&["date"], 2.0);
        let runner = Arc::new(EchoRunner::default());
        let handle = OutputFetcher::new(state.clone(), commands, runner.clone()).spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runner.runs.lock().len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(runner.runs.lock().len(), 2);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(runner.runs.lock().len(), 4);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_follows_active_command() {
        let (state, commands) = setup(&["echo", "A", "&&", "echo", "B"], 1.0);
        let runner = Arc::new(EchoRunner::default());
        let handle = OutputFetcher::new(state.clone(), commands, runner.clone()).spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        state.advance();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(*runner.runs.lock(), vec!["echo A", "echo B"]);
        assert_eq!(lines(state.outputs().get(1)), vec!["echo B"]);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_edit_shortens_current_wait() {
        let (state, commands) = setup(&["date"], 60.0);
        let runner = Arc::new(EchoRunner::default());
        let handle = OutputFetcher::new(state.clone(), commands, runner.clone()).spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runner.runs.lock().len(), 1);

        state.set_interval(1.0);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runner.runs.lock().len(), 2);

        handle.abort();
    }
}
