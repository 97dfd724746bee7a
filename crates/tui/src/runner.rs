//! Child process execution for watched commands.

use async_trait::async_trait;
use cyclewatch_core::{Command, Error};
use std::io::{self, Read};
use std::process::Stdio;
use tracing::{debug, warn};

/// Result of one run of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Standard output and standard error in the order they were written
    pub combined: Vec<u8>,
    /// Exit code, `None` when the process never started or was killed by a signal
    pub exit_code: Option<i32>,
}

impl RunOutput {
    /// Output standing in for a command that could not be launched
    pub fn launch_failure(error: &Error) -> Self {
        Self {
            combined: error.to_string().into_bytes(),
            exit_code: None,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command to completion and captures what it printed.
///
/// Implementations never fail: a command that cannot be started is reported
/// through the captured text.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    async fn run(&self, command: &Command) -> RunOutput;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawn with stdout and stderr sharing one pipe, so the captured bytes
    /// keep the order the child wrote them in
    async fn run_merged(&self, command: &Command) -> io::Result<RunOutput> {
        let (mut reader, writer) = io::pipe()?;
        let stderr_writer = writer.try_clone()?;

        let mut process = tokio::process::Command::new(command.program());
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);
        let mut child = process.spawn()?;
        // The read only reaches EOF once every write end outside the child is closed
        drop(process);

        let combined = tokio::task::spawn_blocking(move || {
            let mut combined = Vec::new();
            reader.read_to_end(&mut combined).map(|_| combined)
        })
        .await
        .map_err(io::Error::other)??;

        let status = child.wait().await?;
        let exit_code = status.code();
        if !status.success() {
            debug!(command = %command, ?exit_code, "command exited unsuccessfully");
        }
        Ok(RunOutput {
            combined,
            exit_code,
        })
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &Command) -> RunOutput {
        match self.run_merged(command).await {
            Ok(output) => output,
            Err(e) => {
                let error = Error::command_execution(
                    command.program(),
                    command.args().to_vec(),
                    format!("failed to execute command: {e}"),
                    None,
                );
                warn!(command = %command, "{error}");
                RunOutput::launch_failure(&error)
            }
        }
    }
}
