// Child process execution for RuboCop invocations: captured output,
// bounded wait with kill-on-timeout, and spawn failures surfaced as
// actionable errors naming the attempted command.
use std::process::ExitStatus;
use std::time::Duration;

use tracing::debug;

use crate::command::CommandInvocation;
use crate::error::{ProcessError, Result, RucopError};

/// Outcome of one completed child process.
#[derive(Debug)]
pub struct ProcessResult {
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub duration: Duration,
}

impl ProcessResult {
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }

    /// Captured stdout decoded lossily; RuboCop output is UTF-8 in practice.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// Spawns RuboCop invocations with a bounded wait.
#[derive(Debug, Clone)]
pub struct ProcessManager {
    default_timeout: Duration,
}

impl ProcessManager {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    /// Run an invocation to completion, capturing both output streams.
    ///
    /// The environment is inherited from this process. No result is produced
    /// before the child exits; a child still running when the timeout
    /// elapses is killed and reported as `ProcessError::Timeout`.
    pub async fn run(&self, invocation: &CommandInvocation) -> Result<ProcessResult> {
        self.run_with_timeout(invocation, self.default_timeout).await
    }

    pub async fn run_with_timeout(
        &self,
        invocation: &CommandInvocation,
        timeout: Duration,
    ) -> Result<ProcessResult> {
        use std::process::Stdio;
        use tokio::io::AsyncReadExt;
        use tokio::process::Command;

        let command_line = invocation.display();
        debug!(command = %command_line, "spawning rubocop");

        let start_time = std::time::Instant::now();

        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args());
        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            RucopError::from(ProcessError::SpawnFailed {
                command: command_line.clone(),
                error: e.to_string(),
            })
        })?;

        let execution = tokio::time::timeout(timeout, async {
            let mut stdout_data = Vec::new();
            let mut stderr_data = Vec::new();

            if let Some(stdout) = child.stdout.as_mut() {
                stdout.read_to_end(&mut stdout_data).await.map_err(|e| {
                    RucopError::from(ProcessError::OutputCaptureFailed {
                        message: format!("failed to read stdout: {e}"),
                        command: command_line.clone(),
                    })
                })?;
            }
            if let Some(stderr) = child.stderr.as_mut() {
                stderr.read_to_end(&mut stderr_data).await.map_err(|e| {
                    RucopError::from(ProcessError::OutputCaptureFailed {
                        message: format!("failed to read stderr: {e}"),
                        command: command_line.clone(),
                    })
                })?;
            }

            let exit_status = child.wait().await.map_err(|e| {
                RucopError::from(ProcessError::OutputCaptureFailed {
                    message: format!("failed to wait for process: {e}"),
                    command: command_line.clone(),
                })
            })?;

            Ok::<ProcessResult, RucopError>(ProcessResult {
                exit_status,
                stdout: stdout_data,
                stderr: stderr_data,
                duration: start_time.elapsed(),
            })
        })
        .await;

        match execution {
            Ok(result) => result,
            Err(_) => {
                let _ = child.kill().await;
                let _ = child.wait().await;

                Err(ProcessError::Timeout {
                    command: invocation.display(),
                    duration: timeout,
                }
                .into())
            }
        }
    }
}
