//! One-shot process exchange.
//!
//! Spawns the command, writes the whole input to stdin, closes stdin, reads
//! stdout to EOF, and reaps the child. Stderr is inherited so collaborator
//! diagnostics reach the terminal untouched. Supports an optional timeout
//! with graceful SIGTERM termination.

use crate::process_backend::ProcessBackend;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How long a child gets to exit after SIGTERM before it is killed.
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Result of a single exchange.
#[derive(Debug)]
pub struct ExchangeResult {
    /// Everything the child wrote to stdout.
    pub output: Vec<u8>,
    /// Whether the execution succeeded (exit code 0).
    pub success: bool,
    /// The exit code, `None` if the child was ended by a signal.
    pub exit_code: Option<i32>,
    /// Whether the execution was terminated due to timeout.
    pub timed_out: bool,
}

/// Failures that prevent an exchange from completing.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs exchanges against one backend.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    backend: ProcessBackend,
}

impl ProcessExecutor {
    /// Creates a new executor with the given backend.
    pub fn new(backend: ProcessBackend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &ProcessBackend {
        &self.backend
    }

    /// Runs one exchange: spawn, write `input`, close stdin, read stdout, wait.
    ///
    /// Writing and reading run concurrently so a child that answers before
    /// draining its input cannot deadlock on a full pipe. A child that exits
    /// without reading its input is not an error. If `timeout` elapses first,
    /// the child receives SIGTERM and the result is marked `timed_out`.
    pub async fn exchange(
        &self,
        input: &str,
        timeout: Option<Duration>,
    ) -> Result<ExchangeResult, ExecError> {
        let mut command = Command::new(&self.backend.command);
        command.args(&self.backend.args);
        command.stdin(Stdio::piped());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::inherit());
        command.kill_on_drop(true);

        let cwd = std::env::current_dir()?;
        command.current_dir(&cwd);

        debug!(
            command = %self.backend.command,
            args = ?self.backend.args,
            cwd = ?cwd,
            input_bytes = input.len(),
            "Spawning process"
        );

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            command: self.backend.to_string(),
            source,
        })?;

        let stdin_handle = child.stdin.take();
        let stdout_handle = child.stdout.take();
        let input = input.to_owned();

        let run = async {
            let write_future = async move {
                if let Some(mut stdin) = stdin_handle {
                    match stdin.write_all(input.as_bytes()).await {
                        Ok(()) => {}
                        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                            debug!("Child closed stdin before reading all input");
                        }
                        Err(e) => return Err(e),
                    }
                    drop(stdin); // Close stdin to signal EOF
                }
                Ok::<_, io::Error>(())
            };

            let read_future = async move {
                let mut output = Vec::new();
                if let Some(mut stdout) = stdout_handle {
                    stdout.read_to_end(&mut output).await?;
                }
                Ok::<_, io::Error>(output)
            };

            let ((), output) = tokio::try_join!(write_future, read_future)?;
            let status = child.wait().await?;
            Ok::<(Vec<u8>, ExitStatus), io::Error>((output, status))
        };

        let (output, status) = match timeout {
            Some(duration) => {
                debug!(timeout = ?duration, "Executing with timeout");
                let result = tokio::time::timeout(duration, run).await;
                match result {
                    Ok(result) => result?,
                    Err(_) => {
                        warn!(
                            command = %self.backend.command,
                            timeout = ?duration,
                            "Execution timeout reached, terminating child"
                        );
                        Self::terminate_child(&mut child).await?;
                        return Ok(ExchangeResult {
                            output: Vec::new(),
                            success: false,
                            exit_code: None,
                            timed_out: true,
                        });
                    }
                }
            }
            None => run.await?,
        };

        debug!(
            exit_code = ?status.code(),
            output_bytes = output.len(),
            "Process finished"
        );

        Ok(ExchangeResult {
            output,
            success: status.success(),
            exit_code: status.code(),
            timed_out: false,
        })
    }

    /// Asks the child to stop, then kills it if it ignores the request.
    async fn terminate_child(child: &mut Child) -> io::Result<()> {
        if send_sigterm(child)
            && tokio::time::timeout(TERMINATE_GRACE, child.wait())
                .await
                .is_ok()
        {
            return Ok(());
        }

        debug!("Killing child process");
        let _ = child.start_kill();
        child.wait().await?;
        Ok(())
    }
}

#[cfg(unix)]
fn send_sigterm(child: &Child) -> bool {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return false;
    };
    #[allow(clippy::cast_possible_wrap)]
    let pid = Pid::from_raw(pid as i32);
    debug!(%pid, "Sending SIGTERM to child process");
    kill(pid, Signal::SIGTERM).is_ok()
}

#[cfg(not(unix))]
fn send_sigterm(_child: &Child) -> bool {
    false
}
