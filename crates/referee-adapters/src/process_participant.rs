//! A participant backed by an external executable.

use crate::process_backend::ProcessBackend;
use crate::process_executor::{ExecError, ProcessExecutor};
use async_trait::async_trait;
use referee_core::RefereeConfig;
use referee_proto::{Error, Participant, Result, Role};
use std::time::Duration;
use tracing::warn;

/// Runs a fresh child process for every call.
#[derive(Debug, Clone)]
pub struct ProcessParticipant {
    role: Role,
    executor: ProcessExecutor,
    timeout: Option<Duration>,
    strict_exit_status: bool,
}

impl ProcessParticipant {
    /// Creates a participant with no timeout that ignores exit codes.
    pub fn new(role: Role, backend: ProcessBackend) -> Self {
        Self {
            role,
            executor: ProcessExecutor::new(backend),
            timeout: None,
            strict_exit_status: false,
        }
    }

    /// Creates the participant for `role` as described by the configuration.
    pub fn from_config(role: Role, config: &RefereeConfig) -> Self {
        Self::new(role, ProcessBackend::from_config(config.participant(role)))
            .with_timeout(config.turn_timeout())
            .with_strict_exit_status(config.strict_exit_status)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strict_exit_status(mut self, strict: bool) -> Self {
        self.strict_exit_status = strict;
        self
    }

    pub fn backend(&self) -> &ProcessBackend {
        self.executor.backend()
    }
}

#[async_trait]
impl Participant for ProcessParticipant {
    fn role(&self) -> Role {
        self.role
    }

    async fn respond(&self, input: &str) -> Result<String> {
        let role = self.role;
        let result = self
            .executor
            .exchange(input, self.timeout)
            .await
            .map_err(|e| match e {
                ExecError::Spawn { command, source } => Error::Spawn {
                    role,
                    command,
                    source,
                },
                ExecError::Io(source) => Error::Io { role, source },
            })?;

        if result.timed_out {
            return Err(Error::Timeout {
                role,
                timeout: self.timeout.unwrap_or_default(),
            });
        }

        if !result.success {
            if self.strict_exit_status {
                return Err(Error::NonZeroExit {
                    role,
                    code: result.exit_code,
                });
            }
            warn!(
                %role,
                command = %self.executor.backend(),
                exit_code = ?result.exit_code,
                "Process exited unsuccessfully, using its output anyway"
            );
        }

        String::from_utf8(result.output).map_err(|source| Error::InvalidUtf8 { role, source })
    }
}
