//! What to launch for each collaborator.

use referee_core::ParticipantConfig;
use referee_proto::Role;
use std::fmt;

/// A command and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBackend {
    /// The command to execute.
    pub command: String,
    /// Arguments passed after the command.
    pub args: Vec<String>,
}

impl ProcessBackend {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: vec![],
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Creates a backend from configuration.
    pub fn from_config(config: &ParticipantConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }

    /// The classic executable for a role, relative to the working directory.
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Player => Self::from_config(&ParticipantConfig::player_default()),
            Role::Judge => Self::from_config(&ParticipantConfig::judge_default()),
        }
    }
}

impl fmt::Display for ProcessBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ProcessBackend::default_for(Role::Player).command, "./main");
        assert_eq!(ProcessBackend::default_for(Role::Judge).command, "./judge");
    }

    #[test]
    fn test_from_config() {
        let config = ParticipantConfig {
            command: "python3".to_string(),
            args: vec!["judge.py".to_string()],
        };
        let backend = ProcessBackend::from_config(&config);
        assert_eq!(backend, ProcessBackend::new("python3").arg("judge.py"));
        assert_eq!(backend.to_string(), "python3 judge.py");
    }
}
