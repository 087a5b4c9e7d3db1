//! Configuration types for Referee.
//!
//! Every field has a default that reproduces the classic behavior: the
//! player is `./main`, the judge is `./judge`, there is no turn cap, no
//! timeout, and collaborator exit codes are ignored.

use referee_proto::Role;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Top-level configuration for Referee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefereeConfig {
    /// Process that proposes moves.
    #[serde(default = "ParticipantConfig::player_default")]
    pub player: ParticipantConfig,

    /// Process that applies moves and declares the winner.
    #[serde(default = "ParticipantConfig::judge_default")]
    pub judge: ParticipantConfig,

    /// Stop after this many turns without a winner. `None` plays forever.
    #[serde(default)]
    pub max_turns: Option<u32>,

    /// Per-process timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub turn_timeout_secs: Option<u64>,

    /// Treat a non-zero collaborator exit status as fatal.
    #[serde(default)]
    pub strict_exit_status: bool,

    /// Enable verbose output.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            player: ParticipantConfig::player_default(),
            judge: ParticipantConfig::judge_default(),
            max_turns: None,
            turn_timeout_secs: None,
            strict_exit_status: false,
            verbose: false,
        }
    }
}

/// How to launch one collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantConfig {
    /// Executable path or name.
    pub command: String,

    /// Arguments passed after the command.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ParticipantConfig {
    pub fn player_default() -> Self {
        Self {
            command: "./main".to_string(),
            args: vec![],
        }
    }

    pub fn judge_default() -> Self {
        Self {
            command: "./judge".to_string(),
            args: vec![],
        }
    }

    /// Parses a whitespace-separated command line: program first, then arguments.
    ///
    /// No shell quoting is interpreted. Returns `None` for a blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = words.next()?.to_string();
        Some(Self {
            command,
            args: words.map(str::to_string).collect(),
        })
    }

    /// Renders the command line for display.
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

impl RefereeConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        debug!(path = %path_ref.display(), "Loading configuration from file");
        let content = std::fs::read_to_string(path_ref)?;
        let config: Self = serde_yaml::from_str(&content)?;
        debug!(
            player = %config.player.command,
            judge = %config.judge.command,
            max_turns = ?config.max_turns,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Returns the launch settings for a role.
    pub fn participant(&self, role: Role) -> &ParticipantConfig {
        match role {
            Role::Player => &self.player,
            Role::Judge => &self.judge,
        }
    }

    /// Effective turn cap; zero means uncapped.
    pub fn effective_max_turns(&self) -> Option<u32> {
        self.max_turns.filter(|&n| n > 0)
    }

    /// Effective per-process timeout; zero means none.
    pub fn turn_timeout(&self) -> Option<Duration> {
        self.turn_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    /// Validates the configuration and returns warnings.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        for role in [Role::Player, Role::Judge] {
            if self.participant(role).command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand { role });
            }
        }

        let mut warnings = Vec::new();

        if self.max_turns == Some(0) {
            warnings.push(ConfigWarning::InvalidValue {
                field: "max_turns".to_string(),
                message: "0 disables the turn cap; the game runs until a winner".to_string(),
            });
        }

        if self.turn_timeout_secs == Some(0) {
            warnings.push(ConfigWarning::InvalidValue {
                field: "turn_timeout_secs".to_string(),
                message: "0 disables the timeout; processes may run forever".to_string(),
            });
        }

        Ok(warnings)
    }
}

/// Configuration warnings emitted during validation.
#[derive(Debug, Clone)]
pub enum ConfigWarning {
    /// Field has a value that is accepted but probably not intended.
    InvalidValue { field: String, message: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::InvalidValue { field, message } => {
                write!(f, "Warning [{}]: {}", field, message)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No command configured for the {role}")]
    EmptyCommand { role: Role },
}
