//! The seam between the turn loop and whatever answers it.

use crate::Result;
use async_trait::async_trait;
use std::fmt;

/// Which side of the exchange a participant plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Proposes moves.
    Player,
    /// Applies moves and declares the winner.
    Judge,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Judge => "judge",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that answers one framed text input with one text output.
///
/// Each call is a complete, independent exchange: implementations must not
/// keep a session open between calls.
#[async_trait]
pub trait Participant: Send + Sync {
    /// The role this participant plays.
    fn role(&self) -> Role;

    /// Sends `input` and returns the full response.
    async fn respond(&self, input: &str) -> Result<String>;
}

#[async_trait]
impl<T: Participant + ?Sized> Participant for Box<T> {
    fn role(&self) -> Role {
        (**self).role()
    }

    async fn respond(&self, input: &str) -> Result<String> {
        (**self).respond(input).await
    }
}
