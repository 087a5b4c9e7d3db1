//! Scripted participant for exercising the turn loop without processes.
//!
//! `ScriptedParticipant` answers from a fixed list, a repeated response, or a
//! closure, and records every input it receives so tests can check exactly
//! what state was threaded into each turn.
//!
//! # Example
//!
//! ```
//! use referee_core::testing::ScriptedParticipant;
//! use referee_proto::{Participant, Role};
//!
//! # tokio_test_block_on(async {
//! let judge = ScriptedParticipant::from_fn(Role::Judge, |_input, call| {
//!     if call == 2 { "DONE\n\n1".to_string() } else { format!("STATE{}", call + 1) }
//! });
//! assert_eq!(judge.respond("EMPTY\n\nMOVE\n\n").await.unwrap(), "STATE1");
//! assert_eq!(judge.call_count(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use referee_proto::{Error, Participant, Result, Role};
use std::sync::{Arc, Mutex, PoisonError};

type Responder = dyn Fn(&str, usize) -> Result<String> + Send + Sync;

/// A participant whose answers are decided by the test.
///
/// Clones share the recorded inputs, so a test can keep a handle after
/// moving the participant into a driver.
#[derive(Clone)]
pub struct ScriptedParticipant {
    role: Role,
    responder: Arc<Responder>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl std::fmt::Debug for ScriptedParticipant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedParticipant")
            .field("role", &self.role)
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl ScriptedParticipant {
    /// Answers with `responses` in order; calls past the end fail with an I/O error.
    pub fn new(role: Role, responses: Vec<String>) -> Self {
        Self::with_responder(role, move |_, call| {
            responses.get(call).cloned().ok_or_else(|| Error::Io {
                role,
                source: std::io::Error::other(format!("script exhausted after {call} responses")),
            })
        })
    }

    /// Answers every call with the same response.
    pub fn repeating(role: Role, response: impl Into<String>) -> Self {
        let response = response.into();
        Self::from_fn(role, move |_, _| response.clone())
    }

    /// Answers with `f(input, call_index)`; the index starts at 0.
    pub fn from_fn<F>(role: Role, f: F) -> Self
    where
        F: Fn(&str, usize) -> String + Send + Sync + 'static,
    {
        Self::with_responder(role, move |input, call| Ok(f(input, call)))
    }

    fn with_responder<F>(role: Role, f: F) -> Self
    where
        F: Fn(&str, usize) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            role,
            responder: Arc::new(f),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every input received so far, oldest first.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Participant for ScriptedParticipant {
    fn role(&self) -> Role {
        self.role
    }

    async fn respond(&self, input: &str) -> Result<String> {
        let call = {
            let mut inputs = self.inputs.lock().unwrap_or_else(PoisonError::into_inner);
            inputs.push(input.to_string());
            inputs.len() - 1
        };
        (self.responder)(input, call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_in_order_then_exhausted() {
        let player = ScriptedParticipant::new(Role::Player, vec!["a".into(), "b".into()]);

        assert_eq!(player.respond("1").await.unwrap(), "a");
        assert_eq!(player.respond("2").await.unwrap(), "b");
        let err = player.respond("3").await.unwrap_err();

        assert!(matches!(err, Error::Io { role: Role::Player, .. }));
        assert_eq!(player.inputs(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_clones_share_recorded_inputs() {
        let judge = ScriptedParticipant::repeating(Role::Judge, "STATE");
        let handle = judge.clone();

        judge.respond("x").await.unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.role(), Role::Judge);
    }
}
