//! The turn loop.
//!
//! Each turn asks the player for a move, asks the judge to apply it, prints
//! the result, and feeds the judge's state into the next turn. The loop ends
//! the first time the judge names a winner, or when the optional turn cap is
//! reached.

use crate::config::RefereeConfig;
use crate::framing::{judge_input, player_input};
use crate::reporter::TurnReporter;
use crate::verdict_parser::parse_verdict;
use referee_proto::{Error, GameState, Move, Participant, Result, Turn, Verdict, Winner};
use std::io::Write;
use tracing::{Instrument, debug, info, info_span, warn};

/// Reason the game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The judge declared a winner.
    Winner(Winner),
    /// The turn cap was reached without a winner.
    MaxTurns,
}

impl TerminationReason {
    /// Returns the process exit code for this termination reason.
    ///
    /// - 0: a winner was declared
    /// - 2: the turn cap was hit
    pub fn exit_code(&self) -> i32 {
        match self {
            TerminationReason::Winner(_) => 0,
            TerminationReason::MaxTurns => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Winner(_) => "winner",
            TerminationReason::MaxTurns => "max_turns",
        }
    }
}

/// Loop settings that are independent of how participants are launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Stop after this many turns without a winner.
    pub max_turns: Option<u32>,
}

impl From<&RefereeConfig> for DriverConfig {
    fn from(config: &RefereeConfig) -> Self {
        Self {
            max_turns: config.effective_max_turns(),
        }
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reason: TerminationReason,
    /// Number of completed turns.
    pub turns: u32,
    /// State returned by the judge on the last turn.
    pub final_state: GameState,
}

impl Outcome {
    pub fn winner(&self) -> Option<Winner> {
        match self.reason {
            TerminationReason::Winner(winner) => Some(winner),
            TerminationReason::MaxTurns => None,
        }
    }
}

/// Drives a game between a player and a judge, reporting to `W`.
pub struct GameDriver<P, J, W: Write> {
    player: P,
    judge: J,
    config: DriverConfig,
    reporter: TurnReporter<W>,
}

impl<P, J, W> GameDriver<P, J, W>
where
    P: Participant,
    J: Participant,
    W: Write,
{
    /// Creates a driver with no turn cap.
    pub fn new(player: P, judge: J, out: W) -> Self {
        Self {
            player,
            judge,
            config: DriverConfig::default(),
            reporter: TurnReporter::new(out),
        }
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Asks the player for its next move.
    pub async fn invoke_player(&self, state: &GameState) -> Result<Move> {
        let output = self.player.respond(&player_input(state)).await?;
        let mv = Move::new(output);
        debug!(role = %self.player.role(), bytes = mv.as_str().len(), "Move received");
        Ok(mv)
    }

    /// Asks the judge to apply `mv` to `state`.
    pub async fn invoke_judge(&self, state: &GameState, mv: &Move) -> Result<Verdict> {
        let output = self.judge.respond(&judge_input(state, mv)).await?;
        let verdict = parse_verdict(&output)?;
        debug!(
            role = %self.judge.role(),
            winner = ?verdict.winner(),
            "Verdict received"
        );
        Ok(verdict)
    }

    /// Plays one player-then-judge cycle.
    pub async fn play_turn(&self, number: u32, state: &GameState) -> Result<Turn> {
        let mv = self.invoke_player(state).await?;
        let verdict = self.invoke_judge(state, &mv).await?;
        Ok(Turn::new(number, mv, verdict))
    }

    /// Runs turns until the judge declares a winner or the turn cap is hit.
    pub async fn run(&mut self, initial: GameState) -> Result<Outcome> {
        info!(max_turns = ?self.config.max_turns, "Starting game");

        let mut state = initial;
        let mut number = 0;

        loop {
            if self.config.max_turns.is_some_and(|max| number >= max) {
                warn!(turns = number, "Turn cap reached without a winner");
                return Ok(Outcome {
                    reason: TerminationReason::MaxTurns,
                    turns: number,
                    final_state: state,
                });
            }

            number += 1;
            let turn = self
                .play_turn(number, &state)
                .instrument(info_span!("turn", number))
                .await?;

            self.reporter.turn(&turn).map_err(Error::Report)?;

            if let Some(winner) = turn.winner {
                self.reporter.winner(winner).map_err(Error::Report)?;
                info!(%winner, turns = number, "Game over");
                return Ok(Outcome {
                    reason: TerminationReason::Winner(winner),
                    turns: number,
                    final_state: turn.state,
                });
            }

            state = turn.state;
        }
    }

    /// Consumes the driver and returns the report sink.
    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }
}
