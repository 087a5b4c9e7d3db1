//! Judge verdicts and per-turn records.

use crate::{GameState, Move, Winner};

/// Outcome of applying a move, as reported by the judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The game goes on from the new state.
    Continue(GameState),
    /// The game is over.
    Won { state: GameState, winner: Winner },
}

impl Verdict {
    /// Returns the new game state.
    pub fn state(&self) -> &GameState {
        match self {
            Verdict::Continue(state) | Verdict::Won { state, .. } => state,
        }
    }

    /// Returns the winner, if the judge declared one.
    pub fn winner(&self) -> Option<Winner> {
        match self {
            Verdict::Continue(_) => None,
            Verdict::Won { winner, .. } => Some(*winner),
        }
    }

    pub fn into_state(self) -> GameState {
        match self {
            Verdict::Continue(state) | Verdict::Won { state, .. } => state,
        }
    }
}

/// One player-then-judge cycle, kept only long enough to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// 1-based turn number.
    pub number: u32,
    /// The trimmed move the player proposed.
    pub mv: Move,
    /// The trimmed state the judge returned.
    pub state: GameState,
    pub winner: Option<Winner>,
}

impl Turn {
    /// Builds a turn record from the move and the judge's verdict.
    pub fn new(number: u32, mv: Move, verdict: Verdict) -> Self {
        let winner = verdict.winner();
        Self {
            number,
            mv,
            state: verdict.into_state(),
            winner,
        }
    }

    pub fn is_final(&self) -> bool {
        self.winner.is_some()
    }
}
