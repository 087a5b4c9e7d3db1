//! Text framing of collaborator input.
//!
//! Sections are separated by a blank line. The player receives the state
//! alone; the judge receives the state followed by the move.

use referee_proto::{GameState, Move};

/// Separator between sections of collaborator input and judge output.
pub const BLANK_LINE: &str = "\n\n";

/// Builds the player's stdin: `<state>\n\n`.
pub fn player_input(state: &GameState) -> String {
    format!("{state}{BLANK_LINE}")
}

/// Builds the judge's stdin: `<state>\n\n<move>\n\n`.
pub fn judge_input(state: &GameState, mv: &Move) -> String {
    format!("{state}{BLANK_LINE}{mv}{BLANK_LINE}")
}
