//! Parsing of judge output.
//!
//! The judge prints the new state, optionally followed by a blank line and
//! the winner:
//! ```text
//! <new_game_state>
//!
//! <winner_integer>
//! ```
//! Only the first blank line splits; anything after it is the winner field.

use crate::framing::BLANK_LINE;
use referee_proto::{Error, GameState, Result, Verdict, Winner};

/// Parses raw judge output into a [`Verdict`].
///
/// A winner field that is present but not an integer is fatal.
pub fn parse_verdict(output: &str) -> Result<Verdict> {
    let trimmed = output.trim();

    let Some((state, winner_field)) = trimmed.split_once(BLANK_LINE) else {
        return Ok(Verdict::Continue(GameState::new(trimmed)));
    };

    let raw = winner_field.trim();
    let winner = raw.parse::<Winner>().map_err(|source| Error::InvalidWinner {
        raw: raw.to_string(),
        source,
    })?;

    Ok(Verdict::Won {
        state: GameState::new(state),
        winner,
    })
}
