//! Turn-by-turn progress report on stdout.
//!
//! Each turn prints four lines:
//! ```text
//! <move>
//! ---
//! <new state>
//! ---
//! ```
//! and the game ends with `Player <N> wins!`.

use referee_proto::{Turn, Winner};
use std::io::{self, Write};

const SEPARATOR: &str = "---";

/// Writes the turn report to any sink.
#[derive(Debug)]
pub struct TurnReporter<W: Write> {
    out: W,
}

impl<W: Write> TurnReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints one turn and flushes so progress shows while the next process runs.
    pub fn turn(&mut self, turn: &Turn) -> io::Result<()> {
        writeln!(self.out, "{}", turn.mv)?;
        writeln!(self.out, "{SEPARATOR}")?;
        writeln!(self.out, "{}", turn.state)?;
        writeln!(self.out, "{SEPARATOR}")?;
        self.out.flush()
    }

    /// Prints the final announcement.
    pub fn winner(&mut self, winner: Winner) -> io::Result<()> {
        writeln!(self.out, "Player {winner} wins!")?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
