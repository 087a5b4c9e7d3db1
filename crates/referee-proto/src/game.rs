//! Opaque values exchanged between the driver and its collaborators.
//!
//! The driver never looks inside a game state or a move. Both are plain text
//! with surrounding whitespace removed on construction, so whatever is shown
//! on screen is exactly what the next process receives.

use std::fmt;
use std::io::{self, Read};
use std::num::ParseIntError;
use std::str::FromStr;

/// Game state as produced by the initial file or the judge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState(String);

impl GameState {
    /// Creates a game state, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Reads an entire source and trims it into a game state.
    ///
    /// Fails with `InvalidData` when the content is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::new(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A move proposed by the player process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Move(String);

impl Move {
    /// Creates a move from raw player output, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the winning player, as reported by the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Winner(pub i64);

impl Winner {
    pub fn id(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Winner {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Winner)
    }
}
