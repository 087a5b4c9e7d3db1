//! Loading the starting position.

use referee_proto::GameState;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads the whole file and trims it into the initial game state.
pub fn read_initial_state(path: impl AsRef<Path>) -> io::Result<GameState> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let state = GameState::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), bytes = state.as_str().len(), "Initial game state loaded");
    Ok(state)
}
