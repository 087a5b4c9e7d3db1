//! # referee-proto
//!
//! Shared types, error definitions, and traits for the Referee game driver.
//!
//! This crate provides the foundational abstractions used across all Referee crates,
//! including:
//! - Opaque game values (`GameState`, `Move`, `Winner`)
//! - The judge's `Verdict` and the per-turn `Turn` record
//! - The `Participant` trait implemented by real processes and test fakes
//! - Common error types

mod error;
mod game;
mod participant;
mod verdict;

pub use error::{Error, Result};
pub use game::{GameState, Move, Winner};
pub use participant::{Participant, Role};
pub use verdict::{Turn, Verdict};
