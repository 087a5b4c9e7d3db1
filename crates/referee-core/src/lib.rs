//! # referee-core
//!
//! Core orchestration functionality for the Referee game driver.
//!
//! This crate provides:
//! - The turn loop that alternates between the player and the judge
//! - Configuration loading and validation
//! - Framing of collaborator input and parsing of judge output
//! - The stdout turn report
//! - Scripted participants for deterministic tests

mod config;
mod framing;
mod game_driver;
mod initial_state;
mod reporter;
pub mod testing;
mod verdict_parser;

pub use config::{ConfigError, ConfigWarning, ParticipantConfig, RefereeConfig};
pub use framing::{judge_input, player_input, BLANK_LINE};
pub use game_driver::{DriverConfig, GameDriver, Outcome, TerminationReason};
pub use initial_state::read_initial_state;
pub use reporter::TurnReporter;
pub use verdict_parser::parse_verdict;
