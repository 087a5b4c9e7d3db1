//! # referee-adapters
//!
//! Process adapters for the Referee game driver.
//!
//! The player and the judge are external executables. Every call spawns a
//! fresh child, writes the framed input to its stdin, closes stdin, reads
//! stdout to the end, and reaps the child. Nothing is kept between calls.
//!
//! - `ProcessBackend` describes what to launch.
//! - `ProcessExecutor` runs one exchange, with an optional timeout.
//! - `ProcessParticipant` plugs an executor into the turn loop.

mod process_backend;
mod process_executor;
mod process_participant;

pub use process_backend::ProcessBackend;
pub use process_executor::{ExchangeResult, ExecError, ProcessExecutor};
pub use process_participant::ProcessParticipant;
