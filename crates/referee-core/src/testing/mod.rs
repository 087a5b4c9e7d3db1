//! Testing utilities for deterministic game loops.

pub mod scripted_participant;

pub use scripted_participant::ScriptedParticipant;
