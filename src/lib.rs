//! Arena Duel - deterministic two-combatant simulator
//!
//! A match description (seed, arena, weapons, combatants) always produces
//! the same event log and winner, so a run can be replayed and its result
//! verified by digest.

pub mod config;
pub mod game;
pub mod verify;
