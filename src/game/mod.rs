//! Duel simulation modules

pub mod combat;
pub mod combatant;
pub mod description;
pub mod events;
pub mod fixed;
pub mod r#match;
pub mod physics;
pub mod rng;

pub use combatant::CombatantState;
pub use description::{CombatantId, MatchDescription};
pub use events::{EventLog, MatchEvent, WallSide};
pub use r#match::{run_to_completion, DuelMatch, MatchError, MatchPhase};
