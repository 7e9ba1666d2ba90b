//! Replay verification: digests and run summaries

pub mod digest;
pub mod summary;

pub use digest::{events_digest, inputs_digest, result_digest, sha256_hex};
pub use summary::{CombatantSummary, RunSummary};
