//! Run summary produced once a match has finished

use serde::{Deserialize, Serialize};

use crate::game::{CombatantId, CombatantState, DuelMatch, MatchEvent};

use super::digest::{events_digest, inputs_digest, result_digest};

/// Final per-combatant figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub health: i64,
    pub hits: u64,
    pub damage_dealt: i64,
    pub alive: bool,
}

impl From<&CombatantState> for CombatantSummary {
    fn from(state: &CombatantState) -> Self {
        Self {
            id: state.id,
            health: state.health,
            hits: state.hits,
            damage_dealt: state.damage_dealt,
            alive: state.alive,
        }
    }
}

/// Everything an external verifier needs to check a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub seed: u32,
    pub weapon_set_version: String,
    pub ticks: u64,
    pub winner: CombatantId,
    pub combatants: Vec<CombatantSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<MatchEvent>,
    pub inputs_digest: String,
    pub events_digest: String,
    pub result_digest: String,
}

impl RunSummary {
    /// Summarize a finished match
    pub fn from_match(duel: &DuelMatch<'_>) -> Result<Self, SummaryError> {
        let winner = duel.winner().ok_or(SummaryError::NotFinished {
            tick: duel.tick(),
        })?;
        let description = duel.description();

        let inputs_digest = inputs_digest(description)?;
        let events_digest = events_digest(duel.events());
        let result_digest = result_digest(&inputs_digest, &events_digest, winner)?;

        Ok(Self {
            seed: description.seed,
            weapon_set_version: description.weapon_set_version().to_string(),
            ticks: duel.tick(),
            winner,
            combatants: [CombatantId::A, CombatantId::B]
                .into_iter()
                .map(|id| CombatantSummary::from(duel.combatant(id)))
                .collect(),
            events: duel.events().as_slice().to_vec(),
            inputs_digest,
            events_digest,
            result_digest,
        })
    }

    /// Drop the event list, keeping the digests that commit to it
    pub fn without_events(mut self) -> Self {
        self.events.clear();
        self
    }
}

/// Errors raised while summarizing a run
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Match is still running at tick {tick}")]
    NotFinished { tick: u64 },

    #[error("Failed to serialize canonical form: {0}")]
    Canonical(#[from] serde_json::Error),
}
