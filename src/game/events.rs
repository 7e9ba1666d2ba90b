//! Match events and the append-only event log

use serde::{Deserialize, Serialize};

use super::description::CombatantId;

/// Delimiter between fields of a canonical event line
pub const FIELD_DELIMITER: char = '|';

/// Arena wall breached by a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl WallSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Discrete occurrences recorded during a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Body bounced off an arena wall
    Wall {
        tick: u64,
        combatant: CombatantId,
        side: WallSide,
    },

    /// Bodies overlapped and were pushed apart
    Collide {
        tick: u64,
        a: CombatantId,
        b: CombatantId,
    },

    /// Weapon tip touched the opponent
    Hit {
        tick: u64,
        from: CombatantId,
        to: CombatantId,
        damage: i64,
    },

    /// Health reached zero or below
    Dead { tick: u64, combatant: CombatantId },

    /// Tick ceiling reached, winner chosen by tie-break
    Timeout { tick: u64, winner: CombatantId },
}

impl MatchEvent {
    pub fn tick(&self) -> u64 {
        match self {
            Self::Wall { tick, .. }
            | Self::Collide { tick, .. }
            | Self::Hit { tick, .. }
            | Self::Dead { tick, .. }
            | Self::Timeout { tick, .. } => *tick,
        }
    }

    /// Canonical single-line rendering, e.g. `12|hit|A|B|7`
    pub fn canonical_line(&self) -> String {
        let d = FIELD_DELIMITER;
        match self {
            Self::Hit {
                tick,
                from,
                to,
                damage,
            } => format!("{tick}{d}hit{d}{from}{d}{to}{d}{damage}"),
            Self::Dead { tick, combatant } => format!("{tick}{d}dead{d}{combatant}"),
            Self::Wall {
                tick,
                combatant,
                side,
            } => format!("{tick}{d}wall{d}{combatant}{d}{}", side.as_str()),
            Self::Collide { tick, a, b } => format!("{tick}{d}collide{d}{a}{d}{b}"),
            Self::Timeout { tick, winner } => format!("{tick}{d}timeout{d}{winner}"),
        }
    }
}

/// Append-only, emission-ordered record of match events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Events appended at or after `cursor`
    pub fn since(&self, cursor: usize) -> &[MatchEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    /// Canonical text: one line per event, newline separated, no trailing newline
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&event.canonical_line());
        }
        out
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a MatchEvent;
    type IntoIter = std::slice::Iter<'a, MatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
