//! Match description: the immutable input of a duel and its canonical form

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag used in place of a missing `weaponSetVersion`
pub const DEFAULT_WEAPON_SET_VERSION: &str = "default";

/// Restitution applied when a combatant spec does not provide one (per-mille)
pub const DEFAULT_RESTITUTION: i64 = 1000;

/// Fixed identity of a combatant slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CombatantId {
    A,
    B,
}

impl CombatantId {
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Real-valued 2D point or vector as written in the description
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Simulation block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimSettings {
    /// Integer multiplier from real units into the fixed-point domain
    pub scale: u32,
    /// Tick ceiling after which the tie-break ladder decides the match
    pub max_ticks: u64,
}

/// Arena block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaSpec {
    pub w: f64,
    pub h: f64,
    /// Velocity retained after a wall bounce (per-mille)
    pub wall_restitution: i64,
}

/// Weapon stats, shared by reference from combatant specs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDefinition {
    /// Arm length from the body center to the tip
    pub reach: f64,
    /// Contact radius around the tip
    pub tip_radius: f64,
    /// Rotation per tick in 1/65536 turns
    pub angular_speed: u16,
    pub base_damage: i64,
    /// Extra damage per successive hit
    pub ramp: i64,
    /// Movement speed multiplier (per-mille)
    pub speed_multiplier: i64,
}

/// Starting conditions of one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSpec {
    pub hp: i64,
    pub radius: f64,
    pub pos: Point,
    pub vel: Point,
    /// Key into the description's weapon map
    pub weapon: String,
    /// Per-mille, defaults to [`DEFAULT_RESTITUTION`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restitution: Option<i64>,
}

/// The two combatant specs keyed by identity label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatants {
    #[serde(rename = "A")]
    pub a: CombatantSpec,
    #[serde(rename = "B")]
    pub b: CombatantSpec,
}

impl Combatants {
    pub fn get(&self, id: CombatantId) -> &CombatantSpec {
        match id {
            CombatantId::A => &self.a,
            CombatantId::B => &self.b,
        }
    }
}

/// Immutable input describing one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDescription {
    pub seed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_set_version: Option<String>,
    pub sim: SimSettings,
    pub arena: ArenaSpec,
    pub weapons: BTreeMap<String, WeaponDefinition>,
    pub combatants: Combatants,
}

/// Field-order-stable view serialized as the canonical input form
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalDescription<'a> {
    seed: u32,
    weapon_set_version: &'a str,
    sim: &'a SimSettings,
    arena: &'a ArenaSpec,
    weapons: &'a BTreeMap<String, WeaponDefinition>,
    combatants: &'a Combatants,
}

impl MatchDescription {
    /// Parse and validate a description from JSON text
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        let description: Self = serde_json::from_str(text)?;
        description.validate()?;
        Ok(description)
    }

    pub fn weapon_set_version(&self) -> &str {
        self.weapon_set_version
            .as_deref()
            .unwrap_or(DEFAULT_WEAPON_SET_VERSION)
    }

    /// Byte-exact canonical serialization digested for verification
    pub fn canonical_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&CanonicalDescription {
            seed: self.seed,
            weapon_set_version: self.weapon_set_version(),
            sim: &self.sim,
            arena: &self.arena,
            weapons: &self.weapons,
            combatants: &self.combatants,
        })
    }

    /// Reject descriptions that cannot be simulated sensibly.
    /// Weapon references are resolved later, when the match is built.
    pub fn validate(&self) -> Result<(), DescriptionError> {
        if self.sim.scale == 0 {
            return Err(DescriptionError::InvalidScale);
        }

        let arena = &self.arena;
        if !(arena.w.is_finite() && arena.h.is_finite() && arena.w > 0.0 && arena.h > 0.0) {
            return Err(DescriptionError::InvalidArena {
                w: arena.w,
                h: arena.h,
            });
        }

        for (id, weapon) in &self.weapons {
            if !(weapon.reach.is_finite() && weapon.tip_radius.is_finite()) {
                return Err(DescriptionError::NonFinite(format!("weapons.{id}")));
            }
            if weapon.base_damage < 0 {
                return Err(DescriptionError::NegativeDamage(id.clone()));
            }
            if weapon.ramp < 0 {
                return Err(DescriptionError::NegativeRamp(id.clone()));
            }
        }

        for id in [CombatantId::A, CombatantId::B] {
            let spec = self.combatants.get(id);
            let values = [spec.radius, spec.pos.x, spec.pos.y, spec.vel.x, spec.vel.y];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(DescriptionError::NonFinite(format!("combatants.{id}")));
            }
        }

        Ok(())
    }
}

/// Errors raised while loading a description
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("Failed to parse match description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sim.scale must be a positive integer")]
    InvalidScale,

    #[error("Arena dimensions must be positive and finite (w={w}, h={h})")]
    InvalidArena { w: f64, h: f64 },

    #[error("Non-finite value in {0}")]
    NonFinite(String),

    #[error("Weapon {0} has negative base damage")]
    NegativeDamage(String),

    #[error("Weapon {0} has a negative damage ramp")]
    NegativeRamp(String),
}
