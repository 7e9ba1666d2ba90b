//! Runtime combatant state

use super::description::{CombatantId, CombatantSpec, WeaponDefinition, DEFAULT_RESTITUTION};
use super::fixed::{angle_from_unit, to_fixed};
use super::rng::{DuelRng, JITTER_SEED_A, JITTER_SEED_B};

/// Mutable state of one combatant (authoritative, scaled integers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantState {
    pub id: CombatantId,

    // Body
    pub health: i64,
    pub radius: i64,
    pub x: i64,
    pub y: i64,
    pub vel_x: i64,
    pub vel_y: i64,
    pub restitution: i64,
    pub alive: bool,

    // Weapon
    pub angle: u16,
    pub angular_speed: u16,
    pub reach: i64,
    pub tip_radius: i64,
    pub base_damage: i64,
    pub ramp: i64,
    pub speed_multiplier: i64,

    // Stats
    pub hits: u64,
    pub damage_dealt: i64,
}

impl CombatantState {
    /// Build the starting state from a spec and its resolved weapon
    pub fn new(
        id: CombatantId,
        spec: &CombatantSpec,
        weapon: &WeaponDefinition,
        match_seed: u32,
        scale: i64,
    ) -> Self {
        let mut angle_rng = DuelRng::new(match_seed ^ jitter_seed(id));
        let angle = angle_from_unit(angle_rng.next_unit());

        Self {
            id,
            health: spec.hp,
            radius: to_fixed(spec.radius, scale),
            x: to_fixed(spec.pos.x, scale),
            y: to_fixed(spec.pos.y, scale),
            vel_x: to_fixed(spec.vel.x, scale),
            vel_y: to_fixed(spec.vel.y, scale),
            restitution: spec.restitution.unwrap_or(DEFAULT_RESTITUTION),
            alive: true,
            angle,
            angular_speed: weapon.angular_speed,
            reach: to_fixed(weapon.reach, scale),
            tip_radius: to_fixed(weapon.tip_radius, scale),
            base_damage: weapon.base_damage,
            ramp: weapon.ramp,
            speed_multiplier: weapon.speed_multiplier,
            hits: 0,
            damage_dealt: 0,
        }
    }
}

/// Per-slot stream constant for the initial weapon angle
pub fn jitter_seed(id: CombatantId) -> u32 {
    match id {
        CombatantId::A => JITTER_SEED_A,
        CombatantId::B => JITTER_SEED_B,
    }
}
