#![allow(dead_code)]

use std::collections::BTreeMap;

use arena_duel::game::description::{
    ArenaSpec, CombatantSpec, Combatants, Point, SimSettings, WeaponDefinition,
};
use arena_duel::game::MatchDescription;

pub fn weapon(reach: f64, tip_radius: f64, base_damage: i64, ramp: i64) -> WeaponDefinition {
    WeaponDefinition {
        reach,
        tip_radius,
        angular_speed: 0,
        base_damage,
        ramp,
        speed_multiplier: 1000,
    }
}

/// Weapon that can never reach anything but its own body center
pub fn unarmed() -> WeaponDefinition {
    weapon(0.0, 0.0, 0, 0)
}

pub fn fighter(hp: i64, radius: f64, pos: (f64, f64), vel: (f64, f64), weapon: &str) -> CombatantSpec {
    CombatantSpec {
        hp,
        radius,
        pos: Point { x: pos.0, y: pos.1 },
        vel: Point { x: vel.0, y: vel.1 },
        weapon: weapon.to_string(),
        restitution: None,
    }
}

pub fn description(
    seed: u32,
    scale: u32,
    max_ticks: u64,
    weapons: Vec<(&str, WeaponDefinition)>,
    a: CombatantSpec,
    b: CombatantSpec,
) -> MatchDescription {
    MatchDescription {
        seed,
        weapon_set_version: None,
        sim: SimSettings { scale, max_ticks },
        arena: ArenaSpec {
            w: 1000.0,
            h: 1000.0,
            wall_restitution: 1000,
        },
        weapons: weapons
            .into_iter()
            .map(|(id, w)| (id.to_string(), w))
            .collect::<BTreeMap<_, _>>(),
        combatants: Combatants { a, b },
    }
}
