//! Combat system - weapon tips, hit detection, damage ramp

use super::combatant::CombatantState;
use super::fixed::{length_sq, polar_offset, saturate};
use super::rng::DuelRng;

/// Result of one landed weapon hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    pub damage: i64,
    pub target_killed: bool,
}

/// Combat system for resolving weapon contacts
pub struct CombatSystem;

impl CombatSystem {
    /// Weapon tip position of `attacker` in the scaled domain
    pub fn weapon_tip(attacker: &CombatantState) -> (i64, i64) {
        let (ox, oy) = polar_offset(attacker.reach, attacker.angle);
        (attacker.x + ox, attacker.y + oy)
    }

    /// Check whether the attacker's tip touches the target's body
    pub fn check_hit(attacker: &CombatantState, target: &CombatantState) -> bool {
        let (tip_x, tip_y) = Self::weapon_tip(attacker);
        let dx = tip_x - target.x;
        let dy = tip_y - target.y;
        let combined_radius = attacker.tip_radius as i128 + target.radius as i128;
        length_sq(dx, dy) <= combined_radius * combined_radius
    }

    /// Damage of the attacker's `hit_number`-th hit (1-based)
    pub fn calculate_damage(base_damage: i64, ramp: i64, hit_number: u64) -> i64 {
        let extra = ramp as i128 * (hit_number as i128 - 1);
        saturate(base_damage as i128 + extra)
    }

    /// Resolve one attack. Both combatants must be alive for a hit to land.
    ///
    /// On contact the attacker's hit count advances, the ramped damage is
    /// applied, and the target's velocity receives jitter from two draws of
    /// the shared stream, x first, each `round((draw - 0.5) * scale)`.
    pub fn resolve_attack(
        attacker: &mut CombatantState,
        target: &mut CombatantState,
        rng: &mut DuelRng,
        scale: i64,
    ) -> Option<HitResult> {
        if !attacker.alive || !target.alive || !Self::check_hit(attacker, target) {
            return None;
        }

        attacker.hits = attacker.hits.saturating_add(1);
        let damage = Self::calculate_damage(attacker.base_damage, attacker.ramp, attacker.hits);
        target.health = target.health.saturating_sub(damage);
        attacker.damage_dealt = attacker.damage_dealt.saturating_add(damage);

        let jitter_x = Self::jitter(rng, scale);
        let jitter_y = Self::jitter(rng, scale);
        target.vel_x += jitter_x;
        target.vel_y += jitter_y;

        let target_killed = target.health <= 0;
        if target_killed {
            target.alive = false;
        }

        Some(HitResult {
            damage,
            target_killed,
        })
    }

    fn jitter(rng: &mut DuelRng, scale: i64) -> i64 {
        ((rng.next_unit() - 0.5) * scale as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::description::CombatantId;

    fn fighter(id: CombatantId, x: i64, y: i64) -> CombatantState {
        CombatantState {
            id,
            health: 20,
            radius: 10,
            x,
            y,
            vel_x: 0,
            vel_y: 0,
            restitution: 1000,
            alive: true,
            angle: 0,
            angular_speed: 0,
            reach: 30,
            tip_radius: 5,
            base_damage: 4,
            ramp: 3,
            speed_multiplier: 1000,
            hits: 0,
            damage_dealt: 0,
        }
    }

    #[test]
    fn test_weapon_tip_follows_angle() {
        let mut a = fighter(CombatantId::A, 100, 100);
        assert_eq!(CombatSystem::weapon_tip(&a), (130, 100));
        a.angle = 16384;
        assert_eq!(CombatSystem::weapon_tip(&a), (100, 130));
        a.angle = 32768;
        assert_eq!(CombatSystem::weapon_tip(&a), (70, 100));
    }

    #[test]
    fn test_check_hit_boundary_is_inclusive() {
        let a = fighter(CombatantId::A, 100, 100);
        // tip at 130, reach of contact 15
        let touching = fighter(CombatantId::B, 145, 100);
        let clear = fighter(CombatantId::B, 146, 100);
        assert!(CombatSystem::check_hit(&a, &touching));
        assert!(!CombatSystem::check_hit(&a, &clear));
    }

    #[test]
    fn test_damage_ramp() {
        assert_eq!(CombatSystem::calculate_damage(4, 3, 1), 4);
        assert_eq!(CombatSystem::calculate_damage(4, 3, 2), 7);
        assert_eq!(CombatSystem::calculate_damage(4, 3, 5), 16);
        assert_eq!(CombatSystem::calculate_damage(9, 0, 40), 9);
    }

    #[test]
    fn test_damage_ramp_saturates() {
        assert_eq!(CombatSystem::calculate_damage(1, i64::MAX, 3), i64::MAX);
        assert_eq!(CombatSystem::calculate_damage(4, 3, 5_000_000_000), 15_000_000_001);
    }

    #[test]
    fn test_check_hit_at_large_scale() {
        let mut a = fighter(CombatantId::A, 0, 0);
        a.reach = 4_000_000_000;
        a.tip_radius = 1_000_000_000;
        let mut b = fighter(CombatantId::B, 9_000_000_000, 0);
        b.radius = 4_000_000_000;
        assert!(CombatSystem::check_hit(&a, &b));
        b.x += 1;
        assert!(!CombatSystem::check_hit(&a, &b));
    }

    #[test]
    fn test_resolve_attack_applies_ramped_damage() {
        let mut a = fighter(CombatantId::A, 100, 100);
        let mut b = fighter(CombatantId::B, 140, 100);
        b.health = 100;
        let mut rng = DuelRng::new(3);

        let first = CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, 1).unwrap();
        let second = CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, 1).unwrap();
        assert_eq!(first.damage, 4);
        assert_eq!(second.damage, 7);
        assert_eq!(a.hits, 2);
        assert_eq!(a.damage_dealt, 11);
        assert_eq!(b.health, 89);
        assert!(b.alive);
    }

    #[test]
    fn test_jitter_draws_two_values_in_order() {
        let mut a = fighter(CombatantId::A, 100, 100);
        let mut b = fighter(CombatantId::B, 140, 100);
        b.health = 100;
        let scale = 1000;
        let mut rng = DuelRng::new(11);
        let mut mirror = DuelRng::new(11);

        CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, scale).unwrap();
        let jx = ((mirror.next_unit() - 0.5) * scale as f64).round() as i64;
        let jy = ((mirror.next_unit() - 0.5) * scale as f64).round() as i64;
        assert_eq!((b.vel_x, b.vel_y), (jx, jy));
        assert!(jx.abs() <= scale / 2 && jy.abs() <= scale / 2);
        assert_eq!(rng, mirror);
    }

    #[test]
    fn test_exact_lethal_hit_kills() {
        let mut a = fighter(CombatantId::A, 100, 100);
        let mut b = fighter(CombatantId::B, 140, 100);
        b.health = 4;
        let mut rng = DuelRng::new(1);
        let hit = CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, 1).unwrap();
        assert!(hit.target_killed);
        assert_eq!(b.health, 0);
        assert!(!b.alive);
    }

    #[test]
    fn test_hit_count_passes_u32_range() {
        let mut a = fighter(CombatantId::A, 100, 100);
        let mut b = fighter(CombatantId::B, 140, 100);
        a.hits = u32::MAX as u64;
        let mut rng = DuelRng::new(5);
        let hit = CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, 1).unwrap();
        assert_eq!(a.hits, 1 << 32);
        assert_eq!(hit.damage, 4 + 3 * u32::MAX as i64);
        assert!(hit.target_killed);
    }

    #[test]
    fn test_no_hit_when_target_dead() {
        let mut a = fighter(CombatantId::A, 100, 100);
        let mut b = fighter(CombatantId::B, 140, 100);
        b.alive = false;
        let mut rng = DuelRng::new(1);
        let before = rng.clone();
        assert!(CombatSystem::resolve_attack(&mut a, &mut b, &mut rng, 1).is_none());
        assert_eq!(a.hits, 0);
        assert_eq!(rng, before);
    }
}
