//! Body physics: weapon rotation, movement, wall bounces and body collisions

use super::combatant::CombatantState;
use super::events::WallSide;
use super::fixed::{length_sq, per_mille, to_fixed, PER_MILLE};

/// Arena limits in the scaled integer domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaBounds {
    pub width: i64,
    pub height: i64,
    /// Velocity retained after a wall bounce (per-mille)
    pub wall_restitution: i64,
}

impl ArenaBounds {
    pub fn new(w: f64, h: f64, wall_restitution: i64, scale: i64) -> Self {
        Self {
            width: to_fixed(w, scale),
            height: to_fixed(h, scale),
            wall_restitution,
        }
    }
}

/// Physics system for updating combatant bodies
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Advance the weapon angle, wrapping at a full turn
    pub fn rotate_weapon(body: &mut CombatantState) {
        body.angle = body.angle.wrapping_add(body.angular_speed);
    }

    /// Move the body by its velocity scaled by the weapon's speed multiplier
    pub fn translate(body: &mut CombatantState) {
        body.x += per_mille(body.vel_x, body.speed_multiplier);
        body.y += per_mille(body.vel_y, body.speed_multiplier);
    }

    /// Bounce off walls, x axis first, then y against the updated position.
    /// Returns the breached side per axis.
    pub fn reflect_walls(body: &mut CombatantState, bounds: &ArenaBounds) -> [Option<WallSide>; 2] {
        let x_side = reflect_axis(
            &mut body.x,
            &mut body.vel_x,
            body.radius,
            bounds.width,
            bounds.wall_restitution,
            (WallSide::Left, WallSide::Right),
        );
        let y_side = reflect_axis(
            &mut body.y,
            &mut body.vel_y,
            body.radius,
            bounds.height,
            bounds.wall_restitution,
            (WallSide::Top, WallSide::Bottom),
        );
        [x_side, y_side]
    }

    /// Resolve an overlap between two live bodies.
    ///
    /// Both bodies have unit inverse mass. The impulse uses the lower of the
    /// two restitutions and is applied on every contact, whichever way the
    /// bodies are moving; then each body is pushed back half the overlap
    /// along the contact normal. Returns true when the bodies touched.
    ///
    /// Squared distances are exact `i128`. The normal is
    /// `(dx, dy) * (1.0 / sqrt(dist_sq as f64))` in IEEE-754 double
    /// precision; every other intermediate is rounded back to an integer
    /// with `f64::round` (ties away from zero).
    pub fn collide(a: &mut CombatantState, b: &mut CombatantState) -> bool {
        if !a.alive || !b.alive {
            return false;
        }

        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let dist_sq = length_sq(dx, dy);
        if dist_sq == 0 {
            return false;
        }

        let combined_radius = a.radius as i128 + b.radius as i128;
        if dist_sq > combined_radius * combined_radius {
            return false;
        }

        let inv_dist = 1.0 / (dist_sq as f64).sqrt();
        let nx = dx as f64 * inv_dist;
        let ny = dy as f64 * inv_dist;

        let rel_vx = (b.vel_x - a.vel_x) as f64;
        let rel_vy = (b.vel_y - a.vel_y) as f64;
        let vel_along_normal = rel_vx * nx + rel_vy * ny;

        let restitution = a.restitution.min(b.restitution) as f64 / PER_MILLE as f64;
        let impulse = -(1.0 + restitution) * vel_along_normal / 2.0;
        let ix = (impulse * nx).round() as i64;
        let iy = (impulse * ny).round() as i64;
        a.vel_x -= ix;
        a.vel_y -= iy;
        b.vel_x += ix;
        b.vel_y += iy;

        let dist = dist_sq as f64 * inv_dist;
        let push = (combined_radius as f64 - dist) / 2.0;
        let px = (nx * push).round() as i64;
        let py = (ny * push).round() as i64;
        a.x -= px;
        a.y -= py;
        b.x += px;
        b.y += py;

        true
    }
}

fn reflect_axis(
    pos: &mut i64,
    vel: &mut i64,
    radius: i64,
    limit: i64,
    restitution: i64,
    (low_side, high_side): (WallSide, WallSide),
) -> Option<WallSide> {
    let side = if *pos - radius < 0 {
        *pos = radius;
        low_side
    } else if *pos + radius > limit {
        *pos = limit - radius;
        high_side
    } else {
        return None;
    };

    *vel = per_mille(-*vel, restitution);
    Some(side)
}
