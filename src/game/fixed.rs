//! Fixed-point numeric model: scaling, rounding division and the angle table

use std::sync::OnceLock;

/// Number of discrete angle steps in a full turn
pub const ANGLE_STEPS: usize = 65536;

/// Multiplier applied to cosine/sine values stored in the angle table
pub const TRIG_ONE: i64 = 1_000_000;

/// Denominator for every per-mille quantity (restitution, speed multiplier)
pub const PER_MILLE: i64 = 1000;

static ANGLE_TABLE: OnceLock<Vec<(i32, i32)>> = OnceLock::new();

/// Convert a real-valued input into the scaled integer domain.
/// Ties round away from zero.
pub fn to_fixed(value: f64, scale: i64) -> i64 {
    (value * scale as f64).round() as i64
}

/// Integer division rounded to nearest, ties away from zero.
/// `den` must be positive. Works on the widened product and saturates the
/// quotient back into `i64`.
pub fn div_round(num: i128, den: i128) -> i64 {
    debug_assert!(den > 0);
    let quot = num / den;
    let rem = num % den;
    let rounded = if 2 * rem.abs() >= den {
        quot + num.signum()
    } else {
        quot
    };
    saturate(rounded)
}

/// Clamp a wide intermediate into the `i64` state domain
pub fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Squared length of `(dx, dy)`, exact for every `i64` pair
pub fn length_sq(dx: i64, dy: i64) -> i128 {
    let (dx, dy) = (dx as i128, dy as i128);
    dx * dx + dy * dy
}

/// Scale `value` by a per-mille factor, rounded to nearest
pub fn per_mille(value: i64, factor: i64) -> i64 {
    div_round(value as i128 * factor as i128, PER_MILLE as i128)
}

fn build_table() -> Vec<(i32, i32)> {
    (0..ANGLE_STEPS)
        .map(|step| {
            let theta = step as f64 * std::f64::consts::TAU / ANGLE_STEPS as f64;
            let cos = (theta.cos() * TRIG_ONE as f64).round() as i32;
            let sin = (theta.sin() * TRIG_ONE as f64).round() as i32;
            (cos, sin)
        })
        .collect()
}

/// Cosine and sine of a 16-bit angle, each multiplied by [`TRIG_ONE`].
/// The table is built on first use and never mutated afterwards.
pub fn unit_vector(angle: u16) -> (i64, i64) {
    let (cos, sin) = ANGLE_TABLE.get_or_init(build_table)[angle as usize];
    (cos as i64, sin as i64)
}

/// Offset of length `length` along `angle`, rounded per axis
pub fn polar_offset(length: i64, angle: u16) -> (i64, i64) {
    let (cos, sin) = unit_vector(angle);
    let one = TRIG_ONE as i128;
    (
        div_round(length as i128 * cos as i128, one),
        div_round(length as i128 * sin as i128, one),
    )
}

/// Map a uniform draw in [0,1) onto a 16-bit angle
pub fn angle_from_unit(value: f64) -> u16 {
    ((value * ANGLE_STEPS as f64).floor() as u64 % ANGLE_STEPS as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_ties_away_from_zero() {
        assert_eq!(div_round(5, 10), 1);
        assert_eq!(div_round(-5, 10), -1);
        assert_eq!(div_round(4, 10), 0);
        assert_eq!(div_round(-4, 10), 0);
        assert_eq!(div_round(15, 10), 2);
        assert_eq!(div_round(-15, 10), -2);
        assert_eq!(div_round(14, 10), 1);
        assert_eq!(div_round(0, 7), 0);
    }

    #[test]
    fn test_to_fixed_rounding() {
        assert_eq!(to_fixed(1.5, 1000), 1500);
        assert_eq!(to_fixed(0.0005, 1000), 1);
        assert_eq!(to_fixed(-0.0005, 1000), -1);
        assert_eq!(to_fixed(2.4, 1), 2);
    }

    #[test]
    fn test_per_mille() {
        assert_eq!(per_mille(1234, 1000), 1234);
        assert_eq!(per_mille(1000, 500), 500);
        assert_eq!(per_mille(-3, 500), -2);
    }

    #[test]
    fn test_angle_table_cardinal_points() {
        assert_eq!(unit_vector(0), (1_000_000, 0));
        assert_eq!(unit_vector(16384), (0, 1_000_000));
        assert_eq!(unit_vector(32768), (-1_000_000, 0));
        assert_eq!(unit_vector(49152), (0, -1_000_000));
    }

    #[test]
    fn test_angle_table_eighth_turn() {
        let (cos, sin) = unit_vector(8192);
        assert_eq!(cos, 707_107);
        assert_eq!(sin, 707_107);
    }

    #[test]
    fn test_polar_offset() {
        assert_eq!(polar_offset(40_000, 0), (40_000, 0));
        assert_eq!(polar_offset(40_000, 16384), (0, 40_000));
        assert_eq!(polar_offset(0, 12345), (0, 0));
    }

    #[test]
    fn test_polar_offset_long_arm() {
        // reach * 1e6 would not fit in i64
        let reach = 10_000_000_000_000;
        assert_eq!(polar_offset(reach, 0), (reach, 0));
        assert_eq!(polar_offset(reach, 32768), (-reach, 0));
    }

    #[test]
    fn test_length_sq_is_wide() {
        assert_eq!(length_sq(3, -4), 25);
        let d = 8_900_000_000;
        assert_eq!(length_sq(d, 0), 79_210_000_000_000_000_000);
        assert_eq!(length_sq(i64::MIN, 0), 1i128 << 126);
    }

    #[test]
    fn test_div_round_saturates() {
        assert_eq!(div_round(i128::MAX, 1), i64::MAX);
        assert_eq!(div_round(-(1i128 << 100), 3), i64::MIN);
        assert_eq!(per_mille(i64::MAX, 2000), i64::MAX);
    }

    #[test]
    fn test_angle_from_unit() {
        assert_eq!(angle_from_unit(0.0), 0);
        assert_eq!(angle_from_unit(0.5), 32768);
        assert_eq!(angle_from_unit(0.999_999_999), 65535);
    }
}
