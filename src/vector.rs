//! 2D vector helpers.
//!
//! Positions, velocities and forces are plain [`glam::Vec2`] values. The
//! helpers here cover the few operations the halftone code spells out by name.

use glam::Vec2;

/// A 2D point or vector in surface space.
pub type Vector = Vec2;

/// Vector from `b` to `a` (`a - b`).
#[inline]
pub fn subtract(a: Vector, b: Vector) -> Vector {
    a - b
}

/// Rotate `point` about `center` by `angle` radians.
#[inline]
pub fn rotate_about(point: Vector, center: Vector, angle: f32) -> Vector {
    center + Vec2::from_angle(angle).rotate(point - center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_subtract_is_pure() {
        let a = Vector::new(3.0, 4.0);
        let b = Vector::new(1.0, 1.0);
        let d = subtract(a, b);

        assert_eq!(d, Vector::new(2.0, 3.0));
        assert_eq!(a, Vector::new(3.0, 4.0));
        assert!((d.length() - 13.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_about_center() {
        let rotated = rotate_about(Vector::new(2.0, 1.0), Vector::new(1.0, 1.0), FRAC_PI_2);
        assert!((rotated.x - 1.0).abs() < 1e-5);
        assert!((rotated.y - 2.0).abs() < 1e-5);
    }
}
