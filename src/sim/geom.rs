//! Scalar and circle geometry helpers
//!
//! The hot collision path works on squared distances; an actual square root
//! only happens where a direction vector is needed (knockback, magnet pull).

use glam::Vec2;

/// Clamp a scalar to `[lo, hi]`
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Squared distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Strict circle-circle overlap test
///
/// Touching circles (distance exactly equal to the radius sum) do NOT
/// overlap; combat resolution relies on the strict inequality.
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let sum = r1 + r2;
    distance_squared(c1, c2) < sum * sum
}

/// Unit vector from `from` toward `to`, or zero when coincident
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        // Centers 6 apart, radii 3 + 3: boundary case is non-colliding
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(6.0, 0.0);
        assert!(!circles_overlap(a, 3.0, b, 3.0));
        // Any penetration flips it
        assert!(circles_overlap(a, 3.0, Vec2::new(5.9, 0.0), 3.0));
    }

    #[test]
    fn test_distance_squared() {
        let d2 = distance_squared(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
        assert!((d2 - 25.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            x1 in -500.0f32..500.0, y1 in -500.0f32..500.0,
            x2 in -500.0f32..500.0, y2 in -500.0f32..500.0,
            r1 in 0.1f32..50.0, r2 in 0.1f32..50.0,
        ) {
            let a = Vec2::new(x1, y1);
            let b = Vec2::new(x2, y2);
            prop_assert_eq!(
                circles_overlap(a, r1, b, r2),
                circles_overlap(b, r2, a, r1)
            );
        }
    }
}
