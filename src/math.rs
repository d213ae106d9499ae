//! Scalar and vector math helpers shared by the camera behaviors.

use bevy::math::{Vec2, Vec3};

/// The frame rate all smoothing speeds are tuned against.
///
/// Per-frame speeds are multiplied by `delta_seconds * REFERENCE_FPS`, so a
/// setting tuned at 30 FPS produces the same motion at any frame rate.
pub const REFERENCE_FPS: f32 = 30.0;

/// Linearly interpolates between `start` and `end` by `t`.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate.
///
/// ```rust
/// use bevy_smooth_cam::math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(2.0, 4.0, 2.0), 6.0);
/// ```
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// The `f64` counterpart of [`lerp`].
#[inline]
#[must_use]
pub fn lerp_f64(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Remaps `value` from the range `[in_start, in_end]` to `[out_start, out_end]`.
///
/// The result is not clamped; inputs outside the source range map outside the
/// target range.
///
/// ```rust
/// use bevy_smooth_cam::math::map_range;
///
/// assert_eq!(map_range(0.015, 0.0, 0.03, 0.0, 1.0), 0.5);
/// assert_eq!(map_range(5.0, 0.0, 10.0, 10.0, 20.0), 15.0);
/// ```
#[inline]
#[must_use]
pub fn map_range(value: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    out_start + (out_end - out_start) * ((value - in_start) / (in_end - in_start))
}

/// Hermite interpolation between 0 and 1 as `x` moves from `edge0` to `edge1`.
///
/// ```rust
/// use bevy_smooth_cam::math::smooth_step;
///
/// assert_eq!(smooth_step(0.0, 1.0, 0.0), 0.0);
/// assert_eq!(smooth_step(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smooth_step(0.0, 1.0, 1.0), 1.0);
/// ```
#[inline]
#[must_use]
pub fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Gradually moves `current` toward `target` with a critically damped spring.
///
/// `velocity` carries state between calls and must be zeroed when the motion
/// is reset. `smooth_time` is roughly the time to reach the target;
/// `max_speed` caps the approach speed (pass [`f32::INFINITY`] for no cap).
///
/// The output never crosses a stationary target.
#[must_use]
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta: f32,
) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * delta;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp the spring so it never swings past a stationary target.
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = 0.0;
    }
    output
}

/// The [`Vec2`] counterpart of [`smooth_damp`].
///
/// The approach speed cap applies to the vector's magnitude rather than each
/// component independently.
#[must_use]
pub fn smooth_damp_vec2(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    max_speed: f32,
    delta: f32,
) -> Vec2 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * delta;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp_length_max(max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (original_target - current).dot(output - original_target) > 0.0 {
        output = original_target;
        *velocity = Vec2::ZERO;
    }
    output
}

/// Signed distance from `point` to a rounded rectangle centered at the origin.
///
/// `size` is the full extent of the rectangle and `corner_radius` rounds its
/// corners. The distance is negative inside the boundary, zero on it and
/// positive outside.
///
/// ```rust
/// use bevy::math::Vec2;
/// use bevy_smooth_cam::math::rounded_rect_distance;
///
/// let size = Vec2::new(30.0, 60.0);
/// assert!(rounded_rect_distance(Vec2::ZERO, size, 3.0) < 0.0);
/// assert!(rounded_rect_distance(Vec2::new(40.0, 0.0), size, 3.0) > 0.0);
/// ```
#[must_use]
pub fn rounded_rect_distance(point: Vec2, size: Vec2, corner_radius: f32) -> f32 {
    let point = point.abs();
    let half_size = size * 0.5;
    let q = point - half_size + Vec2::splat(corner_radius);

    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - corner_radius
}

/// Scale-aware approximate float equality.
///
/// The tolerance grows with the magnitude of the operands, so values that are
/// large in absolute terms still compare equal after a few rounding errors.
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (b - a).abs() <= (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Component-wise [`approx_eq`] for [`Vec2`].
#[must_use]
pub fn approx_eq_vec2(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Component-wise [`approx_eq`] for [`Vec3`].
#[must_use]
pub fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_is_linear() {
        assert_eq!(map_range(0.0, 0.0, 1.0, 0.0, 10.0), 0.0);
        assert_eq!(map_range(1.0, 0.0, 1.0, 0.0, 10.0), 10.0);
        assert_eq!(map_range(0.25, 0.0, 1.0, 4.0, 8.0), 5.0);
        // Inverted output range.
        assert_eq!(map_range(0.25, 0.0, 1.0, 1.0, 0.0), 0.75);
    }

    #[test]
    fn smooth_step_clamps_outside_edges() {
        assert_eq!(smooth_step(0.0, 1.0, -5.0), 0.0);
        assert_eq!(smooth_step(0.0, 1.0, 5.0), 1.0);
        assert!(smooth_step(0.0, 1.0, 0.25) < 0.25);
        assert!(smooth_step(0.0, 1.0, 0.75) > 0.75);
    }

    #[test]
    fn smooth_damp_converges_without_crossing() {
        let mut velocity = 0.0;
        let mut current = 1.0_f32;
        for _ in 0..400 {
            current = smooth_damp(current, 0.0, &mut velocity, 0.1, f32::INFINITY, 1.0 / 60.0);
            assert!(current >= 0.0, "spring crossed the target: {current}");
        }
        assert!(current.abs() < 1e-3);
    }

    #[test]
    fn smooth_damp_respects_max_speed() {
        let mut velocity = 0.0;
        let before = 10.0_f32;
        let after = smooth_damp(before, 0.0, &mut velocity, 1.0, 0.5, 1.0 / 30.0);
        // With the change clamped to max_speed * smooth_time, the first step
        // can close at most that distance.
        assert!(before - after <= 0.5 + 1e-6);
    }

    #[test]
    fn smooth_damp_vec2_converges() {
        let mut velocity = Vec2::ZERO;
        let mut current = Vec2::new(3.0, -4.0);
        for _ in 0..400 {
            current = smooth_damp_vec2(
                current,
                Vec2::ZERO,
                &mut velocity,
                0.1,
                f32::INFINITY,
                1.0 / 60.0,
            );
        }
        assert!(current.length() < 1e-3);
    }

    #[test]
    fn rounded_rect_distance_signs() {
        let size = Vec2::new(30.0, 60.0);
        // Deep inside.
        assert!(rounded_rect_distance(Vec2::ZERO, size, 3.0) < 0.0);
        // On the flat right edge.
        assert!(approx_eq(
            rounded_rect_distance(Vec2::new(15.0, 0.0), size, 3.0),
            0.0
        ));
        // Straight out from the right edge.
        assert!(approx_eq(
            rounded_rect_distance(Vec2::new(20.0, 0.0), size, 3.0),
            5.0
        ));
        // Symmetric in all quadrants.
        assert_eq!(
            rounded_rect_distance(Vec2::new(20.0, 10.0), size, 3.0),
            rounded_rect_distance(Vec2::new(-20.0, -10.0), size, 3.0),
        );
    }

    #[test]
    fn approx_eq_scales_with_magnitude() {
        assert!(approx_eq(0.0, 0.0));
        assert!(approx_eq(1_000_000.0, 1_000_000.06));
        assert!(!approx_eq(1.0, 1.1));
        assert!(approx_eq(lerp(0.0, 0.3, 1.0 / 3.0), 0.1));
    }

    #[test]
    fn lerp_f64_matches_lerp() {
        assert_eq!(lerp_f64(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(0.0, 10.0, 0.25) as f64, lerp_f64(0.0, 10.0, 0.25));
    }
}
