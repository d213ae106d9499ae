//! Small [`Vec2`] extensions the camera behaviors and their callers use.
//!
//! Most of the vector utilities the behaviors need already exist on the
//! engine's math types (`abs`, `is_nan`, per-component `powf`, swizzles via
//! [`Vec3Swizzles`](bevy::math::Vec3Swizzles)); only the genuinely missing
//! pieces live here.

use bevy::math::Vec2;

/// Extension methods for [`Vec2`].
pub trait Vec2Ext {
    /// Rotates the vector counterclockwise by `degrees`.
    ///
    /// ```rust
    /// use bevy::math::Vec2;
    /// use bevy_smooth_cam::math::approx_eq_vec2;
    /// use bevy_smooth_cam::vector::Vec2Ext;
    ///
    /// let rotated = Vec2::X.rotated_deg(90.0);
    /// assert!(approx_eq_vec2(rotated, Vec2::Y));
    /// ```
    #[must_use]
    fn rotated_deg(self, degrees: f32) -> Vec2;

    /// Converts a `[0, 1]` viewport point into pixel coordinates anchored at
    /// the center of a screen of the given size.
    ///
    /// ```rust
    /// use bevy::math::Vec2;
    /// use bevy_smooth_cam::vector::Vec2Ext;
    ///
    /// let screen = Vec2::new(800.0, 600.0);
    /// assert_eq!(Vec2::splat(0.5).to_anchor_pos(screen), Vec2::ZERO);
    /// assert_eq!(Vec2::new(1.0, 0.0).to_anchor_pos(screen), Vec2::new(400.0, -300.0));
    /// ```
    #[must_use]
    fn to_anchor_pos(self, screen_size: Vec2) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotated_deg(self, degrees: f32) -> Vec2 {
        Vec2::from_angle(degrees.to_radians()).rotate(self)
    }

    #[inline]
    fn to_anchor_pos(self, screen_size: Vec2) -> Vec2 {
        self * screen_size - screen_size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq_vec2;

    #[test]
    fn rotation_is_counterclockwise() {
        assert!(approx_eq_vec2(Vec2::X.rotated_deg(90.0), Vec2::Y));
        assert!(approx_eq_vec2(Vec2::Y.rotated_deg(90.0), -Vec2::X));
        assert!(approx_eq_vec2(Vec2::X.rotated_deg(-90.0), -Vec2::Y));
    }

    #[test]
    fn full_turn_is_identity() {
        let v = Vec2::new(3.0, -4.0);
        assert!(approx_eq_vec2(v.rotated_deg(360.0), v));
    }

    #[test]
    fn anchor_pos_centers_the_viewport() {
        let screen = Vec2::new(1920.0, 1080.0);
        assert_eq!(Vec2::splat(0.5).to_anchor_pos(screen), Vec2::ZERO);
        assert_eq!(Vec2::ZERO.to_anchor_pos(screen), -screen * 0.5);
        assert_eq!(Vec2::ONE.to_anchor_pos(screen), screen * 0.5);
    }
}
