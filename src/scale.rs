//! Distance-driven sprite scaling.
//!
//! Entities tagged with [`DistanceScale`] grow as the [`ScaleReference`]
//! camera approaches them and settle back to their authored scale as it
//! moves away. Useful for map markers and buttons that should read clearly
//! near the focus point.

use bevy::math::Vec3;
use bevy::prelude::{
    Component, Query, Reflect, ReflectComponent, Transform, With, Without,
};
use serde::{Deserialize, Serialize};

use crate::math::smooth_step;

/// Marks the camera entity that [`DistanceScale`] entities measure against.
#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ScaleReference;

/// Scales its entity by its planar distance to the [`ScaleReference`].
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct DistanceScale {
    /// Multiplier applied to the authored scale when the reference is on top
    /// of the entity.
    pub sprite_scale: f32,

    /// Distance at which the entity has settled back to its authored scale.
    pub scale_distance: f32,

    base_scale: Option<f32>,
}

impl Default for DistanceScale {
    fn default() -> Self {
        Self {
            sprite_scale: 1.5,
            scale_distance: 2.5,
            base_scale: None,
        }
    }
}

impl DistanceScale {
    /// The uniform scale for a given planar distance to the reference.
    ///
    /// The authored scale is captured from the first `current_scale` seen, so
    /// the curve stays anchored to it even as the entity is rescaled.
    pub fn scale_at(&mut self, distance: f32, current_scale: f32) -> Vec3 {
        let base = *self.base_scale.get_or_insert(current_scale);
        let near = Vec3::splat(base * self.sprite_scale);
        let far = Vec3::splat(base);
        let t = smooth_step(0.0, 1.0, distance / self.scale_distance);
        near.lerp(far, t)
    }
}

/// Rescales every [`DistanceScale`] entity from its distance to the
/// reference camera. Without a reference the scales are left alone.
pub fn update_distance_scale(
    references: Query<&Transform, With<ScaleReference>>,
    mut entities: Query<(&mut DistanceScale, &mut Transform), Without<ScaleReference>>,
) {
    let Ok(reference) = references.get_single() else {
        return;
    };
    let reference_pos = reference.translation.truncate();

    for (mut scale, mut transform) in &mut entities {
        let distance = reference_pos.distance(transform.translation.truncate());
        transform.scale = scale.scale_at(distance, transform.scale.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn near_entities_are_enlarged() {
        let mut scale = DistanceScale::default();
        let result = scale.scale_at(0.0, 1.0);
        assert_eq!(result, Vec3::splat(1.5));
    }

    #[test]
    fn far_entities_keep_their_authored_scale() {
        let mut scale = DistanceScale::default();
        let result = scale.scale_at(10.0, 2.0);
        assert_eq!(result, Vec3::splat(2.0));
    }

    #[test]
    fn scaling_eases_in_between() {
        let mut scale = DistanceScale::default();
        let result = scale.scale_at(1.25, 1.0);
        assert!(approx_eq(result.x, 1.25));
        assert!(result.x < 1.5);
        assert!(result.x > 1.0);
    }

    #[test]
    fn base_scale_is_captured_once() {
        let mut scale = DistanceScale::default();
        let near = scale.scale_at(0.0, 1.0);
        assert_eq!(near, Vec3::splat(1.5));
        // The enlarged scale from the previous frame is not re-captured.
        let far = scale.scale_at(10.0, near.x);
        assert_eq!(far, Vec3::splat(1.0));
    }
}
