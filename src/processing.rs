//! Processors for three-axis input values.
//!
//! These condition a raw [`Vec3`] input sample before it is integrated:
//! gating out sensor noise, clamping to a valid range and applying per-axis
//! sensitivity.

use bevy::math::Vec3;
use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

/// Specifies a symmetric per-axis region in which input values are treated
/// as noise and zeroed, leaving values outside it untouched.
///
/// ```rust
/// use bevy::math::Vec3;
/// use bevy_smooth_cam::processing::TriAxisExclusion;
///
/// let exclusion = TriAxisExclusion::magnitude_all(0.05);
/// let processed = exclusion.process(Vec3::new(0.04, -0.2, -0.04));
/// assert_eq!(processed, Vec3::new(0.0, -0.2, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct TriAxisExclusion {
    /// The per-axis threshold below which a value's magnitude counts as noise.
    pub(crate) threshold: Vec3,
}

impl Default for TriAxisExclusion {
    /// Creates a [`TriAxisExclusion`] that ignores values within `0.05` of
    /// zero on every axis.
    #[inline]
    fn default() -> Self {
        Self::magnitude_all(0.05)
    }
}

impl TriAxisExclusion {
    /// Zero-size [`TriAxisExclusion`], leaving values as is.
    pub const ZERO: Self = Self {
        threshold: Vec3::ZERO,
    };

    /// Creates a [`TriAxisExclusion`] with a separate threshold per axis.
    ///
    /// # Requirements
    ///
    /// - `threshold` >= `0.0` on each axis.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    #[inline]
    pub fn magnitude(threshold: Vec3) -> Self {
        assert!(threshold.cmpge(Vec3::ZERO).all());
        Self { threshold }
    }

    /// Creates a [`TriAxisExclusion`] with the same threshold on every axis.
    ///
    /// # Requirements
    ///
    /// - `threshold` >= `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    #[inline]
    pub fn magnitude_all(threshold: f32) -> Self {
        Self::magnitude(Vec3::splat(threshold))
    }

    /// Returns the per-axis thresholds.
    #[must_use]
    #[inline]
    pub fn thresholds(&self) -> Vec3 {
        self.threshold
    }

    /// Zeroes each axis whose magnitude falls below its threshold.
    #[must_use]
    #[inline]
    pub fn process(&self, input_value: Vec3) -> Vec3 {
        Vec3::new(
            exclude(input_value.x, self.threshold.x),
            exclude(input_value.y, self.threshold.y),
            exclude(input_value.z, self.threshold.z),
        )
    }
}

#[inline]
fn exclude(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Specifies an acceptable per-axis min-max range for three-axis inputs,
/// keeping extreme samples from producing runaway motion.
///
/// ```rust
/// use bevy::math::Vec3;
/// use bevy_smooth_cam::processing::TriAxisBounds;
///
/// let bounds = TriAxisBounds::magnitude_all(1.0);
/// let processed = bounds.process(Vec3::new(2.5, -0.3, -8.0));
/// assert_eq!(processed, Vec3::new(1.0, -0.3, -1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct TriAxisBounds {
    /// The per-axis minimum of valid inputs.
    pub(crate) min: Vec3,

    /// The per-axis maximum of valid inputs.
    pub(crate) max: Vec3,
}

impl Default for TriAxisBounds {
    /// Creates a [`TriAxisBounds`] that restricts values to `[-1.0, 1.0]` on
    /// every axis.
    #[inline]
    fn default() -> Self {
        Self::magnitude_all(1.0)
    }
}

impl TriAxisBounds {
    /// Unlimited [`TriAxisBounds`].
    pub const FULL_RANGE: Self = Self {
        min: Vec3::splat(f32::MIN),
        max: Vec3::splat(f32::MAX),
    };

    /// Creates a [`TriAxisBounds`] restricting values to `[min, max]` per axis.
    ///
    /// # Requirements
    ///
    /// - `min` <= `max` on each axis.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Creates a [`TriAxisBounds`] restricting values to
    /// `[-threshold, threshold]` per axis.
    ///
    /// # Requirements
    ///
    /// - `threshold` >= `0.0` on each axis.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    #[inline]
    pub fn magnitude(threshold: Vec3) -> Self {
        Self::new(-threshold, threshold)
    }

    /// Creates a [`TriAxisBounds`] restricting values to
    /// `[-threshold, threshold]` on every axis.
    ///
    /// # Requirements
    ///
    /// - `threshold` >= `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if the requirements aren't met.
    #[inline]
    pub fn magnitude_all(threshold: f32) -> Self {
        Self::magnitude(Vec3::splat(threshold))
    }

    /// Returns the per-axis minimum and maximum bounds.
    #[must_use]
    #[inline]
    pub fn min_max(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    /// Is `input_value` within the bounds on every axis?
    #[must_use]
    #[inline]
    pub fn contains(&self, input_value: Vec3) -> bool {
        input_value.cmpge(self.min).all() && input_value.cmple(self.max).all()
    }

    /// Clamps `input_value` within the bounds.
    #[must_use]
    #[inline]
    pub fn process(&self, input_value: Vec3) -> Vec3 {
        input_value.clamp(self.min, self.max)
    }
}

/// Scales three-axis input values with a per-axis multiplier.
///
/// ```rust
/// use bevy::math::Vec3;
/// use bevy_smooth_cam::processing::TriAxisSensitivity;
///
/// let sensitivity = TriAxisSensitivity::new(0.5, 1.0, 0.25);
/// let processed = sensitivity.process(Vec3::new(2.0, 2.0, 2.0));
/// assert_eq!(processed, Vec3::new(1.0, 2.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct TriAxisSensitivity(pub(crate) Vec3);

impl Default for TriAxisSensitivity {
    /// Creates a [`TriAxisSensitivity`] that leaves every axis untouched.
    #[inline]
    fn default() -> Self {
        Self::all(1.0)
    }
}

impl TriAxisSensitivity {
    /// Creates a [`TriAxisSensitivity`] with a separate multiplier per axis.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Creates a [`TriAxisSensitivity`] with the same multiplier on every axis.
    #[inline]
    pub const fn all(sensitivity: f32) -> Self {
        Self(Vec3::splat(sensitivity))
    }

    /// Returns the per-axis multipliers.
    #[must_use]
    #[inline]
    pub fn sensitivities(&self) -> Vec3 {
        self.0
    }

    /// Multiplies `input_value` by the sensitivity vector.
    #[must_use]
    #[inline]
    pub fn process(&self, input_value: Vec3) -> Vec3 {
        self.0 * input_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_zeroes_noise_only() {
        let exclusion = TriAxisExclusion::magnitude(Vec3::new(0.1, 0.2, 0.0));
        assert_eq!(
            exclusion.process(Vec3::new(0.05, 0.05, 0.05)),
            Vec3::new(0.0, 0.0, 0.05)
        );
        assert_eq!(
            exclusion.process(Vec3::new(-0.5, -0.19, 0.0)),
            Vec3::new(-0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn zero_exclusion_is_identity() {
        let value = Vec3::new(0.001, -0.001, 0.0);
        assert_eq!(TriAxisExclusion::ZERO.process(value), value);
    }

    #[test]
    #[should_panic]
    fn exclusion_rejects_negative_thresholds() {
        let _ = TriAxisExclusion::magnitude(Vec3::new(-0.1, 0.0, 0.0));
    }

    #[test]
    fn bounds_never_exceeded() {
        let bounds = TriAxisBounds::magnitude_all(1.0);
        for i in -30..30 {
            let value = Vec3::splat(i as f32 * 0.1);
            let processed = bounds.process(value);
            assert!(bounds.contains(processed));
        }
    }

    #[test]
    fn bounds_preserve_sign() {
        let bounds = TriAxisBounds::magnitude_all(1.0);
        assert_eq!(
            bounds.process(Vec3::new(-3.0, 3.0, 0.5)),
            Vec3::new(-1.0, 1.0, 0.5)
        );
    }

    #[test]
    fn full_range_is_identity() {
        let value = Vec3::new(1e20, -1e20, 42.0);
        assert_eq!(TriAxisBounds::FULL_RANGE.process(value), value);
    }

    #[test]
    fn sensitivity_scales_per_axis() {
        let sensitivity = TriAxisSensitivity::new(2.0, -1.0, 0.0);
        assert_eq!(
            sensitivity.process(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.0, -1.0, 0.0)
        );
    }
}
