//! Response curves used to shape smoothing speeds and boundary easing.

use bevy::math::{FloatOrd, Vec2};
use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

use crate::math::{lerp, smooth_step};

/// Maps a normalized signal in `[0, 1]` to a response factor.
///
/// This is the tuning-curve companion to the camera settings: the rotation
/// behaviors evaluate one against the input acceleration to scale their
/// smoothing speed, and the pan behavior evaluates one against the distance
/// past its boundary to ease the pull-back.
///
/// Inputs outside `[0, 1]` are clamped before evaluation.
///
/// ```rust
/// use bevy_smooth_cam::curve::ResponseCurve;
///
/// let curve = ResponseCurve::Linear { from: 0.0, to: 2.0 };
/// assert_eq!(curve.evaluate(0.5), 1.0);
/// assert_eq!(curve.evaluate(7.0), 2.0);
///
/// // The default curve leaves speeds untouched.
/// assert_eq!(ResponseCurve::default().evaluate(0.3), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub enum ResponseCurve {
    /// The same factor for every input.
    Constant(f32),

    /// Linear ramp from `from` at 0 to `to` at 1.
    Linear {
        /// The factor at the start of the input range.
        from: f32,
        /// The factor at the end of the input range.
        to: f32,
    },

    /// Hermite-eased ramp from `from` at 0 to `to` at 1, flat at both ends.
    SmoothStep {
        /// The factor at the start of the input range.
        from: f32,
        /// The factor at the end of the input range.
        to: f32,
    },

    /// Piecewise-linear keyframes, each an `(input, factor)` pair.
    ///
    /// Inputs before the first keyframe or after the last take that
    /// keyframe's factor. An empty list evaluates to zero.
    Samples(Vec<Vec2>),
}

impl Default for ResponseCurve {
    /// Creates the identity curve: a constant factor of 1.
    #[inline]
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

impl ResponseCurve {
    /// An eased 0 to 1 ramp, the usual shape for boundary easing.
    #[inline]
    pub const fn ease_in_out() -> Self {
        Self::SmoothStep { from: 0.0, to: 1.0 }
    }

    /// Creates a [`ResponseCurve::Samples`] curve, sorting the keyframes by
    /// their input value.
    pub fn from_samples(mut points: Vec<Vec2>) -> Self {
        points.sort_by_key(|p| FloatOrd(p.x));
        Self::Samples(points)
    }

    /// Computes the response factor for `t`, clamping `t` to `[0, 1]`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Constant(factor) => *factor,
            Self::Linear { from, to } => lerp(*from, *to, t),
            Self::SmoothStep { from, to } => lerp(*from, *to, smooth_step(0.0, 1.0, t)),
            Self::Samples(points) => Self::evaluate_samples(points, t),
        }
    }

    fn evaluate_samples(points: &[Vec2], t: f32) -> f32 {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return 0.0;
        };
        if t <= first.x {
            return first.y;
        }
        if t >= last.x {
            return last.y;
        }
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.x {
                let span = b.x - a.x;
                if span <= f32::EPSILON {
                    return b.y;
                }
                return lerp(a.y, b.y, (t - a.x) / span);
            }
        }
        last.y
    }
}
