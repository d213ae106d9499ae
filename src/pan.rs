//! Smooth 2D drag panning with an elastic boundary.
//!
//! A [`PanCam`] component pans its entity across a plane while a drag is
//! held, smoothing the motion with a critically damped spring. The pannable
//! region is a rounded rectangle: inside it the camera moves freely, and the
//! further it is dragged past the edge, the harder it is pulled back toward
//! the center.

use bevy::input::mouse::MouseMotion;
use bevy::input::touch::Touches;
use bevy::input::ButtonInput;
use bevy::log::debug;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::{
    Added, Component, EventReader, MouseButton, Query, Reflect, ReflectComponent, Res, Transform,
};
use bevy::time::Time;
use serde::{Deserialize, Serialize};

use crate::curve::ResponseCurve;
use crate::math::{rounded_rect_distance, smooth_damp_vec2, REFERENCE_FPS};

/// The world plane a [`PanCam`] moves across.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum PanPlane {
    /// Pan across the ground plane, writing `(x, 0, y)`. The usual choice
    /// for a top-down map camera.
    #[default]
    Xz,

    /// Pan across the screen plane, writing `(x, y, 0)`. The usual choice
    /// for 2D cameras.
    Xy,
}

impl PanPlane {
    /// Lifts a pan position into world space.
    #[inline]
    #[must_use]
    pub fn to_world(self, position: Vec2) -> Vec3 {
        match self {
            Self::Xz => Vec3::new(position.x, 0.0, position.y),
            Self::Xy => Vec3::new(position.x, position.y, 0.0),
        }
    }

    /// Projects a world translation back onto the pan plane.
    #[inline]
    #[must_use]
    pub fn from_world(self, translation: Vec3) -> Vec2 {
        match self {
            Self::Xz => Vec2::new(translation.x, translation.z),
            Self::Xy => Vec2::new(translation.x, translation.y),
        }
    }
}

/// Pans its entity from drag input, with smoothing and an elastic boundary.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct PanCam {
    /// Full extent of the pannable rounded rectangle.
    pub bounds_size: Vec2,

    /// Corner radius of the pannable region.
    pub corner_radius: f32,

    /// Top pan speed in `0..1`; higher values make the camera keep up with
    /// the drag more eagerly.
    pub max_speed: f32,

    /// Interpolation factor applied to the position each frame, in `0..1`.
    pub smoothness: f32,

    /// How far past the boundary, in world units, the pull-back reaches full
    /// strength.
    pub boundary_padding: f32,

    /// Eases the pull-back strength over the boundary padding.
    pub bias_curve: ResponseCurve,

    /// Scale applied to raw pointer deltas before they become pan input.
    pub drag_scale: f32,

    /// The world plane the camera pans across.
    pub plane: PanPlane,

    raw_pos: Vec2,
    input_dir: Vec2,
    reset_dir: Vec2,
    input_velocity: Vec2,
    reset_velocity: Vec2,
    dist_to_bounds: f32,
    dragging: bool,
}

impl Default for PanCam {
    fn default() -> Self {
        Self {
            bounds_size: Vec2::new(30.0, 60.0),
            corner_radius: 3.0,
            max_speed: 0.2,
            smoothness: 0.33,
            boundary_padding: 50.0,
            bias_curve: ResponseCurve::ease_in_out(),
            drag_scale: 0.1,
            plane: PanPlane::default(),
            raw_pos: Vec2::ZERO,
            input_dir: Vec2::ZERO,
            reset_dir: Vec2::ZERO,
            input_velocity: Vec2::ZERO,
            reset_velocity: Vec2::ZERO,
            dist_to_bounds: 0.0,
            dragging: false,
        }
    }
}

impl PanCam {
    /// The camera's position on the pan plane.
    pub fn position(&self) -> Vec2 {
        self.raw_pos
    }

    /// Is a drag currently held?
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Signed distance from the last evaluated position to the boundary,
    /// negative inside it.
    pub fn distance_to_bounds(&self) -> f32 {
        self.dist_to_bounds
    }

    /// Teleports the camera: the position is set and all in-flight smoothing
    /// state is dropped.
    pub fn relocate(&mut self, position: Vec2) {
        self.raw_pos = position;
        self.input_dir = Vec2::ZERO;
        self.reset_dir = Vec2::ZERO;
        self.input_velocity = Vec2::ZERO;
        self.reset_velocity = Vec2::ZERO;
    }

    /// Begins or ends a drag.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Advances the pan by one frame of drag input.
    ///
    /// The drag direction and the pull back toward the center are each
    /// smooth-damped toward zero, then blended by how far past the boundary
    /// the camera sits.
    pub fn step(&mut self, drag: Vec2, delta: f32) {
        let reset = self.raw_pos.normalize_or_zero();
        let weight = self.boundary_influence(self.raw_pos - drag);
        let smooth_time = self.smooth_time(delta);

        self.input_dir = smooth_damp_vec2(
            self.input_dir + drag,
            Vec2::ZERO,
            &mut self.input_velocity,
            smooth_time,
            f32::INFINITY,
            delta,
        );
        self.reset_dir = smooth_damp_vec2(
            self.reset_dir + reset,
            Vec2::ZERO,
            &mut self.reset_velocity,
            smooth_time,
            f32::INFINITY,
            delta,
        );

        let direction = self.input_dir.lerp(self.reset_dir, weight);
        self.raw_pos = self
            .raw_pos
            .lerp(self.raw_pos - direction, self.smoothness);
    }

    /// How strongly the boundary pulls the camera back for a prospective
    /// position: zero inside the region, easing up to one over the padding
    /// distance outside it.
    pub fn boundary_influence(&mut self, position: Vec2) -> f32 {
        self.dist_to_bounds =
            rounded_rect_distance(position, self.bounds_size, self.corner_radius);
        let bias = (self.dist_to_bounds / self.boundary_padding).max(0.0);
        let eased = self.bias_curve.evaluate(bias);
        if eased < 0.01 {
            0.0
        } else {
            eased
        }
    }

    /// The spring smooth time for this frame, normalized to the reference
    /// frame rate and scaled by the configured top speed.
    fn smooth_time(&self, delta: f32) -> f32 {
        let frame_scale = delta * REFERENCE_FPS;
        frame_scale / ((1.0 - self.max_speed) * 60.0)
    }
}

/// Seeds freshly added pan cameras from their current translation.
pub fn init_pan_cams(mut cams: Query<(&mut PanCam, &Transform), Added<PanCam>>) {
    for (mut cam, transform) in &mut cams {
        let position = cam.plane.from_world(transform.translation);
        cam.relocate(position);
    }
}

/// Collects drag input and advances every pan camera.
pub fn sample_pan(
    mut cams: Query<&mut PanCam>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut motion: EventReader<MouseMotion>,
    time: Res<Time>,
) {
    let delta = time.delta_seconds();
    let mouse_delta: Vec2 = motion.read().map(|event| event.delta).sum();
    let touch_delta = touches.iter().next().map(|touch| touch.delta());

    let began =
        buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some();
    let ended =
        buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some();

    for mut cam in &mut cams {
        if began {
            cam.dragging = true;
        }
        if ended {
            cam.dragging = false;
        }

        let drag = if cam.dragging {
            // Pointer deltas have a screen-space, downward-positive Y.
            let raw = touch_delta.unwrap_or(mouse_delta);
            Vec2::new(raw.x, -raw.y) * cam.drag_scale
        } else {
            Vec2::ZERO
        };
        cam.step(drag, delta);
    }
}

/// Writes every pan camera's position to its translation.
pub fn apply_pan(mut cams: Query<(&PanCam, &mut Transform)>) {
    for (cam, mut transform) in &mut cams {
        transform.translation = cam.plane.to_world(cam.raw_pos);
    }
}

/// Releases any held drag while the camera controls are disabled, so the pan
/// does not resume mid-drag when they come back.
pub fn release_pan_drag(mut cams: Query<&mut PanCam>) {
    for mut cam in &mut cams {
        if cam.dragging {
            cam.dragging = false;
            debug!("pan drag released while controls are disabled");
        }
    }
}
