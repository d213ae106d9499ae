//! Contains main plugin exported by this crate.

use bevy::app::{App, Plugin, PostUpdate, Update};
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::touch::Touches;
use bevy::input::ButtonInput;
use bevy::prelude::{
    IntoSystemConfigs, IntoSystemSetConfigs, MouseButton, Reflect, ReflectResource, Res, Resource,
    SystemSet,
};
use bevy::time::Time;
use bevy::transform::TransformSystem;
use bevy::window::WindowFocused;

use crate::curve::ResponseCurve;
use crate::pan::{self, PanCam};
use crate::processing::{TriAxisBounds, TriAxisExclusion, TriAxisSensitivity};
use crate::rotation::{self, GyroRotationRate, RotationRig};
use crate::scale::{self, DistanceScale, ScaleReference};

/// A [`Plugin`] that smooths raw input signals into camera motion every
/// frame.
///
/// Adding the plugin wires up all three behaviors; an app opts into each one
/// by inserting its component:
/// - [`RotationRig`] rotates an entity from gyroscope or mouse input,
/// - [`PanCam`] pans an entity from drag input inside an elastic boundary,
/// - [`DistanceScale`] scales an entity by its distance to the
///   [`ScaleReference`] camera.
///
/// ## Systems
///
/// Input sampling runs during [`Update`] in [`SmoothCamSystem::Sample`];
/// smoothing and transform writes run during [`PostUpdate`] in
/// [`SmoothCamSystem::Apply`], before transform propagation. Both sets are
/// gated on the [`ToggleCameraControls`] resource, so flipping it pauses all
/// camera motion at once.
pub struct SmoothCamPlugin;

impl Plugin for SmoothCamPlugin {
    fn build(&self, app: &mut App) {
        // The window and input plugins normally register these, but headless
        // apps still need the readers and resources to resolve.
        app.add_event::<WindowFocused>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .init_resource::<Time>()
            .init_resource::<ToggleCameraControls>()
            .init_resource::<GyroRotationRate>();

        app.register_type::<ToggleCameraControls>()
            .register_type::<GyroRotationRate>()
            .register_type::<RotationRig>()
            .register_type::<PanCam>()
            .register_type::<DistanceScale>()
            .register_type::<ScaleReference>()
            .register_type::<ResponseCurve>()
            .register_type::<TriAxisExclusion>()
            .register_type::<TriAxisBounds>()
            .register_type::<TriAxisSensitivity>();

        app.configure_sets(
            PostUpdate,
            SmoothCamSystem::Apply.before(TransformSystem::TransformPropagate),
        );

        app.add_systems(
            Update,
            (
                (
                    rotation::init_rotation_rigs,
                    rotation::reset_rotation_on_focus,
                    rotation::sample_rotation,
                )
                    .chain(),
                (pan::init_pan_cams, pan::sample_pan).chain(),
            )
                .in_set(SmoothCamSystem::Sample)
                .run_if(camera_controls_enabled),
        )
        .add_systems(Update, scale::update_distance_scale)
        .add_systems(
            Update,
            pan::release_pan_drag.run_if(camera_controls_disabled),
        )
        .add_systems(
            PostUpdate,
            (rotation::apply_rotation, pan::apply_pan)
                .in_set(SmoothCamSystem::Apply)
                .run_if(camera_controls_enabled),
        );
    }
}

/// [`SystemSet`]s for the systems added by [`SmoothCamPlugin`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmoothCamSystem {
    /// Collects raw input into per-behavior targets during [`Update`].
    Sample,

    /// Smooths toward the targets and writes transforms during
    /// [`PostUpdate`], before transform propagation.
    Apply,
}

/// Controls whether the camera behaviors respond to input.
///
/// While disabled, sampling and transform writes are skipped and any held
/// pan drag is released, so re-enabling never resumes a stale drag.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct ToggleCameraControls {
    /// When false, the camera behaviors ignore user input.
    pub enabled: bool,
}

impl ToggleCameraControls {
    /// A [`ToggleCameraControls`] in enabled state.
    pub const ENABLED: Self = Self { enabled: true };

    /// A [`ToggleCameraControls`] in disabled state.
    pub const DISABLED: Self = Self { enabled: false };
}

impl Default for ToggleCameraControls {
    fn default() -> Self {
        Self::ENABLED
    }
}

/// Run condition that is active while the camera controls are enabled.
pub fn camera_controls_enabled(toggle: Res<ToggleCameraControls>) -> bool {
    toggle.enabled
}

/// Run condition that is active while the camera controls are disabled.
pub fn camera_controls_disabled(toggle: Res<ToggleCameraControls>) -> bool {
    !toggle.enabled
}
