//! Gyroscope-driven camera rotation with a mouse-driven fallback.
//!
//! A [`RotationRig`] component turns a raw input signal into a bounded,
//! smoothed orientation for the entity it sits on. The signal comes from one
//! of two drivers: the device rotation rate published through the
//! [`GyroRotationRate`] resource, or the cursor's offset from the viewport
//! center for desktop use. Sampling happens in `Update`; the smoothed
//! orientation is written to the [`Transform`] in `PostUpdate`, before
//! transform propagation.

use bevy::input::mouse::MouseWheel;
use bevy::log::debug;
use bevy::math::{EulerRot, Quat, Vec2, Vec3, Vec3Swizzles};
use bevy::prelude::{
    Added, Component, EventReader, Query, Reflect, ReflectComponent, ReflectResource, Res,
    Resource, Transform, With,
};
use bevy::time::Time;
use bevy::window::{PrimaryWindow, Window, WindowFocused};
use serde::{Deserialize, Serialize};

use crate::curve::ResponseCurve;
use crate::math::{map_range, REFERENCE_FPS};
use crate::processing::{TriAxisBounds, TriAxisExclusion, TriAxisSensitivity};

/// The device rotation rate driving gyro rigs, in radians per second.
///
/// Bevy has no gyroscope input of its own, so a platform integration (or a
/// test) writes the bias-compensated angular velocity here every frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct GyroRotationRate {
    /// Bias-compensated angular velocity around the device's X, Y and Z axes.
    pub rate: Vec3,
}

/// Tuning shared by both rotation drivers.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Base smoothing speed toward the target orientation, per reference
    /// frame.
    pub smooth_speed: f32,

    /// Rotation limits in degrees: `x` bounds the yaw, `y` the pitch and `z`
    /// the roll.
    pub max_angle: Vec3,

    /// Flips the horizontal and vertical input directions.
    pub invert: bool,

    /// Scales the smoothing speed by the current input acceleration.
    pub damping: ResponseCurve,

    /// The raw input magnitude that counts as full acceleration.
    pub magnitude_scalar: f32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            smooth_speed: 0.133,
            max_angle: Vec3::new(60.0, 20.0, 15.0),
            invert: false,
            damping: ResponseCurve::default(),
            magnitude_scalar: 0.03,
        }
    }
}

impl RotationSettings {
    /// Folds the latest raw input magnitude into the rolling acceleration
    /// scalar the damping curve is evaluated against.
    fn update_acceleration(&self, state: &mut RotationState) {
        let average = 0.5 * (state.prev_magnitude + state.input_magnitude);
        state.acceleration =
            map_range(average, 0.0, self.magnitude_scalar, 0.0, 1.0).clamp(0.0, 1.0);
        state.prev_magnitude = state.input_magnitude;
    }

    /// Clamps an accumulated rotation against the configured limits.
    ///
    /// Pitch accumulates against the vertical limit and yaw against the
    /// horizontal one, hence the crossed pairing.
    fn clamp_to_max_angle(&self, accumulated: Vec3) -> Vec3 {
        Vec3::new(
            accumulated.x.clamp(-self.max_angle.y, self.max_angle.y),
            accumulated.y.clamp(-self.max_angle.x, self.max_angle.x),
            accumulated.z.clamp(-self.max_angle.z, self.max_angle.z),
        )
    }
}

/// Tuning for the gyroscope driver.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct GyroRotationSettings {
    /// Tuning shared with the mouse driver.
    pub common: RotationSettings,

    /// Overall speed multiplier applied on top of the per-axis sensitivity.
    pub camera_speed: f32,

    /// Gates out sensor jitter below a per-axis threshold.
    pub noise_gate: TriAxisExclusion,

    /// Per-axis responsiveness of the rotation rate.
    pub sensitivity: TriAxisSensitivity,
}

impl Default for GyroRotationSettings {
    fn default() -> Self {
        Self {
            common: RotationSettings::default(),
            camera_speed: 10.0,
            noise_gate: TriAxisExclusion::magnitude_all(0.05),
            sensitivity: TriAxisSensitivity::new(0.5, 1.0, 0.25),
        }
    }
}

impl GyroRotationSettings {
    /// Integrates one frame of rotation rate into the accumulated rotation
    /// and returns the clamped result, in degrees.
    ///
    /// The raw rate is noise-gated, optionally inverted, clamped to a unit
    /// range per axis and scaled by the frame-rate-normalized sensitivity
    /// before accumulating.
    pub fn integrate(&self, state: &mut RotationState, rate: Vec3, delta: f32) -> Vec3 {
        let mut rate = self.noise_gate.process(rate);
        if self.common.invert {
            rate = Vec3::new(-rate.x, -rate.y, rate.z);
        }
        let rate = TriAxisBounds::default().process(rate);

        // Rotation about the device's X axis maps to pitch applied from the
        // vertical sensitivity and vice versa, hence the swizzle.
        let scale =
            (self.sensitivity.sensitivities() * self.camera_speed * delta * REFERENCE_FPS).yxz();

        state.accumulated += rate * scale;
        state.accumulated = self.common.clamp_to_max_angle(state.accumulated);
        state.accumulated
    }
}

/// Tuning for the mouse fallback driver.
#[derive(Debug, Default, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MouseRotationSettings {
    /// Tuning shared with the gyroscope driver.
    pub common: RotationSettings,
}

impl MouseRotationSettings {
    /// Resolves the cursor sample into a target orientation in degrees.
    ///
    /// `cursor` is the cursor position in window coordinates paired with the
    /// window size; `None` (no window or no cursor) holds the previous
    /// target, as do samples outside the viewport.
    pub fn resolve(
        &self,
        state: &mut RotationState,
        cursor: Option<(Vec2, Vec2)>,
        scroll: f32,
    ) -> Vec3 {
        let Some((position, window_size)) = cursor else {
            state.input_magnitude = 0.0;
            return state.held_target;
        };

        // Window coordinates have a top-left origin; the viewport math wants
        // a bottom-left one, remapped to [-1, 1] around the center.
        let viewport = Vec2::new(
            position.x / window_size.x,
            1.0 - position.y / window_size.y,
        );
        let mut offset = viewport * 2.0 - Vec2::ONE;

        state.input_magnitude = (state.prev_cursor - offset).length();
        state.prev_cursor = offset;

        if self.common.invert {
            offset = -offset;
        }
        if offset.x.abs() > 1.0 || offset.y.abs() > 1.0 {
            return state.held_target;
        }

        let max_angle = self.common.max_angle;
        let yaw = max_angle.x * offset.x.abs() * offset.x.signum();
        let pitch = max_angle.y * offset.y.abs() * offset.y.signum();

        state.held_target = Vec3::new(-pitch, yaw, scroll.min(max_angle.z));
        state.held_target
    }
}

/// Which input signal drives a [`RotationRig`].
///
/// The original behavior pair was an inheritance hierarchy of input-settings
/// assets; a tagged variant covers it.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub enum RotationDriver {
    /// Rotate from the [`GyroRotationRate`] resource.
    Gyro(GyroRotationSettings),

    /// Rotate from the cursor's viewport offset.
    Mouse(MouseRotationSettings),
}

impl Default for RotationDriver {
    fn default() -> Self {
        Self::Gyro(GyroRotationSettings::default())
    }
}

/// Rolling per-rig input state, reset when the rig is (re)enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RotationState {
    /// Accumulated gyro rotation in degrees, kept within the max angles.
    pub accumulated: Vec3,

    /// The raw input magnitude of the previous frame.
    pub prev_magnitude: f32,

    /// The raw input magnitude of the current frame.
    pub input_magnitude: f32,

    /// The acceleration scalar the damping curve is evaluated against.
    pub acceleration: f32,

    /// The previous normalized cursor sample.
    pub prev_cursor: Vec2,

    /// The last resolved mouse target, held while the cursor is outside the
    /// viewport.
    pub held_target: Vec3,
}

/// Rotates its entity from gyroscope or mouse input, smoothed per frame.
#[derive(Component, Debug, Default, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct RotationRig {
    /// The input signal and its tuning.
    pub driver: RotationDriver,

    state: RotationState,
    target: Vec3,
    smoothed: Vec3,
}

impl RotationRig {
    /// Creates a rig with the given driver.
    pub fn new(driver: RotationDriver) -> Self {
        Self {
            driver,
            ..Self::default()
        }
    }

    /// The tuning shared by both drivers.
    pub fn settings(&self) -> &RotationSettings {
        match &self.driver {
            RotationDriver::Gyro(settings) => &settings.common,
            RotationDriver::Mouse(settings) => &settings.common,
        }
    }

    /// The target orientation in Euler degrees, as of the last sample.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// The smoothed orientation in Euler degrees.
    pub fn smoothed(&self) -> Vec3 {
        self.smoothed
    }

    /// The rolling input state.
    pub fn state(&self) -> &RotationState {
        &self.state
    }

    /// Clears all rolling state, the target and the smoothed orientation.
    pub fn reset(&mut self) {
        self.state = RotationState::default();
        self.target = Vec3::ZERO;
        self.smoothed = Vec3::ZERO;
    }

    /// Samples the active driver into a new target orientation.
    pub fn sample(
        &mut self,
        gyro_rate: Vec3,
        cursor: Option<(Vec2, Vec2)>,
        scroll: f32,
        delta: f32,
    ) {
        let Self {
            driver,
            state,
            target,
            ..
        } = self;
        match driver {
            RotationDriver::Gyro(settings) => {
                state.input_magnitude = gyro_rate.length();
                settings.common.update_acceleration(state);
                *target = settings.integrate(state, gyro_rate, delta);
            }
            RotationDriver::Mouse(settings) => {
                // The mouse magnitude is produced by the resolve itself, so
                // the acceleration sees the previous frame's value.
                settings.common.update_acceleration(state);
                *target = settings.resolve(state, cursor, scroll);
            }
        }
    }

    /// Moves the smoothed orientation toward the target and returns the
    /// resulting rotation.
    pub fn advance_smoothing(&mut self, delta: f32) -> Quat {
        let factor = self.smoothing_factor(delta);
        self.smoothed = self.smoothed.lerp(self.target, factor);
        self.rotation()
    }

    /// The smoothed orientation as a [`Quat`], composed the way the source
    /// engine applied Euler angles (yaw, then pitch, then roll).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.smoothed.y.to_radians(),
            self.smoothed.x.to_radians(),
            self.smoothed.z.to_radians(),
        )
    }

    /// The per-frame interpolation factor, damped by the acceleration curve
    /// and clamped so large frame deltas cannot overshoot the target.
    fn smoothing_factor(&self, delta: f32) -> f32 {
        let settings = self.settings();
        let damping = settings.damping.evaluate(self.state.acceleration);
        (settings.smooth_speed * delta * REFERENCE_FPS * damping).clamp(0.0, 1.0)
    }
}

/// Clears freshly added rigs so they start from an identity orientation.
pub fn init_rotation_rigs(
    mut rigs: Query<(&mut RotationRig, &mut Transform), Added<RotationRig>>,
) {
    for (mut rig, mut transform) in &mut rigs {
        rig.reset();
        transform.rotation = Quat::IDENTITY;
    }
}

/// Re-centers every rig when the window regains focus, matching the source
/// behavior of resetting after the app was backgrounded.
pub fn reset_rotation_on_focus(
    mut focus_events: EventReader<WindowFocused>,
    mut rigs: Query<(&mut RotationRig, &mut Transform)>,
) {
    if !focus_events.read().any(|event| event.focused) {
        return;
    }
    for (mut rig, mut transform) in &mut rigs {
        rig.reset();
        transform.rotation = Quat::IDENTITY;
        debug!("rotation rig re-centered after focus change");
    }
}

/// Samples every rig's driver into a fresh target orientation.
pub fn sample_rotation(
    mut rigs: Query<&mut RotationRig>,
    gyro: Res<GyroRotationRate>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut wheel: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let delta = time.delta_seconds();
    let scroll: f32 = wheel.read().map(|event| event.y).sum();
    let cursor = windows.get_single().ok().and_then(|window| {
        window
            .cursor_position()
            .map(|position| (position, Vec2::new(window.width(), window.height())))
    });

    for mut rig in &mut rigs {
        rig.sample(gyro.rate, cursor, scroll, delta);
    }
}

/// Smooths every rig toward its target and writes the entity's rotation.
pub fn apply_rotation(mut rigs: Query<(&mut RotationRig, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_seconds();
    for (mut rig, mut transform) in &mut rigs {
        transform.rotation = rig.advance_smoothing(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, approx_eq_vec3};

    const DT: f32 = 1.0 / REFERENCE_FPS;

    #[test]
    fn gyro_accumulates_and_clamps() {
        let settings = GyroRotationSettings::default();
        let mut state = RotationState::default();

        // A full-strength rate accumulates sensitivity * camera_speed degrees
        // per reference frame on each axis.
        let target = settings.integrate(&mut state, Vec3::new(1.0, 1.0, 0.0), DT);
        assert!(approx_eq_vec3(target, Vec3::new(10.0, 5.0, 0.0)));

        // Pitch saturates at the vertical limit, yaw at the horizontal one.
        for _ in 0..100 {
            settings.integrate(&mut state, Vec3::new(1.0, 1.0, 0.0), DT);
        }
        assert!(approx_eq_vec3(state.accumulated, Vec3::new(20.0, 60.0, 0.0)));
    }

    #[test]
    fn gyro_clamp_preserves_sign() {
        let settings = GyroRotationSettings::default();
        let mut state = RotationState::default();
        for _ in 0..100 {
            settings.integrate(&mut state, Vec3::new(-1.0, -1.0, -1.0), DT);
        }
        assert!(approx_eq_vec3(
            state.accumulated,
            Vec3::new(-20.0, -60.0, -15.0)
        ));
    }

    #[test]
    fn noise_below_the_gate_is_ignored() {
        let settings = GyroRotationSettings::default();
        let mut state = RotationState::default();
        let target = settings.integrate(&mut state, Vec3::splat(0.04), DT);
        assert_eq!(target, Vec3::ZERO);
    }

    #[test]
    fn rates_above_unit_are_normalized() {
        let settings = GyroRotationSettings::default();
        let mut fast = RotationState::default();
        let mut unit = RotationState::default();
        settings.integrate(&mut fast, Vec3::new(50.0, 0.0, 0.0), DT);
        settings.integrate(&mut unit, Vec3::new(1.0, 0.0, 0.0), DT);
        assert_eq!(fast.accumulated, unit.accumulated);
    }

    #[test]
    fn gyro_invert_flips_horizontal_and_vertical() {
        let mut settings = GyroRotationSettings::default();
        settings.common.invert = true;
        let mut state = RotationState::default();
        let target = settings.integrate(&mut state, Vec3::new(0.5, 0.5, 0.5), DT);
        assert!(target.x < 0.0);
        assert!(target.y < 0.0);
        assert!(target.z > 0.0);
    }

    #[test]
    fn acceleration_scalar_saturates() {
        let settings = RotationSettings::default();
        let mut state = RotationState {
            input_magnitude: 1.0,
            ..RotationState::default()
        };
        settings.update_acceleration(&mut state);
        assert_eq!(state.acceleration, 1.0);
        assert_eq!(state.prev_magnitude, 1.0);

        // A quiet signal decays the scalar toward zero.
        state.input_magnitude = 0.0;
        settings.update_acceleration(&mut state);
        state.input_magnitude = 0.0;
        settings.update_acceleration(&mut state);
        assert_eq!(state.acceleration, 0.0);
    }

    #[test]
    fn mouse_center_is_neutral() {
        let settings = MouseRotationSettings::default();
        let mut state = RotationState::default();
        let window = Vec2::new(800.0, 600.0);
        let target = settings.resolve(&mut state, Some((Vec2::new(400.0, 300.0), window)), 0.0);
        assert_eq!(target, Vec3::ZERO);
    }

    #[test]
    fn mouse_corner_reaches_the_limits() {
        let settings = MouseRotationSettings::default();
        let mut state = RotationState::default();
        let window = Vec2::new(800.0, 600.0);
        // Top-right corner of the window: full positive yaw and pitch input.
        let target = settings.resolve(&mut state, Some((Vec2::new(800.0, 0.0), window)), 0.0);
        assert!(approx_eq_vec3(target, Vec3::new(-20.0, 60.0, 0.0)));
    }

    #[test]
    fn mouse_holds_target_without_a_cursor() {
        let settings = MouseRotationSettings::default();
        let mut state = RotationState::default();
        let window = Vec2::new(800.0, 600.0);
        let held = settings.resolve(&mut state, Some((Vec2::new(600.0, 150.0), window)), 0.0);
        assert!(held != Vec3::ZERO);
        let target = settings.resolve(&mut state, None, 0.0);
        assert_eq!(target, held);
        assert_eq!(state.input_magnitude, 0.0);
    }

    #[test]
    fn mouse_invert_flips_the_target() {
        let window = Vec2::new(800.0, 600.0);
        let cursor = Some((Vec2::new(600.0, 150.0), window));

        let settings = MouseRotationSettings::default();
        let mut state = RotationState::default();
        let plain = settings.resolve(&mut state, cursor, 0.0);

        let mut inverted_settings = MouseRotationSettings::default();
        inverted_settings.common.invert = true;
        let mut state = RotationState::default();
        let inverted = inverted_settings.resolve(&mut state, cursor, 0.0);

        assert!(approx_eq(inverted.x, -plain.x));
        assert!(approx_eq(inverted.y, -plain.y));
    }

    #[test]
    fn mouse_magnitude_tracks_cursor_movement() {
        let settings = MouseRotationSettings::default();
        let mut state = RotationState::default();
        let window = Vec2::new(800.0, 600.0);
        settings.resolve(&mut state, Some((Vec2::new(400.0, 300.0), window)), 0.0);
        settings.resolve(&mut state, Some((Vec2::new(800.0, 300.0), window)), 0.0);
        // The cursor crossed half the window width: one full viewport unit.
        assert!(approx_eq(state.input_magnitude, 1.0));
    }

    #[test]
    fn smoothing_converges_on_the_target() {
        let mut rig = RotationRig::default();
        rig.sample(Vec3::new(1.0, 0.0, 0.0), None, 0.0, DT);
        let target = rig.target();
        assert!(target.x > 0.0);

        let mut previous_error = f32::INFINITY;
        for _ in 0..60 {
            rig.advance_smoothing(DT);
            let error = (rig.smoothed().x - target.x).abs();
            assert!(error <= previous_error);
            previous_error = error;
        }
        assert!(rig.smoothed().x > 0.0);
        assert!(rig.smoothed().x <= target.x + 1e-4);
    }

    #[test]
    fn huge_frame_delta_cannot_overshoot() {
        let mut rig = RotationRig::default();
        rig.sample(Vec3::new(1.0, 0.0, 0.0), None, 0.0, DT);
        let target = rig.target();
        rig.advance_smoothing(10.0);
        assert!(approx_eq_vec3(rig.smoothed(), target));
    }

    #[test]
    fn reset_clears_everything() {
        let mut rig = RotationRig::default();
        rig.sample(Vec3::ONE, None, 0.0, DT);
        rig.advance_smoothing(DT);
        rig.reset();
        assert_eq!(rig.target(), Vec3::ZERO);
        assert_eq!(rig.smoothed(), Vec3::ZERO);
        assert_eq!(rig.state().accumulated, Vec3::ZERO);
        assert_eq!(rig.rotation(), Quat::IDENTITY);
    }
}
