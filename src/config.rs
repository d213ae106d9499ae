//! Camera tuning loaded from a TOML file, with environment overrides.
//!
//! Runtime input is never an error in this crate, but the configuration
//! boundary is: an unreadable or malformed file surfaces as a
//! [`ConfigError`] so the caller can decide between failing fast and falling
//! back to [`SmoothCamConfig::default`]. Every field is optional; missing
//! values resolve to the built-in defaults of the settings they feed.
//!
//! ```toml
//! [rotation]
//! camera_speed = 12.0
//! max_angle = [45.0, 15.0, 10.0]
//!
//! [pan]
//! bounds_size = [40.0, 80.0]
//! smoothness = 0.25
//! ```

use std::path::Path;

use bevy::log::warn;
use bevy::math::{Vec2, Vec3};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::pan::{PanCam, PanPlane};
use crate::parse::{parse_bool, parse_f32, parse_or, parse_vec2, parse_vec3};
use crate::processing::{TriAxisExclusion, TriAxisSensitivity};
use crate::rotation::{GyroRotationSettings, MouseRotationSettings, RotationSettings};

/// The reasons loading a camera config can fail.
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    /// The config file could not be read.
    #[display(fmt = "failed to read camera config: {}", source)]
    Io {
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`SmoothCamConfig`].
    #[display(fmt = "failed to parse camera config: {}", source)]
    Parse {
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}

/// Camera tuning as it appears on disk.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothCamConfig {
    /// Tuning for the rotation behaviors.
    pub rotation: RotationConfig,

    /// Tuning for the pan behavior.
    pub pan: PanConfig,
}

/// The `[rotation]` table of a camera config.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Overrides [`RotationSettings::smooth_speed`].
    pub smooth_speed: Option<f32>,

    /// Overrides [`RotationSettings::max_angle`], as `[yaw, pitch, roll]`.
    pub max_angle: Option<[f32; 3]>,

    /// Overrides [`RotationSettings::invert`].
    pub invert: Option<bool>,

    /// Overrides [`RotationSettings::magnitude_scalar`].
    pub magnitude_scalar: Option<f32>,

    /// Overrides [`GyroRotationSettings::camera_speed`].
    pub camera_speed: Option<f32>,

    /// Overrides the gyro noise gate with a uniform threshold.
    pub noise_threshold: Option<f32>,

    /// Overrides [`GyroRotationSettings::sensitivity`] per axis.
    pub sensitivity: Option<[f32; 3]>,
}

/// The `[pan]` table of a camera config.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// Overrides [`PanCam::bounds_size`].
    pub bounds_size: Option<[f32; 2]>,

    /// Overrides [`PanCam::corner_radius`].
    pub corner_radius: Option<f32>,

    /// Overrides [`PanCam::max_speed`].
    pub max_speed: Option<f32>,

    /// Overrides [`PanCam::smoothness`].
    pub smoothness: Option<f32>,

    /// Overrides [`PanCam::boundary_padding`].
    pub boundary_padding: Option<f32>,

    /// Overrides [`PanCam::drag_scale`].
    pub drag_scale: Option<f32>,

    /// Overrides [`PanCam::plane`]: `"xz"` or `"xy"`.
    pub plane: Option<String>,
}

impl SmoothCamConfig {
    /// Reads and parses a config file, then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like [`SmoothCamConfig::load`], but a missing or malformed file logs
    /// a warning and falls back to the defaults (with environment overrides
    /// still applied).
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    "using default camera tuning, {} not loaded: {error}",
                    path.as_ref().display()
                );
                let mut config = Self::default();
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Applies `SMOOTH_CAM_*` environment variables on top of the parsed
    /// values, for quick tuning without touching the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("SMOOTH_CAM_INVERT") {
            self.rotation.invert = Some(parse_bool(&raw, false));
        }
        if let Ok(raw) = std::env::var("SMOOTH_CAM_SPEED") {
            let default = GyroRotationSettings::default().camera_speed;
            self.rotation.camera_speed = Some(parse_f32(&raw, default));
        }
        if let Ok(raw) = std::env::var("SMOOTH_CAM_MAX_ANGLE") {
            let angle = parse_vec3(&raw);
            if angle != Vec3::ZERO {
                self.rotation.max_angle = Some(angle.to_array());
            }
        }
        if let Ok(raw) = std::env::var("SMOOTH_CAM_PAN_BOUNDS") {
            let bounds = parse_vec2(&raw);
            if bounds != Vec2::ZERO {
                self.pan.bounds_size = Some(bounds.to_array());
            }
        }
        if let Ok(raw) = std::env::var("SMOOTH_CAM_PAN_PLANE") {
            self.pan.plane = Some(raw);
        }
    }

    /// Resolves the gyro driver settings described by this config.
    pub fn gyro_settings(&self) -> GyroRotationSettings {
        let mut settings = GyroRotationSettings {
            common: self.rotation.common_settings(),
            ..GyroRotationSettings::default()
        };
        if let Some(camera_speed) = self.rotation.camera_speed {
            settings.camera_speed = camera_speed;
        }
        if let Some(threshold) = self.rotation.noise_threshold {
            settings.noise_gate = TriAxisExclusion::magnitude_all(threshold.max(0.0));
        }
        if let Some([x, y, z]) = self.rotation.sensitivity {
            settings.sensitivity = TriAxisSensitivity::new(x, y, z);
        }
        settings
    }

    /// Resolves the mouse driver settings described by this config.
    pub fn mouse_settings(&self) -> MouseRotationSettings {
        MouseRotationSettings {
            common: self.rotation.common_settings(),
        }
    }

    /// Resolves the pan camera described by this config.
    pub fn pan_cam(&self) -> PanCam {
        let mut cam = PanCam::default();
        if let Some([x, y]) = self.pan.bounds_size {
            cam.bounds_size = Vec2::new(x, y);
        }
        if let Some(corner_radius) = self.pan.corner_radius {
            cam.corner_radius = corner_radius;
        }
        if let Some(max_speed) = self.pan.max_speed {
            cam.max_speed = max_speed.clamp(0.0, 0.99);
        }
        if let Some(smoothness) = self.pan.smoothness {
            cam.smoothness = smoothness.clamp(0.0, 1.0);
        }
        if let Some(boundary_padding) = self.pan.boundary_padding {
            cam.boundary_padding = boundary_padding;
        }
        if let Some(drag_scale) = self.pan.drag_scale {
            cam.drag_scale = drag_scale;
        }
        if let Some(plane) = &self.pan.plane {
            cam.plane = parse_or(plane, PanPlane::default());
        }
        cam
    }
}

impl RotationConfig {
    fn common_settings(&self) -> RotationSettings {
        let mut settings = RotationSettings::default();
        if let Some(smooth_speed) = self.smooth_speed {
            settings.smooth_speed = smooth_speed;
        }
        if let Some([yaw, pitch, roll]) = self.max_angle {
            settings.max_angle = Vec3::new(yaw, pitch, roll);
        }
        if let Some(invert) = self.invert {
            settings.invert = invert;
        }
        if let Some(magnitude_scalar) = self.magnitude_scalar {
            settings.magnitude_scalar = magnitude_scalar;
        }
        settings
    }
}

impl std::str::FromStr for PanPlane {
    type Err = UnknownPanPlane;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "xz" => Ok(Self::Xz),
            "xy" => Ok(Self::Xy),
            _ => Err(UnknownPanPlane),
        }
    }
}

/// The string named no known pan plane.
#[derive(Debug, Clone, Copy, Display, Error, PartialEq, Eq)]
#[display(fmt = "expected \"xz\" or \"xy\"")]
pub struct UnknownPanPlane;
