#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod curve;
pub mod math;
pub mod pan;
pub mod parse;
pub mod plugin;
pub mod processing;
pub mod rotation;
pub mod scale;
pub mod vector;

/// Everything you need to get started
pub mod prelude {
    pub use crate::config::SmoothCamConfig;
    pub use crate::curve::ResponseCurve;
    pub use crate::pan::{PanCam, PanPlane};
    pub use crate::plugin::{SmoothCamPlugin, SmoothCamSystem, ToggleCameraControls};
    pub use crate::processing::{TriAxisBounds, TriAxisExclusion, TriAxisSensitivity};
    pub use crate::rotation::{
        GyroRotationRate, GyroRotationSettings, MouseRotationSettings, RotationDriver,
        RotationRig, RotationSettings,
    };
    pub use crate::scale::{DistanceScale, ScaleReference};
}
