//! Errors raised while loading or validating a scene description.

use thiserror::Error;

/// Errors that can occur during scene loading.
///
/// Everything here is a configuration problem. The renderer itself never
/// fails: degenerate geometry is handled numerically.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {index}: sphere radius must be positive, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Object {index}: plane normal has zero length")]
    DegenerateNormal { index: usize },

    #[error("Object {index}: unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Material '{name}': index of refraction must be positive, got {ior}")]
    InvalidIor { name: String, ior: f64 },

    #[error("Material '{name}': roughness must be within [0, 1], got {roughness}")]
    InvalidRoughness { name: String, roughness: f64 },

    #[error("Material '{name}': albedo channels must be within [0, 255], got {channel}")]
    InvalidAlbedo { name: String, channel: f64 },

    #[error("Material '{name}': emission must not be negative, got {value}")]
    NegativeEmission { name: String, value: f64 },

    #[error("Ambient intensity must be within [0, 1], got {0}")]
    InvalidAmbient(f64),

    #[error("Non-finite value in {0}")]
    NonFinite(String),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,
}

pub type SceneResult<T> = Result<T, SceneError>;
