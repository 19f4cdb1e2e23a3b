//! Lux Core - Scene description and configuration.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `MaterialDesc`, `ObjectDesc`
//! - **Loading**: JSON scene files with validation before anything renders
//! - **Presets**: the built-in reference scenes
//!
//! # Example
//!
//! ```ignore
//! use lux_core::load_scene;
//!
//! let scene = load_scene("scenes/path_traced.json")?;
//! println!("Loaded {} objects, {} materials",
//!     scene.objects.len(),
//!     scene.materials.len());
//! ```

pub mod error;
pub mod presets;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use scene::{
    load_scene, load_scene_from_str, CameraDesc, LightingDesc, MaterialDesc, ObjectDesc,
    PointLightDesc, SceneDescription, SkyDesc,
};
pub use settings::{Quality, RenderSettings};
