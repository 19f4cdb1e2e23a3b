//! Render settings shared by scene files and the command line.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Image and sampling settings for one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Jittered samples averaged per pixel
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per path
    pub max_depth: u32,

    /// Apply gamma 2 encoding before quantizing
    pub gamma: bool,

    /// Base seed for the per-row random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            max_depth: 50,
            gamma: true,
            seed: 0,
        }
    }
}

/// Named quality presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Low,
    Medium,
    High,
    Ultra,
}

impl RenderSettings {
    /// Overwrite resolution, sample count and depth with a preset.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        let (width, height, samples, depth) = match quality {
            Quality::Low => (1280, 720, 32, 20),
            Quality::Medium => (1920, 1080, 100, 50),
            Quality::High => (3840, 2160, 256, 100),
            Quality::Ultra => (3840, 2160, 512, 150),
        };
        self.width = width;
        self.height = height;
        self.samples_per_pixel = samples;
        self.max_depth = depth;
        self
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::ZeroSamples);
        }
        Ok(())
    }
}
