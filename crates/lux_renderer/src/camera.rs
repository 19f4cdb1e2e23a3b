//! Pinhole camera for primary ray generation.

use crate::gen_f64;
use lux_core::SceneDescription;
use lux_math::{Ray, Vec3};
use rand::RngCore;

/// Camera looking down `-Z` with `+Y` up.
///
/// The image plane sits at distance 1 and spans `[-1, 1]` vertically, so the
/// vertical field of view is 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    width: u32,
    height: u32,
}

impl Camera {
    /// Create a new camera.
    pub fn new(origin: Vec3, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "empty image {width}x{height}");
        Self {
            origin,
            width,
            height,
        }
    }

    /// Camera placement from a scene and resolution from its render settings.
    pub fn from_description(desc: &SceneDescription) -> Self {
        Self::new(
            Vec3::from_array(desc.camera.origin),
            desc.render.width,
            desc.render.height,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Jittered ray through pixel `(x, y)`, with `y` counted from the bottom.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let half_width = self.width as f64 / 2.0;
        let half_height = self.height as f64 / 2.0;

        let u = (x as f64 + gen_f64(rng) - half_width) / half_width * self.aspect_ratio();
        let v = (y as f64 + gen_f64(rng) - half_height) / half_height;

        Ray::new(self.origin, Vec3::new(u, v, -1.0).normalize())
    }
}
