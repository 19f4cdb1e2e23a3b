//! Light transport.
//!
//! Two modes, never mixed within one render:
//! - Path tracing: paths bounce until absorbed, out of depth, or they escape
//!   to the sky. Only emissive surfaces and the sky contribute light.
//! - Direct lighting: one point light, hard shadows and an ambient floor,
//!   with no bounces and no randomness.

use lux_core::{LightingDesc, SkyDesc};
use lux_math::{Interval, Ray, Vec3};
use rand::RngCore;

use crate::{Color, Material, RenderConfig, Scene, EPSILON};

/// Environment seen by rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sky {
    /// Same color in every direction
    Flat(Color),
    /// Linear blend from `horizon` (straight down) to `zenith` (straight up)
    Gradient { horizon: Color, zenith: Color },
}

impl Sky {
    /// Color for a ray leaving the scene along `direction`.
    pub fn color(&self, direction: Vec3) -> Color {
        match self {
            Sky::Flat(color) => *color,
            Sky::Gradient { horizon, zenith } => {
                let t = 0.5 * (direction.normalize_or_zero().y + 1.0);
                *horizon * (1.0 - t) + *zenith * t
            }
        }
    }
}

impl From<&SkyDesc> for Sky {
    fn from(desc: &SkyDesc) -> Self {
        match desc {
            SkyDesc::Flat { color } => Sky::Flat(Color::from_array(*color)),
            SkyDesc::Gradient { horizon, zenith } => Sky::Gradient {
                horizon: Color::from_array(*horizon),
                zenith: Color::from_array(*zenith),
            },
        }
    }
}

/// A point light with no falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

/// Lighting model for a whole render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightingMode {
    PathTraced {
        sky: Sky,
    },
    Direct {
        light: PointLight,
        /// Fraction of the base color kept in shadow, in [0, 1]
        ambient: f64,
        sky: Sky,
    },
}

impl LightingMode {
    pub fn sky(&self) -> &Sky {
        match self {
            LightingMode::PathTraced { sky } | LightingMode::Direct { sky, .. } => sky,
        }
    }
}

impl Default for LightingMode {
    fn default() -> Self {
        LightingMode::from(&LightingDesc::default())
    }
}

impl From<&LightingDesc> for LightingMode {
    fn from(desc: &LightingDesc) -> Self {
        match desc {
            LightingDesc::PathTraced { sky } => LightingMode::PathTraced { sky: sky.into() },
            LightingDesc::Direct {
                light,
                ambient,
                sky,
            } => LightingMode::Direct {
                light: PointLight {
                    position: Vec3::from_array(light.position),
                },
                ambient: *ambient,
                sky: sky.into(),
            },
        }
    }
}

/// Radiance carried back along `ray`, following at most `depth` bounces.
///
/// Loops with a running throughput instead of recursing, so deep paths cost
/// no stack. Emission is picked up at every vertex; the sky closes escaping
/// paths.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    sky: &Sky,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(hit) = scene.nearest_hit(&ray) else {
            return radiance + throughput * sky.color(ray.direction());
        };

        radiance += throughput * hit.material.emitted();

        match hit.material.scatter(&ray, hit.point, hit.normal, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.ray;
            }
            None => return radiance,
        }
    }

    // Out of bounces
    radiance
}

/// Single-bounce shading against one point light.
///
/// Shadow rays only count occluders strictly between the surface and the
/// light (`t` in `(EPSILON, 1)` along the unnormalized direction), so objects
/// behind the light cast no shadow.
pub fn direct_color(
    ray: &Ray,
    scene: &Scene,
    light: &PointLight,
    ambient: f64,
    sky: &Sky,
) -> Color {
    let Some(hit) = scene.nearest_hit(ray) else {
        return sky.color(ray.direction());
    };

    if let Material::Emissive { .. } = hit.material {
        return hit.material.emitted();
    }

    let base = hit.material.base_color();
    let ambient_term = base * ambient;

    // Unnormalized so that t = 1 lands exactly on the light
    let origin = hit.point + hit.normal * EPSILON;
    let to_light = light.position - origin;
    let shadow_ray = Ray::new(origin, to_light);

    if scene.is_occluded(&shadow_ray, Interval::new(EPSILON, 1.0)) {
        return ambient_term;
    }

    let lambert = hit.normal.dot(to_light.normalize_or_zero()).max(0.0);
    ambient_term + base * (1.0 - ambient) * lambert
}

/// Color for one camera ray under the configured lighting mode.
pub fn trace(ray: &Ray, scene: &Scene, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    match &config.lighting {
        LightingMode::PathTraced { sky } => ray_color(ray, scene, config.max_depth, sky, rng),
        LightingMode::Direct {
            light,
            ambient,
            sky,
        } => direct_color(ray, scene, light, *ambient, sky),
    }
}
