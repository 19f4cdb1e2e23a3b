//! Lux Renderer - CPU Path Tracing
//!
//! A small Monte Carlo path tracer over spheres and planes, with diffuse,
//! metal, dielectric and emissive materials. A second, non-recursive
//! lighting mode shades diffuse scenes with one point light and hard shadows.

mod camera;
mod hittable;
mod integrator;
mod material;
mod plane;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{Hit, Hittable, EPSILON, HIT_RANGE};
pub use integrator::{direct_color, ray_color, trace, LightingMode, PointLight, Sky};
pub use material::{reflect, reflectance, refract, Color, Material, Scatter, COLOR_SCALE};
pub use plane::Plane;
pub use renderer::{
    quantize, render, render_parallel, render_pixel, ImageBuffer, RenderConfig,
};
pub use sampling::{gen_f64, random_in_unit_sphere, random_unit_vector};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
