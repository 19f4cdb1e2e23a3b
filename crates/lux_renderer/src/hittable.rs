//! Hittable trait and Hit record for ray-object intersection.

use crate::Material;
use lux_math::{Interval, Ray, Vec3};

/// Minimum accepted hit distance and surface offset for secondary rays.
///
/// Rays that start on a surface would otherwise hit that same surface at
/// `t ~ 0` because of rounding.
pub const EPSILON: f64 = 0.001;

/// Acceptance window for primary and scattered rays.
pub const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// Record of the nearest ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection
    pub t: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Outward surface normal (unit length, not flipped towards the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest ray parameter strictly inside `ray_t`, or `None` on a miss.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Outward unit normal at a point assumed to lie on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Material shared by the whole surface.
    fn material(&self) -> &Material;
}
