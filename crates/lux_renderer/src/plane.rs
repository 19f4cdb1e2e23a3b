//! Infinite plane primitive.

use std::sync::Arc;

use crate::{hittable::Hittable, Material, EPSILON};
use lux_math::{Interval, Ray, Vec3};

/// An infinite plane through `anchor` with a fixed normal.
pub struct Plane {
    anchor: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(anchor: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        debug_assert!(normal.length_squared() > 0.0, "plane normal has zero length");
        Self {
            anchor,
            normal: normal.normalize_or_zero(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let denominator = ray.direction().dot(self.normal);

        // Near-parallel rays would divide by almost zero
        if denominator.abs() <= EPSILON {
            return None;
        }

        let t = (self.anchor - ray.origin()).dot(self.normal) / denominator;
        ray_t.surrounds(t).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
