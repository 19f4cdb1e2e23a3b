//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{hittable::Hittable, Material};
use lux_math::{Interval, Ray, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be positive; scene loading rejects anything else.
    pub fn new(center: Vec3, radius: f64, material: Arc<Material>) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Prefer the nearer root, fall back to the far one (ray starts inside)
        let near = (-b - sqrtd) / (2.0 * a);
        if ray_t.surrounds(near) {
            return Some(near);
        }
        let far = (-b + sqrtd) / (2.0 * a);
        if ray_t.surrounds(far) {
            return Some(far);
        }
        None
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HIT_RANGE;

    fn grey_sphere(center: Vec3, radius: f64) -> Sphere {
        Sphere::new(
            center,
            radius,
            Arc::new(Material::diffuse(Vec3::splat(128.0))),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.hit(&ray, HIT_RANGE).expect("ray should hit");
        assert!((t - 2.0).abs() < 1e-12);

        let normal = sphere.normal_at(ray.at(t));
        assert!((normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, HIT_RANGE).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.hit(&ray, HIT_RANGE).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let t = sphere.hit(&ray, HIT_RANGE).expect("ray should exit the sphere");
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_surface_origin_skips_self_hit() {
        // A ray leaving the surface outward must not re-hit at t ~ 0
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.hit(&ray, HIT_RANGE).is_none());

        // Leaving inward it exits through the far side
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let t = sphere.hit(&ray, HIT_RANGE).expect("ray should cross the sphere");
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_respects_window_max() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Nearest root is 2.0; a window closing at 1.5 rejects both roots
        assert!(sphere.hit(&ray, HIT_RANGE.with_max(1.5)).is_none());
    }

    #[test]
    fn test_unnormalized_direction_scales_t() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let t = sphere.hit(&ray, HIT_RANGE).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-12);
    }
}
