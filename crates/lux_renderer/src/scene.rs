//! Ordered primitive list with nearest-hit and occlusion queries.

use std::collections::BTreeMap;
use std::sync::Arc;

use lux_core::{ObjectDesc, SceneDescription, SceneResult};
use lux_math::{Interval, Ray, Vec3};

use crate::hittable::{Hit, Hittable, HIT_RANGE};
use crate::{Material, Plane, Sphere};

/// A list of hittable objects.
///
/// Order only matters when two objects report exactly the same distance:
/// the one added first wins.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build renderer objects from a scene description.
    ///
    /// Objects naming the same material share one `Arc<Material>`.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;

        let materials: BTreeMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|(name, m)| (name.as_str(), Arc::new(Material::from(m))))
            .collect();

        let mut scene = Scene::new();
        for object in &desc.objects {
            // validate() guarantees every reference resolves
            let material = Arc::clone(&materials[object.material()]);
            match object {
                ObjectDesc::Sphere { center, radius, .. } => {
                    scene.add(Box::new(Sphere::new(
                        Vec3::from_array(*center),
                        *radius,
                        material,
                    )));
                }
                ObjectDesc::Plane { anchor, normal, .. } => {
                    scene.add(Box::new(Plane::new(
                        Vec3::from_array(*anchor),
                        Vec3::from_array(*normal),
                        material,
                    )));
                }
            }
        }

        log::debug!(
            "Built scene: {} objects sharing {} materials",
            scene.len(),
            materials.len()
        );
        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest intersection beyond `EPSILON`, scanning every object.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut window = HIT_RANGE;
        let mut closest: Option<(f64, &dyn Hittable)> = None;

        for object in &self.objects {
            // The window is open at the top, so an equal t never replaces
            if let Some(t) = object.hit(ray, window) {
                window = window.with_max(t);
                closest = Some((t, object.as_ref()));
            }
        }

        closest.map(|(t, object)| {
            let point = ray.at(t);
            Hit {
                t,
                point,
                normal: object.normal_at(point),
                material: object.material(),
            }
        })
    }

    /// True as soon as any object is hit inside `ray_t`.
    pub fn is_occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.objects
            .iter()
            .any(|object| object.hit(ray, ray_t).is_some())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, EPSILON};
    use lux_core::presets;

    fn sphere(z: f64, material: &Arc<Material>) -> Box<dyn Hittable> {
        Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            1.0,
            Arc::clone(material),
        ))
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let far = Arc::new(Material::diffuse(Color::splat(10.0)));
        let near = Arc::new(Material::diffuse(Color::splat(20.0)));

        let mut scene = Scene::new();
        scene.add(sphere(-10.0, &far));
        scene.add(sphere(-3.0, &near));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.nearest_hit(&ray).expect("should hit");

        assert!((hit.t - 2.0).abs() < 1e-12);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(*hit.material, Material::diffuse(Color::splat(20.0)));
    }

    #[test]
    fn test_nearest_hit_first_object_wins_ties() {
        let first = Arc::new(Material::diffuse(Color::splat(1.0)));
        let second = Arc::new(Material::diffuse(Color::splat(2.0)));

        let mut scene = Scene::new();
        scene.add(sphere(-3.0, &first));
        scene.add(sphere(-3.0, &second));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(*hit.material, *first);
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::default();
        assert!(scene.is_empty());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.nearest_hit(&ray).is_none());
        assert!(!scene.is_occluded(&ray, HIT_RANGE));
    }

    #[test]
    fn test_is_occluded_respects_window() {
        let material = Arc::new(Material::diffuse(Color::ONE));
        let mut scene = Scene::new();
        scene.add(sphere(-3.0, &material));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.is_occluded(&ray, HIT_RANGE));

        // The sphere lies beyond t = 1.5
        assert!(!scene.is_occluded(&ray, Interval::new(EPSILON, 1.5)));
    }

    #[test]
    fn test_from_description_shares_materials() {
        let mut desc = presets::path_traced();
        desc.objects.push(ObjectDesc::Sphere {
            center: [0.0, 2.0, -3.0],
            radius: 0.5,
            material: "gold".to_string(),
        });

        let scene = Scene::from_description(&desc).unwrap();
        assert_eq!(scene.len(), 5);

        let gold_a = scene.objects[3].material() as *const Material;
        let gold_b = scene.objects[4].material() as *const Material;
        assert_eq!(gold_a, gold_b);
    }

    #[test]
    fn test_from_description_rejects_invalid_scene() {
        let mut desc = presets::path_traced();
        desc.objects.push(ObjectDesc::Sphere {
            center: [0.0, 0.0, 0.0],
            radius: -1.0,
            material: "gold".to_string(),
        });

        assert!(Scene::from_description(&desc).is_err());
    }
}
