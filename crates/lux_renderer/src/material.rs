//! Surface materials and how they scatter light.

use lux_core::MaterialDesc;
use lux_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampling::{gen_f64, random_in_unit_sphere, random_unit_vector};
use crate::EPSILON;

/// Color type alias (RGB in 0..255 display units, unclamped)
pub type Color = Vec3;

/// Albedos are stored in display units; dividing by this gives attenuation.
pub const COLOR_SCALE: f64 = 255.0;

/// Result of a scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel factor in [0, 1] applied to the light arriving along `ray`
    pub attenuation: Color,
    /// Outgoing ray, already offset off the surface
    pub ray: Ray,
}

/// Closed set of surface materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lambertian reflector.
    Diffuse { albedo: Color },

    /// Mirror with optional fuzz. `roughness` 0.0 is a perfect mirror.
    Metal { albedo: Color, roughness: f64 },

    /// Glass-like refractor. With `tint` false the albedo is ignored and
    /// transmitted light passes unchanged.
    Dielectric { albedo: Color, ior: f64, tint: bool },

    /// Light source. Never scatters.
    Emissive { color: Color, strength: f64 },
}

impl Material {
    /// Create a diffuse material with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `roughness`: 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, roughness: f64) -> Self {
        Material::Metal { albedo, roughness }
    }

    /// Create a clear dielectric (no tint, white albedo).
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(ior: f64) -> Self {
        Material::Dielectric {
            albedo: Color::splat(COLOR_SCALE),
            ior,
            tint: false,
        }
    }

    /// Create a dielectric that attenuates by its albedo.
    pub fn tinted_dielectric(albedo: Color, ior: f64) -> Self {
        Material::Dielectric {
            albedo,
            ior,
            tint: true,
        }
    }

    /// Create an emissive material.
    pub fn emissive(color: Color, strength: f64) -> Self {
        Material::Emissive { color, strength }
    }

    /// Light emitted by the surface itself. Black for everything but lights.
    pub fn emitted(&self) -> Color {
        match self {
            Material::Emissive { color, strength } => *color * *strength,
            _ => Color::ZERO,
        }
    }

    /// Unlit surface color used by direct lighting.
    pub fn base_color(&self) -> Color {
        match self {
            Material::Diffuse { albedo }
            | Material::Metal { albedo, .. }
            | Material::Dielectric { albedo, .. } => *albedo,
            Material::Emissive { color, strength } => *color * *strength,
        }
    }

    /// Scatter an incoming ray at `point` with outward unit `normal`.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        point: Vec3,
        normal: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        match self {
            Material::Diffuse { albedo } => {
                let mut direction = normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < EPSILON * EPSILON {
                    direction = normal;
                } else {
                    direction = direction.normalize();
                }

                Some(Scatter {
                    attenuation: *albedo / COLOR_SCALE,
                    ray: Ray::new(point + normal * EPSILON, direction),
                })
            }

            Material::Metal { albedo, roughness } => {
                let reflected = reflect(ray_in.direction().normalize_or_zero(), normal);
                let fuzzed =
                    (reflected + random_in_unit_sphere(rng) * *roughness).normalize_or_zero();

                // Fuzz pushed the ray below the surface
                if fuzzed.dot(normal) <= 0.0 {
                    return None;
                }

                Some(Scatter {
                    attenuation: *albedo / COLOR_SCALE,
                    ray: Ray::new(point + normal * EPSILON, fuzzed),
                })
            }

            Material::Dielectric { albedo, ior, tint } => {
                let unit_direction = ray_in.direction().normalize_or_zero();
                let front_face = unit_direction.dot(normal) < 0.0;
                let (n, refraction_ratio) = if front_face {
                    (normal, 1.0 / *ior)
                } else {
                    (-normal, *ior)
                };

                let cos_theta = (-unit_direction.dot(n)).min(1.0);
                let reflect_chance = reflectance(cos_theta, refraction_ratio);

                let ray = match refract(unit_direction, n, refraction_ratio) {
                    Some(refracted) if reflect_chance <= gen_f64(rng) => {
                        Ray::new(point - n * EPSILON, refracted)
                    }
                    // Total internal reflection, or Fresnel picked reflection
                    _ => Ray::new(point + n * EPSILON, reflect(unit_direction, n)),
                };

                let attenuation = if *tint {
                    *albedo / COLOR_SCALE
                } else {
                    Color::ONE
                };

                Some(Scatter { attenuation, ray })
            }

            Material::Emissive { .. } => None,
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match desc {
            MaterialDesc::Diffuse { albedo } => Material::Diffuse {
                albedo: Color::from_array(*albedo),
            },
            MaterialDesc::Metal { albedo, roughness } => Material::Metal {
                albedo: Color::from_array(*albedo),
                roughness: *roughness,
            },
            MaterialDesc::Dielectric { albedo, ior, tint } => Material::Dielectric {
                albedo: Color::from_array(*albedo),
                ior: *ior,
                tint: *tint,
            },
            MaterialDesc::Emissive { color, strength } => Material::Emissive {
                color: Color::from_array(*color),
                strength: *strength,
            },
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Refract a unit vector through a surface with unit normal `n` facing it.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Option<Vec3> {
    let cos_theta = (-uv.dot(n)).min(1.0);
    let r_out_perp = (uv + n * cos_theta) * etai_over_etat;
    let parallel_sq = 1.0 - r_out_perp.length_squared();
    if parallel_sq > 0.0 {
        Some(r_out_perp - n * parallel_sq.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
