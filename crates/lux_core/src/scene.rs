//! Scene description types for Lux.
//!
//! A scene file is renderer-agnostic: it names materials once and lets
//! objects refer to them by name, so two objects can share a material.
//! Colors are given in 0..255 display units.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::settings::RenderSettings;

/// RGB triple in 0..255 units.
pub type Rgb = [f64; 3];

/// Point or direction triple.
pub type Point = [f64; 3];

pub const WHITE: Rgb = [255.0, 255.0, 255.0];
pub const SKY_BLUE: Rgb = [135.0, 206.0, 235.0];

/// Default metal roughness: a perfect mirror.
pub fn default_roughness() -> f64 {
    0.0
}

/// Default dielectric tint: clear glass that does not color what it transmits.
pub fn default_tint() -> bool {
    false
}

/// Default emission strength.
pub fn default_strength() -> f64 {
    1.0
}

/// Default ambient floor for direct lighting (10%).
pub fn default_ambient() -> f64 {
    0.1
}

fn default_white() -> Rgb {
    WHITE
}

fn default_sky_blue() -> Rgb {
    SKY_BLUE
}

fn default_gradient_sky() -> SkyDesc {
    SkyDesc::Gradient {
        horizon: WHITE,
        zenith: SKY_BLUE,
    }
}

fn default_flat_sky() -> SkyDesc {
    SkyDesc::Flat { color: SKY_BLUE }
}

/// Pinhole camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub origin: Point,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
        }
    }
}

/// What a ray sees when it leaves the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkyDesc {
    /// Constant color in every direction
    Flat { color: Rgb },

    /// Vertical blend from `horizon` (looking down) to `zenith` (looking up)
    Gradient {
        #[serde(default = "default_white")]
        horizon: Rgb,
        #[serde(default = "default_sky_blue")]
        zenith: Rgb,
    },
}

/// A point light used by direct lighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLightDesc {
    pub position: Point,
}

/// How the scene is lit. One mode per render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LightingDesc {
    /// Monte Carlo path tracing lit only by the sky
    PathTraced {
        #[serde(default = "default_gradient_sky")]
        sky: SkyDesc,
    },

    /// One point light, hard shadows and an ambient floor
    Direct {
        light: PointLightDesc,
        #[serde(default = "default_ambient")]
        ambient: f64,
        #[serde(default = "default_flat_sky")]
        sky: SkyDesc,
    },
}

impl Default for LightingDesc {
    fn default() -> Self {
        LightingDesc::PathTraced {
            sky: default_gradient_sky(),
        }
    }
}

/// Surface material definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Diffuse {
        albedo: Rgb,
    },

    Metal {
        albedo: Rgb,
        #[serde(default = "default_roughness")]
        roughness: f64,
    },

    Dielectric {
        #[serde(default = "default_white")]
        albedo: Rgb,
        ior: f64,
        #[serde(default = "default_tint")]
        tint: bool,
    },

    Emissive {
        color: Rgb,
        #[serde(default = "default_strength")]
        strength: f64,
    },
}

/// Scene object referencing a material by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Point,
        radius: f64,
        material: String,
    },

    Plane {
        anchor: Point,
        normal: Point,
        material: String,
    },
}

impl ObjectDesc {
    /// Name of the material this object uses.
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. } | ObjectDesc::Plane { material, .. } => material,
        }
    }
}

/// A complete, renderer-agnostic scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDesc,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub lighting: LightingDesc,

    pub materials: BTreeMap<String, MaterialDesc>,

    pub objects: Vec<ObjectDesc>,
}

fn check_finite(values: &[f64], what: impl FnOnce() -> String) -> SceneResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::NonFinite(what()))
    }
}

/// Albedos divide by 255 to become attenuation, which must stay within [0, 1].
fn check_albedo(name: &str, albedo: &Rgb) -> SceneResult<()> {
    check_finite(albedo, || format!("material '{name}' albedo"))?;
    match albedo.iter().find(|c| !(0.0..=255.0).contains(*c)) {
        Some(channel) => Err(SceneError::InvalidAlbedo {
            name: name.to_string(),
            channel: *channel,
        }),
        None => Ok(()),
    }
}

fn check_sky(sky: &SkyDesc) -> SceneResult<()> {
    match sky {
        SkyDesc::Flat { color } => check_finite(color, || "sky color".to_string()),
        SkyDesc::Gradient { horizon, zenith } => {
            check_finite(horizon, || "sky horizon".to_string())?;
            check_finite(zenith, || "sky zenith".to_string())
        }
    }
}

impl SceneDescription {
    /// Check everything the renderer relies on.
    ///
    /// Returns the first problem found. A scene that passes can be turned
    /// into renderer objects without further checks.
    pub fn validate(&self) -> SceneResult<()> {
        self.render.validate()?;
        check_finite(&self.camera.origin, || "camera origin".to_string())?;

        match &self.lighting {
            LightingDesc::PathTraced { sky } => check_sky(sky)?,
            LightingDesc::Direct {
                light,
                ambient,
                sky,
            } => {
                check_finite(&light.position, || "light position".to_string())?;
                if !(0.0..=1.0).contains(ambient) {
                    return Err(SceneError::InvalidAmbient(*ambient));
                }
                check_sky(sky)?;
            }
        }

        for (name, material) in &self.materials {
            match material {
                MaterialDesc::Diffuse { albedo } => {
                    check_albedo(name, albedo)?;
                }
                MaterialDesc::Metal { albedo, roughness } => {
                    check_albedo(name, albedo)?;
                    if !(0.0..=1.0).contains(roughness) {
                        return Err(SceneError::InvalidRoughness {
                            name: name.clone(),
                            roughness: *roughness,
                        });
                    }
                }
                MaterialDesc::Dielectric { albedo, ior, .. } => {
                    check_albedo(name, albedo)?;
                    if !(ior.is_finite() && *ior > 0.0) {
                        return Err(SceneError::InvalidIor {
                            name: name.clone(),
                            ior: *ior,
                        });
                    }
                }
                MaterialDesc::Emissive { color, strength } => {
                    check_finite(color, || format!("material '{name}' color"))?;
                    check_finite(&[*strength], || format!("material '{name}' strength"))?;
                    let negative = color.iter().chain([strength]).find(|v| **v < 0.0);
                    if let Some(value) = negative {
                        return Err(SceneError::NegativeEmission {
                            name: name.clone(),
                            value: *value,
                        });
                    }
                }
            }
        }

        for (index, object) in self.objects.iter().enumerate() {
            match object {
                ObjectDesc::Sphere { center, radius, .. } => {
                    check_finite(center, || format!("object {index} center"))?;
                    // NaN fails this comparison too
                    if !(*radius > 0.0 && radius.is_finite()) {
                        return Err(SceneError::InvalidRadius {
                            index,
                            radius: *radius,
                        });
                    }
                }
                ObjectDesc::Plane { anchor, normal, .. } => {
                    check_finite(anchor, || format!("object {index} anchor"))?;
                    check_finite(normal, || format!("object {index} normal"))?;
                    if normal.iter().all(|c| *c == 0.0) {
                        return Err(SceneError::DegenerateNormal { index });
                    }
                }
            }

            if !self.materials.contains_key(object.material()) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: object.material().to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}

/// Load and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());

    let json = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&json)?;

    log::info!(
        "Loaded {} objects, {} materials",
        scene.objects.len(),
        scene.materials.len()
    );
    Ok(scene)
}
