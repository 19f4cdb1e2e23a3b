//! Built-in reference scenes.
//!
//! Both scenes share the same layout: a ground plane one unit below the
//! camera and spheres three units in front of it.

use std::collections::BTreeMap;

use crate::scene::{
    default_ambient, CameraDesc, LightingDesc, MaterialDesc, ObjectDesc, PointLightDesc,
    SceneDescription, SkyDesc, SKY_BLUE, WHITE,
};
use crate::settings::RenderSettings;

fn ground_plane(material: &str) -> ObjectDesc {
    ObjectDesc::Plane {
        anchor: [0.0, -1.0, 0.0],
        normal: [0.0, 1.0, 0.0],
        material: material.to_string(),
    }
}

fn sphere(center: [f64; 3], radius: f64, material: &str) -> ObjectDesc {
    ObjectDesc::Sphere {
        center,
        radius,
        material: material.to_string(),
    }
}

/// Glass, red and brushed gold spheres under a gradient sky.
pub fn path_traced() -> SceneDescription {
    let mut materials = BTreeMap::new();
    materials.insert(
        "ground".to_string(),
        MaterialDesc::Diffuse {
            albedo: [128.0, 128.0, 128.0],
        },
    );
    materials.insert(
        "glass".to_string(),
        MaterialDesc::Dielectric {
            albedo: WHITE,
            ior: 1.5,
            tint: false,
        },
    );
    materials.insert(
        "red".to_string(),
        MaterialDesc::Diffuse {
            albedo: [255.0, 0.0, 0.0],
        },
    );
    materials.insert(
        "gold".to_string(),
        MaterialDesc::Metal {
            albedo: [200.0, 150.0, 50.0],
            roughness: 0.1,
        },
    );

    SceneDescription {
        camera: CameraDesc::default(),
        render: RenderSettings::default(),
        lighting: LightingDesc::PathTraced {
            sky: SkyDesc::Gradient {
                horizon: WHITE,
                zenith: SKY_BLUE,
            },
        },
        materials,
        objects: vec![
            ground_plane("ground"),
            sphere([0.0, 0.0, -3.0], 1.0, "glass"),
            sphere([-2.5, 0.0, -3.0], 1.0, "red"),
            sphere([2.5, 0.0, -3.0], 1.0, "gold"),
        ],
    }
}

/// Red and green spheres lit by a single point light with hard shadows.
pub fn direct_lit() -> SceneDescription {
    let mut materials = BTreeMap::new();
    materials.insert(
        "red".to_string(),
        MaterialDesc::Diffuse {
            albedo: [255.0, 0.0, 0.0],
        },
    );
    materials.insert(
        "grey".to_string(),
        MaterialDesc::Diffuse {
            albedo: [150.0, 150.0, 150.0],
        },
    );
    materials.insert(
        "green".to_string(),
        MaterialDesc::Diffuse {
            albedo: [0.0, 255.0, 0.0],
        },
    );

    SceneDescription {
        camera: CameraDesc::default(),
        render: RenderSettings {
            width: 1920,
            height: 1080,
            gamma: false,
            ..Default::default()
        },
        lighting: LightingDesc::Direct {
            light: PointLightDesc {
                position: [-5.0, 5.0, 0.0],
            },
            ambient: default_ambient(),
            sky: SkyDesc::Flat { color: SKY_BLUE },
        },
        materials,
        objects: vec![
            sphere([0.0, 0.0, -3.0], 1.0, "red"),
            ground_plane("grey"),
            sphere([-2.5, 0.0, -3.0], 0.5, "green"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(path_traced().validate().is_ok());
        assert!(direct_lit().validate().is_ok());
    }

    #[test]
    fn test_direct_preset_is_diffuse_only() {
        let scene = direct_lit();
        assert!(scene
            .materials
            .values()
            .all(|m| matches!(m, MaterialDesc::Diffuse { .. })));
        assert!(!scene.render.gamma);
    }

    #[test]
    fn test_bundled_scene_files_match_presets() {
        let path_traced_file =
            crate::load_scene_from_str(include_str!("../../../scenes/path_traced.json")).unwrap();
        assert_eq!(path_traced_file, path_traced());

        let direct_file =
            crate::load_scene_from_str(include_str!("../../../scenes/direct_lit.json")).unwrap();
        assert_eq!(direct_file, direct_lit());
    }
}
