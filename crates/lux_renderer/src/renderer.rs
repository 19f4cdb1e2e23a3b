//! Image assembly.
//!
//! Implements:
//! - Multi-sampled pixels averaged in linear space
//! - Row-by-row rendering, single-threaded or across a rayon pool
//! - Gamma 2 encoding and 8-bit quantization

use std::sync::atomic::{AtomicU32, Ordering};

use lux_core::SceneDescription;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::{trace, Camera, Color, Interval, LightingMode, Scene, COLOR_SCALE};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Lighting model used for every pixel
    pub lighting: LightingMode,
    /// Apply gamma 2 encoding when quantizing
    pub gamma: bool,
    /// Base seed for the per-row random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            lighting: LightingMode::default(),
            gamma: true,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Settings and lighting taken from a scene description.
    pub fn from_description(desc: &SceneDescription) -> Self {
        Self {
            samples_per_pixel: desc.render.samples_per_pixel,
            max_depth: desc.render.max_depth,
            lighting: LightingMode::from(&desc.lighting),
            gamma: desc.render.gamma,
            seed: desc.render.seed,
        }
    }
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += trace(&ray, scene, config, rng);
    }

    pixel_color / config.samples_per_pixel.max(1) as f64
}

/// Displayable channel range in color units.
const DISPLAY_RANGE: Interval = Interval::new(0.0, COLOR_SCALE);

/// Map a linear color in display units to 8-bit RGB.
///
/// With `gamma` each channel becomes `sqrt(c / 255) * 255`. Values are clamped
/// to `[0, 255]` and truncated.
pub fn quantize(color: Color, gamma: bool) -> [u8; 3] {
    color.to_array().map(|c| {
        let c = if gamma {
            // NaN and negatives go to black
            (c / COLOR_SCALE).max(0.0).sqrt() * COLOR_SCALE
        } else {
            c
        };
        DISPLAY_RANGE.clamp(c) as u8
    })
}

/// Linear colors, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, row: u32) -> usize {
        row as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x` of row `row` (row 0 is the top).
    pub fn get(&self, x: u32, row: u32) -> Color {
        self.pixels[self.index(x, row)]
    }

    /// Set the pixel at column `x` of row `row` (row 0 is the top).
    pub fn set(&mut self, x: u32, row: u32, color: Color) {
        let index = self.index(x, row);
        self.pixels[index] = color;
    }

    /// Quantized RGB bytes, three per pixel.
    pub fn to_rgb8(&self, gamma: bool) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| quantize(*color, gamma))
            .collect()
    }

    /// Number of pixels with a NaN or infinite channel.
    pub fn non_finite_count(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_finite()).count()
    }
}

/// Independent random stream for one image row.
fn row_rng(seed: u64, row: u32) -> StdRng {
    // Spread rows apart so (seed, row + 1) and (seed + 1, row) differ
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Counts finished rows and logs every 10%.
struct Progress {
    rows_done: AtomicU32,
    last_decile: AtomicU32,
    total: u32,
}

impl Progress {
    fn new(total: u32) -> Self {
        Self {
            rows_done: AtomicU32::new(0),
            last_decile: AtomicU32::new(0),
            total,
        }
    }

    fn row_finished(&self) {
        let done = self.rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        let decile = (done as u64 * 10 / self.total.max(1) as u64) as u32;

        // Only the thread that moves the decile forward logs it
        if self.last_decile.fetch_max(decile, Ordering::Relaxed) < decile {
            log::info!("Rendered {}% ({}/{} rows)", decile * 10, done, self.total);
        }
    }
}

/// Render row `row` (0 is the top of the image).
fn render_row(camera: &Camera, scene: &Scene, config: &RenderConfig, row: u32) -> Vec<Color> {
    let mut rng = row_rng(config.seed, row);
    let y = camera.height() - 1 - row;

    (0..camera.width())
        .map(|x| render_pixel(camera, scene, x, y, config, &mut rng))
        .collect()
}

fn assemble(camera: &Camera, rows: Vec<Vec<Color>>) -> ImageBuffer {
    ImageBuffer {
        width: camera.width(),
        height: camera.height(),
        pixels: rows.into_iter().flatten().collect(),
    }
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let progress = Progress::new(camera.height());

    let rows = (0..camera.height())
        .map(|row| {
            let pixels = render_row(camera, scene, config, row);
            progress.row_finished();
            pixels
        })
        .collect();

    assemble(camera, rows)
}

/// Render the entire scene with one rayon task per row.
///
/// Runs on the current rayon pool; wrap the call in `ThreadPool::install` to
/// control the thread count. Produces the same image as [`render`].
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let progress = Progress::new(camera.height());

    let rows = (0..camera.height())
        .into_par_iter()
        .map(|row| {
            let pixels = render_row(camera, scene, config, row);
            progress.row_finished();
            pixels
        })
        .collect();

    assemble(camera, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sky, Sphere};
    use lux_math::Vec3;
    use std::sync::Arc;

    fn gradient() -> Sky {
        Sky::Gradient {
            horizon: Color::splat(255.0),
            zenith: Color::new(135.0, 206.0, 235.0),
        }
    }

    fn floor_only() -> Scene {
        let mut scene = Scene::new();
        scene.add(Box::new(Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::Y,
            Arc::new(Material::diffuse(Color::splat(128.0))),
        )));
        scene
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(Color::new(0.0, 255.0, 127.9), false), [0, 255, 127]);
        assert_eq!(quantize(Color::new(-10.0, 300.0, f64::NAN), false), [0, 255, 0]);

        // sqrt(63.75 / 255) * 255 = 127.5
        assert_eq!(quantize(Color::splat(63.75), true), [127, 127, 127]);
        assert_eq!(quantize(Color::new(-1.0, 1000.0, f64::NAN), true), [0, 255, 0]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(3, 2);
        assert_eq!(image.pixels.len(), 6);

        image.set(2, 1, Color::new(255.0, 0.0, 0.0));
        assert_eq!(image.get(2, 1), Color::new(255.0, 0.0, 0.0));
        assert_eq!(image.pixels[5], Color::new(255.0, 0.0, 0.0));

        let bytes = image.to_rgb8(false);
        assert_eq!(bytes.len(), 18);
        assert_eq!(&bytes[15..], &[255, 0, 0]);
    }

    #[test]
    fn test_non_finite_count() {
        let mut image = ImageBuffer::new(2, 2);
        assert_eq!(image.non_finite_count(), 0);

        image.set(0, 0, Color::new(f64::NAN, 0.0, 0.0));
        image.set(1, 1, Color::new(0.0, f64::INFINITY, 0.0));
        assert_eq!(image.non_finite_count(), 2);
    }

    #[test]
    fn test_sky_pixel_matches_gradient_exactly() {
        let camera = Camera::new(Vec3::ZERO, 40, 20);
        let scene = floor_only();
        let config = RenderConfig {
            samples_per_pixel: 1,
            lighting: LightingMode::PathTraced { sky: gradient() },
            ..Default::default()
        };

        // Top row aims above the floor's horizon
        let (x, y) = (20, 19);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let color = render_pixel(&camera, &scene, x, y, &config, &mut rng);

            // A miss draws nothing beyond the camera jitter
            let mut rng = StdRng::seed_from_u64(seed);
            let ray = camera.get_ray(x, y, &mut rng);
            assert!(ray.direction().y > 0.0);
            assert_eq!(color, gradient().color(ray.direction()));
        }
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let camera = Camera::new(Vec3::ZERO, 4, 4);
        let scene = Scene::new();
        let config = RenderConfig {
            samples_per_pixel: 16,
            lighting: LightingMode::PathTraced {
                sky: Sky::Flat(Color::new(10.0, 20.0, 30.0)),
            },
            ..Default::default()
        };

        let mut rng = StdRng::seed_from_u64(7);
        let color = render_pixel(&camera, &scene, 1, 1, &config, &mut rng);
        assert!((color - Color::new(10.0, 20.0, 30.0)).length() < 1e-9);
    }

    #[test]
    fn test_rows_are_top_first() {
        let camera = Camera::new(Vec3::ZERO, 8, 6);
        let scene = floor_only();
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 4,
            lighting: LightingMode::PathTraced {
                sky: Sky::Gradient {
                    horizon: Color::ZERO,
                    zenith: Color::splat(255.0),
                },
            },
            ..Default::default()
        };

        let image = render(&camera, &scene, &config);
        assert_eq!((image.width, image.height), (8, 6));

        // Looking up the gradient is bright; the floor below is darker
        assert!(image.get(4, 0).x > image.get(4, 5).x);
    }

    #[test]
    fn test_render_parallel_matches_sequential() {
        let mut scene = floor_only();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Material::dielectric(1.5)),
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(2.5, 0.0, -3.0),
            1.0,
            Arc::new(Material::metal(Color::new(200.0, 150.0, 50.0), 0.1)),
        )));

        let camera = Camera::new(Vec3::ZERO, 24, 12);
        let config = RenderConfig {
            samples_per_pixel: 3,
            max_depth: 8,
            seed: 42,
            ..Default::default()
        };

        let sequential = render(&camera, &scene, &config);
        let parallel = render_parallel(&camera, &scene, &config);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.non_finite_count(), 0);
    }

    #[test]
    fn test_seed_changes_image() {
        let scene = floor_only();
        let camera = Camera::new(Vec3::ZERO, 8, 8);
        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 4,
            ..Default::default()
        };

        let a = render(&camera, &scene, &config);
        let b = render(&camera, &scene, &RenderConfig { seed: 1, ..config.clone() });
        assert_ne!(a, b);
    }

    #[test]
    fn test_direct_lit_preset_renders() {
        let mut desc = lux_core::presets::direct_lit();
        desc.render.width = 32;
        desc.render.height = 18;

        let scene = Scene::from_description(&desc).unwrap();
        let camera = Camera::from_description(&desc);
        let config = RenderConfig::from_description(&desc);
        assert!(!config.gamma);

        let image = render_parallel(&camera, &scene, &config);
        assert_eq!(image.pixels.len(), 32 * 18);
        assert_eq!(image.non_finite_count(), 0);
        assert_eq!(render(&camera, &scene, &config), image);
    }

    #[test]
    fn test_emissive_scene_file_renders() {
        let mut desc =
            lux_core::load_scene_from_str(include_str!("../../../scenes/emissive.json")).unwrap();
        desc.render.width = 16;
        desc.render.height = 8;
        desc.render.samples_per_pixel = 4;

        let scene = Scene::from_description(&desc).unwrap();
        assert_eq!(scene.len(), 4);

        let image = render_parallel(
            &Camera::from_description(&desc),
            &scene,
            &RenderConfig::from_description(&desc),
        );
        assert_eq!(image.non_finite_count(), 0);

        // The lamp is brighter than anything the dark sky can light
        let brightest = image.pixels.iter().map(|c| c.max_element()).fold(0.0, f64::max);
        assert!(brightest > 20.0, "brightest channel {brightest}");
    }
}
