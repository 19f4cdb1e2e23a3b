use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use lux_core::{load_scene, presets, SceneDescription};
use lux_renderer::{render_parallel, Camera, RenderConfig, Scene};

mod cli;
mod output;

use cli::{Args, Preset};

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut desc = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("Using built-in {:?} scene", args.preset);
            match args.preset {
                Preset::PathTraced => presets::path_traced(),
                Preset::Direct => presets::direct_lit(),
            }
        }
    };

    desc.render = args.apply_overrides(desc.render);
    desc.validate().context("Invalid render settings")?;
    Ok(desc)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let desc = load_description(&args)?;
    let settings = &desc.render;

    let scene = Scene::from_description(&desc)?;
    let camera = Camera::from_description(&desc);
    let config = RenderConfig::from_description(&desc);

    log::info!(
        "Rendering {} objects at {}x{}, {} spp, max depth {}",
        scene.len(),
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.max_depth
    );

    let start = Instant::now();
    let image = match args.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build thread pool")?;
            log::info!("Using {} render threads", pool.current_num_threads());
            pool.install(|| render_parallel(&camera, &scene, &config))
        }
        None => render_parallel(&camera, &scene, &config),
    };
    log::info!("Render finished in {:.2?}", start.elapsed());

    let bad = image.non_finite_count();
    if bad > 0 {
        log::warn!("{} pixels have NaN or infinite values", bad);
    }

    output::save_image(&args.output, &image, config.gamma)?;
    Ok(())
}
