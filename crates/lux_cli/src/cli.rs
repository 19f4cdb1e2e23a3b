use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_core::{Quality, RenderSettings};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in reference scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Glass, diffuse and metal spheres under a gradient sky
    PathTraced,
    /// Diffuse spheres under one point light with hard shadows
    Direct,
}

/// Resolution, sample count and depth in one switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QualityArg {
    Low,
    Medium,
    High,
    Ultra,
}

impl From<QualityArg> for Quality {
    fn from(quality: QualityArg) -> Self {
        match quality {
            QualityArg::Low => Quality::Low,
            QualityArg::Medium => Quality::Medium,
            QualityArg::High => Quality::High,
            QualityArg::Ultra => Quality::Ultra,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lux")]
#[command(about = "A small CPU path tracer", version)]
pub struct Args {
    /// Scene description (JSON)
    #[arg(long, conflicts_with = "preset")]
    pub scene: Option<PathBuf>,

    /// Built-in scene used when no --scene is given
    #[arg(long, value_enum, default_value = "path-traced")]
    pub preset: Preset,

    /// Output image; `.ppm` is written as plain-text P3, anything else through `image`
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Quality preset, applied before the individual overrides below
    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Write linear values without gamma encoding
    #[arg(long)]
    pub no_gamma: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Layer command line values over the scene's render settings.
    pub fn apply_overrides(&self, settings: RenderSettings) -> RenderSettings {
        let mut settings = match self.quality {
            Some(quality) => settings.with_quality(quality.into()),
            None => settings,
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if self.no_gamma {
            settings.gamma = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("lux").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.preset, Preset::PathTraced);
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("output.ppm"));

        let settings = args.apply_overrides(RenderSettings::default());
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_overrides_win_over_quality() {
        let args = parse(&["--quality", "low", "--samples", "8", "--no-gamma"]);
        let settings = args.apply_overrides(RenderSettings::default());

        assert_eq!((settings.width, settings.height), (1280, 720));
        assert_eq!(settings.max_depth, 20);
        assert_eq!(settings.samples_per_pixel, 8);
        assert!(!settings.gamma);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(parse(&["--preset", "direct"]).preset, Preset::Direct);
        assert_eq!(parse(&["--preset", "path-traced"]).preset, Preset::PathTraced);
    }

    #[test]
    fn test_scene_conflicts_with_preset() {
        let result = Args::try_parse_from(["lux", "--scene", "a.json", "--preset", "direct"]);
        assert!(result.is_err());
    }
}
