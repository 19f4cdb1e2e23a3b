//! Image file output.
//!
//! `.ppm` files are written as plain-text P3 so they can be diffed and read
//! without a decoder. Every other extension goes through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use lux_renderer::ImageBuffer;

/// Write an image as plain-text PPM: header, then one `r g b` line per pixel.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer, gamma: bool) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8(gamma).chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}

/// Save `image` to `path`, choosing the format from the extension.
pub fn save_image(path: &Path, image: &ImageBuffer, gamma: bool) -> Result<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(&mut writer, image, gamma)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        image::save_buffer(
            path,
            &image.to_rgb8(gamma),
            image.width,
            image.height,
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
