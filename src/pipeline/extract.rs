//! Dominant-color extraction from an image file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use log::{debug, warn};
use palette::{FromColor, IntoColor, Lab, Srgb};

use crate::color::Color;

/// Largest palette the extractor will produce.
pub const MAX_COLORS: usize = 16;

const MAX_DIM: u32 = 256;
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const SEED: u64 = 42;

/// Validate the request, load the image and extract `count` dominant colors.
pub fn extract_prominent_colors(path: &Path, count: usize) -> Result<Vec<Color>> {
    if count == 0 {
        bail!("color count must be a positive integer, got 0");
    }
    if count > MAX_COLORS {
        bail!("color count must be at most {MAX_COLORS}, got {count}");
    }
    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }

    let pixels = load_and_prepare(path)?;
    extract_colors(&pixels, count)
}

/// Load an image, resize to fit within 256x256 (preserving aspect ratio),
/// and convert all pixels to CIELAB space.
pub fn load_and_prepare(path: &Path) -> Result<Vec<Lab>> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let img = if img.width() > MAX_DIM || img.height() > MAX_DIM {
        debug!(
            "resizing {}x{} image to fit {MAX_DIM}x{MAX_DIM}",
            img.width(),
            img.height()
        );
        img.resize(MAX_DIM, MAX_DIM, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb_img = img.to_rgb8();

    let pixels: Vec<Lab> = rgb_img
        .pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            srgb.into_color()
        })
        .collect();

    Ok(pixels)
}

/// Run K-means on LAB pixels and return exactly `k` centroids.
///
/// Colors are quantized to 8 bits and ordered by cluster population,
/// largest first. Uses Hamerly's algorithm with a fixed seed so the same
/// image always yields the same palette.
pub fn extract_colors(pixels: &[Lab], k: usize) -> Result<Vec<Color>> {
    if k == 0 || k > MAX_COLORS {
        bail!("color count must be between 1 and {MAX_COLORS}, got {k}");
    }
    if pixels.len() < k {
        bail!(
            "image has {} pixels, too few for {k} colors",
            pixels.len()
        );
    }

    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, pixels, SEED);
    debug!(
        "k-means over {} pixels: {} centroids, score {:.2}",
        pixels.len(),
        result.centroids.len(),
        result.score
    );

    let mut counts = vec![0u32; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }
    let empty = counts.iter().filter(|&&c| c == 0).count();
    if empty > 0 {
        warn!("{empty} of {k} clusters are empty; palette will repeat colors");
    }

    let mut ranked: Vec<(u32, Color)> = result
        .centroids
        .iter()
        .zip(&counts)
        .map(|(lab, &count)| (count, lab_to_color(*lab)))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(ranked.into_iter().map(|(_, color)| color).collect())
}

/// Clamp a LAB centroid into sRGB and quantize to 8 bits.
fn lab_to_color(lab: Lab) -> Color {
    let srgb: Srgb<f32> = Srgb::from_color(lab);
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::from_u8(quantize(srgb.red), quantize(srgb.green), quantize(srgb.blue))
}
