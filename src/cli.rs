use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::contrast::{ensure_slope, DEFAULT_K};
use crate::pipeline::detect::DEFAULT_LIGHT_THEME_THRESHOLD;
use crate::pipeline::extract::MAX_COLORS;
use crate::theme::ThemeConfig;

/// Derive UI and terminal color themes from an image.
#[derive(Parser, Debug)]
#[command(name = "tinge", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Contrast gap slope
    #[arg(short = 'k', default_value_t = DEFAULT_K, value_parser = parse_slope)]
    pub k: f64,

    /// Average luminance above which the theme is light
    #[arg(long, default_value_t = DEFAULT_LIGHT_THEME_THRESHOLD, value_parser = parse_unit_interval)]
    pub light_theme_threshold: f64,

    /// Number of colors to extract from the image
    #[arg(
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u8).range(1..=MAX_COLORS as i64)
    )]
    pub num_colors: u8,

    /// Flip the light/dark decision
    #[arg(long)]
    pub alternate: bool,

    /// Use the high-contrast profile for the normal variants
    #[arg(long)]
    pub high_contrast: bool,

    /// Print a human-readable listing with colored swatches
    #[arg(long)]
    pub pretty: bool,

    /// With --pretty, print indented JSON instead of the listing
    #[arg(long)]
    pub json: bool,

    /// Write the theme to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Theme settings selected by the flags; everything else keeps its default.
    pub fn theme_config(&self) -> ThemeConfig {
        ThemeConfig {
            light_theme_threshold: self.light_theme_threshold,
            alternate: self.alternate,
            k: self.k,
            high_contrast: self.high_contrast,
            ..ThemeConfig::default()
        }
    }
}

fn parse_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is not in [0, 1]"));
    }
    Ok(value)
}

fn parse_slope(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    ensure_slope(value).map_err(|e| e.to_string())
}
