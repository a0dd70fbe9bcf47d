//! Map role colors into a luminance band around the palette's average.
//!
//! The band's lower edge grows exponentially with average luminance
//! (`1 - e^(-k·avg)`, scaled by 1/5 or 1/8 in high contrast) and the upper
//! edge is a fixed multiple of it (4.5× or 7×). Each color keeps its offset
//! from the average, scaled into the band, so a palette spreads around its
//! brightness center instead of collapsing onto one value.

use crate::color::{clamp_with_epsilon, ensure_luminance, ensure_range, Color, Result, EPSILON};

/// Default slope of the band's dependence on average luminance.
pub const DEFAULT_K: f64 = 4.0;

const FINAL_LUMINANCE_EPSILON: f64 = 1e-1;

/// Flags selecting which side of the band a color lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContrastMode {
    /// Target the bright end of the band.
    pub is_light: bool,
    /// Reflect both band edges (`1 - edge`).
    pub invert: bool,
    /// Use the wider high-contrast profile.
    pub high_contrast: bool,
}

/// Reject a slope that is negative or not finite.
pub fn ensure_slope(k: f64) -> Result<f64> {
    ensure_range("k", k, 0.0, f64::MAX)
}

/// The `[min, max]` luminance band for an average luminance.
pub fn contrast_band(average_luminance: f64, mode: ContrastMode, k: f64) -> Result<(f64, f64)> {
    let k = ensure_slope(k)?;
    let (divisor, spread) = if mode.high_contrast {
        (8.0, 7.0)
    } else {
        (5.0, 4.5)
    };

    let range_min = clamp_with_epsilon(
        "contrast range",
        (1.0 / divisor) * (1.0 - (-k * average_luminance).exp()),
        0.0,
        1.0,
        EPSILON,
    )?;
    let range_max = clamp_with_epsilon("contrast range", range_min * spread, 0.0, 1.0, EPSILON)?;

    Ok(if mode.invert {
        (1.0 - range_min, 1.0 - range_max)
    } else {
        (range_min, range_max)
    })
}

/// Move `color`'s luminance into the contrast band, keeping hue and chroma.
pub fn adjust_contrast(
    color: Color,
    average_luminance: f64,
    mode: ContrastMode,
    k: f64,
) -> Result<Color> {
    let average_luminance = ensure_luminance(average_luminance)?;
    let offset = color.luminance()? - average_luminance;
    let (range_min, range_max) = contrast_band(average_luminance, mode, k)?;

    let target = if mode.is_light {
        average_luminance * (1.0 - range_max) + range_max + (1.0 - range_max) * offset
    } else {
        average_luminance * range_min + range_min * offset
    };
    let target = clamp_with_epsilon(
        "target luminance",
        target,
        0.0,
        1.0,
        FINAL_LUMINANCE_EPSILON,
    )?;

    color.set_luminance(target)
}
