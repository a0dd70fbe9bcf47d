//! Palette-wide statistics and light/dark theme detection.

use crate::color::{clamp_with_epsilon, ensure_luminance, Color, Result, EPSILON};
use crate::error::ColorError;

/// Default luminance above which a palette yields a light theme.
pub const DEFAULT_LIGHT_THEME_THRESHOLD: f64 = 0.25;

fn ensure_non_empty(colors: &[Color]) -> Result<()> {
    if colors.is_empty() {
        return Err(ColorError::PaletteTooSmall {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

/// Mean Rec.709 luminance of the palette.
pub fn average_luminance(colors: &[Color]) -> Result<f64> {
    ensure_non_empty(colors)?;
    let mut total = 0.0;
    for color in colors {
        total += color.luminance()?;
    }
    clamp_with_epsilon(
        "average luminance",
        total / colors.len() as f64,
        0.0,
        1.0,
        EPSILON,
    )
}

/// Mean OKLab chroma of the palette.
pub fn average_saturation(colors: &[Color]) -> Result<f64> {
    ensure_non_empty(colors)?;
    let mut total = 0.0;
    for color in colors {
        total += color.saturation()?;
    }
    clamp_with_epsilon(
        "average saturation",
        total / colors.len() as f64,
        0.0,
        1.0,
        EPSILON,
    )
}

/// Decide whether the palette calls for a light theme.
///
/// `alternate` flips the polarity of the comparison, not the threshold.
pub fn is_light_theme(average_luminance: f64, threshold: f64, alternate: bool) -> Result<bool> {
    let average_luminance = ensure_luminance(average_luminance)?;
    Ok(if alternate {
        average_luminance < threshold
    } else {
        average_luminance > threshold
    })
}
