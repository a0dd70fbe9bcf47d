//! Perceptual attributes layered on top of the color-space conversions.
//!
//! Hue and saturation are read from OKLab in polar form (angle and chroma).
//! Luminance is Rec.709 relative luminance of the linear-light color.

use super::{
    clamp_with_epsilon, ensure_hue, ensure_luminance, ensure_saturation, Color, OklabColor,
    Result, EPSILON, HUE_MAX, HUE_MIN, LIGHTNESS_MAX, LIGHTNESS_MIN, LUMINANCE_MAX,
    LUMINANCE_MIN, SATURATION_MAX, SATURATION_MIN,
};
use crate::error::ColorError;

/// Default OKLab lightness step for [`Color::set_luminance`].
pub const LUMINANCE_STEP: f64 = 0.01;

impl Color {
    /// OKLab hue angle in degrees, `[0, 360)`.
    pub fn hue(self) -> Result<f64> {
        let oklab = self.to_oklab()?;
        let mut hue = oklab.b().atan2(oklab.a()).to_degrees();
        if hue < 0.0 {
            hue += 360.0;
        }
        let hue = clamp_with_epsilon("hue", hue, HUE_MIN, HUE_MAX, EPSILON)?;
        Ok(if hue >= HUE_MAX { HUE_MIN } else { hue })
    }

    /// Rotate to `target_hue` degrees, keeping OKLab lightness and chroma.
    pub fn set_hue(self, target_hue: f64) -> Result<Color> {
        let target_hue = ensure_hue(target_hue)?;
        let oklab = self.to_oklab()?;

        let chroma = oklab.chroma();
        let radians = target_hue.to_radians();
        let rotated = OklabColor::new(oklab.l(), chroma * radians.cos(), chroma * radians.sin())?;

        Color::from_oklab(rotated)
    }

    /// OKLab chroma.
    pub fn saturation(self) -> Result<f64> {
        let chroma = self.to_oklab()?.chroma();
        clamp_with_epsilon("saturation", chroma, SATURATION_MIN, SATURATION_MAX, EPSILON)
    }

    /// Scale OKLab chroma to `target_saturation`, keeping hue and lightness.
    ///
    /// An achromatic color has no hue to keep; it is pushed along +a.
    pub fn set_saturation(self, target_saturation: f64) -> Result<Color> {
        let target = ensure_saturation(target_saturation)?;
        let oklab = self.to_oklab()?;

        let current = oklab.chroma();
        let (a, b) = if current == 0.0 {
            (target, 0.0)
        } else {
            let scale = target / current;
            (oklab.a() * scale, oklab.b() * scale)
        };

        Color::from_oklab(OklabColor::new(oklab.l(), a, b)?)
    }

    /// Rec.709 relative luminance.
    pub fn luminance(self) -> Result<f64> {
        let linear = self.srgb_to_linear()?;
        let luminance = 0.2126 * linear.r() + 0.7152 * linear.g() + 0.0722 * linear.b();
        clamp_with_epsilon("luminance", luminance, LUMINANCE_MIN, LUMINANCE_MAX, EPSILON)
    }

    /// [`Color::set_luminance_by`] with the default step.
    pub fn set_luminance(self, target_luminance: f64) -> Result<Color> {
        self.set_luminance_by(target_luminance, LUMINANCE_STEP)
    }

    /// Walk OKLab lightness in fixed `increment` steps toward `target_luminance`.
    ///
    /// The direction is chosen once from the starting luminance. The walk
    /// stops when luminance reaches or crosses the target, when lightness
    /// would leave `[0, 1]`, or after `floor(1 / increment)` steps, and
    /// returns the last color it computed. The result may miss the target by
    /// up to one step.
    pub fn set_luminance_by(self, target_luminance: f64, increment: f64) -> Result<Color> {
        let target = ensure_luminance(target_luminance)?;
        if !(increment > 0.0 && increment <= 1.0) {
            return Err(ColorError::InvalidIncrement(increment));
        }

        let oklab = self.to_oklab()?;
        let step = if self.luminance()? < target {
            increment
        } else {
            -increment
        };
        let budget = (1.0 / increment).floor() as usize;

        let mut lightness = oklab.l();
        let mut result = self;
        for _ in 0..budget {
            lightness += step;
            if !(LIGHTNESS_MIN..=LIGHTNESS_MAX).contains(&lightness) {
                break;
            }

            result = Color::from_oklab(OklabColor::new(lightness, oklab.a(), oklab.b())?)?;
            let current = result.luminance()?;
            if (step > 0.0 && current >= target) || (step < 0.0 && current <= target) {
                break;
            }
        }

        Ok(result)
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn circular_hue_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}
