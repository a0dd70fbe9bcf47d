//! Color value types shared by the whole pipeline.
//!
//! [`Color`] holds r/g/b as `f64` in `[0, 1]`. The same type carries both
//! gamma-encoded sRGB and linear-light values; which one a given value is
//! depends on the conversion that produced it.

mod attributes;
mod hex;
mod space;

use serde::{Serialize, Serializer};

use crate::error::ColorError;

pub use attributes::{circular_hue_distance, LUMINANCE_STEP};
pub use hex::ANSI_RESET;

pub type Result<T> = std::result::Result<T, ColorError>;

/// Tolerance for values that live in sRGB space.
pub const EPSILON: f64 = 1e-6;
/// Tolerance for OKLab components after the forward matrices.
pub const OKLAB_EPSILON: f64 = 1e-1;
/// Tolerance for linear-light values after the inverse matrices.
pub const LINEAR_OVERSHOOT_EPSILON: f64 = 1e1;

pub const RGB_MIN: f64 = 0.0;
pub const RGB_MAX: f64 = 1.0;
pub const HUE_MIN: f64 = 0.0;
pub const HUE_MAX: f64 = 360.0;
pub const SATURATION_MIN: f64 = 0.0;
pub const SATURATION_MAX: f64 = 1.0;
pub const LUMINANCE_MIN: f64 = 0.0;
pub const LUMINANCE_MAX: f64 = 1.0;
pub const LIGHTNESS_MIN: f64 = 0.0;
pub const LIGHTNESS_MAX: f64 = 1.0;
pub const AB_MIN: f64 = -1.0;
pub const AB_MAX: f64 = 1.0;

/// Snap `value` into `[min, max]` if it overshoots by at most `epsilon`.
///
/// Anything further out (or NaN) is a precondition violation.
pub fn clamp_with_epsilon(
    what: &'static str,
    value: f64,
    min: f64,
    max: f64,
    epsilon: f64,
) -> Result<f64> {
    if value.is_nan() || value < min - epsilon || value > max + epsilon {
        return Err(ColorError::OutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(value.clamp(min, max))
}

/// Strict range check, no tolerance.
pub(crate) fn ensure_range(what: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    clamp_with_epsilon(what, value, min, max, 0.0)
}

pub(crate) fn ensure_hue(value: f64) -> Result<f64> {
    ensure_range("hue", value, HUE_MIN, HUE_MAX)
}

pub(crate) fn ensure_saturation(value: f64) -> Result<f64> {
    ensure_range("saturation", value, SATURATION_MIN, SATURATION_MAX)
}

pub(crate) fn ensure_luminance(value: f64) -> Result<f64> {
    ensure_range("luminance", value, LUMINANCE_MIN, LUMINANCE_MAX)
}

/// Core color type used throughout the pipeline.
///
/// Immutable; every operation returns a new value. The fields are private so
/// that a `Color` always satisfies the `[0, 1]` channel invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    /// Build a color from channels that must already lie in `[0, 1]`.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self> {
        Ok(Self {
            r: ensure_range("RGB component", r, RGB_MIN, RGB_MAX)?,
            g: ensure_range("RGB component", g, RGB_MIN, RGB_MAX)?,
            b: ensure_range("RGB component", b, RGB_MIN, RGB_MAX)?,
        })
    }

    /// Build a color, snapping channels that overshoot by at most `epsilon`.
    pub fn clamped(r: f64, g: f64, b: f64, epsilon: f64) -> Result<Self> {
        Ok(Self {
            r: clamp_with_epsilon("RGB component", r, RGB_MIN, RGB_MAX, epsilon)?,
            g: clamp_with_epsilon("RGB component", g, RGB_MIN, RGB_MAX, epsilon)?,
            b: clamp_with_epsilon("RGB component", b, RGB_MIN, RGB_MAX, epsilon)?,
        })
    }

    /// For compile-time tables; callers guarantee the range.
    pub(crate) const fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    pub fn r(self) -> f64 {
        self.r
    }

    pub fn g(self) -> f64 {
        self.g
    }

    pub fn b(self) -> f64 {
        self.b
    }

    pub fn components(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// 8-bit channels, truncated the same way hex encoding truncates.
    pub fn to_u8(self) -> [u8; 3] {
        [
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
        ]
    }

    /// Largest per-channel absolute difference.
    pub fn max_channel_diff(self, other: Color) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A color in OKLab: lightness `l` in `[0, 1]`, chroma axes `a`/`b` in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklabColor {
    l: f64,
    a: f64,
    b: f64,
}

impl OklabColor {
    pub fn new(l: f64, a: f64, b: f64) -> Result<Self> {
        Ok(Self {
            l: ensure_range("lightness", l, LIGHTNESS_MIN, LIGHTNESS_MAX)?,
            a: ensure_range("a component", a, AB_MIN, AB_MAX)?,
            b: ensure_range("b component", b, AB_MIN, AB_MAX)?,
        })
    }

    pub fn l(self) -> f64 {
        self.l
    }

    pub fn a(self) -> f64 {
        self.a
    }

    pub fn b(self) -> f64 {
        self.b
    }

    /// Polar radius, used as this crate's saturation metric.
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}
