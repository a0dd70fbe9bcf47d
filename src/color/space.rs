//! Conversions between gamma-encoded sRGB, linear sRGB and OKLab.
//!
//! Each conversion snaps floating-point overshoot back into range with its
//! own tolerance and fails on anything beyond it:
//!
//! | conversion              | tolerance |
//! |-------------------------|-----------|
//! | gamma encode / decode   | `1e-6`    |
//! | linear sRGB → OKLab     | `1e-1`    |
//! | OKLab → linear sRGB     | `1e1`     |
//!
//! The OKLab → linear tolerance is deliberately huge: out-of-gamut OKLab
//! points map to linear values well outside `[0, 1]` and are clipped there.

use super::{
    clamp_with_epsilon, Color, OklabColor, Result, AB_MAX, AB_MIN, EPSILON,
    LIGHTNESS_MAX, LIGHTNESS_MIN, LINEAR_OVERSHOOT_EPSILON, OKLAB_EPSILON,
};

fn gamma_encode(value: f64) -> f64 {
    if value <= 0.003_130_8 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

fn gamma_decode(value: f64) -> f64 {
    if value <= 0.040_45 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

impl Color {
    /// Gamma-decode an sRGB color into linear light.
    pub fn srgb_to_linear(self) -> Result<Color> {
        Color::clamped(
            gamma_decode(self.r),
            gamma_decode(self.g),
            gamma_decode(self.b),
            EPSILON,
        )
    }

    /// Gamma-encode a linear-light color back into sRGB.
    pub fn linear_to_srgb(self) -> Result<Color> {
        Color::clamped(
            gamma_encode(self.r),
            gamma_encode(self.g),
            gamma_encode(self.b),
            EPSILON,
        )
    }

    /// Treat `self` as linear sRGB and convert to OKLab.
    pub fn linear_srgb_to_oklab(self) -> Result<OklabColor> {
        let (r, g, b) = (self.r, self.g, self.b);

        let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
        let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
        let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        let lightness = 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_;
        let a = 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_;
        let b = 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_;

        Ok(OklabColor {
            l: clamp_with_epsilon(
                "lightness",
                lightness,
                LIGHTNESS_MIN,
                LIGHTNESS_MAX,
                OKLAB_EPSILON,
            )?,
            a: clamp_with_epsilon("a component", a, AB_MIN, AB_MAX, OKLAB_EPSILON)?,
            b: clamp_with_epsilon("b component", b, AB_MIN, AB_MAX, OKLAB_EPSILON)?,
        })
    }

    /// sRGB → linear → OKLab.
    pub fn to_oklab(self) -> Result<OklabColor> {
        self.srgb_to_linear()?.linear_srgb_to_oklab()
    }

    /// OKLab → linear → sRGB.
    pub fn from_oklab(oklab: OklabColor) -> Result<Color> {
        oklab.to_linear_srgb()?.linear_to_srgb()
    }
}

impl OklabColor {
    /// Convert to linear sRGB, clipping out-of-gamut results into `[0, 1]`.
    pub fn to_linear_srgb(self) -> Result<Color> {
        let (lightness, a, b) = (self.l, self.a, self.b);

        let l_ = lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m_ = lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s_ = lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

        let l = l_.powi(3);
        let m = m_.powi(3);
        let s = s_.powi(3);

        let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
        let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
        let b = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

        Color::clamped(r, g, b, LINEAR_OVERSHOOT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Color> {
        let mut colors = Vec::new();
        for r in [0.0, 0.02, 0.04045, 0.25, 0.5, 0.8, 1.0] {
            for g in [0.0, 0.3, 0.7, 1.0] {
                for b in [0.0, 0.1, 0.9, 1.0] {
                    colors.push(Color::new(r, g, b).unwrap());
                }
            }
        }
        colors
    }

    #[test]
    fn gamma_round_trip() {
        for original in samples() {
            let recovered = original.srgb_to_linear().unwrap().linear_to_srgb().unwrap();
            assert!(
                original.max_channel_diff(recovered) < 1e-6,
                "gamma round trip drifted for {original:?}: {recovered:?}"
            );
        }
    }

    #[test]
    fn oklab_round_trip_in_linear_space() {
        for original in samples() {
            let recovered = original.linear_srgb_to_oklab().unwrap().to_linear_srgb().unwrap();
            assert!(
                original.max_channel_diff(recovered) < 1e-6,
                "oklab round trip drifted for {original:?}: {recovered:?}"
            );
        }
    }

    #[test]
    fn srgb_oklab_round_trip() {
        for original in samples() {
            let recovered = Color::from_oklab(original.to_oklab().unwrap()).unwrap();
            // Matrix round-off near zero is amplified by the 12.92 gamma slope.
            assert!(
                original.max_channel_diff(recovered) < 1e-5,
                "srgb round trip drifted for {original:?}: {recovered:?}"
            );
        }
    }

    #[test]
    fn linear_segment_below_threshold() {
        let c = Color::new(0.04, 0.0, 0.0).unwrap();
        let linear = c.srgb_to_linear().unwrap();
        assert!((linear.r() - 0.04 / 12.92).abs() < 1e-12);
    }

    #[test]
    fn white_is_full_lightness() {
        let white = Color::new(1.0, 1.0, 1.0).unwrap();
        let oklab = white.to_oklab().unwrap();
        assert!((oklab.l() - 1.0).abs() < 1e-6, "L = {}", oklab.l());
        assert!(oklab.chroma() < 1e-6, "chroma = {}", oklab.chroma());
    }

    #[test]
    fn black_is_zero_lightness() {
        let black = Color::new(0.0, 0.0, 0.0).unwrap();
        let oklab = black.to_oklab().unwrap();
        assert_eq!(oklab.l(), 0.0);
        assert_eq!(oklab.chroma(), 0.0);
    }

    #[test]
    fn out_of_gamut_oklab_is_clipped() {
        // Saturated blue pushed well beyond the sRGB gamut.
        let oklab = OklabColor::new(0.45, -0.05, -0.5).unwrap();
        let linear = oklab.to_linear_srgb().unwrap();
        for channel in linear.components() {
            assert!((0.0..=1.0).contains(&channel));
        }
        assert_eq!(linear.b(), 1.0);
    }

    #[test]
    fn extreme_oklab_overshoot_is_rejected() {
        // Linear blue lands near 20, beyond the 1e1 tolerance.
        let oklab = OklabColor::new(1.0, 0.0, -1.0).unwrap();
        assert!(oklab.to_linear_srgb().is_err());
    }
}
