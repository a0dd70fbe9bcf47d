//! Role selection: pick palette colors for the theme's semantic slots.

use log::trace;

use crate::color::{
    circular_hue_distance, clamp_with_epsilon, ensure_hue, ensure_saturation, Color, Result,
    LUMINANCE_MAX, SATURATION_MAX, SATURATION_MIN,
};
use crate::error::ColorError;

/// Default chroma boost applied to primary/secondary/accent.
pub const DEFAULT_SATURATION_INCREASE: f64 = 0.2;
/// Luminance added to the light member of a black/white pair.
pub const LIGHT_ROLE_LUMINANCE_BOOST: f64 = 0.4;

// The boosted target may overshoot before the final clamp.
const SATURATION_BOOST_EPSILON: f64 = 0.5;

/// Which of the three saturated picks a color plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsaRole {
    Primary,
    Secondary,
    Accent,
}

/// The three most characterful palette colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimarySecondaryAccent {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
}

impl PrimarySecondaryAccent {
    pub fn get(&self, role: PsaRole) -> Color {
        match role {
            PsaRole::Primary => self.primary,
            PsaRole::Secondary => self.secondary,
            PsaRole::Accent => self.accent,
        }
    }
}

/// A dark/light pair taken from the luminance extremes of the palette.
///
/// In a light theme `black` is the darker pick and `white` the lighter one;
/// a dark theme swaps them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackWhite {
    pub black: Color,
    pub white: Color,
}

/// How far a calibration color is pulled toward the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticTuning {
    /// Degrees of hue rotation per nudge.
    pub hue_nudge: f64,
    /// Chroma removed per decrease step.
    pub saturation_decrease: f64,
}

impl SemanticTuning {
    pub const NORMAL: SemanticTuning = SemanticTuning {
        hue_nudge: 10.0,
        saturation_decrease: 0.1,
    };

    pub const ALTERNATE: SemanticTuning = SemanticTuning {
        hue_nudge: 20.0,
        saturation_decrease: 0.2,
    };
}

impl Default for SemanticTuning {
    fn default() -> Self {
        Self::NORMAL
    }
}

fn ensure_len(colors: &[Color], required: usize) -> Result<()> {
    if colors.len() < required {
        return Err(ColorError::PaletteTooSmall {
            required,
            actual: colors.len(),
        });
    }
    Ok(())
}

fn boost_saturation(color: Color, increase: f64) -> Result<Color> {
    let target = clamp_with_epsilon(
        "saturation",
        color.saturation()? + increase,
        SATURATION_MIN,
        SATURATION_MAX,
        SATURATION_BOOST_EPSILON,
    )?;
    color.set_saturation(target)
}

/// Pick primary, secondary and accent colors.
///
/// Primary is the most saturated color. Accent is the color whose hue is
/// furthest from primary, secondary the next furthest. Ties keep palette
/// order. All three get `saturation_increase` extra chroma.
pub fn determine_primary_secondary_accent(
    colors: &[Color],
    saturation_increase: f64,
) -> Result<PrimarySecondaryAccent> {
    ensure_len(colors, 3)?;

    let mut by_saturation = colors
        .iter()
        .map(|&c| Ok((c.saturation()?, c)))
        .collect::<Result<Vec<(f64, Color)>>>()?;
    by_saturation.sort_by(|a, b| b.0.total_cmp(&a.0));

    let primary = by_saturation[0].1;
    let primary_hue = primary.hue()?;

    let mut by_distance = by_saturation[1..]
        .iter()
        .map(|&(_, c)| Ok((circular_hue_distance(primary_hue, c.hue()?), c)))
        .collect::<Result<Vec<(f64, Color)>>>()?;
    by_distance.sort_by(|a, b| b.0.total_cmp(&a.0));

    let accent = by_distance[0].1;
    let secondary = by_distance[1].1;
    trace!(
        "primary {primary} (hue {primary_hue:.1}), accent {accent} ({:.1}°), secondary {secondary} ({:.1}°)",
        by_distance[0].0,
        by_distance[1].0
    );

    Ok(PrimarySecondaryAccent {
        primary: boost_saturation(primary, saturation_increase)?,
        secondary: boost_saturation(secondary, saturation_increase)?,
        accent: boost_saturation(accent, saturation_increase)?,
    })
}

/// Pick a dark/light pair `index` steps in from the luminance extremes.
///
/// Both picks have their chroma capped at `max_saturation`. The member that
/// plays the light role (`white` in a light theme, `black` in a dark one)
/// is then brightened by [`LIGHT_ROLE_LUMINANCE_BOOST`].
pub fn determine_black_white(
    colors: &[Color],
    is_light_theme: bool,
    max_saturation: f64,
    index: usize,
) -> Result<BlackWhite> {
    let max_saturation = ensure_saturation(max_saturation)?;
    ensure_len(colors, index + 1)?;

    let mut ascending = colors
        .iter()
        .map(|&c| Ok((c.luminance()?, c)))
        .collect::<Result<Vec<(f64, Color)>>>()?;
    ascending.sort_by(|a, b| a.0.total_cmp(&b.0));

    let darkest = ascending[index].1;
    let lightest = ascending[ascending.len() - 1 - index].1;
    let (black, white) = if is_light_theme {
        (darkest, lightest)
    } else {
        (lightest, darkest)
    };

    let cap = |c: Color| -> Result<Color> { c.set_saturation(c.saturation()?.min(max_saturation)) };
    let mut black = cap(black)?;
    let mut white = cap(white)?;

    let brighten = |c: Color| -> Result<Color> {
        c.set_luminance((c.luminance()? + LIGHT_ROLE_LUMINANCE_BOOST).min(LUMINANCE_MAX))
    };
    if is_light_theme {
        white = brighten(white)?;
    } else {
        black = brighten(black)?;
    }

    Ok(BlackWhite { black, white })
}

/// Pull a fixed calibration color toward the palette.
///
/// Finds the palette color whose hue is numerically closest to the
/// calibration hue (plain difference, no wrap-around), then by circular
/// distance to it:
///
/// - up to 60°: rotate hue by two nudges
/// - up to 120°: rotate by one nudge and drop one saturation step
/// - up to 180°: keep hue, drop two saturation steps
pub fn determine_semantic_color(
    calibration: Color,
    colors: &[Color],
    tuning: SemanticTuning,
) -> Result<Color> {
    ensure_len(colors, 1)?;
    let nudge = ensure_hue(tuning.hue_nudge)?;
    let decrease = ensure_saturation(tuning.saturation_decrease)?;

    let calibration_hue = calibration.hue()?;

    let mut closest_hue = colors[0].hue()?;
    for color in &colors[1..] {
        let hue = color.hue()?;
        if (hue - calibration_hue).abs() < (closest_hue - calibration_hue).abs() {
            closest_hue = hue;
        }
    }

    let distance = circular_hue_distance(calibration_hue, closest_hue);
    trace!("calibration {calibration} hue {calibration_hue:.1}, nearest palette hue {closest_hue:.1}, distance {distance:.1}");

    let desaturate = |c: Color, amount: f64| -> Result<Color> {
        c.set_saturation((c.saturation()? - amount).max(SATURATION_MIN))
    };

    if distance <= 60.0 {
        calibration.set_hue((calibration_hue + 2.0 * nudge).rem_euclid(360.0))
    } else if distance <= 120.0 {
        let rotated = calibration.set_hue((calibration_hue + nudge).rem_euclid(360.0))?;
        desaturate(rotated, decrease)
    } else if distance <= 180.0 {
        desaturate(calibration, 2.0 * decrease)
    } else {
        Ok(calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color::new(r, g, b).unwrap()
    }

    fn gray(v: f64) -> Color {
        rgb(v, v, v)
    }

    fn close(a: Color, b: Color) -> bool {
        a.max_channel_diff(b) < 1e-4
    }

    // --- primary / secondary / accent ---

    #[test]
    fn psa_without_boost_picks_by_saturation_then_hue_distance() {
        let red = rgb(1.0, 0.0, 0.0);
        let green = rgb(0.0, 1.0, 0.0);
        let blue = rgb(0.0, 0.0, 1.0);
        let yellow = rgb(1.0, 1.0, 0.0);

        let psa = determine_primary_secondary_accent(&[red, green, blue, yellow], 0.0).unwrap();

        // Blue has the highest OKLab chroma; yellow sits furthest from it.
        assert!(close(psa.primary, blue), "primary {:?}", psa.primary);
        assert!(close(psa.accent, yellow), "accent {:?}", psa.accent);
        assert!(close(psa.secondary, red), "secondary {:?}", psa.secondary);
    }

    #[test]
    fn psa_accent_is_at_least_as_far_as_secondary() {
        let colors = [
            rgb(0.55, 0.40, 0.35),
            rgb(0.35, 0.45, 0.55),
            rgb(0.40, 0.50, 0.40),
            rgb(0.50, 0.40, 0.55),
        ];
        let psa = determine_primary_secondary_accent(&colors, 0.0).unwrap();
        let primary_hue = psa.primary.hue().unwrap();
        let accent_distance = circular_hue_distance(primary_hue, psa.accent.hue().unwrap());
        let secondary_distance = circular_hue_distance(primary_hue, psa.secondary.hue().unwrap());
        assert!(
            accent_distance + 1e-3 >= secondary_distance,
            "accent {accent_distance} < secondary {secondary_distance}"
        );
    }

    #[test]
    fn psa_boost_raises_chroma() {
        let colors = [
            rgb(0.55, 0.40, 0.35),
            rgb(0.35, 0.45, 0.55),
            rgb(0.40, 0.50, 0.40),
        ];
        let before = determine_primary_secondary_accent(&colors, 0.0).unwrap();
        let after = determine_primary_secondary_accent(&colors, 0.05).unwrap();
        for role in [PsaRole::Primary, PsaRole::Secondary, PsaRole::Accent] {
            let s0 = before.get(role).saturation().unwrap();
            let s1 = after.get(role).saturation().unwrap();
            assert!(s1 > s0, "{role:?}: {s1} should exceed {s0}");
        }
    }

    #[test]
    fn psa_needs_three_colors() {
        let err = determine_primary_secondary_accent(&[gray(0.1), gray(0.9)], 0.2).unwrap_err();
        assert_eq!(
            err,
            ColorError::PaletteTooSmall {
                required: 3,
                actual: 2
            }
        );
    }

    // --- black / white ---

    #[test]
    fn dark_theme_boosts_black_pick() {
        let colors = [gray(0.1), gray(0.3), gray(0.6), gray(0.9)];
        let bw = determine_black_white(&colors, false, 0.1, 0).unwrap();

        // Dark theme: black comes from the light end, white from the dark end.
        let original = gray(0.9).luminance().unwrap();
        assert!(bw.black.luminance().unwrap() >= original);
        assert!(close(bw.white, gray(0.1)), "white {:?}", bw.white);
    }

    #[test]
    fn light_theme_boosts_white_pick() {
        let colors = [gray(0.9), gray(0.1), gray(0.6), gray(0.3)];
        let bw = determine_black_white(&colors, true, 0.1, 0).unwrap();

        let original = gray(0.9).luminance().unwrap();
        assert!(bw.white.luminance().unwrap() >= original);
        assert!(close(bw.black, gray(0.1)), "black {:?}", bw.black);
    }

    #[test]
    fn index_moves_in_from_extremes() {
        let colors = [gray(0.1), gray(0.3), gray(0.6), gray(0.9)];
        let bw = determine_black_white(&colors, true, 0.1, 1).unwrap();
        assert!(close(bw.black, gray(0.3)), "black {:?}", bw.black);
        assert!(bw.white.luminance().unwrap() >= gray(0.6).luminance().unwrap());
    }

    #[test]
    fn black_white_caps_saturation() {
        let colors = [rgb(0.9, 0.1, 0.1), rgb(0.1, 0.1, 0.8), gray(0.5)];
        let bw = determine_black_white(&colors, false, 0.05, 0).unwrap();
        assert!(bw.white.saturation().unwrap() <= 0.05 + 1e-6);
    }

    #[test]
    fn black_white_index_out_of_range() {
        let colors = [gray(0.1), gray(0.5), gray(0.9)];
        assert_eq!(
            determine_black_white(&colors, true, 0.3, 3),
            Err(ColorError::PaletteTooSmall {
                required: 4,
                actual: 3
            })
        );
    }

    // --- semantic ---

    fn dusty_rose() -> Color {
        rgb(0.6, 0.45, 0.45)
    }

    #[test]
    fn semantic_near_hue_rotates_two_nudges() {
        let calibration = dusty_rose();
        let hue = calibration.hue().unwrap();
        let result =
            determine_semantic_color(calibration, &[calibration], SemanticTuning::NORMAL).unwrap();
        let new_hue = result.hue().unwrap();
        assert!((new_hue - (hue + 20.0)).abs() < 0.05, "hue {new_hue} vs {}", hue + 20.0);
    }

    #[test]
    fn semantic_mid_distance_rotates_once_and_desaturates() {
        let calibration = dusty_rose();
        let hue = calibration.hue().unwrap();
        let chroma = calibration.saturation().unwrap();
        let neighbor = calibration.set_hue(hue + 90.0).unwrap();
        let tuning = SemanticTuning {
            hue_nudge: 10.0,
            saturation_decrease: 0.02,
        };

        let result = determine_semantic_color(calibration, &[neighbor], tuning).unwrap();

        let new_hue = result.hue().unwrap();
        assert!((new_hue - (hue + 10.0)).abs() < 0.5, "hue {new_hue} vs {}", hue + 10.0);
        let new_chroma = result.saturation().unwrap();
        assert!((new_chroma - (chroma - 0.02)).abs() < 1e-3, "chroma {new_chroma}");
    }

    #[test]
    fn semantic_opposite_hue_desaturates_twice() {
        let calibration = dusty_rose();
        let hue = calibration.hue().unwrap();
        let opposite = calibration.set_hue(hue + 180.0).unwrap();

        let result =
            determine_semantic_color(calibration, &[opposite], SemanticTuning::NORMAL).unwrap();

        // Two 0.1 steps remove all of this color's chroma.
        assert!(result.saturation().unwrap() < 1e-4);
    }

    #[test]
    fn semantic_closest_uses_linear_hue_difference() {
        // `across_zero` is 20° away on the circle but 340° apart numerically,
        // so `far` (140° apart) wins the closest-hue search.
        let calibration = rgb(0.6, 0.45, 0.45).set_hue(10.0).unwrap();
        let across_zero = calibration.set_hue(350.0).unwrap();
        let far = calibration.set_hue(150.0).unwrap();

        let result = determine_semantic_color(
            calibration,
            &[across_zero, far],
            SemanticTuning::NORMAL,
        )
        .unwrap();

        // 140° lands in the two-decrease bucket, which drains this chroma.
        assert!(result.saturation().unwrap() < 1e-4);
    }

    #[test]
    fn semantic_rejects_bad_tuning() {
        let tuning = SemanticTuning {
            hue_nudge: 400.0,
            saturation_decrease: 0.1,
        };
        assert!(determine_semantic_color(dusty_rose(), &[dusty_rose()], tuning).is_err());
    }

    #[test]
    fn semantic_requires_palette() {
        assert!(determine_semantic_color(dusty_rose(), &[], SemanticTuning::NORMAL).is_err());
    }
}
