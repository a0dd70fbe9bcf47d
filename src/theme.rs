//! Assemble the full theme from a palette.
//!
//! Every role color is expanded into four variants by running the contrast
//! adjuster with different flags. The fourth variant first swaps the base
//! color for an alternate pick chosen by [`AlternateSource`].

use log::{debug, trace};
use serde::Serialize;

use crate::color::{Color, Result};
use crate::pipeline::assign::{
    determine_black_white, determine_primary_secondary_accent, determine_semantic_color,
    PrimarySecondaryAccent, PsaRole, SemanticTuning, DEFAULT_SATURATION_INCREASE,
};
use crate::pipeline::contrast::{adjust_contrast, ContrastMode, DEFAULT_K};
use crate::pipeline::detect::{
    average_luminance, average_saturation, is_light_theme, DEFAULT_LIGHT_THEME_THRESHOLD,
};

/// Reference colors for the six chromatic ANSI slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationColors {
    pub red: Color,
    pub green: Color,
    pub blue: Color,
    pub yellow: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for CalibrationColors {
    fn default() -> Self {
        Self {
            red: Color::from_unit_rgb(0.8, 0.0, 0.0),
            green: Color::from_unit_rgb(0.0, 0.8, 0.0),
            blue: Color::from_unit_rgb(0.0, 0.0, 0.8),
            yellow: Color::from_unit_rgb(0.8, 0.8, 0.0),
            magenta: Color::from_unit_rgb(0.8, 0.0, 0.8),
            cyan: Color::from_unit_rgb(0.0, 0.8, 0.8),
        }
    }
}

/// Every knob the theme derivation exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub light_theme_threshold: f64,
    /// Flip the light/dark classification.
    pub alternate: bool,
    /// Slope of the contrast band.
    pub k: f64,
    pub high_contrast: bool,
    pub saturation_increase: f64,
    pub alternate_saturation_increase: f64,
    pub text_max_saturation: f64,
    pub selection_max_saturation: f64,
    pub alternate_max_saturation: f64,
    pub semantic: SemanticTuning,
    pub alternate_semantic: SemanticTuning,
    pub calibration: CalibrationColors,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light_theme_threshold: DEFAULT_LIGHT_THEME_THRESHOLD,
            alternate: false,
            k: DEFAULT_K,
            high_contrast: false,
            saturation_increase: DEFAULT_SATURATION_INCREASE,
            alternate_saturation_increase: 0.4,
            text_max_saturation: 0.1,
            selection_max_saturation: 0.3,
            alternate_max_saturation: 0.3,
            semantic: SemanticTuning::NORMAL,
            alternate_semantic: SemanticTuning::ALTERNATE,
            calibration: CalibrationColors::default(),
        }
    }
}

/// The four contrast variants of one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThemeColorSet {
    pub normal: Color,
    pub high_contrast: Color,
    pub inverted: Color,
    pub alternate: Color,
}

/// UI roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapColors {
    pub primary: ThemeColorSet,
    pub secondary: ThemeColorSet,
    pub accent: ThemeColorSet,
    pub text: ThemeColorSet,
    pub background: ThemeColorSet,
    pub text_selection: ThemeColorSet,
    pub selection: ThemeColorSet,
    pub danger: ThemeColorSet,
    pub warning: ThemeColorSet,
    pub info: ThemeColorSet,
    pub success: ThemeColorSet,
}

impl BootstrapColors {
    /// Roles in display order, with their serialized names.
    pub fn entries(&self) -> [(&'static str, &ThemeColorSet); 11] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("text", &self.text),
            ("background", &self.background),
            ("textSelection", &self.text_selection),
            ("selection", &self.selection),
            ("danger", &self.danger),
            ("warning", &self.warning),
            ("info", &self.info),
            ("success", &self.success),
        ]
    }
}

/// The 16 ANSI slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalColors {
    pub black: ThemeColorSet,
    pub white: ThemeColorSet,
    pub bright_black: ThemeColorSet,
    pub bright_white: ThemeColorSet,
    pub red: ThemeColorSet,
    pub bright_red: ThemeColorSet,
    pub green: ThemeColorSet,
    pub bright_green: ThemeColorSet,
    pub blue: ThemeColorSet,
    pub bright_blue: ThemeColorSet,
    pub yellow: ThemeColorSet,
    pub bright_yellow: ThemeColorSet,
    pub magenta: ThemeColorSet,
    pub bright_magenta: ThemeColorSet,
    pub cyan: ThemeColorSet,
    pub bright_cyan: ThemeColorSet,
}

impl TerminalColors {
    /// Slots in display order, with their serialized names.
    pub fn entries(&self) -> [(&'static str, &ThemeColorSet); 16] {
        [
            ("black", &self.black),
            ("white", &self.white),
            ("brightBlack", &self.bright_black),
            ("brightWhite", &self.bright_white),
            ("red", &self.red),
            ("brightRed", &self.bright_red),
            ("green", &self.green),
            ("brightGreen", &self.bright_green),
            ("blue", &self.blue),
            ("brightBlue", &self.bright_blue),
            ("yellow", &self.yellow),
            ("brightYellow", &self.bright_yellow),
            ("magenta", &self.magenta),
            ("brightMagenta", &self.bright_magenta),
            ("cyan", &self.cyan),
            ("brightCyan", &self.bright_cyan),
        ]
    }
}

/// A fully derived theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub average_luminance: f64,
    pub average_saturation: f64,
    pub is_light_theme: bool,
    pub colors: Vec<Color>,
    pub bootstrap: BootstrapColors,
    pub terminal: TerminalColors,
}

/// Where a role's alternate variant gets its base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternateSource {
    /// Re-pick with the stronger saturation boost.
    PrimarySecondaryAccent(PsaRole),
    /// Re-pick the black/white pair one step further in from `index`.
    BlackWhite { index: usize },
    /// Re-run the semantic mapper with the stronger tuning.
    Semantic,
    /// Keep the base color.
    Default,
}

/// Smallest palette [`build_theme`] accepts: the selection pair sits two
/// steps in from the extremes and its alternate one further.
pub const MIN_PALETTE_SIZE: usize = 4;

struct Assembler<'a> {
    colors: &'a [Color],
    config: &'a ThemeConfig,
    average_luminance: f64,
    is_light_theme: bool,
}

impl Assembler<'_> {
    fn alternate_base(&self, base: Color, source: AlternateSource) -> Result<Color> {
        match source {
            AlternateSource::PrimarySecondaryAccent(role) => {
                let boosted = determine_primary_secondary_accent(
                    self.colors,
                    self.config.alternate_saturation_increase,
                )?;
                Ok(boosted.get(role))
            }
            AlternateSource::BlackWhite { index } => Ok(determine_black_white(
                self.colors,
                self.is_light_theme,
                self.config.alternate_max_saturation,
                index + 1,
            )?
            .black),
            AlternateSource::Semantic => {
                determine_semantic_color(base, self.colors, self.config.alternate_semantic)
            }
            AlternateSource::Default => Ok(base),
        }
    }

    fn adjust(&self, color: Color, is_light: bool, high_contrast: bool) -> Result<Color> {
        let mode = ContrastMode {
            is_light,
            invert: self.is_light_theme,
            high_contrast,
        };
        adjust_contrast(color, self.average_luminance, mode, self.config.k)
    }

    /// Expand `base` into its four variants.
    ///
    /// `invert` flips which end of the band the role targets, for roles
    /// that sit on top of the background (text, accents).
    fn color_set(
        &self,
        base: Color,
        invert: bool,
        source: AlternateSource,
    ) -> Result<ThemeColorSet> {
        let is_light = self.is_light_theme != invert;
        let high_contrast = self.config.high_contrast;

        let set = ThemeColorSet {
            normal: self.adjust(base, is_light, high_contrast)?,
            high_contrast: self.adjust(base, is_light, !high_contrast)?,
            inverted: self.adjust(base, !is_light, high_contrast)?,
            alternate: self.adjust(self.alternate_base(base, source)?, is_light, high_contrast)?,
        };
        trace!("{base} ({source:?}, invert {invert}) -> {set:?}");
        Ok(set)
    }

    fn psa_set(&self, psa: &PrimarySecondaryAccent, role: PsaRole) -> Result<ThemeColorSet> {
        self.color_set(psa.get(role), true, AlternateSource::PrimarySecondaryAccent(role))
    }

    /// The semantic slot for one calibration color, as (normal, bright).
    fn semantic_pair(&self, calibration: Color) -> Result<(ThemeColorSet, ThemeColorSet)> {
        let color = determine_semantic_color(calibration, self.colors, self.config.semantic)?;
        let normal = self.color_set(color, true, AlternateSource::Semantic)?;
        // The bright slot re-derives the same mapping rather than a brighter color.
        let bright_color = determine_semantic_color(calibration, self.colors, self.config.semantic)?;
        let bright = self.color_set(bright_color, true, AlternateSource::Semantic)?;
        Ok((normal, bright))
    }
}

/// Derive the complete theme for `colors`.
pub fn build_theme(colors: &[Color], config: &ThemeConfig) -> Result<Theme> {
    if colors.len() < MIN_PALETTE_SIZE {
        return Err(crate::error::ColorError::PaletteTooSmall {
            required: MIN_PALETTE_SIZE,
            actual: colors.len(),
        });
    }

    let avg_luminance = average_luminance(colors)?;
    let avg_saturation = average_saturation(colors)?;
    let light = is_light_theme(avg_luminance, config.light_theme_threshold, config.alternate)?;
    debug!(
        "palette of {}: average luminance {avg_luminance:.4}, average saturation {avg_saturation:.4}, {} theme",
        colors.len(),
        if light { "light" } else { "dark" }
    );

    let asm = Assembler {
        colors,
        config,
        average_luminance: avg_luminance,
        is_light_theme: light,
    };

    let psa = determine_primary_secondary_accent(colors, config.saturation_increase)?;

    let base_pair = determine_black_white(colors, light, config.text_max_saturation, 0)?;
    let (text_color, background_color) = (base_pair.black, base_pair.white);
    let selection_pair = determine_black_white(colors, light, config.selection_max_saturation, 2)?;
    let (selection_color, text_selection_color) = (selection_pair.black, selection_pair.white);

    let bw = |index| AlternateSource::BlackWhite { index };

    let calibration = &config.calibration;
    let (red, bright_red) = asm.semantic_pair(calibration.red)?;
    let (green, bright_green) = asm.semantic_pair(calibration.green)?;
    let (blue, bright_blue) = asm.semantic_pair(calibration.blue)?;
    let (yellow, bright_yellow) = asm.semantic_pair(calibration.yellow)?;
    let (magenta, bright_magenta) = asm.semantic_pair(calibration.magenta)?;
    let (cyan, bright_cyan) = asm.semantic_pair(calibration.cyan)?;

    let terminal = TerminalColors {
        black: asm.color_set(background_color, false, bw(0))?,
        white: asm.color_set(text_color, true, bw(0))?,
        bright_black: asm.color_set(selection_color, false, bw(0))?,
        bright_white: asm.color_set(text_selection_color, true, bw(0))?,
        red,
        bright_red,
        green,
        bright_green,
        blue,
        bright_blue,
        yellow,
        bright_yellow,
        magenta,
        bright_magenta,
        cyan,
        bright_cyan,
    };

    let bootstrap = BootstrapColors {
        primary: asm.psa_set(&psa, PsaRole::Primary)?,
        secondary: asm.psa_set(&psa, PsaRole::Secondary)?,
        accent: asm.psa_set(&psa, PsaRole::Accent)?,
        text: asm.color_set(text_color, true, bw(0))?,
        background: asm.color_set(background_color, false, bw(0))?,
        text_selection: asm.color_set(selection_color, true, bw(2))?,
        selection: asm.color_set(selection_color, false, bw(2))?,
        danger: terminal.red,
        warning: terminal.yellow,
        info: terminal.cyan,
        success: terminal.green,
    };

    Ok(Theme {
        average_luminance: avg_luminance,
        average_saturation: avg_saturation,
        is_light_theme: light,
        colors: colors.to_vec(),
        bootstrap,
        terminal,
    })
}
