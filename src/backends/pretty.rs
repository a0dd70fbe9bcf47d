use std::fmt::Write;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::theme::{Theme, ThemeColorSet};

use super::ThemeBackend;

/// Human-readable listing with every hex shown as a colored swatch.
pub struct PrettyBackend;

impl ThemeBackend for PrettyBackend {
    fn name(&self) -> &str {
        "pretty"
    }

    fn serialize(&self, theme: &Theme) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "Average luminance = {}", theme.average_luminance)?;
        writeln!(out, "Average saturation = {}", theme.average_saturation)?;
        writeln!(out, "Is light theme = {}", theme.is_light_theme)?;
        writeln!(out)?;

        writeln!(out, "{}", "Colors:".bold())?;
        for (i, color) in theme.colors.iter().enumerate() {
            writeln!(out, "  {i}.: {}", color.to_hex_pretty())?;
        }

        writeln!(out)?;
        writeln!(out, "{}", "Bootstrap:".bold())?;
        for (name, set) in theme.bootstrap.entries() {
            write_set(&mut out, &capitalize(name), set)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", "Terminal:".bold())?;
        for (name, set) in theme.terminal.entries() {
            write_set(&mut out, name, set)?;
        }

        Ok(out)
    }
}

fn write_set(out: &mut String, name: &str, set: &ThemeColorSet) -> std::fmt::Result {
    writeln!(out, "  {name}:")?;
    for (variant, color) in [
        ("normal", set.normal),
        ("high_contrast", set.high_contrast),
        ("inverted", set.inverted),
        ("alternate", set.alternate),
    ] {
        writeln!(out, "    {variant}: {}", color.to_hex_pretty())?;
    }
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ANSI_RESET};
    use crate::theme::{build_theme, ThemeConfig};

    fn test_theme() -> Theme {
        let colors: Vec<Color> = [
            (0.95, 0.93, 0.90),
            (0.85, 0.80, 0.75),
            (0.90, 0.60, 0.55),
            (0.60, 0.80, 0.70),
            (0.65, 0.70, 0.90),
            (0.98, 0.90, 0.60),
            (0.30, 0.25, 0.25),
            (0.75, 0.75, 0.80),
        ]
        .iter()
        .map(|&(r, g, b)| Color::new(r, g, b).unwrap())
        .collect();
        build_theme(&colors, &ThemeConfig::default()).unwrap()
    }

    #[test]
    fn header_lists_statistics() {
        let theme = test_theme();
        let out = PrettyBackend.serialize(&theme).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], format!("Average luminance = {}", theme.average_luminance));
        assert_eq!(lines[1], format!("Average saturation = {}", theme.average_saturation));
        assert_eq!(lines[2], "Is light theme = true");
    }

    #[test]
    fn palette_is_indexed_with_swatches() {
        let theme = test_theme();
        let out = PrettyBackend.serialize(&theme).unwrap();

        for (i, color) in theme.colors.iter().enumerate() {
            assert!(
                out.contains(&format!("  {i}.: {}", color.to_hex_pretty())),
                "missing palette entry {i}"
            );
        }
    }

    #[test]
    fn sections_cover_every_role() {
        let out = PrettyBackend.serialize(&test_theme()).unwrap();

        assert!(out.contains("Bootstrap:"));
        assert!(out.contains("Terminal:"));
        for role in ["  Primary:", "  TextSelection:", "  Success:"] {
            assert!(out.contains(role), "missing {role}");
        }
        for slot in ["  black:", "  brightWhite:", "  brightCyan:"] {
            assert!(out.contains(slot), "missing {slot}");
        }
        // 27 roles, four variants each.
        let variants = out.lines().filter(|l| l.starts_with("    ")).count();
        assert_eq!(variants, 27 * 4);
    }

    #[test]
    fn variant_lines_round_trip_through_hex_decode() {
        let theme = test_theme();
        let out = PrettyBackend.serialize(&theme).unwrap();

        let line = out
            .lines()
            .find(|l| l.starts_with("    normal: "))
            .unwrap();
        let swatch = line.trim_start_matches("    normal: ");
        assert!(swatch.ends_with(ANSI_RESET));
        assert_eq!(
            Color::from_hex(swatch).unwrap().to_hex(),
            theme.bootstrap.primary.normal.to_hex()
        );
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("textSelection"), "TextSelection");
        assert_eq!(capitalize(""), "");
    }
}
