use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::Color;
use crate::theme::{BootstrapColors, TerminalColors, Theme};

use super::ThemeBackend;

/// JSON theme document.
///
/// Compact by default; `indent` switches to two-space pretty printing.
pub struct JsonBackend {
    pub indent: bool,
}

/// The serialized shape: statistics other than the light flag are left out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeDocument<'a> {
    is_light_theme: bool,
    colors: &'a [Color],
    bootstrap: &'a BootstrapColors,
    terminal: &'a TerminalColors,
}

impl<'a> From<&'a Theme> for ThemeDocument<'a> {
    fn from(theme: &'a Theme) -> Self {
        Self {
            is_light_theme: theme.is_light_theme,
            colors: &theme.colors,
            bootstrap: &theme.bootstrap,
            terminal: &theme.terminal,
        }
    }
}

impl ThemeBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn serialize(&self, theme: &Theme) -> Result<String> {
        let document = ThemeDocument::from(theme);
        let out = if self.indent {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        out.context("failed to serialize theme as JSON")
    }
}
