use super::{Color, Result, EPSILON};
use crate::error::ColorError;

/// SGR reset appended after a pretty hex swatch.
pub const ANSI_RESET: &str = "\x1b[0m";

impl Color {
    /// Serialize to lowercase hex `#rrggbb`.
    ///
    /// Channels are scaled by 255 and truncated, not rounded.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Hex text wrapped in a 24-bit foreground escape, for terminal display.
    pub fn to_hex_pretty(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("\x1b[38;2;{r};{g};{b}m{}{ANSI_RESET}", self.to_hex())
    }

    /// Encode as hex, optionally as a colored swatch.
    pub fn hex_encode(self, pretty: bool) -> String {
        if pretty {
            self.to_hex_pretty()
        } else {
            self.to_hex()
        }
    }

    /// Parse `#rrggbb` / `rrggbb`, also accepting the output of
    /// [`Color::to_hex_pretty`].
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut hex = text.trim();
        if hex.starts_with("\x1b[") {
            hex = hex.split_once('m').map_or(hex, |(_, rest)| rest);
            hex = hex.strip_suffix(ANSI_RESET).unwrap_or(hex);
        }
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(text.to_string()));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(text.to_string()))
        };
        let (r, g, b) = (byte(0..2)?, byte(2..4)?, byte(4..6)?);

        Color::clamped(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            EPSILON,
        )
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}
