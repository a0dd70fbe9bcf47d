pub mod json;
pub mod pretty;

use std::path::Path;

use anyhow::{Context, Result};

use crate::theme::Theme;

pub use json::JsonBackend;
pub use pretty::PrettyBackend;

/// Renders a derived theme into some output format.
pub trait ThemeBackend {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Render the theme to a string.
    fn serialize(&self, theme: &Theme) -> Result<String>;

    /// Render the theme and write it to `path`.
    fn write_to(&self, theme: &Theme, path: &Path) -> Result<()> {
        let content = self.serialize(theme)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {} theme to {}", self.name(), path.display()))?;
        Ok(())
    }
}
