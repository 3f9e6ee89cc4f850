//! Stylesheet export: turns a property map into a saveable CSS snippet.

use crate::tokens::PropertyMap;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "/* Theme generated by theme-forge */";

const USAGE_RULES: &str = "/* Usage example */
.button {
  background: var(--primary);
  color: var(--primary-contrast);
  border-radius: var(--radius);
  box-shadow: 0 0 calc(30px * var(--glow-i)) var(--glow);
}
.card {
  background: var(--surface);
  color: var(--text);
  border: 1px solid color-mix(in oklab, var(--primary) 20%, var(--surface));
  border-radius: var(--radius);
}";

/// Render the `:root` rule, optionally followed by usage rules.
pub fn to_css(vars: &PropertyMap, include_usage: bool) -> String {
    let mut css = format!("{}\n:root {{\n{}\n}}", HEADER, vars.to_declarations("  "));
    if include_usage {
        css.push_str("\n\n");
        css.push_str(USAGE_RULES);
    }
    css.push('\n');
    css
}

/// Write the stylesheet to `path`, creating parent directories.
pub fn write_css(path: &Path, css: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, css).with_context(|| format!("Failed to write stylesheet {:?}", path))?;
    tracing::info!("Exported {} bytes of CSS to {:?}", css.len(), path);
    Ok(path.to_path_buf())
}
