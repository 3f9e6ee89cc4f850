//! Configuration loader plus the data directory layout.
//!
//! Everything lives under `~/.theme-forge/` (or `THEME_FORGE_DIR`):
//! `config.toml` for user settings, `state.json` for the last-used theme and
//! `debug.log` for tracing output.

use crate::params::ThemeParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state.json";
const LOG_FILE: &str = "debug.log";
const DIR_ENV: &str = "THEME_FORGE_DIR";

/// Top-level configuration, every section optional in the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Control values used when neither a share link nor saved state says
    /// otherwise
    pub defaults: ThemeParameters,
    pub share: ShareConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Path share links are built on, e.g. "/themes/"
    pub base_path: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: String,
    pub include_usage: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "theme.css".to_string(),
            include_usage: true,
        }
    }
}

impl Config {
    /// Load `config.toml` from `dir`. A missing file means defaults; a
    /// malformed one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::config_path(dir);
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let mut config: Config =
            toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))?;
        config.defaults = config.defaults.sanitized();
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(Self::config_path(dir), contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the data directory: explicit override, then `THEME_FORGE_DIR`,
    /// then `~/.theme-forge`.
    pub fn base_dir(custom: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = custom {
            return Ok(dir.to_path_buf());
        }

        if let Ok(custom_dir) = std::env::var(DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".theme-forge"))
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    pub fn state_path(dir: &Path) -> PathBuf {
        dir.join(STATE_FILE)
    }

    pub fn log_path(dir: &Path) -> PathBuf {
        dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Mode;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.share.base_path, "/");
        assert_eq!(config.export.filename, "theme.css");
        assert!(config.export.include_usage);
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            Config::config_path(dir.path()),
            "[defaults]\nhue = 400\nmode = \"light\"\n\n[export]\ninclude_usage = false\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        // Sanitized on load
        assert_eq!(config.defaults.hue, 40.0);
        assert_eq!(config.defaults.mode, Mode::Light);
        assert_eq!(config.defaults.saturation, 78.0);
        assert!(!config.export.include_usage);
        assert_eq!(config.export.filename, "theme.css");
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(Config::config_path(dir.path()), "defaults = [").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.share.base_path = "/t/".to_string();
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = Config::base_dir(Some(Path::new("/tmp/custom"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/custom"));
        assert_eq!(Config::state_path(&dir), PathBuf::from("/tmp/custom/state.json"));
    }
}
