//! Theme parameters: the validated control record every other module consumes.

use crate::color::{clamp, format_number, round_to, wrap_hue};
use serde::{Deserialize, Serialize};

/// Light/dark mode, selects the lightness formula branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Dark => "dark",
            Mode::Light => "light",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Mode::Dark)
    }
}

/// Complete set of user-controlled theme parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeParameters {
    pub hue: f64,
    pub saturation: f64,
    pub glow_intensity: f64,
    pub accent_offset: i32,
    pub grain: bool,
    pub motion: bool,
    pub corner_radius: f64,
    pub contrast: f64,
    pub mode: Mode,
}

impl Default for ThemeParameters {
    fn default() -> Self {
        Self {
            hue: 190.0,
            saturation: 78.0,
            glow_intensity: 0.75,
            accent_offset: 22,
            grain: true,
            motion: true,
            corner_radius: 12.0,
            contrast: 1.03,
            mode: Mode::Dark,
        }
    }
}

/// Display strings for the numeric controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLabels {
    pub hue: String,
    pub saturation: String,
    pub glow: String,
    pub accent_offset: String,
    pub radius: String,
    pub contrast: String,
}

impl ThemeParameters {
    /// Apply the domain invariants: hue wraps, saturation and glow clamp,
    /// radius is non-negative. Non-finite numbers fall back to the defaults.
    ///
    /// Contrast is only made finite here; the compiler applies its own
    /// strictly positive floor before dividing by it.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f64, fallback: f64| {
            if value.is_finite() { value } else { fallback }
        };

        Self {
            hue: wrap_hue(finite_or(self.hue, defaults.hue)),
            saturation: clamp(finite_or(self.saturation, defaults.saturation), 0.0, 100.0),
            glow_intensity: clamp(
                finite_or(self.glow_intensity, defaults.glow_intensity),
                0.0,
                1.0,
            ),
            accent_offset: self.accent_offset,
            grain: self.grain,
            motion: self.motion,
            corner_radius: finite_or(self.corner_radius, defaults.corner_radius).max(0.0),
            contrast: finite_or(self.contrast, defaults.contrast),
            mode: self.mode,
        }
    }

    /// Hue of the secondary accent: `(hue + accent_offset) mod 360`.
    pub fn accent_hue(&self) -> f64 {
        wrap_hue(self.hue + f64::from(self.accent_offset))
    }

    /// Control labels as a settings panel shows them.
    pub fn labels(&self) -> ValueLabels {
        let glow = format!("{:.2}", round_to(self.glow_intensity, 2));
        let glow = match glow.strip_suffix(".00") {
            Some(whole) => format!("{}.0", whole),
            None => glow,
        };

        ValueLabels {
            hue: format_number(self.hue),
            saturation: format_number(self.saturation),
            glow,
            accent_offset: self.accent_offset.to_string(),
            radius: format_number(self.corner_radius),
            contrast: format!("{:.2}", self.contrast),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neon() {
        let p = ThemeParameters::default();
        assert_eq!(p.hue, 190.0);
        assert_eq!(p.accent_offset, 22);
        assert_eq!(p.mode, Mode::Dark);
    }

    #[test]
    fn test_sanitized_wraps_and_clamps() {
        let p = ThemeParameters {
            hue: 370.0,
            saturation: 140.0,
            glow_intensity: -0.5,
            corner_radius: -4.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(p.hue, 10.0);
        assert_eq!(p.saturation, 100.0);
        assert_eq!(p.glow_intensity, 0.0);
        assert_eq!(p.corner_radius, 0.0);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let p = ThemeParameters {
            hue: f64::NAN,
            contrast: f64::INFINITY,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(p.hue, 190.0);
        assert_eq!(p.contrast, 1.03);
    }

    #[test]
    fn test_sanitized_is_idempotent_for_valid_input() {
        let p = ThemeParameters::default();
        assert_eq!(p.sanitized(), p);
    }

    #[test]
    fn test_accent_hue_wraps() {
        let p = ThemeParameters {
            hue: 350.0,
            accent_offset: 30,
            ..Default::default()
        };
        assert_eq!(p.accent_hue(), 20.0);

        let negative = ThemeParameters {
            hue: 10.0,
            accent_offset: -40,
            ..Default::default()
        };
        assert_eq!(negative.accent_hue(), 330.0);
    }

    #[test]
    fn test_labels() {
        let p = ThemeParameters {
            glow_intensity: 1.0,
            contrast: 1.0,
            ..Default::default()
        };
        let labels = p.labels();
        assert_eq!(labels.glow, "1.0");
        assert_eq!(labels.contrast, "1.00");
        assert_eq!(labels.hue, "190");
        assert_eq!(labels.accent_offset, "22");

        let p = ThemeParameters {
            glow_intensity: 0.7,
            ..Default::default()
        };
        assert_eq!(p.labels().glow, "0.70");
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&Mode::Light).unwrap();
        assert_eq!(json, "\"light\"");
    }
}
