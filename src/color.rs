//! Numeric helpers and HSL color formatting shared by the compiler.
//!
//! Colors are emitted in the CSS Color 4 space-separated form
//! (`hsl(190 78% 60%)`, `hsla(190 78% 60% / 0.35)`) so repeated compiles of
//! the same parameters produce byte-identical text.

use std::fmt;

/// Clamp `value` into `[min, max]`.
///
/// NaN collapses to `min` so a bad input can never leak into CSS output.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Round to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_hue(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Format a number the way CSS custom properties expect it: shortest
/// round-trip representation, no trailing zeros, no exponent for the
/// magnitudes a theme uses.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// A color in hue/saturation/lightness form with an optional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees, [0, 360)
    pub hue: f64,
    /// Percent, [0, 100]
    pub saturation: f64,
    /// Percent, [0, 100]
    pub lightness: f64,
    pub alpha: Option<f64>,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: clamp(saturation, 0.0, 100.0),
            lightness: clamp(lightness, 0.0, 100.0),
            alpha: None,
        }
    }

    /// Same color with an alpha channel (clamped to [0, 1]).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: Some(clamp(alpha, 0.0, 1.0)),
            ..self
        }
    }

    /// Hue as printed: rounded to a whole degree and wrapped again so 359.6
    /// prints as 0 instead of 360.
    pub fn display_hue(&self) -> u16 {
        wrap_hue(self.hue.round()) as u16
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.display_hue();
        let s = format_number(round_to(self.saturation, 2));
        let l = format_number(round_to(self.lightness, 2));
        match self.alpha {
            Some(a) => write!(f, "hsla({} {}% {}% / {})", h, s, l, format_number(a)),
            None => write!(f, "hsl({} {}% {}%)", h, s, l),
        }
    }
}
