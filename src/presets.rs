//! Named preset themes offered as one-click starting points.

use crate::params::{Mode, ThemeParameters};

#[allow(clippy::too_many_arguments)]
const fn params(
    hue: f64,
    saturation: f64,
    glow_intensity: f64,
    accent_offset: i32,
    grain: bool,
    corner_radius: f64,
    contrast: f64,
    mode: Mode,
) -> ThemeParameters {
    ThemeParameters {
        hue,
        saturation,
        glow_intensity,
        accent_offset,
        grain,
        motion: true,
        corner_radius,
        contrast,
        mode,
    }
}

pub const PRESETS: [(&str, ThemeParameters); 5] = [
    ("neon", params(190.0, 78.0, 0.75, 22, true, 12.0, 1.03, Mode::Dark)),
    ("cyber", params(208.0, 80.0, 0.70, 30, true, 12.0, 1.05, Mode::Dark)),
    ("aurora", params(150.0, 70.0, 0.65, 18, true, 14.0, 1.02, Mode::Dark)),
    ("sunset", params(12.0, 78.0, 0.68, 40, false, 16.0, 1.00, Mode::Light)),
    ("royal", params(268.0, 64.0, 0.72, 26, true, 14.0, 1.06, Mode::Dark)),
];

/// Look up a preset by name (case-insensitive).
pub fn preset(name: &str) -> Option<ThemeParameters> {
    PRESETS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name.trim()))
        .map(|(_, params)| *params)
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::tokens::Token;

    #[test]
    fn test_all_presets_resolve() {
        for name in preset_names() {
            assert!(preset(name).is_some(), "preset '{}' missing", name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(preset("Aurora"), preset("aurora"));
        assert!(preset("nonexistent").is_none());
    }

    #[test]
    fn test_neon_matches_defaults() {
        assert_eq!(preset("neon"), Some(ThemeParameters::default()));
    }

    #[test]
    fn test_sunset_is_light_without_grain() {
        let sunset = preset("sunset").unwrap();
        assert_eq!(sunset.mode, Mode::Light);
        assert!(!sunset.grain);
    }

    #[test]
    fn test_presets_compile_to_distinct_primaries() {
        let mut primaries: Vec<String> = preset_names()
            .map(|name| {
                compile(&preset(name).unwrap())
                    .get(Token::Primary)
                    .unwrap()
                    .to_string()
            })
            .collect();
        primaries.sort();
        primaries.dedup();
        assert_eq!(primaries.len(), PRESETS.len());
    }

    #[test]
    fn test_presets_are_already_sanitized() {
        for (_, p) in PRESETS {
            assert_eq!(p.sanitized(), p);
        }
    }
}
