//! Theme compiler: derives the full palette from a parameter record.
//!
//! `compile` is pure and total. Inputs are sanitized again on entry and
//! every lightness passes through a clamp, so extreme values (contrast of 0,
//! negative saturation, NaN) land on documented bounds instead of producing
//! invalid CSS.

use crate::color::{clamp, format_number, Hsl};
use crate::params::{Mode, ThemeParameters};
use crate::tokens::{PropertyMap, Token};

/// Contrast floor applied before the dark branch divides by it
pub const MIN_CONTRAST: f64 = 0.01;

/// Primary lightness per mode
const PRIMARY_LIGHTNESS_DARK: f64 = 60.0;
const PRIMARY_LIGHTNESS_LIGHT: f64 = 52.0;

/// Primary lightness above which text on primary switches to near-black
const PRIMARY_CONTRAST_THRESHOLD: f64 = 55.0;
const NEAR_BLACK: &str = "#0b0f14";
const NEAR_WHITE: &str = "#f7f9fb";

const RING_ALPHA: f64 = 0.35;
const GLOW_ALPHA: f64 = 0.6;
const GRAIN_OPACITY: &str = "0.25";

/// Saturation factors that turn the primary hue into tinted neutrals
const BACKGROUND_SAT: f64 = 0.26;
const SURFACE_SAT: f64 = 0.26;
const ELEVATED_SAT: f64 = 0.28;
const TEXT_SAT: f64 = 0.18;
const MUTED_SAT: f64 = 0.14;

/// Lightness for every neutral role, chosen per mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessLadder {
    pub background: f64,
    pub surface: f64,
    pub elevated: f64,
    pub text: f64,
    pub muted: f64,
}

impl LightnessLadder {
    pub fn for_mode(mode: Mode, contrast: f64) -> Self {
        let c = if contrast.is_finite() {
            contrast.max(MIN_CONTRAST)
        } else {
            1.0
        };

        match mode {
            // Contrast divides dark surfaces and multiplies light text
            Mode::Dark => Self {
                background: clamp(7.0 / c, 2.0, 14.0),
                surface: clamp(10.0 / c, 4.0, 20.0),
                elevated: clamp(12.0 / c, 6.0, 24.0),
                text: clamp(92.0 * c, 70.0, 98.0),
                muted: clamp(64.0 * (c + 0.05).min(1.1), 35.0, 80.0),
            },
            Mode::Light => {
                let k = c - 1.0;
                Self {
                    background: clamp(98.0 - k * 8.0, 90.0, 99.0),
                    surface: clamp(96.0 - k * 7.0, 86.0, 98.0),
                    elevated: clamp(92.0 - k * 8.0, 80.0, 96.0),
                    text: clamp(12.0 - k * 12.0, 4.0, 24.0),
                    muted: clamp(36.0 - k * 8.0, 18.0, 50.0),
                }
            }
        }
    }
}

/// Every derived color of a theme before it is flattened to CSS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub ladder: LightnessLadder,
    pub background: Hsl,
    pub surface: Hsl,
    pub elevated: Hsl,
    pub text: Hsl,
    pub muted: Hsl,
    pub primary: Hsl,
    pub accent: Hsl,
    pub ring: Hsl,
    pub glow: Hsl,
    pub primary_contrast: &'static str,
}

impl Palette {
    pub fn accent_hue(&self) -> f64 {
        self.accent.hue
    }
}

/// Derive the palette for `params`.
pub fn derive_palette(params: &ThemeParameters) -> Palette {
    let p = params.sanitized();
    let hue = p.hue;
    let sat = p.saturation;
    let ladder = LightnessLadder::for_mode(p.mode, p.contrast);

    let primary_l = match p.mode {
        Mode::Dark => PRIMARY_LIGHTNESS_DARK,
        Mode::Light => PRIMARY_LIGHTNESS_LIGHT,
    };
    let accent_nudge = if p.mode.is_dark() { 4.0 } else { -2.0 };

    let primary = Hsl::new(hue, sat, primary_l);
    let neutral = |factor: f64, lightness: f64| {
        Hsl::new(hue, clamp(sat * factor, 0.0, 100.0), lightness)
    };

    Palette {
        ladder,
        background: neutral(BACKGROUND_SAT, ladder.background),
        surface: neutral(SURFACE_SAT, ladder.surface),
        elevated: neutral(ELEVATED_SAT, ladder.elevated),
        text: neutral(TEXT_SAT, ladder.text),
        muted: neutral(MUTED_SAT, ladder.muted),
        primary,
        accent: Hsl::new(
            p.accent_hue(),
            clamp(sat + 6.0, 0.0, 100.0),
            clamp(primary_l + accent_nudge, 0.0, 100.0),
        ),
        ring: primary.with_alpha(RING_ALPHA),
        glow: primary.with_alpha(GLOW_ALPHA),
        primary_contrast: if primary_l > PRIMARY_CONTRAST_THRESHOLD {
            NEAR_BLACK
        } else {
            NEAR_WHITE
        },
    }
}

/// Compile `params` into the ordered custom property map.
pub fn compile(params: &ThemeParameters) -> PropertyMap {
    let p = params.sanitized();
    let palette = derive_palette(&p);

    let entries = Token::ALL
        .into_iter()
        .map(|token| {
            let value = match token {
                Token::Background => palette.background.to_string(),
                Token::Surface => palette.surface.to_string(),
                Token::Elevated => palette.elevated.to_string(),
                Token::Text => palette.text.to_string(),
                Token::Muted => palette.muted.to_string(),
                Token::Primary => palette.primary.to_string(),
                Token::PrimaryContrast => palette.primary_contrast.to_string(),
                Token::Accent => palette.accent.to_string(),
                Token::Ring => palette.ring.to_string(),
                Token::Glow => palette.glow.to_string(),
                Token::Radius => format!("{}px", format_number(p.corner_radius)),
                Token::GlowIntensity => format_number(p.glow_intensity),
                Token::Contrast => format_number(p.contrast),
                Token::GrainOpacity => {
                    if p.grain {
                        GRAIN_OPACITY.to_string()
                    } else {
                        "0".to_string()
                    }
                }
            };
            (token, value)
        })
        .collect();

    PropertyMap::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use proptest::prelude::*;

    fn neon() -> ThemeParameters {
        presets::preset("neon").expect("neon preset exists")
    }

    #[test]
    fn test_neon_primary_and_contrast_text() {
        let map = compile(&neon());
        assert_eq!(map.get(Token::Primary), Some("hsl(190 78% 60%)"));
        assert_eq!(map.get(Token::PrimaryContrast), Some(NEAR_BLACK));
    }

    #[test]
    fn test_neon_full_map() {
        let map = compile(&neon());
        let expected = [
            ("--bg", "hsl(190 20.28% 6.8%)"),
            ("--surface", "hsl(190 20.28% 9.71%)"),
            ("--elevated", "hsl(190 21.84% 11.65%)"),
            ("--text", "hsl(190 14.04% 94.76%)"),
            ("--muted", "hsl(190 10.92% 69.12%)"),
            ("--primary", "hsl(190 78% 60%)"),
            ("--primary-contrast", "#0b0f14"),
            ("--accent", "hsl(212 84% 64%)"),
            ("--ring", "hsla(190 78% 60% / 0.35)"),
            ("--glow", "hsla(190 78% 60% / 0.6)"),
            ("--radius", "12px"),
            ("--glow-i", "0.75"),
            ("--contrast", "1.03"),
            ("--grid-opacity", "0.25"),
        ];
        let actual: Vec<_> = map.iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_light_primary_uses_near_white_text() {
        let p = ThemeParameters {
            mode: Mode::Light,
            ..neon()
        };
        let map = compile(&p);
        assert_eq!(map.get(Token::Primary), Some("hsl(190 78% 52%)"));
        assert_eq!(map.get(Token::PrimaryContrast), Some(NEAR_WHITE));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let p = neon();
        assert_eq!(compile(&p), compile(&p));
    }

    #[test]
    fn test_accent_hue_wraps_past_360() {
        let p = ThemeParameters {
            hue: 350.0,
            accent_offset: 30,
            ..neon()
        };
        let palette = derive_palette(&p);
        assert_eq!(palette.accent_hue(), 20.0);
        assert!(compile(&p).get(Token::Accent).unwrap().starts_with("hsl(20 "));
    }

    #[test]
    fn test_zero_contrast_dark_hits_upper_bound() {
        let ladder = LightnessLadder::for_mode(Mode::Dark, 0.0);
        assert_eq!(ladder.background, 14.0);
        assert_eq!(ladder.surface, 20.0);
        assert_eq!(ladder.elevated, 24.0);
        assert_eq!(ladder.text, 70.0);
        assert_eq!(ladder.muted, 35.0);

        let p = ThemeParameters {
            contrast: 0.0,
            ..neon()
        };
        let bg = compile(&p).get(Token::Background).unwrap().to_string();
        assert_eq!(bg, "hsl(190 20.28% 14%)");
    }

    #[test]
    fn test_negative_contrast_does_not_flip_sign() {
        let ladder = LightnessLadder::for_mode(Mode::Dark, -3.0);
        assert_eq!(ladder.background, 14.0);
    }

    #[test]
    fn test_grain_off_zero_opacity() {
        let p = ThemeParameters {
            grain: false,
            ..neon()
        };
        assert_eq!(compile(&p).get(Token::GrainOpacity), Some("0"));
    }

    #[test]
    fn test_mode_switch_changes_lightness_keeps_hue() {
        let dark = derive_palette(&neon());
        let light = derive_palette(&ThemeParameters {
            mode: Mode::Light,
            ..neon()
        });

        let pairs = [
            (dark.background, light.background),
            (dark.surface, light.surface),
            (dark.elevated, light.elevated),
            (dark.text, light.text),
            (dark.muted, light.muted),
            (dark.primary, light.primary),
            (dark.accent, light.accent),
            (dark.ring, light.ring),
            (dark.glow, light.glow),
        ];
        for (d, l) in pairs {
            assert_ne!(d.lightness, l.lightness);
            assert_eq!(d.display_hue(), l.display_hue());
        }

        let dark_map = compile(&neon());
        let light_map = compile(&ThemeParameters {
            mode: Mode::Light,
            ..neon()
        });
        for token in [
            Token::Background,
            Token::Surface,
            Token::Elevated,
            Token::Text,
            Token::Muted,
            Token::Primary,
            Token::PrimaryContrast,
            Token::Accent,
            Token::Ring,
            Token::Glow,
        ] {
            assert_ne!(dark_map.get(token), light_map.get(token), "{:?}", token);
        }
    }

    #[test]
    fn test_saturation_scaling_clamped() {
        let p = ThemeParameters {
            saturation: 100.0,
            ..neon()
        };
        let palette = derive_palette(&p);
        assert_eq!(palette.background.saturation, 26.0);
        assert_eq!(palette.accent.saturation, 100.0);
    }

    fn within(value: f64, min: f64, max: f64) -> bool {
        value >= min && value <= max
    }

    proptest! {
        #[test]
        fn ladder_stays_within_bounds(
            contrast in prop_oneof![
                any::<f64>(),
                -10.0f64..10.0,
                Just(0.0),
                Just(f64::NAN),
                Just(f64::INFINITY),
                Just(f64::NEG_INFINITY),
            ],
            light in any::<bool>(),
        ) {
            let mode = if light { Mode::Light } else { Mode::Dark };
            let l = LightnessLadder::for_mode(mode, contrast);
            match mode {
                Mode::Dark => {
                    prop_assert!(within(l.background, 2.0, 14.0));
                    prop_assert!(within(l.surface, 4.0, 20.0));
                    prop_assert!(within(l.elevated, 6.0, 24.0));
                    prop_assert!(within(l.text, 70.0, 98.0));
                    prop_assert!(within(l.muted, 35.0, 80.0));
                }
                Mode::Light => {
                    prop_assert!(within(l.background, 90.0, 99.0));
                    prop_assert!(within(l.surface, 86.0, 98.0));
                    prop_assert!(within(l.elevated, 80.0, 96.0));
                    prop_assert!(within(l.text, 4.0, 24.0));
                    prop_assert!(within(l.muted, 18.0, 50.0));
                }
            }
        }

        #[test]
        fn compiled_colors_never_contain_nan(
            hue in any::<f64>(),
            saturation in any::<f64>(),
            contrast in any::<f64>(),
            offset in any::<i32>(),
        ) {
            let p = ThemeParameters {
                hue,
                saturation,
                contrast,
                accent_offset: offset,
                ..ThemeParameters::default()
            };
            for (_, value) in compile(&p).iter() {
                prop_assert!(!value.contains("NaN"));
                prop_assert!(!value.contains("inf"));
            }
        }
    }
}
