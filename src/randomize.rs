//! Random theme generation within ranges that keep results readable.

use crate::color::round_to;
use crate::params::{Mode, ThemeParameters};
use rand::Rng;

/// Draw a random parameter set.
pub fn randomize<R: Rng>(rng: &mut R) -> ThemeParameters {
    ThemeParameters {
        hue: rng.gen_range(0.0..360.0_f64).round(),
        saturation: rng.gen_range(55.0..88.0_f64).round(),
        glow_intensity: round_to(rng.gen_range(0.45..0.9), 2),
        accent_offset: rng.gen_range(8.0..60.0_f64).round() as i32,
        grain: rng.gen_bool(0.7),
        motion: rng.gen_bool(0.85),
        corner_radius: rng.gen_range(6.0..18.0_f64).round(),
        contrast: round_to(rng.gen_range(0.92..1.10), 2),
        mode: if rng.gen_bool(0.67) {
            Mode::Dark
        } else {
            Mode::Light
        },
    }
    // hue can round up to 360
    .sanitized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_randomize_stays_in_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = randomize(&mut rng);
            assert!((0.0..360.0).contains(&p.hue));
            assert!((55.0..=88.0).contains(&p.saturation));
            assert!((0.45..=0.9).contains(&p.glow_intensity));
            assert!((8..=60).contains(&p.accent_offset));
            assert!((6.0..=18.0).contains(&p.corner_radius));
            assert!((0.92..=1.10).contains(&p.contrast));
            assert_eq!(p.hue.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_theme() {
        let a = randomize(&mut StdRng::seed_from_u64(42));
        let b = randomize(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_both_modes_occur() {
        let mut rng = StdRng::seed_from_u64(1);
        let modes: Vec<Mode> = (0..200).map(|_| randomize(&mut rng).mode).collect();
        assert!(modes.contains(&Mode::Dark));
        assert!(modes.contains(&Mode::Light));
    }
}
