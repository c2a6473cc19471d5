use std::f32::consts::TAU;

use rand::Rng;

use crate::types::{CanvasSize, Color, Draw, DrawOp, Style, Z_STARS};

/// Phase advance per star tick.
const TWINKLE_STEP: f32 = 0.1;
const MIN_BRIGHTNESS: f32 = 100.0;
const MAX_BRIGHTNESS: f32 = 255.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StarParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Columns moved left per tick.
    pub drift_speed: f32,
    pub twinkle_phase: f32,
    pub brightness: u8,
}

impl StarParticle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: CanvasSize) -> Self {
        let twinkle_phase = rng.random_range(0.0..TAU);
        Self {
            x: rng.random_range(0.0..bounds.width as f32),
            y: rng.random_range(0.0..bounds.height as f32),
            size: rng.random_range(1.0..2.5),
            drift_speed: rng.random_range(0.01..0.04),
            twinkle_phase,
            brightness: brightness(twinkle_phase),
        }
    }

    /// Twinkle, drift left, and wrap to the right edge at a fresh height.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: CanvasSize) {
        self.twinkle_phase = (self.twinkle_phase + TWINKLE_STEP).rem_euclid(TAU);
        self.brightness = brightness(self.twinkle_phase);

        self.x -= self.drift_speed;
        if self.x < 0.0 {
            self.x = bounds.width as f32;
            self.y = rng.random_range(0.0..bounds.height as f32);
        }
    }

    pub fn color(&self) -> Color {
        Color::Rgb {
            r: self.brightness,
            g: self.brightness,
            b: 255,
        }
    }

    fn glyph(&self) -> char {
        if self.size < 1.5 {
            '.'
        } else if self.size < 2.0 {
            '·'
        } else {
            '*'
        }
    }
}

/// Sinusoidal brightness clamped to the visible range.
pub fn brightness(phase: f32) -> u8 {
    (150.0 + 100.0 * phase.sin()).clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS) as u8
}

impl Draw for StarParticle {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        if self.x < 0.0 || self.y < 0.0 {
            return;
        }
        ops.push(DrawOp {
            x: self.x.floor() as u16,
            y: self.y.floor() as u16,
            ch: self.glyph(),
            style: Style::fg(self.color()),
            z_order: Z_STARS,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: CanvasSize = CanvasSize {
        width: 80,
        height: 30,
    };

    #[test]
    fn brightness_is_clamped() {
        assert_eq!(brightness(0.0), 150);
        assert!((249..=250).contains(&brightness(std::f32::consts::FRAC_PI_2)));
        // 150 - 100 = 50, clamped up
        assert_eq!(brightness(3.0 * std::f32::consts::FRAC_PI_2), 100);
    }

    #[test]
    fn spawn_stays_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let s = StarParticle::spawn(&mut rng, BOUNDS);
            assert!((0.0..80.0).contains(&s.x));
            assert!((0.0..30.0).contains(&s.y));
            assert!((1.0..2.5).contains(&s.size));
            assert!(s.drift_speed > 0.0);
        }
    }

    #[test]
    fn tick_drifts_left_and_advances_phase() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = StarParticle {
            x: 10.0,
            y: 5.0,
            size: 2.0,
            drift_speed: 0.25,
            twinkle_phase: 0.0,
            brightness: 150,
        };
        star.tick(&mut rng, BOUNDS);
        assert_eq!(star.x, 9.75);
        assert_eq!(star.y, 5.0);
        assert!((star.twinkle_phase - 0.1).abs() < 1e-6);
        assert_eq!(star.brightness, brightness(0.1));
    }

    #[test]
    fn twinkle_keeps_advancing_after_a_long_run() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut star = StarParticle {
            x: 40.0,
            y: 5.0,
            size: 1.0,
            drift_speed: 0.01,
            twinkle_phase: 2_100_000.0,
            brightness: 150,
        };
        star.tick(&mut rng, BOUNDS);
        let settled = star.twinkle_phase;
        assert!((0.0..=TAU).contains(&settled));

        for _ in 0..100 {
            let before = star.twinkle_phase;
            star.tick(&mut rng, BOUNDS);
            let step = (star.twinkle_phase - before).rem_euclid(TAU);
            assert!((step - TWINKLE_STEP).abs() < 1e-4);
            assert!((0.0..=TAU).contains(&star.twinkle_phase));
        }
    }

    #[test]
    fn star_leaving_left_edge_respawns_at_right_edge() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut star = StarParticle {
            x: 0.02,
            y: 12.5,
            size: 1.7,
            drift_speed: 0.03,
            twinkle_phase: 1.0,
            brightness: 200,
        };
        star.tick(&mut rng, BOUNDS);

        assert_eq!(star.x, 80.0);
        assert!((0.0..30.0).contains(&star.y));
        assert_eq!(star.size, 1.7);
        assert_eq!(star.drift_speed, 0.03);
    }

    #[test]
    fn respawned_heights_are_fresh() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut heights = Vec::new();
        for _ in 0..8 {
            let mut star = StarParticle {
                x: 0.0,
                y: 12.5,
                size: 1.0,
                drift_speed: 0.01,
                twinkle_phase: 0.0,
                brightness: 150,
            };
            star.tick(&mut rng, BOUNDS);
            heights.push(star.y);
        }
        assert!(heights.iter().any(|&y| y != 12.5));
        assert!(heights.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn glyph_and_colour_follow_size_and_brightness() {
        let mut star = StarParticle {
            x: 3.9,
            y: 2.1,
            size: 1.2,
            drift_speed: 0.01,
            twinkle_phase: 0.0,
            brightness: 180,
        };
        let mut ops = Vec::new();
        star.draw(&mut ops);
        star.size = 2.2;
        star.draw(&mut ops);

        assert_eq!((ops[0].x, ops[0].y, ops[0].ch), (3, 2, '.'));
        assert_eq!(ops[1].ch, '*');
        assert_eq!(
            ops[0].style.fg,
            Some(Color::Rgb {
                r: 180,
                g: 180,
                b: 255
            })
        );
    }
}
