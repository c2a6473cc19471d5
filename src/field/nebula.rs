use std::f32::consts::TAU;

use rand::Rng;

use crate::types::{CanvasSize, Color, Draw, DrawOp, Style, Z_NEBULA};

/// Phase advance per nebula tick, before the direction sign.
const OSCILLATION_STEP: f32 = 0.02;

/// Shading for the four opacity levels, sparsest first.
pub const SHADES: [char; 4] = ['·', '░', '▒', '▓'];

pub const COLOR_HINTS: [Color; 4] = [
    Color::hex(0x221144),
    Color::hex(0x332266),
    Color::hex(0x443377),
    Color::hex(0x554488),
];

#[derive(Debug, Clone, PartialEq)]
pub struct NebulaBlob {
    pub x: f32,
    pub y: f32,
    /// Horizontal radius in columns. Rows are twice as tall, so the
    /// vertical radius is half of this.
    pub radius: f32,
    pub color_hint: Color,
    pub oscillation_phase: f32,
    /// Either 1 or -1; fixed for the blob's lifetime.
    pub direction: i8,
    pub level: u8,
}

impl NebulaBlob {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: CanvasSize) -> Self {
        let w = bounds.width as f32;
        let h = bounds.height as f32;
        let oscillation_phase = rng.random_range(0.0..TAU);
        Self {
            x: rng.random_range(w / 8.0..w * 7.0 / 8.0),
            y: rng.random_range(h / 6.0..h * 5.0 / 6.0),
            radius: rng.random_range(w / 16.0..w * 0.15),
            color_hint: COLOR_HINTS[rng.random_range(0..COLOR_HINTS.len())],
            oscillation_phase,
            direction: if rng.random_bool(0.5) { 1 } else { -1 },
            level: opacity_level(oscillation_phase),
        }
    }

    pub fn tick(&mut self) {
        self.oscillation_phase = (self.oscillation_phase
            + OSCILLATION_STEP * f32::from(self.direction))
        .rem_euclid(TAU);
        self.level = opacity_level(self.oscillation_phase);
    }

    pub fn shade(&self) -> char {
        SHADES[self.level as usize]
    }

    fn covers(&self, cx: f32, cy: f32) -> bool {
        let dx = (cx - self.x) / self.radius;
        let dy = (cy - self.y) / (self.radius / 2.0);
        dx * dx + dy * dy <= 1.0
    }
}

/// Quantize the oscillation into one of four opacity levels.
pub fn opacity_level(phase: f32) -> u8 {
    let level = ((phase.sin() + 1.0) * 1.5) as u8;
    level.min(SHADES.len() as u8 - 1)
}

impl Draw for NebulaBlob {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let half_h = self.radius / 2.0;
        let x0 = (self.x - self.radius).floor().max(0.0) as u16;
        let x1 = (self.x + self.radius).ceil().max(0.0) as u16;
        let y0 = (self.y - half_h).floor().max(0.0) as u16;
        let y1 = (self.y + half_h).ceil().max(0.0) as u16;
        let style = Style::fg(self.color_hint);

        for y in y0..=y1 {
            for x in x0..=x1 {
                // Sample at the cell centre.
                if self.covers(x as f32 + 0.5, y as f32 + 0.5) {
                    ops.push(DrawOp {
                        x,
                        y,
                        ch: self.shade(),
                        style,
                        z_order: Z_NEBULA,
                    });
                }
            }
        }
    }
}
