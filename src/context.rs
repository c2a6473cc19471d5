//! State shared by every component, owned by the shell and lent out by `&mut`.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::presentation::font::BitmapFont;
use crate::timer::Scheduler;
use crate::types::{CANVAS, CanvasSize};

pub struct AppContext {
    pub config: GameConfig,
    pub scheduler: Scheduler,
    pub rng: StdRng,
    pub font: BitmapFont,
    pub canvas: CanvasSize,
    /// The instant the current event-loop iteration is handling.
    pub now: Instant,
}

impl AppContext {
    pub fn new(config: GameConfig, font: BitmapFont) -> Self {
        Self::with_rng(config, font, StdRng::from_os_rng())
    }

    /// Deterministic context for tests and replays.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, BitmapFont::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, font: BitmapFont, rng: StdRng) -> Self {
        Self {
            config,
            scheduler: Scheduler::new(),
            rng,
            font,
            canvas: CANVAS,
            now: Instant::now(),
        }
    }
}
