//! Background animation: a drifting starfield over a pulsing nebula.
//!
//! Each layer ticks on its own repeating timer. The field owns both timer
//! handles and ignores any other timer passed to `on_timer`.

mod nebula;
mod star;

pub use nebula::{NebulaBlob, opacity_level};
pub use star::{StarParticle, brightness};

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::timer::{Scheduler, TimerHandle};
use crate::types::{CanvasSize, Draw, DrawOp};

pub struct AnimationField {
    bounds: CanvasSize,
    stars: Vec<StarParticle>,
    nebula: Vec<NebulaBlob>,
    star_timer: Option<TimerHandle>,
    nebula_timer: Option<TimerHandle>,
}

impl AnimationField {
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: CanvasSize,
        star_count: usize,
        nebula_count: usize,
    ) -> Self {
        let stars = (0..star_count)
            .map(|_| StarParticle::spawn(rng, bounds))
            .collect();
        let nebula = (0..nebula_count)
            .map(|_| NebulaBlob::spawn(rng, bounds))
            .collect();
        Self {
            bounds,
            stars,
            nebula,
            star_timer: None,
            nebula_timer: None,
        }
    }

    /// Register both tick timers. Calling it again restarts them.
    pub fn start(
        &mut self,
        scheduler: &mut Scheduler,
        star_interval: Duration,
        nebula_interval: Duration,
        now: Instant,
    ) {
        for handle in [self.star_timer.take(), self.nebula_timer.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(handle);
        }
        self.star_timer = Some(scheduler.start(star_interval, now));
        self.nebula_timer = Some(scheduler.start(nebula_interval, now));
        debug!(
            stars = self.stars.len(),
            blobs = self.nebula.len(),
            "animation field started"
        );
    }

    /// Advance the layer owning `handle`. Returns `false` for foreign timers.
    pub fn on_timer<R: Rng + ?Sized>(&mut self, handle: TimerHandle, rng: &mut R) -> bool {
        if self.star_timer == Some(handle) {
            self.tick_stars(rng);
            true
        } else if self.nebula_timer == Some(handle) {
            self.tick_nebula();
            true
        } else {
            false
        }
    }

    pub fn tick_stars<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            star.tick(rng, self.bounds);
        }
    }

    pub fn tick_nebula(&mut self) {
        for blob in &mut self.nebula {
            blob.tick();
        }
    }

    pub fn stars(&self) -> &[StarParticle] {
        &self.stars
    }

    pub fn nebula(&self) -> &[NebulaBlob] {
        &self.nebula
    }
}

impl Draw for AnimationField {
    /// Particles are clipped to the field so they never spill into rows
    /// below the canvas.
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let mut layer = Vec::new();
        for blob in &self.nebula {
            blob.draw(&mut layer);
        }
        for star in &self.stars {
            star.draw(&mut layer);
        }
        let (w, h) = (self.bounds.width, self.bounds.height);
        ops.extend(layer.into_iter().filter(|op| op.x < w && op.y < h));
    }
}
