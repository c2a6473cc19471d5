//! Character-by-character text reveal.
//!
//! A reveal owns at most one timer. Starting a new reveal cancels the old
//! timer first, so two reveals never write to the same text region.

use std::time::{Duration, Instant};

use crate::timer::{Scheduler, TimerHandle};

#[derive(Debug, Default)]
pub struct TextReveal {
    chars: Vec<char>,
    shown: usize,
    timer: Option<TimerHandle>,
}

impl TextReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text` from nothing, one character per `interval`.
    pub fn start(&mut self, text: &str, scheduler: &mut Scheduler, interval: Duration, now: Instant) {
        self.cancel(scheduler);
        self.chars = text.chars().collect();
        self.shown = 0;
        if !self.chars.is_empty() {
            self.timer = Some(scheduler.start(interval, now));
        }
    }

    /// Show one more character if `handle` is this reveal's timer.
    pub fn on_timer(&mut self, handle: TimerHandle, scheduler: &mut Scheduler) -> bool {
        if self.timer != Some(handle) {
            return false;
        }
        self.shown += 1;
        if self.shown >= self.chars.len() {
            self.cancel(scheduler);
        }
        true
    }

    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn visible(&self) -> usize {
        self.shown
    }

    pub fn visible_text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }
}
