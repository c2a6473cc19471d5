//! Repeating timers for a single-threaded event loop.
//!
//! Nothing here sleeps or spawns. The event loop asks for the next deadline,
//! waits for input until then, and calls `fire_due` with the current instant.
//! Each fired timer is rescheduled one interval after the instant it fired,
//! so a stalled loop skips ticks rather than replaying them.

use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    interval: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating timer whose first firing is one `interval` after `now`.
    pub fn start(&mut self, interval: Duration, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Entry {
            handle,
            interval,
            next_due: now + interval,
        });
        debug!(timer = handle.0, interval_ms = interval.as_millis() as u64, "timer started");
        handle
    }

    /// Stop a timer. Returns `false` if it was not running.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|e| e.handle != handle);
        self.timers.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// The earliest instant at which some timer becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|e| e.next_due).min()
    }

    /// How long the event loop may wait for input before a timer is due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Collect every timer due at `now`, in start order, and reschedule them.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for entry in &mut self.timers {
            if entry.next_due <= now {
                entry.next_due = now + entry.interval;
                fired.push(entry.handle);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_after_interval_and_reschedules() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let h = s.start(50 * MS, t0);

        assert!(s.fire_due(t0 + 49 * MS).is_empty());
        assert_eq!(s.fire_due(t0 + 50 * MS), vec![h]);
        assert!(s.fire_due(t0 + 99 * MS).is_empty());
        assert_eq!(s.fire_due(t0 + 100 * MS), vec![h]);
    }

    #[test]
    fn stalled_loop_fires_once_and_skips_missed_ticks() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let h = s.start(10 * MS, t0);

        assert_eq!(s.fire_due(t0 + 95 * MS), vec![h]);
        assert_eq!(s.next_deadline(), Some(t0 + 105 * MS));
    }

    #[test]
    fn fires_in_start_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let slow = s.start(100 * MS, t0);
        let fast = s.start(50 * MS, t0);

        assert_eq!(s.fire_due(t0 + 100 * MS), vec![slow, fast]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let h = s.start(30 * MS, t0);

        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(!s.is_active(h));
        assert!(s.fire_due(t0 + 60 * MS).is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn time_until_next_saturates_at_zero() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(20 * MS, t0);
        assert_eq!(s.time_until_next(t0), Some(20 * MS));
        assert_eq!(s.time_until_next(t0 + 25 * MS), Some(Duration::ZERO));
    }
}
