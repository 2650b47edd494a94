//! Tick sources for playback.
//!
//! Playback is single-threaded and cooperative: a scheduler never calls back
//! into the controller. Instead the driver asks for due firings one at a time
//! with [`TickScheduler::pop_due`], so anything the controller does in
//! response to a tick (finishing, pausing, loading a new trace) is visible
//! before the next firing is computed. A cancelled timer is removed from the
//! queue and can never be returned again.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Handle for one installed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

pub trait TickScheduler {
    /// Install a repeating timer whose first firing is one `interval` from now.
    fn schedule(&mut self, interval: Duration) -> TimerId;

    /// Remove a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);

    fn is_active(&self, id: TimerId) -> bool;

    /// Current time, measured from the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Pop the earliest firing due at or before `deadline`, if any.
    fn pop_due(&mut self, deadline: Duration) -> Option<TimerId>;
}

#[derive(Debug, Clone)]
struct Timer {
    interval: Duration,
    next_due: Duration,
}

/// Timer bookkeeping shared by both scheduler flavours.
#[derive(Debug, Default, Clone)]
struct TimerQueue {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u64,
}

impl TimerQueue {
    fn schedule(&mut self, now: Duration, interval: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                interval,
                next_due: now + interval,
            },
        );
        #[cfg(feature = "tracing")]
        tracing::trace!(timer = id.0, interval_ms = interval.as_millis() as u64, "timer scheduled");
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!(timer = id.0, "timer cancelled");
        }
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, Duration)> {
        let (&id, due) = self
            .timers
            .iter()
            .map(|(id, t)| (id, t.next_due))
            .filter(|&(_, due)| due <= deadline)
            .min_by_key(|&(id, due)| (due, *id))?;
        if let Some(timer) = self.timers.get_mut(&id) {
            // Zero intervals are clamped so a timer cannot fire forever at one instant.
            timer.next_due = due + timer.interval.max(Duration::from_nanos(1));
        }
        Some((id, due))
    }

    fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.next_due).min()
    }
}

/// Virtual-clock scheduler: time only moves when [`advance`](Self::advance)
/// is called. Fully deterministic, used by tests and offline rendering.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: Duration,
    queue: TimerQueue,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward by `by`.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn active_timers(&self) -> usize {
        self.queue.timers.len()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration) -> TimerId {
        self.queue.schedule(self.now, interval)
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.cancel(id)
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.queue.timers.contains_key(&id)
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        self.queue.pop_due(deadline).map(|(id, _)| id)
    }
}

/// Wall-clock scheduler driven by [`Instant`]; the caller polls it.
#[derive(Debug, Clone)]
pub struct WallClockScheduler {
    epoch: Instant,
    queue: TimerQueue,
}

impl WallClockScheduler {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            queue: TimerQueue::default(),
        }
    }

    /// How long until the next firing, or `None` with no active timers.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .next_due()
            .map(|due| due.saturating_sub(self.epoch.elapsed()))
    }
}

impl Default for WallClockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for WallClockScheduler {
    fn schedule(&mut self, interval: Duration) -> TimerId {
        self.queue.schedule(self.epoch.elapsed(), interval)
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.cancel(id)
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.queue.timers.contains_key(&id)
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        self.queue.pop_due(deadline).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn repeating_timer_fires_once_per_interval() {
        let mut s = ManualScheduler::new();
        let id = s.schedule(100 * MS);
        s.advance(350 * MS);
        let deadline = s.now();
        let mut fired = Vec::new();
        while let Some(t) = s.pop_due(deadline) {
            fired.push(t);
        }
        assert_eq!(fired, vec![id, id, id]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = ManualScheduler::new();
        let id = s.schedule(10 * MS);
        s.advance(100 * MS);
        assert_eq!(s.pop_due(s.now()), Some(id));
        s.cancel(id);
        assert!(!s.is_active(id));
        assert_eq!(s.pop_due(s.now()), None);
        assert_eq!(s.active_timers(), 0);
    }

    #[test]
    fn interleaves_timers_by_due_time() {
        let mut s = ManualScheduler::new();
        let slow = s.schedule(30 * MS);
        let fast = s.schedule(20 * MS);
        s.advance(60 * MS);
        let deadline = s.now();
        let mut fired = Vec::new();
        while let Some(t) = s.pop_due(deadline) {
            fired.push(t);
        }
        // fast@20, slow@30, fast@40, slow@60 and fast@60 (lower id first)
        assert_eq!(fired, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut s = ManualScheduler::new();
        let a = s.schedule(MS);
        s.cancel(a);
        let b = s.schedule(MS);
        assert_ne!(a, b);
    }

    #[test]
    fn wall_clock_reports_pending_timer() {
        let mut s = WallClockScheduler::new();
        assert!(s.time_until_next().is_none());
        let id = s.schedule(Duration::from_secs(60));
        assert!(s.time_until_next().unwrap() <= Duration::from_secs(60));
        assert_eq!(s.pop_due(s.now()), None);
        s.cancel(id);
        assert!(s.time_until_next().is_none());
    }
}
