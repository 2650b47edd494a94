//! Playback controller.
//!
//! A finite-state machine that walks a sealed [`Trace`] forward, backward or
//! to an arbitrary index. It owns its tick source and keeps at most one timer
//! installed at any time; every transition that stops automatic advancement,
//! or replaces the trace, cancels that timer before doing anything else.
//!
//! ```text
//!            load                 play
//!   Idle ─────────────▶ Paused ◀───────▶ Playing
//!                         ▲  pause         │ tick reaches Done
//!                stepBack │                ▼
//!                         └──────────── Finished
//! ```
//!
//! The cursor lives in `[-1, len - 1]`: `-1` shows the initial input and
//! `len - 1` is always the terminal `Done` step. Landing on that step by any
//! route (tick, step forward, seek) means `Finished`.

use std::sync::Arc;

use serde::Serialize;

use crate::adapter::{self, VisualAnnotation};
use crate::error::EngineError;
use crate::scheduler::{TickScheduler, TimerId};
use crate::step::{Snapshot, Step, Trace};
use crate::utils::{check_speed, tick_interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Observable playback state, returned by every controller verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Algorithm id of the loaded trace.
    pub algorithm: Option<&'static str>,
    pub trace_len: usize,
    pub cursor: isize,
    pub status: Status,
    /// Steps per second.
    pub speed: f64,
}

pub struct PlaybackController<S: TickScheduler> {
    trace: Option<Arc<Trace>>,
    cursor: isize,
    status: Status,
    speed: f64,
    scheduler: S,
    timer: Option<TimerId>,
}

impl<S: TickScheduler> PlaybackController<S> {
    /// Create an idle controller.
    pub fn new(scheduler: S, speed: f64) -> Result<Self, EngineError> {
        Ok(Self {
            trace: None,
            cursor: -1,
            status: Status::Idle,
            speed: check_speed(speed)?,
            scheduler,
            timer: None,
        })
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            algorithm: self.trace.as_ref().map(|t| t.algorithm()),
            trace_len: self.trace.as_ref().map_or(0, |t| t.len()),
            cursor: self.cursor,
            status: self.status,
            speed: self.speed,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.trace.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Timer currently driving automatic advancement.
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Step under the cursor; `None` at `-1` or when idle.
    pub fn current_step(&self) -> Option<&Step> {
        let trace = self.trace.as_ref()?;
        usize::try_from(self.cursor).ok().and_then(|i| trace.step(i))
    }

    /// Container state under the cursor.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.trace.as_ref().map(|t| t.snapshot_at(self.cursor))
    }

    /// Draw instructions for the cursor position.
    pub fn current_annotations(&self) -> Result<Vec<VisualAnnotation>, EngineError> {
        match &self.trace {
            Some(trace) => adapter::project_cursor(trace, self.cursor),
            None => Ok(Vec::new()),
        }
    }

    fn last_index(&self) -> isize {
        self.trace.as_ref().map_or(-1, |t| t.len() as isize - 1)
    }

    fn transition(&mut self, to: Status) {
        if self.status != to {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = ?self.status, to = ?to, cursor = self.cursor, "playback transition");
        }
        self.status = to;
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn install_timer(&mut self) {
        self.cancel_timer();
        self.timer = Some(self.scheduler.schedule(tick_interval(self.speed)));
    }

    /// Settle on `cursor`, entering `Finished` iff it is the terminal step.
    fn land(&mut self, cursor: isize) {
        let last = self.last_index();
        self.cursor = cursor.clamp(-1, last.max(-1));
        if self.cursor == last && last >= 0 {
            self.cancel_timer();
            self.transition(Status::Finished);
        } else {
            self.transition(Status::Paused);
        }
    }

    /// Replace the trace. Any running timer is cancelled first.
    pub fn load(&mut self, trace: Arc<Trace>) -> PlaybackState {
        self.cancel_timer();
        if self.status == Status::Playing {
            self.transition(Status::Paused);
        }
        self.trace = Some(trace);
        self.cursor = -1;
        self.transition(Status::Paused);
        self.state()
    }

    /// Start automatic advancement. No-op unless paused before the terminal step.
    pub fn play(&mut self) -> PlaybackState {
        if self.status == Status::Paused && self.cursor < self.last_index() {
            self.install_timer();
            self.transition(Status::Playing);
        }
        self.state()
    }

    pub fn pause(&mut self) -> PlaybackState {
        if self.status == Status::Playing {
            self.cancel_timer();
            self.transition(Status::Paused);
        }
        self.state()
    }

    /// Advance by one step while playing.
    pub fn tick(&mut self) -> PlaybackState {
        if self.status == Status::Playing {
            let next = self.cursor + 1;
            if next >= self.last_index() {
                self.land(next);
            } else {
                self.cursor = next;
            }
        }
        self.state()
    }

    /// Deliver one timer firing. Firings from any timer other than the one
    /// currently installed are dropped; returns whether the tick was applied.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer == Some(id) && self.status == Status::Playing {
            self.tick();
            true
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(timer = id.raw(), "dropping stale timer tick");
            false
        }
    }

    /// Apply every firing due by the scheduler's current time, one at a time.
    ///
    /// Returns the number of ticks applied.
    pub fn pump(&mut self) -> usize {
        let deadline = self.scheduler.now();
        let mut applied = 0;
        while let Some(id) = self.scheduler.pop_due(deadline) {
            if self.on_timer(id) {
                applied += 1;
            }
        }
        applied
    }

    pub fn step_forward(&mut self) -> PlaybackState {
        if self.status == Status::Paused {
            self.land(self.cursor + 1);
        }
        self.state()
    }

    pub fn step_back(&mut self) -> PlaybackState {
        if matches!(self.status, Status::Paused | Status::Finished) {
            self.cursor = (self.cursor - 1).max(-1);
            self.transition(Status::Paused);
        }
        self.state()
    }

    /// Jump to `index`, clamped to `[-1, len - 1]`. Stops playback.
    pub fn seek(&mut self, index: isize) -> PlaybackState {
        if self.status != Status::Idle {
            self.cancel_timer();
            self.land(index);
        }
        self.state()
    }

    /// Back to the initial input of the same trace.
    pub fn reset(&mut self) -> PlaybackState {
        if self.status != Status::Idle {
            self.cancel_timer();
            self.cursor = -1;
            self.transition(Status::Paused);
        }
        self.state()
    }

    /// Change the cadence. While playing, the old timer is replaced so the new
    /// interval applies from the next tick onward.
    pub fn set_speed(&mut self, speed: f64) -> Result<PlaybackState, EngineError> {
        self.speed = check_speed(speed)?;
        if self.status == Status::Playing {
            self.install_timer();
        }
        Ok(self.state())
    }
}
