//! Assorted utilities and helpers.
//!
//! Speed is always expressed in steps per second; the visualizer's slider
//! works in whole percent and is converted here.

use std::time::Duration;

use crate::error::EngineError;

/// Steps per second at 100% on the speed slider.
pub const MAX_SPEED: f64 = 50.0;

/// Default slider position.
pub const DEFAULT_SPEED_PERCENT: u8 = 50;

/// Longest interval between two ticks; slower speeds are rejected.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(3600);

/// Map a 1..=100 slider percentage linearly onto `0.5..=50` steps per second.
///
/// Values outside the slider range are clamped.
#[inline]
pub fn speed_from_percent(percent: u8) -> f64 {
    let p = percent.clamp(1, 100) as f64;
    p * MAX_SPEED / 100.0
}

/// Reject zero, negative and non-finite speeds, and speeds so slow that
/// one tick would take longer than [`MAX_TICK_INTERVAL`].
pub fn check_speed(speed: f64) -> Result<f64, EngineError> {
    if !(speed.is_finite() && speed > 0.0) {
        return Err(EngineError::invalid(
            "playback",
            format!("speed must be a positive number of steps per second, got {speed}"),
        ));
    }
    match Duration::try_from_secs_f64(1.0 / speed) {
        Ok(interval) if interval <= MAX_TICK_INTERVAL => Ok(speed),
        _ => Err(EngineError::invalid(
            "playback",
            format!(
                "speed {speed} is too slow, one step must take at most {} s",
                MAX_TICK_INTERVAL.as_secs()
            ),
        )),
    }
}

/// Interval between ticks at `speed` steps per second (`1000 / speed` ms),
/// saturating at [`MAX_TICK_INTERVAL`].
#[inline]
pub fn tick_interval(speed: f64) -> Duration {
    Duration::try_from_secs_f64(1.0 / speed)
        .map_or(MAX_TICK_INTERVAL, |d| d.min(MAX_TICK_INTERVAL))
}
