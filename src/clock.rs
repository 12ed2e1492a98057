//! Delta measurement helpers for hosts without their own frame timing.
//!
//! Controllers never read the clock themselves; these types exist so a
//! standalone driver loop can produce the deltas it feeds to `tick`.

use crate::{Result, TweenError};
use instant::Instant;

/// Guards step counting against accumulated floating point error.
const STEP_EPSILON: f64 = 1e-9;

/// Measures wall-clock seconds between successive calls.
///
/// The scaled delta multiplies measured time by a host-controlled time
/// scale, which is how `TimeSource::Scaled` controllers slow down or freeze
/// while `TimeSource::Unscaled` ones keep moving.
pub struct DeltaClock {
    last: Instant,
    time_scale: f64,
}

impl DeltaClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            time_scale: 1.0,
        }
    }

    /// Multiplier applied by [`delta`](Self::delta); clamped at zero, where
    /// scaled time stands still.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = if scale.is_finite() {
            scale.max(0.0)
        } else {
            1.0
        };
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Seconds since the previous measurement, multiplied by the time scale.
    pub fn delta(&mut self) -> f64 {
        self.raw_delta() * self.time_scale
    }

    /// Seconds since the previous measurement, ignoring the time scale.
    ///
    /// Both variants re-arm the clock; take one measurement per frame and
    /// scale it yourself if you need both flavors.
    pub fn delta_unscaled(&mut self) -> f64 {
        self.raw_delta()
    }

    /// Forget time elapsed so far, e.g. after the host was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    fn raw_delta(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }
}

impl Default for DeltaClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates elapsed time into whole fixed steps.
///
/// Feed it frame deltas and run one simulation step per count it returns;
/// the remainder carries over, so long frames catch up over several steps.
pub struct FixedStep {
    step: f64,
    accumulator: f64,
}

impl FixedStep {
    /// Create an accumulator with the given step size in seconds; the step
    /// must be finite and strictly positive.
    pub fn new(step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TweenError::InvalidDuration(step));
        }
        Ok(Self {
            step,
            accumulator: 0.0,
        })
    }

    /// The fixed step size in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Seconds accumulated toward the next step.
    pub fn accumulated(&self) -> f64 {
        self.accumulator
    }

    /// Feed elapsed seconds and return the number of whole steps now due.
    ///
    /// Negative and NaN input counts as zero elapsed time.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        self.accumulator += elapsed.max(0.0);
        // The nudge keeps 0.3s at a 0.1s step from counting as 2 steps
        let steps = ((self.accumulator / self.step) + STEP_EPSILON).floor();
        self.accumulator = (self.accumulator - steps * self.step).max(0.0);
        steps as u32
    }

    /// Drop any accumulated remainder.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
