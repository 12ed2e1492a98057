//! Construction-time configuration for controllers.

use crate::easing::Equation;
use crate::{Result, TweenError};
use serde::{Deserialize, Serialize};

/// What a controller does when a pass reaches its boundary and the loop
/// budget allows another pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoopType {
    /// Restart the pass from its starting edge, keeping direction.
    #[default]
    Repeat,
    /// Flip direction and play back from the boundary just reached.
    PingPong,
}

/// What happens to the output value when a controller stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EndBehavior {
    /// Hold the last computed value.
    #[default]
    Constant,
    /// Seek back to the beginning, recomputing the value there.
    Reset,
}

/// Which of the host's time deltas should feed a controller.
///
/// The controller consumes whatever delta is passed to `tick`; this field is
/// advisory, read by drivers such as [`TweenManager`](crate::TweenManager)
/// to route the right delta to each controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeSource {
    /// The host's scaled frame delta; freezes when the host scales time to zero.
    #[default]
    Scaled,
    /// Wall-clock delta, unaffected by the host's time scale.
    Unscaled,
    /// The host's fixed simulation step.
    Fixed,
}

/// Configuration for a [`TimeController`](crate::TimeController).
///
/// The default interpolates `0.0 -> 1.0` over one second with the linear
/// equation, no looping, the value held on stop, and scaled time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Interpolation start bound. May exceed `end_value`.
    pub start_value: f64,
    /// Interpolation end bound.
    pub end_value: f64,
    /// Pass duration in seconds; must be finite and strictly positive.
    pub duration: f64,
    /// Easing equation. Not serialized; curves are code, not data, so a
    /// deserialized config comes back linear.
    #[serde(skip)]
    pub equation: Equation,
    /// `None` loops forever; `Some(n)` allows `n` further passes after the
    /// first, so `Some(0)` plays exactly once.
    pub loop_count: Option<u32>,
    /// Boundary behavior while the budget allows further passes.
    pub loop_type: LoopType,
    /// Output behavior on stop.
    pub end_behavior: EndBehavior,
    /// Advisory delta routing for drivers.
    pub time_source: TimeSource,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            start_value: 0.0,
            end_value: 1.0,
            duration: 1.0,
            equation: Equation::linear(),
            loop_count: Some(0),
            loop_type: LoopType::Repeat,
            end_behavior: EndBehavior::Constant,
            time_source: TimeSource::Scaled,
        }
    }
}

impl TweenConfig {
    /// Create a configuration with the given bounds and duration.
    pub fn new(start_value: f64, end_value: f64, duration: f64) -> Self {
        Self {
            start_value,
            end_value,
            duration,
            ..Default::default()
        }
    }

    /// Set the easing equation.
    pub fn with_equation(mut self, equation: Equation) -> Self {
        self.equation = equation;
        self
    }

    /// Set the loop budget and boundary behavior.
    pub fn with_loops(mut self, loop_count: Option<u32>, loop_type: LoopType) -> Self {
        self.loop_count = loop_count;
        self.loop_type = loop_type;
        self
    }

    /// Set the output behavior on stop.
    pub fn with_end_behavior(mut self, end_behavior: EndBehavior) -> Self {
        self.end_behavior = end_behavior;
        self
    }

    /// Set the advisory time source for delta routing.
    pub fn with_time_source(mut self, time_source: TimeSource) -> Self {
        self.time_source = time_source;
        self
    }

    /// Check duration and bounds; a config that fails here is rejected by
    /// [`TimeController::new`](crate::TimeController::new).
    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            log::warn!(
                "rejecting tween config: duration {} is not a positive finite number",
                self.duration
            );
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if !self.start_value.is_finite() {
            return Err(TweenError::NonFiniteBound {
                field: "start_value",
                value: self.start_value,
            });
        }
        if !self.end_value.is_finite() {
            return Err(TweenError::NonFiniteBound {
                field: "end_value",
                value: self.end_value,
            });
        }
        Ok(())
    }
}
