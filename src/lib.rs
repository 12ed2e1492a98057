//! # Tweenlet
//!
//! A small, host-agnostic tween controller.
//!
//! The crate interpolates a scalar value between two bounds over a duration,
//! shaped by a pluggable easing equation, with play/reverse/pause/resume/stop
//! commands, repeat and ping-pong looping, and typed lifecycle notifications.
//! It owns no thread and no timer: the host drives a [`TimeController`] by
//! calling [`TimeController::tick`] with its own time deltas and reads the
//! resulting value, so the same controller works under a render loop or a
//! test harness.

pub mod clock;
pub mod config;
pub mod controller;
pub mod easing;
pub mod events;
pub mod manager;
pub mod prelude;

// Re-export public API
pub use clock::{DeltaClock, FixedStep};
pub use config::{EndBehavior, LoopType, TimeSource, TweenConfig};
pub use controller::{PlayState, TimeController};
pub use easing::{lerp, Equation};
pub use events::{EventSink, SubscriptionId, TweenEvent};
pub use manager::TweenManager;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TweenError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TweenError {
    #[error("Invalid duration {0}: must be finite and greater than zero")]
    InvalidDuration(f64),

    #[error("Non-finite {field}: {value}")]
    NonFiniteBound { field: &'static str, value: f64 },
}

/// Error type alias for convenience
pub type Error = TweenError;
