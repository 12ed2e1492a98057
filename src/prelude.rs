//! Prelude module for common tweenlet types
//!
//! This module re-exports the most commonly used types and functions for
//! easy importing with `use tweenlet::prelude::*;`

pub use crate::clock::{DeltaClock, FixedStep};

pub use crate::config::{EndBehavior, LoopType, TimeSource, TweenConfig};

pub use crate::controller::{PlayState, TimeController};

pub use crate::easing::{lerp, Equation};

pub use crate::events::{EventSink, SubscriptionId, TweenEvent};

pub use crate::manager::TweenManager;

pub use crate::{Error as TweenError, Result};
