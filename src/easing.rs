use std::fmt;
use std::sync::Arc;

/// Linear interpolation between two bounds; `t` is a normalized fraction.
///
/// The bounds carry no ordering requirement, so `start > end` simply
/// interpolates downward.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    (end - start) * t + start
}

/// A pure easing equation mapping normalized progress to an eased fraction.
///
/// Equations are shared, cloneable function objects. They receive progress
/// already clamped to `[0, 1]` and are expected to return `0.0` at `0.0` and
/// `1.0` at `1.0`; overshoot in between (elastic, back) is allowed.
#[derive(Clone)]
pub struct Equation(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Equation {
    /// Wrap a closure or function pointer as an equation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// The identity equation; used wherever no equation is supplied.
    pub fn linear() -> Self {
        Self::new(|t| t)
    }

    /// Apply the equation to a progress fraction, clamping input to [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        (self.0)(t.clamp(0.0, 1.0))
    }
}

impl Default for Equation {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Equation(..)")
    }
}
