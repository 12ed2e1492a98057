//! The tick-driven interpolation state machine.

use crate::config::{EndBehavior, LoopType, TimeSource, TweenConfig};
use crate::easing::{lerp, Equation};
use crate::events::{Subscribers, SubscriptionId, TweenEvent};
use crate::{Result, TweenError};
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activation state of a [`TimeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayState {
    /// Not ticking; the initial and resting state.
    #[default]
    Stopped,
    /// Ticking suspended; progress and value retained.
    Paused,
    /// Advancing from the start bound toward the end bound.
    Playing,
    /// Advancing from the end bound back toward the start bound.
    Reversing,
}

impl PlayState {
    /// Whether a controller in this state consumes ticks.
    pub fn is_active(self) -> bool {
        matches!(self, PlayState::Playing | PlayState::Reversing)
    }
}

/// Normalized progress this close to a boundary counts as having reached it.
const COMPLETION_EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= COMPLETION_EPSILON
}

/// Interpolates a value between two bounds over time, under explicit host
/// ticks.
///
/// A controller is inert until [`play`](Self::play) or
/// [`reverse`](Self::reverse) activates it; from then on each
/// [`tick`](Self::tick) advances normalized progress, applies the easing
/// equation, and notifies subscribers. Reaching a boundary either loops
/// (per [`LoopType`]) or exhausts the budget and stops.
pub struct TimeController {
    config: TweenConfig,
    play_state: PlayState,
    previous_play_state: PlayState,
    current_time: f64,
    current_value: f64,
    current_offset: f64,
    loops_completed: u32,
    subscribers: Subscribers,
}

impl TimeController {
    /// Build a controller from a configuration, rejecting invalid durations
    /// and non-finite bounds.
    pub fn new(config: TweenConfig) -> Result<Self> {
        config.validate()?;
        let current_value = config.start_value;
        Ok(Self {
            config,
            play_state: PlayState::Stopped,
            previous_play_state: PlayState::Stopped,
            current_time: 0.0,
            current_value,
            current_offset: 0.0,
            loops_completed: 0,
            subscribers: Subscribers::default(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// The state that was active before the most recent transition.
    pub fn previous_play_state(&self) -> PlayState {
        self.previous_play_state
    }

    /// Whether the controller consumes ticks right now.
    pub fn is_playing(&self) -> bool {
        self.play_state.is_active()
    }

    /// Normalized progress through the current pass, in `[0, 1]`.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// The most recently computed output value.
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Change in output value produced by the last tick or seek.
    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Completed passes since the controller last left `Stopped`.
    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    /// Replace the start bound; rejects non-finite values.
    pub fn set_start_value(&mut self, start_value: f64) -> Result<()> {
        if !start_value.is_finite() {
            return Err(TweenError::NonFiniteBound {
                field: "start_value",
                value: start_value,
            });
        }
        self.config.start_value = start_value;
        Ok(())
    }

    /// Replace the end bound; rejects non-finite values.
    pub fn set_end_value(&mut self, end_value: f64) -> Result<()> {
        if !end_value.is_finite() {
            return Err(TweenError::NonFiniteBound {
                field: "end_value",
                value: end_value,
            });
        }
        self.config.end_value = end_value;
        Ok(())
    }

    /// Replace the pass duration; rejects zero, negative and non-finite
    /// values, leaving the previous duration in place.
    ///
    /// Progress is normalized, so the elapsed fraction of the current pass
    /// carries over to the new duration.
    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        if !duration.is_finite() || duration <= 0.0 {
            log::warn!("ignoring duration change to {duration}: not a positive finite number");
            return Err(TweenError::InvalidDuration(duration));
        }
        self.config.duration = duration;
        Ok(())
    }

    /// Replace the easing equation; takes effect on the next tick.
    pub fn set_equation(&mut self, equation: Equation) {
        self.config.equation = equation;
    }

    /// Replace the loop budget.
    pub fn set_loop_count(&mut self, loop_count: Option<u32>) {
        self.config.loop_count = loop_count;
    }

    /// Replace the boundary behavior.
    pub fn set_loop_type(&mut self, loop_type: LoopType) {
        self.config.loop_type = loop_type;
    }

    /// Replace the on-stop output behavior.
    pub fn set_end_behavior(&mut self, end_behavior: EndBehavior) {
        self.config.end_behavior = end_behavior;
    }

    /// Replace the advisory time source used for delta routing.
    pub fn set_time_source(&mut self, time_source: TimeSource) {
        self.config.time_source = time_source;
    }

    /// Register an event sink; it is called synchronously, in subscription
    /// order, for every event the controller emits.
    pub fn subscribe<F>(&mut self, sink: F) -> SubscriptionId
    where
        F: FnMut(&TweenEvent) + Send + 'static,
    {
        self.subscribers.subscribe(Box::new(sink))
    }

    /// Detach a previously registered sink. Returns `false` if the id is
    /// unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Register a channel-backed sink and return the receiving end, for
    /// hosts that poll events instead of taking callbacks.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<TweenEvent>) {
        let (sink, rx) = crate::events::channel_sink();
        (self.subscribers.subscribe(sink), rx)
    }

    /// Start advancing toward the end bound.
    pub fn play(&mut self) {
        self.set_play_state(PlayState::Playing);
    }

    /// Start advancing back toward the start bound.
    pub fn reverse(&mut self) {
        self.set_play_state(PlayState::Reversing);
    }

    /// Suspend ticking, retaining progress and value.
    pub fn pause(&mut self) {
        self.set_play_state(PlayState::Paused);
    }

    /// Re-enter the state that was active before the most recent transition.
    ///
    /// After a pause this restores the interrupted direction, whichever it
    /// was.
    pub fn resume(&mut self) {
        self.set_play_state(self.previous_play_state);
    }

    /// Deactivate the controller and reset the loop counter; with
    /// [`EndBehavior::Reset`] the value also seeks back to the beginning.
    pub fn stop(&mut self) {
        self.set_play_state(PlayState::Stopped);
        self.loops_completed = 0;
        if self.config.end_behavior == EndBehavior::Reset {
            self.seek_to_beginning();
        }
    }

    /// Jump to an absolute time within the pass, in seconds, clamped to the
    /// pass duration.
    ///
    /// The seek maps time to value linearly; the easing equation is not
    /// applied. Play state is untouched, so a paused controller stays
    /// paused. Emits one `ValueUpdated`.
    pub fn seek(&mut self, seconds: f64) {
        let fraction = seconds / self.config.duration;
        // NaN would poison the [0, 1] invariant
        self.current_time = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let new_value = lerp(
            self.config.start_value,
            self.config.end_value,
            self.current_time,
        );
        self.current_offset = new_value - self.current_value;
        self.current_value = new_value;
        self.emit_value_updated();
    }

    /// Seek to time zero.
    pub fn seek_to_beginning(&mut self) {
        self.seek(0.0);
    }

    /// Seek to the full pass duration.
    pub fn seek_to_end(&mut self) {
        let duration = self.config.duration;
        self.seek(duration);
    }

    /// Advance the controller by `dt` seconds of its time source.
    ///
    /// Ticks are ignored in `Stopped` and `Paused` (returns `None`, no
    /// events). Negative and NaN deltas advance nothing. An active tick
    /// recomputes the value, emits `ValueUpdated`, and handles any pass
    /// boundary it reaches; the return is the controller's value after all
    /// of that, which a just-stopped `Reset` controller reports as the
    /// start bound.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if !self.play_state.is_active() {
            return None;
        }
        let dt = dt.max(0.0);
        let step = dt / self.config.duration;
        let reversing = self.play_state == PlayState::Reversing;
        self.current_time = if reversing {
            (self.current_time - step).clamp(0.0, 1.0)
        } else {
            (self.current_time + step).clamp(0.0, 1.0)
        };
        let finished = if reversing {
            approx_eq(self.current_time, 0.0)
        } else {
            approx_eq(self.current_time, 1.0)
        };

        let eased = self.config.equation.apply(self.current_time);
        let frame_value = lerp(self.config.start_value, self.config.end_value, eased);
        self.current_offset = frame_value - self.current_value;
        self.current_value = frame_value;
        self.emit_value_updated();

        if finished {
            self.cross_boundary();
        }
        Some(self.current_value)
    }

    /// One pass boundary: count it, notify, then loop or stop.
    fn cross_boundary(&mut self) {
        self.loops_completed = self.loops_completed.saturating_add(1);
        log::trace!("pass boundary {} reached", self.loops_completed);
        self.subscribers.emit(&TweenEvent::LoopCompleted {
            loops: self.loops_completed,
        });

        let continues = match self.config.loop_count {
            None => true,
            Some(budget) => self.loops_completed <= budget,
        };
        if continues {
            match self.config.loop_type {
                // Restart the pass from this direction's own starting edge
                LoopType::Repeat => {
                    if self.play_state == PlayState::Reversing {
                        self.seek_to_end();
                    } else {
                        self.seek_to_beginning();
                    }
                }
                LoopType::PingPong => {
                    let flipped = if self.play_state == PlayState::Playing {
                        PlayState::Reversing
                    } else {
                        PlayState::Playing
                    };
                    self.set_play_state(flipped);
                }
            }
        } else {
            log::debug!(
                "loop budget exhausted after {} passes, stopping",
                self.loops_completed
            );
            self.subscribers.emit(&TweenEvent::Completed);
            self.stop();
        }
    }

    fn set_play_state(&mut self, target: PlayState) {
        if self.play_state == target {
            return;
        }
        self.previous_play_state = self.play_state;
        self.play_state = target;
        log::debug!(
            "play state {:?} -> {:?}",
            self.previous_play_state,
            self.play_state
        );
        self.subscribers.emit(&TweenEvent::StateChanged {
            previous: self.previous_play_state,
            current: self.play_state,
        });
    }

    fn emit_value_updated(&mut self) {
        self.subscribers.emit(&TweenEvent::ValueUpdated {
            value: self.current_value,
            offset: self.current_offset,
            time: self.current_time,
        });
    }
}

impl fmt::Debug for TimeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeController")
            .field("config", &self.config)
            .field("play_state", &self.play_state)
            .field("previous_play_state", &self.previous_play_state)
            .field("current_time", &self.current_time)
            .field("current_value", &self.current_value)
            .field("current_offset", &self.current_offset)
            .field("loops_completed", &self.loops_completed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(start: f64, end: f64, duration: f64) -> TimeController {
        TimeController::new(TweenConfig::new(start, end, duration)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let tc = controller(2.0, 8.0, 1.0);
        assert_eq!(tc.play_state(), PlayState::Stopped);
        assert_eq!(tc.previous_play_state(), PlayState::Stopped);
        assert_eq!(tc.current_time(), 0.0);
        assert_eq!(tc.current_value(), 2.0);
        assert_eq!(tc.current_offset(), 0.0);
        assert_eq!(tc.loops_completed(), 0);
        assert!(!tc.is_playing());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            TimeController::new(TweenConfig::new(0.0, 1.0, 0.0)),
            Err(TweenError::InvalidDuration(_))
        ));
        assert!(matches!(
            TimeController::new(TweenConfig::new(f64::NAN, 1.0, 1.0)),
            Err(TweenError::NonFiniteBound { .. })
        ));

        // unwrap_err needs the controller to be debug-formattable
        let err = TimeController::new(TweenConfig::new(0.0, 1.0, -1.0)).unwrap_err();
        assert!(matches!(err, TweenError::InvalidDuration(_)));
    }

    #[test]
    fn test_debug_output_reports_state() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.play();
        let printed = format!("{tc:?}");
        assert!(printed.contains("TimeController"));
        assert!(printed.contains("Playing"));
        assert!(printed.contains("loops_completed"));
    }

    #[test]
    fn test_play_is_idempotent() {
        let mut tc = controller(0.0, 1.0, 1.0);
        tc.play();
        assert_eq!(tc.play_state(), PlayState::Playing);
        assert_eq!(tc.previous_play_state(), PlayState::Stopped);

        // Re-entering the same state must not disturb the history
        tc.play();
        assert_eq!(tc.play_state(), PlayState::Playing);
        assert_eq!(tc.previous_play_state(), PlayState::Stopped);
    }

    #[test]
    fn test_pause_resume_restores_direction() {
        let mut tc = controller(0.0, 1.0, 1.0);
        tc.play();
        tc.pause();
        assert_eq!(tc.play_state(), PlayState::Paused);
        tc.resume();
        assert_eq!(tc.play_state(), PlayState::Playing);

        tc.reverse();
        tc.pause();
        tc.resume();
        assert_eq!(tc.play_state(), PlayState::Reversing);
    }

    #[test]
    fn test_tick_ignored_when_not_active() {
        let mut tc = controller(0.0, 1.0, 1.0);
        assert_eq!(tc.tick(0.5), None);
        assert_eq!(tc.current_time(), 0.0);

        tc.play();
        tc.pause();
        assert_eq!(tc.tick(0.5), None);
        assert_eq!(tc.current_time(), 0.0);
    }

    #[test]
    fn test_tick_advances_and_clamps() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.play();
        assert_eq!(tc.tick(1.0), Some(5.0));
        assert_eq!(tc.current_time(), 0.5);

        // Overshoot clamps to the boundary
        assert_eq!(tc.tick(100.0), Some(10.0));
        assert_eq!(tc.current_time(), 1.0);
    }

    #[test]
    fn test_negative_and_nan_deltas_advance_nothing() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.play();
        tc.tick(1.0);
        assert_eq!(tc.tick(-5.0), Some(5.0));
        assert_eq!(tc.current_time(), 0.5);
        assert_eq!(tc.tick(f64::NAN), Some(5.0));
        assert_eq!(tc.current_time(), 0.5);
    }

    #[test]
    fn test_reverse_from_end() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.seek_to_end();
        tc.reverse();
        assert_eq!(tc.tick(1.0), Some(5.0));
        assert_eq!(tc.current_time(), 0.5);
    }

    #[test]
    fn test_seek_is_linear_and_state_neutral() {
        let quad = Equation::new(|t| t * t);
        let mut tc =
            TimeController::new(TweenConfig::new(0.0, 10.0, 2.0).with_equation(quad)).unwrap();
        tc.play();
        tc.pause();
        // Seeking half way ignores the quadratic equation
        tc.seek(1.0);
        assert_eq!(tc.current_value(), 5.0);
        assert_eq!(tc.current_time(), 0.5);
        assert_eq!(tc.play_state(), PlayState::Paused);
    }

    #[test]
    fn test_seek_clamps_and_rejects_nan() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.seek(100.0);
        assert_eq!(tc.current_time(), 1.0);
        tc.seek(-3.0);
        assert_eq!(tc.current_time(), 0.0);
        tc.seek(f64::NAN);
        assert_eq!(tc.current_time(), 0.0);
        assert!(tc.current_value().is_finite());
    }

    #[test]
    fn test_seek_tracks_offset() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.seek(1.0);
        assert_eq!(tc.current_offset(), 5.0);
        tc.seek(0.5);
        assert_eq!(tc.current_offset(), -2.5);
        assert_eq!(tc.current_value(), 2.5);
    }

    #[test]
    fn test_eased_tick_still_clamps_value_mapping() {
        let quad = Equation::new(|t| t * t);
        let mut tc =
            TimeController::new(TweenConfig::new(0.0, 10.0, 2.0).with_equation(quad)).unwrap();
        tc.play();
        assert_eq!(tc.tick(1.0), Some(2.5));
        assert_eq!(tc.current_time(), 0.5);
    }

    #[test]
    fn test_stop_resets_loops_and_honors_end_behavior() {
        let mut tc = TimeController::new(
            TweenConfig::new(0.0, 10.0, 1.0)
                .with_loops(None, LoopType::Repeat)
                .with_end_behavior(EndBehavior::Reset),
        )
        .unwrap();
        tc.play();
        tc.tick(1.0);
        tc.tick(0.5);
        assert_eq!(tc.loops_completed(), 1);

        tc.stop();
        assert_eq!(tc.play_state(), PlayState::Stopped);
        assert_eq!(tc.loops_completed(), 0);
        assert_eq!(tc.current_value(), 0.0);
        assert_eq!(tc.current_time(), 0.0);
    }

    #[test]
    fn test_stop_constant_holds_value() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.play();
        tc.tick(1.0);
        tc.stop();
        assert_eq!(tc.current_value(), 5.0);
        assert_eq!(tc.current_time(), 0.5);
    }

    #[test]
    fn test_set_duration_keeps_fraction() {
        let mut tc = controller(0.0, 10.0, 2.0);
        tc.play();
        tc.tick(1.0);
        assert_eq!(tc.current_time(), 0.5);

        tc.set_duration(4.0).unwrap();
        assert_eq!(tc.current_time(), 0.5);
        assert_eq!(tc.tick(1.0), Some(7.5));
    }

    #[test]
    fn test_set_duration_rejects_invalid() {
        let mut tc = controller(0.0, 10.0, 2.0);
        assert!(tc.set_duration(0.0).is_err());
        assert!(tc.set_duration(f64::NAN).is_err());
        assert_eq!(tc.config().duration, 2.0);
    }

    #[test]
    fn test_set_bounds_validation() {
        let mut tc = controller(0.0, 10.0, 2.0);
        assert!(tc.set_start_value(f64::INFINITY).is_err());
        assert!(tc.set_end_value(f64::NAN).is_err());
        tc.set_start_value(-1.0).unwrap();
        tc.set_end_value(1.0).unwrap();
        assert_eq!(tc.config().start_value, -1.0);
        assert_eq!(tc.config().end_value, 1.0);
    }
}
