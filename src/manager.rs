//! Keyed collections of controllers driven together.

use crate::config::TimeSource;
use crate::controller::{PlayState, TimeController};
use fxhash::FxHashMap;

/// Owns a set of named [`TimeController`]s and fans host deltas out to them.
///
/// Controllers can be ticked all at once or routed by their configured
/// [`TimeSource`], so one manager can sit under both a frame loop and a
/// fixed simulation step.
#[derive(Default)]
pub struct TweenManager {
    controllers: FxHashMap<String, TimeController>,
}

impl TweenManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            controllers: FxHashMap::default(),
        }
    }

    /// Insert a controller under `id`, replacing and returning any previous
    /// holder of that id.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        controller: TimeController,
    ) -> Option<TimeController> {
        self.controllers.insert(id.into(), controller)
    }

    /// Remove and return the controller under `id`.
    pub fn remove(&mut self, id: &str) -> Option<TimeController> {
        self.controllers.remove(id)
    }

    /// Borrow the controller under `id`.
    pub fn get(&self, id: &str) -> Option<&TimeController> {
        self.controllers.get(id)
    }

    /// Mutably borrow the controller under `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut TimeController> {
        self.controllers.get_mut(id)
    }

    /// Iterate the ids of all managed controllers.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    /// Number of managed controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Whether any managed controller is currently consuming ticks.
    pub fn any_playing(&self) -> bool {
        self.controllers.values().any(|c| c.is_playing())
    }

    /// Tick every controller with the same delta.
    pub fn tick_all(&mut self, dt: f64) {
        for controller in self.controllers.values_mut() {
            controller.tick(dt);
        }
    }

    /// Tick only the controllers configured for `source`.
    pub fn tick_source(&mut self, source: TimeSource, dt: f64) {
        for controller in self.controllers.values_mut() {
            if controller.config().time_source == source {
                controller.tick(dt);
            }
        }
    }

    /// Start every controller playing forward.
    pub fn play_all(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.play();
        }
    }

    /// Pause every controller.
    pub fn pause_all(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.pause();
        }
    }

    /// Resume every controller into its pre-transition state.
    pub fn resume_all(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.resume();
        }
    }

    /// Stop every controller.
    pub fn stop_all(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.stop();
        }
    }

    /// Drop every controller resting in `Stopped`; returns how many were
    /// removed. Lets fire-and-forget tweens clean themselves up once done.
    pub fn prune_stopped(&mut self) -> usize {
        let before = self.controllers.len();
        self.controllers
            .retain(|_, c| c.play_state() != PlayState::Stopped);
        let removed = before - self.controllers.len();
        if removed > 0 {
            log::debug!("pruned {removed} stopped controllers");
        }
        removed
    }

    /// Remove all controllers.
    pub fn clear(&mut self) {
        self.controllers.clear();
    }
}
