//! Typed lifecycle notifications and their delivery plumbing.

use crate::controller::PlayState;
use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};

/// A lifecycle notification emitted by a [`TimeController`](crate::TimeController).
///
/// Delivery is synchronous: sinks run in subscription order, inside the call
/// stack of the command or tick that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TweenEvent {
    /// A fresh output value was computed. Emitted on every active tick and
    /// every seek; `offset` is the change from the previous value and `time`
    /// is the normalized progress in `[0, 1]`.
    ValueUpdated { value: f64, offset: f64, time: f64 },
    /// The play state changed.
    StateChanged {
        previous: PlayState,
        current: PlayState,
    },
    /// A pass boundary was crossed; `loops` is the running count of
    /// completed passes.
    LoopCompleted { loops: u32 },
    /// The loop budget is exhausted; the controller stops right after this.
    Completed,
}

/// Handle returned by `subscribe`; pass it back to `unsubscribe` to detach
/// the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Boxed event sink as stored by a controller.
pub type EventSink = Box<dyn FnMut(&TweenEvent) + Send>;

/// Ordered sink registry. Sinks are called in the order they subscribed.
#[derive(Default)]
pub(crate) struct Subscribers {
    sinks: Vec<(SubscriptionId, EventSink)>,
    next_id: u64,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, sink: EventSink) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.sinks.push((id, sink));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    pub(crate) fn emit(&mut self, event: &TweenEvent) {
        for (_, sink) in &mut self.sinks {
            sink(event);
        }
    }
}

/// Build a sink that forwards every event into an unbounded channel, for
/// hosts that poll notifications instead of taking callbacks.
///
/// Events sent after the receiver is dropped are discarded.
pub fn channel_sink() -> (EventSink, Receiver<TweenEvent>) {
    let (tx, rx) = unbounded();
    let sink: EventSink = Box::new(move |event: &TweenEvent| {
        let _ = tx.send(*event);
    });
    (sink, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_emit_in_order() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subs = Subscribers::default();
        for tag in ["first", "second"] {
            let seen = seen.clone();
            subs.subscribe(Box::new(move |event: &TweenEvent| {
                if let TweenEvent::LoopCompleted { loops } = event {
                    seen.lock().unwrap().push((tag, *loops));
                }
            }));
        }

        subs.emit(&TweenEvent::LoopCompleted { loops: 1 });
        assert_eq!(*seen.lock().unwrap(), vec![("first", 1), ("second", 1)]);
    }

    #[test]
    fn test_unsubscribe_removes_sink() {
        use std::sync::{Arc, Mutex};

        let counts = Arc::new(Mutex::new((0usize, 0usize)));
        let mut subs = Subscribers::default();
        let first_counts = counts.clone();
        let first = subs.subscribe(Box::new(move |_| first_counts.lock().unwrap().0 += 1));
        let second_counts = counts.clone();
        subs.subscribe(Box::new(move |_| second_counts.lock().unwrap().1 += 1));

        subs.emit(&TweenEvent::Completed);
        assert_eq!(*counts.lock().unwrap(), (1, 1));

        assert!(subs.unsubscribe(first));
        subs.emit(&TweenEvent::Completed);
        assert_eq!(*counts.lock().unwrap(), (1, 2));

        // Second removal of the same id is a no-op
        assert!(!subs.unsubscribe(first));
    }

    #[test]
    fn test_channel_sink_forwards_events() {
        let (mut sink, rx) = channel_sink();
        sink(&TweenEvent::Completed);
        sink(&TweenEvent::LoopCompleted { loops: 3 });

        assert_eq!(rx.try_recv(), Ok(TweenEvent::Completed));
        assert_eq!(rx.try_recv(), Ok(TweenEvent::LoopCompleted { loops: 3 }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (mut sink, rx) = channel_sink();
        drop(rx);
        // Must not panic
        sink(&TweenEvent::Completed);
    }
}
