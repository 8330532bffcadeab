use metrics::gauge;
use parking_lot::Mutex;

use crate::event::Event;

/// Process-wide store of events awaiting flush.
///
/// Appends never fail and the buffer is unbounded; growth between flushes is
/// an accepted operational risk, surfaced only through the
/// `capture_buffered_events` gauge. The only removal path is
/// `drain_matching`, which swaps events out atomically so concurrent appends
/// can never observe a half-drained buffer.
#[derive(Default)]
pub struct EventBuffer {
    events: Mutex<Vec<Event>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, event: Event) {
        let mut events = self.events.lock();
        events.push(event);
        gauge!("capture_buffered_events").set(events.len() as f64);
    }

    /// Bulk re-insert, used by the flush engine to hand back events it took
    /// but did not write.
    pub fn extend(&self, batch: Vec<Event>) {
        let mut events = self.events.lock();
        events.extend(batch);
        gauge!("capture_buffered_events").set(events.len() as f64);
    }

    /// Atomically remove and return every event whose project id matches.
    /// Events for other projects stay untouched.
    pub fn drain_matching<F>(&self, mut matches: F) -> Vec<Event>
    where
        F: FnMut(&str) -> bool,
    {
        let mut events = self.events.lock();
        let mut drained = Vec::new();
        let mut kept = Vec::with_capacity(events.len());
        for event in events.drain(..) {
            if matches(&event.project_id) {
                drained.push(event);
            } else {
                kept.push(event);
            }
        }
        *events = kept;
        gauge!("capture_buffered_events").set(events.len() as f64);
        drained
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}
