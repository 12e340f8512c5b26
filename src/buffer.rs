use std::collections::VecDeque;

use crate::types::event::LiveEvent;

/// Maximum number of events retained for rendering.
pub const EVENT_BUFFER_CAPACITY: usize = 200;

/// Bounded, most-recent-first buffer of live events.
///
/// Insertion happens at the head; once the buffer is full the tail entry is
/// evicted in the same operation, so `len() <= capacity` holds at all times.
/// `total` counts every event ever recorded — eviction does not decrement it
/// and only [`EventBuffer::clear`] resets it.
#[derive(Debug)]
pub struct EventBuffer {
    events: VecDeque<LiveEvent>,
    total: u64,
    capacity: usize,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            total: 0,
            capacity,
        }
    }

    /// Record a newly received event at the head, evicting the tail if full.
    pub fn record(&mut self, event: LiveEvent) {
        self.events.push_front(event);
        while self.events.len() > self.capacity {
            self.events.pop_back();
        }
        self.total += 1;
    }

    /// Empty the buffer and reset the lifetime counter. Idempotent; does not
    /// touch connection state.
    pub fn clear(&mut self) {
        self.events.clear();
        self.total = 0;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events ever recorded, independent of eviction.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Head-first copy of the retained events, for rendering.
    pub fn snapshot(&self) -> Vec<LiveEvent> {
        self.events.iter().cloned().collect()
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new()
    }
}
