use std::collections::VecDeque;

use super::{EventSource, Location, ParseEvent, StreamError};

/// Event source over an in-memory list of events
#[derive(Debug, Clone, Default)]
pub struct VecEventSource {
    events: VecDeque<ParseEvent>,
    consumed: u64,
}

impl VecEventSource {
    /// Create a source yielding the given events in order
    pub fn new(events: impl IntoIterator<Item = ParseEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of events not yet consumed
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for VecEventSource {
    fn peek(&mut self) -> Result<Option<&ParseEvent>, StreamError> {
        Ok(self.events.front())
    }

    fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError> {
        let event = self.events.pop_front();
        if event.is_some() {
            self.consumed += 1;
        }
        Ok(event)
    }

    fn location(&self) -> Location {
        Location {
            event_index: self.consumed,
            byte_offset: None,
        }
    }
}

/// Wrapper counting the events consumed from an inner source
///
/// Peeks are not counted.
#[derive(Debug)]
pub struct CountingEventSource<S> {
    inner: S,
    consumed: usize,
}

impl<S: EventSource> CountingEventSource<S> {
    /// Wrap a source
    pub fn new(inner: S) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Events consumed so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Unwrap the inner source
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSource> EventSource for CountingEventSource<S> {
    fn peek(&mut self) -> Result<Option<&ParseEvent>, StreamError> {
        self.inner.peek()
    }

    fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError> {
        let event = self.inner.next_event()?;
        if event.is_some() {
            self.consumed += 1;
        }
        Ok(event)
    }

    fn location(&self) -> Location {
        self.inner.location()
    }
}
