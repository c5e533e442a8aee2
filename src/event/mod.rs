//! # Event Source
//!
//! Pull-based, namespace-aware stream of XML parse events. The catalog
//! parser only ever talks to an [`EventSource`]; the tokenizer behind it is
//! interchangeable.
//!
//! - [`XmlEventSource`]: adapter over the `quick-xml` namespace reader
//! - [`VecEventSource`]: in-memory event list
//! - [`CountingEventSource`]: wrapper counting consumed events

use std::fmt;

use serde::Serialize;

use crate::names::{AttributeName, ElementName};

pub use error::StreamError;
pub use memory::{CountingEventSource, VecEventSource};
pub use xml::XmlEventSource;

mod error;
mod memory;
mod xml;

#[cfg(test)]
mod tests;

/// Ordered attribute map of a start element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(AttributeName, String)>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, keeping document order
    pub fn push(&mut self, name: AttributeName, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    /// Builder-style append
    pub fn with(mut self, name: AttributeName, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Look up an attribute value by qualified name
    pub fn get(&self, name: &AttributeName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate in document order
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &str)> {
        self.entries.iter().map(|(n, v)| (n, v.as_str()))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single XML parse event, produced in document order and consumed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// Start tag with its attributes
    StartElement {
        /// Qualified element name
        name: ElementName,
        /// Attributes in document order
        attributes: Attributes,
    },
    /// End tag
    EndElement {
        /// Qualified element name
        name: ElementName,
    },
    /// Character data
    Characters {
        /// Text content
        text: String,
        /// True when the text is whitespace only
        is_whitespace: bool,
    },
}

impl ParseEvent {
    /// Start element without attributes
    pub fn start(name: ElementName) -> Self {
        ParseEvent::StartElement {
            name,
            attributes: Attributes::new(),
        }
    }

    /// Start element with attributes
    pub fn start_with(name: ElementName, attributes: Attributes) -> Self {
        ParseEvent::StartElement { name, attributes }
    }

    /// End element
    pub fn end(name: ElementName) -> Self {
        ParseEvent::EndElement { name }
    }

    /// Character data; the whitespace flag is derived from the text
    pub fn characters(text: impl Into<String>) -> Self {
        let text = text.into();
        let is_whitespace = text.chars().all(char::is_whitespace);
        ParseEvent::Characters {
            text,
            is_whitespace,
        }
    }

    /// True if this is a start tag with the given name
    pub fn is_start_of(&self, expected: &ElementName) -> bool {
        matches!(self, ParseEvent::StartElement { name, .. } if name == expected)
    }

    /// True if this is an end tag with the given name
    pub fn is_end_of(&self, expected: &ElementName) -> bool {
        matches!(self, ParseEvent::EndElement { name } if name == expected)
    }

    /// Element name of a start or end tag
    pub fn element_name(&self) -> Option<&ElementName> {
        match self {
            ParseEvent::StartElement { name, .. } | ParseEvent::EndElement { name } => Some(name),
            ParseEvent::Characters { .. } => None,
        }
    }

    /// True for whitespace-only character data
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ParseEvent::Characters { is_whitespace: true, .. })
    }
}

/// Position of an event in the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Zero-based index of the next event to be consumed
    pub event_index: u64,
    /// Byte offset into the underlying document, when known
    pub byte_offset: Option<u64>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.byte_offset {
            Some(offset) => write!(f, "event {} (byte {})", self.event_index, offset),
            None => write!(f, "event {}", self.event_index),
        }
    }
}

/// Pull-based event stream
///
/// `peek` is idempotent: repeated calls without an intervening
/// `next_event` return the same event.
pub trait EventSource {
    /// Return the next event without consuming it
    fn peek(&mut self) -> Result<Option<&ParseEvent>, StreamError>;

    /// Consume and return the next event
    fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError>;

    /// Report whether any events remain
    fn has_next(&mut self) -> Result<bool, StreamError> {
        Ok(self.peek()?.is_some())
    }

    /// Location of the next event
    fn location(&self) -> Location;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn peek(&mut self) -> Result<Option<&ParseEvent>, StreamError> {
        (**self).peek()
    }

    fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError> {
        (**self).next_event()
    }

    fn has_next(&mut self) -> Result<bool, StreamError> {
        (**self).has_next()
    }

    fn location(&self) -> Location {
        (**self).location()
    }
}
