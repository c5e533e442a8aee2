//! quick-xml backed event source

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::{Attributes, EventSource, Location, ParseEvent, StreamError};
use crate::names::ElementName;

/// Event source over the `quick-xml` namespace-aware reader
///
/// Empty elements are expanded into a start and an end event. Comments,
/// processing instructions, declarations and doctypes are dropped; CDATA
/// sections are delivered as character data.
pub struct XmlEventSource<R: BufRead> {
    reader: NsReader<R>,
    lookahead: Option<ParseEvent>,
    consumed: u64,
    finished: bool,
}

impl XmlEventSource<BufReader<File>> {
    /// Open a catalog file for streaming
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::with_capacity(64 * 1024, file)))
    }
}

impl<'a> XmlEventSource<&'a [u8]> {
    /// Stream events from an in-memory document
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> XmlEventSource<R> {
    /// Create a new event source from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = NsReader::from_reader(reader);
        let config = xml_reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;

        Self {
            reader: xml_reader,
            lookahead: None,
            consumed: 0,
            finished: false,
        }
    }

    /// Pull tokens until one maps onto a parse event or the input ends
    fn fill(&mut self) -> Result<(), StreamError> {
        if self.lookahead.is_some() || self.finished {
            return Ok(());
        }

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, event) = self.reader.read_resolved_event_into(&mut buf)?;
            let namespace = namespace_of(ns)?;

            let parsed = match event {
                Event::Start(ref e) => {
                    let name = ElementName::new(namespace, utf8(e.local_name().as_ref())?);
                    let attributes = self.read_attributes(e)?;
                    Some(ParseEvent::StartElement { name, attributes })
                }
                Event::End(ref e) => {
                    let name = ElementName::new(namespace, utf8(e.local_name().as_ref())?);
                    Some(ParseEvent::EndElement { name })
                }
                Event::Text(ref t) => Some(ParseEvent::characters(t.unescape()?.into_owned())),
                Event::CData(c) => Some(ParseEvent::characters(utf8(&c.into_inner())?)),
                Event::Eof => {
                    self.finished = true;
                    None
                }
                _ => continue,
            };

            self.lookahead = parsed;
            return Ok(());
        }
    }

    fn read_attributes(&self, start: &BytesStart<'_>) -> Result<Attributes, StreamError> {
        let mut attributes = Attributes::new();
        for attr in start.attributes() {
            let attr = attr?;
            // xmlns declarations are consumed by the namespace resolver
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (ns, local) = self.reader.resolve_attribute(attr.key);
            let namespace = namespace_of(ns)?;
            let value = attr.decode_and_unescape_value(self.reader.decoder())?.into_owned();
            attributes.push(ElementName::new(namespace, utf8(local.as_ref())?), value);
        }
        Ok(attributes)
    }
}

impl<R: BufRead> EventSource for XmlEventSource<R> {
    fn peek(&mut self) -> Result<Option<&ParseEvent>, StreamError> {
        self.fill()?;
        Ok(self.lookahead.as_ref())
    }

    fn next_event(&mut self) -> Result<Option<ParseEvent>, StreamError> {
        self.fill()?;
        let event = self.lookahead.take();
        if event.is_some() {
            self.consumed += 1;
        }
        Ok(event)
    }

    fn location(&self) -> Location {
        Location {
            event_index: self.consumed,
            byte_offset: Some(self.reader.buffer_position() as u64),
        }
    }
}

fn namespace_of(ns: ResolveResult<'_>) -> Result<String, StreamError> {
    match ns {
        ResolveResult::Bound(namespace) => Ok(utf8(namespace.into_inner())?.to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(StreamError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, StreamError> {
    Ok(std::str::from_utf8(bytes)?)
}
