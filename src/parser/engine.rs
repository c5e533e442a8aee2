//! The four-phase parsing protocol shared by every element kind.
//!
//! A parser unit runs `parse_start_element` exactly once, then
//! `handle_child_start_element` for each child start tag, then
//! `post_processing_after_end_element` exactly once after its own end tag
//! has been consumed. [`drive`] owns the body loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::event::{Attributes, EventSource, Location, ParseEvent};
use crate::issue::{Issue, IssueKind, Issues, ParseError, Severity};
use crate::names::{AttributeName, ElementName};

/// Default limit on element nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Cooperative cancellation flag, polled between sibling elements
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every parse observing this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Parser options
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum element nesting depth; deeper documents fail with a limit error
    pub max_depth: usize,
    /// Optional cancellation flag
    pub cancel: Option<CancelFlag>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cancel: None,
        }
    }
}

impl ParseOptions {
    /// Set the depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Attach a cancellation flag
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// What to do with an end tag that does not close the current element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrayEndPolicy {
    /// Abort with a structural error
    Fatal,
    /// If the tag closes the enclosing element, warn and stop without
    /// consuming it; otherwise abort
    YieldToParent,
}

/// One parser unit per element being parsed
pub(crate) trait ElementParser {
    /// Builder handed to the caller once the element is complete
    type Output;

    /// Name of the element this unit parses
    fn element_name(&self) -> &ElementName;

    /// Whether an end tag closes this unit's element
    fn is_self_element(&self, name: &ElementName) -> bool {
        self.element_name() == name
    }

    /// Consume the unit's own start tag and extract its attributes
    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError>;

    /// Dispatch the child start tag at the head of the stream
    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let parent = self.element_name().clone();
        cx.skip_unrecognized(&parent)
    }

    /// Finalise derived fields after the end tag
    fn post_processing_after_end_element(
        &mut self,
        _cx: &mut ParseContext<'_>,
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Policy for end tags that do not close this element
    fn stray_end_policy(&self) -> StrayEndPolicy {
        StrayEndPolicy::Fatal
    }

    /// Release the builder
    fn into_self_builder(self) -> Self::Output;

    /// Run the whole protocol
    fn parse(self, cx: &mut ParseContext<'_>) -> Result<Self::Output, ParseError>
    where
        Self: Sized,
    {
        drive(self, cx)
    }
}

enum Next {
    Start,
    End(ElementName),
    Whitespace,
    Text(String),
    Eof,
}

/// Run a parser unit from its start tag through its matching end tag
pub(crate) fn drive<P: ElementParser>(
    mut parser: P,
    cx: &mut ParseContext<'_>,
) -> Result<P::Output, ParseError> {
    parser.parse_start_element(cx)?;
    let name = parser.element_name().clone();
    cx.enter(&name)?;

    loop {
        cx.check_cancelled(&name)?;

        let next = match cx.peek(&name)? {
            None => Next::Eof,
            Some(ParseEvent::StartElement { .. }) => Next::Start,
            Some(ParseEvent::EndElement { name: end }) => Next::End(end.clone()),
            Some(ParseEvent::Characters {
                is_whitespace: true,
                ..
            }) => Next::Whitespace,
            Some(ParseEvent::Characters { text, .. }) => Next::Text(text.clone()),
        };

        match next {
            Next::Start => parser.handle_child_start_element(cx)?,
            Next::End(end) if parser.is_self_element(&end) => {
                cx.next(&name)?;
                break;
            }
            Next::End(end) => {
                let closes_parent = cx.enclosing_element() == Some(&end);
                if parser.stray_end_policy() == StrayEndPolicy::YieldToParent && closes_parent {
                    cx.warning(
                        IssueKind::Structural,
                        format!(
                            "end of <{}> reached before end of <{}>; assuming it closes the enclosing element",
                            end.local_part(),
                            name.local_part()
                        ),
                        &name,
                    );
                    break;
                }
                return Err(cx.fatal(
                    IssueKind::Structural,
                    format!(
                        "expected end of <{}> but found end of <{}>",
                        name.local_part(),
                        end.local_part()
                    ),
                    &name,
                ));
            }
            Next::Whitespace => {
                cx.next(&name)?;
            }
            Next::Text(text) => {
                cx.next(&name)?;
                cx.warning(
                    IssueKind::Structural,
                    format!("unexpected text [{}] skipped", abbreviate(&text)),
                    &name,
                );
            }
            Next::Eof => {
                return Err(cx.fatal(
                    IssueKind::Structural,
                    format!("document ended inside <{}>", name.local_part()),
                    &name,
                ));
            }
        }
    }

    cx.leave();
    parser.post_processing_after_end_element(cx)?;
    Ok(parser.into_self_builder())
}

/// Unwrap a builder created in `parse_start_element`
///
/// The driver never releases a builder before the start tag was parsed, so
/// an empty slot is a bug in the parser, not in the document.
pub(crate) fn started<T>(slot: Option<T>, element: &ElementName) -> T {
    match slot {
        Some(builder) => builder,
        None => panic!(
            "internal invariant violated: <{}> builder released before its start element was parsed",
            element.local_part()
        ),
    }
}

/// State threaded through one parse: event source, issue sink, open
/// element stack and options
pub(crate) struct ParseContext<'s> {
    source: &'s mut dyn EventSource,
    issues: Issues,
    open: Vec<ElementName>,
    options: ParseOptions,
}

impl<'s> ParseContext<'s> {
    pub(crate) fn new(source: &'s mut dyn EventSource, options: ParseOptions) -> Self {
        Self {
            source,
            issues: Issues::new(),
            open: Vec::new(),
            options,
        }
    }

    pub(crate) fn into_issues(self) -> Issues {
        self.issues
    }

    pub(crate) fn location(&self) -> Location {
        self.source.location()
    }

    pub(crate) fn peek(&mut self, element: &ElementName) -> Result<Option<&ParseEvent>, ParseError> {
        self.source.peek().map_err(|source| ParseError::Stream {
            element: element.clone(),
            source,
        })
    }

    pub(crate) fn next(&mut self, element: &ElementName) -> Result<Option<ParseEvent>, ParseError> {
        self.source.next_event().map_err(|source| ParseError::Stream {
            element: element.clone(),
            source,
        })
    }

    /// Consume whitespace-only character data
    pub(crate) fn skip_whitespace(&mut self, element: &ElementName) -> Result<(), ParseError> {
        while matches!(self.peek(element)?, Some(e) if e.is_whitespace()) {
            self.next(element)?;
        }
        Ok(())
    }

    /// Name of the start tag at the head of the stream, after whitespace
    pub(crate) fn peek_start_name(&mut self, element: &ElementName) -> Result<ElementName, ParseError> {
        self.skip_whitespace(element)?;
        let found = match self.peek(element)? {
            Some(ParseEvent::StartElement { name, .. }) => return Ok(name.clone()),
            Some(ParseEvent::EndElement { name }) => format!("end of <{}>", name.local_part()),
            Some(ParseEvent::Characters { .. }) => "character data".to_string(),
            None => "end of document".to_string(),
        };
        Err(self.fatal(
            IssueKind::Structural,
            format!("expected a start element but found {}", found),
            element,
        ))
    }

    /// Consume the unit's own start tag, checking its name
    pub(crate) fn expect_start_element(&mut self, expected: &ElementName) -> Result<Attributes, ParseError> {
        self.skip_whitespace(expected)?;
        match self.next(expected)? {
            Some(ParseEvent::StartElement { name, attributes }) if &name == expected => Ok(attributes),
            Some(ParseEvent::StartElement { name, .. }) => Err(self.fatal(
                IssueKind::Structural,
                format!(
                    "expected start of <{}> but found <{}>",
                    expected.local_part(),
                    name.local_part()
                ),
                expected,
            )),
            Some(_) | None => Err(self.fatal(
                IssueKind::Structural,
                format!("expected start of <{}>", expected.local_part()),
                expected,
            )),
        }
    }

    /// Concatenate character data up to (not including) the element's end tag
    pub(crate) fn read_character_content(&mut self, element: &ElementName) -> Result<String, ParseError> {
        let mut content = String::new();
        loop {
            let child = match self.peek(element)? {
                Some(ParseEvent::Characters { text, .. }) => {
                    content.push_str(text);
                    None
                }
                Some(ParseEvent::EndElement { .. }) => return Ok(content),
                Some(ParseEvent::StartElement { name, .. }) => Some(name.clone()),
                None => {
                    return Err(self.fatal(
                        IssueKind::Structural,
                        format!("document ended inside <{}>", element.local_part()),
                        element,
                    ))
                }
            };
            if let Some(child) = child {
                return Err(self.fatal(
                    IssueKind::Structural,
                    format!(
                        "<{}> must not contain child element <{}>",
                        element.local_part(),
                        child.local_part()
                    ),
                    element,
                ));
            }
            self.next(element)?;
        }
    }

    /// Consume an entire subtree starting at the next start tag
    pub(crate) fn skip_element(&mut self, parent: &ElementName) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.next(parent)? {
                Some(ParseEvent::StartElement { .. }) => depth += 1,
                Some(ParseEvent::EndElement { .. }) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(ParseEvent::Characters { .. }) => {}
                None => {
                    return Err(self.fatal(
                        IssueKind::Structural,
                        format!("document ended inside <{}>", parent.local_part()),
                        parent,
                    ))
                }
            }
        }
    }

    /// Skip a child no parser claimed, reporting it
    pub(crate) fn skip_unrecognized(&mut self, parent: &ElementName) -> Result<(), ParseError> {
        let child = self.peek_start_name(parent)?;
        self.warning(
            IssueKind::Structural,
            format!(
                "unrecognized child element <{}> of <{}> skipped",
                child.local_part(),
                parent.local_part()
            ),
            parent,
        );
        self.skip_element(parent)
    }

    pub(crate) fn enter(&mut self, element: &ElementName) -> Result<(), ParseError> {
        if self.open.len() >= self.options.max_depth {
            return Err(self.fatal(
                IssueKind::Limit,
                format!(
                    "element nesting exceeds the limit of {} at <{}>",
                    self.options.max_depth,
                    element.local_part()
                ),
                element,
            ));
        }
        self.open.push(element.clone());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.open.pop();
    }

    /// Innermost open element
    pub(crate) fn innermost_element(&self) -> Option<&ElementName> {
        self.open.last()
    }

    /// Element enclosing the innermost open element
    pub(crate) fn enclosing_element(&self) -> Option<&ElementName> {
        self.open.iter().rev().nth(1)
    }

    pub(crate) fn check_cancelled(&self, element: &ElementName) -> Result<(), ParseError> {
        match &self.options.cancel {
            Some(flag) if flag.is_cancelled() => {
                debug!("cancellation observed in <{}>", element.local_part());
                Err(ParseError::Cancelled {
                    element: element.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn warning(&mut self, kind: IssueKind, message: impl Into<String>, element: &ElementName) {
        self.report(Severity::Warning, kind, message, element);
    }

    pub(crate) fn error(&mut self, kind: IssueKind, message: impl Into<String>, element: &ElementName) {
        self.report(Severity::Error, kind, message, element);
    }

    fn report(&mut self, severity: Severity, kind: IssueKind, message: impl Into<String>, element: &ElementName) {
        let issue = Issue::new(severity, kind, message, self.location(), Some(element.clone()));
        self.issues.push(issue);
    }

    pub(crate) fn fatal(&self, kind: IssueKind, message: impl Into<String>, element: &ElementName) -> ParseError {
        ParseError::fatal(kind, message, self.location(), Some(element.clone()))
    }

    /// Value of a required attribute
    pub(crate) fn required_attribute(
        &self,
        attributes: &Attributes,
        name: &AttributeName,
        element: &ElementName,
    ) -> Result<String, ParseError> {
        match attributes.get(name) {
            Some(value) => Ok(value.to_string()),
            None => Err(self.fatal(
                IssueKind::Attribute,
                format!(
                    "missing required attribute [{}] on <{}>",
                    name.local_part(),
                    element.local_part()
                ),
                element,
            )),
        }
    }

    /// Value of an `xs:boolean` attribute
    pub(crate) fn boolean_attribute(
        &self,
        attributes: &Attributes,
        name: &AttributeName,
        element: &ElementName,
    ) -> Result<Option<bool>, ParseError> {
        match attributes.get(name).map(str::trim) {
            None => Ok(None),
            Some("true") | Some("1") => Ok(Some(true)),
            Some("false") | Some("0") => Ok(Some(false)),
            Some(other) => Err(self.fatal(
                IssueKind::Attribute,
                format!(
                    "attribute [{}] on <{}> is not a boolean [{}]",
                    name.local_part(),
                    element.local_part(),
                    other
                ),
                element,
            )),
        }
    }
}

/// Value of an optional attribute
pub(crate) fn optional_attribute(attributes: &Attributes, name: &AttributeName) -> Option<String> {
    attributes.get(name).map(str::to_string)
}

fn abbreviate(text: &str) -> String {
    const MAX: usize = 40;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

/// Generic content of a simple text element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextElement {
    pub attributes: Attributes,
    pub text: String,
}

/// Parser for elements carrying only attributes and text
pub(crate) struct TextElementParser {
    name: ElementName,
    content: TextElement,
}

impl TextElementParser {
    pub(crate) fn new(name: ElementName) -> Self {
        Self {
            name,
            content: TextElement::default(),
        }
    }
}

impl ElementParser for TextElementParser {
    type Output = TextElement;

    fn element_name(&self) -> &ElementName {
        &self.name
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        self.content.attributes = cx.expect_start_element(&self.name)?;
        self.content.text = cx.read_character_content(&self.name)?;
        Ok(())
    }

    fn into_self_builder(self) -> TextElement {
        self.content
    }
}
