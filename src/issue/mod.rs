//! # Issues and parse errors
//!
//! Document-quality problems are reported as [`Issue`]s. A [`Severity::Fatal`]
//! issue aborts the parse through [`ParseError`]; warnings and errors are
//! accumulated in [`Issues`] and returned next to the (possibly partial)
//! result. Nothing is dropped at the log level only.
//!
//! Contract violations by the parser itself are not issues: they panic.

use std::fmt;

use log::{error, warn};
use serde::Serialize;

use crate::event::{Location, StreamError};
use crate::names::ElementName;

pub use report::IssueReport;

mod report;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Suspicious but harmless; parsing continues
    Warning,
    /// Data was dropped or left unset; parsing continues
    Error,
    /// The parse is aborted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    /// Element name or nesting mismatch, unexpected content
    Structural,
    /// Missing required attribute or malformed attribute value
    Attribute,
    /// Value outside a closed enumeration
    Vocabulary,
    /// Failure of the underlying event stream
    Stream,
    /// A configured resource limit was exceeded
    Limit,
    /// The caller cancelled the parse
    Cancelled,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueKind::Structural => "structural",
            IssueKind::Attribute => "attribute",
            IssueKind::Vocabulary => "vocabulary",
            IssueKind::Stream => "stream",
            IssueKind::Limit => "limit",
            IssueKind::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// A severity-tagged diagnostic about the document being parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Severity
    pub severity: Severity,
    /// Category
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Where in the input the problem was detected
    pub location: Location,
    /// Element whose parser reported the issue
    pub element: Option<ElementName>,
}

impl Issue {
    /// Create a new issue
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        message: impl Into<String>,
        location: Location,
        element: Option<ElementName>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            location,
            element,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.severity, self.kind, self.location)?;
        if let Some(element) = &self.element {
            write!(f, " in <{}>", element.local_part())?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Accumulated non-fatal issues
#[derive(Debug, Clone, Default, Serialize)]
pub struct Issues {
    issues: Vec<Issue>,
}

impl Issues {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue, mirroring it to the log
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Warning => warn!("{}", issue),
            Severity::Error | Severity::Fatal => error!("{}", issue),
        }
        self.issues.push(issue);
    }

    /// All issues in the order they were reported
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    /// Iterate over the issues
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Number of issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues of the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Check if any issue has at least the given severity
    pub fn has_at_least(&self, severity: Severity) -> bool {
        self.issues.iter().any(|i| i.severity >= severity)
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Errors that abort a parse
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A fatal document issue
    #[error("{0}")]
    Fatal(Box<Issue>),

    /// The event stream failed while parsing an element
    #[error("stream error while parsing <{}>: {source}", element.local_part())]
    Stream {
        /// Innermost element being parsed
        element: ElementName,
        /// Underlying stream failure
        #[source]
        source: StreamError,
    },

    /// Parsing was cancelled through a [`crate::CancelFlag`]
    #[error("parse cancelled inside <{}>", element.local_part())]
    Cancelled {
        /// Element whose body loop observed the cancellation
        element: ElementName,
    },
}

impl ParseError {
    /// Build a fatal error
    pub(crate) fn fatal(
        kind: IssueKind,
        message: impl Into<String>,
        location: Location,
        element: Option<ElementName>,
    ) -> Self {
        ParseError::Fatal(Box::new(Issue::new(
            Severity::Fatal,
            kind,
            message,
            location,
            element,
        )))
    }

    /// The fatal issue, if this error carries one
    pub fn issue(&self) -> Option<&Issue> {
        match self {
            ParseError::Fatal(issue) => Some(issue),
            _ => None,
        }
    }

    /// Category of the failure
    pub fn kind(&self) -> IssueKind {
        match self {
            ParseError::Fatal(issue) => issue.kind,
            ParseError::Stream { .. } => IssueKind::Stream,
            ParseError::Cancelled { .. } => IssueKind::Cancelled,
        }
    }
}
