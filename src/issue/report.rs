use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{Issue, ParseError, Severity};

/// Human-readable summary of one parse run
#[derive(Debug)]
pub struct IssueReport<'a> {
    /// Document that was parsed
    pub source: String,
    /// Accumulated non-fatal issues
    pub issues: &'a [Issue],
    /// The error that aborted the parse, if any
    pub failure: Option<&'a ParseError>,
}

impl<'a> IssueReport<'a> {
    /// Create a report for a document
    pub fn new(source: impl Into<String>, issues: &'a [Issue], failure: Option<&'a ParseError>) -> Self {
        Self {
            source: source.into(),
            issues,
            failure,
        }
    }

    /// Check if the parse was aborted
    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Count the number of errors
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static ERR: Emoji<'_, '_> = Emoji("✗", "[ERROR]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FATAL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("THREDDS Catalog Parse Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("============================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Document").bold(), self.source));

            for issue in self.issues {
                match issue.severity {
                    Severity::Warning => output.push_str(&format!(
                        "[{}] {}\n",
                        WARN,
                        style(issue.to_string()).yellow()
                    )),
                    Severity::Error | Severity::Fatal => output.push_str(&format!(
                        "[{}] {}\n",
                        ERR,
                        style(issue.to_string()).red()
                    )),
                }
            }
            if let Some(failure) = self.failure {
                output.push_str(&format!("[{}] {}\n", FAIL, style(failure.to_string()).red().bold()));
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} warnings, {} errors\n",
                style("Summary").bold(),
                style(self.warning_count()).yellow(),
                style(self.error_count()).red()
            ));

            output.push('\n');
            if self.has_failure() {
                output.push_str(&format!("{}\n", style("Parse FAILED").red().bold()));
            } else if !self.issues.is_empty() {
                output.push_str(&format!("{}\n", style("Parse SUCCEEDED with issues").yellow().bold()));
            } else {
                output.push_str(&format!("{}\n", style("Parse SUCCEEDED").green().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for IssueReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "THREDDS Catalog Parse Report")?;
        writeln!(f, "============================")?;
        writeln!(f, "Document: {}", self.source)?;
        writeln!(f)?;

        for issue in self.issues {
            let symbol = match issue.severity {
                Severity::Warning => "⚠",
                Severity::Error | Severity::Fatal => "✗",
            };
            writeln!(f, "[{}] {}", symbol, issue)?;
        }
        if let Some(failure) = self.failure {
            writeln!(f, "[✗] {}", failure)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} warnings, {} errors",
            self.warning_count(),
            self.error_count()
        )?;
        writeln!(f)?;

        if self.has_failure() {
            writeln!(f, "Parse FAILED")
        } else if !self.issues.is_empty() {
            writeln!(f, "Parse SUCCEEDED with issues")
        } else {
            writeln!(f, "Parse SUCCEEDED")
        }
    }
}
