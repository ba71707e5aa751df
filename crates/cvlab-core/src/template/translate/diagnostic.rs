//! Non-fatal translation diagnostics

use serde::Serialize;
use std::fmt;

use super::lexer::Tag;

/// What was wrong with a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `{% something %}` that is neither `if`, `for` nor a closer
    UnknownDirective,
    /// `if` / `for` opener whose arguments cannot be parsed
    MalformedDirective,
    /// Opener without a matching closer before end of input
    UnclosedBlock,
    /// Closer with no open block
    UnexpectedCloser,
    /// Closer that does not match the innermost open block
    MismatchedCloser,
}

impl DiagnosticKind {
    fn describe(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownDirective => "unknown directive",
            DiagnosticKind::MalformedDirective => "malformed directive",
            DiagnosticKind::UnclosedBlock => "unclosed block",
            DiagnosticKind::UnexpectedCloser => "closer without open block",
            DiagnosticKind::MismatchedCloser => "closer does not match open block",
        }
    }
}

/// A directive the translator kept verbatim instead of rewriting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line of the directive
    pub line: usize,
    /// Byte offset of the directive in the source
    pub offset: usize,
    /// Directive source text
    pub snippet: String,
}

impl Diagnostic {
    pub(crate) fn at(kind: DiagnosticKind, tag: &Tag<'_>) -> Self {
        Self {
            kind,
            line: tag.line,
            offset: tag.offset,
            snippet: tag.source.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} '{}'",
            self.line,
            self.kind.describe(),
            self.snippet
        )
    }
}
