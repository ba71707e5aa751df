//! Template error types

use std::fmt;

/// Template compile and render errors
///
/// Missing data never produces an error; only malformed template logic does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Helper invoked by name is not registered
    UnknownHelper {
        /// Name of the missing helper
        name: String,
        /// Line number where the invocation occurred
        line: usize,
    },

    /// Helper invoked with an argument count it does not accept
    HelperArity {
        /// Helper name
        name: String,
        /// Human-readable accepted range (e.g. "1..=2")
        expected: String,
        /// Number of arguments actually supplied
        found: usize,
        /// Line number where the invocation occurred
        line: usize,
    },

    /// Malformed canonical template syntax
    MalformedSyntax {
        /// Error message
        message: String,
        /// Line number where the error occurred
        line: usize,
    },
}

impl TemplateError {
    /// Line number the error points at
    pub fn line(&self) -> usize {
        match self {
            TemplateError::UnknownHelper { line, .. }
            | TemplateError::HelperArity { line, .. }
            | TemplateError::MalformedSyntax { line, .. } => *line,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownHelper { name, line } => {
                write!(f, "Missing helper '{}' at line {}", name, line)
            }
            TemplateError::HelperArity {
                name,
                expected,
                found,
                line,
            } => {
                write!(
                    f,
                    "Helper '{}' expects {} argument(s), got {} at line {}",
                    name, expected, found, line
                )
            }
            TemplateError::MalformedSyntax { message, line } => {
                write!(f, "Malformed syntax at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
