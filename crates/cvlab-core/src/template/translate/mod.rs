//! Directive translator - legacy dialect to canonical dialect
//!
//! Translation is a three-stage pipeline:
//!
//! 1. [`lexer`]: flat stream of text, `{% %}` directives and `{{ }}` mustaches
//! 2. [`parser`]: recursive descent into `if` / `for` blocks
//! 3. [`scope`]: tree walk with a scope stack, rewriting loop items to `this`
//!    and slices to helper calls
//!
//! Translation never fails. Directives it cannot parse or balance are copied
//! through verbatim and reported as [`Diagnostic`]s.

mod diagnostic;
mod lexer;
mod parser;
mod scope;
pub mod slice;

use serde::Serialize;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use slice::{SliceExpr, SliceMode};

/// Canonical template plus any warnings raised on the way
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Translate a legacy template into the canonical dialect
pub fn translate(source: &str) -> String {
    translate_with_diagnostics(source).output
}

/// Translate and keep the diagnostics
pub fn translate_with_diagnostics(source: &str) -> Translation {
    let (nodes, diagnostics) = parser::parse(lexer::lex(source));
    let output = scope::Emitter::new(source.len()).emit(&nodes);

    for diagnostic in &diagnostics {
        tracing::debug!(
            kind = ?diagnostic.kind,
            line = diagnostic.line,
            snippet = %diagnostic.snippet,
            "directive kept verbatim"
        );
    }

    Translation {
        output,
        diagnostics,
    }
}

#[cfg(test)]
mod tests;
