//! Template module - Directive translation and HTML rendering
//!
//! Resume templates are authored in a legacy directive dialect and rendered
//! against a plain JSON context. Rendering is a fixed pipeline:
//!
//! ```text
//! source ──translate──> canonical ──compile──> Template ──execute(context)──> HTML
//! ```
//!
//! ## Legacy dialect (input)
//!
//! - Interpolation: `{{ name }}`, `{{ exp.company }}`
//! - Blocks: `{% if path %} ... {% endif %}`, `{% for item in list %} ... {% endfor %}`
//! - Slices: `{{ path[:4] }}`, `{{ path[2:] }}`, `{{ path[-2:] }}`
//!
//! ## Canonical dialect (compiled)
//!
//! - Escaped output `{{expr}}`, raw output `{{{expr}}}`, comments `{{! ... }}`
//! - Sections `{{#if expr}}` / `{{#each expr}}` with `this` bound per item
//! - Helper calls `{{first this.start_date 4}}`, sub-expressions `(hasItems x)`
//!
//! Missing data always renders as an empty string. Only malformed template
//! logic (unknown helper, wrong arity, unbalanced canonical sections) fails.

pub mod engine;
pub mod error;
pub mod helpers;
pub mod translate;
pub mod value;

pub use engine::{render, Engine, Template};
pub use error::TemplateError;
pub use helpers::{Helper, HelperRegistry, HelperValue};
pub use translate::{translate, translate_with_diagnostics, Diagnostic, DiagnosticKind, Translation};
