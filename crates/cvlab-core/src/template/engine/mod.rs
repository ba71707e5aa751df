//! Template engine implementation
//!
//! Canonical templates are compiled once into a [`Template`] and executed
//! against any number of contexts. [`Engine::render`] runs the whole
//! pipeline: directive translation, compilation and execution.

mod compile;
mod exec;
pub(crate) mod expr;
pub(crate) mod tokenize;

use serde_json::Value;
use std::sync::Arc;

use crate::template::error::TemplateError;
use crate::template::helpers::HelperRegistry;
use crate::template::translate::translate;

use compile::{compile_nodes, Node};
use exec::Executor;

pub use expr::{Expr, PathExpr, PathRoot};

/// A compiled canonical template
///
/// Immutable once built; rendering borrows it, so one template can serve
/// any number of renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Visit every expression the template evaluates, in source order
    pub fn for_each_expr(&self, f: &mut dyn FnMut(&Expr)) {
        self.for_each_expr_in_scope(&mut |expr, _| f(expr));
    }

    /// Like [`for_each_expr`](Self::for_each_expr), also passing the list
    /// expressions of the enclosing `#each` sections, outermost first
    pub fn for_each_expr_in_scope(&self, f: &mut dyn FnMut(&Expr, &[&Expr])) {
        fn walk<'t>(
            nodes: &'t [Node],
            scope: &mut Vec<&'t Expr>,
            f: &mut dyn FnMut(&Expr, &[&Expr]),
        ) {
            for node in nodes {
                match node {
                    Node::Text(_) => {}
                    Node::Output { expr, .. } => f(expr, scope),
                    Node::If { cond, body, .. } => {
                        f(cond, scope);
                        walk(body, scope, f);
                    }
                    Node::Each { list, body, .. } => {
                        f(list, scope);
                        scope.push(list);
                        walk(body, scope, f);
                        scope.pop();
                    }
                }
            }
        }
        walk(&self.nodes, &mut Vec::new(), f);
    }
}

/// Template engine bound to a helper registry
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<HelperRegistry>,
}

impl Engine {
    /// Create an engine using the shared built-in helpers
    pub fn new() -> Self {
        Self {
            registry: HelperRegistry::builtin(),
        }
    }

    /// Create an engine with an injected registry
    pub fn with_registry(registry: Arc<HelperRegistry>) -> Self {
        Self { registry }
    }

    /// Registry used to resolve helper calls
    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    /// Compile a canonical template
    ///
    /// Helper names are resolved at render time, so a template referencing
    /// an unknown helper compiles but fails when the call is reached.
    pub fn compile(&self, canonical: &str) -> Result<Template, TemplateError> {
        let nodes = compile_nodes(canonical)?;
        tracing::debug!(nodes = nodes.len(), "compiled template");
        Ok(Template { nodes })
    }

    /// Execute a compiled template against `context`
    pub fn render_compiled(
        &self,
        template: &Template,
        context: &Value,
    ) -> Result<String, TemplateError> {
        Executor::new(&self.registry).run(&template.nodes, context)
    }

    /// Compile and execute a template already in the canonical dialect
    pub fn render_canonical(&self, canonical: &str, context: &Value) -> Result<String, TemplateError> {
        let template = self.compile(canonical)?;
        self.render_compiled(&template, context)
    }

    /// Translate, compile and execute a template source
    pub fn render(&self, source: &str, context: &Value) -> Result<String, TemplateError> {
        let canonical = translate(source);
        self.render_canonical(&canonical, context)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to render a template source with the default engine
pub fn render(source: &str, context: &Value) -> Result<String, TemplateError> {
    Engine::new().render(source, context)
}

#[cfg(test)]
mod tests;
