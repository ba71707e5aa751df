//! Execute compiled templates against a context
//!
//! The executor keeps a stack of scope frames: the root context at the bottom
//! and one frame per active `#each` iteration on top.

use serde_json::Value;
use std::borrow::Cow;

use super::compile::Node;
use super::expr::{Expr, PathExpr, PathRoot};
use crate::template::error::TemplateError;
use crate::template::helpers::{HelperRegistry, HelperValue};
use crate::template::value::{display, escape_html, is_truthy};

/// One scope level: the value bound to `this` plus loop metadata
#[derive(Clone, Copy)]
struct Frame<'a> {
    value: &'a Value,
    index: Option<usize>,
    len: usize,
}

/// Evaluated expression, remembering whether it is safe markup
enum Evaluated<'a> {
    Value(Cow<'a, Value>),
    Safe(String),
}

impl Evaluated<'_> {
    fn is_truthy(&self) -> bool {
        match self {
            Evaluated::Value(v) => is_truthy(v),
            Evaluated::Safe(markup) => !markup.is_empty(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Evaluated::Value(v) => v.into_owned(),
            Evaluated::Safe(markup) => Value::String(markup),
        }
    }
}

pub(crate) struct Executor<'r> {
    registry: &'r HelperRegistry,
}

impl<'r> Executor<'r> {
    pub fn new(registry: &'r HelperRegistry) -> Self {
        Self { registry }
    }

    /// Render `nodes` with `context` as the root scope
    pub fn run(&self, nodes: &[Node], context: &Value) -> Result<String, TemplateError> {
        let mut output = String::new();
        let stack = [Frame {
            value: context,
            index: None,
            len: 0,
        }];
        self.render_nodes(nodes, &stack, &mut output)?;
        Ok(output)
    }

    fn render_nodes<'a>(
        &self,
        nodes: &[Node],
        stack: &[Frame<'a>],
        output: &mut String,
    ) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Output { expr, raw, line } => match self.eval(expr, stack, *line)? {
                    Evaluated::Safe(markup) => output.push_str(&markup),
                    Evaluated::Value(value) => {
                        let text = display(&value);
                        if *raw {
                            output.push_str(&text);
                        } else {
                            output.push_str(&escape_html(&text));
                        }
                    }
                },
                Node::If { cond, body, line } => {
                    if self.eval(cond, stack, *line)?.is_truthy() {
                        self.render_nodes(body, stack, output)?;
                    }
                }
                Node::Each { list, body, line } => {
                    let items = match self.eval(list, stack, *line)? {
                        Evaluated::Value(Cow::Borrowed(Value::Array(items))) => {
                            Cow::Borrowed(items.as_slice())
                        }
                        Evaluated::Value(Cow::Owned(Value::Array(items))) => Cow::Owned(items),
                        _ => continue,
                    };
                    self.render_each(&items, body, stack, output)?;
                }
            }
        }
        Ok(())
    }

    fn render_each<'a>(
        &self,
        items: &[Value],
        body: &[Node],
        stack: &[Frame<'a>],
        output: &mut String,
    ) -> Result<(), TemplateError> {
        // Items may be owned by the caller, so each iteration gets its own
        // stack borrowing from them.
        let len = items.len();
        for (index, item) in items.iter().enumerate() {
            let mut scoped: Vec<Frame<'_>> = stack.to_vec();
            scoped.push(Frame {
                value: item,
                index: Some(index),
                len,
            });
            self.render_nodes(body, &scoped, output)?;
        }
        Ok(())
    }

    fn eval<'a>(
        &self,
        expr: &Expr,
        stack: &[Frame<'a>],
        line: usize,
    ) -> Result<Evaluated<'a>, TemplateError> {
        match expr {
            Expr::Literal(value) => Ok(Evaluated::Value(Cow::Owned(value.clone()))),
            Expr::Path(path) => Ok(Evaluated::Value(resolve_path(path, stack))),
            Expr::Call { name, args } => {
                let helper = self
                    .registry
                    .get(name)
                    .ok_or_else(|| TemplateError::UnknownHelper {
                        name: name.clone(),
                        line,
                    })?;
                if !helper.accepts(args.len()) {
                    return Err(TemplateError::HelperArity {
                        name: name.clone(),
                        expected: helper.arity_label(),
                        found: args.len(),
                        line,
                    });
                }
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg, stack, line).map(Evaluated::into_value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match helper.call(&values) {
                    HelperValue::Plain(value) => Evaluated::Value(Cow::Owned(value)),
                    HelperValue::Safe(markup) => Evaluated::Safe(markup),
                })
            }
        }
    }
}

/// Resolve a path against the scope stack; missing data resolves to null
fn resolve_path<'a>(path: &PathExpr, stack: &[Frame<'a>]) -> Cow<'a, Value> {
    const MISSING: Cow<'static, Value> = Cow::Owned(Value::Null);

    match path.root {
        PathRoot::Root => match stack.first() {
            Some(frame) => traverse(frame.value, &path.segments),
            None => MISSING,
        },
        PathRoot::This { parents } => match frame_at(stack, parents) {
            Some(frame) => traverse(frame.value, &path.segments),
            None => MISSING,
        },
        PathRoot::Scope { parents } => {
            let Some(top) = stack.len().checked_sub(parents + 1) else {
                return MISSING;
            };
            // Bare names fall back through enclosing scopes, innermost first
            for frame in stack[..=top].iter().rev() {
                let found = traverse(frame.value, &path.segments);
                if !matches!(found, Cow::Owned(Value::Null)) {
                    return found;
                }
            }
            MISSING
        }
        PathRoot::Data => match stack.last() {
            Some(frame) => loop_data(frame, &path.segments),
            None => MISSING,
        },
    }
}

fn frame_at<'s, 'a>(stack: &'s [Frame<'a>], parents: usize) -> Option<&'s Frame<'a>> {
    stack
        .len()
        .checked_sub(parents + 1)
        .and_then(|i| stack.get(i))
}

/// Dotted traversal; arrays accept numeric segments
fn traverse<'a>(base: &'a Value, segments: &[String]) -> Cow<'a, Value> {
    let mut current = base;
    for segment in segments {
        let next = match current {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::String(s) if segment == "length" => {
                return Cow::Owned(Value::from(s.chars().count()));
            }
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => {
                if let (Value::Array(items), "length") = (current, segment.as_str()) {
                    return Cow::Owned(Value::from(items.len()));
                }
                return Cow::Owned(Value::Null);
            }
        }
    }
    Cow::Borrowed(current)
}

fn loop_data<'a>(frame: &Frame<'_>, segments: &[String]) -> Cow<'a, Value> {
    let Some(index) = frame.index else {
        return Cow::Owned(Value::Null);
    };
    match segments.first().map(String::as_str) {
        Some("index") => Cow::Owned(Value::from(index)),
        Some("first") => Cow::Owned(Value::Bool(index == 0)),
        Some("last") => Cow::Owned(Value::Bool(index + 1 == frame.len)),
        _ => Cow::Owned(Value::Null),
    }
}
