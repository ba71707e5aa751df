//! Emit the canonical dialect from the parsed block tree
//!
//! The emitter walks the tree with an explicit scope stack. Each `for` pushes
//! a frame binding its item name; canonical `{{#each}}` sections already in
//! the source push anonymous frames, since they also shift `this` at render
//! time.
//!
//! Path rewriting inside a frame stack:
//!
//! - `item` / `item.rest` bound by a loop → `this` / `this.rest`, with one
//!   `../` per frame between the use site and the binding loop
//! - any other bare name directly inside legacy loops → looked up outside
//!   those loops (`@root.name` when no canonical section encloses them)

use super::lexer::Tag;
use super::parser::Node;
use super::slice::SliceExpr;
use crate::template::engine::expr::{parse_expression, parse_params};
use crate::template::engine::{Expr, PathExpr, PathRoot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame<'a> {
    /// `{% for item in list %}`
    Loop(&'a str),
    /// `{{#each ...}}` written in canonical form
    Section,
}

pub(crate) struct Emitter<'a> {
    frames: Vec<Frame<'a>>,
    output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            output: String::with_capacity(capacity),
        }
    }

    /// Emit the whole tree and return the canonical template
    pub fn emit(mut self, nodes: &[Node<'a>]) -> String {
        self.emit_nodes(nodes);
        self.output
    }

    fn emit_nodes(&mut self, nodes: &[Node<'a>]) {
        for node in nodes {
            match node {
                Node::Text(text) => self.output.push_str(text),
                Node::Mustache(tag) => self.emit_mustache(tag),
                Node::If { path, body } => {
                    let mut path = path.clone();
                    self.rewrite_path(&mut path);
                    self.output.push_str(&format!("{{{{#if {}}}}}", path));
                    self.emit_nodes(body);
                    self.output.push_str("{{/if}}");
                }
                Node::For { item, list, body } => {
                    let mut list = list.clone();
                    self.rewrite_path(&mut list);
                    self.output.push_str(&format!("{{{{#each {}}}}}", list));
                    self.frames.push(Frame::Loop(item));
                    self.emit_nodes(body);
                    self.frames.pop();
                    self.output.push_str("{{/each}}");
                }
                Node::Raw {
                    opener,
                    body,
                    closer,
                } => {
                    self.output.push_str(opener);
                    self.emit_nodes(body);
                    if let Some(closer) = closer {
                        self.output.push_str(closer);
                    }
                }
            }
        }
    }

    fn emit_mustache(&mut self, tag: &Tag<'a>) {
        let body = tag.body;

        if !tag.raw {
            if let Some(rest) = body.strip_prefix('#') {
                let (keyword, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match self.rewrite_params(args) {
                    Some(args) => self.output.push_str(&format!("{{{{#{} {}}}}}", keyword, args)),
                    None => self.output.push_str(tag.source),
                }
                if keyword == "each" {
                    self.frames.push(Frame::Section);
                }
                return;
            }
            if let Some(rest) = body.strip_prefix('/') {
                if rest.trim() == "each" && self.frames.last() == Some(&Frame::Section) {
                    self.frames.pop();
                }
                self.output.push_str(tag.source);
                return;
            }
            if body.starts_with('!') || body == "else" {
                self.output.push_str(tag.source);
                return;
            }
        }

        let rewritten = match SliceExpr::parse(body) {
            Some(mut slice) => {
                self.rewrite_path(&mut slice.subject);
                Some(slice.into_call())
            }
            None => parse_expression(body)
                .ok()
                .and_then(|mut expr| self.rewrite_expr(&mut expr).then_some(expr)),
        };

        match rewritten {
            Some(expr) if tag.raw => {
                self.output.push_str(&format!("{{{{{{{}}}}}}}", expr.to_mustache_body()))
            }
            Some(expr) => self
                .output
                .push_str(&format!("{{{{{}}}}}", expr.to_mustache_body())),
            None => self.output.push_str(tag.source),
        }
    }

    /// Rewrite section arguments, `None` when nothing changed
    fn rewrite_params(&self, args: &str) -> Option<String> {
        let mut params = parse_params(args).ok()?;
        let mut changed = false;
        for param in &mut params {
            changed |= self.rewrite_expr(param);
        }
        changed.then(|| {
            params
                .iter()
                .map(Expr::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    fn rewrite_expr(&self, expr: &mut Expr) -> bool {
        let mut changed = false;
        expr.for_each_path_mut(&mut |path| changed |= self.rewrite_path(path));
        changed
    }

    /// Resolve a bare path against the scope stack; returns whether it changed
    fn rewrite_path(&self, path: &mut PathExpr) -> bool {
        if path.root != (PathRoot::Scope { parents: 0 }) {
            return false;
        }
        let Some(head) = path.segments.first() else {
            return false;
        };

        let binding = self
            .frames
            .iter()
            .rev()
            .position(|frame| *frame == Frame::Loop(head.as_str()));
        if let Some(parents) = binding {
            path.root = PathRoot::This { parents };
            path.segments.remove(0);
            return true;
        }

        let loops = self
            .frames
            .iter()
            .rev()
            .take_while(|frame| matches!(frame, Frame::Loop(_)))
            .count();
        if loops == 0 {
            return false;
        }
        path.root = if loops == self.frames.len() {
            PathRoot::Root
        } else {
            PathRoot::Scope { parents: loops }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::{lexer::lex, parser::parse};
    use super::*;

    fn emit(source: &str) -> String {
        let (nodes, _) = parse(lex(source));
        Emitter::new(source.len()).emit(&nodes)
    }

    #[test]
    fn test_top_level_is_untouched() {
        assert_eq!(emit("<p>{{ name }}</p>"), "<p>{{ name }}</p>");
        assert_eq!(emit("{{first name 2}}"), "{{first name 2}}");
    }

    #[test]
    fn test_item_references_become_this() {
        assert_eq!(
            emit("{% for s in skills %}{{s.name}}{{ s }}{% endfor %}"),
            "{{#each skills}}{{this.name}}{{this}}{{/each}}"
        );
    }

    #[test]
    fn test_free_names_inside_loop_point_at_root() {
        assert_eq!(
            emit("{% for s in skills %}{{title}}{% endfor %}"),
            "{{#each skills}}{{@root.title}}{{/each}}"
        );
    }

    #[test]
    fn test_outer_item_gets_parent_prefix() {
        assert_eq!(
            emit("{% for p in people %}{% for t in p.tags %}{{p.name}}:{{t}}{% endfor %}{% endfor %}"),
            "{{#each people}}{{#each this.tags}}{{../this.name}}:{{this}}{{/each}}{{/each}}"
        );
    }

    #[test]
    fn test_shadowed_name_binds_innermost() {
        assert_eq!(
            emit("{% for x in a %}{% for x in x.b %}{{x}}{% endfor %}{{x}}{% endfor %}"),
            "{{#each a}}{{#each this.b}}{{this}}{{/each}}{{this}}{{/each}}"
        );
    }

    #[test]
    fn test_slices_on_items() {
        assert_eq!(
            emit("{% for e in list %}{{e.start[:4]}}|{{e.code[2:]}}|{{e.end[-2:]}}{% endfor %}"),
            "{{#each list}}{{first this.start 4}}|{{substr this.code 2}}|{{last this.end 2}}{{/each}}"
        );
    }

    #[test]
    fn test_canonical_sections_inside_loops() {
        assert_eq!(
            emit("{% for e in list %}{{#if e.done}}{{nl2br e.text}}{{/if}}{% endfor %}"),
            "{{#each list}}{{#if this.done}}{{nl2br this.text}}{{/if}}{{/each}}"
        );
        assert_eq!(
            emit("{% for e in list %}{{#each e.items}}{{e.name}}{{name}}{{/each}}{% endfor %}"),
            "{{#each list}}{{#each this.items}}{{../this.name}}{{name}}{{/each}}{{/each}}"
        );
    }

    #[test]
    fn test_legacy_loop_inside_canonical_section() {
        assert_eq!(
            emit("{{#each groups}}{% for m in members %}{{label}}{% endfor %}{{/each}}"),
            "{{#each groups}}{{#each members}}{{../label}}{{/each}}{{/each}}"
        );
    }

    #[test]
    fn test_triple_stash_is_rewritten_raw() {
        assert_eq!(
            emit("{% for e in list %}{{{e.html}}}{% endfor %}"),
            "{{#each list}}{{{this.html}}}{{/each}}"
        );
    }
}
