//! Recursive-descent parse of legacy directives into a block tree
//!
//! Directive grammar:
//!
//! ```text
//! {% if <path> %} ... {% endif %}
//! {% for <ident> in <path> %} ... {% endfor %}
//! ```
//!
//! Anything that does not fit is kept as verbatim text and reported.

use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::lexer::{Lexeme, Tag};
use crate::template::engine::PathExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    For,
}

/// Parsed legacy template
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node<'a> {
    Text(&'a str),
    Mustache(Tag<'a>),
    If {
        path: PathExpr,
        body: Vec<Node<'a>>,
    },
    For {
        item: &'a str,
        list: PathExpr,
        body: Vec<Node<'a>>,
    },
    /// Block kept verbatim: malformed opener or missing closer
    Raw {
        opener: &'a str,
        body: Vec<Node<'a>>,
        closer: Option<&'a str>,
    },
}

enum Directive<'a> {
    OpenIf(PathExpr),
    OpenFor { item: &'a str, list: PathExpr },
    Close(BlockKind),
    /// Recognised opener with unusable arguments
    Malformed(BlockKind),
    Unknown,
}

fn classify_directive(body: &str) -> Directive<'_> {
    let words: Vec<&str> = body.split_whitespace().collect();
    match words.as_slice() {
        ["endif"] => Directive::Close(BlockKind::If),
        ["endfor"] => Directive::Close(BlockKind::For),
        ["if", path] if is_dotted_path(path) => Directive::OpenIf(PathExpr::parse(path)),
        ["if", ..] => Directive::Malformed(BlockKind::If),
        ["for", item, "in", list] if is_identifier(item) && is_dotted_path(list) => {
            Directive::OpenFor {
                item: *item,
                list: PathExpr::parse(list),
            }
        }
        ["for", ..] => Directive::Malformed(BlockKind::For),
        _ => Directive::Unknown,
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn is_dotted_path(word: &str) -> bool {
    word.split('.')
        .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_'))
}

enum End<'a> {
    Closed(&'a str),
    Eof,
}

struct Parser<'a> {
    lexemes: std::vec::IntoIter<Lexeme<'a>>,
    diagnostics: Vec<Diagnostic>,
}

/// Parse a lexeme stream; diagnostics are ordered by source offset
pub(crate) fn parse(lexemes: Vec<Lexeme<'_>>) -> (Vec<Node<'_>>, Vec<Diagnostic>) {
    let mut parser = Parser {
        lexemes: lexemes.into_iter(),
        diagnostics: Vec::new(),
    };
    let (nodes, _) = parser.parse_block(None);
    let mut diagnostics = parser.diagnostics;
    diagnostics.sort_by_key(|d| d.offset);
    (nodes, diagnostics)
}

impl<'a> Parser<'a> {
    fn report(&mut self, kind: DiagnosticKind, tag: &Tag<'_>) {
        self.diagnostics.push(Diagnostic::at(kind, tag));
    }

    /// Parse until the closer of `open` (or end of input)
    fn parse_block(&mut self, open: Option<BlockKind>) -> (Vec<Node<'a>>, End<'a>) {
        let mut nodes = Vec::new();

        while let Some(lexeme) = self.lexemes.next() {
            let tag = match lexeme {
                Lexeme::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Lexeme::Mustache(tag) => {
                    nodes.push(Node::Mustache(tag));
                    continue;
                }
                Lexeme::Directive(tag) => tag,
            };

            match classify_directive(tag.body) {
                Directive::OpenIf(path) => {
                    let (body, end) = self.parse_block(Some(BlockKind::If));
                    let node = self.finish(&tag, end, body, |body| Node::If { path, body });
                    nodes.push(node);
                }
                Directive::OpenFor { item, list } => {
                    let (body, end) = self.parse_block(Some(BlockKind::For));
                    let node =
                        self.finish(&tag, end, body, |body| Node::For { item, list, body });
                    nodes.push(node);
                }
                Directive::Close(kind) if open == Some(kind) => {
                    return (nodes, End::Closed(tag.source));
                }
                Directive::Close(_) => {
                    let kind = if open.is_some() {
                        DiagnosticKind::MismatchedCloser
                    } else {
                        DiagnosticKind::UnexpectedCloser
                    };
                    self.report(kind, &tag);
                    nodes.push(Node::Text(tag.source));
                }
                Directive::Malformed(kind) => {
                    self.report(DiagnosticKind::MalformedDirective, &tag);
                    // Consume the matching closer so it cannot close an outer block
                    let (body, end) = self.parse_block(Some(kind));
                    nodes.push(Node::Raw {
                        opener: tag.source,
                        body,
                        closer: match end {
                            End::Closed(closer) => Some(closer),
                            End::Eof => None,
                        },
                    });
                }
                Directive::Unknown => {
                    self.report(DiagnosticKind::UnknownDirective, &tag);
                    nodes.push(Node::Text(tag.source));
                }
            }
        }

        (nodes, End::Eof)
    }

    fn finish(
        &mut self,
        tag: &Tag<'a>,
        end: End<'a>,
        body: Vec<Node<'a>>,
        build: impl FnOnce(Vec<Node<'a>>) -> Node<'a>,
    ) -> Node<'a> {
        match end {
            End::Closed(_) => build(body),
            End::Eof => {
                self.report(DiagnosticKind::UnclosedBlock, tag);
                Node::Raw {
                    opener: tag.source,
                    body,
                    closer: None,
                }
            }
        }
    }
}
