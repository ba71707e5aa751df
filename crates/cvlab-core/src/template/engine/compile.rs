//! Compile canonical templates into a node tree
//!
//! Sections are matched with an explicit stack while tokens stream past, so
//! compilation is a single pass over the template.

use super::expr::{parse_expression, parse_params, Expr};
use super::tokenize::{Delimiter, Token, TokenStream};
use crate::template::error::TemplateError;

/// Compiled template node
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// Literal text, emitted as-is
    Text(String),
    /// `{{expr}}` (escaped) or `{{{expr}}}` (raw)
    Output { expr: Expr, raw: bool, line: usize },
    /// `{{#if expr}} ... {{/if}}`
    If {
        cond: Expr,
        body: Vec<Node>,
        line: usize,
    },
    /// `{{#each expr}} ... {{/each}}`
    Each {
        list: Expr,
        body: Vec<Node>,
        line: usize,
    },
}

/// Section keywords understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    If,
    Each,
}

impl SectionKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(SectionKind::If),
            "each" => Some(SectionKind::Each),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SectionKind::If => "if",
            SectionKind::Each => "each",
        }
    }
}

/// Token classification for canonical content
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'a> {
    /// {{expr}} or {{{expr}}}
    Expression { content: &'a str, raw: bool },
    /// {{#keyword args}}
    SectionOpen { keyword: &'a str, args: &'a str },
    /// {{/keyword}}
    SectionClose { keyword: &'a str },
    /// {{! comment }}
    Comment,
}

/// Classify token content into TokenKind
///
/// - `#each items` → SectionOpen
/// - `/each` → SectionClose
/// - `! text` → Comment
/// - anything else → Expression
pub(crate) fn classify<'a>(token: &Token, template: &'a str) -> TokenKind<'a> {
    let trimmed = token.content(template).trim();
    if token.delimiter == Delimiter::Triple {
        return TokenKind::Expression {
            content: trimmed,
            raw: true,
        };
    }

    if let Some(rest) = trimmed.strip_prefix('#') {
        let (keyword, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        TokenKind::SectionOpen {
            keyword,
            args: args.trim(),
        }
    } else if let Some(rest) = trimmed.strip_prefix('/') {
        TokenKind::SectionClose {
            keyword: rest.trim(),
        }
    } else if trimmed.starts_with('!') {
        TokenKind::Comment
    } else {
        TokenKind::Expression {
            content: trimmed,
            raw: false,
        }
    }
}

struct OpenSection {
    kind: SectionKind,
    arg: Expr,
    line: usize,
    body: Vec<Node>,
}

/// Compile a canonical template into its node list
pub(crate) fn compile_nodes(template: &str) -> Result<Vec<Node>, TemplateError> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut cursor = 0;

    for token in TokenStream::new(template) {
        let text_end = token.start - token.backslash_count;
        let mut text = template[cursor..text_end].to_string();
        // Half of the backslashes survive as literal backslashes
        text.extend(std::iter::repeat('\\').take(token.backslash_count / 2));
        cursor = token.end();

        if token.is_escaped() {
            text.push_str(token.source(template));
            push_text(current(&mut root, &mut stack), text);
            continue;
        }
        push_text(current(&mut root, &mut stack), text);

        match classify(&token, template) {
            TokenKind::Comment => {}
            TokenKind::Expression { content, raw } => {
                if content == "else" {
                    return Err(TemplateError::MalformedSyntax {
                        message: "{{else}} branches are not supported".to_string(),
                        line: token.line,
                    });
                }
                let expr = parse_expression(content).map_err(|message| {
                    TemplateError::MalformedSyntax {
                        message: format!("{} in '{{{{{}}}}}'", message, content),
                        line: token.line,
                    }
                })?;
                current(&mut root, &mut stack).push(Node::Output {
                    expr,
                    raw,
                    line: token.line,
                });
            }
            TokenKind::SectionOpen { keyword, args } => {
                let kind = SectionKind::from_keyword(keyword).ok_or_else(|| {
                    TemplateError::UnknownHelper {
                        name: keyword.to_string(),
                        line: token.line,
                    }
                })?;
                let arg = parse_section_arg(kind, args, token.line)?;
                stack.push(OpenSection {
                    kind,
                    arg,
                    line: token.line,
                    body: Vec::new(),
                });
            }
            TokenKind::SectionClose { keyword } => {
                let open = stack.pop().ok_or_else(|| TemplateError::MalformedSyntax {
                    message: format!("Unexpected {{{{/{}}}}} without matching section", keyword),
                    line: token.line,
                })?;
                if open.kind.keyword() != keyword {
                    return Err(TemplateError::MalformedSyntax {
                        message: format!(
                            "{{{{#{}}}}} opened at line {} closed by {{{{/{}}}}}",
                            open.kind.keyword(),
                            open.line,
                            keyword
                        ),
                        line: token.line,
                    });
                }
                let node = match open.kind {
                    SectionKind::If => Node::If {
                        cond: open.arg,
                        body: open.body,
                        line: open.line,
                    },
                    SectionKind::Each => Node::Each {
                        list: open.arg,
                        body: open.body,
                        line: open.line,
                    },
                };
                current(&mut root, &mut stack).push(node);
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(TemplateError::MalformedSyntax {
            message: format!("Unclosed {{{{#{}}}}} section", open.kind.keyword()),
            line: open.line,
        });
    }

    push_text(&mut root, template[cursor..].to_string());
    Ok(root)
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [OpenSection]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) => &mut open.body,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(prev)) = nodes.last_mut() {
        prev.push_str(&text);
    } else {
        nodes.push(Node::Text(text));
    }
}

fn parse_section_arg(kind: SectionKind, args: &str, line: usize) -> Result<Expr, TemplateError> {
    let mut params = parse_params(args).map_err(|message| TemplateError::MalformedSyntax {
        message: format!("{} in '{{{{#{} {}}}}}'", message, kind.keyword(), args),
        line,
    })?;
    if params.len() != 1 {
        return Err(TemplateError::MalformedSyntax {
            message: format!(
                "{{{{#{}}}}} expects exactly one argument, got {}",
                kind.keyword(),
                params.len()
            ),
            line,
        });
    }
    Ok(params.remove(0))
}
