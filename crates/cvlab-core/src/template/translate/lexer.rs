//! Flat lexeme stream over legacy template source
//!
//! Reuses the engine's forward-only scanner in directive mode, so `{% %}`,
//! `{{ }}` and `{{{ }}}` tags are found in one O(n) pass.

use crate::template::engine::tokenize::{Delimiter, Token, TokenStream};

/// A tag with its trimmed body and position
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tag<'a> {
    /// Content between the delimiters, trimmed
    pub body: &'a str,
    /// Full tag text including delimiters
    pub source: &'a str,
    /// `{{{ }}}` output
    pub raw: bool,
    pub line: usize,
    pub offset: usize,
}

impl<'a> Tag<'a> {
    fn from_token(token: &Token, source: &'a str) -> Self {
        Self {
            body: token.content(source).trim(),
            source: token.source(source),
            raw: token.delimiter == Delimiter::Triple,
            line: token.line,
            offset: token.start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme<'a> {
    Text(&'a str),
    Directive(Tag<'a>),
    Mustache(Tag<'a>),
}

/// Split `source` into text, directive and mustache lexemes
///
/// Escaped mustaches stay in the text verbatim; the compiler resolves their
/// backslashes. Escaped directives are resolved here because the compiler
/// never sees `{%`.
pub(crate) fn lex(source: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    let mut cursor = 0;

    for token in TokenStream::with_directives(source) {
        match token.delimiter {
            Delimiter::Directive if token.is_escaped() => {
                let backslashes = token.start - token.backslash_count;
                push_text(&mut lexemes, &source[cursor..backslashes]);
                push_text(
                    &mut lexemes,
                    &source[backslashes..backslashes + token.backslash_count / 2],
                );
                push_text(&mut lexemes, token.source(source));
            }
            Delimiter::Directive => {
                push_text(&mut lexemes, &source[cursor..token.start]);
                lexemes.push(Lexeme::Directive(Tag::from_token(&token, source)));
            }
            _ if token.is_escaped() => {
                push_text(&mut lexemes, &source[cursor..token.end()]);
            }
            _ => {
                push_text(&mut lexemes, &source[cursor..token.start]);
                lexemes.push(Lexeme::Mustache(Tag::from_token(&token, source)));
            }
        }
        cursor = token.end();
    }

    push_text(&mut lexemes, &source[cursor..]);
    lexemes
}

fn push_text<'a>(lexemes: &mut Vec<Lexeme<'a>>, text: &'a str) {
    if !text.is_empty() {
        lexemes.push(Lexeme::Text(text));
    }
}
