//! Bracket slice expressions (`path[:n]`, `path[n:]`, `path[-n:]`)

use serde_json::Value;

use crate::template::engine::{Expr, PathExpr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceMode {
    /// `[:n]` → first `n` characters
    Prefix,
    /// `[n:]` → everything from position `n`
    Suffix,
    /// `[-n:]` → last `n` characters
    SuffixFromEnd,
}

impl SliceMode {
    /// Helper implementing this slice
    pub fn helper(self) -> &'static str {
        match self {
            SliceMode::Prefix => "first",
            SliceMode::Suffix => "substr",
            SliceMode::SuffixFromEnd => "last",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceExpr {
    pub subject: PathExpr,
    pub mode: SliceMode,
    pub length: u64,
}

impl SliceExpr {
    /// Parse a whole interpolation body as a slice, `None` when it is not one
    pub fn parse(body: &str) -> Option<Self> {
        let inner = body.strip_suffix(']')?;
        let (subject, bounds) = inner.split_once('[')?;
        if subject.is_empty() || !subject.chars().all(is_path_char) {
            return None;
        }

        let (mode, digits) = if let Some(n) = bounds.strip_prefix(':') {
            (SliceMode::Prefix, n)
        } else if let Some(n) = bounds.strip_prefix('-').and_then(|b| b.strip_suffix(':')) {
            (SliceMode::SuffixFromEnd, n)
        } else {
            (SliceMode::Suffix, bounds.strip_suffix(':')?)
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // Only ASCII digits remain, so the parse can fail only on overflow
        Some(Self {
            subject: PathExpr::parse(subject),
            mode,
            length: digits.parse().unwrap_or(u64::MAX),
        })
    }

    /// Equivalent helper call
    pub fn into_call(self) -> Expr {
        Expr::Call {
            name: self.mode.helper().to_string(),
            args: vec![
                Expr::Path(self.subject),
                Expr::Literal(Value::from(self.length)),
            ],
        }
    }
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '/')
}
