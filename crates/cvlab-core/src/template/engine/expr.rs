//! Expression parsing for mustache content
//!
//! Grammar (whitespace separated):
//!
//! ```text
//! expression := param | helper param+
//! param      := path | literal | "(" helper param* ")"
//! path       := ("../")* ("this" | "this." segments | segments) | "@root" ("." segments)? | "@" name
//! literal    := "string" | 'string' | number | true | false | null | undefined
//! ```

use serde_json::Value;
use std::fmt;

use crate::template::value::{display, number_value};

/// Where a path starts its lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRoot {
    /// Bare name looked up from the current scope (`name`, `../name`)
    Scope { parents: usize },
    /// Explicit current item (`this`, `this.name`, `../this.name`)
    This { parents: usize },
    /// The render context itself (`@root.name`)
    Root,
    /// Loop metadata (`@index`, `@first`, `@last`)
    Data,
}

/// Dotted path with its lookup root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub root: PathRoot,
    pub segments: Vec<String>,
}

impl PathExpr {
    /// Parse a path atom
    pub fn parse(atom: &str) -> Self {
        if let Some(rest) = atom.strip_prefix("@root") {
            if rest.is_empty() || rest.starts_with('.') {
                return Self {
                    root: PathRoot::Root,
                    segments: split_segments(rest.trim_start_matches('.')),
                };
            }
        }
        if let Some(rest) = atom.strip_prefix('@') {
            return Self {
                root: PathRoot::Data,
                segments: split_segments(rest),
            };
        }

        let mut rest = atom;
        let mut parents = 0;
        while let Some(stripped) = rest.strip_prefix("../") {
            parents += 1;
            rest = stripped;
        }

        if rest == "this" || rest == "." {
            return Self {
                root: PathRoot::This { parents },
                segments: Vec::new(),
            };
        }
        if let Some(tail) = rest.strip_prefix("this.").or_else(|| rest.strip_prefix("./")) {
            return Self {
                root: PathRoot::This { parents },
                segments: split_segments(tail),
            };
        }

        Self {
            root: PathRoot::Scope { parents },
            segments: split_segments(rest),
        }
    }

    /// Single-segment bare name (`name`), the only shape a helper name can take
    pub fn as_identifier(&self) -> Option<&str> {
        match (&self.root, self.segments.as_slice()) {
            (PathRoot::Scope { parents: 0 }, [name]) => Some(name.as_str()),
            _ => None,
        }
    }

    /// First segment of a bare path (`exp` in `exp.start_date`)
    pub fn head(&self) -> Option<&str> {
        match self.root {
            PathRoot::Scope { parents: 0 } => self.segments.first().map(String::as_str),
            _ => None,
        }
    }
}

fn split_segments(path: &str) -> Vec<String> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').map(str::to_string).collect()
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail = self.segments.join(".");
        match self.root {
            PathRoot::Scope { parents } => write!(f, "{}{}", "../".repeat(parents), tail),
            PathRoot::This { parents } => {
                write!(f, "{}this", "../".repeat(parents))?;
                if !tail.is_empty() {
                    write!(f, ".{}", tail)?;
                }
                Ok(())
            }
            PathRoot::Root => {
                write!(f, "@root")?;
                if !tail.is_empty() {
                    write!(f, ".{}", tail)?;
                }
                Ok(())
            }
            PathRoot::Data => write!(f, "@{}", tail),
        }
    }
}

/// Parsed expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(PathExpr),
    Literal(Value),
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Render as the body of a mustache (top-level calls without parentheses)
    pub fn to_mustache_body(&self) -> String {
        match self {
            Expr::Call { name, args } => {
                let mut out = name.clone();
                for arg in args {
                    out.push(' ');
                    out.push_str(&arg.to_string());
                }
                out
            }
            other => other.to_string(),
        }
    }

    /// Apply `f` to every path in the expression tree
    pub fn for_each_path_mut(&mut self, f: &mut dyn FnMut(&mut PathExpr)) {
        match self {
            Expr::Path(path) => f(path),
            Expr::Literal(_) => {}
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.for_each_path_mut(f);
                }
            }
        }
    }

    /// Visit every path in the expression tree
    pub fn for_each_path(&self, f: &mut dyn FnMut(&PathExpr)) {
        match self {
            Expr::Path(path) => f(path),
            Expr::Literal(_) => {}
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.for_each_path(f);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Path(path) => write!(f, "{}", path),
            Expr::Literal(Value::String(s)) => {
                let quote = if s.contains('"') { '\'' } else { '"' };
                write!(f, "{quote}{s}{quote}")
            }
            Expr::Literal(Value::Null) => write!(f, "null"),
            Expr::Literal(value) => write!(f, "{}", display(value)),
            Expr::Call { .. } => write!(f, "({})", self.to_mustache_body()),
        }
    }
}

/// Parse the content of a `{{ ... }}` tag into a single expression
pub fn parse_expression(content: &str) -> Result<Expr, String> {
    let params = parse_params(content)?;
    into_expression(params)
}

/// Parse a whitespace-separated parameter list (used for section arguments)
pub fn parse_params(content: &str) -> Result<Vec<Expr>, String> {
    let mut cursor = Cursor {
        chars: content.char_indices().peekable(),
        source: content,
    };
    let params = cursor.parse_list(false)?;
    Ok(params)
}

fn into_expression(mut params: Vec<Expr>) -> Result<Expr, String> {
    match params.len() {
        0 => Err("empty expression".to_string()),
        1 => Ok(params.remove(0)),
        _ => {
            let head = params.remove(0);
            let name = match &head {
                Expr::Path(path) => path.as_identifier().map(str::to_string),
                _ => None,
            }
            .ok_or_else(|| format!("expected helper name, found '{}'", head))?;
            Ok(Expr::Call { name, args: params })
        }
    }
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
}

impl Cursor<'_> {
    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    /// Parse params until end of input, or until `)` when `nested`
    fn parse_list(&mut self, nested: bool) -> Result<Vec<Expr>, String> {
        let mut params = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek().copied() {
                None if nested => return Err("unclosed '(' in expression".to_string()),
                None => return Ok(params),
                Some((_, ')')) if nested => {
                    self.chars.next();
                    return Ok(params);
                }
                Some((_, ')')) => return Err("unexpected ')' in expression".to_string()),
                Some((_, '(')) => {
                    self.chars.next();
                    let inner = self.parse_list(true)?;
                    params.push(into_call(inner)?);
                }
                Some((_, quote @ ('"' | '\''))) => {
                    self.chars.next();
                    params.push(Expr::Literal(Value::String(self.read_string(quote)?)));
                }
                Some((start, _)) => {
                    let atom = self.read_atom(start);
                    params.push(parse_atom(atom));
                }
            }
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String, String> {
        let mut out = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == quote {
                return Ok(out);
            }
            out.push(c);
        }
        Err("unterminated string literal".to_string())
    }

    fn read_atom(&mut self, start: usize) -> &str {
        let mut end = start;
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }
        &self.source[start..end]
    }
}

/// A parenthesised group is always a helper call, even without arguments
fn into_call(mut params: Vec<Expr>) -> Result<Expr, String> {
    if params.is_empty() {
        return Err("empty sub-expression '()'".to_string());
    }
    let head = params.remove(0);
    match &head {
        Expr::Path(path) => match path.as_identifier() {
            Some(name) => Ok(Expr::Call {
                name: name.to_string(),
                args: params,
            }),
            None => Err(format!("expected helper name, found '{}'", head)),
        },
        _ => Err(format!("expected helper name, found '{}'", head)),
    }
}

fn parse_atom(atom: &str) -> Expr {
    match atom {
        "true" => return Expr::Literal(Value::Bool(true)),
        "false" => return Expr::Literal(Value::Bool(false)),
        "null" | "undefined" => return Expr::Literal(Value::Null),
        _ => {}
    }
    if looks_numeric(atom) {
        if let Ok(n) = atom.parse::<f64>() {
            return Expr::Literal(number_value(n));
        }
    }
    Expr::Path(PathExpr::parse(atom))
}

fn looks_numeric(atom: &str) -> bool {
    let digits = atom.strip_prefix('-').unwrap_or(atom);
    digits.chars().next().is_some_and(|c| c.is_ascii_digit())
}
