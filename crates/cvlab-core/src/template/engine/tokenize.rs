//! Tokenization for template engine
//!
//! Provides O(n) tokenization using a state machine. The same scanner serves
//! the compiler (`{{ }}` and `{{{ }}}` only) and the directive translator,
//! which additionally asks for `{% %}` tags.

/// Delimiter pair that enclosed a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `{{ ... }}`: escaped output, sections, helpers
    Mustache,
    /// `{{{ ... }}}`: unescaped output
    Triple,
    /// `{% ... %}`: legacy block directive
    Directive,
}

/// A single tag with position and delimiter information
///
/// Classification of the content is left to the consumer (compiler or
/// translator), which keeps the scanner dialect-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Which delimiters enclosed the token
    pub delimiter: Delimiter,
    /// Absolute byte position of the opening delimiter
    pub start: usize,
    /// Total length in bytes including delimiters
    pub length: usize,
    /// Byte range of the content between the delimiters
    pub content_start: usize,
    pub content_end: usize,
    /// Number of backslashes before the opening delimiter
    /// Odd count = escaped (literal), even = real (processed)
    pub backslash_count: usize,
    /// Line number where token starts (for error messages)
    pub line: usize,
}

impl Token {
    /// Check if this token is escaped (odd backslash count)
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }

    /// Byte position just past the closing delimiter
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Raw content between the delimiters
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.content_end]
    }

    /// Full source text of the token, delimiters included
    pub fn source<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end()]
    }
}

/// Tokenization state machine (explicit for testability)
///
/// This state machine ensures O(n) tokenization by processing each byte exactly once
/// in a forward-only manner.
///
/// # State Transitions
///
/// ```text
/// Normal ──{───> SeenLBrace ──{ or %──> InToken ──close──> SeenClose ──}───> [Yield Token] → Normal
///   │               │                      │                   │
///   │ (not {)       │ (other)              │ (other)           │ (not })
///   └──────────────>└─────────────────────>└──────────────────>└──────────> InToken
///
/// Malformed {{ or {% without closer → Skip and continue (robust recovery)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Normal text scanning
    ///
    /// Forward-only: backslash_count accumulates as we scan forward.
    Normal {
        /// Number of consecutive backslashes seen before current position
        backslash_count: usize,
    },

    /// Seen first `{`, checking for second `{` or `%`
    SeenLBrace {
        /// Position of the first `{` character
        pos: usize,
        /// Backslash count before the `{` (for escape detection)
        backslash_count: usize,
    },

    /// Inside a tag, scanning until the closer
    InToken {
        /// Byte position of the opening delimiter
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        /// Backslash count before the opening delimiter
        backslash_count: usize,
        /// First byte of the closing delimiter (`}` or `%`)
        close: u8,
        /// Line where the token opened
        line: usize,
    },

    /// Seen the first byte of the closer, checking for `}`
    SeenClose {
        /// Byte position of the opening delimiter
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        /// Position of the first closer byte
        close_pos: usize,
        /// Backslash count before the opening delimiter
        backslash_count: usize,
        /// First byte of the closing delimiter (`}` or `%`)
        close: u8,
        /// Line where the token opened
        line: usize,
    },
}

/// Iterator over tokens in a template string
///
/// # Performance
///
/// - **O(n) guarantee**: Each byte processed a bounded number of times
/// - **No allocations in hot path**: Works with byte slices
/// - **Forward-only**: Position never moves backward
pub(crate) struct TokenStream<'a> {
    /// Zero-copy byte slice of template text
    bytes: &'a [u8],
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number (for error messages)
    line: usize,
    /// Step count for O(n) runaway protection
    step_count: usize,
    /// Whether `{% %}` tags are recognised
    directives: bool,
}

impl<'a> TokenStream<'a> {
    /// Create a TokenStream recognising `{{ }}` and `{{{ }}}`
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal { backslash_count: 0 },
            line: 1,
            step_count: 0,
            directives: false,
        }
    }

    /// Create a TokenStream that also recognises `{% %}` directives
    pub fn with_directives(text: &'a str) -> Self {
        Self {
            directives: true,
            ..Self::new(text)
        }
    }

    /// Check if we should continue iteration (guards for runaway and EOF)
    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.bytes.len()
    }

    /// Record step for O(n) performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    /// Process Normal state: scan for backslashes and opening braces
    fn process_normal_state(&mut self, byte: u8, backslash_count: usize) {
        if byte == b'\\' {
            self.state = ScanState::Normal {
                backslash_count: backslash_count + 1,
            };
        } else if byte == b'{' {
            self.state = ScanState::SeenLBrace {
                pos: self.pos,
                backslash_count,
            };
        } else {
            if byte == b'\n' {
                self.line += 1;
            }
            self.state = ScanState::Normal { backslash_count: 0 };
        }
        self.pos += 1;
    }

    /// Process SeenLBrace state: check for `{` or `%` to start a token
    ///
    /// Returns true if position was advanced, false if byte should be reprocessed
    fn process_seen_lbrace(&mut self, byte: u8, lbrace_pos: usize, backslash_count: usize) -> bool {
        let close = match byte {
            b'{' => b'}',
            b'%' if self.directives => b'%',
            _ => {
                // Just a single {, not a token
                self.state = ScanState::Normal { backslash_count: 0 };
                return false;
            }
        };
        self.state = ScanState::InToken {
            start: lbrace_pos,
            content_start: self.pos + 1,
            backslash_count,
            close,
            line: self.line,
        };
        self.pos += 1;
        true
    }

    /// Process InToken state: scan for the closer's first byte
    fn process_in_token(&mut self, byte: u8) {
        if let ScanState::InToken {
            start,
            content_start,
            backslash_count,
            close,
            line,
        } = self.state
        {
            if byte == close {
                self.state = ScanState::SeenClose {
                    start,
                    content_start,
                    close_pos: self.pos,
                    backslash_count,
                    close,
                    line,
                };
            } else if byte == b'\n' {
                self.line += 1;
            }
        }
        self.pos += 1;
    }

    /// Process SeenClose state: check for `}` to complete the token
    ///
    /// Returns (Option<Token>, advanced)
    fn process_seen_close(&mut self, byte: u8) -> (Option<Token>, bool) {
        let ScanState::SeenClose {
            start,
            content_start,
            close_pos,
            backslash_count,
            close,
            line,
        } = self.state
        else {
            return (None, false);
        };

        if byte != b'}' {
            // Lone closer byte inside content, continue scanning
            self.state = ScanState::InToken {
                start,
                content_start,
                backslash_count,
                close,
                line,
            };
            return (None, false);
        }

        let mut token = Token {
            delimiter: if close == b'%' {
                Delimiter::Directive
            } else {
                Delimiter::Mustache
            },
            start,
            length: self.pos + 1 - start,
            content_start,
            content_end: close_pos,
            backslash_count,
            line,
        };
        self.pos += 1;

        // {{{ ... }}}: content begins with `{` and one more `}` follows
        if token.delimiter == Delimiter::Mustache
            && self.bytes.get(content_start) == Some(&b'{')
            && self.bytes.get(self.pos) == Some(&b'}')
        {
            token.delimiter = Delimiter::Triple;
            token.content_start += 1;
            token.length += 1;
            self.pos += 1;
        }

        self.state = ScanState::Normal { backslash_count: 0 };
        (Some(token), true)
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.bytes.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state {
                ScanState::Normal { backslash_count } => {
                    self.process_normal_state(byte, backslash_count)
                }
                ScanState::SeenLBrace {
                    pos,
                    backslash_count,
                } => {
                    if !self.process_seen_lbrace(byte, pos, backslash_count) {
                        continue;
                    }
                }
                ScanState::InToken { .. } => self.process_in_token(byte),
                ScanState::SeenClose { .. } => {
                    let (token, advanced) = self.process_seen_close(byte);
                    if let Some(token) = token {
                        return Some(token);
                    }
                    if !advanced {
                        continue;
                    }
                }
            }
        }
    }
}
