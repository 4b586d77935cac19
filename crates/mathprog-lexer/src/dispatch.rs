//! Mode-dispatch regex tokenizer.
//!
//! Instead of re-deriving nested-state logic per character, the active
//! sub-lexer is swapped based on context: base code, `{...}` indexing
//! expressions, `[...]` subscripts, and block comments. The base sub-lexer
//! matches the stream prefix against a table of anchored regular
//! expressions in priority order.
//!
//! Divergences from [`FsaLexer`](crate::fsa::FsaLexer), by design: strings
//! never span lines and a doubled quote is two adjacent string tokens, not
//! an escape.

use regex::Regex;

use crate::classify::{self, classify};
use crate::lexer::LexerError;
use crate::stream::LineStream;
use crate::token::Category;

/// Active sub-lexer carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Base,
    IndexExpr,
    Subscript,
    BlockComment,
}

/// Compiled pattern table for the base sub-lexer.
#[derive(Debug)]
struct Patterns {
    number_guard: Regex,
    number_hex: Regex,
    number_float: Regex,
    number_int: Regex,
    string: Regex,
    word: Regex,
    ident: Regex,
    operator: Regex,
}

impl Patterns {
    fn new() -> Result<Self, LexerError> {
        Ok(Self {
            number_guard: Regex::new(r"^[0-9.+-]")?,
            number_hex: Regex::new(r"^[+-]?0x[0-9a-fA-F]+")?,
            number_float: Regex::new(r"^[+-]?\d*\.\d+([EeDd][+-]?\d+)?")?,
            number_int: Regex::new(r"^[+-]?\d+([EeDd][+-]?\d+)?")?,
            string: Regex::new(r#"^('[^']*'|"[^"]*")"#)?,
            word: word_pattern()?,
            ident: Regex::new(
                r"^[_A-Za-z\x{a1}-\x{ffff}][_A-Za-z0-9\x{a1}-\x{ffff}]*",
            )?,
            operator: Regex::new(
                r"^(\*\*|<=|==|>=|<>|!=|:=|<<|<-|\+|-|\*|/|\^|&|<|=|>|:|!)",
            )?,
        })
    }
}

/// Whole-word alternation over every classifier-table spelling.
///
/// Longer spellings are tried first so `infinity` wins over `in`. Spellings
/// ending in a word character get a `\b` guard; dotted spellings such as
/// `s.t.` end on punctuation and need none.
fn word_pattern() -> Result<Regex, LexerError> {
    let mut spellings: Vec<&str> = classify::spellings().collect();
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let branches: Vec<String> = spellings
        .iter()
        .map(|s| {
            let escaped = regex::escape(s);
            if s.ends_with(|c: char| c.is_ascii_alphanumeric()) {
                format!(r"{escaped}\b")
            } else {
                escaped
            }
        })
        .collect();
    Ok(Regex::new(&format!("(?i)^(?:{})", branches.join("|")))?)
}

/// The regex-dispatch tokenizer.
#[derive(Debug)]
pub struct DispatchLexer {
    patterns: Patterns,
}

impl DispatchLexer {
    /// Compile the pattern tables.
    pub fn new() -> Result<Self, LexerError> {
        Ok(Self {
            patterns: Patterns::new()?,
        })
    }

    /// Consume one token run under the active sub-lexer.
    pub(crate) fn scan(
        &self,
        stream: &mut LineStream<'_>,
        mode: &mut Mode,
    ) -> Option<Category> {
        match *mode {
            Mode::Base => self.scan_base(stream, mode),
            Mode::IndexExpr => self.scan_bracketed(stream, mode, '}'),
            Mode::Subscript => self.scan_bracketed(stream, mode, ']'),
            Mode::BlockComment => Some(scan_comment(stream, mode)),
        }
    }

    fn scan_base(
        &self,
        stream: &mut LineStream<'_>,
        mode: &mut Mode,
    ) -> Option<Category> {
        if stream.eat_space() {
            return None;
        }

        if stream.match_str("#") {
            stream.skip_to_end();
            return Some(Category::Comment);
        }

        if stream.match_str("/*") {
            *mode = Mode::BlockComment;
            return Some(scan_comment(stream, mode));
        }

        if stream.peek_regex(&self.patterns.number_guard) {
            if stream.match_regex(&self.patterns.number_hex).is_some()
                || stream.match_regex(&self.patterns.number_float).is_some()
                || stream.match_regex(&self.patterns.number_int).is_some()
            {
                return Some(Category::Number);
            }
        }

        if stream.match_regex(&self.patterns.string).is_some() {
            return Some(Category::Str);
        }

        if let Some(word) = stream.match_regex(&self.patterns.word) {
            return classify(word);
        }

        if stream.match_str("{") {
            *mode = Mode::IndexExpr;
            return None;
        }

        if stream.match_str("[") {
            *mode = Mode::Subscript;
            return None;
        }

        if stream.match_regex(&self.patterns.ident).is_some() {
            return Some(Category::Identifier);
        }

        if stream.match_regex(&self.patterns.operator).is_some() {
            return Some(Category::Operator);
        }

        stream.next_char();
        None
    }

    /// Sub-lexer for `{...}` and `[...]`: the whole interior is one
    /// function-category run.
    fn scan_bracketed(
        &self,
        stream: &mut LineStream<'_>,
        mode: &mut Mode,
        close: char,
    ) -> Option<Category> {
        match stream.remaining().find(close) {
            // Nothing precedes the closer; hand it to the base sub-lexer.
            Some(0) => {
                *mode = Mode::Base;
                self.scan_base(stream, mode)
            }
            Some(idx) => {
                stream.advance(idx);
                *mode = Mode::Base;
                Some(Category::Function)
            }
            None => {
                stream.skip_to_end();
                Some(Category::Function)
            }
        }
    }
}

/// Sub-lexer for block comments: close at the first `*/`, otherwise the
/// whole remaining line is comment text and the mode persists.
fn scan_comment(stream: &mut LineStream<'_>, mode: &mut Mode) -> Category {
    if let Some(idx) = stream.remaining().find("*/") {
        stream.advance(idx + 2);
        *mode = Mode::Base;
    } else {
        stream.skip_to_end();
    }
    Category::Comment
}
