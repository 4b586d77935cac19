//! Lexer capability and line/buffer drivers.
//!
//! A [`Lexer`] classifies one token run per call against a [`LineStream`],
//! carrying everything it needs to resume in an explicit [`LexerState`]
//! value. Hosts thread the state from line to line, which lets them suspend
//! a scan indefinitely between calls and re-tokenize arbitrary line ranges
//! after edits.

use thiserror::Error;

use crate::dispatch::{DispatchLexer, Mode};
use crate::fsa::{FsaLexer, FsaState};
use crate::stream::LineStream;
use crate::token::{Category, Token};

/// Errors that can occur while building a lexer.
///
/// Scanning itself never fails; malformed input degrades to `error` or
/// uncategorized runs.
#[derive(Error, Debug)]
pub enum LexerError {
    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown lexer strategy {0:?} (expected \"fsa\" or \"dispatch\")")]
    UnknownStrategy(String),
}

/// Cross-call tokenizer context, threaded explicitly through every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    Fsa(FsaState),
    Dispatch(Mode),
}

/// Which tokenizer implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Explicit six-state automaton ([`FsaLexer`]).
    #[default]
    Fsa,
    /// Mode-dispatch regex tokenizer ([`DispatchLexer`]).
    Dispatch,
}

impl std::str::FromStr for Strategy {
    type Err = LexerError;

    fn from_str(s: &str) -> Result<Self, LexerError> {
        match s {
            "fsa" => Ok(Strategy::Fsa),
            "dispatch" => Ok(Strategy::Dispatch),
            other => Err(LexerError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A resumable tokenizer over per-line streams.
///
/// Implementations keep no scan state of their own; everything needed to
/// resume lives in the [`LexerState`] the host threads between calls. That
/// makes a lexer value freely shareable across buffers.
pub trait Lexer: Send + Sync {
    /// Fresh state for the start of a buffer.
    fn start_state(&self) -> LexerState;

    /// Consume one token run and return its category, or `None` for a run
    /// with no highlight.
    fn next_token(
        &self,
        stream: &mut LineStream<'_>,
        state: &mut LexerState,
    ) -> Option<Category>;
}

impl Lexer for FsaLexer {
    fn start_state(&self) -> LexerState {
        LexerState::Fsa(FsaState::default())
    }

    fn next_token(
        &self,
        stream: &mut LineStream<'_>,
        state: &mut LexerState,
    ) -> Option<Category> {
        if let LexerState::Fsa(fsa) = state {
            self.scan(stream, fsa)
        } else {
            // A state from the other strategy restarts the scan.
            *state = self.start_state();
            self.next_token(stream, state)
        }
    }
}

impl Lexer for DispatchLexer {
    fn start_state(&self) -> LexerState {
        LexerState::Dispatch(Mode::default())
    }

    fn next_token(
        &self,
        stream: &mut LineStream<'_>,
        state: &mut LexerState,
    ) -> Option<Category> {
        if let LexerState::Dispatch(mode) = state {
            self.scan(stream, mode)
        } else {
            *state = self.start_state();
            self.next_token(stream, state)
        }
    }
}

/// Build the lexer for a strategy.
pub fn lexer_for(strategy: Strategy) -> Result<Box<dyn Lexer>, LexerError> {
    Ok(match strategy {
        Strategy::Fsa => Box::new(FsaLexer::new()),
        Strategy::Dispatch => Box::new(DispatchLexer::new()?),
    })
}

/// Tokenize one line, threading `state` on to the next line.
///
/// Concatenating the returned token texts reconstructs `line`.
pub fn tokenize_line(
    lexer: &dyn Lexer,
    line: &str,
    state: &mut LexerState,
) -> Vec<Token> {
    let mut stream = LineStream::new(line);
    let mut tokens = Vec::new();
    while !stream.eol() {
        stream.begin_token();
        let category = lexer.next_token(&mut stream, state);
        if stream.current().is_empty() {
            // Every call must make progress; treat a stalled scan as an
            // unrecognized character.
            stream.next_char();
            tokens.push(Token::new(stream.current(), None));
            continue;
        }
        tokens.push(Token::new(stream.current(), category));
    }
    tokens
}

/// Tokenize a whole buffer, threading state across lines.
///
/// Token runs cover line contents; line separators are not runs.
pub fn tokenize(lexer: &dyn Lexer, source: &str) -> Vec<Token> {
    let mut state = lexer.start_state();
    let mut tokens = Vec::new();
    for line in source.lines() {
        tokens.extend(tokenize_line(lexer, line, &mut state));
    }
    tokens
}
