//! Streaming tokenizers for GMPL/MathProg syntax highlighting.
//!
//! This crate classifies MathProg source text into highlight categories
//! under an incremental, per-line scanning model: the host tokenizes one
//! line at a time and threads an explicit [`LexerState`] on to the next
//! line, so block comments can span lines and a scan can be resumed after
//! any edit. Two interchangeable tokenizers implement the [`Lexer`]
//! capability: an explicit finite-state automaton and a mode-dispatch regex
//! tokenizer.
//!
//! # Example
//!
//! ```
//! use mathprog_lexer::{tokenize, Category, FsaLexer};
//!
//! let tokens = tokenize(&FsaLexer::new(), "param n := 10;");
//! assert_eq!(tokens[0].text, "param");
//! assert_eq!(tokens[0].category, Some(Category::Keyword));
//! ```

pub mod cache;
pub mod classify;
pub mod dispatch;
pub mod fsa;
pub mod lexer;
pub mod stream;
pub mod token;

pub use cache::{LineCache, TokenLine};
pub use classify::classify;
pub use dispatch::DispatchLexer;
pub use fsa::FsaLexer;
pub use lexer::{
    lexer_for, tokenize, tokenize_line, Lexer, LexerError, LexerState, Strategy,
};
pub use stream::LineStream;
pub use token::{Category, Token};
