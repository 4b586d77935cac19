//! Token and category types for the MathProg tokenizers.

use std::fmt;

/// Highlight categories emitted by the tokenizers.
///
/// Categories are opaque labels for the rendering layer; the tokenizers make
/// no assumption about how they are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    Comment,
    Str,
    Number,
    Keyword,
    Atom,
    Builtin,
    Function,
    Operator,
    Bracket,
    Identifier,
    Error,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Comment => "comment",
            Category::Str => "string",
            Category::Number => "number",
            Category::Keyword => "keyword",
            Category::Atom => "atom",
            Category::Builtin => "builtin",
            Category::Function => "function",
            Category::Operator => "operator",
            Category::Bracket => "bracket",
            Category::Identifier => "identifier",
            Category::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// One token run: a maximal slice of a line plus its highlight category.
///
/// `category` is `None` for consumed text with no highlight (whitespace,
/// plain identifiers under the FSA, unrecognized characters). Concatenating
/// the `text` of every run tokenized from a line reconstructs that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub category: Option<Category>,
}

impl Token {
    /// Create a new Token.
    pub fn new(text: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}
