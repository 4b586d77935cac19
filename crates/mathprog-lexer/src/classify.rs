//! Shared classifier table for identifier spellings.
//!
//! Both tokenizers consult one immutable, lowercase-keyed table instead of
//! carrying their own keyword lists. Spellings that are not in the table are
//! plain identifiers and get no category here.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::token::Category;

/// Statement and declaration keywords.
const KEYWORDS: &[&str] = &[
    "param", "var", "maximize", "minimize", "s.t.", "data", "end", "set",
    "table", "subject", "to", "subj", "check", "display", "for", "solve",
];

/// Operator words and attribute atoms.
const ATOMS: &[&str] = &[
    "dimen", "default", "integer", "binary", "logical", "symbolic", "out",
    "in", "and", "by", "cross", "diff", "div", "else", "if", "infinity",
    "inter", "less", "mod", "not", "or", "symdiff", "then", "union",
    "within", "tr",
];

/// Iterated operators plus the math and string function names.
const FUNCTIONS: &[&str] = &[
    "sum", "prod", "min", "max", "exists", "forall", "setof", "abs", "atan",
    "card", "ceil", "cos", "exp", "floor", "gmtime", "length", "log",
    "log10", "round", "sin", "sqrt", "str2time", "substr", "time2str",
    "trunc", "irand224", "uniform", "uniform01", "normal", "normal01",
];

/// Output statement builtins.
const BUILTINS: &[&str] = &["printf"];

static TABLE: LazyLock<HashMap<&'static str, Category>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for &word in KEYWORDS {
        table.insert(word, Category::Keyword);
    }
    for &word in ATOMS {
        table.insert(word, Category::Atom);
    }
    for &word in FUNCTIONS {
        table.insert(word, Category::Function);
    }
    for &word in BUILTINS {
        table.insert(word, Category::Builtin);
    }
    table
});

/// Look up a spelling, case-insensitively.
///
/// Returns `None` for anything the table does not know, which renders as an
/// unhighlighted identifier.
pub fn classify(word: &str) -> Option<Category> {
    TABLE.get(word.to_ascii_lowercase().as_str()).copied()
}

/// Every spelling in the table, for building word-match patterns.
pub(crate) fn spellings() -> impl Iterator<Item = &'static str> {
    TABLE.keys().copied()
}
