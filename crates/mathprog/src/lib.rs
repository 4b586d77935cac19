//! MathProg - syntax highlighting for the GMPL/MathProg modeling language.
//!
//! GMPL/MathProg is the declarative modeling language of the GLPK toolkit.
//! This crate bundles the streaming tokenizers with the notebook model
//! assembly contract used by editing hosts.
//!
//! # Example
//!
//! ```
//! use mathprog::{highlight, Category, Strategy};
//!
//! let tokens = highlight("maximize obj: sum{i in S} x[i];", Strategy::Fsa).unwrap();
//! assert_eq!(tokens[0].text, "maximize");
//! assert_eq!(tokens[0].category, Some(Category::Keyword));
//! ```

pub mod notebook;

pub use mathprog_lexer as lexer;

// Re-export commonly used types
pub use mathprog_lexer::{
    lexer_for, tokenize, tokenize_line, Category, DispatchLexer, FsaLexer,
    Lexer, LexerError, LexerState, LineCache, LineStream, Strategy, Token,
};
pub use notebook::{assemble_model, Cell, CellKind};

/// Tokenize MathProg source with the given strategy.
///
/// This is a convenience function that builds the lexer and tokenizes the
/// whole buffer in a single call.
///
/// # Example
///
/// ```
/// use mathprog::{highlight, Category, Strategy};
///
/// let tokens = highlight("param n := 10;", Strategy::Dispatch).unwrap();
/// assert_eq!(tokens[0].category, Some(Category::Keyword));
/// ```
pub fn highlight(source: &str, strategy: Strategy) -> Result<Vec<Token>, LexerError> {
    let lexer = lexer_for(strategy)?;
    Ok(tokenize(lexer.as_ref(), source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of(source: &str, strategy: Strategy) -> Option<Category> {
        highlight(source, strategy).unwrap()[0].category
    }

    #[test]
    fn test_highlight_both_strategies() {
        for strategy in [Strategy::Fsa, Strategy::Dispatch] {
            assert_eq!(
                category_of("param n;", strategy),
                Some(Category::Keyword),
                "strategy: {:?}",
                strategy
            );
            assert_eq!(
                category_of("# comment", strategy),
                Some(Category::Comment)
            );
            assert_eq!(category_of("3.14e-2", strategy), Some(Category::Number));
        }
    }

    #[test]
    fn test_highlight_multi_line_comment() {
        let tokens = highlight("/* a\nb */", Strategy::Fsa).unwrap();
        assert!(tokens
            .iter()
            .all(|t| t.category == Some(Category::Comment)));
    }

    #[test]
    fn test_assembled_model_highlights_cleanly() {
        let cells = [
            Cell::code("param n := 3;"),
            Cell::code("%solve"),
            Cell::code("end;"),
        ];
        let model = assemble_model(&cells);
        assert_eq!(model, "param n := 3;\n\nend;\n");

        let tokens = highlight(&model, Strategy::Fsa).unwrap();
        let keywords: Vec<&str> = tokens
            .iter()
            .filter(|t| t.category == Some(Category::Keyword))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(keywords, vec!["param", "end"]);
    }
}
