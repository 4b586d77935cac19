//! Cached per-line tokenization for incremental re-highlighting.

use crate::lexer::{tokenize_line, Lexer, LexerState};
use crate::token::Token;

/// Tokens for one line plus the state carried into the next line.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLine {
    pub tokens: Vec<Token>,
    pub state_after: LexerState,
}

/// Per-line token cache for a multi-line buffer.
///
/// After an edit, re-tokenization restarts at the edited line and stops as
/// soon as a line's carried-out state and tokens match the cached ones:
/// later lines cannot be affected. This is what the explicit [`LexerState`]
/// buys over call-stack scan position.
#[derive(Debug, Clone, Default)]
pub struct LineCache {
    lines: Vec<TokenLine>,
}

impl LineCache {
    /// Tokenize every line of `lines` from a fresh state.
    pub fn new(lexer: &dyn Lexer, lines: &[&str]) -> Self {
        let mut state = lexer.start_state();
        let cached = lines
            .iter()
            .map(|line| {
                let tokens = tokenize_line(lexer, line, &mut state);
                TokenLine {
                    tokens,
                    state_after: state,
                }
            })
            .collect();
        Self { lines: cached }
    }

    /// Tokenize a buffer, splitting on line endings.
    pub fn from_source(lexer: &dyn Lexer, source: &str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        Self::new(lexer, &lines)
    }

    /// Cached lines.
    pub fn lines(&self) -> &[TokenLine] {
        &self.lines
    }

    /// Number of cached lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Re-tokenize after an edit to a single line.
    ///
    /// `lines` is the full post-edit line list; it must have the same length
    /// as the cache (a line-count change falls back to full
    /// re-tokenization). Returns the number of lines re-tokenized.
    pub fn update_line(
        &mut self,
        lexer: &dyn Lexer,
        lines: &[&str],
        line_index: usize,
    ) -> usize {
        if line_index >= lines.len() || self.lines.len() != lines.len() {
            *self = Self::new(lexer, lines);
            return lines.len();
        }

        let mut state = if line_index == 0 {
            lexer.start_state()
        } else {
            self.lines[line_index - 1].state_after
        };

        let mut updated = 0;
        for idx in line_index..lines.len() {
            let tokens = tokenize_line(lexer, lines[idx], &mut state);
            updated += 1;

            let unchanged = self.lines[idx].state_after == state
                && self.lines[idx].tokens == tokens;
            self.lines[idx] = TokenLine {
                tokens,
                state_after: state,
            };
            if unchanged {
                break;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsa::FsaLexer;
    use crate::lexer::Lexer;
    use crate::token::Category;

    const MODEL: &[&str] = &[
        "param n := 3;",
        "var x{1..n} >= 0;",
        "maximize obj: sum{i in 1..n} x[i];",
        "end;",
    ];

    #[test]
    fn test_cache_matches_fresh_tokenization() {
        let lexer = FsaLexer::new();
        let cache = LineCache::new(&lexer, MODEL);
        assert_eq!(cache.len(), MODEL.len());

        let mut state = lexer.start_state();
        for (cached, line) in cache.lines().iter().zip(MODEL) {
            let tokens = tokenize_line(&lexer, line, &mut state);
            assert_eq!(cached.tokens, tokens);
        }
    }

    #[test]
    fn test_update_stops_when_state_reconverges() {
        let lexer = FsaLexer::new();
        let mut lines: Vec<&str> = MODEL.to_vec();
        let mut cache = LineCache::new(&lexer, &lines);

        // An edit that does not change the carried state touches only the
        // edited line.
        lines[0] = "param n := 4;";
        let updated = cache.update_line(&lexer, &lines, 0);
        assert_eq!(updated, 2);
        assert_eq!(
            cache.lines()[0].tokens[0].category,
            Some(Category::Keyword)
        );
    }

    #[test]
    fn test_update_propagates_comment_state() {
        let lexer = FsaLexer::new();
        let mut lines: Vec<&str> = MODEL.to_vec();
        let mut cache = LineCache::new(&lexer, &lines);

        // Opening a block comment re-highlights everything below.
        lines[1] = "/* var x{1..n} >= 0;";
        let updated = cache.update_line(&lexer, &lines, 1);
        assert_eq!(updated, lines.len() - 1);
        for cached in &cache.lines()[1..] {
            assert!(cached
                .tokens
                .iter()
                .all(|t| t.category == Some(Category::Comment) || t.category.is_none()));
        }
    }

    #[test]
    fn test_line_count_change_falls_back_to_full() {
        let lexer = FsaLexer::new();
        let mut cache = LineCache::new(&lexer, MODEL);
        let shorter = &MODEL[..2];
        let updated = cache.update_line(&lexer, shorter, 0);
        assert_eq!(updated, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_from_source() {
        let lexer = FsaLexer::new();
        let cache = LineCache::from_source(&lexer, "param n;\nend;\n");
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
    }
}
