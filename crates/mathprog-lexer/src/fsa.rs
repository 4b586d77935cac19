//! Explicit finite-state tokenizer.
//!
//! Drives the scan character by character through a six-state automaton.
//! Block comments and strings are represented as states so a scan can be
//! suspended at any line boundary and resumed from the carried
//! [`FsaState`]. Strings use the doubled-quote escape convention: a quote
//! character repeated inside a string stands for itself.

use crate::classify::classify;
use crate::stream::LineStream;
use crate::token::Category;

/// Automaton state carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FsaMode {
    #[default]
    Base,
    SlashSeen,
    CommentBody,
    CommentStarSeen,
    InString,
    StringQuoteSeen,
}

/// Cross-call context for [`FsaLexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsaState {
    pub mode: FsaMode,
    /// The quote character that opened the string being scanned.
    pub quote: Option<char>,
}

impl FsaState {
    fn leave_string(&mut self) {
        self.mode = FsaMode::Base;
        self.quote = None;
    }
}

/// The explicit-automaton tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsaLexer;

impl FsaLexer {
    pub fn new() -> Self {
        Self
    }

    /// Consume one token run, returning its category.
    ///
    /// A leading whitespace run is consumed on its own and gets no
    /// category. Unrecognized characters are consumed one at a time with no
    /// category.
    pub(crate) fn scan(
        &self,
        stream: &mut LineStream<'_>,
        state: &mut FsaState,
    ) -> Option<Category> {
        if stream.eat_space() {
            return None;
        }

        while let Some(c) = stream.next_char() {
            match state.mode {
                FsaMode::Base => match c {
                    '/' => state.mode = FsaMode::SlashSeen,
                    '#' => {
                        stream.skip_to_end();
                        return Some(Category::Comment);
                    }
                    '\'' | '"' => {
                        // A quote as the last character of the line can
                        // never be terminated.
                        if stream.eol() {
                            return Some(Category::Error);
                        }
                        state.quote = Some(c);
                        state.mode = FsaMode::InString;
                    }
                    '[' | ']' | '(' | ')' | '{' | '}' => return Some(Category::Bracket),
                    _ if c.is_ascii_digit() => {
                        scan_number(stream);
                        return Some(Category::Number);
                    }
                    _ if is_word_start(c) => return scan_word(stream),
                    _ => return None,
                },
                FsaMode::SlashSeen => {
                    if c == '*' {
                        state.mode = FsaMode::CommentBody;
                    } else {
                        // Division operator. The character just consumed is
                        // kept in the run rather than reconsumed.
                        state.mode = FsaMode::Base;
                        return Some(Category::Operator);
                    }
                }
                FsaMode::CommentBody => {
                    if c == '*' {
                        state.mode = FsaMode::CommentStarSeen;
                    }
                }
                FsaMode::CommentStarSeen => {
                    if c == '/' {
                        state.mode = FsaMode::Base;
                        return Some(Category::Comment);
                    }
                    state.mode = FsaMode::CommentBody;
                }
                FsaMode::InString => {
                    if Some(c) == state.quote {
                        if stream.eol() {
                            state.leave_string();
                            return Some(Category::Str);
                        }
                        // Tentative close; a doubled quote would reopen.
                        state.mode = FsaMode::StringQuoteSeen;
                    } else if stream.eol() {
                        state.leave_string();
                        return Some(Category::Error);
                    }
                }
                FsaMode::StringQuoteSeen => {
                    if Some(c) == state.quote {
                        if stream.eol() {
                            state.leave_string();
                            return Some(Category::Error);
                        }
                        state.mode = FsaMode::InString;
                    } else {
                        // The string ended at the previous quote.
                        stream.backup();
                        state.leave_string();
                        return Some(Category::Str);
                    }
                }
            }
        }

        match state.mode {
            FsaMode::CommentBody | FsaMode::CommentStarSeen => Some(Category::Comment),
            _ => None,
        }
    }
}

/// Greedily consume the tail of a numeric literal. The first digit has
/// already been consumed.
///
/// Phases: digits, then an optional `.` fraction, then an optional `e`/`E`
/// exponent with an optional sign.
fn scan_number(stream: &mut LineStream<'_>) {
    let mut phase = 0u8;
    stream.eat_while(|v| match phase {
        0 => {
            if v.is_ascii_digit() {
                return true;
            }
            match v {
                '.' => {
                    phase = 1;
                    true
                }
                'e' | 'E' => {
                    phase = 2;
                    true
                }
                _ => false,
            }
        }
        1 => {
            if v.is_ascii_digit() {
                return true;
            }
            if v == 'e' || v == 'E' {
                phase = 2;
                true
            } else {
                false
            }
        }
        2 => {
            if v.is_ascii_digit() || v == '+' || v == '-' {
                phase = 3;
                true
            } else {
                false
            }
        }
        _ => v.is_ascii_digit(),
    });
}

/// Consume the tail of a word and classify it. The first character has
/// already been consumed.
///
/// Allows the dotted `s.t.` spelling: a `.` is accepted only while the run
/// so far is exactly `s`, followed by `t` and a closing `.`.
fn scan_word(stream: &mut LineStream<'_>) -> Option<Category> {
    let mut phase = 0u8;
    loop {
        let Some(v) = stream.peek() else { break };
        let eat = match phase {
            0 => {
                if is_word_char(v) {
                    true
                } else if v == '.' && stream.current() == "s" {
                    phase = 1;
                    true
                } else {
                    false
                }
            }
            1 => {
                phase = 2;
                v == 't'
            }
            _ => v == '.',
        };
        if !eat {
            break;
        }
        stream.next_char();
    }
    classify(stream.current())
}

/// Check if a character can start a word.
fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Check if a character can continue a word.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, tokenize_line, Lexer, LexerState};
    use crate::token::Token;
    use pretty_assertions::assert_eq;

    fn categories(line: &str) -> Vec<(String, Option<Category>)> {
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        tokenize_line(&lexer, line, &mut state)
            .into_iter()
            .map(|t| (t.text, t.category))
            .collect()
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            categories("# hello"),
            vec![("# hello".to_string(), Some(Category::Comment))]
        );
    }

    #[test]
    fn test_keyword_atom_function_builtin() {
        assert_eq!(categories("param")[0].1, Some(Category::Keyword));
        assert_eq!(categories("within")[0].1, Some(Category::Atom));
        assert_eq!(categories("sum")[0].1, Some(Category::Function));
        assert_eq!(categories("printf")[0].1, Some(Category::Builtin));
    }

    #[test]
    fn test_plain_identifier_has_no_category() {
        assert_eq!(
            categories("foo123"),
            vec![("foo123".to_string(), None)]
        );
    }

    #[test]
    fn test_subject_to_spelling() {
        assert_eq!(
            categories("s.t."),
            vec![("s.t.".to_string(), Some(Category::Keyword))]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(categories("42")[0], ("42".to_string(), Some(Category::Number)));
        assert_eq!(
            categories("3.14e-2"),
            vec![("3.14e-2".to_string(), Some(Category::Number))]
        );
        assert_eq!(
            categories("1E+10"),
            vec![("1E+10".to_string(), Some(Category::Number))]
        );
    }

    #[test]
    fn test_brackets() {
        let runs = categories("[i]");
        assert_eq!(
            runs,
            vec![
                ("[".to_string(), Some(Category::Bracket)),
                ("i".to_string(), None),
                ("]".to_string(), Some(Category::Bracket)),
            ]
        );
    }

    #[test]
    fn test_string_simple() {
        assert_eq!(
            categories("'abc' x"),
            vec![
                ("'abc'".to_string(), Some(Category::Str)),
                (" ".to_string(), None),
                ("x".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_string_doubled_quote_escape() {
        // The doubled quote is literal content; the whole literal is one run.
        assert_eq!(
            categories("'it''s' y"),
            vec![
                ("'it''s'".to_string(), Some(Category::Str)),
                (" ".to_string(), None),
                ("y".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_string_closing_at_eol() {
        assert_eq!(
            categories("'abc'"),
            vec![("'abc'".to_string(), Some(Category::Str))]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert_eq!(
            categories("'abc"),
            vec![("'abc".to_string(), Some(Category::Error))]
        );
    }

    #[test]
    fn test_lone_quote_at_eol_is_error() {
        assert_eq!(
            categories("'"),
            vec![("'".to_string(), Some(Category::Error))]
        );
    }

    #[test]
    fn test_state_resets_after_string_line() {
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        tokenize_line(&lexer, "'abc", &mut state);
        assert_eq!(state, LexerState::Fsa(FsaState::default()));
    }

    #[test]
    fn test_division_quirk_consumes_following_char() {
        // The character after a non-`*` slash rides along in the operator
        // run.
        assert_eq!(
            categories("a/b"),
            vec![
                ("a".to_string(), None),
                ("/b".to_string(), Some(Category::Operator)),
            ]
        );
    }

    #[test]
    fn test_block_comment_single_line() {
        assert_eq!(
            categories("/* c */ x"),
            vec![
                ("/* c */".to_string(), Some(Category::Comment)),
                (" ".to_string(), None),
                ("x".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();

        let first = tokenize_line(&lexer, "/* a", &mut state);
        assert_eq!(first, vec![Token::new("/* a", Some(Category::Comment))]);
        assert!(matches!(
            state,
            LexerState::Fsa(FsaState {
                mode: FsaMode::CommentBody,
                ..
            })
        ));

        let second = tokenize_line(&lexer, "b */ end", &mut state);
        assert_eq!(
            second,
            vec![
                Token::new("b */", Some(Category::Comment)),
                Token::new(" ", None),
                Token::new("end", Some(Category::Keyword)),
            ]
        );
        assert_eq!(state, LexerState::Fsa(FsaState::default()));
    }

    #[test]
    fn test_comment_line_ending_on_star() {
        // A trailing `*` leaves the automaton between body and close; the
        // consumed remainder is still comment text.
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        let runs = tokenize_line(&lexer, "/* a *", &mut state);
        assert_eq!(runs, vec![Token::new("/* a *", Some(Category::Comment))]);
        assert!(matches!(
            state,
            LexerState::Fsa(FsaState {
                mode: FsaMode::CommentStarSeen,
                ..
            })
        ));
    }

    #[test]
    fn test_slash_at_eol_opens_comment_on_next_line() {
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        tokenize_line(&lexer, "/", &mut state);
        let runs = tokenize_line(&lexer, "* inside", &mut state);
        assert_eq!(
            runs,
            vec![Token::new("* inside", Some(Category::Comment))]
        );
    }

    #[test]
    fn test_unrecognized_char_consumed_without_category() {
        assert_eq!(
            categories("a;b"),
            vec![
                ("a".to_string(), None),
                (";".to_string(), None),
                ("b".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let lines = [
            "param n := 10; # size",
            "s.t. c{i in S}: x[i] <= 3.5e2;",
            "display 'it''s';",
            "/* open",
            "still open",
            "closed */ end;",
        ];
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        for line in lines {
            let runs = tokenize_line(&lexer, line, &mut state);
            let rebuilt: String = runs.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(rebuilt, line);
        }
    }

    #[test]
    fn test_idempotent() {
        let source = "maximize obj: sum{i in S} c[i] * x[i];\n/* note */ end;\n";
        let lexer = FsaLexer::new();
        assert_eq!(tokenize(&lexer, source), tokenize(&lexer, source));
    }

    #[test]
    fn test_terminates_on_arbitrary_input() {
        let lexer = FsaLexer::new();
        let mut state = lexer.start_state();
        for line in ["", "   ", "@@@@", "\u{a1}\u{2764}", "''''''", "/*/*/*"] {
            let runs = tokenize_line(&lexer, line, &mut state);
            let rebuilt: String = runs.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(rebuilt, line);
        }
    }
}
