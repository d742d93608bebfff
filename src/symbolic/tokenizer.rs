//! Finite-state scanner turning equation text into [`Token`]s.
//!
//! The automaton is a table of guarded transitions. Scanning restarts in `Start` for every
//! token; the machine advances while some outgoing edge accepts the next character. When it
//! stops, the state it stopped in decides the token kind:
//!
//! ```text
//!            ws
//!          ┌────┐
//!          └► Start ──letter──► Variable ◄─┐ letter | digit | _
//!              │ │ │                └─────┘
//!              │ │ └──op──► Operator      (terminal)
//!              │ └──( ) [ ]──► Parenthesis (terminal)
//!              └──=──► Equals              (terminal)
//!   Start ─digit─► N1 ─.─► N2 ─digit─► N3 ─.─► Error
//!   Start ───.────────────► N2
//! ```
//!
//! `N1` holds integer digits, `N2` has just seen the decimal point and `N3` holds fraction
//! digits. A second point sends the run into `Error`, which swallows the rest of the digit run
//! so that `1.2.3` becomes a single `Error` token.

use crate::errors::LexError;
use crate::symbolic::token::{Span, Token, TokenKind};
use log::debug;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanState {
    Start,
    Variable,
    Operator,
    Parenthesis,
    Equals,
    N1,
    N2,
    N3,
    Error,
}

impl ScanState {
    /// Token kind emitted when scanning stops in this state; `Start` emits nothing.
    pub fn token_kind(self) -> Option<TokenKind> {
        match self {
            ScanState::Start => None,
            ScanState::Variable => Some(TokenKind::Variable),
            ScanState::Operator => Some(TokenKind::Operator),
            ScanState::Parenthesis => Some(TokenKind::Parenthesis),
            ScanState::Equals => Some(TokenKind::Equals),
            ScanState::N1 | ScanState::N3 => Some(TokenKind::Number),
            ScanState::N2 | ScanState::Error => Some(TokenKind::Error),
        }
    }
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_identifier_tail(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_decimal_point(c: char) -> bool {
    c == '.'
}

fn is_operator_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']')
}

fn is_equals_sign(c: char) -> bool {
    c == '='
}

fn is_digit_or_point(c: char) -> bool {
    is_digit(c) || is_decimal_point(c)
}

/// A directed edge of the automaton.
#[derive(Clone, Copy)]
pub struct Transition {
    pub from: ScanState,
    pub to: ScanState,
    pub guard: fn(char) -> bool,
}

const fn edge(from: ScanState, to: ScanState, guard: fn(char) -> bool) -> Transition {
    Transition { from, to, guard }
}

/// Edges are tried in table order; the first accepting guard wins.
pub const TRANSITIONS: &[Transition] = &[
    edge(ScanState::Start, ScanState::Start, is_whitespace),
    edge(ScanState::Start, ScanState::Variable, is_letter),
    edge(ScanState::Variable, ScanState::Variable, is_identifier_tail),
    edge(ScanState::Start, ScanState::Operator, is_operator_symbol),
    edge(ScanState::Start, ScanState::Parenthesis, is_bracket),
    edge(ScanState::Start, ScanState::Equals, is_equals_sign),
    edge(ScanState::Start, ScanState::N1, is_digit),
    edge(ScanState::Start, ScanState::N2, is_decimal_point),
    edge(ScanState::N1, ScanState::N1, is_digit),
    edge(ScanState::N1, ScanState::N2, is_decimal_point),
    edge(ScanState::N2, ScanState::N3, is_digit),
    edge(ScanState::N2, ScanState::Error, is_decimal_point),
    edge(ScanState::N3, ScanState::N3, is_digit),
    edge(ScanState::N3, ScanState::Error, is_decimal_point),
    edge(ScanState::Error, ScanState::Error, is_digit_or_point),
];

/// Table-driven automaton; the scanner is stateless apart from the current state.
#[derive(Debug, Clone, Copy)]
pub struct Automaton {
    current: ScanState,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Automaton {
            current: ScanState::Start,
        }
    }

    pub fn reset(&mut self) {
        self.current = ScanState::Start;
    }

    pub fn state(&self) -> ScanState {
        self.current
    }

    pub fn out_degree(state: ScanState) -> usize {
        TRANSITIONS.iter().filter(|t| t.from == state).count()
    }

    /// A state without outgoing edges ends the token immediately.
    pub fn is_terminal(state: ScanState) -> bool {
        Self::out_degree(state) == 0
    }

    /// Follows the first edge accepting `c`. Returns false (and stays put) if none does.
    pub fn explore(&mut self, c: char) -> bool {
        match TRANSITIONS
            .iter()
            .find(|t| t.from == self.current && (t.guard)(c))
        {
            Some(t) => {
                self.current = t.to;
                true
            }
            None => false,
        }
    }
}

/// Scans `text` into tokens.
///
/// # Example
/// ```
/// use RustedThermo::symbolic::tokenizer::tokenize;
/// use RustedThermo::symbolic::token::TokenKind;
/// let tokens = tokenize("P * v = R * T").unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[3].kind(), TokenKind::Equals);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = text.chars().collect();
    let mut automaton = Automaton::new();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        automaton.reset();
        let start = pos;
        let mut buffer = String::new();

        while !Automaton::is_terminal(automaton.state()) {
            let Some(&c) = chars.get(pos) else { break };
            if !automaton.explore(c) {
                break;
            }
            pos += 1;
            if automaton.state() == ScanState::Start {
                // whitespace: drop it and start over
                break;
            }
            buffer.push(c);
        }

        let Some(kind) = automaton.state().token_kind() else {
            if pos == start {
                return Err(LexError::UnexpectedCharacter {
                    character: chars[pos],
                    position: pos + 1,
                });
            }
            continue;
        };
        let token = Token::new(kind, buffer, Span::new(start + 1, pos));
        debug!("token {} at {}", token, token.span());
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_lexemes(text: &str) -> Vec<(TokenKind, String)> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind(), t.lexeme().to_string()))
            .collect()
    }

    #[test]
    fn test_tokenize_parenthesised_product() {
        let tokens = tokenize("3 * (2 + 1)").unwrap();
        let expected = vec![
            (TokenKind::Number, "3", 1, 1),
            (TokenKind::Operator, "*", 3, 3),
            (TokenKind::Parenthesis, "(", 5, 5),
            (TokenKind::Number, "2", 6, 6),
            (TokenKind::Operator, "+", 8, 8),
            (TokenKind::Number, "1", 10, 10),
            (TokenKind::Parenthesis, ")", 11, 11),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, lexeme, start, end)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind(), kind);
            assert_eq!(token.lexeme(), lexeme);
            assert_eq!(token.span(), Span::new(start, end));
        }
        assert_eq!(tokens[0].numeric_value(), Some(3.0));
        assert_eq!(tokens[1].numeric_value(), None);
    }

    #[test]
    fn test_multi_character_spans() {
        let tokens = tokenize("T2 / 300.5").unwrap();
        assert_eq!(tokens[0].span(), Span::new(1, 2));
        assert_eq!(tokens[1].span(), Span::new(4, 4));
        assert_eq!(tokens[2].span(), Span::new(6, 10));
        assert_eq!(tokens[2].numeric_value(), Some(300.5));
    }

    #[test]
    fn test_variables_accept_digits_and_underscores() {
        assert_eq!(
            kinds_and_lexemes("T_2a+GAMMA"),
            vec![
                (TokenKind::Variable, "T_2a".to_string()),
                (TokenKind::Operator, "+".to_string()),
                (TokenKind::Variable, "GAMMA".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokens_without_whitespace() {
        assert_eq!(
            kinds_and_lexemes("T2/T1=(P2/P1)"),
            vec![
                (TokenKind::Variable, "T2".to_string()),
                (TokenKind::Operator, "/".to_string()),
                (TokenKind::Variable, "T1".to_string()),
                (TokenKind::Equals, "=".to_string()),
                (TokenKind::Parenthesis, "(".to_string()),
                (TokenKind::Variable, "P2".to_string()),
                (TokenKind::Operator, "/".to_string()),
                (TokenKind::Variable, "P1".to_string()),
                (TokenKind::Parenthesis, ")".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_substates() {
        assert_eq!(
            kinds_and_lexemes("0.01 00 .5 10"),
            vec![
                (TokenKind::Number, "0.01".to_string()),
                (TokenKind::Number, "00".to_string()),
                (TokenKind::Number, ".5".to_string()),
                (TokenKind::Number, "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_second_decimal_point_is_error() {
        let tokens = tokenize("1.2.3 + 4").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(tokens[0].lexeme(), "1.2.3");
        assert_eq!(tokens[0].numeric_value(), None);
        assert_eq!(tokens[1].kind(), TokenKind::Operator);
        assert_eq!(tokens[2].kind(), TokenKind::Number);
    }

    #[test]
    fn test_dangling_decimal_point_is_error() {
        let tokens = tokenize("1.").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Error);
    }

    #[test]
    fn test_terminal_states_emit_single_characters() {
        assert_eq!(
            kinds_and_lexemes("((=^"),
            vec![
                (TokenKind::Parenthesis, "(".to_string()),
                (TokenKind::Parenthesis, "(".to_string()),
                (TokenKind::Equals, "=".to_string()),
                (TokenKind::Operator, "^".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("   \t ").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_illegal_character_is_lex_error() {
        let err = tokenize("a # b").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                character: '#',
                position: 3
            }
        );
        assert!(tokenize("_x").is_err());
    }

    #[test]
    fn test_automaton_shape() {
        assert!(Automaton::is_terminal(ScanState::Operator));
        assert!(Automaton::is_terminal(ScanState::Parenthesis));
        assert!(Automaton::is_terminal(ScanState::Equals));
        assert!(!Automaton::is_terminal(ScanState::Start));
        assert_eq!(Automaton::out_degree(ScanState::N1), 2);
        let mut automaton = Automaton::new();
        assert!(automaton.explore('7'));
        assert_eq!(automaton.state(), ScanState::N1);
        assert!(!automaton.explore('x'));
        assert_eq!(automaton.state(), ScanState::N1);
    }
}
