//! Lexical tokens shared by the tokenizer, the parser and the expression tree.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter, EnumString};

/// digit runs with at most one decimal point, either side of the point may be empty but not both
static NUMBER_LEXEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("valid number regex"));

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenKind {
    Number,
    Variable,
    Operator,
    Equals,
    Parenthesis,
    Error,
}

/// Closed set of binary operators, `=` included.
///
/// Every operator has exactly one evaluator (see `interpret.rs`) and one inverse move
/// (see `solve.rs`); both are exhaustive matches over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "=")]
    Equals,
}

impl Operator {
    /// Higher binds tighter.
    pub fn binding_power(self) -> u8 {
        match self {
            Operator::Equals => 1,
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    /// Floor used when parsing the right operand. `^` lowers its own floor by one so that
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`; `=` restarts from zero.
    pub fn right_binding_power(self) -> u8 {
        match self {
            Operator::Pow => self.binding_power() - 1,
            Operator::Equals => 0,
            _ => self.binding_power(),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
            Operator::Equals => '=',
        }
    }
}

/// 1-indexed, inclusive character positions of a lexeme in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A classified lexeme. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    numeric_value: Option<f64>,
    operator: Option<Operator>,
    span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        let lexeme = lexeme.into();
        let numeric_value = match kind {
            TokenKind::Number | TokenKind::Variable => parse_number(&lexeme),
            _ => None,
        };
        let operator = match kind {
            TokenKind::Operator | TokenKind::Equals => lexeme.parse::<Operator>().ok(),
            _ => None,
        };
        Token {
            kind,
            lexeme,
            numeric_value,
            operator,
            span,
        }
    }

    /// Token that did not come from source text, e.g. the `1` of a `1 / n` exponent wrapper.
    pub fn synthetic_number(value: f64, span: Span) -> Self {
        Token::new(TokenKind::Number, value.to_string(), span)
    }

    pub fn synthetic_operator(op: Operator, span: Span) -> Self {
        let kind = if op == Operator::Equals {
            TokenKind::Equals
        } else {
            TokenKind::Operator
        };
        Token::new(kind, op.symbol().to_string(), span)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Present only when the lexeme reads as a number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.numeric_value
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Binding power when the token is used as an infix operator.
    pub fn binding_power(&self) -> Option<u8> {
        self.operator.map(Operator::binding_power)
    }

    pub fn is_opening_bracket(&self) -> bool {
        self.kind == TokenKind::Parenthesis && matches!(self.lexeme.as_str(), "(" | "[")
    }

    pub fn is_closing_bracket(&self) -> bool {
        self.kind == TokenKind::Parenthesis && matches!(self.lexeme.as_str(), ")" | "]")
    }

    /// `(` closes with `)`, `[` with `]`.
    pub fn closes(&self, opener: &Token) -> bool {
        matches!(
            (opener.lexeme.as_str(), self.lexeme.as_str()),
            ("(", ")") | ("[", "]")
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)
    }
}

/// Best-effort numeric reading of a lexeme. Names such as `inf` or `nan` stay symbolic.
pub fn parse_number(lexeme: &str) -> Option<f64> {
    if NUMBER_LEXEME.is_match(lexeme) {
        lexeme.parse::<f64>().ok()
    } else {
        None
    }
}
