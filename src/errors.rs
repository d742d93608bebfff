//! Error taxonomy of the crate.
//!
//! Lexing and parsing errors abort the pipeline for one input string. Solve and evaluation
//! errors are local to one attempt: the graph resolver treats them as "this equation did not
//! help" and keeps searching. An unresolved quantity is not an error at all, see
//! [`crate::graph::Resolution`].

use crate::symbolic::token::{Operator, Span};
use thiserror::Error;

/// the scanner found a character with no legal transition out of `Start`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token '{lexeme}' at {span}")]
    UnexpectedToken { lexeme: String, span: Span },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unmatched parenthesis at {span}")]
    UnmatchedParenthesis { span: Span },
    /// `=` is only legal once, at the top level
    #[error("unexpected '=' at {span}: an equation has exactly one top-level '='")]
    UnexpectedEquals { span: Span },
    #[error("expression nested deeper than {limit} levels at {span}")]
    NestingTooDeep { limit: usize, span: Span },
}

/// Either stage of turning text into a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("variable '{0}' not found in expression")]
    VariableNotFound(String),
    #[error("expression has no '=' to solve across")]
    NotAnEquation,
    #[error("no inverse for '{operator}': {reason}")]
    InverseUnavailable { operator: Operator, reason: String },
    #[error("isolation needs more than {limit} rewrite steps")]
    LimitExceeded { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("no value supplied for variable '{0}'")]
    UnboundVariable(String),
    #[error("an equation has no single numeric value, evaluate one of its sides")]
    EquationNotEvaluable,
    #[error("expression has no '=', it has no residual")]
    NotAnEquation,
    #[error("node '{0}' not found in expression")]
    NodeNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("equation '{0}' has no top-level '='")]
    NotAnEquation(String),
    #[error("equation '{name}' links {leaves} value node(s), at least 2 are required")]
    DegenerateEquation { name: String, leaves: usize },
    #[error("equation '{0}' already exists")]
    DuplicateEquation(String),
}

/// Failures while reading a problem document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("syntax error in task document: {0}")]
    Syntax(String),
    #[error("task document has no '{0}' section")]
    MissingSection(String),
    #[error("invalid value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },
    #[error("cannot read task: {0}")]
    Io(String),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        TaskError::Io(err.to_string())
    }
}
