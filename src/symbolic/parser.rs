//! Precedence-climbing parser turning a token sequence into a [`Node`] tree.
//!
//! Binding powers (higher binds tighter): `=` 1, `+ -` 10, `* /` 20, `^` 30.
//! `^` parses its right operand one step below its own power, which makes it right
//! associative: `a ^ b ^ c` is `a ^ (b ^ c)`. `=` parses its right side from zero.
//!
//! A `-` in operand position is a unary minus and becomes `0 - operand`; the operand binds
//! tighter than `*` and `/` but looser than `^`, so `-x ^ 2` is `-(x ^ 2)`.
//!
//! An equation has exactly one `=`, at the root. Any other `=` is a [`ParseError::UnexpectedEquals`].
//!
//! Brackets, unary minus and every operator level add one to the nesting. Past the parser's
//! limit the result is [`ParseError::NestingTooDeep`], so later tree walks never see a tree
//! deeper than that.

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::errors::ParseError;
use crate::symbolic::expression::Node;
use crate::symbolic::token::{Operator, Span, Token, TokenKind};

/// floor for the operand of a unary minus
const UNARY_MINUS_BINDING_POWER: u8 = 25;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// openers whose closing bracket has not been read yet
    brackets: Vec<Token>,
    /// bound on both the parser's own recursion and the depth of the tree it builds
    max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser::with_max_depth(tokens, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            brackets: Vec::new(),
            max_depth,
        }
    }

    /// Parses the whole token sequence. Leftover tokens are an error.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let (root, _) = self.parse_with_floor(0, 0)?;
        if let Some(token) = self.peek() {
            return Err(if token.is_closing_bracket() {
                ParseError::UnmatchedParenthesis { span: token.span() }
            } else {
                ParseError::UnexpectedToken {
                    lexeme: token.lexeme().to_string(),
                    span: token.span(),
                }
            });
        }
        if let Some(span) = misplaced_equals(&root, true) {
            return Err(ParseError::UnexpectedEquals { span });
        }
        Ok(root)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn too_deep(&self, span: Span) -> ParseError {
        ParseError::NestingTooDeep {
            limit: self.max_depth,
            span,
        }
    }

    /// Span of the next token, or of the last one at the end of input.
    fn current_span(&self) -> Span {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(Token::span)
            .unwrap_or_default()
    }

    /// Parses a primary, then folds in every infix operator binding tighter than `floor`.
    /// Returns the subtree with its depth.
    fn parse_with_floor(&mut self, floor: u8, nesting: usize) -> Result<(Node, usize), ParseError> {
        if nesting > self.max_depth {
            return Err(self.too_deep(self.current_span()));
        }
        let (mut left, mut depth) = self.parse_primary(nesting)?;
        loop {
            let Some(op) = self.peek().and_then(Token::operator) else {
                break;
            };
            if op.binding_power() <= floor {
                break;
            }
            let Some(token) = self.advance() else { break };
            let (right, right_depth) =
                self.parse_with_floor(op.right_binding_power(), nesting + 1)?;
            depth = 1 + depth.max(right_depth);
            if depth > self.max_depth {
                return Err(self.too_deep(token.span()));
            }
            left = Node::binary(op, token, left, right);
        }
        Ok((left, depth))
    }

    fn parse_primary(&mut self, nesting: usize) -> Result<(Node, usize), ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        match token.kind() {
            TokenKind::Number | TokenKind::Variable => Ok((Node::leaf(token), 0)),
            TokenKind::Parenthesis if token.is_opening_bracket() => {
                self.brackets.push(token.clone());
                let inner = self.parse_with_floor(0, nesting + 1)?;
                match self.advance() {
                    Some(close) if close.closes(&token) => {
                        self.brackets.pop();
                        Ok(inner)
                    }
                    Some(other) if !other.is_closing_bracket() => Err(ParseError::UnexpectedToken {
                        lexeme: other.lexeme().to_string(),
                        span: other.span(),
                    }),
                    _ => Err(ParseError::UnmatchedParenthesis { span: token.span() }),
                }
            }
            // `()`: the group is open, its content is missing
            TokenKind::Parenthesis
                if self
                    .brackets
                    .last()
                    .is_some_and(|opener| token.closes(opener)) =>
            {
                Err(ParseError::UnexpectedToken {
                    lexeme: token.lexeme().to_string(),
                    span: token.span(),
                })
            }
            TokenKind::Parenthesis if token.is_closing_bracket() => {
                Err(ParseError::UnmatchedParenthesis { span: token.span() })
            }
            TokenKind::Operator if token.operator() == Some(Operator::Sub) => {
                let span = token.span();
                let (operand, operand_depth) =
                    self.parse_with_floor(UNARY_MINUS_BINDING_POWER, nesting + 1)?;
                if operand_depth + 1 > self.max_depth {
                    return Err(self.too_deep(span));
                }
                Ok((
                    Node::binary(Operator::Sub, token, Node::number(0.0, span), operand),
                    operand_depth + 1,
                ))
            }
            _ => Err(ParseError::UnexpectedToken {
                lexeme: token.lexeme().to_string(),
                span: token.span(),
            }),
        }
    }
}

/// Span of the first `=` that is not the root.
fn misplaced_equals(node: &Node, is_root: bool) -> Option<Span> {
    match node {
        Node::Leaf(_) => None,
        Node::Binary {
            op, token, left, right,
        } => {
            if *op == Operator::Equals && !is_root {
                return Some(token.span());
            }
            misplaced_equals(left, false).or_else(|| misplaced_equals(right, false))
        }
    }
}

/// Parses a token sequence into an `=`-rooted tree, or a bare expression if there is no `=`.
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}

/// [`parse`] with a custom bound on nesting and tree depth.
pub fn parse_with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Result<Node, ParseError> {
    Parser::with_max_depth(tokens, max_depth).parse()
}
