/// token model shared by the scanner and the parser: kinds, operators with binding powers,
/// spans, numeric literal recognition
pub mod token;
///____________________________________________________________________________________________
/// # Tokenizer
/// finite-state scanner turning an equation string into tokens with 1-indexed spans
///
///# Example
/// ```
/// use RustedThermo::symbolic::tokenizer::tokenize;
/// use RustedThermo::symbolic::token::TokenKind;
/// let tokens = tokenize("P * v = R * T").unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[3].kind(), TokenKind::Equals);
/// ```
/// ____________________________________________________________________________________________
pub mod tokenizer;
/// precedence-climbing parser building the expression tree from the token list
pub mod parser;
///____________________________________________________________________________________________
/// # Expression tree
/// 1) the tree itself with its variable index
/// 2) traversals (depth-first in three orders, level order) and the tagged line dump
/// 3) fully parenthesised printing
///
///# Example
/// ```
/// use RustedThermo::symbolic::expression::Expression;
/// let eq = Expression::parse("P * v = R * T").unwrap();
/// assert_eq!(eq.to_string(), "(P * v) = (R * T)");
/// assert_eq!(eq.tagged_lines()[0], "#=");
/// ```
/// ____________________________________________________________________________________________
pub mod expression;
/// numeric evaluation of trees with a map of known values
pub mod interpret;
///____________________________________________________________________________________________
/// # Solver
/// symbolic isolation of one variable by walking up from its leaf and moving operands across
/// `=` with inverse operators
///
///# Example
/// ```
/// use RustedThermo::symbolic::expression::Expression;
/// let eq = Expression::parse("P * v = R * T").unwrap();
/// let t = eq.solve("T").unwrap();
/// assert_eq!(t.to_string(), "((P * v) / R)");
/// ```
/// ____________________________________________________________________________________________
pub mod solve;
mod symbolic_tests;
