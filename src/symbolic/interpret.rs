//! Numeric evaluation of expression trees.
//!
//! Post-order walk: numbers return their literal, variables look up the substitution map,
//! operators apply to their evaluated children. `=` has no value of its own; use
//! [`Expression::residual`] to compare the two sides of an equation.

use crate::errors::EvalError;
use crate::symbolic::expression::{Expression, Node};
use crate::symbolic::token::{Operator, TokenKind};
use std::collections::HashMap;

/// Substitution map: variable name -> value.
pub type Known = HashMap<String, f64>;

/// Applies a binary operator. One arm per operator, `=` included.
pub fn apply(op: Operator, left: f64, right: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div => Ok(left / right),
        Operator::Pow => Ok(left.powf(right)),
        Operator::Equals => Err(EvalError::EquationNotEvaluable),
    }
}

impl Node {
    /// Evaluates this subtree.
    pub fn evaluate(&self, known: &Known) -> Result<f64, EvalError> {
        match self {
            Node::Leaf(token) => match (token.kind(), token.numeric_value()) {
                (_, Some(value)) => Ok(value),
                (TokenKind::Variable, None) => known
                    .get(token.lexeme())
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable(token.lexeme().to_string())),
                _ => Err(EvalError::UnboundVariable(token.lexeme().to_string())),
            },
            Node::Binary {
                op, left, right, ..
            } => {
                if *op == Operator::Equals {
                    return Err(EvalError::EquationNotEvaluable);
                }
                let l = left.evaluate(known)?;
                let r = right.evaluate(known)?;
                apply(*op, l, r)
            }
        }
    }
}

impl Expression {
    /// Evaluates the whole expression. `known` may be omitted when the tree has no variables.
    ///
    /// # Example
    /// ```
    /// use RustedThermo::symbolic::expression::Expression;
    /// let e = Expression::parse("3.42 ^ 2 * (1 + 12) + 14 / 20").unwrap();
    /// let value = e.interpret(None).unwrap();
    /// assert!((value - (3.42f64.powf(2.0) * 13.0 + 0.7)).abs() < 1e-12);
    /// ```
    pub fn interpret(&self, known: Option<&Known>) -> Result<f64, EvalError> {
        let empty = Known::new();
        self.root().evaluate(known.unwrap_or(&empty))
    }

    /// Evaluates only the subtree under the first node (pre-order) whose lexeme is `name`.
    /// `name` may be a variable or an operator symbol.
    pub fn interpret_from(&self, name: &str, known: Option<&Known>) -> Result<f64, EvalError> {
        let path = self
            .root()
            .find_first(name)
            .ok_or_else(|| EvalError::NodeNotFound(name.to_string()))?;
        let node = self
            .root()
            .at(&path)
            .ok_or_else(|| EvalError::NodeNotFound(name.to_string()))?;
        let empty = Known::new();
        node.evaluate(known.unwrap_or(&empty))
    }

    /// `lhs - rhs` of an equation; zero when `known` satisfies it.
    pub fn residual(&self, known: &Known) -> Result<f64, EvalError> {
        let (lhs, rhs) = self.sides().ok_or(EvalError::NotAnEquation)?;
        Ok(lhs.evaluate(known)? - rhs.evaluate(known)?)
    }
}
