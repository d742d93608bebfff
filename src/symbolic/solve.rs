//! # Variable isolation
//!
//! Rewrites `lhs = rhs` until a chosen variable stands alone on its side of `=`.
//!
//! The target's path from the root gives the chain of ancestors and, for each, which child
//! leads towards the target. Starting from the outermost ancestor, every step is one inverse
//! move: the operand off the target path moves across `=`, combined with the opposite side
//! through the operator's inverse, and the ancestor is replaced by its on-path child.
//!
//! | ancestor   | target in left (`x`) | target in right (`x`) |
//! |------------|----------------------|-----------------------|
//! | `x + m`    | `O - m`              | `O - m`               |
//! | `x - m`    | `O + m`              | `m - O`               |
//! | `x * m`    | `O / m`              | `O / m`               |
//! | `x / m`    | `O * m`              | `m / O`               |
//! | `x ^ m`    | `O ^ (1 / m)`        | unavailable           |
//!
//! The power inverse only isolates a base. A target inside an exponent would need a
//! logarithm, which the operator set does not have, so it is reported as
//! [`SolveError::InverseUnavailable`].
//!
//! Every move is one rewrite step; more steps than the configured limit (20 by default) is
//! [`SolveError::LimitExceeded`]. The original expression is never touched.
//!
//! ## Example
//! ```
//! use RustedThermo::symbolic::expression::Expression;
//! use std::collections::HashMap;
//! let eq = Expression::parse("a / b = c").unwrap();
//! let b = eq.solve("b").unwrap();
//! let known = HashMap::from([("a".to_string(), 10.0), ("c".to_string(), 2.0)]);
//! assert_eq!(b.interpret(Some(&known)).unwrap(), 5.0);
//! ```

use crate::config::DEFAULT_MAX_REWRITE_STEPS;
use crate::errors::SolveError;
use crate::symbolic::expression::{Expression, Node, Side};
use crate::symbolic::token::{Operator, Span};
use log::debug;

/// One inverse move. `opposite` is the current other side of `=`, `moved` the operand leaving
/// the target's side, `target_side` the child of the ancestor that holds the target.
pub fn inverse_move(
    op: Operator,
    target_side: Side,
    opposite: Node,
    moved: Node,
    span: Span,
) -> Result<Node, SolveError> {
    let node = match (op, target_side) {
        (Operator::Add, _) => Node::combine(Operator::Sub, opposite, moved, span),
        (Operator::Sub, Side::Left) => Node::combine(Operator::Add, opposite, moved, span),
        (Operator::Sub, Side::Right) => Node::combine(Operator::Sub, moved, opposite, span),
        (Operator::Mul, _) => Node::combine(Operator::Div, opposite, moved, span),
        (Operator::Div, Side::Left) => Node::combine(Operator::Mul, opposite, moved, span),
        (Operator::Div, Side::Right) => Node::combine(Operator::Div, moved, opposite, span),
        (Operator::Pow, Side::Left) => {
            let reciprocal = Node::combine(Operator::Div, Node::number(1.0, span), moved, span);
            Node::combine(Operator::Pow, opposite, reciprocal, span)
        }
        (Operator::Pow, Side::Right) => {
            return Err(SolveError::InverseUnavailable {
                operator: op,
                reason: "only the base of a power can be isolated".to_string(),
            });
        }
        (Operator::Equals, _) => {
            return Err(SolveError::InverseUnavailable {
                operator: op,
                reason: "nested '=' cannot be moved across '='".to_string(),
            });
        }
    };
    Ok(node)
}

impl Expression {
    /// Isolates `name` and returns the expression it equals, with the default step limit.
    pub fn solve(&self, name: &str) -> Result<Expression, SolveError> {
        self.solve_with_limit(name, DEFAULT_MAX_REWRITE_STEPS)
    }

    /// Isolates `name` and returns the expression it equals.
    pub fn solve_with_limit(&self, name: &str, limit: usize) -> Result<Expression, SolveError> {
        let (_, _, value) = self.isolate_parts(name, limit)?;
        Ok(Expression::new(value))
    }

    /// Isolates `name` and returns the rewritten equation. The target stays on the side of `=`
    /// where it started.
    pub fn isolate(&self, name: &str) -> Result<Expression, SolveError> {
        self.isolate_with_limit(name, DEFAULT_MAX_REWRITE_STEPS)
    }

    pub fn isolate_with_limit(&self, name: &str, limit: usize) -> Result<Expression, SolveError> {
        let (root_side, target, value) = self.isolate_parts(name, limit)?;
        let (left, right) = match root_side {
            Side::Left => (target, value),
            Side::Right => (value, target),
        };
        let equals = self.root().token().clone();
        Ok(Expression::new(Node::binary(Operator::Equals, equals, left, right)))
    }

    /// Returns the side the target started on, the isolated target and its value side.
    fn isolate_parts(&self, name: &str, limit: usize) -> Result<(Side, Node, Node), SolveError> {
        let (lhs, rhs) = self.sides().ok_or(SolveError::NotAnEquation)?;
        let path = self
            .path_of(name)
            .ok_or_else(|| SolveError::VariableNotFound(name.to_string()))?;
        let (&root_side, chain) = path
            .split_first()
            .ok_or_else(|| SolveError::VariableNotFound(name.to_string()))?;

        let (mut current, mut opposite) = match root_side {
            Side::Left => (lhs.clone(), rhs.clone()),
            Side::Right => (rhs.clone(), lhs.clone()),
        };

        for (step, &towards_target) in chain.iter().enumerate() {
            if step >= limit {
                return Err(SolveError::LimitExceeded { limit });
            }
            let Node::Binary {
                op,
                token,
                left,
                right,
            } = current
            else {
                return Err(SolveError::VariableNotFound(name.to_string()));
            };
            let (kept, moved) = match towards_target {
                Side::Left => (*left, *right),
                Side::Right => (*right, *left),
            };
            opposite = inverse_move(op, towards_target, opposite, moved, token.span())?;
            debug!(
                "solve {}: step {} undid '{}', other side is now {}",
                name,
                step + 1,
                op,
                opposite
            );
            current = kept;
        }
        Ok((root_side, current, opposite))
    }
}
