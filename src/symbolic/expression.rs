//! # Expression tree
//!
//! A parsed equation is a binary tree of [`Node`]s. Every node owns its children exclusively;
//! there are no parent pointers. Upward traversal (needed by the solver) goes through a
//! [`NodePath`]: the sequence of left/right turns from the root down to a node. Reading a path
//! from the end towards the front walks from a node up through its ancestors.
//!
//! [`Expression`] wraps the root together with an index from every unbound variable name to the
//! path of its first occurrence (pre-order). Expressions are never mutated in place: solving
//! and substitution produce new expressions.
//!
//! ## Example
//! ```
//! use RustedThermo::symbolic::expression::Expression;
//! let eq = Expression::parse("T2 / T1 = (P2 / P1) ^ ((GAMMA - 1) / GAMMA)").unwrap();
//! assert!(eq.is_equation());
//! assert_eq!(eq.variables(), vec!["T2", "T1", "P2", "P1", "GAMMA"]);
//! println!("{}", eq);
//! ```

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::errors::ExpressionError;
use crate::symbolic::parser::Parser;
use crate::symbolic::token::{Operator, Span, Token, TokenKind};
use crate::symbolic::tokenizer::tokenize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Which child of a binary node a path step descends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Turns taken from the root to reach a node. The empty path is the root itself.
pub type NodePath = Vec<Side>;

/// Order in which [`Expression::depth_first`] reports a node relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    In,
    Post,
}

/// Tree node. Operators (and `=`) always carry two children, numbers and variables none.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Token),
    Binary {
        op: Operator,
        token: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(token: Token) -> Node {
        Node::Leaf(token)
    }

    /// Builds an operator node. `op` is the operator carried by `token`.
    pub fn binary(op: Operator, token: Token, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            token,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Operator node that did not come from the source text.
    pub fn combine(op: Operator, left: Node, right: Node, span: Span) -> Node {
        Node::binary(op, Token::synthetic_operator(op, span), left, right)
    }

    pub fn number(value: f64, span: Span) -> Node {
        Node::Leaf(Token::synthetic_number(value, span))
    }

    pub fn token(&self) -> &Token {
        match self {
            Node::Leaf(token) => token,
            Node::Binary { token, .. } => token,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token().kind()
    }

    pub fn lexeme(&self) -> &str {
        self.token().lexeme()
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { op, .. } => Some(*op),
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { left, .. } => Some(left),
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { right, .. } => Some(right),
        }
    }

    pub fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_equals(&self) -> bool {
        self.operator() == Some(Operator::Equals)
    }

    /// Node reached by following `path` from `self`.
    pub fn at(&self, path: &[Side]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, side| node.child(*side))
    }

    /// Path to the first node (pre-order) whose lexeme equals `lexeme`.
    pub fn find_first(&self, lexeme: &str) -> Option<NodePath> {
        fn walk(node: &Node, lexeme: &str, path: &mut NodePath) -> bool {
            if node.lexeme() == lexeme {
                return true;
            }
            if let Node::Binary { left, right, .. } = node {
                for (side, child) in [(Side::Left, left), (Side::Right, right)] {
                    path.push(side);
                    if walk(child, lexeme, path) {
                        return true;
                    }
                    path.pop();
                }
            }
            false
        }
        let mut path = Vec::new();
        walk(self, lexeme, &mut path).then_some(path)
    }

    /// Leaf tokens in pre-order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        self.visit_pre(&mut |node, _| {
            if let Node::Leaf(token) = node {
                leaves.push(token);
            }
        }, 1);
        leaves
    }

    fn visit_pre<'a>(&'a self, callback: &mut dyn FnMut(&'a Node, usize), depth: usize) {
        callback(self, depth);
        if let Node::Binary { left, right, .. } = self {
            left.visit_pre(callback, depth + 1);
            right.visit_pre(callback, depth + 1);
        }
    }

    fn visit(&self, order: TraversalOrder, callback: &mut dyn FnMut(&Node, usize), depth: usize) {
        if order == TraversalOrder::Pre {
            callback(self, depth);
        }
        if let Some(left) = self.left() {
            left.visit(order, callback, depth + 1);
        }
        if order == TraversalOrder::In {
            callback(self, depth);
        }
        if let Some(right) = self.right() {
            right.visit(order, callback, depth + 1);
        }
        if order == TraversalOrder::Post {
            callback(self, depth);
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf(token) => write!(f, "{}", token.lexeme()),
            Node::Binary {
                op: Operator::Equals,
                left,
                right,
                ..
            } => write!(f, "{} = {}", left, right),
            Node::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// Parsed expression or equation plus its variable index.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Node,
    /// unbound variable name -> path of its first pre-order occurrence
    index: HashMap<String, NodePath>,
    /// variable names in first-encounter order
    order: Vec<String>,
}

impl Expression {
    /// Wraps a tree, indexing its variables with one full traversal.
    pub fn new(root: Node) -> Expression {
        let mut index = HashMap::new();
        let mut order = Vec::new();
        fn walk(
            node: &Node,
            path: &mut NodePath,
            index: &mut HashMap<String, NodePath>,
            order: &mut Vec<String>,
        ) {
            match node {
                Node::Leaf(token) => {
                    if token.kind() == TokenKind::Variable && token.numeric_value().is_none() {
                        let name = token.lexeme().to_string();
                        if !index.contains_key(&name) {
                            order.push(name.clone());
                            index.insert(name, path.clone());
                        }
                    }
                }
                Node::Binary { left, right, .. } => {
                    path.push(Side::Left);
                    walk(left, path, index, order);
                    path.pop();
                    path.push(Side::Right);
                    walk(right, path, index, order);
                    path.pop();
                }
            }
        }
        walk(&root, &mut Vec::new(), &mut index, &mut order);
        Expression { root, index, order }
    }

    /// Tokenizes and parses `text`.
    pub fn parse(text: &str) -> Result<Expression, ExpressionError> {
        Expression::parse_with_limit(text, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Like [`Expression::parse`], rejecting trees nested deeper than `max_depth`.
    pub fn parse_with_limit(text: &str, max_depth: usize) -> Result<Expression, ExpressionError> {
        let tokens = tokenize(text)?;
        let root = Parser::with_max_depth(tokens, max_depth).parse()?;
        Ok(Expression::new(root))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn is_equation(&self) -> bool {
        self.root.is_equals()
    }

    /// Left and right side of the top-level `=`.
    pub fn sides(&self) -> Option<(&Node, &Node)> {
        match &self.root {
            Node::Binary {
                op: Operator::Equals,
                left,
                right,
                ..
            } => Some((left, right)),
            _ => None,
        }
    }

    pub fn lhs(&self) -> Option<&Node> {
        self.sides().map(|(lhs, _)| lhs)
    }

    pub fn rhs(&self) -> Option<&Node> {
        self.sides().map(|(_, rhs)| rhs)
    }

    /// Unbound variable names in first-encounter order.
    pub fn variables(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Path of the first occurrence of variable `name`.
    pub fn path_of(&self, name: &str) -> Option<&NodePath> {
        self.index.get(name)
    }

    /// Node of the first occurrence of variable `name`.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).and_then(|path| self.root.at(path))
    }

    /// Ancestors of the node at `path`, nearest first, each paired with the side the path
    /// leaves it through. This is the upward walk the solver uses in place of parent links.
    pub fn ancestors(&self, path: &[Side]) -> Vec<(&Node, Side)> {
        (0..path.len())
            .rev()
            .filter_map(|depth| self.root.at(&path[..depth]).map(|node| (node, path[depth])))
            .collect()
    }

    /// Leaf tokens (numbers and variables) in pre-order.
    pub fn leaves(&self) -> Vec<&Token> {
        self.root.leaves()
    }

    /// Depth-first walk. The root is reported at depth 1.
    pub fn depth_first<F>(&self, order: TraversalOrder, mut callback: F)
    where
        F: FnMut(&Node, usize),
    {
        self.root.visit(order, &mut callback, 1);
    }

    /// Level-order walk. The root is reported at depth 0.
    pub fn level_order<F>(&self, mut callback: F)
    where
        F: FnMut(&Node, usize),
    {
        let mut queue: VecDeque<(&Node, usize)> = VecDeque::new();
        queue.push_back((&self.root, 0));
        while let Some((node, depth)) = queue.pop_front() {
            callback(node, depth);
            if let Node::Binary { left, right, .. } = node {
                queue.push_back((left, depth + 1));
                queue.push_back((right, depth + 1));
            }
        }
    }

    /// Indentation-tagged dump: one line per node, `'#'` repeated by depth, then the lexeme.
    /// Lines come in reversed post-order, i.e. root first and right subtrees before left ones.
    pub fn tagged_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.depth_first(TraversalOrder::Post, |node, depth| {
            lines.push(format!("{}{}", "#".repeat(depth), node.lexeme()));
        });
        lines.reverse();
        lines
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl From<Node> for Expression {
    fn from(root: Node) -> Self {
        Expression::new(root)
    }
}
