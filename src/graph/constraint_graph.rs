//! Bipartite graph of value nodes and equation nodes.
//!
//! An edge joins an equation to every value node that appears as a leaf (number or variable)
//! of its tree. Numeric leaves become value nodes named by their lexeme, already known.
//! Adjacency lists keep insertion order, which fixes the order in which the resolver tries
//! candidate equations.

use crate::config::SolverConfig;
use crate::errors::GraphError;
use crate::symbolic::expression::Expression;
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashMap;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphNode {
    /// quantity with a known number, or `None` while unknown
    Value { name: String, value: Option<f64> },
    /// `=`-rooted relation between value nodes
    Equation { name: String, expression: Expression },
}

impl GraphNode {
    pub fn name(&self) -> &str {
        match self {
            GraphNode::Value { name, .. } => name,
            GraphNode::Equation { name, .. } => name,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, GraphNode::Value { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    nodes: Vec<GraphNode>,
    adjacency: Vec<Vec<NodeId>>,
    value_ids: HashMap<String, NodeId>,
    equation_ids: HashMap<String, NodeId>,
    config: SolverConfig,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        ConstraintGraph {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    fn push(&mut self, node: GraphNode) -> NodeId {
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        self.nodes.len() - 1
    }

    /// Adds a value node, or updates it when it exists and `value` is given.
    pub fn add_value(&mut self, name: &str, value: Option<f64>) -> NodeId {
        if let Some(&id) = self.value_ids.get(name) {
            if let (Some(v), GraphNode::Value { value: stored, .. }) = (value, &mut self.nodes[id]) {
                *stored = Some(v);
            }
            return id;
        }
        let id = self.push(GraphNode::Value {
            name: name.to_string(),
            value,
        });
        self.value_ids.insert(name.to_string(), id);
        id
    }

    /// Sets a known number on a value node, creating it if needed.
    pub fn set_value(&mut self, name: &str, value: f64) -> NodeId {
        self.add_value(name, Some(value))
    }

    /// Adds an equation node and links it to one value node per distinct leaf.
    pub fn add_equation(&mut self, name: &str, expression: Expression) -> Result<NodeId, GraphError> {
        if self.equation_ids.contains_key(name) {
            return Err(GraphError::DuplicateEquation(name.to_string()));
        }
        if !expression.is_equation() {
            return Err(GraphError::NotAnEquation(name.to_string()));
        }
        let leaves: Vec<(String, Option<f64>)> = expression
            .leaves()
            .into_iter()
            .map(|token| (token.lexeme().to_string(), token.numeric_value()))
            .unique_by(|(lexeme, _)| lexeme.clone())
            .collect();
        if leaves.len() < 2 {
            return Err(GraphError::DegenerateEquation {
                name: name.to_string(),
                leaves: leaves.len(),
            });
        }

        let equation_id = self.push(GraphNode::Equation {
            name: name.to_string(),
            expression,
        });
        self.equation_ids.insert(name.to_string(), equation_id);
        for (lexeme, numeric) in leaves {
            let value_id = self.add_value(&lexeme, numeric);
            self.adjacency[equation_id].push(value_id);
            self.adjacency[value_id].push(equation_id);
        }
        debug!(
            "equation '{}' links {:?}",
            name,
            self.neighbor_names(equation_id)
        );
        Ok(equation_id)
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.nodes.get(id).map(GraphNode::name).unwrap_or_default()
    }

    pub fn value_id(&self, name: &str) -> Option<NodeId> {
        self.value_ids.get(name).copied()
    }

    pub fn equation_id(&self, name: &str) -> Option<NodeId> {
        self.equation_ids.get(name).copied()
    }

    /// Known number of a value node.
    pub fn known_value(&self, id: NodeId) -> Option<f64> {
        match self.nodes.get(id) {
            Some(GraphNode::Value { value, .. }) => *value,
            _ => None,
        }
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.value_id(name).and_then(|id| self.known_value(id))
    }

    pub fn expression(&self, id: NodeId) -> Option<&Expression> {
        match self.nodes.get(id) {
            Some(GraphNode::Equation { expression, .. }) => Some(expression),
            _ => None,
        }
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn neighbor_names(&self, id: NodeId) -> Vec<&str> {
        self.neighbors(id).iter().map(|&n| self.name(n)).collect()
    }

    /// Value node names in insertion order.
    pub fn value_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.is_value())
            .map(GraphNode::name)
            .collect()
    }

    /// Equation node names in insertion order.
    pub fn equation_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| !n.is_value())
            .map(GraphNode::name)
            .collect()
    }

    /// Value nodes that still have no number.
    pub fn unknowns(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                GraphNode::Value { name, value: None } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value nodes not linked to any equation; they can only be known, never derived.
    pub fn isolated_values(&self) -> Vec<&str> {
        let isolated: Vec<&str> = self
            .value_ids
            .values()
            .filter(|&&id| self.neighbors(id).is_empty())
            .sorted()
            .map(|&id| self.name(id))
            .collect();
        if !isolated.is_empty() {
            warn!("value nodes with no equation: {:?}", isolated);
        }
        isolated
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
