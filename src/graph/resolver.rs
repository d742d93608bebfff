//! Depth-first resolution of unknown value nodes.
//!
//! Two mutually recursive steps:
//!
//! - **value**: a known (or already derived) number is returned at once. Otherwise the node is
//!   marked visited and its equations are tried in adjacency order, skipping the equation that
//!   asked and any equation already visited. The first equation that yields a number wins.
//! - **equation**: the equation is marked visited and solved for the value that asked. Every
//!   other value node of the equation is then resolved in turn (visited ones only if they
//!   already have a number), and the solved side is evaluated with those numbers.
//!
//! Every node is visited at most once per request, so cyclic graphs terminate and the
//! recursion is bounded by graph size. A task may also set a recursion depth limit. Solve and evaluation failures only mean
//! "this equation did not help": they never abort the request.

use crate::graph::constraint_graph::{ConstraintGraph, NodeId};
use crate::symbolic::interpret::Known;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Outcome of a request. `Unresolved` is a normal answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved(f64),
    Unresolved,
}

impl Resolution {
    pub fn value(self) -> Option<f64> {
        match self {
            Resolution::Resolved(v) => Some(v),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl From<Option<f64>> for Resolution {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resolution::Resolved(v) => write!(f, "{}", v),
            Resolution::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Requested names paired with their outcomes, in request order.
pub type Resolutions = Vec<(String, Resolution)>;

/// State of one top-level request. Dropped when the request ends.
struct Resolver<'g> {
    graph: &'g ConstraintGraph,
    visited: HashSet<NodeId>,
    /// numbers derived during this request
    derived: HashMap<NodeId, f64>,
    max_depth: usize,
    max_steps: usize,
}

impl<'g> Resolver<'g> {
    fn new(graph: &'g ConstraintGraph) -> Self {
        Resolver {
            graph,
            visited: HashSet::new(),
            derived: HashMap::new(),
            max_depth: graph.config().max_recursion_depth,
            max_steps: graph.config().max_rewrite_steps,
        }
    }

    fn number(&self, id: NodeId) -> Option<f64> {
        self.graph
            .known_value(id)
            .or_else(|| self.derived.get(&id).copied())
    }

    fn resolve_value(&mut self, id: NodeId, last_caller: Option<NodeId>, depth: usize) -> Option<f64> {
        if let Some(v) = self.number(id) {
            return Some(v);
        }
        if self.visited.contains(&id) {
            return None;
        }
        if depth > self.max_depth {
            warn!(
                "recursion depth {} reached at '{}', giving up on this branch",
                self.max_depth,
                self.graph.name(id)
            );
            return None;
        }
        self.visited.insert(id);

        let graph = self.graph;
        for &equation in graph.neighbors(id) {
            if Some(equation) == last_caller || self.visited.contains(&equation) {
                continue;
            }
            if let Some(v) = self.resolve_equation(equation, id, depth + 1) {
                info!(
                    "{} = {} (from '{}')",
                    graph.name(id),
                    v,
                    graph.name(equation)
                );
                self.derived.insert(id, v);
                return Some(v);
            }
        }
        None
    }

    fn resolve_equation(&mut self, equation: NodeId, target: NodeId, depth: usize) -> Option<f64> {
        self.visited.insert(equation);
        let graph = self.graph;
        let expression = graph.expression(equation)?;
        let target_name = graph.name(target);
        let equation_name = graph.name(equation);
        debug!("trying '{}' for '{}'", equation_name, target_name);

        let solved = match expression.solve_with_limit(target_name, self.max_steps) {
            Ok(solved) => solved,
            Err(err) => {
                debug!("'{}' cannot give '{}': {}", equation_name, target_name, err);
                return None;
            }
        };

        let mut known = Known::new();
        for &neighbor in graph.neighbors(equation) {
            if neighbor == target {
                continue;
            }
            let value = match self.number(neighbor) {
                Some(v) => Some(v),
                None if self.visited.contains(&neighbor) => None,
                None => self.resolve_value(neighbor, Some(equation), depth + 1),
            };
            match value {
                Some(v) => {
                    known.insert(graph.name(neighbor).to_string(), v);
                }
                None => {
                    debug!(
                        "'{}' stalls on unknown '{}'",
                        equation_name,
                        graph.name(neighbor)
                    );
                    return None;
                }
            }
        }

        match solved.interpret(Some(&known)) {
            Ok(v) if v.is_finite() => Some(v),
            Ok(v) => {
                debug!("'{}' gives non-finite {} = {}", equation_name, target_name, v);
                None
            }
            Err(err) => {
                debug!("'{}' failed to evaluate: {}", equation_name, err);
                None
            }
        }
    }
}

impl ConstraintGraph {
    /// Determines the number of value node `name` through whatever chain of equations
    /// makes it derivable.
    ///
    /// When several equations could give the value, the first success in adjacency order
    /// (the order equations were added) wins.
    ///
    /// # Example
    /// ```
    /// use RustedThermo::graph::{ConstraintGraph, Resolution};
    /// use RustedThermo::symbolic::expression::Expression;
    /// let mut graph = ConstraintGraph::new();
    /// graph
    ///     .add_equation("ideal gas", Expression::parse("P * v = R * T").unwrap())
    ///     .unwrap();
    /// graph.set_value("R", 0.287);
    /// graph.set_value("T", 300.0);
    /// graph.set_value("v", 0.861);
    /// let p = graph.resolve("P").value().unwrap();
    /// assert!((p - 100.0).abs() < 1e-9);
    /// ```
    pub fn resolve(&self, name: &str) -> Resolution {
        let Some(id) = self.value_id(name) else {
            warn!("'{}' is not a value node", name);
            return Resolution::Unresolved;
        };
        let mut resolver = Resolver::new(self);
        let resolution = Resolution::from(resolver.resolve_value(id, None, 0));
        if !resolution.is_resolved() {
            info!("'{}' could not be resolved", name);
        }
        resolution
    }

    /// Resolves each name in its own request.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Resolutions {
        names
            .iter()
            .map(|name| (name.as_ref().to_string(), self.resolve(name.as_ref())))
            .collect()
    }

    /// Resolves every value node that has no number yet.
    pub fn resolve_unknowns(&self) -> Resolutions {
        let unknowns: Vec<String> = self.unknowns().into_iter().map(str::to_string).collect();
        self.resolve_all(&unknowns)
    }

    /// Stores every resolved number into its value node.
    pub fn record(&mut self, resolutions: &Resolutions) {
        for (name, resolution) in resolutions {
            if let Resolution::Resolved(v) = resolution {
                self.set_value(name, *v);
            }
        }
    }
}
