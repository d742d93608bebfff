//! # Constraint graph
//!
//! A network of equations sharing variables. Value nodes hold known numbers (or nothing yet),
//! equation nodes hold parsed equations; an edge joins an equation to every quantity it
//! mentions. Asking for an unknown quantity walks the network, solving neighbouring equations
//! for it and evaluating them with whatever can be found further out.
//!
//! ```
//! use RustedThermo::graph::ConstraintGraph;
//! use RustedThermo::symbolic::expression::Expression;
//! let mut graph = ConstraintGraph::new();
//! graph
//!     .add_equation("isentropic", Expression::parse("T2 / T1 = (P2 / P1) ^ ((k - 1) / k)").unwrap())
//!     .unwrap();
//! graph
//!     .add_equation("ideal gas 1", Expression::parse("P1 * v1 = R * T1").unwrap())
//!     .unwrap();
//! graph.set_value("P1", 100.0);
//! graph.set_value("v1", 0.861);
//! graph.set_value("R", 0.287);
//! graph.set_value("P2", 800.0);
//! graph.set_value("k", 1.4);
//! // T1 comes from the ideal gas law, T2 from the isentropic relation
//! let t2 = graph.resolve("T2").value().unwrap();
//! assert!((t2 - 300.0 * 8f64.powf(0.4 / 1.4)).abs() < 1e-6);
//! ```
pub mod constraint_graph;
pub mod resolver;
mod graph_tests;

pub use constraint_graph::{ConstraintGraph, GraphNode, NodeId};
pub use resolver::{Resolution, Resolutions};
