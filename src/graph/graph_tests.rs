//___________________________________TESTS____________________________________
#[cfg(test)]
mod tests {
    use crate::config::SolverConfig;
    use crate::errors::GraphError;
    use crate::graph::{ConstraintGraph, Resolution};
    use crate::symbolic::expression::Expression;
    use approx::assert_relative_eq;

    fn eq(text: &str) -> Expression {
        Expression::parse(text).unwrap()
    }

    fn graph_of(equations: &[(&str, &str)]) -> ConstraintGraph {
        let mut graph = ConstraintGraph::new();
        for (name, text) in equations {
            graph.add_equation(name, eq(text)).unwrap();
        }
        graph
    }

    #[test]
    fn test_edges_link_every_leaf() {
        let graph = graph_of(&[("isentropic", "T2 / 300 = (P2 / P1) ^ ((k - 1) / k)")]);
        let id = graph.equation_id("isentropic").unwrap();
        assert_eq!(
            graph.neighbor_names(id),
            vec!["T2", "300", "P2", "P1", "k", "1"]
        );
        assert_eq!(graph.value("300"), Some(300.0));
        assert_eq!(graph.value("1"), Some(1.0));
        assert_eq!(graph.unknowns(), vec!["T2", "P2", "P1", "k"]);
        let t2 = graph.value_id("T2").unwrap();
        assert_eq!(graph.neighbor_names(t2), vec!["isentropic"]);
    }

    #[test]
    fn test_add_equation_rejects_bad_input() {
        let mut graph = ConstraintGraph::new();
        assert_eq!(
            graph.add_equation("bare", eq("a + b")),
            Err(GraphError::NotAnEquation("bare".to_string()))
        );
        assert_eq!(
            graph.add_equation("single", eq("x = x")),
            Err(GraphError::DegenerateEquation {
                name: "single".to_string(),
                leaves: 1
            })
        );
        graph.add_equation("ok", eq("a = b")).unwrap();
        assert_eq!(
            graph.add_equation("ok", eq("c = d")),
            Err(GraphError::DuplicateEquation("ok".to_string()))
        );
        assert!(graph.value_id("c").is_none());
    }

    #[test]
    fn test_resolve_ideal_gas_pressure() {
        let mut graph = graph_of(&[("ideal gas", "P * v = R * T")]);
        graph.set_value("R", 0.287);
        graph.set_value("T", 300.0);
        graph.set_value("v", 0.5);
        let p = graph.resolve("P").value().unwrap();
        assert_relative_eq!(p, 0.287 * 300.0 / 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_known_value_returns_immediately() {
        let mut graph = graph_of(&[("ideal gas", "P * v = R * T")]);
        graph.set_value("P", 101.3);
        assert_eq!(graph.resolve("P"), Resolution::Resolved(101.3));
    }

    #[test]
    fn test_resolve_through_chain() {
        let mut graph = graph_of(&[
            ("isentropic", "T2 / T1 = (P2 / P1) ^ ((k - 1) / k)"),
            ("state 1", "P1 * v1 = R * T1"),
            ("state 2", "P2 * v2 = R * T2"),
        ]);
        for (name, value) in [("P1", 100.0), ("v1", 0.861), ("R", 0.287), ("P2", 800.0), ("k", 1.4)] {
            graph.set_value(name, value);
        }
        let t2 = 300.0 * 8f64.powf(0.4 / 1.4);
        let v2 = graph.resolve("v2").value().unwrap();
        assert_relative_eq!(v2, 0.287 * t2 / 800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cycle_terminates_unresolved() {
        let graph = graph_of(&[("first", "A = 2 * B"), ("second", "B = A + 1")]);
        assert_eq!(graph.resolve("A"), Resolution::Unresolved);
        assert_eq!(graph.resolve("B"), Resolution::Unresolved);
    }

    #[test]
    fn test_cycle_with_exit() {
        let mut graph = graph_of(&[
            ("first", "A = 2 * B"),
            ("second", "B = A + 1"),
            ("third", "B = C * 3"),
        ]);
        graph.set_value("C", 2.0);
        assert_eq!(graph.resolve("A"), Resolution::Resolved(12.0));
        assert_eq!(graph.resolve("B"), Resolution::Resolved(6.0));
    }

    #[test]
    fn test_unknown_name_is_unresolved() {
        let graph = graph_of(&[("first", "a = b")]);
        assert_eq!(graph.resolve("zeta"), Resolution::Unresolved);
    }

    #[test]
    fn test_exponent_target_falls_back_to_other_equation() {
        let mut graph = graph_of(&[("power", "y = x ^ n"), ("linear", "n = 2 * m")]);
        graph.set_value("x", 3.0);
        graph.set_value("y", 81.0);
        graph.set_value("m", 2.0);
        // 'power' cannot be solved for n, 'linear' can
        assert_relative_eq!(graph.resolve("n").value().unwrap(), 4.0);
    }

    #[test]
    fn test_first_success_wins_among_consistent_equations() {
        let mut graph = graph_of(&[("one", "a = b + 1"), ("two", "a = c * 2")]);
        graph.set_value("b", 3.0);
        graph.set_value("c", 2.0);
        assert!(graph.resolve("a").is_resolved());
    }

    #[test]
    fn test_non_finite_result_is_unresolved() {
        let mut graph = graph_of(&[("ratio", "a = b / c")]);
        graph.set_value("b", 1.0);
        graph.set_value("c", 0.0);
        assert_eq!(graph.resolve("a"), Resolution::Unresolved);
    }

    #[test]
    fn test_recursion_depth_limit() {
        let mut graph = ConstraintGraph::with_config(SolverConfig {
            max_recursion_depth: 2,
            ..SolverConfig::default()
        });
        graph.add_equation("e1", eq("a = b + 1")).unwrap();
        graph.add_equation("e2", eq("b = c + 1")).unwrap();
        graph.add_equation("e3", eq("c = d + 1")).unwrap();
        graph.set_value("d", 0.0);
        assert_eq!(graph.resolve("c"), Resolution::Resolved(1.0));
        assert_eq!(graph.resolve("a"), Resolution::Unresolved);

        graph.set_config(SolverConfig::default());
        assert_eq!(graph.resolve("a"), Resolution::Resolved(3.0));
    }

    #[test]
    fn test_long_chain_resolves_with_default_config() {
        let mut graph = ConstraintGraph::new();
        for i in 1..=40 {
            let text = format!("x{} = x{} + 1", i, i - 1);
            graph.add_equation(&format!("step_{}", i), eq(&text)).unwrap();
        }
        graph.set_value("x0", 0.0);
        assert_eq!(graph.resolve("x40"), Resolution::Resolved(40.0));
        // and backwards through the same chain
        graph.set_value("x0", -1.0);
        graph.set_value("x40", 39.0);
        assert_eq!(graph.resolve("x20"), Resolution::Resolved(19.0));
    }

    #[test]
    fn test_rewrite_limit_blocks_deep_equations() {
        let mut graph = ConstraintGraph::with_config(SolverConfig {
            max_rewrite_steps: 1,
            ..SolverConfig::default()
        });
        graph.add_equation("deep", eq("(x + 1) * 2 = y")).unwrap();
        graph.set_value("y", 8.0);
        assert_eq!(graph.resolve("x"), Resolution::Unresolved);
        graph.set_config(SolverConfig::default());
        assert_eq!(graph.resolve("x"), Resolution::Resolved(3.0));
    }

    #[test]
    fn test_resolve_all_and_record() {
        let mut graph = graph_of(&[("sum", "a + b = c"), ("double", "d = 2 * c")]);
        graph.set_value("a", 1.0);
        graph.set_value("b", 2.0);
        let results = graph.resolve_unknowns();
        assert_eq!(
            results,
            vec![
                ("c".to_string(), Resolution::Resolved(3.0)),
                ("d".to_string(), Resolution::Resolved(6.0)),
            ]
        );
        graph.record(&results);
        assert!(graph.unknowns().is_empty());
        assert_eq!(graph.value("d"), Some(6.0));

        let picked = graph.resolve_all(&["d", "missing"]);
        assert_eq!(picked[1], ("missing".to_string(), Resolution::Unresolved));
    }

    #[test]
    fn test_resolution_helpers() {
        assert_eq!(Resolution::from(Some(2.0)).value(), Some(2.0));
        assert_eq!(Resolution::from(None), Resolution::Unresolved);
        assert_eq!(Resolution::Unresolved.to_string(), "unresolved");
    }
}
