/*
Pretty printing of resolution results and of a graph's state.
*/
use crate::graph::{ConstraintGraph, Resolution, Resolutions};
use tabled::settings::Style;
use tabled::{Table, Tabled, builder::Builder};

#[derive(Debug, PartialEq, Tabled)]
pub struct ResolutionRow {
    quantity: String,
    value: String,
    status: &'static str,
}

impl ResolutionRow {
    fn new(name: &str, resolution: &Resolution) -> Self {
        let (value, status) = match resolution {
            Resolution::Resolved(v) => (format!("{:.6}", v), "resolved"),
            Resolution::Unresolved => ("-".to_string(), "unresolved"),
        };
        ResolutionRow {
            quantity: name.to_string(),
            value,
            status,
        }
    }
}

pub fn resolution_rows(resolutions: &Resolutions) -> Vec<ResolutionRow> {
    resolutions
        .iter()
        .map(|(name, resolution)| ResolutionRow::new(name, resolution))
        .collect()
}

pub fn resolution_table(resolutions: &Resolutions) -> String {
    let mut table = Table::new(resolution_rows(resolutions));
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Value nodes with their numbers and the equations they take part in.
pub fn graph_table(graph: &ConstraintGraph) -> String {
    let mut builder = Builder::default();
    builder.push_record(["quantity", "value", "equations"]);
    for name in graph.value_names() {
        let value = graph
            .value(name)
            .map_or_else(|| "?".to_string(), |v| v.to_string());
        let equations = graph
            .value_id(name)
            .map(|id| graph.neighbor_names(id).join(", "))
            .unwrap_or_default();
        builder.push_record([name.to_string(), value, equations]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::expression::Expression;

    #[test]
    fn test_resolution_rows() {
        let resolutions: Resolutions = vec![
            ("P".to_string(), Resolution::Resolved(100.0)),
            ("v2".to_string(), Resolution::Unresolved),
        ];
        let rows = resolution_rows(&resolutions);
        assert_eq!(rows[0].value, "100.000000");
        assert_eq!(rows[1].status, "unresolved");
        let table = resolution_table(&resolutions);
        assert!(table.contains("quantity"));
        assert!(table.contains("100.000000"));
    }

    #[test]
    fn test_graph_table() {
        let mut graph = ConstraintGraph::new();
        graph
            .add_equation("ideal gas", Expression::parse("P * v = R * T").unwrap())
            .unwrap();
        graph.set_value("R", 0.287);
        let table = graph_table(&graph);
        assert!(table.contains("0.287"));
        assert!(table.contains("ideal gas"));
    }
}
