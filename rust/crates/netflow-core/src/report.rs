//! Presentation record built from a [`Solution`] and its [`Graph`].

use std::fmt;

use serde::Serialize;

use crate::graph::Graph;
use crate::numerics::FLOW_EPSILON;
use crate::solution::Solution;

/// One arc carrying flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLine {
    pub from: usize,
    pub to: usize,
    pub flow: f64,
    pub unit_cost: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: String,
    pub solved: bool,
    /// Present only for a solved instance.
    pub total_cost: Option<f64>,
    pub iterations: usize,
    pub lines: Vec<FlowLine>,
}

impl Report {
    /// Resolves per-unit costs for every flow in `solution` from `graph`.
    ///
    /// When the solution carries per-arc flows for this graph, parallel arcs
    /// get one line each. Otherwise each `(from, to)` key is priced with the
    /// first matching arc.
    pub fn new(graph: &Graph, solution: &Solution) -> Self {
        let lines = if !solution.solved {
            Vec::new()
        } else if solution.arc_flows.len() == graph.edge_count() {
            graph
                .edges()
                .iter()
                .zip(solution.arc_flows.iter())
                .filter(|(_, flow)| **flow > FLOW_EPSILON)
                .map(|(edge, &flow)| FlowLine {
                    from: edge.from,
                    to: edge.to,
                    flow,
                    unit_cost: edge.cost,
                    subtotal: flow * edge.cost,
                })
                .collect()
        } else {
            solution
                .flows
                .iter()
                .map(|(&(from, to), &flow)| {
                    let unit_cost = graph.unit_cost(from, to).unwrap_or(0.0);
                    FlowLine {
                        from,
                        to,
                        flow,
                        unit_cost,
                        subtotal: flow * unit_cost,
                    }
                })
                .collect()
        };

        Self {
            status: solution.status.to_string(),
            solved: solution.solved,
            total_cost: solution.solved.then_some(solution.total_cost),
            iterations: solution.iterations,
            lines,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(total_cost) = self.total_cost else {
            return writeln!(f, "Failed to solve: {}", self.status);
        };
        writeln!(f, "Solution Status: {}", self.status)?;
        writeln!(f, "Total Minimum Cost: {total_cost}")?;
        writeln!(f)?;
        writeln!(f, "Flow Assignment:")?;
        for line in &self.lines {
            writeln!(
                f,
                "  {} -> {} : {} units (cost/unit: {}, total: {})",
                line.from, line.to, line.flow, line.unit_cost, line.subtotal
            )?;
        }
        Ok(())
    }
}
