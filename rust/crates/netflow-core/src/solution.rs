//! Solver output record.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, Graph};
use crate::numerics::{dot, max_abs};

/// Outcome class of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A feasible optimum was found.
    Optimal,
    /// No flow satisfies every balance with the given arcs.
    Infeasible,
    /// The instance is feasible and a negative-cost cycle drives the
    /// objective to negative infinity.
    Unbounded,
    /// The run stopped before classifying the instance, e.g. on a budget.
    NoSolutionFound,
    /// Internal fault caught at the solver boundary.
    Error(String),
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Short label without the error detail.
    pub fn label(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NoSolutionFound => "No solution found",
            SolveStatus::Error(_) => "Exception",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Error(message) => write!(f, "Exception: {message}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Result of one [`solve`](crate::solve) call, detached from the graph.
///
/// `flows` is keyed by `(from, to)` and sums parallel arcs; `arc_flows` keeps
/// the per-arc values in arc insertion order. Both are empty unless the
/// status is [`SolveStatus::Optimal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub solved: bool,
    pub status: SolveStatus,
    /// Objective value; `0.0` and meaningless unless `solved`.
    pub total_cost: f64,
    /// Node pairs whose arcs carry flow above the flow epsilon.
    pub flows: BTreeMap<(usize, usize), f64>,
    pub arc_flows: Vec<f64>,
    /// Node prices: `cost + potentials[from-1] - potentials[to-1] >= 0` on
    /// every arc, with equality on arcs that carry flow.
    pub potentials: Vec<f64>,
    /// Augmenting paths used.
    pub iterations: usize,
}

impl Solution {
    pub(crate) fn unsolved(status: SolveStatus, iterations: usize) -> Self {
        Self {
            solved: false,
            status,
            total_cost: 0.0,
            flows: BTreeMap::new(),
            arc_flows: Vec::new(),
            potentials: Vec::new(),
            iterations,
        }
    }

    pub(crate) fn optimal(
        graph: &Graph,
        arc_flows: Vec<f64>,
        potentials: Vec<f64>,
        iterations: usize,
        flow_epsilon: f64,
    ) -> Self {
        let costs: Vec<f64> = graph.edges().iter().map(|edge| edge.cost).collect();
        let total_cost = dot(&arc_flows, &costs);

        let mut flows = BTreeMap::new();
        for (edge, &flow) in graph.edges().iter().zip(arc_flows.iter()) {
            if flow > flow_epsilon {
                *flows.entry((edge.from, edge.to)).or_insert(0.0) += flow;
            }
        }

        Self {
            solved: true,
            status: SolveStatus::Optimal,
            total_cost,
            flows,
            arc_flows,
            potentials,
            iterations,
        }
    }

    /// Flow on the pair `from -> to`, summed over parallel arcs; `0.0` when
    /// the pair carries no flow.
    pub fn flow(&self, from: usize, to: usize) -> f64 {
        self.flows.get(&(from, to)).copied().unwrap_or(0.0)
    }

    pub fn arc_flow(&self, edge: EdgeId) -> f64 {
        self.arc_flows.get(edge.0).copied().unwrap_or(0.0)
    }

    /// Recomputes `Σ flow · cost` from the flows and the graph's arc costs.
    ///
    /// Uses per-arc flows when they match the graph, otherwise resolves each
    /// `flows` key to the first matching arc's cost.
    pub fn objective_from_flows(&self, graph: &Graph) -> f64 {
        if self.arc_flows.len() == graph.edge_count() {
            return graph
                .edges()
                .iter()
                .zip(self.arc_flows.iter())
                .map(|(edge, flow)| edge.cost * flow)
                .sum();
        }
        self.flows
            .iter()
            .map(|(&(from, to), flow)| graph.unit_cost(from, to).unwrap_or(0.0) * flow)
            .sum()
    }

    /// Largest `|inflow - outflow + balance|` over all nodes.
    pub fn max_conservation_violation(&self, graph: &Graph) -> f64 {
        let mut residual = graph.balances().to_vec();
        let mut apply = |from: usize, to: usize, flow: f64| {
            if let Some(slot) = residual.get_mut(to.wrapping_sub(1)) {
                *slot += flow;
            }
            if let Some(slot) = residual.get_mut(from.wrapping_sub(1)) {
                *slot -= flow;
            }
        };
        if self.arc_flows.len() == graph.edge_count() {
            for (edge, &flow) in graph.edges().iter().zip(self.arc_flows.iter()) {
                apply(edge.from, edge.to, flow);
            }
        } else {
            for (&(from, to), &flow) in &self.flows {
                apply(from, to, flow);
            }
        }
        max_abs(&residual)
    }
}
