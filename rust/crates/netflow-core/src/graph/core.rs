use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::numerics::positive_sum;

/// Position of an arc in insertion order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// Directed, uncapacitated arc between two 1-based nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    /// Cost per unit of flow. Negative costs are allowed.
    pub cost: f64,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Supply/demand network with a fixed node set and an append-only arc list.
///
/// Nodes are addressed by 1-based indices in `[1, node_count]`. A positive
/// balance is supply, a negative balance is demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    balances: Vec<f64>,
    #[serde(default, rename = "arcs")]
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates `node_count` nodes with zero balance and no arcs.
    pub fn new(node_count: usize) -> Self {
        Self {
            balances: vec![0.0; node_count],
            edges: Vec::new(),
        }
    }

    /// Creates one node per entry of `balances`, in order.
    pub fn with_balances(balances: Vec<f64>) -> Self {
        Self {
            balances,
            edges: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.balances.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: usize) -> bool {
        node >= 1 && node <= self.balances.len()
    }

    /// Balance of `node`, or `0.0` when `node` is out of range.
    ///
    /// Unlike [`set_balance`](Self::set_balance) and
    /// [`add_edge`](Self::add_edge) this accessor never fails. Keep it that
    /// way: callers rely on reading arbitrary indices without a range check.
    pub fn balance(&self, node: usize) -> f64 {
        if !self.contains_node(node) {
            return 0.0;
        }
        self.balances[node - 1]
    }

    /// All balances, node `i` at index `i - 1`.
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Overwrites the balance of `node`.
    pub fn set_balance(&mut self, node: usize, balance: f64) -> Result<(), GraphError> {
        if !self.contains_node(node) {
            return Err(GraphError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            });
        }
        self.balances[node - 1] = balance;
        Ok(())
    }

    /// Appends an arc. Parallel arcs and self-loops are accepted.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) -> Result<EdgeId, GraphError> {
        if !self.contains_node(from) || !self.contains_node(to) {
            return Err(GraphError::EdgeOutOfRange {
                from,
                to,
                node_count: self.node_count(),
            });
        }
        let edge_id = EdgeId(self.edges.len());
        self.edges.push(Edge { from, to, cost });
        Ok(edge_id)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge.0)
    }

    /// Arcs in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of all balances; zero for a balanced network.
    pub fn net_balance(&self) -> f64 {
        self.balances.iter().sum()
    }

    pub fn total_supply(&self) -> f64 {
        positive_sum(&self.balances)
    }

    /// Cost of the first arc `from -> to`, if any.
    pub fn unit_cost(&self, from: usize, to: usize) -> Option<f64> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
            .map(|edge| edge.cost)
    }
}
