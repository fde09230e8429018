//! Seven-node sample network solved when no instance file is given.

use netflow_core::{Graph, GraphError};

const BALANCES: [(usize, f64); 4] = [(1, 40.0), (3, -20.0), (4, 10.0), (7, -30.0)];

const ARCS: [(usize, usize, f64); 13] = [
    (1, 2, 5.0),
    (1, 4, 2.0),
    (1, 6, 8.0),
    (2, 3, 10.0),
    (3, 1, 3.0),
    (3, 5, 5.0),
    (3, 7, 7.0),
    (4, 5, 6.0),
    (5, 1, 12.0),
    (5, 6, 12.0),
    (5, 3, 5.0),
    (6, 3, 9.0),
    (6, 7, 20.0),
];

pub fn sample_graph() -> Result<Graph, GraphError> {
    let mut graph = Graph::new(7);
    for (node, balance) in BALANCES {
        graph.set_balance(node, balance)?;
    }
    for (from, to, cost) in ARCS {
        graph.add_edge(from, to, cost)?;
    }
    Ok(graph)
}
