//! Successive shortest augmenting paths with node potentials.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::config::SolverOptions;
use crate::error::SolveError;

use super::residual::ResidualNetwork;

/// Why the augmentation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    /// Supply or demand is exhausted.
    Routed,
    /// The sink is unreachable while supply and demand remain.
    Blocked,
    IterationLimit,
    TimeLimit,
}

#[derive(Debug)]
pub(crate) struct Augmentation {
    pub(crate) termination: Termination,
    pub(crate) iterations: usize,
    pub(crate) potentials: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    max_iterations: Option<usize>,
    time_limit: Option<Duration>,
    started: Instant,
}

impl Budget {
    pub(crate) fn new(options: &SolverOptions) -> Self {
        Self {
            max_iterations: options.max_iterations,
            time_limit: options.time_limit,
            started: Instant::now(),
        }
    }

    fn exhausted(&self, iterations: usize) -> Option<Termination> {
        if self.max_iterations.is_some_and(|max| iterations >= max) {
            return Some(Termination::IterationLimit);
        }
        if self
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            return Some(Termination::TimeLimit);
        }
        None
    }
}

#[derive(Clone, Copy)]
struct State {
    cost: f64,
    node: usize,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

struct ShortestPaths {
    dist: Vec<f64>,
    /// `(vertex, arc index)` of the arc entering each reached vertex.
    parent: Vec<Option<(usize, usize)>>,
}

/// Dijkstra from the source on reduced costs.
fn shortest_paths(network: &ResidualNetwork, potentials: &[f64]) -> ShortestPaths {
    let n = network.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent = vec![None; n];
    let mut heap = BinaryHeap::new();
    dist[network.source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: network.source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        for (index, arc) in network.adjacency[node].iter().enumerate() {
            if !arc.is_open() {
                continue;
            }
            // Round-off can leave reduced costs a hair below zero.
            let reduced = (arc.cost + potentials[node] - potentials[arc.to]).max(0.0);
            let next_cost = cost + reduced;
            if next_cost < dist[arc.to] {
                dist[arc.to] = next_cost;
                parent[arc.to] = Some((node, index));
                heap.push(State {
                    cost: next_cost,
                    node: arc.to,
                });
            }
        }
    }

    ShortestPaths { dist, parent }
}

/// Arcs of the source-to-sink path, listed sink first.
fn trace_path(
    network: &ResidualNetwork,
    tree: &ShortestPaths,
) -> Result<Vec<(usize, usize)>, SolveError> {
    let mut path = Vec::new();
    let mut v = network.sink;
    while v != network.source {
        let (u, index) = tree.parent[v].ok_or(SolveError::BrokenPath { node: v })?;
        path.push((u, index));
        if path.len() > network.vertex_count() {
            return Err(SolveError::BrokenPath { node: v });
        }
        v = u;
    }
    Ok(path)
}

/// Pushes flow from source to sink along shortest paths until supply or
/// demand runs out, the sink becomes unreachable, or the budget is spent.
///
/// `potentials` must keep every reduced cost on open arcs non-negative; the
/// returned potentials keep that property for the final residual network.
pub(crate) fn augment(
    network: &mut ResidualNetwork,
    mut potentials: Vec<f64>,
    budget: &Budget,
    flow_epsilon: f64,
) -> Result<Augmentation, SolveError> {
    let mut iterations = 0usize;

    let termination = loop {
        let remaining = network.unrouted_supply().min(network.unrouted_demand());
        if remaining <= flow_epsilon {
            break Termination::Routed;
        }
        if let Some(limit) = budget.exhausted(iterations) {
            break limit;
        }

        let tree = shortest_paths(network, &potentials);

        // Unreached vertices take the largest finite distance so reduced
        // costs of arcs entering the reached region stay non-negative.
        let farthest = tree
            .dist
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0_f64, f64::max);
        for (pi, d) in potentials.iter_mut().zip(tree.dist.iter()) {
            *pi += if d.is_finite() { *d } else { farthest };
        }

        if !tree.dist[network.sink].is_finite() {
            break Termination::Blocked;
        }

        let path = trace_path(network, &tree)?;
        let delta = path
            .iter()
            .map(|&(u, index)| network.adjacency[u][index].cap)
            .fold(remaining, f64::min);
        if delta <= 0.0 || !delta.is_finite() {
            return Err(SolveError::Stalled { iteration: iterations });
        }

        let mut path_cost = 0.0;
        for &(u, index) in &path {
            path_cost += network.adjacency[u][index].cost;
            network.push(u, index, delta);
        }
        iterations += 1;
        trace!(iteration = iterations, delta, path_cost, hops = path.len(), "augmented");
    };

    Ok(Augmentation {
        termination,
        iterations,
        potentials,
    })
}
