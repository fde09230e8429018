use crate::numerics::EPSILON;

use super::residual::ResidualNetwork;

/// A cycle of negative total cost exists among the open residual arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NegativeCycle;

/// Initial node potentials from Bellman-Ford rooted at a virtual vertex that
/// reaches every vertex at distance 0.
///
/// The result makes every reduced cost `cost + π(u) - π(v)` non-negative on
/// open arcs, so Dijkstra can run on a network with negative costs. Still
/// relaxing after `V` rounds means a negative cycle.
pub(crate) fn initial_potentials(network: &ResidualNetwork) -> Result<Vec<f64>, NegativeCycle> {
    if network.has_negative_self_loop() {
        return Err(NegativeCycle);
    }
    let n = network.vertex_count();
    let mut dist = vec![0.0_f64; n];

    for _ in 0..n {
        let mut updated = false;
        for u in 0..n {
            let du = dist[u];
            for arc in &network.adjacency[u] {
                if !arc.is_open() {
                    continue;
                }
                let nd = du + arc.cost;
                if nd < dist[arc.to] - EPSILON {
                    dist[arc.to] = nd;
                    updated = true;
                }
            }
        }
        if !updated {
            return Ok(dist);
        }
    }
    Err(NegativeCycle)
}
