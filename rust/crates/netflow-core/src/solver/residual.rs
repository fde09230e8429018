use crate::error::SolveError;
use crate::graph::Graph;
use crate::numerics::RESIDUAL_EPSILON;

#[derive(Debug, Clone)]
pub(crate) struct ResidualArc {
    pub(crate) to: usize,
    pub(crate) rev: usize,
    pub(crate) cap: f64,
    pub(crate) cost: f64,
}

impl ResidualArc {
    pub(crate) fn is_open(&self) -> bool {
        self.cap > RESIDUAL_EPSILON
    }
}

/// Which arc costs the residual network carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pricing {
    /// The graph's own costs.
    Graph,
    /// Every graph arc at cost zero; used to test plain feasibility.
    Free,
}

/// Residual network over the graph nodes plus a super source and sink.
///
/// Graph node `i` (1-based) is vertex `i - 1`. The source feeds every supply
/// node through an arc sized to its balance, every demand node drains to the
/// sink the same way, and graph arcs have infinite capacity.
#[derive(Debug)]
pub(crate) struct ResidualNetwork {
    pub(crate) adjacency: Vec<Vec<ResidualArc>>,
    pub(crate) source: usize,
    pub(crate) sink: usize,
    /// Forward residual arc of each graph arc; `None` for self-loops.
    arc_refs: Vec<Option<(usize, usize)>>,
    negative_self_loop: bool,
    demand: f64,
}

impl ResidualNetwork {
    pub(crate) fn build(graph: &Graph, pricing: Pricing) -> Result<Self, SolveError> {
        let node_count = graph.node_count();
        let source = node_count;
        let sink = node_count + 1;
        let mut network = Self {
            adjacency: vec![Vec::new(); node_count + 2],
            source,
            sink,
            arc_refs: Vec::with_capacity(graph.edge_count()),
            negative_self_loop: false,
            demand: 0.0,
        };

        for edge in graph.edges() {
            if !graph.contains_node(edge.from) || !graph.contains_node(edge.to) {
                return Err(SolveError::InvalidEndpoint {
                    from: edge.from,
                    to: edge.to,
                    node_count,
                });
            }
            if !edge.cost.is_finite() {
                return Err(SolveError::NonFinite {
                    item: format!("cost on arc {}->{}", edge.from, edge.to),
                });
            }
            let cost = match pricing {
                Pricing::Graph => edge.cost,
                Pricing::Free => 0.0,
            };
            if edge.is_self_loop() {
                // Inflow and outflow cancel, so a self-loop only matters as a
                // cycle of its own.
                network.negative_self_loop |= cost < 0.0;
                network.arc_refs.push(None);
                continue;
            }
            let tail = edge.from - 1;
            let head = edge.to - 1;
            let index = network.add_arc(tail, head, f64::INFINITY, cost);
            network.arc_refs.push(Some((tail, index)));
        }

        for (node, &balance) in graph.balances().iter().enumerate() {
            if !balance.is_finite() {
                return Err(SolveError::NonFinite {
                    item: format!("balance on node {}", node + 1),
                });
            }
            if balance > 0.0 {
                network.add_arc(source, node, balance, 0.0);
            } else if balance < 0.0 {
                network.add_arc(node, sink, -balance, 0.0);
                network.demand += -balance;
            }
        }

        Ok(network)
    }

    fn add_arc(&mut self, from: usize, to: usize, cap: f64, cost: f64) -> usize {
        let from_index = self.adjacency[from].len();
        let to_index = self.adjacency[to].len();
        self.adjacency[from].push(ResidualArc {
            to,
            rev: to_index,
            cap,
            cost,
        });
        self.adjacency[to].push(ResidualArc {
            to: from,
            rev: from_index,
            cap: 0.0,
            cost: -cost,
        });
        from_index
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn has_negative_self_loop(&self) -> bool {
        self.negative_self_loop
    }

    /// Moves `amount` units along `adjacency[from][index]`.
    pub(crate) fn push(&mut self, from: usize, index: usize, amount: f64) {
        let (to, rev) = {
            let arc = &mut self.adjacency[from][index];
            arc.cap -= amount;
            (arc.to, arc.rev)
        };
        self.adjacency[to][rev].cap += amount;
    }

    /// Supply still waiting on source arcs.
    pub(crate) fn unrouted_supply(&self) -> f64 {
        self.adjacency[self.source]
            .iter()
            .map(|arc| arc.cap.max(0.0))
            .sum()
    }

    /// Demand not yet delivered to the sink.
    pub(crate) fn unrouted_demand(&self) -> f64 {
        // The sink only holds reverse arcs; their capacity is what arrived.
        let delivered: f64 = self.adjacency[self.sink].iter().map(|arc| arc.cap).sum();
        (self.demand - delivered).max(0.0)
    }

    /// Flow on every graph arc, in insertion order.
    pub(crate) fn arc_flows(&self) -> Vec<f64> {
        self.arc_refs
            .iter()
            .map(|slot| match *slot {
                Some((tail, index)) => {
                    let arc = &self.adjacency[tail][index];
                    self.adjacency[arc.to][arc.rev].cap.max(0.0)
                }
                None => 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_adds_source_and_sink_arcs() {
        let mut graph = Graph::with_balances(vec![3.0, 0.0, -3.0]);
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        let network = ResidualNetwork::build(&graph, Pricing::Graph).unwrap();
        assert_eq!(network.vertex_count(), 5);
        assert_eq!(network.unrouted_supply(), 3.0);
        assert_eq!(network.unrouted_demand(), 3.0);
        assert_eq!(network.arc_flows(), vec![0.0, 0.0]);
    }

    #[test]
    fn push_moves_capacity_to_the_reverse_arc() {
        let mut graph = Graph::with_balances(vec![2.0, -2.0]);
        graph.add_edge(1, 2, 4.0).unwrap();
        let mut network = ResidualNetwork::build(&graph, Pricing::Graph).unwrap();
        let source = network.source;
        network.push(source, 0, 2.0);
        network.push(0, 0, 2.0);
        let sink_arc = network.adjacency[1]
            .iter()
            .position(|arc| arc.to == network.sink)
            .unwrap();
        network.push(1, sink_arc, 2.0);
        assert_eq!(network.arc_flows(), vec![2.0]);
        assert_eq!(network.unrouted_supply(), 0.0);
        assert_eq!(network.unrouted_demand(), 0.0);
        assert!(network.adjacency[0][0].cap.is_infinite());
    }

    #[test]
    fn self_loops_stay_out_of_the_network() {
        let mut graph = Graph::with_balances(vec![0.0, 0.0]);
        graph.add_edge(1, 1, 3.0).unwrap();
        let network = ResidualNetwork::build(&graph, Pricing::Graph).unwrap();
        assert!(network.adjacency[0].is_empty());
        assert!(!network.has_negative_self_loop());
        assert_eq!(network.arc_flows(), vec![0.0]);

        graph.add_edge(2, 2, -1.0).unwrap();
        let network = ResidualNetwork::build(&graph, Pricing::Graph).unwrap();
        assert!(network.has_negative_self_loop());
        let free = ResidualNetwork::build(&graph, Pricing::Free).unwrap();
        assert!(!free.has_negative_self_loop());
    }

    #[test]
    fn bad_endpoint_is_an_internal_error() {
        let graph: Graph =
            serde_json::from_str(r#"{"balances":[0.0],"arcs":[{"from":1,"to":2,"cost":1.0}]}"#)
                .unwrap();
        let err = ResidualNetwork::build(&graph, Pricing::Graph).unwrap_err();
        assert!(matches!(err, SolveError::InvalidEndpoint { to: 2, .. }));
    }
}
