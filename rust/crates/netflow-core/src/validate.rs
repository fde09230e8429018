//! Pre-solve feasibility gate.

use crate::error::ValidationError;
use crate::graph::Graph;
use crate::numerics::BALANCE_TOLERANCE;

/// Checks that `graph` may be handed to [`solve`](crate::solve).
///
/// Checks run in order and the first failure is returned:
/// 1. balances sum to zero within [`BALANCE_TOLERANCE`];
/// 2. every arc endpoint lies in `[1, node_count]`;
/// 3. every arc cost is finite.
///
/// Passing validation is necessary but not sufficient for a feasible
/// instance. `solve` itself does not re-run these checks.
pub fn validate(graph: &Graph) -> Result<(), ValidationError> {
    let net_balance = graph.net_balance();
    // A NaN or infinite balance makes the sum non-finite and lands here too.
    let balanced = net_balance.abs() < BALANCE_TOLERANCE;
    if !balanced {
        return Err(ValidationError::Unbalanced { net_balance });
    }

    for edge in graph.edges() {
        if !graph.contains_node(edge.from) || !graph.contains_node(edge.to) {
            return Err(ValidationError::InvalidArc {
                from: edge.from,
                to: edge.to,
            });
        }
    }

    if let Some(edge) = graph.edges().iter().find(|e| !e.cost.is_finite()) {
        return Err(ValidationError::NonFinite {
            item: format!("cost of arc {}->{}", edge.from, edge.to),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_graph_is_valid() {
        let mut graph = Graph::with_balances(vec![3.0, -3.0]);
        graph.add_edge(1, 2, 1.0).unwrap();
        assert_eq!(validate(&graph), Ok(()));
    }

    #[test]
    fn imbalance_within_tolerance_is_valid() {
        let graph = Graph::with_balances(vec![1.0 + 5e-6, -1.0]);
        assert!(validate(&graph).is_ok());
    }

    #[test]
    fn unbalanced_graph_is_reported_first() {
        let graph: Graph =
            serde_json::from_str(r#"{"balances":[5.0,-3.0],"arcs":[{"from":0,"to":9,"cost":1.0}]}"#)
                .unwrap();
        let err = validate(&graph).unwrap_err();
        assert!(matches!(err, ValidationError::Unbalanced { .. }));
        assert!(err.to_string().contains("not balanced"));
    }

    #[test]
    fn nan_balance_is_unbalanced() {
        let graph = Graph::with_balances(vec![f64::NAN, 0.0]);
        assert!(matches!(
            validate(&graph),
            Err(ValidationError::Unbalanced { .. })
        ));
    }

    #[test]
    fn infinite_cost_is_rejected() {
        let mut graph = Graph::with_balances(vec![1.0, -1.0]);
        graph.add_edge(1, 2, f64::INFINITY).unwrap();
        let err = validate(&graph).unwrap_err();
        assert_eq!(err.code(), "VALUE_NON_FINITE");
        assert!(err.to_string().contains("1->2"));
    }
}
