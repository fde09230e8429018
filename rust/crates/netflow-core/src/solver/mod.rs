//! Minimum-cost flow engine.
//!
//! [`solve`] never fails: infeasibility, unboundedness, budget exhaustion,
//! and internal faults all come back as a [`SolveStatus`] on the returned
//! [`Solution`].

mod potentials;
mod residual;
mod ssp;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

use crate::config::SolverOptions;
use crate::error::SolveError;
use crate::graph::Graph;
use crate::solution::{Solution, SolveStatus};

use potentials::{initial_potentials, NegativeCycle};
use residual::{Pricing, ResidualNetwork};
use ssp::{augment, Augmentation, Budget, Termination};

/// Solves `graph` with default options.
///
/// The graph should have passed [`validate`](crate::validate) first; an
/// unvalidated graph still never panics here but may come back as
/// [`SolveStatus::Error`] or [`SolveStatus::Infeasible`].
pub fn solve(graph: &Graph) -> Solution {
    solve_with_options(graph, &SolverOptions::default())
}

/// Solves `graph`, honoring the iteration and time budget in `options`.
pub fn solve_with_options(graph: &Graph, options: &SolverOptions) -> Solution {
    let span = debug_span!(
        "solve",
        nodes = graph.node_count(),
        arcs = graph.edge_count(),
        supply = graph.total_supply()
    );
    let _guard = span.enter();

    let solution = match panic::catch_unwind(AssertUnwindSafe(|| run(graph, options))) {
        Ok(Ok(solution)) => solution,
        Ok(Err(err)) => {
            warn!(code = err.code(), error = %err, "solver fault");
            Solution::unsolved(SolveStatus::Error(err.to_string()), 0)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(error = %message, "solver panicked");
            Solution::unsolved(SolveStatus::Error(message), 0)
        }
    };

    debug!(
        status = %solution.status,
        total_cost = solution.total_cost,
        iterations = solution.iterations,
        "solve finished"
    );
    solution
}

/// Solves independent graphs in parallel. Results keep the input order.
pub fn solve_batch(graphs: &[Graph], options: &SolverOptions) -> Vec<Solution> {
    graphs
        .par_iter()
        .map(|graph| solve_with_options(graph, options))
        .collect()
}

fn run(graph: &Graph, options: &SolverOptions) -> Result<Solution, SolveError> {
    let budget = Budget::new(options);
    let flow_epsilon = options.resolved_flow_epsilon();

    let mut network = ResidualNetwork::build(graph, Pricing::Graph)?;
    let potentials = match initial_potentials(&network) {
        Ok(potentials) => potentials,
        Err(NegativeCycle) => return classify_negative_cycle(graph, options, &budget),
    };

    let outcome = augment(&mut network, potentials, &budget, flow_epsilon)?;
    if let Some(status) = budget_status(&outcome) {
        return Ok(Solution::unsolved(status, outcome.iterations));
    }
    if !is_settled(&network, &outcome, options) {
        debug!(
            unrouted_supply = network.unrouted_supply(),
            unrouted_demand = network.unrouted_demand(),
            "supply cannot reach demand"
        );
        return Ok(Solution::unsolved(
            SolveStatus::Infeasible,
            outcome.iterations,
        ));
    }

    let mut potentials = outcome.potentials;
    potentials.truncate(graph.node_count());
    Ok(Solution::optimal(
        graph,
        network.arc_flows(),
        potentials,
        outcome.iterations,
        flow_epsilon,
    ))
}

/// With a negative cycle of unlimited capacity the instance is unbounded as
/// soon as any feasible flow exists, so only feasibility is left to decide.
fn classify_negative_cycle(
    graph: &Graph,
    options: &SolverOptions,
    budget: &Budget,
) -> Result<Solution, SolveError> {
    debug!("negative-cost cycle found, probing feasibility");
    let mut network = ResidualNetwork::build(graph, Pricing::Free)?;
    let potentials = vec![0.0; network.vertex_count()];
    let outcome = augment(
        &mut network,
        potentials,
        budget,
        options.resolved_flow_epsilon(),
    )?;
    if let Some(status) = budget_status(&outcome) {
        return Ok(Solution::unsolved(status, outcome.iterations));
    }
    let status = if is_settled(&network, &outcome, options) {
        SolveStatus::Unbounded
    } else {
        SolveStatus::Infeasible
    };
    Ok(Solution::unsolved(status, outcome.iterations))
}

fn budget_status(outcome: &Augmentation) -> Option<SolveStatus> {
    match outcome.termination {
        Termination::Routed | Termination::Blocked => None,
        Termination::IterationLimit | Termination::TimeLimit => {
            warn!(
                termination = ?outcome.termination,
                iterations = outcome.iterations,
                "solve budget exhausted"
            );
            Some(SolveStatus::NoSolutionFound)
        }
    }
}

/// A blocked run strands flow on both sides. A routed run leaves at most the
/// flow epsilon on one side, and the other may keep the net imbalance that
/// `validate` tolerates.
fn is_settled(
    network: &ResidualNetwork,
    outcome: &Augmentation,
    options: &SolverOptions,
) -> bool {
    if outcome.termination == Termination::Blocked {
        return false;
    }
    let tolerance = options.resolved_balance_tolerance();
    network.unrouted_supply() <= tolerance && network.unrouted_demand() <= tolerance
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic: {message}")
    } else {
        "panic with non-string payload".to_string()
    }
}
