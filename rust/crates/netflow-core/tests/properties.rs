use netflow_core::{solve, solve_batch, validate, Graph, Solution, SolveStatus, SolverOptions};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-6;

/// A graph whose balances come from a random non-negative flow, so it is
/// feasible by construction. `witness_cost` is the cost of that flow.
struct Instance {
    graph: Graph,
    witness_cost: f64,
}

fn build_instance(rng: &mut StdRng, n: usize, m: usize, acyclic: bool) -> Instance {
    let mut balances = vec![0.0; n];
    let mut arcs = Vec::with_capacity(m);
    let mut witness_cost = 0.0;

    for _ in 0..m {
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n);
        if a == b {
            b = (b + 1) % n;
        }
        // Arcs that only point to higher indices cannot form a cycle, so
        // negative costs are safe there.
        let (from, to, cost) = if acyclic {
            (a.min(b), a.max(b), rng.gen_range(-5..=10) as f64)
        } else {
            (a, b, rng.gen_range(0..=10) as f64)
        };
        let flow = rng.gen_range(0..=6) as f64;
        balances[from] += flow;
        balances[to] -= flow;
        witness_cost += flow * cost;
        arcs.push((from + 1, to + 1, cost));
    }

    let mut graph = Graph::with_balances(balances);
    for (from, to, cost) in arcs {
        graph.add_edge(from, to, cost).unwrap();
    }
    Instance {
        graph,
        witness_cost,
    }
}

/// Primal feasibility plus complementary slackness against the returned
/// potentials proves optimality.
fn check_optimality(graph: &Graph, solution: &Solution) -> Result<(), TestCaseError> {
    prop_assert_eq!(&solution.status, &SolveStatus::Optimal);
    prop_assert!(solution.solved);
    prop_assert_eq!(solution.arc_flows.len(), graph.edge_count());
    prop_assert_eq!(solution.potentials.len(), graph.node_count());
    prop_assert!(solution.max_conservation_violation(graph) <= TOL);
    prop_assert!((solution.objective_from_flows(graph) - solution.total_cost).abs() <= TOL);

    for (edge, &flow) in graph.edges().iter().zip(solution.arc_flows.iter()) {
        prop_assert!(flow >= 0.0);
        let reduced = edge.cost + solution.potentials[edge.from - 1]
            - solution.potentials[edge.to - 1];
        prop_assert!(reduced >= -TOL, "negative reduced cost {}", reduced);
        if flow > TOL {
            prop_assert!(reduced.abs() <= TOL, "flow on arc with reduced cost {}", reduced);
        }
    }
    for (&(from, to), &flow) in &solution.flows {
        prop_assert!(flow > TOL);
        prop_assert!(graph.unit_cost(from, to).is_some());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_cyclic_instances_are_solved_optimally(
        seed in any::<u64>(),
        n in 2usize..12,
        m in 1usize..40,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let instance = build_instance(&mut rng, n, m, false);
        prop_assert!(validate(&instance.graph).is_ok());
        let solution = solve(&instance.graph);
        check_optimality(&instance.graph, &solution)?;
        prop_assert!(solution.total_cost <= instance.witness_cost + TOL);
    }

    #[test]
    fn random_negative_cost_dags_are_solved_optimally(
        seed in any::<u64>(),
        n in 2usize..12,
        m in 1usize..40,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let instance = build_instance(&mut rng, n, m, true);
        let solution = solve(&instance.graph);
        check_optimality(&instance.graph, &solution)?;
        prop_assert!(solution.total_cost <= instance.witness_cost + TOL);
    }

    #[test]
    fn unbalanced_graphs_never_validate(
        balances in prop::collection::vec(-50.0f64..50.0, 1..10),
        offset in prop_oneof![-1e3f64..-1e-4, 1e-4f64..1e3],
    ) {
        let mut balances = balances;
        let sum: f64 = balances.iter().sum();
        balances[0] -= sum;
        balances[0] += offset;
        let graph = Graph::with_balances(balances);
        prop_assert!(validate(&graph).is_err());
    }

    #[test]
    fn rejected_arcs_leave_edge_count_unchanged(
        n in 0usize..6,
        from in 0usize..10,
        to in 0usize..10,
    ) {
        let mut graph = Graph::new(n);
        let in_range = |node: usize| node >= 1 && node <= n;
        let before = graph.edge_count();
        let result = graph.add_edge(from, to, 1.0);
        if in_range(from) && in_range(to) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(graph.edge_count(), before + 1);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(graph.edge_count(), before);
        }
    }

    #[test]
    fn balance_getter_is_total(n in 0usize..6, node in 0usize..20) {
        let graph = Graph::with_balances(vec![1.5; n]);
        let expected = if node >= 1 && node <= n { 1.5 } else { 0.0 };
        prop_assert_eq!(graph.balance(node), expected);
    }
}

#[test]
fn resolving_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    let instance = build_instance(&mut rng, 10, 35, false);
    let first = solve(&instance.graph);
    let second = solve(&instance.graph);
    assert_eq!(first.status, SolveStatus::Optimal);
    assert!((first.total_cost - second.total_cost).abs() <= TOL);
}

#[test]
fn unreachable_demand_is_infeasible() {
    let mut rng = StdRng::seed_from_u64(11);
    let instance = build_instance(&mut rng, 8, 20, false);
    // Append an isolated demand node fed by nothing.
    let mut balances = instance.graph.balances().to_vec();
    balances[0] += 3.0;
    balances.push(-3.0);
    let mut graph = Graph::with_balances(balances);
    for edge in instance.graph.edges() {
        graph.add_edge(edge.from, edge.to, edge.cost).unwrap();
    }
    assert!(validate(&graph).is_ok());
    let solution = solve(&graph);
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert!(!solution.solved);
}

#[test]
fn batch_matches_individual_solves() {
    let mut rng = StdRng::seed_from_u64(42);
    let graphs: Vec<Graph> = (0..8)
        .map(|i| build_instance(&mut rng, 4 + i, 10 + 3 * i, i % 2 == 0).graph)
        .collect();
    let options = SolverOptions::default();
    let batch = solve_batch(&graphs, &options);
    assert_eq!(batch.len(), graphs.len());
    for (graph, solution) in graphs.iter().zip(batch.iter()) {
        let single = solve(graph);
        assert_eq!(solution.status, single.status);
        assert!((solution.total_cost - single.total_cost).abs() <= TOL);
    }
}
