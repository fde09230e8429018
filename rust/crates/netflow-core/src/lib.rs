//! Minimum-cost flow on uncapacitated supply/demand networks.
//!
//! Build a [`Graph`], gate it with [`validate`], then [`solve`] it:
//!
//! ```
//! use netflow_core::{solve, validate, Graph, SolveStatus};
//!
//! let mut graph = Graph::new(4);
//! graph.set_balance(1, 10.0).unwrap();
//! graph.set_balance(4, -10.0).unwrap();
//! graph.add_edge(1, 2, 5.0).unwrap();
//! graph.add_edge(2, 4, 3.0).unwrap();
//! graph.add_edge(1, 4, 100.0).unwrap();
//!
//! validate(&graph).unwrap();
//! let solution = solve(&graph);
//! assert_eq!(solution.status, SolveStatus::Optimal);
//! assert!((solution.total_cost - 80.0).abs() < 1e-6);
//! assert_eq!(solution.flow(1, 4), 0.0);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod numerics;
pub mod report;
pub mod solution;
pub mod solver;
pub mod validate;

pub use config::SolverOptions;
pub use error::{GraphError, SolveError, ValidationError};
pub use graph::{Edge, EdgeId, Graph};
pub use report::{FlowLine, Report};
pub use solution::{Solution, SolveStatus};
pub use solver::{solve, solve_batch, solve_with_options};
pub use validate::validate;
