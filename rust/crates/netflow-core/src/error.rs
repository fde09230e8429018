//! Error types for graph construction, validation, and solver faults.
//!
//! Only [`GraphError`] is ever returned to callers of the mutators. Validation
//! failures are diagnostics, and [`SolveError`] never escapes
//! [`solve`](crate::solve): it is folded into
//! [`SolveStatus::Error`](crate::SolveStatus::Error).

use std::fmt;

/// Structural error raised by [`Graph`](crate::Graph) mutators.
///
/// A failed call leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node index outside `[1, node_count]` was passed to `set_balance`.
    NodeOutOfRange { node: usize, node_count: usize },
    /// An arc endpoint outside `[1, node_count]` was passed to `add_edge`.
    EdgeOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },
}

impl GraphError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::NodeOutOfRange { .. } | GraphError::EdgeOutOfRange { .. } => {
                "NODE_OUT_OF_RANGE"
            }
        }
    }
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeOutOfRange { node, node_count } => write!(
                f,
                "[{}] Node out of range: {} (valid nodes are 1..={})",
                self.code(),
                node,
                node_count
            ),
            GraphError::EdgeOutOfRange {
                from,
                to,
                node_count,
            } => write!(
                f,
                "[{}] Invalid node in edge: {}->{} (valid nodes are 1..={})",
                self.code(),
                from,
                to,
                node_count
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Diagnostic produced by [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Balances do not sum to zero within the balance tolerance.
    Unbalanced { net_balance: f64 },
    /// An arc references a node outside `[1, node_count]`.
    InvalidArc { from: usize, to: usize },
    /// A balance or arc cost is NaN or infinite.
    NonFinite { item: String },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Unbalanced { .. } => "BALANCE_UNBALANCED",
            ValidationError::InvalidArc { .. } => "ARC_INVALID",
            ValidationError::NonFinite { .. } => "VALUE_NON_FINITE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Unbalanced { net_balance } => write!(
                f,
                "Supply and demand are not balanced (net balance {net_balance})."
            ),
            ValidationError::InvalidArc { from, to } => write!(f, "Invalid edge: {from}->{to}"),
            ValidationError::NonFinite { item } => write!(f, "Non-finite value: {item}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Internal solver fault. Surfaced to callers only as a status string.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// An arc endpoint does not name a node of the graph.
    InvalidEndpoint {
        from: usize,
        to: usize,
        node_count: usize,
    },
    /// A balance or cost that the solver cannot price.
    NonFinite { item: String },
    /// The shortest-path tree lost a predecessor while tracing a path.
    BrokenPath { node: usize },
    /// An augmenting path had no residual capacity left.
    Stalled { iteration: usize },
}

impl SolveError {
    pub fn code(&self) -> &'static str {
        "SOLVER_INTERNAL"
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidEndpoint {
                from,
                to,
                node_count,
            } => write!(
                f,
                "arc {from}->{to} references a node outside [1, {node_count}]"
            ),
            SolveError::NonFinite { item } => write!(f, "non-finite {item}"),
            SolveError::BrokenPath { node } => {
                write!(f, "shortest-path tree has no predecessor for node {node}")
            }
            SolveError::Stalled { iteration } => write!(
                f,
                "augmenting path without residual capacity at iteration {iteration}"
            ),
        }
    }
}

impl std::error::Error for SolveError {}
