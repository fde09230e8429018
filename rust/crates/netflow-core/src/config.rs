//! Solver configuration.

use std::time::Duration;

use crate::numerics::{BALANCE_TOLERANCE, FLOW_EPSILON};

/// Options for [`solve_with_options`](crate::solve_with_options).
///
/// Every field is optional; `None` keeps the default behavior, which is an
/// unbounded run with the standard tolerances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOptions {
    /// Maximum number of augmenting paths. `None` means no limit.
    pub max_iterations: Option<usize>,
    /// Wall-clock limit for a single solve. `None` means no limit.
    pub time_limit: Option<Duration>,
    /// Threshold below which arc flow is reported as zero.
    pub flow_epsilon: Option<f64>,
    /// Unrouted supply or demand tolerated in an optimal answer.
    pub balance_tolerance: Option<f64>,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_flow_epsilon(mut self, epsilon: f64) -> Self {
        self.flow_epsilon = Some(epsilon);
        self
    }

    pub fn with_balance_tolerance(mut self, tolerance: f64) -> Self {
        self.balance_tolerance = Some(tolerance);
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.max_iterations.is_none()
            && self.time_limit.is_none()
            && self.flow_epsilon.is_none()
            && self.balance_tolerance.is_none()
    }

    pub(crate) fn resolved_flow_epsilon(&self) -> f64 {
        self.flow_epsilon.unwrap_or(FLOW_EPSILON)
    }

    pub(crate) fn resolved_balance_tolerance(&self) -> f64 {
        self.balance_tolerance.unwrap_or(BALANCE_TOLERANCE)
    }
}
