mod vec_ops;

pub use vec_ops::{dot, max_abs, positive_sum};

/// Flow values at or below this are reported as "no flow".
pub const FLOW_EPSILON: f64 = 1e-6;
/// Tolerance on the global balance sum and on unrouted supply after solving.
pub const BALANCE_TOLERANCE: f64 = 1e-5;
/// Residual capacity at or below this is treated as exhausted.
pub const RESIDUAL_EPSILON: f64 = 1e-12;
/// Minimum improvement for a Bellman-Ford relaxation to count.
pub const EPSILON: f64 = 1e-9;
