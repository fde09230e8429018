mod core;

pub use self::core::{Edge, EdgeId, Graph};
