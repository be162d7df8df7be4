//! What-if simulation on top of the deterministic engine

pub mod overrides;
pub mod scenario;

pub use overrides::*;
pub use scenario::*;
