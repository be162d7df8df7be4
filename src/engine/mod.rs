//! GL flow derivation engine and the facade tying it to master data

pub mod core;
pub mod derivation;
pub mod weights;

pub use self::core::*;
pub use derivation::*;
pub use weights::*;
