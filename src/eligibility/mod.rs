//! Revenue eligibility rules: blocked GL accounts and closed periods

pub mod policy;

pub use policy::*;
