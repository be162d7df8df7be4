//! GL lookup tables derived from the GL account reference table

pub mod builder;

pub use builder::*;
