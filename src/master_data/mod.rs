//! Master data store holding the read-only material and GL reference tables

pub mod store;

pub use store::*;
