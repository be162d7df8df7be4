//! # Material Flow Core
//!
//! Derives, for a single material master record, the flow of value from the
//! material through its profit center into Inventory, COGS and (when the
//! material group posts revenue) Revenue GL accounts.
//!
//! ## Features
//!
//! - **Master data**: validated, read-only material, GL account and material group tables
//! - **Mapping builder**: valuation class and material group join keys resolved to GL accounts,
//!   failing fast on ambiguous reference data
//! - **Eligibility policy**: blocked revenue GLs and closed periods
//! - **Flow derivation**: deterministic flow graph with a typed eligibility flag per node
//! - **What-if simulation**: profit center / valuation class overrides and random scenarios
//!
//! ## Quick Start
//!
//! ```rust
//! use material_flow_core::utils::sample::sample_reference_data;
//! use material_flow_core::{FlowConfig, FlowSystem, Period};
//!
//! # async fn run() -> Result<(), material_flow_core::FlowError> {
//! let system = FlowSystem::load(&sample_reference_data(), &FlowConfig::default()).await?;
//! let derivation = system.derive_for("M-10001", &Period::parse("2025-03")?)?;
//! assert_eq!(derivation.graph.nodes.len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod eligibility;
pub mod engine;
pub mod logging;
pub mod mapping;
pub mod master_data;
pub mod simulation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use eligibility::*;
pub use engine::*;
pub use mapping::*;
pub use master_data::*;
pub use simulation::*;
pub use traits::*;
pub use types::*;
