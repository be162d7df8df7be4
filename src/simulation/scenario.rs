//! Random what-if scenarios for exploring the flow space

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::FlowEngine;
use crate::master_data::MasterDataStore;
use crate::simulation::overrides::{apply_overrides, MaterialOverrides};
use crate::types::*;

/// A randomly chosen simulated material and its derived flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomScenario {
    pub material: Material,
    pub overrides: MaterialOverrides,
    pub derivation: FlowDerivation,
}

/// Pick a material and a valuation class at random, then derive deterministically
///
/// Randomness lives only in the choice of inputs; the derivation itself is
/// the ordinary [`FlowEngine::derive_flow`].
pub fn derive_random_scenario<R>(
    engine: &FlowEngine,
    store: &MasterDataStore,
    period: &Period,
    rng: &mut R,
) -> FlowResult<RandomScenario>
where
    R: Rng + ?Sized,
{
    let base = store
        .list_materials()
        .choose(rng)
        .ok_or_else(|| FlowError::Validation("No materials to sample from".to_string()))?;

    let classes = engine.mapping().valuation_classes();
    let valuation_class = classes
        .choose(rng)
        .ok_or_else(|| FlowError::Validation("No valuation classes to sample from".to_string()))?;

    let overrides = MaterialOverrides::new().valuation_class(*valuation_class);
    let material = apply_overrides(base, &overrides);
    let derivation = engine.derive_flow(&material, period)?;

    tracing::debug!(
        material = %material.material_id,
        valuation_class = %material.valuation_class,
        "Sampled random scenario"
    );

    Ok(RandomScenario {
        material,
        overrides,
        derivation,
    })
}
