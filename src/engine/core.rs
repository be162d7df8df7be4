//! Flow system tying master data, mapping tables and the engine together

use rand::Rng;

use crate::config::FlowConfig;
use crate::engine::FlowEngine;
use crate::mapping::GlMapping;
use crate::master_data::MasterDataStore;
use crate::simulation::{apply_overrides, derive_random_scenario, MaterialOverrides, RandomScenario};
use crate::traits::*;
use crate::types::*;

/// Loaded reference data plus a ready-to-use derivation engine
#[derive(Debug)]
pub struct FlowSystem {
    store: MasterDataStore,
    engine: FlowEngine,
}

impl FlowSystem {
    /// Load reference data from a source and build the engine from configuration
    pub async fn load<S>(source: &S, config: &FlowConfig) -> FlowResult<Self>
    where
        S: ReferenceDataSource + ?Sized,
    {
        let store = MasterDataStore::load(source).await?;
        Self::new(store, config)
    }

    /// Build the mapping tables and engine over an already loaded store
    pub fn new(store: MasterDataStore, config: &FlowConfig) -> FlowResult<Self> {
        let mapping = GlMapping::from_store(&store, config.non_revenue_groups.as_slice())?;
        let engine = FlowEngine::new(mapping, config.eligibility_policy()?)
            .with_weights(config.weights()?)?;

        Ok(Self { store, engine })
    }

    pub fn store(&self) -> &MasterDataStore {
        &self.store
    }

    pub fn engine(&self) -> &FlowEngine {
        &self.engine
    }

    /// Derive the flow for a stored material
    pub fn derive_for(&self, material_id: &str, period: &Period) -> FlowResult<FlowDerivation> {
        let material = self.store.find_material(material_id)?;
        self.engine.derive_flow(material, period)
    }

    /// Derive the flow for a stored material with what-if overrides applied
    pub fn simulate(
        &self,
        material_id: &str,
        overrides: &MaterialOverrides,
        period: &Period,
    ) -> FlowResult<FlowDerivation> {
        let base = self.store.find_material(material_id)?;
        let simulated = apply_overrides(base, overrides);
        self.engine.derive_flow(&simulated, period)
    }

    /// Derive the flow for a randomly sampled material and valuation class
    pub fn random_scenario<R>(&self, period: &Period, rng: &mut R) -> FlowResult<RandomScenario>
    where
        R: Rng + ?Sized,
    {
        derive_random_scenario(&self.engine, &self.store, period, rng)
    }

    /// Check that every stored material can be derived
    ///
    /// Returns one `(material_id, error)` pair per material whose keys do not
    /// resolve against the mapping tables.
    pub fn unresolvable_materials(&self, period: &Period) -> Vec<(String, FlowError)> {
        self.store
            .list_materials()
            .iter()
            .filter_map(|material| {
                self.engine
                    .derive_flow(material, period)
                    .err()
                    .map(|err| (material.material_id.clone(), err))
            })
            .collect()
    }
}
