//! Traits for reference data ingestion and extensibility

use async_trait::async_trait;

use crate::types::*;
use crate::utils::validation::*;

/// Source of static master data
///
/// This trait allows the flow engine to be fed from any backend (JSON files,
/// a database export, in-memory fixtures, etc.). Records are read once at
/// startup by [`crate::MasterDataStore::load`].
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Load all material master records
    async fn load_materials(&self) -> FlowResult<Vec<Material>>;

    /// Load all GL account records, in reference-table order
    async fn load_gl_accounts(&self) -> FlowResult<Vec<GlAccount>>;

    /// Load the material group table
    async fn load_material_groups(&self) -> FlowResult<Vec<MaterialGroup>>;
}

/// Trait for implementing custom reference data shape rules
pub trait ReferenceDataValidator: Send + Sync {
    /// Validate a single material record
    fn validate_material(&self, material: &Material) -> FlowResult<()>;

    /// Validate a single GL account record
    fn validate_gl_account(&self, account: &GlAccount) -> FlowResult<()>;

    /// Validate a single material group record
    fn validate_material_group(&self, group: &MaterialGroup) -> FlowResult<()>;
}

/// Default validator: non-empty codes and join keys matching the account type
pub struct DefaultReferenceDataValidator;

impl ReferenceDataValidator for DefaultReferenceDataValidator {
    fn validate_material(&self, material: &Material) -> FlowResult<()> {
        validate_code("materialId", &material.material_id)?;
        validate_code("plant", &material.plant)?;
        validate_code("profitCenter", &material.profit_center)?;
        validate_code("valuationClass", &material.valuation_class)?;
        validate_code("materialGroup", &material.material_group)?;
        Ok(())
    }

    fn validate_gl_account(&self, account: &GlAccount) -> FlowResult<()> {
        validate_code("account", &account.account)?;
        validate_join_key(account)
    }

    fn validate_material_group(&self, group: &MaterialGroup) -> FlowResult<()> {
        validate_code("group", &group.group)
    }
}
