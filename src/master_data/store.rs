//! Loading and querying the reference tables

use std::collections::BTreeSet;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_unique;

/// Immutable in-memory tables of materials, GL accounts and material groups
///
/// Built once at startup; every record has passed shape validation, so the
/// rest of the system can assume well-formed data.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterDataStore {
    materials: Vec<Material>,
    gl_accounts: Vec<GlAccount>,
    material_groups: Vec<MaterialGroup>,
}

impl MasterDataStore {
    /// Load and validate reference data with the default validator
    pub async fn load<S>(source: &S) -> FlowResult<Self>
    where
        S: ReferenceDataSource + ?Sized,
    {
        Self::load_with_validator(source, &DefaultReferenceDataValidator).await
    }

    /// Load and validate reference data with a custom validator
    pub async fn load_with_validator<S>(
        source: &S,
        validator: &dyn ReferenceDataValidator,
    ) -> FlowResult<Self>
    where
        S: ReferenceDataSource + ?Sized,
    {
        let materials = source.load_materials().await?;
        let gl_accounts = source.load_gl_accounts().await?;
        let material_groups = source.load_material_groups().await?;

        Self::from_records(materials, gl_accounts, material_groups, validator)
    }

    /// Build a store from records already in memory
    pub fn from_records(
        materials: Vec<Material>,
        gl_accounts: Vec<GlAccount>,
        material_groups: Vec<MaterialGroup>,
        validator: &dyn ReferenceDataValidator,
    ) -> FlowResult<Self> {
        for material in &materials {
            validator.validate_material(material)?;
        }
        for account in &gl_accounts {
            validator.validate_gl_account(account)?;
        }
        for group in &material_groups {
            validator.validate_material_group(group)?;
        }

        validate_unique("material", materials.iter().map(|m| m.material_id.as_str()))?;
        validate_unique("GL account", gl_accounts.iter().map(|a| a.account.as_str()))?;
        validate_unique(
            "material group",
            material_groups.iter().map(|g| g.group.as_str()),
        )?;

        tracing::info!(
            materials = materials.len(),
            gl_accounts = gl_accounts.len(),
            material_groups = material_groups.len(),
            "Loaded master data"
        );

        Ok(Self {
            materials,
            gl_accounts,
            material_groups,
        })
    }

    /// All materials, in source order
    pub fn list_materials(&self) -> &[Material] {
        &self.materials
    }

    /// All GL accounts, in source order
    pub fn list_gl_accounts(&self) -> &[GlAccount] {
        &self.gl_accounts
    }

    pub fn list_material_groups(&self) -> &[MaterialGroup] {
        &self.material_groups
    }

    /// Get a material by ID
    pub fn get_material(&self, material_id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.material_id == material_id)
    }

    /// Get a material by ID, returning an error if not found
    pub fn find_material(&self, material_id: &str) -> FlowResult<&Material> {
        self.get_material(material_id)
            .ok_or_else(|| FlowError::MaterialNotFound(material_id.to_string()))
    }

    /// Materials belonging to a plant
    pub fn materials_by_plant(&self, plant: &str) -> Vec<&Material> {
        self.materials.iter().filter(|m| m.plant == plant).collect()
    }

    /// Distinct plant codes, sorted
    pub fn plants(&self) -> Vec<&str> {
        self.materials
            .iter()
            .map(|m| m.plant.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_source::ReferenceDataSet;
    use crate::utils::sample::sample_reference_data;

    #[tokio::test]
    async fn test_load_sample_data() {
        let store = MasterDataStore::load(&sample_reference_data()).await.unwrap();

        assert_eq!(store.list_materials().len(), 3);
        assert_eq!(store.list_gl_accounts().len(), 8);
        assert_eq!(store.plants(), vec!["P001", "P002", "P003"]);

        let rod = store.find_material("M-10001").unwrap();
        assert_eq!(rod.description, "Steel Rod");
        assert_eq!(store.materials_by_plant("P002").len(), 1);
        assert!(store.materials_by_plant("P999").is_empty());
    }

    #[tokio::test]
    async fn test_unknown_material() {
        let store = MasterDataStore::load(&sample_reference_data()).await.unwrap();
        assert!(matches!(
            store.find_material("M-99999"),
            Err(FlowError::MaterialNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_gl_account_is_fatal() {
        let data = sample_reference_data().with_gl_account(GlAccount::inventory("300001", "7999"));
        let result = MasterDataStore::load(&data).await;
        assert!(matches!(result, Err(FlowError::MalformedReferenceData(_))));
    }

    #[tokio::test]
    async fn test_malformed_record_is_fatal() {
        let mut account = GlAccount::revenue("400099", "MG09");
        account.material_group = None;
        let data = ReferenceDataSet::new().with_gl_account(account);
        assert!(MasterDataStore::load(&data).await.is_err());
    }
}
