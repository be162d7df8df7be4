//! In-memory reference data source, also loadable from JSON

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::traits::*;
use crate::types::*;

/// In-memory reference data for tests, demos and JSON-fed deployments
///
/// The JSON shape is
/// `{"materials": [...], "glAccounts": [...], "materialGroups": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDataSet {
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub gl_accounts: Vec<GlAccount>,
    #[serde(default)]
    pub material_groups: Vec<MaterialGroup>,
}

impl ReferenceDataSet {
    /// Create an empty reference data set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a reference data set from JSON text
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FlowError::MalformedReferenceData(format!("Invalid JSON: {}", e)))
    }

    /// Read a reference data set from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FlowError::Source(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    pub fn with_gl_account(mut self, account: GlAccount) -> Self {
        self.gl_accounts.push(account);
        self
    }

    pub fn with_material_group(mut self, group: MaterialGroup) -> Self {
        self.material_groups.push(group);
        self
    }
}

#[async_trait]
impl ReferenceDataSource for ReferenceDataSet {
    async fn load_materials(&self) -> FlowResult<Vec<Material>> {
        Ok(self.materials.clone())
    }

    async fn load_gl_accounts(&self) -> FlowResult<Vec<GlAccount>> {
        Ok(self.gl_accounts.clone())
    }

    async fn load_material_groups(&self) -> FlowResult<Vec<MaterialGroup>> {
        Ok(self.material_groups.clone())
    }
}
