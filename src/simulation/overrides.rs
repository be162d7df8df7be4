//! Merging what-if overrides into a material value

use serde::{Deserialize, Serialize};

use crate::types::*;

/// User-entered substitutions for a material's profit center and valuation class
///
/// A blank entry means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOverrides {
    #[serde(default)]
    pub profit_center: Option<String>,
    #[serde(default)]
    pub valuation_class: Option<String>,
}

impl MaterialOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profit_center(mut self, profit_center: impl Into<String>) -> Self {
        self.profit_center = Some(profit_center.into());
        self
    }

    pub fn valuation_class(mut self, valuation_class: impl Into<String>) -> Self {
        self.valuation_class = Some(valuation_class.into());
        self
    }

    /// True when no field would change the base material
    pub fn is_empty(&self) -> bool {
        non_blank(&self.profit_center).is_none() && non_blank(&self.valuation_class).is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Produce a simulated material; the stored original is left untouched
pub fn apply_overrides(base: &Material, overrides: &MaterialOverrides) -> Material {
    let mut simulated = base.clone();
    if let Some(profit_center) = non_blank(&overrides.profit_center) {
        simulated.profit_center = profit_center.to_string();
    }
    if let Some(valuation_class) = non_blank(&overrides.valuation_class) {
        simulated.valuation_class = valuation_class.to_string();
    }
    simulated
}
