//! Runtime configuration: eligibility rules and optional flow weights

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::eligibility::EligibilityPolicy;
use crate::engine::FlowWeights;
use crate::types::*;

/// Flow configuration, usually read from a JSON file at startup
///
/// ```json
/// {
///   "blockedGls": ["400099"],
///   "closedPeriods": ["2025-01", "2025-02"],
///   "nonRevenueGroups": ["MG02"],
///   "weights": {"materialToProfitCenter": "10", "toInventory": "6", "toCogs": "4", "toRevenue": "8"}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig {
    #[serde(default)]
    pub blocked_gls: Vec<String>,
    /// Period tokens, validated when the policy is built
    #[serde(default)]
    pub closed_periods: Vec<String>,
    /// Material groups that never generate revenue, on top of the reference table
    #[serde(default)]
    pub non_revenue_groups: Vec<String>,
    #[serde(default)]
    pub weights: Option<FlowWeights>,
}

impl FlowConfig {
    /// Parse configuration from JSON text
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        serde_json::from_str(json).map_err(|e| FlowError::Config(e.to_string()))
    }

    /// Read configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FlowError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Build the immutable eligibility policy
    pub fn eligibility_policy(&self) -> FlowResult<EligibilityPolicy> {
        let closed_periods = self
            .closed_periods
            .iter()
            .map(|token| Period::parse(token))
            .collect::<FlowResult<Vec<_>>>()?;
        Ok(EligibilityPolicy::new(
            self.blocked_gls.iter().cloned(),
            closed_periods,
        ))
    }

    /// Configured weights, or the default allocation
    pub fn weights(&self) -> FlowResult<FlowWeights> {
        let weights = self.weights.clone().unwrap_or_default();
        weights.validate()?;
        Ok(weights)
    }
}
