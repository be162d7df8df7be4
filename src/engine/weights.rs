//! Edge weights applied to a derived flow graph

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validation::validate_positive_weight;

/// Weights of the four possible edges of a flow graph
///
/// The default is the illustrative allocation of a unit inbound flow of 10:
/// 6 capitalised to inventory, 4 recognised as COGS, and 8 to revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowWeights {
    pub material_to_profit_center: BigDecimal,
    pub to_inventory: BigDecimal,
    pub to_cogs: BigDecimal,
    pub to_revenue: BigDecimal,
}

impl FlowWeights {
    /// Create weights from posted amounts, all of which must be positive
    pub fn new(
        material_to_profit_center: BigDecimal,
        to_inventory: BigDecimal,
        to_cogs: BigDecimal,
        to_revenue: BigDecimal,
    ) -> FlowResult<Self> {
        let weights = Self {
            material_to_profit_center,
            to_inventory,
            to_cogs,
            to_revenue,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> FlowResult<()> {
        validate_positive_weight("material_to_profit_center", &self.material_to_profit_center)?;
        validate_positive_weight("to_inventory", &self.to_inventory)?;
        validate_positive_weight("to_cogs", &self.to_cogs)?;
        validate_positive_weight("to_revenue", &self.to_revenue)
    }
}

impl Default for FlowWeights {
    fn default() -> Self {
        Self {
            material_to_profit_center: BigDecimal::from(10),
            to_inventory: BigDecimal::from(6),
            to_cogs: BigDecimal::from(4),
            to_revenue: BigDecimal::from(8),
        }
    }
}
