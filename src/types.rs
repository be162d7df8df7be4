//! Core types and data structures for the material flow system

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GL account types a material can post to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GlAccountType {
    /// Inventory - capitalised stock value (balance sheet)
    Inventory,
    /// Cost of goods sold - expense recognised on consumption or sale
    #[serde(rename = "COGS")]
    Cogs,
    /// Revenue - income recognised on sale
    Revenue,
}

impl fmt::Display for GlAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlAccountType::Inventory => write!(f, "Inventory"),
            GlAccountType::Cogs => write!(f, "COGS"),
            GlAccountType::Revenue => write!(f, "Revenue"),
        }
    }
}

/// Material master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Unique identifier for the material
    pub material_id: String,
    /// Human-readable description
    pub description: String,
    /// Plant code, used to filter materials in selection
    pub plant: String,
    /// Profit center the material's value flows through
    pub profit_center: String,
    /// Valuation class selecting the Inventory/COGS GL pair
    pub valuation_class: String,
    /// Material group selecting the Revenue GL, if any
    pub material_group: String,
    /// Whether the material is subject to tax
    #[serde(default)]
    pub taxable: bool,
    /// Standard price
    #[serde(default)]
    pub price: Option<BigDecimal>,
}

impl Material {
    /// Create a new material without tax or price attributes
    pub fn new(
        material_id: String,
        description: String,
        plant: String,
        profit_center: String,
        valuation_class: String,
        material_group: String,
    ) -> Self {
        Self {
            material_id,
            description,
            plant,
            profit_center,
            valuation_class,
            material_group,
            taxable: false,
            price: None,
        }
    }
}

/// GL account reference-table row
///
/// Inventory and COGS accounts are keyed by `valuation_class`, Revenue accounts
/// by `material_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlAccount {
    /// GL account code
    pub account: String,
    /// Type of account
    #[serde(rename = "type")]
    pub account_type: GlAccountType,
    /// Optional display text
    #[serde(default)]
    pub description: Option<String>,
    /// Join key for Inventory and COGS accounts
    #[serde(default)]
    pub valuation_class: Option<String>,
    /// Join key for Revenue accounts
    #[serde(default)]
    pub material_group: Option<String>,
}

impl GlAccount {
    /// Create an Inventory account for a valuation class
    pub fn inventory(account: &str, valuation_class: &str) -> Self {
        Self::keyed_by_class(account, GlAccountType::Inventory, valuation_class)
    }

    /// Create a COGS account for a valuation class
    pub fn cogs(account: &str, valuation_class: &str) -> Self {
        Self::keyed_by_class(account, GlAccountType::Cogs, valuation_class)
    }

    /// Create a Revenue account for a material group
    pub fn revenue(account: &str, material_group: &str) -> Self {
        Self {
            account: account.to_string(),
            account_type: GlAccountType::Revenue,
            description: None,
            valuation_class: None,
            material_group: Some(material_group.to_string()),
        }
    }

    fn keyed_by_class(account: &str, account_type: GlAccountType, valuation_class: &str) -> Self {
        Self {
            account: account.to_string(),
            account_type,
            description: None,
            valuation_class: Some(valuation_class.to_string()),
            material_group: None,
        }
    }
}

/// Material group reference-table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialGroup {
    pub group: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Groups that never post revenue map to no Revenue GL
    pub revenue_generating: bool,
}

impl MaterialGroup {
    pub fn new(group: &str, revenue_generating: bool) -> Self {
        Self {
            group: group.to_string(),
            description: None,
            revenue_generating,
        }
    }
}

/// Reporting period token of the form `YYYY-MM`
///
/// Ordering is lexicographic on the token, which matches calendar order
/// because year and month are zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(String);

impl Period {
    /// Parse a `YYYY-MM` token
    pub fn parse(token: &str) -> FlowResult<Self> {
        let invalid = || FlowError::InvalidPeriod(token.to_string());

        let (year, month) = token.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::from_year_month(year, month)
    }

    /// Build a period from independently selected year and month
    pub fn from_year_month(year: i32, month: u32) -> FlowResult<Self> {
        if !(0..=9999).contains(&year) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FlowError::InvalidPeriod(format!("{}-{}", year, month)));
        }
        Ok(Self(format!("{:04}-{:02}", year, month)))
    }

    /// The period a calendar date falls in
    pub fn from_date(date: NaiveDate) -> FlowResult<Self> {
        Self::from_year_month(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.0[..4].parse().unwrap_or_default()
    }

    pub fn month(&self) -> u32 {
        self.0[5..].parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Period {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = FlowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.0
    }
}

/// Role of a node in the flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    Material,
    ProfitCenter,
    Inventory,
    #[serde(rename = "COGS")]
    Cogs,
    Revenue,
}

/// Node of a derived flow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub label: String,
    pub role: NodeRole,
    /// False only for a Revenue node whose recognition is suppressed
    pub eligible: bool,
}

impl FlowNode {
    pub fn new(label: String, role: NodeRole, eligible: bool) -> Self {
        Self {
            label,
            role,
            eligible,
        }
    }
}

/// Weighted edge between two nodes, by index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from_index: usize,
    pub to_index: usize,
    pub weight: BigDecimal,
}

impl FlowEdge {
    pub fn new(from_index: usize, to_index: usize, weight: BigDecimal) -> Self {
        Self {
            from_index,
            to_index,
            weight,
        }
    }
}

/// Directed flow of value from a material into its GL accounts
///
/// Node order is fixed: material, profit center, inventory, COGS and
/// optionally revenue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub const MATERIAL: usize = 0;
    pub const PROFIT_CENTER: usize = 1;
    pub const INVENTORY: usize = 2;
    pub const COGS: usize = 3;
    pub const REVENUE: usize = 4;

    /// The revenue node, present only when the material group maps to a Revenue GL
    pub fn revenue_node(&self) -> Option<&FlowNode> {
        self.nodes
            .get(Self::REVENUE)
            .filter(|node| node.role == NodeRole::Revenue)
    }

    /// Sum of the weights leaving a node
    pub fn total_outflow(&self, index: usize) -> BigDecimal {
        self.edges
            .iter()
            .filter(|edge| edge.from_index == index)
            .map(|edge| &edge.weight)
            .sum()
    }

    /// Check the structural invariants of a derived graph
    ///
    /// Every edge references a valid node, weights are positive, the material
    /// feeds only the profit center, and every account node has exactly one
    /// inbound edge from the profit center.
    pub fn validate(&self) -> FlowResult<()> {
        if self.nodes.len() != 4 && self.nodes.len() != 5 {
            return Err(FlowError::Validation(format!(
                "Flow graph must have 4 or 5 nodes, found {}",
                self.nodes.len()
            )));
        }

        const ROLES: [NodeRole; 5] = [
            NodeRole::Material,
            NodeRole::ProfitCenter,
            NodeRole::Inventory,
            NodeRole::Cogs,
            NodeRole::Revenue,
        ];
        for (index, (node, expected)) in self.nodes.iter().zip(ROLES).enumerate() {
            if node.role != expected {
                return Err(FlowError::Validation(format!(
                    "Node {} must have role {:?}, found {:?}",
                    index, expected, node.role
                )));
            }
        }

        for edge in &self.edges {
            if edge.from_index >= self.nodes.len() || edge.to_index >= self.nodes.len() {
                return Err(FlowError::Validation(format!(
                    "Edge {} -> {} references a missing node",
                    edge.from_index, edge.to_index
                )));
            }
            if edge.weight <= BigDecimal::from(0) {
                return Err(FlowError::Validation(format!(
                    "Edge {} -> {} has a non-positive weight",
                    edge.from_index, edge.to_index
                )));
            }
        }

        let out_degree = |index: usize| self.edges.iter().filter(|e| e.from_index == index).count();
        let inbound = |index: usize| -> Vec<usize> {
            self.edges
                .iter()
                .filter(|e| e.to_index == index)
                .map(|e| e.from_index)
                .collect()
        };

        if out_degree(Self::MATERIAL) != 1 || !inbound(Self::MATERIAL).is_empty() {
            return Err(FlowError::Validation(
                "Material node must have exactly one outbound and no inbound edge".to_string(),
            ));
        }
        if inbound(Self::PROFIT_CENTER) != [Self::MATERIAL] {
            return Err(FlowError::Validation(
                "Profit center must be fed by the material node only".to_string(),
            ));
        }
        for index in Self::INVENTORY..self.nodes.len() {
            if inbound(index) != [Self::PROFIT_CENTER] || out_degree(index) != 0 {
                return Err(FlowError::Validation(format!(
                    "Account node {} must have a single inbound edge from the profit center",
                    index
                )));
            }
        }

        Ok(())
    }
}

/// Result of deriving the flow for one material in one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDerivation {
    pub graph: FlowGraph,
    /// Whether revenue may be recognised; false when there is no Revenue GL
    pub revenue_recognized: bool,
    pub inventory_gl: String,
    pub cogs_gl: String,
    pub revenue_gl: Option<String>,
}

/// Which lookup key a mapping error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingKey {
    ValuationClass,
    MaterialGroup,
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKey::ValuationClass => write!(f, "valuation class"),
            MappingKey::MaterialGroup => write!(f, "material group"),
        }
    }
}

/// Errors that can occur while loading reference data or deriving flows
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Mapping ambiguity: {key_kind} '{key}' has {found} {account_type} accounts")]
    MappingAmbiguity {
        key_kind: MappingKey,
        key: String,
        account_type: GlAccountType,
        found: usize,
    },
    #[error("Not found: {key_kind} '{key}'")]
    NotFound { key_kind: MappingKey, key: String },
    #[error("Material not found: {0}")]
    MaterialNotFound(String),
    #[error("Malformed reference data: {0}")]
    MalformedReferenceData(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Reference data source error: {0}")]
    Source(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        let period = Period::parse("2025-03").unwrap();
        assert_eq!(period.as_str(), "2025-03");
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 3);

        assert!(Period::parse("2025-3").is_err());
        assert!(Period::parse("2025-13").is_err());
        assert!(Period::parse("2025-00").is_err());
        assert!(Period::parse("25-03").is_err());
        assert!(Period::parse("2025/03").is_err());
        assert!(Period::parse("+025-03").is_err());
    }

    #[test]
    fn test_period_from_year_month_pads() {
        let period = Period::from_year_month(2025, 4).unwrap();
        assert_eq!(period.to_string(), "2025-04");
        assert!(Period::from_year_month(2025, 0).is_err());
    }

    #[test]
    fn test_period_ordering_is_calendar_order() {
        let march = Period::parse("2025-03").unwrap();
        let october = Period::parse("2025-10").unwrap();
        let january = Period::parse("2026-01").unwrap();
        assert!(march < october);
        assert!(october < january);
    }

    #[test]
    fn test_period_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(Period::from_date(date).unwrap().as_str(), "2025-11");
    }

    #[test]
    fn test_period_serde_rejects_bad_token() {
        let ok: Period = serde_json::from_str("\"2024-12\"").unwrap();
        assert_eq!(ok.as_str(), "2024-12");
        assert!(serde_json::from_str::<Period>("\"2024-1\"").is_err());
    }

    #[test]
    fn test_gl_account_serde_uses_type_field() {
        let json = r#"{"account":"500001","type":"COGS","valuationClass":"7920"}"#;
        let account: GlAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account, GlAccount::cogs("500001", "7920"));
    }

    #[test]
    fn test_graph_validate_rejects_dangling_edge() {
        let graph = FlowGraph {
            nodes: vec![
                FlowNode::new("M".to_string(), NodeRole::Material, true),
                FlowNode::new("PC".to_string(), NodeRole::ProfitCenter, true),
                FlowNode::new("I".to_string(), NodeRole::Inventory, true),
                FlowNode::new("C".to_string(), NodeRole::Cogs, true),
            ],
            edges: vec![
                FlowEdge::new(0, 1, BigDecimal::from(10)),
                FlowEdge::new(1, 2, BigDecimal::from(6)),
                FlowEdge::new(1, 7, BigDecimal::from(4)),
            ],
        };
        assert!(matches!(graph.validate(), Err(FlowError::Validation(_))));
    }

    fn five_node_graph(roles: [NodeRole; 5]) -> FlowGraph {
        FlowGraph {
            nodes: roles
                .iter()
                .enumerate()
                .map(|(i, role)| FlowNode::new(format!("N{}", i), *role, true))
                .collect(),
            edges: vec![
                FlowEdge::new(0, 1, BigDecimal::from(10)),
                FlowEdge::new(1, 2, BigDecimal::from(6)),
                FlowEdge::new(1, 3, BigDecimal::from(4)),
                FlowEdge::new(1, 4, BigDecimal::from(8)),
            ],
        }
    }

    #[test]
    fn test_graph_validate_checks_node_roles() {
        let ordered = five_node_graph([
            NodeRole::Material,
            NodeRole::ProfitCenter,
            NodeRole::Inventory,
            NodeRole::Cogs,
            NodeRole::Revenue,
        ]);
        assert!(ordered.validate().is_ok());

        // Inventory and COGS swapped
        let swapped = five_node_graph([
            NodeRole::Material,
            NodeRole::ProfitCenter,
            NodeRole::Cogs,
            NodeRole::Inventory,
            NodeRole::Revenue,
        ]);
        assert!(matches!(swapped.validate(), Err(FlowError::Validation(_))));

        // Fifth node is not a revenue account
        let no_revenue = five_node_graph([
            NodeRole::Material,
            NodeRole::ProfitCenter,
            NodeRole::Inventory,
            NodeRole::Cogs,
            NodeRole::Cogs,
        ]);
        assert!(matches!(no_revenue.validate(), Err(FlowError::Validation(_))));
        assert!(no_revenue.revenue_node().is_none());
    }
}
