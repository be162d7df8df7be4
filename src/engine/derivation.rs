//! Deterministic derivation of a material's GL flow graph

use crate::eligibility::EligibilityPolicy;
use crate::engine::weights::FlowWeights;
use crate::mapping::GlMapping;
use crate::types::*;

/// Pure flow derivation over injected mapping tables and eligibility rules
///
/// Holds no mutable state; any number of derivations may run concurrently
/// against one engine.
#[derive(Debug, Clone)]
pub struct FlowEngine {
    mapping: GlMapping,
    policy: EligibilityPolicy,
    weights: FlowWeights,
}

impl FlowEngine {
    /// Create an engine using the default edge weights
    pub fn new(mapping: GlMapping, policy: EligibilityPolicy) -> Self {
        Self {
            mapping,
            policy,
            weights: FlowWeights::default(),
        }
    }

    /// Replace the edge weights
    pub fn with_weights(mut self, weights: FlowWeights) -> FlowResult<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    /// Replace the eligibility policy as a whole
    pub fn with_policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn mapping(&self) -> &GlMapping {
        &self.mapping
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    pub fn weights(&self) -> &FlowWeights {
        &self.weights
    }

    /// Derive the flow graph for a material in a period
    ///
    /// All lookups happen before any node is built, so a failing lookup never
    /// yields a partial graph. A Revenue node is added whenever the material
    /// group maps to a Revenue GL; ineligibility only clears its `eligible`
    /// flag.
    pub fn derive_flow(&self, material: &Material, period: &Period) -> FlowResult<FlowDerivation> {
        let inventory_gl = self.mapping.inventory_gl_for(&material.valuation_class)?;
        let cogs_gl = self.mapping.cogs_gl_for(&material.valuation_class)?;
        let revenue_gl = self.mapping.revenue_gl_for(&material.material_group)?;
        let eligible = self.policy.is_revenue_eligible(revenue_gl, period);

        let mut graph = FlowGraph {
            nodes: vec![
                FlowNode::new(material.material_id.clone(), NodeRole::Material, true),
                FlowNode::new(material.profit_center.clone(), NodeRole::ProfitCenter, true),
                FlowNode::new(format!("Inventory:{}", inventory_gl), NodeRole::Inventory, true),
                FlowNode::new(format!("COGS:{}", cogs_gl), NodeRole::Cogs, true),
            ],
            edges: vec![
                FlowEdge::new(
                    FlowGraph::MATERIAL,
                    FlowGraph::PROFIT_CENTER,
                    self.weights.material_to_profit_center.clone(),
                ),
                FlowEdge::new(
                    FlowGraph::PROFIT_CENTER,
                    FlowGraph::INVENTORY,
                    self.weights.to_inventory.clone(),
                ),
                FlowEdge::new(
                    FlowGraph::PROFIT_CENTER,
                    FlowGraph::COGS,
                    self.weights.to_cogs.clone(),
                ),
            ],
        };

        if let Some(revenue_gl) = revenue_gl {
            graph.nodes.push(FlowNode::new(
                format!("Revenue:{}", revenue_gl),
                NodeRole::Revenue,
                eligible,
            ));
            graph.edges.push(FlowEdge::new(
                FlowGraph::PROFIT_CENTER,
                FlowGraph::REVENUE,
                self.weights.to_revenue.clone(),
            ));

            if !eligible {
                tracing::info!(
                    material = %material.material_id,
                    revenue_gl,
                    %period,
                    blocked = self.policy.is_blocked(revenue_gl),
                    period_closed = self.policy.is_period_closed(period),
                    "Revenue recognition suppressed"
                );
            }
        }

        tracing::debug!(
            material = %material.material_id,
            %period,
            nodes = graph.nodes.len(),
            revenue_recognized = eligible,
            "Derived GL flow"
        );

        Ok(FlowDerivation {
            graph,
            revenue_recognized: eligible,
            inventory_gl: inventory_gl.to_string(),
            cogs_gl: cogs_gl.to_string(),
            revenue_gl: revenue_gl.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingBuilder;
    use bigdecimal::BigDecimal;

    fn engine(policy: EligibilityPolicy) -> FlowEngine {
        let accounts = vec![
            GlAccount::inventory("300001", "7920"),
            GlAccount::cogs("500001", "7920"),
            GlAccount::inventory("300003", "7960"),
            GlAccount::cogs("500003", "7960"),
            GlAccount::revenue("400010", "MG01"),
        ];
        let mapping = MappingBuilder::new(&accounts)
            .non_revenue_group("MG02")
            .build()
            .unwrap();
        FlowEngine::new(mapping, policy)
    }

    fn material(valuation_class: &str, material_group: &str) -> Material {
        Material::new(
            "M-10001".to_string(),
            "Steel Rod".to_string(),
            "P001".to_string(),
            "PC1000".to_string(),
            valuation_class.to_string(),
            material_group.to_string(),
        )
    }

    fn period(token: &str) -> Period {
        Period::parse(token).unwrap()
    }

    #[test]
    fn test_revenue_generating_material_has_five_nodes() {
        let derivation = engine(EligibilityPolicy::open())
            .derive_flow(&material("7920", "MG01"), &period("2025-03"))
            .unwrap();

        let labels: Vec<&str> = derivation
            .graph
            .nodes
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["M-10001", "PC1000", "Inventory:300001", "COGS:500001", "Revenue:400010"]
        );
        assert!(derivation.revenue_recognized);
        assert_eq!(
            derivation.graph.edges[3],
            FlowEdge::new(1, 4, BigDecimal::from(8))
        );
        assert!(derivation.graph.validate().is_ok());
    }

    #[test]
    fn test_fixed_edges() {
        let derivation = engine(EligibilityPolicy::open())
            .derive_flow(&material("7960", "MG02"), &period("2025-03"))
            .unwrap();

        assert_eq!(
            derivation.graph.edges,
            vec![
                FlowEdge::new(0, 1, BigDecimal::from(10)),
                FlowEdge::new(1, 2, BigDecimal::from(6)),
                FlowEdge::new(1, 3, BigDecimal::from(4)),
            ]
        );
        assert_eq!(derivation.graph.nodes.len(), 4);
        assert!(!derivation.revenue_recognized);
        assert!(derivation.graph.revenue_node().is_none());
    }

    #[test]
    fn test_blocked_revenue_keeps_topology() {
        let policy = EligibilityPolicy::new(["400010"], Vec::new());
        let derivation = engine(policy)
            .derive_flow(&material("7920", "MG01"), &period("2025-03"))
            .unwrap();

        assert_eq!(derivation.graph.nodes.len(), 5);
        assert_eq!(derivation.graph.edges.len(), 4);
        assert!(!derivation.revenue_recognized);
        assert!(!derivation.graph.revenue_node().unwrap().eligible);
    }

    #[test]
    fn test_unknown_valuation_class_fails_without_graph() {
        let result = engine(EligibilityPolicy::open())
            .derive_flow(&material("0000", "MG01"), &period("2025-03"));
        assert!(matches!(
            result,
            Err(FlowError::NotFound {
                key_kind: MappingKey::ValuationClass,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_material_group_fails() {
        let result = engine(EligibilityPolicy::open())
            .derive_flow(&material("7920", "MG77"), &period("2025-03"));
        assert!(matches!(
            result,
            Err(FlowError::NotFound {
                key_kind: MappingKey::MaterialGroup,
                ..
            })
        ));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let engine = engine(EligibilityPolicy::open());
        let material = material("7920", "MG01");
        let first = engine.derive_flow(&material, &period("2025-03")).unwrap();
        let second = engine.derive_flow(&material, &period("2025-03")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights() {
        let weights = FlowWeights::new(
            BigDecimal::from(100),
            BigDecimal::from(70),
            BigDecimal::from(30),
            BigDecimal::from(95),
        )
        .unwrap();
        let derivation = engine(EligibilityPolicy::open())
            .with_weights(weights)
            .unwrap()
            .derive_flow(&material("7920", "MG01"), &period("2025-03"))
            .unwrap();

        assert_eq!(
            derivation.graph.total_outflow(FlowGraph::PROFIT_CENTER),
            BigDecimal::from(195)
        );
    }

    #[test]
    fn test_replacing_policy_changes_only_eligibility() {
        let open_engine = engine(EligibilityPolicy::open());
        let material = material("7920", "MG01");
        let march = period("2025-03");
        let before = open_engine.derive_flow(&material, &march).unwrap();

        // Swap in a policy that closes the period
        let closed_engine = open_engine.with_policy(EligibilityPolicy::new(
            Vec::<String>::new(),
            [march.clone()],
        ));
        assert!(closed_engine.policy().is_period_closed(&march));
        let after = closed_engine.derive_flow(&material, &march).unwrap();

        assert!(before.revenue_recognized);
        assert!(!after.revenue_recognized);
        assert_eq!(before.graph.edges, after.graph.edges);
    }
}
