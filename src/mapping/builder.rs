//! Mapping builder: valuation class and material group join keys to GL accounts

use std::collections::{BTreeMap, HashMap};

use crate::master_data::MasterDataStore;
use crate::types::*;

/// Resolved GL lookup tables
///
/// Every valuation class maps to exactly one Inventory and one COGS account,
/// and every known material group maps to at most one Revenue account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlMapping {
    accounts_by_type: BTreeMap<GlAccountType, Vec<String>>,
    inventory: HashMap<String, String>,
    cogs: HashMap<String, String>,
    revenue: HashMap<String, Option<String>>,
}

impl GlMapping {
    /// Build the mapping from a loaded master data store
    ///
    /// `non_revenue_groups` are declared non-revenue on top of the store's
    /// material group table.
    pub fn from_store<S: AsRef<str>>(
        store: &MasterDataStore,
        non_revenue_groups: &[S],
    ) -> FlowResult<Self> {
        non_revenue_groups
            .iter()
            .fold(
                MappingBuilder::new(store.list_gl_accounts())
                    .with_material_groups(store.list_material_groups()),
                |builder, group| builder.non_revenue_group(group.as_ref()),
            )
            .build()
    }

    /// All accounts of one type, in reference-table order
    pub fn gl_by_type(&self, account_type: GlAccountType) -> &[String] {
        self.accounts_by_type
            .get(&account_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn inventory_gl_for(&self, valuation_class: &str) -> FlowResult<&str> {
        self.inventory
            .get(valuation_class)
            .map(String::as_str)
            .ok_or_else(|| not_found(MappingKey::ValuationClass, valuation_class))
    }

    pub fn cogs_gl_for(&self, valuation_class: &str) -> FlowResult<&str> {
        self.cogs
            .get(valuation_class)
            .map(String::as_str)
            .ok_or_else(|| not_found(MappingKey::ValuationClass, valuation_class))
    }

    /// Revenue account for a material group; `None` for non-revenue groups
    pub fn revenue_gl_for(&self, material_group: &str) -> FlowResult<Option<&str>> {
        self.revenue
            .get(material_group)
            .map(Option::as_deref)
            .ok_or_else(|| not_found(MappingKey::MaterialGroup, material_group))
    }

    /// Known valuation classes, sorted
    pub fn valuation_classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.inventory.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }

    /// Known material groups, sorted
    pub fn material_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = self.revenue.keys().map(String::as_str).collect();
        groups.sort_unstable();
        groups
    }
}

fn not_found(key_kind: MappingKey, key: &str) -> FlowError {
    FlowError::NotFound {
        key_kind,
        key: key.to_string(),
    }
}

fn ambiguity(
    key_kind: MappingKey,
    key: &str,
    account_type: GlAccountType,
    found: usize,
) -> FlowError {
    tracing::warn!(
        %key_kind,
        key,
        %account_type,
        found,
        "GL mapping is ambiguous"
    );
    FlowError::MappingAmbiguity {
        key_kind,
        key: key.to_string(),
        account_type,
        found,
    }
}

/// Builder deriving [`GlMapping`] from the GL account table
///
/// Never picks an arbitrary candidate: a key with zero or several accounts
/// of the required type fails the whole build.
pub struct MappingBuilder<'a> {
    accounts: &'a [GlAccount],
    group_declarations: BTreeMap<String, bool>,
}

impl<'a> MappingBuilder<'a> {
    /// Create a builder over a GL account table
    pub fn new(accounts: &'a [GlAccount]) -> Self {
        Self {
            accounts,
            group_declarations: BTreeMap::new(),
        }
    }

    /// Declare material groups and whether each one generates revenue
    pub fn with_material_groups(mut self, groups: &[MaterialGroup]) -> Self {
        for group in groups {
            self.group_declarations
                .insert(group.group.clone(), group.revenue_generating);
        }
        self
    }

    /// Mark a material group as non-revenue-generating
    pub fn non_revenue_group(mut self, group: &str) -> Self {
        self.group_declarations.insert(group.to_string(), false);
        self
    }

    /// Build the lookup tables
    pub fn build(self) -> FlowResult<GlMapping> {
        let mut accounts_by_type: BTreeMap<GlAccountType, Vec<String>> = BTreeMap::new();
        let mut by_class: BTreeMap<&str, (Vec<&str>, Vec<&str>)> = BTreeMap::new();
        let mut by_group: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for account in self.accounts {
            accounts_by_type
                .entry(account.account_type)
                .or_default()
                .push(account.account.clone());

            match account.account_type {
                GlAccountType::Inventory | GlAccountType::Cogs => {
                    let class = account.valuation_class.as_deref().ok_or_else(|| {
                        FlowError::MalformedReferenceData(format!(
                            "{} account '{}' has no valuation class",
                            account.account_type, account.account
                        ))
                    })?;
                    let (inventory, cogs) = by_class.entry(class).or_default();
                    if account.account_type == GlAccountType::Inventory {
                        inventory.push(&account.account);
                    } else {
                        cogs.push(&account.account);
                    }
                }
                GlAccountType::Revenue => {
                    let group = account.material_group.as_deref().ok_or_else(|| {
                        FlowError::MalformedReferenceData(format!(
                            "Revenue account '{}' has no material group",
                            account.account
                        ))
                    })?;
                    by_group.entry(group).or_default().push(&account.account);
                }
            }
        }

        let mut inventory = HashMap::new();
        let mut cogs = HashMap::new();
        for (class, (inventory_candidates, cogs_candidates)) in &by_class {
            let inventory_gl = single_candidate(
                MappingKey::ValuationClass,
                class,
                GlAccountType::Inventory,
                inventory_candidates,
            )?;
            let cogs_gl = single_candidate(
                MappingKey::ValuationClass,
                class,
                GlAccountType::Cogs,
                cogs_candidates,
            )?;
            inventory.insert(class.to_string(), inventory_gl.to_string());
            cogs.insert(class.to_string(), cogs_gl.to_string());
        }

        let mut revenue = HashMap::new();
        for (group, &revenue_generating) in &self.group_declarations {
            let candidates = by_group.get(group.as_str()).map(Vec::as_slice).unwrap_or_default();
            if revenue_generating {
                let revenue_gl = single_candidate(
                    MappingKey::MaterialGroup,
                    group,
                    GlAccountType::Revenue,
                    candidates,
                )?;
                revenue.insert(group.clone(), Some(revenue_gl.to_string()));
            } else if candidates.is_empty() {
                revenue.insert(group.clone(), None);
            } else {
                return Err(ambiguity(
                    MappingKey::MaterialGroup,
                    group,
                    GlAccountType::Revenue,
                    candidates.len(),
                ));
            }
        }
        for (group, candidates) in &by_group {
            if self.group_declarations.contains_key(*group) {
                continue;
            }
            let revenue_gl = single_candidate(
                MappingKey::MaterialGroup,
                group,
                GlAccountType::Revenue,
                candidates,
            )?;
            revenue.insert(group.to_string(), Some(revenue_gl.to_string()));
        }

        tracing::debug!(
            valuation_classes = inventory.len(),
            material_groups = revenue.len(),
            "Built GL mapping"
        );

        Ok(GlMapping {
            accounts_by_type,
            inventory,
            cogs,
            revenue,
        })
    }
}

fn single_candidate<'c>(
    key_kind: MappingKey,
    key: &str,
    account_type: GlAccountType,
    candidates: &[&'c str],
) -> FlowResult<&'c str> {
    match candidates {
        [only] => Ok(*only),
        _ => Err(ambiguity(key_kind, key, account_type, candidates.len())),
    }
}
