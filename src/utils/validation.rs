//! Validation utilities

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::types::*;

/// Validate that a flow weight is positive
pub fn validate_positive_weight(name: &str, weight: &BigDecimal) -> FlowResult<()> {
    if *weight <= BigDecimal::from(0) {
        Err(FlowError::Validation(format!(
            "Flow weight '{}' must be positive, got {}",
            name, weight
        )))
    } else {
        Ok(())
    }
}

/// Validate that a reference-data code is usable as a lookup key
pub fn validate_code(field: &str, value: &str) -> FlowResult<()> {
    if value.trim().is_empty() {
        return Err(FlowError::MalformedReferenceData(format!(
            "'{}' cannot be empty",
            field
        )));
    }

    if value.len() > 40 {
        return Err(FlowError::MalformedReferenceData(format!(
            "'{}' cannot exceed 40 characters: {}",
            field, value
        )));
    }

    if value != value.trim() {
        return Err(FlowError::MalformedReferenceData(format!(
            "'{}' has surrounding whitespace: '{}'",
            field, value
        )));
    }

    Ok(())
}

/// Validate that a GL account carries the join key its type requires, and only that one
pub fn validate_join_key(account: &GlAccount) -> FlowResult<()> {
    let (required, required_field, forbidden, forbidden_field) = match account.account_type {
        GlAccountType::Inventory | GlAccountType::Cogs => (
            &account.valuation_class,
            "valuationClass",
            &account.material_group,
            "materialGroup",
        ),
        GlAccountType::Revenue => (
            &account.material_group,
            "materialGroup",
            &account.valuation_class,
            "valuationClass",
        ),
    };

    match required {
        Some(key) => validate_code(required_field, key)?,
        None => {
            return Err(FlowError::MalformedReferenceData(format!(
                "{} account '{}' is missing '{}'",
                account.account_type, account.account, required_field
            )))
        }
    }

    if forbidden.is_some() {
        return Err(FlowError::MalformedReferenceData(format!(
            "{} account '{}' must not carry '{}'",
            account.account_type, account.account, forbidden_field
        )));
    }

    Ok(())
}

/// Validate that a key appears at most once in a table
pub fn validate_unique<'a, I>(table: &str, keys: I) -> FlowResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(FlowError::MalformedReferenceData(format!(
                "Duplicate key '{}' in {} table",
                key, table
            )));
        }
    }
    Ok(())
}
