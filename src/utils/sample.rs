//! Sample reference data for demos and tests

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::memory_source::ReferenceDataSet;

/// A small plant-spanning data set: three materials, three valuation classes,
/// and one material group that does not generate revenue
pub fn sample_reference_data() -> ReferenceDataSet {
    let mut steel_rod = Material::new(
        "M-10001".to_string(),
        "Steel Rod".to_string(),
        "P001".to_string(),
        "PC1000".to_string(),
        "7920".to_string(),
        "MG01".to_string(),
    );
    steel_rod.taxable = true;
    steel_rod.price = Some(BigDecimal::from(120));

    let plastic_cap = Material::new(
        "M-20002".to_string(),
        "Plastic Cap".to_string(),
        "P002".to_string(),
        "PC2000".to_string(),
        "7940".to_string(),
        "MG02".to_string(),
    );

    let mut aluminum_pipe = Material::new(
        "M-30003".to_string(),
        "Aluminum Pipe".to_string(),
        "P003".to_string(),
        "PC3000".to_string(),
        "7960".to_string(),
        "MG03".to_string(),
    );
    aluminum_pipe.taxable = true;
    aluminum_pipe.price = Some(BigDecimal::from(85));

    ReferenceDataSet::new()
        .with_material(steel_rod)
        .with_material(plastic_cap)
        .with_material(aluminum_pipe)
        .with_gl_account(GlAccount::inventory("300001", "7920"))
        .with_gl_account(GlAccount::inventory("300002", "7940"))
        .with_gl_account(GlAccount::inventory("300003", "7960"))
        .with_gl_account(GlAccount::cogs("500001", "7920"))
        .with_gl_account(GlAccount::cogs("500002", "7940"))
        .with_gl_account(GlAccount::cogs("500003", "7960"))
        .with_gl_account(GlAccount::revenue("400010", "MG01"))
        .with_gl_account(GlAccount::revenue("400030", "MG03"))
        .with_material_group(MaterialGroup::new("MG01", true))
        .with_material_group(MaterialGroup::new("MG02", false))
        .with_material_group(MaterialGroup::new("MG03", true))
}
