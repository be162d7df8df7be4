//! What-if example: override profit center and valuation class, then sample random scenarios

use material_flow_core::utils::sample::sample_reference_data;
use material_flow_core::{logging, FlowConfig, FlowSystem, MaterialOverrides, Period};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    println!("🔮 Material Flow Core - What-if Simulator\n");

    let system = FlowSystem::load(&sample_reference_data(), &FlowConfig::default()).await?;
    let period = Period::from_year_month(2025, 3)?;

    let base = system.derive_for("M-10001", &period)?;
    println!(
        "  Stored:    {} → {} / {}",
        base.graph.nodes[1].label, base.inventory_gl, base.cogs_gl
    );

    let overrides = MaterialOverrides::new()
        .profit_center("PC9999")
        .valuation_class("7960");
    let simulated = system.simulate("M-10001", &overrides, &period)?;
    println!(
        "  Simulated: {} → {} / {}",
        simulated.graph.nodes[1].label, simulated.inventory_gl, simulated.cogs_gl
    );

    let unknown = MaterialOverrides::new().valuation_class("9999");
    if let Err(err) = system.simulate("M-10001", &unknown, &period) {
        println!("  Unmapped class 9999: {}", err);
    }

    println!("\n🎲 Random scenarios");
    let mut rng = StdRng::seed_from_u64(2025);
    for _ in 0..3 {
        let scenario = system.random_scenario(&period, &mut rng)?;
        println!(
            "  {} with valuation class {}: {} nodes, revenue recognised: {}",
            scenario.material.material_id,
            scenario.material.valuation_class,
            scenario.derivation.graph.nodes.len(),
            scenario.derivation.revenue_recognized
        );
    }

    Ok(())
}
