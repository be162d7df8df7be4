//! Material flow example: derive and print the GL flow for every sample material

use material_flow_core::utils::sample::sample_reference_data;
use material_flow_core::{logging, FlowConfig, FlowDerivation, FlowSystem, Period};

fn print_flow(derivation: &FlowDerivation) {
    let graph = &derivation.graph;
    for edge in &graph.edges {
        let to = &graph.nodes[edge.to_index];
        let marker = if to.eligible { "✓" } else { "✗" };
        println!(
            "    {} {} → {} ({})",
            marker, graph.nodes[edge.from_index].label, to.label, edge.weight
        );
    }
    match &derivation.revenue_gl {
        Some(gl) if derivation.revenue_recognized => println!("    Revenue recognised on {}", gl),
        Some(gl) => println!("    Revenue on {} suppressed", gl),
        None => println!("    Material group does not generate revenue"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    println!("📦 Material Flow Core - GL Flow Example\n");

    let config = FlowConfig::from_json_str(
        r#"{"blockedGls": ["400030"], "closedPeriods": ["2025-04"]}"#,
    )?;
    let system = FlowSystem::load(&sample_reference_data(), &config).await?;

    for token in ["2025-03", "2025-04"] {
        let period = Period::parse(token)?;
        println!("📅 Period {}", period);

        for plant in system.store().plants() {
            for material in system.store().materials_by_plant(plant) {
                println!(
                    "  {} - {} (plant {}, valuation class {}, group {})",
                    material.material_id,
                    material.description,
                    material.plant,
                    material.valuation_class,
                    material.material_group
                );
                match system.derive_for(&material.material_id, &period) {
                    Ok(derivation) => print_flow(&derivation),
                    Err(err) => println!("    Cannot determine flow for this material: {}", err),
                }
            }
        }
        println!();
    }

    Ok(())
}
