//! Design a TMD for the reference 808 mm steel tool holder.
//!
//! Run with `cargo run --example tool_holder_tmd [seed]`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tmd_bees::analysis::{compare_classical_vs_optimized, compare_with_without_tmd};
use tmd_bees::optimization::{optimize_tmd_parameters_with_callbacks, ProgressUpdate};
use tmd_bees::{CuttingToolModel, TmdSearchConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 42,
    };

    let tool = CuttingToolModel::default();
    let sdof = tool.to_single_dof_model(0.05);
    println!(
        "Tool holder: {:.0} mm x {:.0} mm {}",
        tool.length * 1e3,
        tool.diameter * 1e3,
        tool.material.name
    );
    for (mode, f) in tool.natural_frequencies(5).iter().enumerate() {
        println!("  Mode {}: {:.1} Hz", mode + 1, f);
    }
    println!(
        "SDOF host: m1={:.3} kg, k1={:.1} N/m, c1={:.3} N·s/m, w1={:.2} rad/s\n",
        sdof.mass, sdof.stiffness, sdof.damping, sdof.natural_frequency
    );

    let config = TmdSearchConfig::for_sdof(&sdof);
    let mut rng = StdRng::seed_from_u64(seed);
    let result = optimize_tmd_parameters_with_callbacks(
        sdof.mass,
        sdof.natural_frequency,
        &config,
        &mut rng,
        Some(|update: ProgressUpdate| {
            if update.iteration % 10 == 0 {
                println!(
                    "  [{:3.0}%] iteration {:3}: best peak {:.4}",
                    update.fraction_complete() * 100.0,
                    update.iteration,
                    update.best_value
                );
            }
        }),
        None::<fn() -> bool>,
    )?;

    println!("\n{result}\n");

    let design = result.design;
    let with_without = compare_with_without_tmd(
        design.mass_ratio,
        design.frequency_ratio,
        design.damping_ratio,
        config.main_system_damping_ratio,
    )?;
    println!(
        "Peak without TMD {:.3}, with TMD {:.3} ({:.1}% reduction)",
        with_without.peak_without_tmd, with_without.peak_with_tmd, with_without.reduction_percent
    );

    let classical = compare_classical_vs_optimized(
        design.mass_ratio,
        &design,
        config.main_system_damping_ratio,
        config.sweep,
    )?;
    println!(
        "Den Hartog at the same mass ratio: {:.3} (optimized {:.3}, {:.1}% better)",
        classical.classical_peak, classical.optimized_peak, classical.improvement_percent
    );

    Ok(())
}
