use rand::rngs::StdRng;
use rand::SeedableRng;
use tmd_bees::analysis::compare_classical_vs_optimized;
use tmd_bees::optimization::{
    from_physical, optimize_tmd_parameters_with_callbacks, ProgressUpdate, TerminationReason,
};
use tmd_bees::{
    optimize_for_sdof, optimize_tmd_parameters, BeesParameters, CuttingToolModel,
    DenHartogDesign, FrequencySweep, OptimizationAlgorithm, TmdSearchConfig,
};

const M1: f64 = 3.94;
const W1: f64 = 707.0;
const TOL: f64 = 1e-9;

fn config(iterations: usize) -> TmdSearchConfig {
    TmdSearchConfig::default().with_algorithm(OptimizationAlgorithm::Bees(
        BeesParameters::default().with_max_iterations(iterations),
    ))
}

#[test]
fn optimized_design_is_within_bounds_and_consistent() {
    let config = config(40);
    let mut rng = StdRng::seed_from_u64(2024);
    let result = optimize_tmd_parameters(M1, W1, &config, &mut rng).unwrap();

    let d = result.design;
    assert!((0.05..=0.5).contains(&d.mass_ratio));
    assert!((0.01..=0.5).contains(&d.damping_ratio));
    assert!((0.5..=1.0).contains(&d.frequency_ratio));
    assert!(result.max_transmissibility.is_finite());

    let back = from_physical(&result.physical, M1, W1);
    assert!((back.mass_ratio - d.mass_ratio).abs() < TOL);
    assert!((back.damping_ratio - d.damping_ratio).abs() < TOL);
    assert!((back.frequency_ratio - d.frequency_ratio).abs() < TOL);
}

#[test]
fn optimizer_beats_small_den_hartog_absorber() {
    // The search may use up to half the host mass, so it should beat a
    // classically tuned absorber of 5 % mass.
    let config = config(40).with_main_damping_ratio(0.0);
    let mut rng = StdRng::seed_from_u64(7);
    let result = optimize_tmd_parameters(M1, W1, &config, &mut rng).unwrap();

    let comparison =
        compare_classical_vs_optimized(0.05, &result.design, 0.0, FrequencySweep::default())
            .unwrap();
    assert!(
        comparison.improvement_percent > 0.0,
        "classical {} vs optimized {}",
        comparison.classical_peak,
        comparison.optimized_peak
    );
    assert!((comparison.optimized_peak - result.max_transmissibility).abs() < TOL);
}

#[test]
fn den_hartog_reference_translates_to_physical_values() {
    let design = DenHartogDesign::calculate(1.0, 0.2, 707.0).unwrap();
    assert!((design.beta() - 1.0 / 1.2).abs() < TOL);
    assert!((design.ksi_opt - 0.25).abs() < TOL);
    assert!((design.w2_opt - 707.0 / 1.2).abs() < 1e-6);
}

#[test]
fn cutting_tool_feeds_the_search() {
    let tool = CuttingToolModel::default();
    let sdof = tool.to_single_dof_model(0.02);
    let config = TmdSearchConfig::for_sdof(&sdof).with_algorithm(OptimizationAlgorithm::Bees(
        BeesParameters::default().with_max_iterations(10),
    ));
    assert!((config.main_system_damping_ratio - 0.02).abs() < 1e-12);

    let mut rng = StdRng::seed_from_u64(31);
    let result = optimize_for_sdof(&sdof, &config, &mut rng).unwrap();
    assert!((result.physical.mass - result.design.mass_ratio * sdof.mass).abs() < TOL);
    assert!(
        (result.physical.natural_frequency
            - result.design.frequency_ratio * sdof.natural_frequency)
            .abs()
            < 1e-6
    );
}

#[test]
fn search_can_be_cancelled() {
    let config = config(50);
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = 0usize;
    let result = optimize_tmd_parameters_with_callbacks(
        M1,
        W1,
        &config,
        &mut rng,
        Some(|_: ProgressUpdate| seen += 1),
        Some(|| true),
    )
    .unwrap();

    assert_eq!(result.run.termination, TerminationReason::Cancelled);
    assert_eq!(result.run.iterations, 0);
    assert_eq!(seen, 1);
}

#[test]
fn result_serializes_for_reporting() {
    let mut rng = StdRng::seed_from_u64(11);
    let result = optimize_tmd_parameters(M1, W1, &config(3), &mut rng).unwrap();
    let json = result.to_json().unwrap();
    assert!(json.contains("\"design\""));
    assert!(json.contains("\"damping_coefficient\""));
    assert!(result.to_string().contains("Max transmissibility"));
}
