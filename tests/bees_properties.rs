use std::cell::RefCell;
use std::convert::Infallible;

use proptest::prelude::*;
use tmd_bees::optimization::{
    within_bounds, BeesAlgorithm, BeesParameters, Bound, ProgressUpdate, TerminationReason,
};

fn small_params(iterations: usize) -> BeesParameters {
    BeesParameters::default()
        .with_sites(10, 5, 2)
        .with_recruits(5, 3)
        .with_patch_size(0.2)
        .with_max_iterations(iterations)
}

fn rosenbrock(x: &[f64]) -> Result<f64, Infallible> {
    Ok(x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum())
}

#[test]
fn pinned_single_variable_is_exact() {
    let bees = BeesAlgorithm::new(BeesParameters::default().with_max_iterations(10)).unwrap();
    let run = bees
        .optimize_seeded(
            |x: &[f64]| Ok::<_, Infallible>((x[0] - 0.1).powi(2)),
            &[Bound::new(0.1, 0.1)],
            false,
            99,
        )
        .unwrap();

    assert_eq!(run.best_position, vec![0.1]);
    assert_eq!(run.best_value, 0.0);
    assert_eq!(run.best_fitness_history.len(), 11);
    assert_eq!(run.termination, TerminationReason::Completed);
}

#[test]
fn default_parameters_spend_expected_budget() {
    let bees = BeesAlgorithm::new(BeesParameters::default().with_max_iterations(4)).unwrap();
    let calls = RefCell::new(0usize);
    let run = bees
        .optimize_seeded(
            |x: &[f64]| {
                *calls.borrow_mut() += 1;
                rosenbrock(x)
            },
            &[Bound::new(-2.0, 2.0), Bound::new(-2.0, 2.0)],
            false,
            5,
        )
        .unwrap();

    // 20 initial scouts + 4 iterations of 85 evaluations
    assert_eq!(*calls.borrow(), 20 + 4 * 85);
    assert_eq!(run.evaluations, 360);
}

#[test]
fn run_exports_to_json() {
    let bees = BeesAlgorithm::new(small_params(5)).unwrap();
    let run = bees
        .optimize_seeded(rosenbrock, &[Bound::new(-2.0, 2.0); 2], false, 12)
        .unwrap();
    let json = run.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["iterations"], 5);
    assert_eq!(value["best_fitness_history"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["termination"], "Completed");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_evaluated_point_is_within_bounds(
        seed in any::<u64>(),
        lo in -10.0f64..0.0,
        width in 0.0f64..5.0,
    ) {
        let bounds = vec![Bound::new(lo, lo + width), Bound::new(-1.0, 1.0), Bound::new(0.5, 0.5)];
        let seen = RefCell::new(Vec::new());
        let bees = BeesAlgorithm::new(small_params(8)).unwrap();
        let run = bees
            .optimize_seeded(
                |x: &[f64]| {
                    seen.borrow_mut().push(x.to_vec());
                    Ok::<_, Infallible>(x.iter().map(|v| v.abs()).sum())
                },
                &bounds,
                false,
                seed,
            )
            .unwrap();

        for point in seen.borrow().iter() {
            prop_assert!(within_bounds(point, &bounds), "{:?} escaped {:?}", point, bounds);
        }
        prop_assert!(within_bounds(&run.best_position, &bounds));
        prop_assert_eq!(run.best_position[2], 0.5);
    }

    #[test]
    fn best_value_never_gets_worse(seed in any::<u64>(), maximize in any::<bool>()) {
        let bees = BeesAlgorithm::new(small_params(12)).unwrap();
        let run = bees
            .optimize_seeded(rosenbrock, &[Bound::new(-2.0, 2.0); 3], maximize, seed)
            .unwrap();

        for pair in run.best_fitness_history.windows(2) {
            if maximize {
                prop_assert!(pair[1] >= pair[0]);
            } else {
                prop_assert!(pair[1] <= pair[0]);
            }
        }
        prop_assert_eq!(run.best_fitness_history.last().copied(), Some(run.best_value));
        prop_assert_eq!(run.best_position_history.last(), Some(&run.best_position));
    }

    #[test]
    fn progress_matches_history(seed in any::<u64>()) {
        let bees = BeesAlgorithm::new(small_params(6)).unwrap();
        let mut updates: Vec<ProgressUpdate> = Vec::new();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(seed);
        let run = bees
            .optimize_with_callbacks(
                rosenbrock,
                &[Bound::new(-2.0, 2.0); 2],
                false,
                &mut rng,
                Some(|update: ProgressUpdate| updates.push(update)),
                None::<fn() -> bool>,
            )
            .unwrap();

        prop_assert_eq!(updates.len(), run.best_fitness_history.len());
        for (update, best) in updates.iter().zip(&run.best_fitness_history) {
            prop_assert_eq!(update.best_value, *best);
        }
    }
}
