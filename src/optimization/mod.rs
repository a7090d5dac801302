//! Bees Algorithm optimization of tuned mass dampers.
//!
//! This module provides a general bounded Bees Algorithm and its application
//! to TMD design: minimizing the peak transmissibility of a damped main mass
//! over an excitation-ratio sweep.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tmd_bees::optimization::{
//!     optimize_tmd_parameters, BeesParameters, OptimizationAlgorithm, TmdSearchConfig,
//! };
//!
//! // Tool holder of 3.94 kg with its first mode at 707 rad/s
//! let config = TmdSearchConfig::default()
//!     .with_main_damping_ratio(0.02)
//!     .with_algorithm(OptimizationAlgorithm::Bees(
//!         BeesParameters::default().with_max_iterations(20),
//!     ));
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = optimize_tmd_parameters(3.94, 707.0, &config, &mut rng).unwrap();
//!
//! println!("Peak transmissibility: {:.3}", result.max_transmissibility);
//! println!("{}", result.physical);
//! ```

pub mod algorithm;
pub mod design;
pub mod objective;
pub mod population;
pub mod tmd;
pub mod types;

// Re-export commonly used items
pub use algorithm::BeesAlgorithm;
pub use design::{from_physical, to_physical, TmdDesign};
pub use objective::{FrequencySweep, ResponsePeak, TmdObjective, TMD_DIMENSIONS};
pub use population::{
    fittest_index, mean_fitness, neighbor_position, random_position, rank, split_sites,
    within_bounds,
};
pub use tmd::{
    optimize_for_sdof, optimize_tmd_parameters, optimize_tmd_parameters_with_callbacks,
    TmdOptimizationResult, TmdSearchConfig,
};
pub use types::{
    validate_bounds, Bee, BeesParameters, Bound, OptimizationAlgorithm, OptimizationRun,
    ProgressUpdate, TerminationReason,
};
