//! TMD parameter search: peak-transmissibility objective, Bees Algorithm and
//! translation to physical absorber components.

use std::fmt;

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};
use crate::types::{PhysicalTmdParameters, SdofModel};

use super::algorithm::BeesAlgorithm;
use super::design::{to_physical, TmdDesign};
use super::objective::{FrequencySweep, TmdObjective};
use super::types::{Bound, OptimizationAlgorithm, OptimizationRun, ProgressUpdate};

/// Search space and algorithm for a TMD optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdSearchConfig {
    /// (min, max) mass ratio mu
    pub mass_ratio_bounds: (f64, f64),
    /// (min, max) absorber damping ratio ksi_a
    pub damping_ratio_bounds: (f64, f64),
    /// (min, max) frequency ratio beta
    pub frequency_ratio_bounds: (f64, f64),
    /// Damping ratio of the main system (nu_b)
    pub main_system_damping_ratio: f64,
    pub sweep: FrequencySweep,
    pub algorithm: OptimizationAlgorithm,
}

impl Default for TmdSearchConfig {
    fn default() -> Self {
        Self {
            mass_ratio_bounds: (0.05, 0.5),
            damping_ratio_bounds: (0.01, 0.5),
            frequency_ratio_bounds: (0.5, 1.0),
            main_system_damping_ratio: 0.05,
            sweep: FrequencySweep::default(),
            algorithm: OptimizationAlgorithm::default(),
        }
    }
}

impl TmdSearchConfig {
    /// Search config whose main damping ratio comes from a host model.
    pub fn for_sdof(sdof: &SdofModel) -> Self {
        Self {
            main_system_damping_ratio: sdof.damping_ratio(),
            ..Default::default()
        }
    }

    pub fn with_mass_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.mass_ratio_bounds = (min, max);
        self
    }

    pub fn with_damping_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.damping_ratio_bounds = (min, max);
        self
    }

    pub fn with_frequency_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.frequency_ratio_bounds = (min, max);
        self
    }

    pub fn with_main_damping_ratio(mut self, ratio: f64) -> Self {
        self.main_system_damping_ratio = ratio;
        self
    }

    pub fn with_sweep(mut self, sweep: FrequencySweep) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_algorithm(mut self, algorithm: OptimizationAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Bounds in optimizer order `[mu, ksi_a, beta]`.
    pub fn bounds(&self) -> Vec<Bound> {
        vec![
            self.mass_ratio_bounds.into(),
            self.damping_ratio_bounds.into(),
            self.frequency_ratio_bounds.into(),
        ]
    }
}

/// Optimized absorber, its physical components and the run trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdOptimizationResult {
    pub design: TmdDesign,
    pub physical: PhysicalTmdParameters,
    /// Peak transmissibility of `design` over the configured sweep
    pub max_transmissibility: f64,
    pub run: OptimizationRun,
}

impl TmdOptimizationResult {
    pub fn to_json(&self) -> TmdResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for TmdOptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TMD Optimization Result:")?;
        writeln!(f, "  Design: {}", self.design)?;
        writeln!(f, "  Max transmissibility: {:.4}", self.max_transmissibility)?;
        writeln!(f, "  Iterations: {}", self.run.iterations)?;
        write!(f, "{}", self.physical)
    }
}

fn check_host(m1: f64, w1: f64) -> TmdResult<()> {
    if !(m1 > 0.0 && m1.is_finite()) {
        return Err(TmdError::configuration(format!(
            "main system mass must be positive and finite, got {m1}"
        )));
    }
    if !(w1 > 0.0 && w1.is_finite()) {
        return Err(TmdError::configuration(format!(
            "main system frequency must be positive and finite, got {w1}"
        )));
    }
    Ok(())
}

/// Optimize TMD parameters for minimal peak transmissibility.
///
/// # Arguments
/// * `m1` - Main system mass (kg)
/// * `w1` - Main system natural frequency (rad/s)
/// * `config` - Search bounds, main damping, sweep and algorithm
/// * `rng` - Source of randomness for the optimizer
pub fn optimize_tmd_parameters<R: Rng + ?Sized>(
    m1: f64,
    w1: f64,
    config: &TmdSearchConfig,
    rng: &mut R,
) -> TmdResult<TmdOptimizationResult> {
    optimize_tmd_parameters_with_callbacks::<R, fn(ProgressUpdate), fn() -> bool>(
        m1, w1, config, rng, None, None,
    )
}

/// [`optimize_tmd_parameters`] with progress reporting and cancellation.
pub fn optimize_tmd_parameters_with_callbacks<R, P, S>(
    m1: f64,
    w1: f64,
    config: &TmdSearchConfig,
    rng: &mut R,
    on_progress: Option<P>,
    should_stop: Option<S>,
) -> TmdResult<TmdOptimizationResult>
where
    R: Rng + ?Sized,
    P: FnMut(ProgressUpdate),
    S: Fn() -> bool,
{
    check_host(m1, w1)?;

    let params = match &config.algorithm {
        OptimizationAlgorithm::Bees(params) => params.clone(),
        unsupported => {
            return Err(TmdError::UnsupportedAlgorithm {
                name: unsupported.name().to_string(),
            })
        }
    };
    let optimizer = BeesAlgorithm::new(params)?;
    let objective = TmdObjective::new(config.main_system_damping_ratio, config.sweep)?;

    let run = optimizer.optimize_with_callbacks(
        |x: &[f64]| objective.evaluate(x),
        &config.bounds(),
        false,
        rng,
        on_progress,
        should_stop,
    )?;

    let design = TmdDesign::from_vector(&run.best_position)?;
    let physical = to_physical(&design, m1, w1);
    if run.best_value.is_infinite() {
        warn!("tmd: best design {} still has a singular response", design);
    }
    info!(
        "tmd: {} -> m2={:.4} kg, k2={:.1} N/m, c2={:.4} N·s/m, peak={:.4}",
        design, physical.mass, physical.stiffness, physical.damping_coefficient, run.best_value
    );

    Ok(TmdOptimizationResult {
        design,
        physical,
        max_transmissibility: run.best_value,
        run,
    })
}

/// Optimize an absorber for a host given as an equivalent SDOF model.
///
/// The mass and natural frequency come from `sdof`; the main damping ratio
/// is taken from `config`, see [`TmdSearchConfig::for_sdof`].
pub fn optimize_for_sdof<R: Rng + ?Sized>(
    sdof: &SdofModel,
    config: &TmdSearchConfig,
    rng: &mut R,
) -> TmdResult<TmdOptimizationResult> {
    optimize_tmd_parameters(sdof.mass, sdof.natural_frequency, config, rng)
}
