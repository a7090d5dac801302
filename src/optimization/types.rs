//! Type definitions for Bees Algorithm optimization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};

/// Closed search interval for one design variable.
///
/// `min == max` pins the variable to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for Bound {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Check a bounds list before any evaluation takes place.
pub fn validate_bounds(bounds: &[Bound]) -> TmdResult<()> {
    if bounds.is_empty() {
        return Err(TmdError::configuration("bounds list is empty"));
    }
    for (dim, bound) in bounds.iter().enumerate() {
        if !bound.min.is_finite() || !bound.max.is_finite() {
            return Err(TmdError::configuration(format!(
                "bound {dim} is not finite: ({}, {})",
                bound.min, bound.max
            )));
        }
        if bound.min > bound.max {
            return Err(TmdError::configuration(format!(
                "bound {dim} has min {} greater than max {}",
                bound.min, bound.max
            )));
        }
    }
    Ok(())
}

/// Candidate solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Bee {
    /// Design vector, within bounds
    pub position: Vec<f64>,
    /// Signed objective value (higher is better)
    pub fitness: f64,
}

impl Bee {
    pub fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self { position, fitness }
    }
}

/// Bees Algorithm hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeesParameters {
    /// Number of scout bees (n)
    #[serde(alias = "n")]
    pub scouts: usize,
    /// Number of selected sites (m)
    #[serde(alias = "m")]
    pub selected_sites: usize,
    /// Number of elite sites (e)
    #[serde(alias = "e")]
    pub elite_sites: usize,
    /// Bees recruited per elite site, site included (nep)
    #[serde(alias = "nep")]
    pub elite_recruits: usize,
    /// Bees recruited per other selected site, site included (nsp)
    #[serde(alias = "nsp")]
    pub other_recruits: usize,
    /// Initial patch size as a fraction of each variable's range (ngh)
    #[serde(alias = "ngh")]
    pub patch_size: f64,
    /// Number of iterations after the initial scouting
    pub max_iterations: usize,
}

impl Default for BeesParameters {
    fn default() -> Self {
        Self {
            scouts: 20,
            selected_sites: 10,
            elite_sites: 5,
            elite_recruits: 10,
            other_recruits: 7,
            patch_size: 0.05,
            max_iterations: 100,
        }
    }
}

impl BeesParameters {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_patch_size(mut self, patch_size: f64) -> Self {
        self.patch_size = patch_size;
        self
    }

    /// Set the scout, selected-site and elite-site counts (n, m, e).
    pub fn with_sites(mut self, scouts: usize, selected_sites: usize, elite_sites: usize) -> Self {
        self.scouts = scouts;
        self.selected_sites = selected_sites;
        self.elite_sites = elite_sites;
        self
    }

    /// Set the recruit counts for elite and other sites (nep, nsp).
    pub fn with_recruits(mut self, elite_recruits: usize, other_recruits: usize) -> Self {
        self.elite_recruits = elite_recruits;
        self.other_recruits = other_recruits;
        self
    }

    /// Reject inconsistent hyperparameters.
    pub fn validate(&self) -> TmdResult<()> {
        if self.elite_sites == 0 {
            return Err(TmdError::configuration("elite site count e must be at least 1"));
        }
        if self.elite_sites >= self.selected_sites {
            return Err(TmdError::configuration(format!(
                "elite site count e = {} must be smaller than selected site count m = {}",
                self.elite_sites, self.selected_sites
            )));
        }
        if self.selected_sites > self.scouts {
            return Err(TmdError::configuration(format!(
                "selected site count m = {} exceeds scout count n = {}",
                self.selected_sites, self.scouts
            )));
        }
        if self.elite_recruits == 0 || self.other_recruits == 0 {
            return Err(TmdError::configuration(format!(
                "recruit counts must be at least 1, got nep = {} and nsp = {}",
                self.elite_recruits, self.other_recruits
            )));
        }
        if !(self.patch_size > 0.0 && self.patch_size <= 1.0) {
            return Err(TmdError::configuration(format!(
                "patch size ngh must lie in (0, 1], got {}",
                self.patch_size
            )));
        }
        if self.max_iterations == 0 {
            return Err(TmdError::configuration("max_iterations must be at least 1"));
        }
        Ok(())
    }

    /// Patch size used during `iteration` (1-based).
    ///
    /// Shrinks linearly from `ngh` to 20 % of `ngh` at the final iteration.
    pub fn patch_size_at(&self, iteration: usize) -> f64 {
        self.patch_size * (1.0 - 0.8 * iteration as f64 / self.max_iterations as f64)
    }

    /// Objective evaluations performed by one iteration.
    ///
    /// Inconsistent counts contribute nothing instead of underflowing; see
    /// [`BeesParameters::validate`].
    pub fn evaluations_per_iteration(&self) -> usize {
        let other_sites = self.selected_sites.saturating_sub(self.elite_sites);
        self.elite_sites * self.elite_recruits.saturating_sub(1)
            + other_sites * self.other_recruits.saturating_sub(1)
            + self.scouts.saturating_sub(self.selected_sites)
    }
}

/// Why an optimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminationReason {
    /// All configured iterations ran
    #[default]
    Completed,
    /// The stop callback requested an early end
    Cancelled,
}

/// Outcome and trace of one `optimize` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRun {
    /// Best design vector found
    pub best_position: Vec<f64>,
    /// Objective value at `best_position` (caller's sign convention)
    pub best_value: f64,
    /// Best value so far, one entry per iteration including iteration 0
    pub best_fitness_history: Vec<f64>,
    /// Population mean value, one entry per iteration including iteration 0
    pub mean_fitness_history: Vec<f64>,
    /// Best design vector so far, one entry per iteration including iteration 0
    pub best_position_history: Vec<Vec<f64>>,
    /// Iterations completed after the initial scouting
    pub iterations: usize,
    /// Objective evaluations performed
    pub evaluations: usize,
    pub termination: TerminationReason,
}

impl OptimizationRun {
    /// Serialize the run for a reporting layer.
    pub fn to_json(&self) -> TmdResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the run as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> TmdResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for OptimizationRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimization Run:")?;
        writeln!(f, "  Iterations: {} ({:?})", self.iterations, self.termination)?;
        writeln!(f, "  Evaluations: {}", self.evaluations)?;
        writeln!(f, "  Best value: {:.6}", self.best_value)?;
        write!(f, "  Best position: [")?;
        for (i, x) in self.best_position.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x:.6}")?;
        }
        write!(f, "]")
    }
}

/// Progress update emitted after each iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// 0 for the initial scouting
    pub iteration: usize,
    pub max_iterations: usize,
    /// Best value so far (caller's sign convention)
    pub best_value: f64,
    /// Population mean value (caller's sign convention)
    pub mean_value: f64,
    pub best_position: Vec<f64>,
    /// Number of bees in the ranked generation
    pub population_size: usize,
}

impl ProgressUpdate {
    /// Completed fraction of the run in [0, 1].
    pub fn fraction_complete(&self) -> f64 {
        self.iteration as f64 / self.max_iterations as f64
    }
}

/// Optimization algorithm used for a TMD search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptimizationAlgorithm {
    /// Bees Algorithm with the given hyperparameters
    Bees(BeesParameters),
    /// Declared but not implemented
    Genetic,
}

impl Default for OptimizationAlgorithm {
    fn default() -> Self {
        OptimizationAlgorithm::Bees(BeesParameters::default())
    }
}

impl OptimizationAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            OptimizationAlgorithm::Bees(_) => "bees",
            OptimizationAlgorithm::Genetic => "genetic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn default_parameters_are_valid() {
        let params = BeesParameters::default();
        assert!(params.validate().is_ok());
        // 5 * 9 + 5 * 6 + 10
        assert_eq!(params.evaluations_per_iteration(), 85);
    }

    #[test]
    fn invalid_site_counts_are_rejected() {
        let cases = [
            BeesParameters::default().with_sites(20, 10, 10),
            BeesParameters::default().with_sites(20, 10, 12),
            BeesParameters::default().with_sites(8, 10, 5),
            BeesParameters::default().with_sites(20, 10, 0),
            BeesParameters::default().with_recruits(0, 7),
            BeesParameters::default().with_recruits(10, 0),
            BeesParameters::default().with_patch_size(0.0),
            BeesParameters::default().with_patch_size(1.5),
            BeesParameters::default().with_patch_size(f64::NAN),
            BeesParameters::default().with_max_iterations(0),
        ];
        for params in cases {
            let err = params.validate().unwrap_err();
            assert!(err.is_configuration(), "{:?} accepted", params);
        }
    }

    #[test]
    fn evaluation_count_of_invalid_parameters_does_not_underflow() {
        // 5 * 0 + 5 * 6 + 10
        assert_eq!(BeesParameters::default().with_recruits(0, 7).evaluations_per_iteration(), 40);
        // 12 * 9 + 0 * 6 + 10
        assert_eq!(BeesParameters::default().with_sites(20, 10, 12).evaluations_per_iteration(), 118);
        assert_eq!(BeesParameters::default().with_sites(8, 10, 5).evaluations_per_iteration(), 75);
    }

    #[test]
    fn patch_shrinks_to_twenty_percent() {
        let params = BeesParameters::default().with_patch_size(0.05).with_max_iterations(100);
        assert!((params.patch_size_at(0) - 0.05).abs() < TOL);
        assert!((params.patch_size_at(50) - 0.03).abs() < TOL);
        assert!((params.patch_size_at(100) - 0.01).abs() < TOL);
    }

    #[test]
    fn bounds_validation() {
        assert!(validate_bounds(&[]).is_err());
        assert!(validate_bounds(&[Bound::new(1.0, 0.0)]).is_err());
        assert!(validate_bounds(&[Bound::new(0.0, f64::INFINITY)]).is_err());
        assert!(validate_bounds(&[Bound::new(0.1, 0.1)]).is_ok());
        assert!(validate_bounds(&[(0.05, 0.5).into(), (0.01, 0.5).into()]).is_ok());
    }

    #[test]
    fn bound_clamps_and_contains() {
        let bound = Bound::new(0.5, 1.0);
        assert_eq!(bound.clamp(2.0), 1.0);
        assert_eq!(bound.clamp(-2.0), 0.5);
        assert!(bound.contains(0.75));
        assert!(!bound.contains(1.01));
        assert!((bound.range() - 0.5).abs() < TOL);
    }

    #[test]
    fn parameters_deserialize_with_defaults() {
        let params: BeesParameters =
            serde_json::from_str(r#"{"n": 30, "max_iterations": 5}"#).unwrap();
        assert_eq!(params.scouts, 30);
        assert_eq!(params.max_iterations, 5);
        assert_eq!(params.selected_sites, 10);
        assert!((params.patch_size - 0.05).abs() < TOL);
    }
}
