//! Bees Algorithm for bounded continuous optimization.
//!
//! Each iteration:
//! 1. The top `m` bees become sites; the top `e` of those are elite.
//! 2. Every elite site recruits `nep - 1` bees inside a shrinking patch,
//!    every other site recruits `nsp - 1`. A site is replaced by the best bee
//!    of its neighborhood (itself included).
//! 3. The remaining `n - m` bees scout uniformly at random.
//! 4. The new generation is ranked and the best-so-far updated.
//!
//! Randomness comes only from the `Rng` passed in, so a seeded generator
//! replays a run exactly.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{TmdError, TmdResult};

use super::population::{
    fittest_index, mean_fitness, neighbor_position, random_position, rank, split_sites,
};
use super::types::{
    validate_bounds, Bee, BeesParameters, Bound, OptimizationRun, ProgressUpdate,
    TerminationReason,
};

/// Objective wrapper converting raw values into signed fitness.
struct SignedObjective<F> {
    objective: F,
    /// +1 when maximizing, -1 when minimizing
    sign: f64,
    evaluations: usize,
}

impl<F> SignedObjective<F> {
    fn evaluate<E>(&mut self, position: Vec<f64>) -> TmdResult<Bee>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let value = (self.objective)(&position).map_err(TmdError::evaluation)?;
        self.evaluations += 1;
        if value.is_nan() {
            return Err(TmdError::NonFiniteObjective { value, position });
        }
        Ok(Bee::new(position, self.sign * value))
    }

    /// Back to the caller's sign convention.
    fn unsigned(&self, fitness: f64) -> f64 {
        fitness * self.sign
    }
}

/// Bees Algorithm optimizer with validated hyperparameters.
#[derive(Debug, Clone)]
pub struct BeesAlgorithm {
    params: BeesParameters,
}

impl BeesAlgorithm {
    /// Create an optimizer, rejecting inconsistent hyperparameters.
    pub fn new(params: BeesParameters) -> TmdResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &BeesParameters {
        &self.params
    }

    /// Run the optimizer to completion.
    pub fn optimize<F, E, R>(
        &self,
        objective: F,
        bounds: &[Bound],
        maximize: bool,
        rng: &mut R,
    ) -> TmdResult<OptimizationRun>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: std::error::Error + Send + Sync + 'static,
        R: Rng + ?Sized,
    {
        self.optimize_with_callbacks::<F, E, R, fn(ProgressUpdate), fn() -> bool>(
            objective, bounds, maximize, rng, None, None,
        )
    }

    /// Run the optimizer with a `StdRng` seeded from `seed`.
    pub fn optimize_seeded<F, E>(
        &self,
        objective: F,
        bounds: &[Bound],
        maximize: bool,
        seed: u64,
    ) -> TmdResult<OptimizationRun>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        self.optimize(objective, bounds, maximize, &mut rng)
    }

    /// Run the optimizer with optional progress and stop callbacks.
    ///
    /// # Arguments
    /// * `objective` - Function to optimize; an `Err` aborts the run
    /// * `bounds` - One bound per design variable
    /// * `maximize` - Maximize instead of minimize
    /// * `rng` - Source of all randomness
    /// * `on_progress` - Called after the initial scouting and after every iteration
    /// * `should_stop` - Checked before every iteration; `true` ends the run early
    ///
    /// # Returns
    /// The best position found and the per-iteration history. A cancelled run
    /// holds the iterations completed so far.
    pub fn optimize_with_callbacks<F, E, R, P, S>(
        &self,
        objective: F,
        bounds: &[Bound],
        maximize: bool,
        rng: &mut R,
        mut on_progress: Option<P>,
        should_stop: Option<S>,
    ) -> TmdResult<OptimizationRun>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: std::error::Error + Send + Sync + 'static,
        R: Rng + ?Sized,
        P: FnMut(ProgressUpdate),
        S: Fn() -> bool,
    {
        validate_bounds(bounds)?;
        let params = &self.params;
        debug!(
            "bees: n={} m={} e={} nep={} nsp={} ngh={} iterations={} dims={} maximize={}",
            params.scouts,
            params.selected_sites,
            params.elite_sites,
            params.elite_recruits,
            params.other_recruits,
            params.patch_size,
            params.max_iterations,
            bounds.len(),
            maximize
        );

        let mut objective = SignedObjective {
            objective,
            sign: if maximize { 1.0 } else { -1.0 },
            evaluations: 0,
        };

        // Initial scouting
        let mut scouts = Vec::with_capacity(params.scouts);
        for _ in 0..params.scouts {
            scouts.push(objective.evaluate(random_position(bounds, rng))?);
        }
        let mut population = rank(scouts);

        let mut best = population[0].clone();
        let mut best_fitness_history = Vec::with_capacity(params.max_iterations + 1);
        let mut mean_fitness_history = Vec::with_capacity(params.max_iterations + 1);
        let mut best_position_history = Vec::with_capacity(params.max_iterations + 1);

        let mut record = |population: &[Bee],
                          best: &Bee,
                          iteration: usize,
                          objective: &SignedObjective<F>| {
            let best_value = objective.unsigned(best.fitness);
            let mean_value = objective.unsigned(mean_fitness(population));
            best_fitness_history.push(best_value);
            mean_fitness_history.push(mean_value);
            best_position_history.push(best.position.clone());
            trace!(
                "bees: iteration {}/{} best={:.6e} mean={:.6e}",
                iteration,
                params.max_iterations,
                best_value,
                mean_value
            );
            if let Some(ref mut progress) = on_progress {
                progress(ProgressUpdate {
                    iteration,
                    max_iterations: params.max_iterations,
                    best_value,
                    mean_value,
                    best_position: best.position.clone(),
                    population_size: population.len(),
                });
            }
        };

        record(population.as_slice(), &best, 0, &objective);

        let mut iterations = 0;
        let mut termination = TerminationReason::Completed;

        for iteration in 1..=params.max_iterations {
            if let Some(ref stop_fn) = should_stop {
                if stop_fn() {
                    warn!(
                        "bees: stop requested after {} of {} iterations",
                        iterations, params.max_iterations
                    );
                    termination = TerminationReason::Cancelled;
                    break;
                }
            }

            let patch = params.patch_size_at(iteration);
            let (elite_sites, other_sites, _) =
                split_sites(&population, params.selected_sites, params.elite_sites);

            let mut next_generation = Vec::with_capacity(params.scouts);

            // 1. Elite sites
            for site in elite_sites {
                next_generation.push(search_neighborhood(
                    site,
                    params.elite_recruits,
                    bounds,
                    patch,
                    &mut objective,
                    rng,
                )?);
            }

            // 2. Other selected sites
            for site in other_sites {
                next_generation.push(search_neighborhood(
                    site,
                    params.other_recruits,
                    bounds,
                    patch,
                    &mut objective,
                    rng,
                )?);
            }

            // 3. Global random search
            for _ in 0..(params.scouts - params.selected_sites) {
                next_generation.push(objective.evaluate(random_position(bounds, rng))?);
            }

            population = rank(next_generation);
            debug_assert_eq!(population.len(), params.scouts);

            if population[0].fitness > best.fitness {
                best = population[0].clone();
            }

            iterations = iteration;
            record(population.as_slice(), &best, iteration, &objective);
        }

        let best_value = objective.unsigned(best.fitness);
        info!(
            "bees: finished after {} iterations and {} evaluations, best value {:.6e}",
            iterations, objective.evaluations, best_value
        );

        Ok(OptimizationRun {
            best_position: best.position,
            best_value,
            best_fitness_history,
            mean_fitness_history,
            best_position_history,
            iterations,
            evaluations: objective.evaluations,
            termination,
        })
    }
}

/// Recruit `recruits - 1` bees around `site` and keep the fittest of the
/// neighborhood, the site itself included.
fn search_neighborhood<F, E, R>(
    site: &Bee,
    recruits: usize,
    bounds: &[Bound],
    patch: f64,
    objective: &mut SignedObjective<F>,
    rng: &mut R,
) -> TmdResult<Bee>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
    R: Rng + ?Sized,
{
    let mut neighborhood = Vec::with_capacity(recruits);
    neighborhood.push(site.clone());
    for _ in 1..recruits {
        let position = neighbor_position(&site.position, bounds, patch, rng);
        neighborhood.push(objective.evaluate(position)?);
    }

    let best = fittest_index(&neighborhood).unwrap_or(0);
    Ok(neighborhood.swap_remove(best))
}
