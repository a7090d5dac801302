//! Scout generation, neighborhood recruitment and ranking for the Bees
//! Algorithm.

use rand::Rng;

use super::types::{Bee, Bound};

/// Draw a position uniformly within bounds.
///
/// A pinned bound (`min == max`) always yields `min`. The result is clamped
/// so rounding in `min + u * range` cannot step past `max`.
pub fn random_position<R: Rng + ?Sized>(bounds: &[Bound], rng: &mut R) -> Vec<f64> {
    bounds
        .iter()
        .map(|b| b.clamp(b.min + rng.r#gen::<f64>() * b.range()))
        .collect()
}

/// Perturb a site within the current patch.
///
/// Each component moves by `U(-patch, patch) * (max - min)` and is clamped
/// back into its bound.
pub fn neighbor_position<R: Rng + ?Sized>(
    site: &[f64],
    bounds: &[Bound],
    patch: f64,
    rng: &mut R,
) -> Vec<f64> {
    site.iter()
        .zip(bounds)
        .map(|(&x, b)| {
            let r: f64 = rng.r#gen::<f64>() * 2.0 - 1.0;
            b.clamp(x + r * patch * b.range())
        })
        .collect()
}

/// Rank bees best first.
///
/// The sort is stable, so bees with equal fitness keep their discovery order.
pub fn rank(mut bees: Vec<Bee>) -> Vec<Bee> {
    bees.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    bees
}

/// Split a ranked population into (elite sites, other selected sites, rest).
pub fn split_sites(ranked: &[Bee], selected: usize, elite: usize) -> (&[Bee], &[Bee], &[Bee]) {
    let selected = selected.min(ranked.len());
    let elite = elite.min(selected);
    let (sites, rest) = ranked.split_at(selected);
    let (elite_sites, other_sites) = sites.split_at(elite);
    (elite_sites, other_sites, rest)
}

/// Index of the fittest candidate; earlier candidates win ties.
pub fn fittest_index(candidates: &[Bee]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, bee) in candidates.iter().enumerate() {
        match best {
            Some(j) if bee.fitness <= candidates[j].fitness => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Mean signed fitness of a population.
///
/// Infinities of one sign dominate the mean. When both `+∞` and `−∞` are
/// present the mean is taken over the finite bees only, or is the first
/// bee's fitness if none is finite. NaN only for an empty population.
pub fn mean_fitness(bees: &[Bee]) -> f64 {
    if bees.is_empty() {
        return f64::NAN;
    }
    let has_positive = bees.iter().any(|b| b.fitness == f64::INFINITY);
    let has_negative = bees.iter().any(|b| b.fitness == f64::NEG_INFINITY);
    if !(has_positive && has_negative) {
        return bees.iter().map(|b| b.fitness).sum::<f64>() / bees.len() as f64;
    }

    let (sum, count) = bees
        .iter()
        .filter(|b| b.fitness.is_finite())
        .fold((0.0, 0usize), |(sum, count), b| (sum + b.fitness, count + 1));
    if count == 0 {
        bees[0].fitness
    } else {
        sum / count as f64
    }
}

/// Check that every component lies within its bound.
pub fn within_bounds(position: &[f64], bounds: &[Bound]) -> bool {
    position.len() == bounds.len() && position.iter().zip(bounds).all(|(&x, b)| b.contains(x))
}
