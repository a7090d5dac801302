//! Den Hartog optimal absorber tuning.
//!
//! Classical closed-form tuning for a single-mass absorber on an undamped main
//! system. Used as a baseline design and as the comparison target for the
//! optimizer.

use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};

/// Optimal absorber/main frequency ratio: β = 1 / (1 + μ).
pub fn optimal_frequency_ratio(mu: f64) -> f64 {
    1.0 / (1.0 + mu)
}

/// Optimal absorber damping ratio: ξ = sqrt(3μ / (8 (1 + μ))).
pub fn optimal_damping_ratio(mu: f64) -> f64 {
    ((3.0 * mu) / (8.0 * (1.0 + mu))).sqrt()
}

/// Classical absorber design for a given main system and absorber mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenHartogDesign {
    /// Mass ratio m2 / m1
    pub mu: f64,
    /// Main system stiffness k1 = w1² m1 (N/m)
    pub k1: f64,
    /// Optimal absorber natural frequency (rad/s)
    pub w2_opt: f64,
    /// Optimal absorber stiffness (N/m)
    pub k2_opt: f64,
    /// Optimal absorber damping ratio
    pub ksi_opt: f64,
    /// Optimal absorber damping coefficient (N·s/m)
    pub c2_opt: f64,
}

impl DenHartogDesign {
    /// Tune an absorber of mass `m2` for a main system (`m1`, `w1`).
    pub fn calculate(m1: f64, m2: f64, w1: f64) -> TmdResult<Self> {
        if !(m1 > 0.0 && m1.is_finite()) {
            return Err(TmdError::configuration(format!(
                "main system mass must be positive, got {m1}"
            )));
        }
        if !(m2 >= 0.0 && m2.is_finite()) {
            return Err(TmdError::configuration(format!(
                "absorber mass must be non-negative, got {m2}"
            )));
        }
        if !(w1 > 0.0 && w1.is_finite()) {
            return Err(TmdError::configuration(format!(
                "main system frequency must be positive, got {w1}"
            )));
        }

        let mu = m2 / m1;
        let k1 = w1 * w1 * m1;
        let w2_opt = w1 * optimal_frequency_ratio(mu);
        let k2_opt = w2_opt * w2_opt * m2;
        let ksi_opt = optimal_damping_ratio(mu);
        let c2_opt = 2.0 * ksi_opt * m2 * w2_opt;

        Ok(Self {
            mu,
            k1,
            w2_opt,
            k2_opt,
            ksi_opt,
            c2_opt,
        })
    }

    /// Frequency ratio of the tuned absorber.
    pub fn beta(&self) -> f64 {
        optimal_frequency_ratio(self.mu)
    }
}
