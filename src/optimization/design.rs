//! Conversion between normalized TMD designs and physical absorber components.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};
use crate::types::PhysicalTmdParameters;

use super::objective::TMD_DIMENSIONS;

/// Normalized absorber design relative to the main system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TmdDesign {
    /// mu = m2 / m1
    pub mass_ratio: f64,
    /// ksi_a, absorber damping ratio
    pub damping_ratio: f64,
    /// beta = w2 / w1
    pub frequency_ratio: f64,
}

impl TmdDesign {
    pub fn new(mass_ratio: f64, damping_ratio: f64, frequency_ratio: f64) -> Self {
        Self {
            mass_ratio,
            damping_ratio,
            frequency_ratio,
        }
    }

    /// Unpack an optimizer vector `[mu, ksi_a, beta]`.
    pub fn from_vector(vector: &[f64]) -> TmdResult<Self> {
        match vector {
            &[mass_ratio, damping_ratio, frequency_ratio] => {
                Ok(Self::new(mass_ratio, damping_ratio, frequency_ratio))
            }
            _ => Err(TmdError::DimensionMismatch {
                expected: TMD_DIMENSIONS,
                actual: vector.len(),
            }),
        }
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![self.mass_ratio, self.damping_ratio, self.frequency_ratio]
    }
}

impl fmt::Display for TmdDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mu={:.4}, ksi={:.4}, beta={:.4}",
            self.mass_ratio, self.damping_ratio, self.frequency_ratio
        )
    }
}

/// Physical absorber for a host of mass `m1` (kg) and natural frequency `w1` (rad/s).
///
/// m2 = mu m1, w2 = beta w1, k2 = w2² m2, c2 = 2 ksi m2 w2
pub fn to_physical(design: &TmdDesign, m1: f64, w1: f64) -> PhysicalTmdParameters {
    let mass = design.mass_ratio * m1;
    let natural_frequency = design.frequency_ratio * w1;
    PhysicalTmdParameters {
        mass,
        natural_frequency,
        stiffness: natural_frequency * natural_frequency * mass,
        damping_coefficient: 2.0 * design.damping_ratio * mass * natural_frequency,
    }
}

/// Normalized design of a physical absorber; inverse of [`to_physical`].
///
/// The absorber frequency is recomputed from stiffness and mass, so only
/// `mass`, `stiffness` and `damping_coefficient` are read.
pub fn from_physical(params: &PhysicalTmdParameters, m1: f64, w1: f64) -> TmdDesign {
    let w2 = (params.stiffness / params.mass).sqrt();
    TmdDesign {
        mass_ratio: params.mass / m1,
        damping_ratio: params.damping_coefficient / (2.0 * params.mass * w2),
        frequency_ratio: w2 / w1,
    }
}
