//! Peak-transmissibility objective for TMD design.
//!
//! A design vector `[mu, ksi_a, beta]` is scored by sweeping the excitation
//! ratio over the resonance region and taking the worst (largest)
//! transmissibility. The optimizer minimizes this peak.
//!
//! The sweep resolution trades accuracy for cost: a coarse sweep can step over
//! a sharp peak and understate the true worst case. `refine_points` adds a
//! second, denser pass around the located peak.

use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};
use crate::transmissibility::{linspace, transmissibility};

use super::design::TmdDesign;

/// Number of design variables: mass ratio, damping ratio, frequency ratio.
pub const TMD_DIMENSIONS: usize = 3;

/// Excitation-ratio sweep used to locate the response peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySweep {
    /// First excitation ratio (inclusive)
    pub start: f64,
    /// Last excitation ratio (inclusive)
    pub end: f64,
    /// Evenly spaced sample count
    pub points: usize,
    /// Samples of the refinement pass around the peak, 0 = no refinement
    pub refine_points: usize,
}

impl Default for FrequencySweep {
    fn default() -> Self {
        Self {
            start: 0.5,
            end: 1.5,
            points: 100,
            refine_points: 0,
        }
    }
}

impl FrequencySweep {
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self {
            start,
            end,
            points,
            refine_points: 0,
        }
    }

    pub fn with_refinement(mut self, refine_points: usize) -> Self {
        self.refine_points = refine_points;
        self
    }

    pub fn validate(&self) -> TmdResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start < 0.0 {
            return Err(TmdError::configuration(format!(
                "sweep range must be finite and non-negative, got [{}, {}]",
                self.start, self.end
            )));
        }
        if self.start >= self.end {
            return Err(TmdError::configuration(format!(
                "sweep start {} must be below end {}",
                self.start, self.end
            )));
        }
        if self.points < 2 {
            return Err(TmdError::configuration(format!(
                "sweep needs at least 2 points, got {}",
                self.points
            )));
        }
        if self.refine_points == 1 {
            return Err(TmdError::configuration(
                "refinement needs at least 2 points (or 0 to disable)",
            ));
        }
        Ok(())
    }

    /// Excitation ratios of the coarse pass.
    pub fn r_values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }
}

/// Peak of the response curve over a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePeak {
    /// Excitation ratio of the peak
    pub r: f64,
    /// Transmissibility at the peak
    pub transmissibility: f64,
}

/// Objective scoring a TMD design by its peak transmissibility.
#[derive(Debug, Clone)]
pub struct TmdObjective {
    main_damping_ratio: f64,
    sweep: FrequencySweep,
    r_values: Vec<f64>,
}

impl TmdObjective {
    /// Objective for a main system with damping ratio `main_damping_ratio`.
    pub fn new(main_damping_ratio: f64, sweep: FrequencySweep) -> TmdResult<Self> {
        if !(main_damping_ratio >= 0.0 && main_damping_ratio.is_finite()) {
            return Err(TmdError::configuration(format!(
                "main system damping ratio must be finite and non-negative, got {main_damping_ratio}"
            )));
        }
        sweep.validate()?;
        Ok(Self {
            main_damping_ratio,
            sweep,
            r_values: sweep.r_values(),
        })
    }

    pub fn main_damping_ratio(&self) -> f64 {
        self.main_damping_ratio
    }

    pub fn sweep(&self) -> &FrequencySweep {
        &self.sweep
    }

    /// Peak transmissibility of `design = [mu, ksi_a, beta]`.
    pub fn evaluate(&self, design: &[f64]) -> TmdResult<f64> {
        let design = TmdDesign::from_vector(design)?;
        Ok(self.peak(&design).transmissibility)
    }

    /// Locate the response peak of a design.
    pub fn peak(&self, design: &TmdDesign) -> ResponsePeak {
        let response = |r: f64| {
            transmissibility(
                r,
                design.frequency_ratio,
                design.mass_ratio,
                design.damping_ratio,
                self.main_damping_ratio,
            )
        };

        let mut peak_index = 0;
        let mut peak = ResponsePeak {
            r: self.r_values[0],
            transmissibility: response(self.r_values[0]),
        };
        for (i, &r) in self.r_values.iter().enumerate().skip(1) {
            let t = response(r);
            if t > peak.transmissibility {
                peak_index = i;
                peak = ResponsePeak {
                    r,
                    transmissibility: t,
                };
            }
        }

        if self.sweep.refine_points == 0 || peak.transmissibility.is_infinite() {
            return peak;
        }

        // Resample the bracket between the neighbours of the coarse peak
        let lo = self.r_values[peak_index.saturating_sub(1)];
        let hi = self.r_values[(peak_index + 1).min(self.r_values.len() - 1)];
        for r in linspace(lo, hi, self.sweep.refine_points) {
            let t = response(r);
            if t > peak.transmissibility {
                peak = ResponsePeak {
                    r,
                    transmissibility: t,
                };
            }
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::den_hartog::{optimal_damping_ratio, optimal_frequency_ratio};

    #[test]
    fn default_sweep_matches_resonance_region() {
        let sweep = FrequencySweep::default();
        let r = sweep.r_values();
        assert_eq!(r.len(), 100);
        assert_eq!(r[0], 0.5);
        assert_eq!(r[99], 1.5);
    }

    #[test]
    fn den_hartog_design_has_moderate_peak() {
        let objective = TmdObjective::new(0.0, FrequencySweep::default()).unwrap();
        let peak = objective.evaluate(&[0.2, 0.1494, 0.8333]).unwrap();
        assert!(peak.is_finite());
        assert!(peak > 1.0 && peak < 5.0, "peak = {}", peak);
    }

    #[test]
    fn evaluate_rejects_wrong_dimension() {
        let objective = TmdObjective::new(0.05, FrequencySweep::default()).unwrap();
        let err = objective.evaluate(&[0.2, 0.1]).unwrap_err();
        assert!(matches!(
            err,
            TmdError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn invalid_sweeps_are_rejected() {
        assert!(TmdObjective::new(0.05, FrequencySweep::new(1.5, 0.5, 100)).is_err());
        assert!(TmdObjective::new(0.05, FrequencySweep::new(0.5, 1.5, 1)).is_err());
        assert!(TmdObjective::new(0.05, FrequencySweep::new(0.5, f64::NAN, 100)).is_err());
        assert!(TmdObjective::new(-0.1, FrequencySweep::default()).is_err());
        assert!(TmdObjective::new(0.05, FrequencySweep::default().with_refinement(1)).is_err());
    }

    #[test]
    fn refinement_never_lowers_the_peak() {
        let coarse = TmdObjective::new(0.02, FrequencySweep::new(0.5, 1.5, 12)).unwrap();
        let refined =
            TmdObjective::new(0.02, FrequencySweep::new(0.5, 1.5, 12).with_refinement(200)).unwrap();
        for &mu in &[0.05, 0.1, 0.3] {
            let design = TmdDesign::new(mu, optimal_damping_ratio(mu), optimal_frequency_ratio(mu));
            let a = coarse.peak(&design);
            let b = refined.peak(&design);
            assert!(b.transmissibility >= a.transmissibility);
        }
    }

    #[test]
    fn undamped_absorber_peak_is_large() {
        // Two sharp undamped resonances around r = 1 dominate a lightly damped host
        let objective = TmdObjective::new(0.0, FrequencySweep::default().with_refinement(50)).unwrap();
        let well_damped = objective.evaluate(&[0.2, 0.25, 1.0 / 1.2]).unwrap();
        let undamped = objective.evaluate(&[0.2, 0.0, 1.0 / 1.2]).unwrap();
        assert!(undamped > well_damped);
    }
}
