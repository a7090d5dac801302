//! Parametric response studies of the main system with a vibration absorber.
//!
//! Each study varies one absorber parameter and tabulates transmissibility
//! over `r ∈ [0.1, 2.0]` in steps of 0.005. Rows of the response matrix
//! follow `r_values`, columns follow `parameter_values`.
//!
//! When the `parallel` feature is enabled the columns are computed with
//! Rayon; otherwise they are computed sequentially.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::den_hartog::{optimal_damping_ratio, optimal_frequency_ratio};
use crate::error::{TmdError, TmdResult};
use crate::optimization::design::TmdDesign;
use crate::optimization::objective::{FrequencySweep, TmdObjective};
use crate::transmissibility::{
    arange, linspace, peak, single_dof_transmissibility, transmissibility_curve,
};

/// Excitation ratio grid of the parametric studies.
pub const STUDY_R_START: f64 = 0.1;
pub const STUDY_R_END: f64 = 2.0;
pub const STUDY_R_STEP: f64 = 0.005;

/// Absorber damping ratio used by the frequency ratio study.
pub const FREQUENCY_STUDY_DAMPING: f64 = 0.058;

/// Sample count of the with/without absorber comparison.
pub const COMPARISON_POINTS: usize = 400;

fn study_r_values() -> Vec<f64> {
    arange(STUDY_R_START, STUDY_R_END + STUDY_R_STEP, STUDY_R_STEP)
}

/// Parameter varied across the columns of a study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyParameter {
    FrequencyRatio,
    DampingRatio,
    MassRatio,
}

/// Absorber configuration of one response column.
#[derive(Debug, Clone, Copy)]
struct Column {
    beta: f64,
    mu: f64,
    nu_a: f64,
}

/// Response grid of one parametric study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametricStudy {
    pub parameter: StudyParameter,
    pub r_values: Vec<f64>,
    pub parameter_values: Vec<f64>,
    /// `r_values.len()` × `parameter_values.len()` transmissibility values
    pub response: DMatrix<f64>,
    /// Main system damping ratio used for every column
    pub main_damping_ratio: f64,
}

impl ParametricStudy {
    /// Response curve of column `index`.
    pub fn curve(&self, index: usize) -> Vec<f64> {
        self.response.column(index).iter().copied().collect()
    }

    /// Peak transmissibility of every column.
    pub fn column_peaks(&self) -> Vec<f64> {
        self.response
            .column_iter()
            .map(|column| column.iter().copied().fold(0.0, f64::max))
            .collect()
    }

    pub fn to_json(&self) -> TmdResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn check_mass_ratio(mu: f64) -> TmdResult<()> {
    if !(mu > 0.0 && mu.is_finite()) {
        return Err(TmdError::configuration(format!(
            "mass ratio must be positive and finite, got {mu}"
        )));
    }
    Ok(())
}

fn check_main_damping(nu_b: f64) -> TmdResult<()> {
    if !(nu_b >= 0.0 && nu_b.is_finite()) {
        return Err(TmdError::configuration(format!(
            "main system damping ratio must be finite and non-negative, got {nu_b}"
        )));
    }
    Ok(())
}

/// Peak of the bare host over `r_values`.
///
/// An undamped host is singular at r = 1, so its peak is infinite whenever
/// the grid spans resonance, even if no sample lands on r = 1 exactly.
fn bare_host_peak(r_values: &[f64], nu_b: f64) -> f64 {
    let spans_resonance = match (r_values.first(), r_values.last()) {
        (Some(&first), Some(&last)) => first <= 1.0 && last >= 1.0,
        _ => false,
    };
    if nu_b == 0.0 && spans_resonance {
        return f64::INFINITY;
    }
    r_values
        .iter()
        .map(|&r| single_dof_transmissibility(r, nu_b))
        .fold(0.0, f64::max)
}

fn column_curve(r_values: &[f64], column: &Column, nu_b: f64) -> Vec<f64> {
    transmissibility_curve(r_values, column.beta, column.mu, column.nu_a, nu_b)
}

#[cfg(feature = "parallel")]
fn compute_columns(r_values: &[f64], columns: &[Column], nu_b: f64) -> Vec<Vec<f64>> {
    columns
        .par_iter()
        .map(|column| column_curve(r_values, column, nu_b))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn compute_columns(r_values: &[f64], columns: &[Column], nu_b: f64) -> Vec<Vec<f64>> {
    columns
        .iter()
        .map(|column| column_curve(r_values, column, nu_b))
        .collect()
}

fn build_study(
    parameter: StudyParameter,
    parameter_values: Vec<f64>,
    columns: &[Column],
    nu_b: f64,
) -> ParametricStudy {
    let r_values = study_r_values();
    let curves = compute_columns(&r_values, columns, nu_b);
    let response = DMatrix::from_fn(r_values.len(), curves.len(), |i, j| curves[j][i]);
    debug!(
        "analysis: {:?} study with {} columns over {} excitation ratios",
        parameter,
        curves.len(),
        r_values.len()
    );
    ParametricStudy {
        parameter,
        r_values,
        parameter_values,
        response,
        main_damping_ratio: nu_b,
    }
}

/// Vary the frequency ratio β ∈ {0.5, 0.6, …, 1.0} at absorber damping 0.058.
pub fn frequency_ratio_study(mu: f64, nu_b: f64) -> TmdResult<ParametricStudy> {
    check_mass_ratio(mu)?;
    check_main_damping(nu_b)?;
    let betas: Vec<f64> = (5..=10).map(|i| i as f64 / 10.0).collect();
    let columns: Vec<Column> = betas
        .iter()
        .map(|&beta| Column {
            beta,
            mu,
            nu_a: FREQUENCY_STUDY_DAMPING,
        })
        .collect();
    Ok(build_study(StudyParameter::FrequencyRatio, betas, &columns, nu_b))
}

/// Vary the absorber damping ratio at the optimal frequency ratio.
///
/// Damping values are 0.1, the optimum for `mu`, 0.3, 0.6 and 0.99.
pub fn damping_ratio_study(mu: f64, nu_b: f64) -> TmdResult<ParametricStudy> {
    check_mass_ratio(mu)?;
    check_main_damping(nu_b)?;
    let beta = optimal_frequency_ratio(mu);
    let dampings = vec![0.1, optimal_damping_ratio(mu), 0.3, 0.6, 0.99];
    let columns: Vec<Column> = dampings
        .iter()
        .map(|&nu_a| Column { beta, mu, nu_a })
        .collect();
    Ok(build_study(StudyParameter::DampingRatio, dampings, &columns, nu_b))
}

/// Vary the mass ratio μ ∈ {0.05, 0.10, …, 0.55}, each column tuned to its
/// own optimal frequency and damping ratios.
pub fn mass_ratio_study(nu_b: f64) -> TmdResult<ParametricStudy> {
    check_main_damping(nu_b)?;
    let mass_ratios: Vec<f64> = (1..=11).map(|i| i as f64 * 0.05).collect();
    let columns: Vec<Column> = mass_ratios
        .iter()
        .map(|&mu| Column {
            beta: optimal_frequency_ratio(mu),
            mu,
            nu_a: optimal_damping_ratio(mu),
        })
        .collect();
    Ok(build_study(StudyParameter::MassRatio, mass_ratios, &columns, nu_b))
}

/// Response of the main system with and without an absorber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorberComparison {
    pub r_values: Vec<f64>,
    pub with_tmd: Vec<f64>,
    pub without_tmd: Vec<f64>,
    pub peak_with_tmd: f64,
    pub peak_without_tmd: f64,
    /// 100 (without − with) / without; 100 when the bare system is singular
    pub reduction_percent: f64,
}

/// Compare the main system alone against the system carrying an absorber
/// `(mu, beta, ksi)` over `r ∈ [0.1, 2.0]`.
pub fn compare_with_without_tmd(
    mu: f64,
    beta: f64,
    ksi: f64,
    nu_b: f64,
) -> TmdResult<AbsorberComparison> {
    check_mass_ratio(mu)?;
    check_main_damping(nu_b)?;
    let r_values = linspace(STUDY_R_START, STUDY_R_END, COMPARISON_POINTS);
    let with_tmd = transmissibility_curve(&r_values, beta, mu, ksi, nu_b);
    let without_tmd: Vec<f64> = r_values
        .iter()
        .map(|&r| single_dof_transmissibility(r, nu_b))
        .collect();

    let peak_with_tmd = peak(&with_tmd);
    let peak_without_tmd = bare_host_peak(&r_values, nu_b);
    let reduction_percent = if peak_without_tmd.is_infinite() {
        100.0
    } else {
        100.0 * (peak_without_tmd - peak_with_tmd) / peak_without_tmd
    };

    Ok(AbsorberComparison {
        r_values,
        with_tmd,
        without_tmd,
        peak_with_tmd,
        peak_without_tmd,
        reduction_percent,
    })
}

/// Den Hartog design against an optimized design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignComparison {
    pub classical: TmdDesign,
    pub optimized: TmdDesign,
    pub classical_peak: f64,
    pub optimized_peak: f64,
    /// 100 (classical − optimized) / classical
    pub improvement_percent: f64,
}

/// Score the Den Hartog design for `mu_classical` and an optimized design
/// with the same peak-transmissibility sweep.
pub fn compare_classical_vs_optimized(
    mu_classical: f64,
    optimized: &TmdDesign,
    nu_b: f64,
    sweep: FrequencySweep,
) -> TmdResult<DesignComparison> {
    check_mass_ratio(mu_classical)?;
    let objective = TmdObjective::new(nu_b, sweep)?;
    let classical = TmdDesign::new(
        mu_classical,
        optimal_damping_ratio(mu_classical),
        optimal_frequency_ratio(mu_classical),
    );

    let classical_peak = objective.peak(&classical).transmissibility;
    let optimized_peak = objective.peak(optimized).transmissibility;
    let improvement_percent = 100.0 * (classical_peak - optimized_peak) / classical_peak;

    Ok(DesignComparison {
        classical,
        optimized: *optimized,
        classical_peak,
        optimized_peak,
        improvement_percent,
    })
}

/// Den Hartog absorber against the bare host at one mass ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessPoint {
    pub mass_ratio: f64,
    pub peak_transmissibility: f64,
    /// Peak of the host without absorber over the same grid
    pub peak_without_tmd: f64,
    /// 1 − peak / peak_without_tmd; 1 when the bare host is singular
    pub effectiveness: f64,
}

/// Peak transmissibility of the Den Hartog design for each mass ratio and
/// its effectiveness relative to the bare host.
pub fn tmd_effectiveness(nu_b: f64, mass_ratios: &[f64]) -> TmdResult<Vec<EffectivenessPoint>> {
    check_main_damping(nu_b)?;
    for &mu in mass_ratios {
        check_mass_ratio(mu)?;
    }
    let columns: Vec<Column> = mass_ratios
        .iter()
        .map(|&mu| Column {
            beta: optimal_frequency_ratio(mu),
            mu,
            nu_a: optimal_damping_ratio(mu),
        })
        .collect();
    let r_values = study_r_values();
    let curves = compute_columns(&r_values, &columns, nu_b);
    let peak_without_tmd = bare_host_peak(&r_values, nu_b);

    Ok(mass_ratios
        .iter()
        .zip(&curves)
        .map(|(&mass_ratio, curve)| {
            let peak_transmissibility = peak(curve);
            let effectiveness = if peak_without_tmd.is_infinite() {
                1.0
            } else {
                1.0 - peak_transmissibility / peak_without_tmd
            };
            EffectivenessPoint {
                mass_ratio,
                peak_transmissibility,
                peak_without_tmd,
                effectiveness,
            }
        })
        .collect())
}
