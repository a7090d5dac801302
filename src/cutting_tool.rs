//! Cantilevered cutting-tool holder reduced to an equivalent SDOF host.
//!
//! The holder is a uniform circular bar clamped at one end. Natural
//! frequencies use the classical cantilever constants
//!
//! ```text
//! f_n = K_n / (2π) · sqrt(E I g / (w L⁴))
//! ```
//!
//! with `w` the mass per unit length (kg/m) and `g = 9.81 m/s²`.

use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};
use crate::types::{Material, SdofModel};

/// Cantilever frequency constants K_n of the first five bending modes.
pub const CANTILEVER_MODE_CONSTANTS: [f64; 5] = [3.52, 22.0, 61.7, 121.0, 200.0];

const GRAVITY: f64 = 9.81;

/// Circular cutting-tool holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingToolModel {
    /// Overhang length (m)
    pub length: f64,
    /// Diameter (m)
    pub diameter: f64,
    pub material: Material,
    /// Total mass (kg), either given or computed from density
    pub mass: f64,
}

impl Default for CuttingToolModel {
    /// 808 mm × 20 mm steel holder of 3.94 kg.
    fn default() -> Self {
        Self {
            length: 0.808,
            diameter: 0.020,
            material: Material::steel(),
            mass: 3.94,
        }
    }
}

impl CuttingToolModel {
    /// Create a holder from dimensions in millimetres.
    ///
    /// When `mass_kg` is `None` the mass is computed as `rho · A · L`.
    pub fn new(
        length_mm: f64,
        diameter_mm: f64,
        material: Material,
        mass_kg: Option<f64>,
    ) -> TmdResult<Self> {
        for (name, value) in [("length", length_mm), ("diameter", diameter_mm)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TmdError::configuration(format!(
                    "tool {name} must be positive and finite, got {value} mm"
                )));
            }
        }
        if !(material.e > 0.0 && material.rho > 0.0) {
            return Err(TmdError::configuration(format!(
                "material '{}' needs positive modulus and density",
                material.name
            )));
        }

        let length = length_mm / 1000.0;
        let diameter = diameter_mm / 1000.0;
        let mass = match mass_kg {
            Some(mass) if !(mass > 0.0 && mass.is_finite()) => {
                return Err(TmdError::configuration(format!(
                    "tool mass must be positive and finite, got {mass} kg"
                )));
            }
            Some(mass) => mass,
            None => material.rho * PI * (diameter / 2.0).powi(2) * length,
        };

        Ok(Self {
            length,
            diameter,
            material,
            mass,
        })
    }

    /// Create a holder with a material preset looked up by key.
    pub fn with_material_key(
        length_mm: f64,
        diameter_mm: f64,
        material: &str,
        mass_kg: Option<f64>,
    ) -> TmdResult<Self> {
        Self::new(length_mm, diameter_mm, Material::by_key(material)?, mass_kg)
    }

    /// Cross-sectional area (m²).
    pub fn area(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2)
    }

    /// Second moment of area (m⁴).
    pub fn moment_of_inertia(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(4) / 4.0
    }

    /// Mass per unit length (kg/m).
    pub fn mass_per_length(&self) -> f64 {
        self.mass / self.length
    }

    /// sqrt(E I g / (w L⁴)), shared by every mode.
    fn frequency_scale(&self) -> f64 {
        let w = self.mass_per_length();
        (self.material.e * self.moment_of_inertia() * GRAVITY / (w * self.length.powi(4))).sqrt()
    }

    /// Bending natural frequencies (Hz) of the first `modes` modes, at most five.
    pub fn natural_frequencies(&self, modes: usize) -> Vec<f64> {
        let scale = self.frequency_scale();
        CANTILEVER_MODE_CONSTANTS
            .iter()
            .take(modes)
            .map(|k| k / (2.0 * PI) * scale)
            .collect()
    }

    /// First bending frequency (rad/s).
    pub fn fundamental_angular_frequency(&self) -> f64 {
        CANTILEVER_MODE_CONSTANTS[0] * self.frequency_scale()
    }

    /// Tip stiffness 3EI/L³ (N/m).
    pub fn stiffness(&self) -> f64 {
        3.0 * self.material.e * self.moment_of_inertia() / self.length.powi(3)
    }

    /// Viscous damping coefficient for damping ratio `zeta` (N·s/m).
    pub fn damping_coefficient(&self, zeta: f64) -> f64 {
        zeta * 2.0 * self.mass * self.fundamental_angular_frequency()
    }

    /// Equivalent SDOF host for absorber design.
    ///
    /// The stiffness is the static tip stiffness and the frequency is the
    /// first bending mode, so `k / m` generally differs from `w1²`.
    pub fn to_single_dof_model(&self, zeta: f64) -> SdofModel {
        let sdof = SdofModel::new(
            self.mass,
            self.stiffness(),
            self.damping_coefficient(zeta),
            self.fundamental_angular_frequency(),
        );
        debug!(
            "cutting tool: m1={:.3} kg, k1={:.1} N/m, c1={:.3} N·s/m, w1={:.2} rad/s",
            sdof.mass, sdof.stiffness, sdof.damping, sdof.natural_frequency
        );
        sdof
    }
}
