//! Shared value records passed between the beam model, the optimizer and
//! reporting code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TmdError, TmdResult};

/// Material keys understood by [`Material::by_key`].
pub const MATERIAL_KEYS: &[&str] = &["steel", "aluminum", "carbide"];

/// Material properties of a tool holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Young's modulus (Pa)
    pub e: f64,
    /// Density (kg/m³)
    pub rho: f64,
    /// Poisson's ratio
    pub nu: f64,
}

impl Material {
    pub fn new(name: impl Into<String>, e: f64, rho: f64, nu: f64) -> Self {
        Self {
            name: name.into(),
            e,
            rho,
            nu,
        }
    }

    /// Tool steel
    pub fn steel() -> Self {
        Self::new("steel", 210.0e9, 7850.0, 0.30)
    }

    /// Aluminum alloy
    pub fn aluminum() -> Self {
        Self::new("aluminum", 69.0e9, 2700.0, 0.33)
    }

    /// Cemented carbide
    pub fn carbide() -> Self {
        Self::new("carbide", 550.0e9, 15000.0, 0.24)
    }

    /// Look up a material preset by key.
    pub fn by_key(key: &str) -> TmdResult<Self> {
        match key {
            "steel" => Ok(Self::steel()),
            "aluminum" => Ok(Self::aluminum()),
            "carbide" => Ok(Self::carbide()),
            other => Err(TmdError::configuration(format!(
                "material '{other}' not recognized, available materials: {MATERIAL_KEYS:?}"
            ))),
        }
    }
}

/// Equivalent single-degree-of-freedom oscillator of the host structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdofModel {
    /// Modal mass m1 (kg)
    pub mass: f64,
    /// Stiffness k1 (N/m)
    pub stiffness: f64,
    /// Viscous damping coefficient c1 (N·s/m)
    pub damping: f64,
    /// Natural angular frequency w1 (rad/s)
    pub natural_frequency: f64,
}

impl SdofModel {
    pub fn new(mass: f64, stiffness: f64, damping: f64, natural_frequency: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
            natural_frequency,
        }
    }

    /// Damping ratio c / (2 m w).
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * self.mass * self.natural_frequency)
    }
}

/// Physical absorber component values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalTmdParameters {
    /// Absorber mass m2 (kg)
    pub mass: f64,
    /// Absorber natural angular frequency w2 (rad/s)
    pub natural_frequency: f64,
    /// Absorber stiffness k2 (N/m)
    pub stiffness: f64,
    /// Absorber damping coefficient c2 (N·s/m)
    pub damping_coefficient: f64,
}

impl fmt::Display for PhysicalTmdParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TMD components:")?;
        writeln!(f, "  Mass:      {:.4} kg", self.mass)?;
        writeln!(f, "  Frequency: {:.2} rad/s", self.natural_frequency)?;
        writeln!(f, "  Stiffness: {:.1} N/m", self.stiffness)?;
        write!(f, "  Damping:   {:.4} N·s/m", self.damping_coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn material_lookup_matches_presets() {
        for key in MATERIAL_KEYS {
            let material = Material::by_key(key).expect("preset should exist");
            assert_eq!(material.name, *key);
            assert!(material.e > 0.0 && material.rho > 0.0);
        }
    }

    #[test]
    fn unknown_material_is_rejected() {
        let err = Material::by_key("titanium").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("titanium"));
    }

    #[test]
    fn sdof_damping_ratio_inverts_critical_damping() {
        let sdof = SdofModel::new(2.0, 8.0e5, 2.0 * 0.05 * 2.0 * 632.0, 632.0);
        assert!((sdof.damping_ratio() - 0.05).abs() < TOL);
    }
}
