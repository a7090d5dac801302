//! Tuned mass damper design for cantilevered cutting-tool holders.
//!
//! The host structure is reduced to a damped single-degree-of-freedom
//! oscillator carrying a damped vibration absorber. The crate provides:
//!
//! - the closed-form transmissibility of the two-mass system
//!   ([`mod@transmissibility`])
//! - Den Hartog's classical tuning ([`den_hartog`])
//! - a Bees Algorithm optimizer and the TMD peak-transmissibility search
//!   ([`optimization`])
//! - parametric response studies ([`analysis`])
//! - a cantilever beam model of the tool holder ([`cutting_tool`])
//!
//! Logging goes through the `log` facade; install any logger in the binary.

pub mod analysis;
pub mod cutting_tool;
pub mod den_hartog;
pub mod error;
pub mod optimization;
pub mod transmissibility;
pub mod types;

pub use cutting_tool::CuttingToolModel;
pub use den_hartog::DenHartogDesign;
pub use error::{TmdError, TmdResult};
pub use optimization::{
    optimize_for_sdof, optimize_tmd_parameters, BeesAlgorithm, BeesParameters, Bound,
    FrequencySweep, OptimizationAlgorithm, OptimizationRun, TmdDesign, TmdOptimizationResult,
    TmdSearchConfig,
};
pub use transmissibility::{single_dof_transmissibility, transmissibility};
pub use types::{Material, PhysicalTmdParameters, SdofModel};
