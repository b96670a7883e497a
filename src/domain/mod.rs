//! Estimation domain: request normalization, the individual estimators and
//! the assembled project result. Everything here is synchronous and pure.

pub mod cost;
pub mod floors;
pub mod input;
pub mod labor;
pub mod materials;
pub mod optimizer;
pub mod result;
pub mod schedule;

pub use cost::{CostEstimator, CostInputs, CostRates};
pub use floors::FloorSpec;
pub use input::{normalize, CalculateRequest, NormalizeError, ProjectInput};
pub use labor::{LaborEstimator, LaborRates};
pub use materials::{MaterialCoefficients, MaterialEstimator};
pub use optimizer::ResourceOptimizer;
pub use result::{Blueprint, ProjectEstimate, ProjectResult};
pub use schedule::{ScheduleGenerator, ScheduleTemplate};

/// Fixed rate and coefficient tables, injected into each estimator.
#[derive(Debug, Clone, Default)]
pub struct EstimationRates {
    pub materials: MaterialCoefficients,
    pub labor: LaborRates,
    pub schedule: ScheduleTemplate,
    pub costs: CostRates,
    pub optimizer: ResourceOptimizer,
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
