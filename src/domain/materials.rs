use serde::Serialize;

use super::round_to;

/// Thumb-rule quantities per square yard of total construction area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialCoefficients {
    pub steel_tons_per_sq_yard: f64,
    pub cement_bags_per_sq_yard: f64,
    pub sand_tons_per_sq_yard: f64,
    pub water_liters_per_sq_yard: f64,
}

impl Default for MaterialCoefficients {
    fn default() -> Self {
        Self {
            steel_tons_per_sq_yard: 0.0035,
            cement_bags_per_sq_yard: 0.4,
            sand_tons_per_sq_yard: 0.6,
            water_liters_per_sq_yard: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialEstimate {
    pub steel_tons: f64,
    pub cement_bags: u64,
    pub sand_tons: f64,
    pub water_liters: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialEstimator {
    coefficients: MaterialCoefficients,
}

impl MaterialEstimator {
    pub fn new(coefficients: MaterialCoefficients) -> Self {
        Self { coefficients }
    }

    /// Quantities for the whole building (built-up area times floor count).
    pub fn estimate(&self, total_construction_area: f64) -> MaterialEstimate {
        let area = total_construction_area.max(0.0);
        let c = &self.coefficients;

        MaterialEstimate {
            steel_tons: round_to(area * c.steel_tons_per_sq_yard, 1),
            cement_bags: (area * c.cement_bags_per_sq_yard).floor() as u64,
            sand_tons: round_to(area * c.sand_tons_per_sq_yard, 1),
            water_liters: (area * c.water_liters_per_sq_yard).floor() as u64,
        }
    }
}
