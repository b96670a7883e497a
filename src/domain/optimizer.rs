use serde::Serialize;

use super::materials::MaterialEstimate;
use super::round_to;

/// Material quantities after procurement savings; fractional because the
/// reduction is applied to whole-unit counts too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizedMaterials {
    pub steel_tons: f64,
    pub cement_bags: f64,
    pub sand_tons: f64,
    pub water_liters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizationPlan {
    pub waste_reduction: f64,
    pub optimized_materials: OptimizedMaterials,
    pub balanced_crew: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceOptimizer {
    /// Share of each material saved through bulk buying and waste control.
    pub waste_reduction: f64,
    pub minimum_crew: u64,
}

impl Default for ResourceOptimizer {
    fn default() -> Self {
        Self {
            waste_reduction: 0.05,
            minimum_crew: 2,
        }
    }
}

impl ResourceOptimizer {
    pub fn optimize_material_waste(&self, materials: &MaterialEstimate) -> OptimizedMaterials {
        let keep = 1.0 - self.waste_reduction;
        OptimizedMaterials {
            steel_tons: round_to(materials.steel_tons * keep, 2),
            cement_bags: round_to(materials.cement_bags as f64 * keep, 2),
            sand_tons: round_to(materials.sand_tons * keep, 2),
            water_liters: round_to(materials.water_liters as f64 * keep, 2),
        }
    }

    /// Steady crew size that finishes `total_labor_days` in `target_days`.
    pub fn balance_workforce(&self, total_labor_days: u64, target_days: u64) -> u64 {
        if target_days == 0 {
            return self.minimum_crew;
        }
        let ideal = (total_labor_days as f64 / target_days as f64).round() as u64;
        ideal.max(self.minimum_crew)
    }

    pub fn plan(&self, materials: &MaterialEstimate, total_labor_days: u64, target_days: u64) -> OptimizationPlan {
        OptimizationPlan {
            waste_reduction: self.waste_reduction,
            optimized_materials: self.optimize_material_waste(materials),
            balanced_crew: self.balance_workforce(total_labor_days, target_days),
        }
    }
}
