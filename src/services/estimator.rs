use crate::domain::cost::CostError;
use crate::domain::{
    CostEstimator, CostInputs, EstimationRates, LaborEstimator, MaterialEstimator, ProjectEstimate,
    ProjectInput, ResourceOptimizer, ScheduleGenerator,
};

/// Runs the estimators in dependency order: schedule, materials and labor
/// from the normalized input, then costs from their outputs.
#[derive(Debug, Clone)]
pub struct EstimationPipeline {
    materials: MaterialEstimator,
    labor: LaborEstimator,
    schedule: ScheduleGenerator,
    costs: CostEstimator,
    optimizer: ResourceOptimizer,
}

impl Default for EstimationPipeline {
    fn default() -> Self {
        Self::new(EstimationRates::default())
    }
}

impl EstimationPipeline {
    pub fn new(rates: EstimationRates) -> Self {
        Self {
            materials: MaterialEstimator::new(rates.materials),
            labor: LaborEstimator::new(rates.labor),
            schedule: ScheduleGenerator::new(rates.schedule),
            costs: CostEstimator::new(rates.costs),
            optimizer: rates.optimizer,
        }
    }

    pub fn schedule(&self) -> &ScheduleGenerator {
        &self.schedule
    }

    pub fn run(&self, input: &ProjectInput) -> Result<ProjectEstimate, CostError> {
        let schedule = self
            .schedule
            .generate(input.floor_count(), input.construction_days);
        let materials = self.materials.estimate(input.total_construction_area());
        let labor = self
            .labor
            .estimate(input.built_up_area, schedule.duration_days);

        let costs = self.costs.estimate(
            input.cost_strategy,
            CostInputs {
                built_up_area: input.built_up_area,
                cost_per_sq_yard: input.cost_per_sq_yard,
                materials: &materials,
                total_labor_days: labor.total_labor_days,
                daily_wage: input.daily_wage,
            },
        )?;

        let optimization = input.optimize.then(|| {
            self.optimizer
                .plan(&materials, labor.total_labor_days, schedule.duration_days)
        });

        Ok(ProjectEstimate {
            materials,
            labor,
            schedule,
            costs,
            optimization,
        })
    }
}
