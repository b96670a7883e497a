use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::cost::CostEstimate;
use super::labor::LaborEstimate;
use super::materials::MaterialEstimate;
use super::optimizer::OptimizationPlan;
use super::schedule::{ScheduleEstimate, SchedulePhase};

/// Everything the estimators derive for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEstimate {
    pub materials: MaterialEstimate,
    pub labor: LaborEstimate,
    pub schedule: ScheduleEstimate,
    pub costs: CostEstimate,
    pub optimization: Option<OptimizationPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timeline {
    pub duration_days: u64,
    pub duration_weeks: u64,
    pub duration_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blueprint {
    pub floor_name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectResult {
    pub project_id: String,
    pub timestamp: DateTime<Utc>,
    pub timeline: Timeline,
    pub costs: CostEstimate,
    pub materials: MaterialEstimate,
    pub labor: LaborEstimate,
    pub schedule: Vec<SchedulePhase>,
    pub blueprints: Vec<Blueprint>,
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationPlan>,
}

impl ProjectResult {
    pub fn assemble(estimate: ProjectEstimate, blueprints: Vec<Blueprint>, insights: Vec<String>) -> Self {
        let ProjectEstimate {
            materials,
            labor,
            schedule,
            costs,
            optimization,
        } = estimate;
        let ScheduleEstimate {
            duration_days,
            duration_weeks,
            duration_months,
            phases,
        } = schedule;

        Self {
            project_id: generate_project_id(),
            timestamp: Utc::now(),
            timeline: Timeline {
                duration_days,
                duration_weeks,
                duration_months,
            },
            costs,
            materials,
            labor,
            schedule: phases,
            blueprints,
            insights,
            optimization,
        }
    }
}

/// Opaque identifier of the form `CONST-1A2B3C4D`.
pub fn generate_project_id() -> String {
    let simple = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("CONST-{}", &simple[..8])
}
