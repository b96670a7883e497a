use serde::Serialize;

use super::round_to;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTemplate {
    pub name: String,
    /// Fraction of the programme in weeks; all weights add up to 1.0.
    pub weight: f64,
    pub activities: Vec<String>,
}

impl PhaseTemplate {
    fn new(name: &str, weight: f64, activities: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            weight,
            activities: activities.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Duration heuristic and the ordered phase plan it is split into.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTemplate {
    pub base_days: u64,
    pub days_per_floor: u64,
    pub phases: Vec<PhaseTemplate>,
}

impl Default for ScheduleTemplate {
    fn default() -> Self {
        Self {
            base_days: 60,
            days_per_floor: 24,
            phases: vec![
                PhaseTemplate::new(
                    "Site Preparation",
                    0.10,
                    &["Site Cleaning", "Soil Testing", "Marking"],
                ),
                PhaseTemplate::new(
                    "Foundation Work",
                    0.20,
                    &["Excavation", "PCC Bedding", "Footing Concrete"],
                ),
                PhaseTemplate::new(
                    "Structure Development",
                    0.30,
                    &["Column Raising", "Slab Casting", "Staircase"],
                ),
                PhaseTemplate::new(
                    "Brickwork & Plastering",
                    0.20,
                    &["Wall Construction", "Internal Plastering", "External Plastering"],
                ),
                PhaseTemplate::new(
                    "Finishing",
                    0.20,
                    &["Flooring", "Painting", "Electrical & Plumbing", "Final Cleanup"],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulePhase {
    pub week_number: u64,
    pub phase_name: String,
    pub duration_weeks: u64,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEstimate {
    pub duration_days: u64,
    pub duration_weeks: u64,
    pub duration_months: f64,
    pub phases: Vec<SchedulePhase>,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    template: ScheduleTemplate,
}

impl ScheduleGenerator {
    pub fn new(template: ScheduleTemplate) -> Self {
        Self { template }
    }

    /// Programme length: the requested days when positive, otherwise the
    /// linear per-floor heuristic.
    pub fn duration_days(&self, floor_count: u32, user_days: Option<u64>) -> u64 {
        match user_days {
            Some(days) if days > 0 => days,
            _ => self
                .template
                .base_days
                .saturating_add(self.template.days_per_floor.saturating_mul(u64::from(floor_count))),
        }
    }

    pub fn generate(&self, floor_count: u32, user_days: Option<u64>) -> ScheduleEstimate {
        let duration_days = self.duration_days(floor_count, user_days);
        let duration_weeks = duration_days.div_ceil(7);
        let duration_months = round_to(duration_days as f64 / 30.0, 1);

        // Start weeks advance by each phase's floored share; rounding drift
        // against duration_weeks is left as is.
        let mut current_week = 1u64;
        let phases = self
            .template
            .phases
            .iter()
            .map(|phase| {
                let weeks = ((duration_weeks as f64 * phase.weight).floor() as u64).max(1);
                let entry = SchedulePhase {
                    week_number: current_week,
                    phase_name: phase.name.clone(),
                    duration_weeks: weeks,
                    activities: phase.activities.clone(),
                };
                current_week = current_week.saturating_add(weeks);
                entry
            })
            .collect();

        ScheduleEstimate {
            duration_days,
            duration_weeks,
            duration_months,
            phases,
        }
    }
}
