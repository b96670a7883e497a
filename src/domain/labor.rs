use serde::Serialize;

/// Fraction of the daily crew assigned to a role, and the smallest crew
/// that role may have once any workers are on site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleShare {
    pub share: f64,
    pub minimum: u64,
}

impl RoleShare {
    fn headcount(&self, workers: u64) -> u64 {
        if workers == 0 {
            return 0;
        }
        ((workers as f64 * self.share).ceil() as u64).max(self.minimum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaborRates {
    pub labor_days_per_sq_yard: f64,
    pub default_duration_days: u64,
    pub masons: RoleShare,
    pub helpers: RoleShare,
    pub steel_workers: RoleShare,
    pub carpenters: RoleShare,
    pub supervisors: RoleShare,
}

impl Default for LaborRates {
    fn default() -> Self {
        Self {
            labor_days_per_sq_yard: 0.5,
            default_duration_days: 180,
            masons: RoleShare { share: 0.30, minimum: 1 },
            helpers: RoleShare { share: 0.40, minimum: 2 },
            steel_workers: RoleShare { share: 0.10, minimum: 1 },
            carpenters: RoleShare { share: 0.10, minimum: 1 },
            supervisors: RoleShare { share: 0.10, minimum: 1 },
        }
    }
}

/// Per-role daily headcount. Each role is rounded independently, so the
/// counts need not add up to the total crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDistribution {
    #[serde(rename = "Masons")]
    pub masons: u64,
    #[serde(rename = "Helpers")]
    pub helpers: u64,
    #[serde(rename = "Steel Workers")]
    pub steel_workers: u64,
    #[serde(rename = "Carpenters")]
    pub carpenters: u64,
    #[serde(rename = "Supervisors")]
    pub supervisors: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaborEstimate {
    #[serde(rename = "total_workers_required")]
    pub total_workers: u64,
    pub total_labor_days: u64,
    pub role_distribution: RoleDistribution,
}

#[derive(Debug, Clone, Default)]
pub struct LaborEstimator {
    rates: LaborRates,
}

impl LaborEstimator {
    pub fn new(rates: LaborRates) -> Self {
        Self { rates }
    }

    /// Workforce for `area` sq yards spread over `duration_days`.
    ///
    /// A zero duration falls back to the default programme length.
    pub fn estimate(&self, area: f64, duration_days: u64) -> LaborEstimate {
        let r = &self.rates;
        let total_labor_days = (area.max(0.0) * r.labor_days_per_sq_yard).floor() as u64;
        let duration_days = match duration_days {
            0 => r.default_duration_days.max(1),
            days => days,
        };
        let workers = total_labor_days.div_ceil(duration_days);

        LaborEstimate {
            total_workers: workers,
            total_labor_days,
            role_distribution: RoleDistribution {
                masons: r.masons.headcount(workers),
                helpers: r.helpers.headcount(workers),
                steel_workers: r.steel_workers.headcount(workers),
                carpenters: r.carpenters.headcount(workers),
                supervisors: r.supervisors.headcount(workers),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thousand_sq_yards_over_132_days() {
        let labor = LaborEstimator::default().estimate(1000.0, 132);
        assert_eq!(labor.total_labor_days, 500);
        assert_eq!(labor.total_workers, 4);
        assert_eq!(
            labor.role_distribution,
            RoleDistribution {
                masons: 2,
                helpers: 2,
                steel_workers: 1,
                carpenters: 1,
                supervisors: 1,
            }
        );
    }

    #[test]
    fn zero_duration_uses_default_programme() {
        let labor = LaborEstimator::default().estimate(10_000.0, 0);
        // 5000 labor-days over 180 days
        assert_eq!(labor.total_workers, 28);
        assert_eq!(labor.role_distribution.masons, 9);
        assert_eq!(labor.role_distribution.helpers, 12);
        assert_eq!(labor.role_distribution.supervisors, 3);
    }

    #[test]
    fn zero_default_duration_does_not_divide_by_zero() {
        let estimator = LaborEstimator::new(LaborRates {
            default_duration_days: 0,
            ..LaborRates::default()
        });
        let labor = estimator.estimate(100.0, 0);
        assert_eq!(labor.total_workers, 50);
    }

    #[test]
    fn small_crew_still_gets_two_helpers() {
        let labor = LaborEstimator::default().estimate(50.0, 180);
        assert_eq!(labor.total_workers, 1);
        assert_eq!(labor.role_distribution.helpers, 2);
        assert_eq!(labor.role_distribution.masons, 1);
    }

    #[test]
    fn serializes_with_display_role_names() {
        let labor = LaborEstimator::default().estimate(1000.0, 132);
        let json = serde_json::to_value(labor).unwrap();
        assert_eq!(json["total_workers_required"], 4);
        assert_eq!(json["role_distribution"]["Steel Workers"], 1);
    }

    proptest! {
        #[test]
        fn roles_respect_minimums(area in 50.0f64..10_000.0, days in 1u64..2_000) {
            let labor = LaborEstimator::default().estimate(area, days);
            prop_assert!(labor.total_workers > 0);
            let roles = labor.role_distribution;
            prop_assert!(roles.masons >= 1);
            prop_assert!(roles.helpers >= 2);
            prop_assert!(roles.steel_workers >= 1);
            prop_assert!(roles.carpenters >= 1);
            prop_assert!(roles.supervisors >= 1);
        }
    }
}
