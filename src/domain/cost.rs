//! Project cost estimation.
//!
//! Two strategies are supported and kept separate:
//! - [`CostStrategy::FlatRate`]: built-up area times a per-sq-yard rate.
//! - [`CostStrategy::MaterialQuantity`]: priced steel, cement and sand plus
//!   a surcharge for other materials.
//!
//! Both add the same labor cost and overhead. Amounts are exact decimals
//! rounded to paise, and the total is the sum of the rounded components.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use super::materials::MaterialEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostStrategy {
    #[default]
    FlatRate,
    MaterialQuantity,
}

impl CostStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "flat_rate" | "flat" => Some(Self::FlatRate),
            "material_quantity" | "materials" => Some(Self::MaterialQuantity),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CostError {
    #[error("{0} is outside the representable monetary range")]
    OutOfRange(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostRates {
    pub overhead_fraction: Decimal,
    pub steel_per_ton: Decimal,
    pub cement_per_bag: Decimal,
    pub sand_per_ton: Decimal,
    /// Bricks, paint, timber and the like, as a fraction of the structural subtotal.
    pub other_materials_fraction: Decimal,
    pub currency: &'static str,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            overhead_fraction: Decimal::new(10, 2),
            steel_per_ton: Decimal::from(60_000),
            cement_per_bag: Decimal::from(420),
            sand_per_ton: Decimal::from(3_000),
            other_materials_fraction: Decimal::new(5, 1),
            currency: "INR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub steel: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cement: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sand: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub others: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub strategy: CostStrategy,
    #[serde(with = "rust_decimal::serde::float")]
    pub material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub overhead_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub currency: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<CostBreakdown>,
}

/// Everything either strategy may need; each one reads only its own inputs.
#[derive(Debug, Clone, Copy)]
pub struct CostInputs<'a> {
    pub built_up_area: f64,
    pub cost_per_sq_yard: f64,
    pub materials: &'a MaterialEstimate,
    pub total_labor_days: u64,
    pub daily_wage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    rates: CostRates,
}

impl CostEstimator {
    pub fn new(rates: CostRates) -> Self {
        Self { rates }
    }

    pub fn estimate(&self, strategy: CostStrategy, inputs: CostInputs<'_>) -> Result<CostEstimate, CostError> {
        match strategy {
            CostStrategy::FlatRate => self.flat_rate(
                inputs.built_up_area,
                inputs.cost_per_sq_yard,
                inputs.total_labor_days,
                inputs.daily_wage,
            ),
            CostStrategy::MaterialQuantity => {
                self.material_quantity(inputs.materials, inputs.total_labor_days, inputs.daily_wage)
            }
        }
    }

    /// Material cost as built-up area times the quoted rate per sq yard.
    pub fn flat_rate(
        &self,
        area: f64,
        cost_per_sq_yard: f64,
        total_labor_days: u64,
        daily_wage: f64,
    ) -> Result<CostEstimate, CostError> {
        let area = to_decimal(area, "area")?;
        let rate = to_decimal(cost_per_sq_yard, "cost per sq yard")?;
        let material_cost = money(checked_mul(area, rate, "material cost")?);
        let labor_cost = self.labor_cost(total_labor_days, daily_wage)?;

        self.finish(CostStrategy::FlatRate, material_cost, labor_cost, None)
    }

    /// Material cost priced from estimated quantities.
    pub fn material_quantity(
        &self,
        materials: &MaterialEstimate,
        total_labor_days: u64,
        daily_wage: f64,
    ) -> Result<CostEstimate, CostError> {
        let r = &self.rates;
        let steel_tons = to_decimal(materials.steel_tons, "steel tons")?;
        let sand_tons = to_decimal(materials.sand_tons, "sand tons")?;

        let steel = money(checked_mul(steel_tons, r.steel_per_ton, "steel cost")?);
        let cement = money(checked_mul(
            Decimal::from(materials.cement_bags),
            r.cement_per_bag,
            "cement cost",
        )?);
        let sand = money(checked_mul(sand_tons, r.sand_per_ton, "sand cost")?);

        let structural = checked_add(checked_add(steel, cement, "material cost")?, sand, "material cost")?;
        let others = money(checked_mul(structural, r.other_materials_fraction, "other materials cost")?);
        let material_cost = checked_add(structural, others, "material cost")?;
        let labor_cost = self.labor_cost(total_labor_days, daily_wage)?;

        self.finish(
            CostStrategy::MaterialQuantity,
            material_cost,
            labor_cost,
            Some(CostBreakdown {
                steel,
                cement,
                sand,
                others,
            }),
        )
    }

    fn labor_cost(&self, total_labor_days: u64, daily_wage: f64) -> Result<Decimal, CostError> {
        Ok(money(checked_mul(
            Decimal::from(total_labor_days),
            to_decimal(daily_wage, "daily wage")?,
            "labor cost",
        )?))
    }

    fn finish(
        &self,
        strategy: CostStrategy,
        material_cost: Decimal,
        labor_cost: Decimal,
        cost_breakdown: Option<CostBreakdown>,
    ) -> Result<CostEstimate, CostError> {
        let subtotal = checked_add(material_cost, labor_cost, "subtotal")?;
        let overhead_cost = money(checked_mul(subtotal, self.rates.overhead_fraction, "overhead cost")?);
        let total_cost = checked_add(subtotal, overhead_cost, "total cost")?;

        Ok(CostEstimate {
            strategy,
            material_cost,
            labor_cost,
            overhead_cost,
            total_cost,
            currency: self.rates.currency,
            cost_breakdown,
        })
    }
}

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn to_decimal(value: f64, what: &'static str) -> Result<Decimal, CostError> {
    Decimal::from_f64(value).ok_or(CostError::OutOfRange(what))
}

fn checked_mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CostError> {
    a.checked_mul(b).ok_or(CostError::OutOfRange(what))
}

fn checked_add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CostError> {
    a.checked_add(b).ok_or(CostError::OutOfRange(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn flat_rate_reference_project() {
        let cost = CostEstimator::default().flat_rate(1000.0, 1500.0, 500, 500.0).unwrap();
        assert_eq!(cost.material_cost, d(1_500_000));
        assert_eq!(cost.labor_cost, d(250_000));
        assert_eq!(cost.overhead_cost, d(175_000));
        assert_eq!(cost.total_cost, d(1_925_000));
        assert_eq!(cost.currency, "INR");
        assert!(cost.cost_breakdown.is_none());
    }

    #[test]
    fn material_quantity_reference_project() {
        let materials = MaterialEstimate {
            steel_tons: 10.5,
            cement_bags: 1200,
            sand_tons: 1800.0,
            water_liters: 1_500_000,
        };
        let cost = CostEstimator::default().material_quantity(&materials, 500, 500.0).unwrap();
        let breakdown = cost.cost_breakdown.clone().unwrap();
        assert_eq!(breakdown.steel, d(630_000));
        assert_eq!(breakdown.cement, d(504_000));
        assert_eq!(breakdown.sand, d(5_400_000));
        assert_eq!(breakdown.others, d(3_267_000));
        assert_eq!(cost.material_cost, d(9_801_000));
        assert_eq!(cost.overhead_cost, d(1_005_100));
        assert_eq!(cost.total_cost, d(11_056_100));
        assert_eq!(cost.strategy, CostStrategy::MaterialQuantity);
    }

    #[test]
    fn strategies_are_selected_not_merged() {
        let materials = MaterialEstimate {
            steel_tons: 1.0,
            cement_bags: 10,
            sand_tons: 1.0,
            water_liters: 0,
        };
        let inputs = CostInputs {
            built_up_area: 100.0,
            cost_per_sq_yard: 1000.0,
            materials: &materials,
            total_labor_days: 0,
            daily_wage: 500.0,
        };
        let estimator = CostEstimator::default();
        let flat = estimator.estimate(CostStrategy::FlatRate, inputs).unwrap();
        let quantity = estimator.estimate(CostStrategy::MaterialQuantity, inputs).unwrap();
        assert_eq!(flat.material_cost, d(100_000));
        // (60000 + 4200 + 3000) * 1.5
        assert_eq!(quantity.material_cost, d(100_800));
    }

    #[test]
    fn amounts_round_to_paise() {
        let cost = CostEstimator::default().flat_rate(333.333, 3.0, 1, 0.005).unwrap();
        assert_eq!(cost.material_cost, Decimal::new(100_000, 2));
        assert_eq!(cost.labor_cost, Decimal::new(1, 2));
        assert_eq!(cost.overhead_cost, Decimal::new(10_000, 2));
    }

    #[test]
    fn huge_rates_are_an_error_not_a_panic() {
        let err = CostEstimator::default().flat_rate(10_000.0, 1e300, 0, 0.0).unwrap_err();
        assert!(err.to_string().contains("cost per sq yard"));
    }

    #[test]
    fn strategy_names() {
        assert_eq!(CostStrategy::parse("Material-Quantity"), Some(CostStrategy::MaterialQuantity));
        assert_eq!(CostStrategy::parse("flat_rate"), Some(CostStrategy::FlatRate));
        assert_eq!(CostStrategy::parse("cheapest"), None);
    }

    #[test]
    fn parsed_strategy_serializes_snake_case() {
        let strategy = CostStrategy::parse(" materials ").unwrap();
        assert_eq!(serde_json::to_value(strategy).unwrap(), "material_quantity");
        assert_eq!(serde_json::to_value(CostStrategy::default()).unwrap(), "flat_rate");
    }

    #[test]
    fn serializes_amounts_as_numbers() {
        let cost = CostEstimator::default().flat_rate(1000.0, 1500.0, 500, 500.0).unwrap();
        let json = serde_json::to_value(&cost).unwrap();
        assert_eq!(json["total_cost"].as_f64(), Some(1_925_000.0));
        assert_eq!(json["strategy"], "flat_rate");
        assert!(json.get("cost_breakdown").is_none());
    }

    proptest! {
        #[test]
        fn flat_rate_components_add_up(
            area in 50.0f64..10_000.0,
            rate in 0.0f64..100_000.0,
            labor_days in 0u64..100_000,
            wage in 0.0f64..10_000.0,
        ) {
            let cost = CostEstimator::default().flat_rate(area, rate, labor_days, wage).unwrap();
            prop_assert_eq!(cost.material_cost + cost.labor_cost + cost.overhead_cost, cost.total_cost);
            let expected_overhead = money((cost.material_cost + cost.labor_cost) * Decimal::new(10, 2));
            prop_assert_eq!(cost.overhead_cost, expected_overhead);
        }
    }
}
