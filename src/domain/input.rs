//! Request normalization.
//!
//! Area and floors are lenient: anything unusable becomes a default. Wage,
//! rate and day fields are strict and reject the request instead.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::cost::CostStrategy;
use super::floors::FloorSpec;

pub const MIN_AREA: f64 = 50.0;
pub const MAX_AREA: f64 = 10_000.0;
pub const FALLBACK_AREA: f64 = 100.0;
pub const DEFAULT_DAILY_WAGE: f64 = 500.0;
pub const DEFAULT_COST_PER_SQ_YARD: f64 = 1500.0;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Invalid numeric input for {field}: {value}")]
    InvalidNumericInput { field: &'static str, value: String },

    #[error("Unknown cost strategy '{0}' (expected 'flat_rate' or 'material_quantity')")]
    UnknownCostStrategy(String),
}

/// Request body as sent by the frontend. Numeric fields are kept as raw JSON
/// so both numbers and numeric strings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub built_up_area: Option<Value>,
    #[serde(default)]
    pub floors: Option<Value>,
    #[serde(default)]
    pub daily_wage_per_worker: Option<Value>,
    #[serde(default)]
    pub cost_per_sq_yard: Option<Value>,
    #[serde(default)]
    pub construction_days: Option<Value>,
    #[serde(default)]
    pub cost_strategy: Option<String>,
    #[serde(default)]
    pub optimize: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInput {
    /// Single-floor area in sq yards, clamped to [50, 10000].
    pub built_up_area: f64,
    pub floors: FloorSpec,
    pub daily_wage: f64,
    pub cost_per_sq_yard: f64,
    /// Requested programme length; `None` when absent or not positive.
    pub construction_days: Option<u64>,
    pub cost_strategy: CostStrategy,
    pub optimize: bool,
}

impl ProjectInput {
    pub fn floor_count(&self) -> u32 {
        self.floors.floor_count()
    }

    pub fn total_construction_area(&self) -> f64 {
        self.built_up_area * f64::from(self.floor_count())
    }
}

pub fn normalize(raw: &CalculateRequest) -> Result<ProjectInput, NormalizeError> {
    let daily_wage = parse_amount(
        "daily_wage_per_worker",
        raw.daily_wage_per_worker.as_ref(),
        DEFAULT_DAILY_WAGE,
    )?;
    let cost_per_sq_yard = parse_amount(
        "cost_per_sq_yard",
        raw.cost_per_sq_yard.as_ref(),
        DEFAULT_COST_PER_SQ_YARD,
    )?;
    let construction_days = parse_days(raw.construction_days.as_ref())?;
    let cost_strategy = match raw.cost_strategy.as_deref() {
        None => CostStrategy::default(),
        Some(s) => CostStrategy::parse(s).ok_or_else(|| NormalizeError::UnknownCostStrategy(s.to_string()))?,
    };

    Ok(ProjectInput {
        built_up_area: normalize_area(raw.built_up_area.as_ref()),
        floors: normalize_floors(raw.floors.as_ref()),
        daily_wage,
        cost_per_sq_yard,
        construction_days,
        cost_strategy,
        optimize: raw.optimize,
    })
}

/// Missing area counts as zero and is clamped up; unparseable area falls
/// back to a nominal plot.
pub fn normalize_area(value: Option<&Value>) -> f64 {
    let parsed = match value {
        None => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed.filter(|v| v.is_finite()) {
        Some(v) => v.clamp(MIN_AREA, MAX_AREA),
        None => FALLBACK_AREA,
    }
}

pub fn normalize_floors(value: Option<&Value>) -> FloorSpec {
    match value {
        None => FloorSpec::default(),
        Some(Value::String(s)) => FloorSpec::parse(s),
        Some(other) => FloorSpec::parse(&other.to_string()),
    }
}

fn parse_amount(field: &'static str, value: Option<&Value>, default: f64) -> Result<f64, NormalizeError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| invalid(field, value))
}

fn parse_days(value: Option<&Value>) -> Result<Option<u64>, NormalizeError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let days = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid("construction_days", value))?;

    Ok(u64::try_from(days).ok().filter(|d| *d > 0))
}

fn invalid(field: &'static str, value: &Value) -> NormalizeError {
    NormalizeError::InvalidNumericInput {
        field,
        value: value.to_string(),
    }
}
