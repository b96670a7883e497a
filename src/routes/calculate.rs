//! Construction plan estimation.

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::api::SuccessResponse;
use crate::app::AppState;
use crate::domain::{normalize, CalculateRequest, ProjectResult};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::services::InsightProvider;

/// Decode a request body; an empty body or `{}` carries no input at all.
pub(super) fn parse_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<CalculateRequest> {
    let Json(body) = payload?;

    let is_empty = match &body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(ApiError::BadRequest("No input data provided".to_string()));
    }

    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(format!("Malformed request: {e}")))
}

/// Full estimate: schedule, materials, labor, costs, blueprint and insights.
///
/// POST /api/calculate
pub async fn calculate_construction_plan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<SuccessResponse<ProjectResult>> {
    let raw = parse_body(payload)?;
    let input = normalize(&raw)?;

    let estimate = state
        .pipeline
        .run(&input)
        .context("Cost estimation failed")?;

    let blueprint = state
        .blueprints
        .get_blueprint(&input.floors, input.built_up_area)
        .await;
    let insights = InsightProvider::get_insights(
        input.built_up_area,
        estimate.costs.total_cost,
        estimate.schedule.duration_weeks,
    );

    let result = ProjectResult::assemble(estimate, vec![blueprint], insights);

    tracing::info!(
        request_id = headers.request_id().unwrap_or("-"),
        project_id = %result.project_id,
        floors = %input.floors,
        area = input.built_up_area,
        strategy = ?result.costs.strategy,
        total_cost = %result.costs.total_cost,
        "Construction plan calculated"
    );

    Ok(SuccessResponse::new(result))
}
