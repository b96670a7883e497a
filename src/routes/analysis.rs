//! AI-backed risk analysis of a project outline.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::calculate::parse_body;
use crate::api::SuccessResponse;
use crate::app::AppState;
use crate::domain::{normalize, result::generate_project_id, FloorSpec};
use crate::error::ApiResult;
use crate::middleware::RequestIdExt;
use crate::services::{insights::Analysis, ProjectSummary};

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub project_id: String,
    pub floors: FloorSpec,
    pub duration_days: u64,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Narrative risks and recommendations. Always 200 once the input is valid;
/// an unavailable AI service yields the fallback text.
///
/// POST /api/analysis
pub async fn analyze_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<SuccessResponse<AnalysisResponse>> {
    let raw = parse_body(payload)?;
    // Strict fields are validated even though only area, floors and days are used
    let input = normalize(&raw)?;

    let days = state
        .pipeline
        .schedule()
        .duration_days(input.floor_count(), input.construction_days);

    let summary = ProjectSummary {
        area: input.built_up_area,
        floors: input.floors.clone(),
        days,
    };
    let analysis = state.insights.get_analysis(&summary).await;

    tracing::info!(
        request_id = headers.request_id().unwrap_or("-"),
        floors = %summary.floors,
        days,
        ai_available = analysis.ai_available,
        "Project analysis produced"
    );

    Ok(SuccessResponse::new(AnalysisResponse {
        project_id: generate_project_id(),
        floors: summary.floors,
        duration_days: days,
        analysis,
    }))
}
