use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

/// Liveness probe. Reports the configured model without contacting it.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        model: state.settings.ollama_model.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::offline_app;
    use crate::routes::test_support::send;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn reports_online_with_model() {
        let (status, body) = send(offline_app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "online", "model": "granite3.3:2b" }));
    }
}
